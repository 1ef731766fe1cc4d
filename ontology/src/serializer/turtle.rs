//! Turtle 1.1 serializer.
//!
//! Produces a prefix block followed by one commented block per section (or a
//! single undivided block). Within a block, assertions are grouped by subject
//! in order of first appearance and by predicate within a subject.

use std::collections::HashMap;

use crate::assemble::Assembly;
use crate::model::{escape_iri, escape_literal, iris, Literal, Node, Triple};

/// Serializes an assembled graph to a Turtle string.
#[must_use]
pub fn to_turtle(assembly: &Assembly<'_>) -> String {
    let mut out = String::with_capacity(assembly.triple_count() * 96 + 512);

    for (prefix, iri) in iris::PREFIXES {
        out.push_str(&format!("@prefix {prefix}: <{iri}> .\n"));
    }
    out.push('\n');

    for block in &assembly.blocks {
        if let Some(section) = block.section {
            out.push_str(&format!("# {}\n\n", section.title()));
        }
        write_block(&mut out, &block.triples);
    }

    out
}

/// Subject → predicate → objects, each level in first-seen order.
type Grouped<'a> = Vec<(&'a Node, Vec<(&'a Node, Vec<&'a Node>)>)>;

fn group<'a>(triples: &[&'a Triple]) -> Grouped<'a> {
    let mut grouped: Grouped<'a> = Vec::new();
    let mut index: HashMap<&'a Node, usize> = HashMap::new();
    for t in triples {
        let idx = *index.entry(&t.subject).or_insert_with(|| {
            grouped.push((&t.subject, Vec::new()));
            grouped.len() - 1
        });
        let preds = &mut grouped[idx].1;
        match preds.iter_mut().find(|(p, _)| *p == &t.predicate) {
            Some((_, objs)) => objs.push(&t.object),
            None => preds.push((&t.predicate, vec![&t.object])),
        }
    }
    grouped
}

fn write_block(out: &mut String, triples: &[&Triple]) {
    for (subject, preds) in group(triples) {
        out.push_str(&term(subject));
        let mut first = true;
        for (predicate, objects) in preds {
            out.push_str(if first { " " } else { " ;\n    " });
            first = false;
            out.push_str(&predicate_term(predicate));
            out.push(' ');
            let rendered: Vec<String> = objects.iter().map(|o| term(o)).collect();
            out.push_str(&rendered.join(" , "));
        }
        out.push_str(" .\n\n");
    }
}

fn predicate_term(node: &Node) -> String {
    match node {
        Node::Iri(iri) if iri == iris::RDF_TYPE => "a".to_owned(),
        _ => term(node),
    }
}

fn term(node: &Node) -> String {
    match node {
        Node::Iri(iri) => iri_term(iri),
        Node::Literal(lit) => literal_term(lit),
        Node::Blank(id) => format!("_:{id}"),
    }
}

fn iri_term(iri: &str) -> String {
    for (prefix, ns) in iris::PREFIXES {
        if let Some(local) = iri.strip_prefix(ns) {
            if is_safe_local(local) {
                return format!("{prefix}:{local}");
            }
        }
    }
    format!("<{}>", escape_iri(iri))
}

fn literal_term(lit: &Literal) -> String {
    let quoted = format!("\"{}\"", escape_literal(&lit.lexical));
    match (&lit.language, &lit.datatype) {
        (Some(lang), _) => format!("{quoted}@{lang}"),
        (None, Some(dt)) => format!("{quoted}^^{}", iri_term(dt)),
        (None, None) => quoted,
    }
}

/// A conservative subset of Turtle `PN_LOCAL`: ASCII alphanumerics, `_` and
/// `-`, not starting with `-`.
fn is_safe_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AssertionStore, Section};

    fn ex(local: &str) -> Node {
        Node::iri(format!("{}{local}", iris::EX))
    }

    fn sample() -> AssertionStore {
        let mut store = AssertionStore::new();
        let thermostat = ex("RadiatorThermostat_Dev_42");
        store.add(
            Section::Device,
            Triple::new(
                thermostat.clone(),
                Node::iri(iris::RDF_TYPE),
                Node::iri(format!("{}Thermostat", iris::BRICK)),
            ),
        );
        store.add(
            Section::Device,
            Triple::new(
                thermostat,
                Node::iri(iris::RDF_VALUE),
                Node::iri("http://fiware.rwth-aachen.de/v2/entities/Dev:42/attrs/targetTemperature/value"),
            ),
        );
        store.add(
            Section::Header,
            Triple::new(
                ex("Header_FiwareService_Dev_42"),
                Node::iri(iris::HTTP_FIELD_VALUE),
                Node::literal("iot"),
            ),
        );
        store
    }

    #[test]
    fn produces_prefixes_and_sections() {
        let store = sample();
        let ttl = to_turtle(&Assembly::from_store(&store, true));
        assert!(ttl.contains("@prefix brick: <https://brickschema.org/schema/Brick#> ."));
        assert!(ttl.contains("# Device facts"));
        assert!(ttl.contains("# Header facts"));
        assert!(!ttl.contains("# API facts"));
    }

    #[test]
    fn groups_predicates_under_subject() {
        let store = sample();
        let ttl = to_turtle(&Assembly::from_store(&store, false));
        assert!(ttl.contains(
            "ex:RadiatorThermostat_Dev_42 a brick:Thermostat ;\n    rdf:value \
             <http://fiware.rwth-aachen.de/v2/entities/Dev:42/attrs/targetTemperature/value> .\n"
        ));
        assert!(!ttl.contains("# Device facts"));
    }

    #[test]
    fn interleaved_subjects_group_in_first_seen_order() {
        let a = ex("a");
        let b = ex("b");
        let ty = Node::iri(iris::RDF_TYPE);
        let triples = [
            Triple::new(a.clone(), ty.clone(), Node::iri(iris::HTTP_REQUEST)),
            Triple::new(b.clone(), ty.clone(), Node::iri(iris::HTTP_PARAMETER)),
            Triple::new(a.clone(), Node::iri(iris::HTTP_MTHD), Node::literal("GET")),
            Triple::new(b.clone(), ty, Node::iri(iris::HTTP_MESSAGE_HEADER)),
        ];
        let refs: Vec<&Triple> = triples.iter().collect();
        let grouped = group(&refs);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, &a);
        assert_eq!(grouped[0].1.len(), 2);
        assert_eq!(grouped[1].0, &b);
        assert_eq!(grouped[1].1[0].1.len(), 2);
    }

    #[test]
    fn unsafe_local_names_stay_bracketed() {
        assert_eq!(iri_term("http://example.com/resource/a.b"), "<http://example.com/resource/a.b>");
        assert_eq!(iri_term("http://example.com/resource/Dev_1"), "ex:Dev_1");
        assert_eq!(iri_term("http://example.com/resource/"), "<http://example.com/resource/>");
        assert_eq!(
            iri_term("http://example.com/resource/TemperatureSensor_Sensor 7"),
            "<http://example.com/resource/TemperatureSensor_Sensor%207>"
        );
    }

    #[test]
    fn typed_literal_uses_prefix() {
        let lit = Literal::typed("21.5", format!("{}decimal", iris::XSD));
        assert_eq!(literal_term(&lit), "\"21.5\"^^xsd:decimal");
    }
}
