//! Core RDF term model.
//!
//! Assertions are plain owned triples of [`Node`]s. Subjects and predicates
//! synthesized by the mapper are always IRIs; objects may be IRIs or
//! literals. Blank nodes only enter the graph through pre-seeded Turtle.

use std::fmt;

/// A single RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    /// An absolute IRI (e.g. `"http://example.com/resource/Thermostat_Dev_42"`).
    Iri(String),
    /// A literal value.
    Literal(Literal),
    /// A blank node label, without the `_:` prefix.
    Blank(String),
}

impl Node {
    /// Builds an IRI node.
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    /// Builds a plain (`xsd:string`) literal node.
    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal(Literal::plain(value))
    }

    /// Returns the IRI text if this node is an IRI.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the literal if this node is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Returns true for IRI nodes.
    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", escape_iri(iri)),
            Node::Literal(lit) => write!(f, "{lit}"),
            Node::Blank(id) => write!(f, "_:{id}"),
        }
    }
}

/// An RDF literal. A literal carries either a datatype or a language tag,
/// never both; a literal with neither is an `xsd:string`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// The lexical form.
    pub lexical: String,
    /// Full datatype IRI, `None` for plain strings and language-tagged literals.
    pub datatype: Option<String>,
    /// BCP 47 language tag.
    pub language: Option<String>,
}

impl Literal {
    /// A plain string literal.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// A typed literal. `xsd:string` collapses to a plain literal so that the
    /// two spellings deduplicate to the same assertion.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        let datatype = datatype.into();
        Self {
            lexical: value.into(),
            datatype: (datatype != iris::XSD_STRING).then_some(datatype),
            language: None,
        }
    }

    /// A language-tagged literal.
    pub fn tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(&self.lexical))?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{}>", escape_iri(dt))
        } else {
            Ok(())
        }
    }
}

/// Escapes a lexical form for use inside a double-quoted Turtle or
/// N-Triples string.
#[must_use]
pub fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes the characters an `IRIREF` may not contain (controls,
/// space, `<>"{}|^` backtick and backslash). Everything else, including
/// `:` `/` `#` and non-ASCII, passes through unchanged.
#[must_use]
pub fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '\u{0}'..='\u{20}' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                out.push_str(&format!("%{:02X}", u32::from(c)));
            }
            _ => out.push(c),
        }
    }
    out
}

/// One semantic assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    /// Subject.
    pub subject: Node,
    /// Predicate.
    pub predicate: Node,
    /// Object.
    pub object: Node,
}

impl Triple {
    /// Builds a triple from its three terms.
    pub fn new(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Vocabulary IRIs used by the mapper and the serializers.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// Brick schema namespace.
    pub const BRICK: &str = "https://brickschema.org/schema/Brick#";
    /// RealEstateCore namespace.
    pub const REC: &str = "https://w3id.org/rec#";
    /// W3C HTTP vocabulary namespace.
    pub const HTTP: &str = "http://www.w3.org/2011/http#";
    /// Default namespace for synthesized resources.
    pub const EX: &str = "http://example.com/resource/";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:value`.
    pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// `brick:isPointOf`.
    pub const BRICK_IS_POINT_OF: &str = "https://brickschema.org/schema/Brick#isPointOf";
    /// `brick:hasLocation`.
    pub const BRICK_HAS_LOCATION: &str = "https://brickschema.org/schema/Brick#hasLocation";
    /// `brick:Temperature_Setpoint`.
    pub const BRICK_TEMPERATURE_SETPOINT: &str =
        "https://brickschema.org/schema/Brick#Temperature_Setpoint";

    /// `http:Request`.
    pub const HTTP_REQUEST: &str = "http://www.w3.org/2011/http#Request";
    /// `http:mthd`.
    pub const HTTP_MTHD: &str = "http://www.w3.org/2011/http#mthd";
    /// `http:requestURI`.
    pub const HTTP_REQUEST_URI: &str = "http://www.w3.org/2011/http#requestURI";
    /// `http:headers`.
    pub const HTTP_HEADERS: &str = "http://www.w3.org/2011/http#headers";
    /// `http:MessageHeader`.
    pub const HTTP_MESSAGE_HEADER: &str = "http://www.w3.org/2011/http#MessageHeader";
    /// `http:fieldName`.
    pub const HTTP_FIELD_NAME: &str = "http://www.w3.org/2011/http#fieldName";
    /// `http:fieldValue`.
    pub const HTTP_FIELD_VALUE: &str = "http://www.w3.org/2011/http#fieldValue";
    /// `http:params`.
    pub const HTTP_PARAMS: &str = "http://www.w3.org/2011/http#params";
    /// `http:Parameter`.
    pub const HTTP_PARAMETER: &str = "http://www.w3.org/2011/http#Parameter";
    /// `http:paramName`.
    pub const HTTP_PARAM_NAME: &str = "http://www.w3.org/2011/http#paramName";
    /// `http:paramValue`.
    pub const HTTP_PARAM_VALUE: &str = "http://www.w3.org/2011/http#paramValue";

    /// Prefix table used by the Turtle serializer, in declaration order.
    pub const PREFIXES: &[(&str, &str)] = &[
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("xsd", XSD),
        ("brick", BRICK),
        ("rec", REC),
        ("http", HTTP),
        ("ex", EX),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xsd_string_collapses_to_plain() {
        assert_eq!(
            Literal::typed("iot", iris::XSD_STRING),
            Literal::plain("iot")
        );
    }

    #[test]
    fn display_escapes_quotes() {
        let node = Node::literal("say \"hi\"\n");
        assert_eq!(node.to_string(), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn iri_display_percent_encodes_illegal_characters() {
        let node = Node::iri("http://fiware.rwth-aachen.de/v2/entities/Sensor 7/attrs/{t}|x");
        assert_eq!(
            node.to_string(),
            "<http://fiware.rwth-aachen.de/v2/entities/Sensor%207/attrs/%7Bt%7D%7Cx>"
        );
        assert_eq!(escape_iri("http://x/Dev:42#a"), "http://x/Dev:42#a");
        assert_eq!(escape_iri("http://x/a\\b\"c"), "http://x/a%5Cb%22c");
    }

    #[test]
    fn triple_display_is_ntriples_line() {
        let t = Triple::new(
            Node::iri("http://example.com/resource/a"),
            Node::iri(iris::RDF_TYPE),
            Node::iri(iris::HTTP_REQUEST),
        );
        assert_eq!(
            t.to_string(),
            "<http://example.com/resource/a> \
             <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> \
             <http://www.w3.org/2011/http#Request> ."
        );
    }
}
