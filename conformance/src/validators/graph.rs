//! Structural checks over an in-memory assertion store.
//!
//! - every `http:Request` has exactly one `http:mthd` literal and exactly one
//!   `http:requestURI` IRI
//! - every `http:MessageHeader` has `http:fieldName` and `http:fieldValue`
//!   literals
//! - every object of `http:headers` / `http:params` is typed accordingly
//! - no identifier in the resource namespace carries the `:` separator in its
//!   local name

use std::collections::HashSet;

use iotkg_ontology::model::iris;
use iotkg_ontology::{AssertionStore, Node};

use crate::report::{ConformanceReport, TestResult};

/// Detail lines kept per failing check.
const MAX_DETAILS: usize = 10;

/// Runs every graph check against `store`. `namespace` is the resource
/// namespace synthesized identifiers live in.
#[must_use]
pub fn validate(store: &AssertionStore, namespace: &str) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    report.push(check_requests(store));
    report.push(check_headers(store));
    report.push(check_links(store, iris::HTTP_HEADERS, iris::HTTP_MESSAGE_HEADER, "graph/header-link"));
    report.push(check_links(store, iris::HTTP_PARAMS, iris::HTTP_PARAMETER, "graph/param-link"));
    report.push(check_identifiers(store, namespace));
    report
}

/// Distinct subjects typed `class`, in first-seen order.
fn instances_of<'a>(store: &'a AssertionStore, class: &Node) -> Vec<&'a Node> {
    let rdf_type = Node::iri(iris::RDF_TYPE);
    let mut seen = HashSet::new();
    store
        .iter()
        .filter(|t| t.predicate == rdf_type && &t.object == class)
        .map(|t| &t.subject)
        .filter(|s| seen.insert(*s))
        .collect()
}

fn objects<'a>(store: &'a AssertionStore, subject: &Node, predicate: &str) -> Vec<&'a Node> {
    let predicate = Node::iri(predicate);
    store
        .about(subject)
        .filter(|t| t.predicate == predicate)
        .map(|t| &t.object)
        .collect()
}

fn finish(validator: &str, checked: usize, what: &str, problems: Vec<String>) -> TestResult {
    if problems.is_empty() {
        TestResult::pass(validator, format!("{checked} {what} well-formed"))
    } else {
        let count = problems.len();
        TestResult::fail_with_details(
            validator,
            format!("{count} of {checked} {what} malformed"),
            problems.into_iter().take(MAX_DETAILS).collect(),
        )
    }
}

fn check_requests(store: &AssertionStore) -> TestResult {
    let class = Node::iri(iris::HTTP_REQUEST);
    let requests = instances_of(store, &class);
    let mut problems = Vec::new();
    for request in &requests {
        let methods = objects(store, request, iris::HTTP_MTHD);
        if methods.len() != 1 || methods[0].as_literal().is_none() {
            problems.push(format!("{request}: expected one http:mthd literal, found {}", methods.len()));
        }
        let uris = objects(store, request, iris::HTTP_REQUEST_URI);
        if uris.len() != 1 || !uris[0].is_iri() {
            problems.push(format!("{request}: expected one http:requestURI IRI, found {}", uris.len()));
        }
    }
    finish("graph/request", requests.len(), "requests", problems)
}

fn check_headers(store: &AssertionStore) -> TestResult {
    let class = Node::iri(iris::HTTP_MESSAGE_HEADER);
    let headers = instances_of(store, &class);
    let mut problems = Vec::new();
    for header in &headers {
        for predicate in [iris::HTTP_FIELD_NAME, iris::HTTP_FIELD_VALUE] {
            let values = objects(store, header, predicate);
            if values.is_empty() || values.iter().any(|v| v.as_literal().is_none()) {
                problems.push(format!("{header}: missing or non-literal <{predicate}>"));
            }
        }
    }
    finish("graph/header", headers.len(), "headers", problems)
}

fn check_links(store: &AssertionStore, link: &str, class: &str, validator: &str) -> TestResult {
    let link = Node::iri(link);
    let rdf_type = Node::iri(iris::RDF_TYPE);
    let class = Node::iri(class);
    let mut checked = 0usize;
    let mut problems = Vec::new();
    for t in store.matching(None, Some(&link), None) {
        checked += 1;
        if !store.contains(&t.object, Some(&rdf_type), Some(&class)) {
            problems.push(format!("{} links untyped node {}", t.subject, t.object));
        }
    }
    finish(validator, checked, "links", problems)
}

fn check_identifiers(store: &AssertionStore, namespace: &str) -> TestResult {
    let mut checked = 0usize;
    let mut problems = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for t in store.iter() {
        for node in [&t.subject, &t.predicate, &t.object] {
            let Some(local) = node.as_iri().and_then(|iri| iri.strip_prefix(namespace)) else {
                continue;
            };
            if !seen.insert(local) {
                continue;
            }
            checked += 1;
            if local.contains(':') {
                problems.push(format!("{node}: namespace separator in local name"));
            }
        }
    }
    finish("graph/identifier", checked, "identifiers", problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iotkg_ontology::{Section, Triple};

    fn ex(local: &str) -> Node {
        Node::iri(format!("{}{local}", iris::EX))
    }

    fn well_formed() -> AssertionStore {
        let mut store = AssertionStore::new();
        let request = ex("GET_Dev_1");
        let header = ex("Header_FiwareService_Dev_1");
        store.extend(
            Section::Api,
            [
                Triple::new(request.clone(), Node::iri(iris::RDF_TYPE), Node::iri(iris::HTTP_REQUEST)),
                Triple::new(request.clone(), Node::iri(iris::HTTP_MTHD), Node::literal("GET")),
                Triple::new(
                    request.clone(),
                    Node::iri(iris::HTTP_REQUEST_URI),
                    Node::iri("http://h/v2/entities/Dev:1/attrs/t/value"),
                ),
                Triple::new(request, Node::iri(iris::HTTP_HEADERS), header.clone()),
            ],
        );
        store.extend(
            Section::Header,
            [
                Triple::new(header.clone(), Node::iri(iris::RDF_TYPE), Node::iri(iris::HTTP_MESSAGE_HEADER)),
                Triple::new(header.clone(), Node::iri(iris::HTTP_FIELD_NAME), Node::literal("Fiware-Service")),
                Triple::new(header, Node::iri(iris::HTTP_FIELD_VALUE), Node::literal("iot")),
            ],
        );
        store
    }

    #[test]
    fn well_formed_graph_passes() {
        let report = validate(&well_formed(), iris::EX);
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn second_method_fails() {
        let mut store = well_formed();
        store.add(
            Section::Api,
            Triple::new(ex("GET_Dev_1"), Node::iri(iris::HTTP_MTHD), Node::literal("POST")),
        );
        let report = validate(&store, iris::EX);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results[0].validator, "graph/request");
    }

    #[test]
    fn untyped_link_and_unsanitized_id_fail() {
        let mut store = well_formed();
        store.add(
            Section::Api,
            Triple::new(ex("GET_Dev_1"), Node::iri(iris::HTTP_PARAMS), ex("Param_type_Dev:1")),
        );
        let report = validate(&store, iris::EX);
        let failed: Vec<_> = report
            .results
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.validator.as_str())
            .collect();
        assert_eq!(failed, vec!["graph/param-link", "graph/identifier"]);
    }

    #[test]
    fn many_requests_are_each_checked_once() {
        let mut store = AssertionStore::new();
        for i in 0..2_000 {
            let request = ex(&format!("GET_Dev_{i}"));
            store.extend(
                Section::Api,
                [
                    Triple::new(request.clone(), Node::iri(iris::RDF_TYPE), Node::iri(iris::HTTP_REQUEST)),
                    Triple::new(request.clone(), Node::iri(iris::HTTP_MTHD), Node::literal("GET")),
                    Triple::new(
                        request,
                        Node::iri(iris::HTTP_REQUEST_URI),
                        Node::iri(format!("http://h/v2/entities/Dev:{i}/attrs/t/value")),
                    ),
                ],
            );
        }
        let report = validate(&store, iris::EX);
        assert!(report.all_passed(), "{:#?}", report.results);
        assert_eq!(report.results[0].message, "2000 requests well-formed");
    }
}
