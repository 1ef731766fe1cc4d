//! Turtle loader for pre-seeded background assertions.
//!
//! Background graphs (an existing knowledge graph, the HTTP vocabulary) are
//! parsed with `sophia_turtle` and merged into [`Section::Background`] with
//! the store's usual triple-level deduplication.

use std::path::Path;

use sophia_api::source::TripleSource;
use sophia_api::term::{Term, TermKind};
use sophia_api::triple::Triple as _;
use sophia_turtle::parser::turtle;
use thiserror::Error;

use crate::model::{Literal, Node, Triple};
use crate::store::{AssertionStore, Section};

/// Errors raised while loading a background graph.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid Turtle.
    #[error("failed to parse Turtle from {origin}: {message}")]
    Parse {
        /// File path or other label identifying the document.
        origin: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Outcome of merging one background document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Triples read from the document.
    pub parsed: usize,
    /// Triples that were not already in the store.
    pub inserted: usize,
    /// RDF-star triples, which the store cannot represent.
    pub skipped: usize,
}

/// Parses `text` as Turtle and merges it into the background section.
///
/// Blank nodes are scoped to this call: `_:b` (or `[]`) in two different
/// documents yields two distinct nodes, while repeated labels within one
/// document still denote the same node.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the document is not valid Turtle. Nothing
/// is inserted when parsing fails.
pub fn load_turtle_str(
    store: &mut AssertionStore,
    text: &str,
    origin: &str,
) -> Result<LoadReport, LoadError> {
    let scope = store.open_document();
    let mut parsed = Vec::new();
    let mut skipped = 0usize;
    turtle::parse_str(text)
        .for_each_triple(|t| {
            match (
                node_from_term(t.s(), scope),
                node_from_term(t.p(), scope),
                node_from_term(t.o(), scope),
            ) {
                (Some(s), Some(p), Some(o)) => parsed.push(Triple::new(s, p, o)),
                _ => skipped += 1,
            }
        })
        .map_err(|e| LoadError::Parse {
            origin: origin.to_owned(),
            message: e.to_string(),
        })?;

    let count = parsed.len();
    let inserted = store.extend(Section::Background, parsed).len();
    tracing::debug!(origin, parsed = count, inserted, skipped, "merged background graph");
    Ok(LoadReport {
        parsed: count,
        inserted,
        skipped,
    })
}

/// Reads and merges a Turtle file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Parse`] if it is not valid Turtle.
pub fn load_turtle_file(store: &mut AssertionStore, path: &Path) -> Result<LoadReport, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_turtle_str(store, &text, &path.display().to_string())
}

fn node_from_term<T: Term>(term: T, scope: usize) -> Option<Node> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Node::Iri(iri.as_str().to_owned())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Node::Blank(format!("s{scope}_{}", id.as_str()))),
        TermKind::Literal => {
            let lexical = term.lexical_form()?.to_string();
            let lit = match term.language_tag() {
                Some(lang) => Literal::tagged(lexical, lang.as_str()),
                None => match term.datatype() {
                    Some(dt) => Literal::typed(lexical, dt.as_str()),
                    None => Literal::plain(lexical),
                },
            };
            Some(Node::Literal(lit))
        }
        _ => None,
    }
}
