//! Deduplicating, append-only assertion store.
//!
//! The store is a set of [`Triple`]s for membership purposes and an
//! insertion-ordered log for export purposes. Every triple is tagged with the
//! [`Section`] it was first inserted into; re-inserting a triple that is
//! already present is a no-op regardless of the section requested.
//!
//! The store has a single owner. It is passed explicitly to whatever
//! synthesizes assertions, and nothing in the workspace holds it globally.

use std::collections::{HashMap, HashSet};

use crate::model::{Node, Triple};

/// Named partition of the exported graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// Pre-seeded assertions loaded before synthesis.
    Background,
    /// Device, location and class assertions.
    Device,
    /// HTTP request and parameter assertions.
    Api,
    /// HTTP header node assertions.
    Header,
}

impl Section {
    /// All sections in export order.
    pub const ALL: [Section; 4] = [
        Section::Background,
        Section::Device,
        Section::Api,
        Section::Header,
    ];

    /// Human-readable heading used in the Turtle export.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Section::Background => "Background facts",
            Section::Device => "Device facts",
            Section::Api => "API facts",
            Section::Header => "Header facts",
        }
    }
}

/// A partial triple pattern anchored on a subject.
///
/// `Pattern::subject(s)` matches any assertion about `s`; `Pattern::exact`
/// matches one specific triple. The two are deliberately distinct guards.
#[derive(Debug, Clone, Copy)]
pub struct Pattern<'a> {
    /// Required subject.
    pub subject: &'a Node,
    /// Optional predicate constraint.
    pub predicate: Option<&'a Node>,
    /// Optional object constraint.
    pub object: Option<&'a Node>,
}

impl<'a> Pattern<'a> {
    /// Matches every assertion whose subject is `subject`.
    #[must_use]
    pub fn subject(subject: &'a Node) -> Self {
        Self {
            subject,
            predicate: None,
            object: None,
        }
    }

    /// Matches exactly one triple.
    #[must_use]
    pub fn exact(subject: &'a Node, predicate: &'a Node, object: &'a Node) -> Self {
        Self {
            subject,
            predicate: Some(predicate),
            object: Some(object),
        }
    }

    /// Returns true if `triple` satisfies this pattern.
    #[must_use]
    pub fn matches(&self, triple: &Triple) -> bool {
        &triple.subject == self.subject
            && self.predicate.map_or(true, |p| &triple.predicate == p)
            && self.object.map_or(true, |o| &triple.object == o)
    }
}

/// Append-only set of assertions with idempotent insertion.
#[derive(Debug, Default)]
pub struct AssertionStore {
    log: Vec<(Section, Triple)>,
    members: HashSet<Triple>,
    by_subject: HashMap<Node, Vec<usize>>,
    documents: usize,
}

impl AssertionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Returns true if the store holds no assertions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Inserts `triple` into `section`. Returns whether it was newly inserted.
    pub fn add(&mut self, section: Section, triple: Triple) -> bool {
        if self.members.contains(&triple) {
            return false;
        }
        let idx = self.log.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(idx);
        self.members.insert(triple.clone());
        self.log.push((section, triple));
        true
    }

    /// Existence check with optional predicate and object constraints.
    ///
    /// `contains(s, None, None)` asks whether `s` carries any assertion at
    /// all, which is a broader question than whether one exact triple exists.
    #[must_use]
    pub fn contains(&self, subject: &Node, predicate: Option<&Node>, object: Option<&Node>) -> bool {
        self.contains_pattern(&Pattern {
            subject,
            predicate,
            object,
        })
    }

    /// Returns true if any stored assertion matches `pattern`.
    #[must_use]
    pub fn contains_pattern(&self, pattern: &Pattern<'_>) -> bool {
        if let (Some(p), Some(o)) = (pattern.predicate, pattern.object) {
            return self
                .members
                .contains(&Triple::new(pattern.subject.clone(), p.clone(), o.clone()));
        }
        self.by_subject
            .get(pattern.subject)
            .is_some_and(|idxs| idxs.iter().any(|&i| pattern.matches(&self.log[i].1)))
    }

    /// Inserts the whole group `triples` into `section` unless some stored
    /// assertion already matches `guard`. Returns the triples that were newly
    /// inserted, which is empty when the guard matched.
    pub fn upsert_if_absent<I>(&mut self, section: Section, guard: &Pattern<'_>, triples: I) -> Vec<Triple>
    where
        I: IntoIterator<Item = Triple>,
    {
        if self.contains_pattern(guard) {
            return Vec::new();
        }
        self.extend(section, triples)
    }

    /// Inserts every triple of `triples`, returning the ones that were new.
    pub fn extend<I>(&mut self, section: Section, triples: I) -> Vec<Triple>
    where
        I: IntoIterator<Item = Triple>,
    {
        triples
            .into_iter()
            .filter_map(|t| self.add(section, t.clone()).then_some(t))
            .collect()
    }

    /// All assertions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.log.iter().map(|(_, t)| t)
    }

    /// Assertions whose subject is `subject`, in insertion order.
    pub fn about<'a>(&'a self, subject: &Node) -> impl Iterator<Item = &'a Triple> + 'a {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(|&i| &self.log[i].1)
    }

    /// Assertions of one section, in insertion order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &Triple> {
        self.log
            .iter()
            .filter(move |(s, _)| *s == section)
            .map(|(_, t)| t)
    }

    /// Assertions matching an arbitrary pattern where any position may be open.
    pub fn matching<'a>(
        &'a self,
        subject: Option<&'a Node>,
        predicate: Option<&'a Node>,
        object: Option<&'a Node>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.iter().filter(move |t| {
            subject.map_or(true, |s| &t.subject == s)
                && predicate.map_or(true, |p| &t.predicate == p)
                && object.map_or(true, |o| &t.object == o)
        })
    }

    /// Reserves a fresh scope number for one loaded document. Blank node
    /// labels are only meaningful inside the document that declares them.
    pub(crate) fn open_document(&mut self) -> usize {
        let scope = self.documents;
        self.documents += 1;
        scope
    }

    /// Number of assertions whose subject is `subject`.
    #[must_use]
    pub fn subject_count(&self, subject: &Node) -> usize {
        self.by_subject.get(subject).map_or(0, Vec::len)
    }
}
