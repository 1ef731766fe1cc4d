//! Groups a store's assertions into named blocks for export.

use crate::model::Triple;
use crate::store::{AssertionStore, Section};

/// One exported block of assertions.
#[derive(Debug)]
pub struct Block<'a> {
    /// The section this block renders, or `None` for an undivided export.
    pub section: Option<Section>,
    /// Assertions in insertion order.
    pub triples: Vec<&'a Triple>,
}

/// Ordered blocks ready for a serializer.
#[derive(Debug)]
pub struct Assembly<'a> {
    /// Non-empty blocks in export order.
    pub blocks: Vec<Block<'a>>,
}

impl<'a> Assembly<'a> {
    /// Builds the export layout for `store`.
    ///
    /// With `partition` set, one block is produced per non-empty [`Section`]
    /// in [`Section::ALL`] order. Otherwise the whole store is one block in
    /// insertion order.
    #[must_use]
    pub fn from_store(store: &'a AssertionStore, partition: bool) -> Self {
        let blocks = if partition {
            Section::ALL
                .iter()
                .map(|&section| Block {
                    section: Some(section),
                    triples: store.section(section).collect(),
                })
                .filter(|b| !b.triples.is_empty())
                .collect()
        } else {
            vec![Block {
                section: None,
                triples: store.iter().collect(),
            }]
        };
        Self { blocks }
    }

    /// Total number of assertions across all blocks.
    #[must_use]
    pub fn triple_count(&self) -> usize {
        self.blocks.iter().map(|b| b.triples.len()).sum()
    }
}
