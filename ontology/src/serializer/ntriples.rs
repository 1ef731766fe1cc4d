//! N-Triples serializer.
//!
//! One triple per line with absolute IRIs, in block order. Section headings
//! are not emitted since N-Triples comments would be noise for bulk loaders.

use crate::assemble::Assembly;

/// Serializes an assembled graph to an N-Triples string.
#[must_use]
pub fn to_ntriples(assembly: &Assembly<'_>) -> String {
    let mut out = String::with_capacity(assembly.triple_count() * 128);
    for block in &assembly.blocks {
        for triple in &block.triples {
            out.push_str(&triple.to_string());
            out.push('\n');
        }
    }
    out
}
