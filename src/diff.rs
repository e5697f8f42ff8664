//! Thin adapters over the `similar` diff engine.
//!
//! The pipeline never implements its own LCS; it consumes `similar`'s
//! output in two shapes: unified line-diff text (fed to the hunk
//! parser) and character-level edit operations (fed to the aligner).

use similar::{Algorithm, DiffOp, TextDiff};

use crate::models::CharDiffOp;

/// Compute a unified line diff with three lines of context.
/// Returns an empty string when the texts are identical.
pub fn unified_line_diff(old: &str, new: &str) -> String {
    TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .to_string()
}

/// Compute character-level edit operations between two lines.
///
/// Operations are reported in character-ordinal space (Unicode scalar
/// values, not bytes). Equal runs are dropped; an empty result means
/// the lines are identical.
pub fn char_diff_ops(old: &str, new: &str) -> Vec<CharDiffOp> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(old, new);

    diff.ops()
        .iter()
        .filter_map(|op| match *op {
            DiffOp::Equal { .. } => None,
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => Some(CharDiffOp {
                old_start: old_index,
                old_len,
                new_start: new_index,
                new_len: 0,
            }),
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => Some(CharDiffOp {
                old_start: old_index,
                old_len: 0,
                new_start: new_index,
                new_len,
            }),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => Some(CharDiffOp {
                old_start: old_index,
                old_len,
                new_start: new_index,
                new_len,
            }),
        })
        .collect()
}
