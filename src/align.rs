//! Positional line pairing and per-pair character classification.
//!
//! Pairing is strictly positional: `removed[i]` against the live line
//! at `anchor + i`, truncated to the shorter side. There is no LCS
//! re-matching across lines inside a group; interleaved edits can
//! misalign pairs, which is an accepted precision limit of this scheme.
//! The diff's added lines are only a structural cue for where changes
//! are — the values compared and rendered come fresh from the live
//! document, which may have moved on since the diff was computed.

use crate::diff::char_diff_ops;
use crate::groups::AnchoredGroup;
use crate::models::CharDiffOp;

/// Classification of one removed/live line pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairClass {
    /// No character is stable between the two lines; character
    /// emphasis would cover the whole line, so neither side gets any.
    FullyReplaced,
    /// Some characters are stable; the ops name exactly the changed
    /// character ranges on each side.
    Modified { ops: Vec<CharDiffOp> },
}

/// Pairing and classification result for one change group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAlignment {
    pub anchor_line: usize,
    /// Removed lines from the diff, old-side values to annotate.
    pub removed: Vec<String>,
    /// Live new-document lines the group's added content occupies.
    pub live: Vec<String>,
    /// One entry per paired index; length is
    /// `min(removed.len(), live.len())`. Indices beyond it on the
    /// longer side are unpaired and render as pure coarse highlight.
    pub pairs: Vec<PairClass>,
}

/// Pair a group's removed lines against the given live lines and run
/// the character diff for each pair.
pub fn align_group(anchored: &AnchoredGroup, live: Vec<String>) -> GroupAlignment {
    let paired = anchored.group.removed_lines.len().min(live.len());
    let mut pairs = Vec::with_capacity(paired);
    for i in 0..paired {
        pairs.push(classify_pair(&anchored.group.removed_lines[i], &live[i]));
    }
    GroupAlignment {
        anchor_line: anchored.anchor_line,
        removed: anchored.group.removed_lines.clone(),
        live,
        pairs,
    }
}

/// Run the character diff for one pair and classify it.
///
/// An empty line on either side skips the diff entirely: the non-empty
/// side is a full replacement.
pub fn classify_pair(old: &str, new: &str) -> PairClass {
    if old.is_empty() || new.is_empty() {
        return PairClass::FullyReplaced;
    }

    let ops = char_diff_ops(old, new);
    let changed_old: usize = ops.iter().map(|op| op.old_len).sum();
    let changed_new: usize = ops.iter().map(|op| op.new_len).sum();

    if changed_old == old.chars().count() || changed_new == new.chars().count() {
        PairClass::FullyReplaced
    } else {
        PairClass::Modified { ops }
    }
}
