//! Splitting hunks into anchored change groups.

use crate::models::{ChangeGroup, Hunk, LineTag};

/// A change group plus the 0-based new-document line index its added
/// content starts at (or, for a pure deletion, the line right after the
/// preceding unchanged context).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredGroup {
    pub anchor_line: usize,
    pub group: ChangeGroup,
}

/// Walk a hunk's records and emit maximal runs of contiguous
/// removed/added lines, each anchored in new-document coordinates.
///
/// The cursor starts at `new_start_line - 1` and advances by one for
/// every unchanged line plus the number of added lines of each flushed
/// group, so an anchor always names the first live line the group's
/// added content occupies.
pub fn segment_groups(hunk: &Hunk) -> Vec<AnchoredGroup> {
    let mut out = Vec::new();
    let mut cursor = hunk.new_start_line.saturating_sub(1);
    let mut removed: Vec<String> = Vec::new();
    let mut added: Vec<String> = Vec::new();

    for record in &hunk.records {
        match record.tag {
            LineTag::Unchanged => {
                let occupied = added.len();
                flush(&mut out, cursor, &mut removed, &mut added);
                cursor += occupied + 1;
            }
            LineTag::Deleted => removed.push(record.text.clone()),
            LineTag::Added => added.push(record.text.clone()),
        }
    }
    flush(&mut out, cursor, &mut removed, &mut added);

    out
}

fn flush(
    out: &mut Vec<AnchoredGroup>,
    anchor_line: usize,
    removed: &mut Vec<String>,
    added: &mut Vec<String>,
) {
    if removed.is_empty() && added.is_empty() {
        return;
    }
    out.push(AnchoredGroup {
        anchor_line,
        group: ChangeGroup {
            removed_lines: std::mem::take(removed),
            added_lines: std::mem::take(added),
        },
    });
}
