//! Parsing unified-diff text into structured hunks.
//!
//! Parsing is tolerant by design: malformed hunk headers and
//! engine-specific metadata lines are skipped, never fatal. An empty
//! input yields an empty hunk list, meaning "no differences".

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Hunk, LineRecord, LineTag};

/// Matches `@@ -old[,count] +new[,count] @@` and captures the new-side
/// starting line number.
static HUNK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@ .*\+(\d+)(?:,\d+)? @@").expect("hunk header pattern"));

/// Parse unified-diff text into hunks.
///
/// A hunk opens at each header line whose new-start number parses;
/// headers that do not match the numeric pattern are ignored and the
/// scan continues. Within an open hunk, lines prefixed with one of
/// `' '`, `'+'`, `'-'` are always records: a deleted `"-- comment"`
/// line serializes as `"--- comment"` and must not be mistaken for a
/// `---` file header. `diff`/`index` separator lines cannot collide
/// with record prefixes and close the hunk; any other leading
/// character is engine metadata and is skipped. Lines outside an open
/// hunk (including file headers, which always precede the next `@@`)
/// are ignored.
pub fn parse_hunks(diff_text: &str) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut current: Option<Hunk> = None;

    for line in diff_text.lines() {
        if line.starts_with("@@") {
            if let Some(done) = current.take() {
                hunks.push(done);
            }
            if let Some(caps) = HUNK_HEADER.captures(line) {
                if let Ok(start) = caps[1].parse::<usize>() {
                    current = Some(Hunk {
                        // An all-deleted new side reports +0,0; the
                        // invariant is new_start_line >= 1.
                        new_start_line: start.max(1),
                        records: Vec::new(),
                    });
                }
            }
            continue;
        }

        if current.is_none() {
            continue;
        }

        let mut chars = line.chars();
        let tag = match chars.next() {
            Some(' ') => LineTag::Unchanged,
            Some('+') => LineTag::Added,
            Some('-') => LineTag::Deleted,
            _ => {
                if line.starts_with("diff ") || line.starts_with("index ") {
                    if let Some(done) = current.take() {
                        hunks.push(done);
                    }
                }
                // e.g. "\ No newline at end of file"
                continue;
            }
        };
        if let Some(hunk) = current.as_mut() {
            hunk.records.push(LineRecord {
                tag,
                text: chars.as_str().to_string(),
            });
        }
    }

    if let Some(done) = current.take() {
        hunks.push(done);
    }

    hunks
}
