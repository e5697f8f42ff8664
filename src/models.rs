//! Value types shared across the diff-to-render pipeline.

/// Classification of one line inside a parsed hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    Unchanged,
    Deleted,
    Added,
}

/// One line of unified-diff output with its prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub tag: LineTag,
    pub text: String,
}

/// One `@@ ... @@` block of a unified diff.
///
/// `new_start_line` is the 1-based starting line in the new document.
/// Records never include hunk or file header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub new_start_line: usize,
    pub records: Vec<LineRecord>,
}

/// A maximal run of contiguous removed/added lines inside a hunk,
/// bounded by unchanged lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeGroup {
    pub removed_lines: Vec<String>,
    pub added_lines: Vec<String>,
}

impl ChangeGroup {
    /// A group empty on both sides is discarded, never emitted.
    pub fn is_empty(&self) -> bool {
        self.removed_lines.is_empty() && self.added_lines.is_empty()
    }
}

/// One LCS edit operation in character-ordinal space (not byte space).
/// `old_len`/`new_len` may be zero for pure insertions/deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharDiffOp {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
}

/// Byte extent of a character range within its owning string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    pub byte_offset: usize,
    pub byte_length: usize,
}

/// Coarse context background versus bright per-character emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStyle {
    Context,
    Emphasis,
}

/// Which side of the diff a styled chunk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

/// A maximal run of consecutive characters sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledChunk {
    pub text: String,
    pub style: ChunkStyle,
    pub side: Side,
}

/// Old-side virtual annotation lines for one change group, displayed
/// above `anchor_line` (0-based index into the new document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OldAnnotationBatch {
    pub anchor_line: usize,
    pub lines: Vec<Vec<StyledChunk>>,
}

/// Inline highlight overlaid on one live line of the new document.
///
/// Emphasis ranges are emitted after the coarse full-line range they
/// overlap and must render above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHighlightRange {
    pub line: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    pub style: ChunkStyle,
}

/// One instruction for the display sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    OldAnnotation(OldAnnotationBatch),
    NewHighlight(NewHighlightRange),
}
