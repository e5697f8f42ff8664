//! ghostdiff - live inline diff between a document's git baseline and
//! its in-memory buffer.
//!
//! The core is a pure pipeline from `(baseline_text, current_text)` to
//! an ordered list of styled render instructions: removed lines become
//! virtual "ghost" annotation lines shown above the change, added and
//! modified lines get inline highlight ranges over the live text, with
//! per-character emphasis where only part of a line changed.
//!
//! Stages, in order:
//!
//! 1. [`diff`] - unified line diff and character-level ops (`similar`)
//! 2. [`hunks`] - unified-diff text into structured hunks
//! 3. [`groups`] - hunks into anchored change groups
//! 4. [`align`] - positional line pairing and per-pair classification
//! 5. [`text`] - character-ordinal to byte-offset mapping
//! 6. [`render`] - styled chunks and highlight ranges
//!
//! [`refresh::RefreshController`] drives the pipeline per document,
//! discarding stale refreshes and skipping re-renders when the diff is
//! unchanged. [`git::fetch_baseline`] reads the baseline from HEAD;
//! hosts with a different diff source can pass any baseline text.

pub mod align;
pub mod diff;
pub mod git;
pub mod groups;
pub mod hunks;
pub mod models;
pub mod refresh;
pub mod render;
pub mod text;

pub use models::{
    ByteSpan, ChangeGroup, CharDiffOp, ChunkStyle, Hunk, LineRecord, LineTag, NewHighlightRange,
    OldAnnotationBatch, RenderInstruction, Side, StyledChunk,
};
pub use refresh::{
    DiffCache, DisplaySink, DocumentId, Generation, LiveDocument, RefreshController,
    build_instructions,
};
pub use render::RenderConfig;
