//! Refresh controller: runs the diff-to-render pipeline and hands the
//! result to the display sink.
//!
//! The pipeline itself (`build_instructions`) is pure and synchronous;
//! everything stateful lives here: the per-document generation counter
//! that supersedes stale refreshes, and the `DiffCache` that
//! short-circuits re-rendering when the raw diff has not changed.

use std::collections::HashMap;

use crate::align::align_group;
use crate::diff::unified_line_diff;
use crate::groups::segment_groups;
use crate::hunks::parse_hunks;
use crate::models::RenderInstruction;
use crate::render::{RenderConfig, render_group};

/// Opaque handle identifying one open document.
pub type DocumentId = u64;

/// Monotonically increasing per-document refresh generation.
pub type Generation = u64;

/// Read access to the live (possibly unsaved) document buffer.
pub trait LiveDocument {
    /// The whole buffer as one string.
    fn full_text(&self) -> String;
    /// Lines `start..end`, 0-based, end-exclusive. May return fewer
    /// lines than asked for when the range runs past the end.
    fn read_lines(&self, start: usize, end: usize) -> Vec<String>;
}

/// Where render instructions go. The host clears and reapplies per
/// refresh, so instruction order is the visual order.
pub trait DisplaySink {
    /// Drop every instruction previously applied for the document.
    fn clear(&mut self, doc: DocumentId);
    /// Apply one refresh's instructions atomically.
    fn apply(
        &mut self,
        doc: DocumentId,
        generation: Generation,
        instructions: Vec<RenderInstruction>,
    );
}

/// Memo of the last rendered diff, replaced whole on every refresh and
/// never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffCache {
    pub owning_document: Option<DocumentId>,
    pub last_raw_diff: Option<String>,
}

/// Owns the mutable refresh state for all documents.
pub struct RefreshController {
    config: RenderConfig,
    generations: HashMap<DocumentId, Generation>,
    cache: DiffCache,
}

impl RefreshController {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            generations: HashMap::new(),
            cache: DiffCache::default(),
        }
    }

    /// Start a refresh: bumps and returns the document's generation.
    /// A host doing an asynchronous baseline fetch calls this before
    /// the fetch and passes the generation to [`complete`] after.
    ///
    /// [`complete`]: RefreshController::complete
    pub fn begin(&mut self, doc: DocumentId) -> Generation {
        let generation = self.generations.entry(doc).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Finish a refresh started with [`begin`]. A result whose
    /// generation is no longer current was superseded by a newer
    /// refresh and is discarded without touching the sink.
    ///
    /// [`begin`]: RefreshController::begin
    pub fn complete(
        &mut self,
        doc: DocumentId,
        generation: Generation,
        baseline: &str,
        document: &impl LiveDocument,
        sink: &mut impl DisplaySink,
    ) {
        if self.generations.get(&doc) != Some(&generation) {
            tracing::trace!(doc, generation, "stale refresh discarded");
            return;
        }

        let current = document.full_text();
        let raw = unified_line_diff(baseline, &current);

        if self.cache.owning_document == Some(doc)
            && self.cache.last_raw_diff.as_deref() == Some(raw.as_str())
        {
            tracing::trace!(doc, "diff unchanged, skipping re-render");
            return;
        }

        let instructions = build_instructions(&raw, document, &self.config);
        tracing::debug!(
            doc,
            generation,
            count = instructions.len(),
            "applying render instructions"
        );

        sink.clear(doc);
        if !instructions.is_empty() {
            sink.apply(doc, generation, instructions);
        }
        self.cache = DiffCache {
            owning_document: Some(doc),
            last_raw_diff: Some(raw),
        };
    }

    /// One-shot synchronous refresh with an already-fetched baseline.
    pub fn refresh(
        &mut self,
        doc: DocumentId,
        baseline: &str,
        document: &impl LiveDocument,
        sink: &mut impl DisplaySink,
    ) {
        let generation = self.begin(doc);
        self.complete(doc, generation, baseline, document, sink);
    }

    /// Forget cached state for a closed document or a changed diff
    /// source. The next refresh re-renders from scratch.
    pub fn invalidate(&mut self, doc: DocumentId) {
        self.generations.remove(&doc);
        if self.cache.owning_document == Some(doc) {
            self.cache = DiffCache::default();
        }
    }
}

/// The pure pipeline: unified-diff text plus live document in, ordered
/// render instructions out. Hunks are processed in emission order and
/// groups in hunk order, so instructions come out in ascending
/// anchor-line order.
pub fn build_instructions(
    raw_diff: &str,
    document: &impl LiveDocument,
    config: &RenderConfig,
) -> Vec<RenderInstruction> {
    let mut out = Vec::new();
    for hunk in parse_hunks(raw_diff) {
        for anchored in segment_groups(&hunk) {
            let live = document.read_lines(
                anchored.anchor_line,
                anchored.anchor_line + anchored.group.added_lines.len(),
            );
            let alignment = align_group(&anchored, live);
            out.extend(render_group(&alignment, config));
        }
    }
    out
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;
    use crate::models::{ChunkStyle, RenderInstruction};

    struct TextDocument {
        lines: Vec<String>,
    }

    impl TextDocument {
        fn new(text: &str) -> Self {
            Self {
                lines: text.lines().map(|l| l.to_string()).collect(),
            }
        }
    }

    impl LiveDocument for TextDocument {
        fn full_text(&self) -> String {
            let mut text = self.lines.join("\n");
            if !self.lines.is_empty() {
                text.push('\n');
            }
            text
        }

        fn read_lines(&self, start: usize, end: usize) -> Vec<String> {
            let start = start.min(self.lines.len());
            let end = end.min(self.lines.len());
            self.lines[start..end].to_vec()
        }
    }

    fn pipeline(baseline: &str, current: &str) -> Vec<RenderInstruction> {
        let document = TextDocument::new(current);
        let raw = unified_line_diff(baseline, &document.full_text());
        build_instructions(&raw, &document, &RenderConfig::default())
    }

    fn highlight_styles(out: &[RenderInstruction]) -> Vec<ChunkStyle> {
        out.iter()
            .filter_map(|i| match i {
                RenderInstruction::NewHighlight(r) => Some(r.style),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_identical_texts_produce_no_instructions() {
        assert!(pipeline("a\nb\nc\n", "a\nb\nc\n").is_empty());
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let first = pipeline("a\nb\nc\n", "a\nB\nc\nd\n");
        let second = pipeline("a\nb\nc\n", "a\nB\nc\nd\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_line_replacement() {
        // baseline a/b/c, current a/B/c: one group at line 1.
        let out = pipeline("a\nb\nc\n", "a\nB\nc\n");
        assert_eq!(out.len(), 2);
        match &out[0] {
            RenderInstruction::OldAnnotation(batch) => {
                assert_eq!(batch.anchor_line, 1);
                assert_eq!(batch.lines.len(), 1);
                // b -> B is a full replacement: one coarse chunk.
                assert_eq!(batch.lines[0].len(), 1);
            }
            other => panic!("expected annotation, got {other:?}"),
        }
        match &out[1] {
            RenderInstruction::NewHighlight(range) => {
                assert_eq!(range.line, 1);
                assert_eq!(range.byte_offset, 0);
                assert_eq!(range.byte_length, 1);
                assert_eq!(range.style, ChunkStyle::Context);
            }
            other => panic!("expected highlight, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_baseline_everything_added() {
        let out = pipeline("", "x\ny\n");
        assert!(
            !out.iter()
                .any(|i| matches!(i, RenderInstruction::OldAnnotation(_))),
            "no removed lines, no annotations"
        );
        assert_eq!(highlight_styles(&out), vec![ChunkStyle::Context; 2]);
    }

    #[test]
    fn test_unpaired_added_line_is_coarse_only() {
        let out = pipeline("line one\n", "line one\nline two\n");
        assert!(
            !out.iter()
                .any(|i| matches!(i, RenderInstruction::OldAnnotation(_)))
        );
        assert_eq!(highlight_styles(&out), vec![ChunkStyle::Context]);
        match &out[0] {
            RenderInstruction::NewHighlight(range) => {
                assert_eq!(range.line, 1);
                assert_eq!(range.byte_length, "line two".len());
            }
            other => panic!("expected highlight, got {other:?}"),
        }
    }

    #[test]
    fn test_multibyte_emphasis_byte_ranges() {
        // café -> cafe, paired with surrounding context so the line is
        // partially modified rather than fully replaced.
        let out = pipeline("keep\ncafé x\nkeep\n", "keep\ncafe x\nkeep\n");
        let emphasis: Vec<_> = out
            .iter()
            .filter_map(|i| match i {
                RenderInstruction::NewHighlight(r) if r.style == ChunkStyle::Emphasis => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(emphasis.len(), 1);
        // Replacement e sits at character 3 = byte 3 of "cafe x".
        assert_eq!(emphasis[0].byte_offset, 3);
        assert_eq!(emphasis[0].byte_length, 1);

        // And on the old annotation, é occupies one emphasized chunk.
        let batch = out
            .iter()
            .find_map(|i| match i {
                RenderInstruction::OldAnnotation(b) => Some(b),
                _ => None,
            })
            .unwrap();
        let emphasized: Vec<_> = batch.lines[0]
            .iter()
            .filter(|c| c.style == ChunkStyle::Emphasis)
            .collect();
        assert_eq!(emphasized.len(), 1);
        assert_eq!(emphasized[0].text, "é");
    }

    #[test]
    fn test_instructions_in_ascending_anchor_order() {
        let old: String = (0..30).map(|i| format!("line{}\n", i)).collect();
        let new = old.replace("line2\n", "LINE2\n").replace("line27\n", "LINE27\n");
        let out = pipeline(&old, &new);

        let mut last_line = 0;
        for instr in &out {
            let line = match instr {
                RenderInstruction::OldAnnotation(b) => b.anchor_line,
                RenderInstruction::NewHighlight(r) => r.line,
            };
            assert!(line >= last_line, "instructions must not go backwards");
            last_line = line;
        }
    }

    #[test]
    fn test_deleted_dash_comment_keeps_rest_of_changes_rendered() {
        // "-- setup" deletes as "--- setup"; if that were taken for a
        // file header the whole hunk would render nothing.
        let out = pipeline("-- setup\nkeep\nold\n", "keep\nnew\n");
        let batches: Vec<_> = out
            .iter()
            .filter_map(|i| match i {
                RenderInstruction::OldAnnotation(b) => Some(b),
                _ => None,
            })
            .collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].anchor_line, 0);
        assert!(batches[0].lines[0][0].text.starts_with("-- setup"));
        assert_eq!(batches[1].anchor_line, 1);
        // old -> new is a full replacement: coarse highlight only.
        assert_eq!(highlight_styles(&out), vec![ChunkStyle::Context]);
    }

    #[test]
    fn test_deletion_renders_annotation_at_following_line() {
        let out = pipeline("a\nb\nc\n", "a\nc\n");
        let batch = out
            .iter()
            .find_map(|i| match i {
                RenderInstruction::OldAnnotation(b) => Some(b),
                _ => None,
            })
            .unwrap();
        assert_eq!(batch.anchor_line, 1);
        assert!(batch.lines[0][0].text.starts_with('b'));
        assert!(highlight_styles(&out).is_empty());
    }
}
