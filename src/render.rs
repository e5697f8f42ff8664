//! Building styled render instructions from aligned change groups.
//!
//! The old side becomes virtual annotation lines made of run-length
//! encoded styled chunks; the new side becomes inline highlight ranges
//! in byte coordinates over the live text. The display layer receives
//! O(change runs) chunks per line, never O(characters).

use crate::align::{GroupAlignment, PairClass};
use crate::models::{
    CharDiffOp, ChunkStyle, NewHighlightRange, OldAnnotationBatch, RenderInstruction, Side,
    StyledChunk,
};
use crate::text::byte_span;

/// Annotation lines are padded to at least this many columns.
pub const MIN_PAD_WIDTH: usize = 40;
/// And never more than this many, regardless of display width.
pub const MAX_PAD_WIDTH: usize = 300;

/// Rendering knobs supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Current display width in columns; clamped into
    /// `MIN_PAD_WIDTH..=MAX_PAD_WIDTH` for annotation padding.
    pub display_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { display_width: 80 }
    }
}

impl RenderConfig {
    fn pad_width(&self) -> usize {
        self.display_width.clamp(MIN_PAD_WIDTH, MAX_PAD_WIDTH)
    }
}

/// Produce the render instructions for one aligned group: one old-side
/// annotation batch (if the group removed anything) followed by the
/// new-side highlight ranges, coarse before emphasis per line.
pub fn render_group(alignment: &GroupAlignment, config: &RenderConfig) -> Vec<RenderInstruction> {
    let mut out = Vec::new();
    let pad_width = config.pad_width();

    let mut annotation_lines = Vec::with_capacity(alignment.removed.len());
    for (i, old_line) in alignment.removed.iter().enumerate() {
        let chunks = match alignment.pairs.get(i) {
            Some(PairClass::Modified { ops }) => old_line_chunks(old_line, ops, pad_width),
            // Fully replaced or unpaired: one coarse chunk.
            _ => vec![whole_line_chunk(old_line, pad_width)],
        };
        annotation_lines.push(chunks);
    }
    if !annotation_lines.is_empty() {
        out.push(RenderInstruction::OldAnnotation(OldAnnotationBatch {
            anchor_line: alignment.anchor_line,
            lines: annotation_lines,
        }));
    }

    for (i, live_line) in alignment.live.iter().enumerate() {
        let line = alignment.anchor_line + i;
        // Baseline full-line context highlight, unconditional.
        out.push(RenderInstruction::NewHighlight(NewHighlightRange {
            line,
            byte_offset: 0,
            byte_length: live_line.len(),
            style: ChunkStyle::Context,
        }));
        if let Some(PairClass::Modified { ops }) = alignment.pairs.get(i) {
            for op in ops.iter().filter(|op| op.new_len > 0) {
                let span = byte_span(live_line, op.new_start, op.new_len);
                out.push(RenderInstruction::NewHighlight(NewHighlightRange {
                    line,
                    byte_offset: span.byte_offset,
                    byte_length: span.byte_length,
                    style: ChunkStyle::Emphasis,
                }));
            }
        }
    }

    out
}

/// Single coarse chunk covering the whole line plus trailing padding.
fn whole_line_chunk(old_line: &str, pad_width: usize) -> StyledChunk {
    let mut text = String::with_capacity(old_line.len() + pad_width);
    text.push_str(old_line);
    push_padding(&mut text, pad_width);
    StyledChunk {
        text,
        style: ChunkStyle::Context,
        side: Side::Old,
    }
}

/// Run-length encode a partially modified line into alternating coarse
/// and emphasized chunks, merging adjacent same-style characters.
fn old_line_chunks(old_line: &str, ops: &[CharDiffOp], pad_width: usize) -> Vec<StyledChunk> {
    let chars: Vec<char> = old_line.chars().collect();
    let mut changed = vec![false; chars.len()];
    for op in ops {
        let end = (op.old_start + op.old_len).min(chars.len());
        for flag in &mut changed[op.old_start.min(chars.len())..end] {
            *flag = true;
        }
    }

    let mut chunks: Vec<StyledChunk> = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        let style = if changed[i] {
            ChunkStyle::Emphasis
        } else {
            ChunkStyle::Context
        };
        match chunks.last_mut() {
            Some(last) if last.style == style => last.text.push(c),
            _ => chunks.push(StyledChunk {
                text: c.to_string(),
                style,
                side: Side::Old,
            }),
        }
    }

    // Padding carries the coarse style; merge it into a trailing
    // context chunk when one is already there.
    match chunks.last_mut() {
        Some(last) if last.style == ChunkStyle::Context => push_padding(&mut last.text, pad_width),
        _ => {
            let mut text = String::with_capacity(pad_width);
            push_padding(&mut text, pad_width);
            chunks.push(StyledChunk {
                text,
                style: ChunkStyle::Context,
                side: Side::Old,
            });
        }
    }

    chunks
}

fn push_padding(text: &mut String, pad_width: usize) {
    for _ in 0..pad_width {
        text.push(' ');
    }
}
