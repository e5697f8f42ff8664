//! Character-ordinal to byte-offset mapping for UTF-8 text.
//!
//! Diffing operates on character units while the host addresses text by
//! byte, so every highlight range crosses this boundary. A character
//! here is one Unicode scalar value: combining marks are *not*
//! coalesced with their base character, so a highlight boundary can
//! fall between a base letter and its accent.

use crate::models::ByteSpan;

/// Per-character byte spans for a valid UTF-8 string, in ascending
/// order. Spans are contiguous and their lengths sum to `s.len()`.
pub fn char_spans(s: &str) -> Vec<ByteSpan> {
    s.char_indices()
        .map(|(byte_offset, c)| ByteSpan {
            byte_offset,
            byte_length: c.len_utf8(),
        })
        .collect()
}

/// Byte extent covering `char_len` characters starting at character
/// ordinal `char_start`. Ranges past the end of the string clamp to the
/// string's end.
pub fn byte_span(s: &str, char_start: usize, char_len: usize) -> ByteSpan {
    let mut start = s.len();
    let mut end = s.len();
    for (ordinal, (byte_offset, _)) in s.char_indices().enumerate() {
        if ordinal == char_start {
            start = byte_offset;
        }
        if ordinal >= char_start + char_len {
            end = byte_offset;
            break;
        }
    }
    ByteSpan {
        byte_offset: start,
        byte_length: end.saturating_sub(start),
    }
}

/// Per-unit byte spans for a possibly malformed byte sequence.
///
/// Valid UTF-8 decodes to one unit per scalar value; each undecodable
/// byte counts as its own one-byte replacement unit. Never fails.
pub fn byte_unit_spans(bytes: &[u8]) -> Vec<ByteSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match std::str::from_utf8(&bytes[pos..]) {
            Ok(valid) => {
                push_char_spans(&mut spans, valid, pos);
                pos = bytes.len();
            }
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                if let Ok(valid) = std::str::from_utf8(&bytes[pos..pos + valid_up_to]) {
                    push_char_spans(&mut spans, valid, pos);
                }
                // error_len is None when the sequence is truncated at
                // the end of the input.
                let bad = err.error_len().unwrap_or(bytes.len() - pos - valid_up_to);
                for i in 0..bad {
                    spans.push(ByteSpan {
                        byte_offset: pos + valid_up_to + i,
                        byte_length: 1,
                    });
                }
                pos += valid_up_to + bad;
            }
        }
    }

    spans
}

fn push_char_spans(spans: &mut Vec<ByteSpan>, s: &str, base: usize) {
    for (byte_offset, c) in s.char_indices() {
        spans.push(ByteSpan {
            byte_offset: base + byte_offset,
            byte_length: c.len_utf8(),
        });
    }
}


#[cfg(test)]
mod byte_span_tests {
    use super::*;

    #[test]
    fn test_ascii_range() {
        assert_eq!(byte_span("hello", 1, 3), ByteSpan { byte_offset: 1, byte_length: 3 });
    }

    #[test]
    fn test_multibyte_range() {
        // Highlighting the é of "café" covers bytes 3..5.
        assert_eq!(byte_span("café", 3, 1), ByteSpan { byte_offset: 3, byte_length: 2 });
    }

    #[test]
    fn test_range_after_multibyte_char() {
        // "caféx": x is character 4 but byte 5.
        assert_eq!(byte_span("caféx", 4, 1), ByteSpan { byte_offset: 5, byte_length: 1 });
    }

    #[test]
    fn test_zero_length_range() {
        assert_eq!(byte_span("abc", 1, 0).byte_length, 0);
        assert_eq!(byte_span("abc", 1, 0).byte_offset, 1);
    }

    #[test]
    fn test_range_clamps_to_end() {
        assert_eq!(byte_span("abc", 1, 99), ByteSpan { byte_offset: 1, byte_length: 2 });
        assert_eq!(byte_span("abc", 99, 1), ByteSpan { byte_offset: 3, byte_length: 0 });
    }

    #[test]
    fn test_whole_string_range() {
        assert_eq!(byte_span("你好", 0, 2), ByteSpan { byte_offset: 0, byte_length: 6 });
    }
}
