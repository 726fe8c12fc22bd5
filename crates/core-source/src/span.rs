//! Span normalization and classification.
//!
//! User spans arrive zero-based and half-open, in bytes or chars
//! depending on configuration. Normalization converts them to canonical
//! char coordinates against one source and decides how they render:
//!
//! - `end` clamps to the source length (the span is marked clipped).
//! - `end < start` collapses to an empty span at `start`.
//! - `start` past the source length drops the span entirely; `start`
//!   exactly at the length survives as an end-of-buffer caret.
//! - A span is inline when it starts and ends on one line, multi-line
//!   otherwise. The end line is the line of the last covered char, not
//!   of the half-open bound.

use crate::Source;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Interpretation of user span coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    /// Positions count bytes; mid-scalar positions round down.
    Byte,
    /// Positions count scalar values (invalid bytes count one each).
    #[default]
    Char,
}

/// A user span: zero-based, half-open, units per [`IndexType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

/// A span in canonical char coordinates, clamped into its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// First covered char.
    pub start: usize,
    /// Half-open end; equals `start` for an empty (caret) span.
    pub end: usize,
    pub start_line: usize,
    pub end_line: usize,
    /// The user's end pointed past the source and was clamped.
    pub clipped: bool,
}

impl Resolved {
    pub fn is_inline(&self) -> bool {
        self.start_line == self.end_line
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Chars covered; an empty span still occupies one caret cell, which
    /// is layout's concern, not this count.
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Normalize a user span against a source. `None` means the span starts
/// past the end of the buffer and is dropped (still counted for label
/// identity by the caller).
pub fn resolve(source: &Source, span: Span, index: IndexType) -> Option<Resolved> {
    let (start, mut end, len) = match index {
        IndexType::Char => (span.start, span.end, source.len_chars()),
        IndexType::Byte => {
            if span.start > source.len_bytes() {
                debug!(
                    start = span.start,
                    len = source.len_bytes(),
                    source = source.name(),
                    "span starts past end of buffer, dropped"
                );
                return None;
            }
            (
                source.byte_to_char(span.start),
                source.byte_to_char(span.end.max(span.start)),
                source.len_chars(),
            )
        }
    };
    if start > len {
        debug!(
            start,
            len,
            source = source.name(),
            "span starts past end of buffer, dropped"
        );
        return None;
    }
    let clipped = end > len;
    if clipped {
        debug!(
            end,
            len,
            source = source.name(),
            "span end past end of buffer, clamped"
        );
        end = len;
    }
    if end < start {
        end = start;
    }
    let start_line = source.line_of_char(start);
    let end_line = if end > start {
        source.line_of_char(end - 1)
    } else {
        start_line
    };
    Some(Resolved {
        start,
        end,
        start_line,
        end_line,
        clipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> Source {
        Source::new("apple\n==\norange")
    }

    #[test]
    fn inline_span_resolves_in_place() {
        let r = resolve(&src(), (0..5).into(), IndexType::Char).unwrap();
        assert_eq!((r.start, r.end), (0, 5));
        assert_eq!((r.start_line, r.end_line), (0, 0));
        assert!(r.is_inline());
        assert!(!r.clipped);
    }

    #[test]
    fn multiline_span_classified_by_last_covered_char() {
        let s = src();
        let r = resolve(&s, (0..s.len_chars()).into(), IndexType::Char).unwrap();
        assert_eq!((r.start_line, r.end_line), (0, 2));
        assert!(!r.is_inline());
        // A span whose half-open end is the first char of the next line
        // still ends on the previous line.
        let r = resolve(&s, (0..6).into(), IndexType::Char).unwrap();
        assert_eq!(r.end_line, 0); // char 5 is line 0's terminator
    }

    #[test]
    fn inverted_span_collapses_to_caret() {
        let r = resolve(&src(), Span { start: 4, end: 1 }, IndexType::Char).unwrap();
        assert_eq!((r.start, r.end), (4, 4));
        assert!(r.is_empty());
    }

    #[test]
    fn end_clamps_and_marks_clipped() {
        let s = src();
        let r = resolve(&s, (9..999).into(), IndexType::Char).unwrap();
        assert_eq!(r.end, s.len_chars());
        assert!(r.clipped);
    }

    #[test]
    fn start_past_end_drops() {
        let s = src();
        assert!(resolve(&s, (99..100).into(), IndexType::Char).is_none());
        assert!(resolve(&s, (99..100).into(), IndexType::Byte).is_none());
    }

    #[test]
    fn start_at_end_survives_as_caret() {
        let s = src();
        let r = resolve(&s, (s.len_chars()..s.len_chars()).into(), IndexType::Char).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.start_line, 2);
    }

    #[test]
    fn byte_mode_converts_and_rounds() {
        let s = Source::new("a漢b");
        // Byte 2 is inside 漢: rounds down to char 1.
        let r = resolve(&s, (2..4).into(), IndexType::Byte).unwrap();
        assert_eq!((r.start, r.end), (1, 2));
    }

    #[test]
    fn byte_mode_inverted_span_is_caret_at_start() {
        let s = Source::new("abcdef");
        let r = resolve(&s, Span { start: 3, end: 1 }, IndexType::Byte).unwrap();
        assert_eq!((r.start, r.end), (3, 3));
    }

    #[test]
    fn empty_source_accepts_caret_at_origin() {
        let s = Source::new("");
        let r = resolve(&s, (0..0).into(), IndexType::Char).unwrap();
        assert_eq!((r.start, r.end), (0, 0));
        assert_eq!(r.start_line, 0);
        let r = resolve(&s, (0..1).into(), IndexType::Char).unwrap();
        assert!(r.clipped);
        assert!(r.is_empty());
    }
}
