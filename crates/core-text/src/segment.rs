//! Segment iterator: the unit a diagnostic treats as one cell column.
//!
//! Contract:
//! - Input: a raw byte slice holding one source line (no terminator) plus
//!   the ambiguous-width policy and the tab stop width.
//! - Output: segments in order, non-overlapping, covering the whole slice
//!   when their byte ranges are concatenated.
//! - A segment is one extended grapheme cluster: combining marks ride
//!   their base, ZWJ sequences are one cluster, regional-indicator pairs
//!   form one flag, variation selectors and emoji modifiers attach to
//!   their base.
//! - A tab is its own segment whose width is the distance to the next
//!   tab stop at the column it starts on.
//! - Each byte that is not valid UTF-8 is its own segment of width 1 and
//!   counts as one character; it is printed as the raw byte.

use crate::width::{AmbiWidth, cluster_width};
use std::ops::Range;
use std::str::Utf8Chunks;
use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

/// One cell-column unit of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Byte range within the line slice.
    pub bytes: Range<usize>,
    /// Scalar values this segment advances the char cursor by.
    pub chars: usize,
    /// Display cells, tab already expanded against its start column.
    pub width: usize,
}

/// Iterator over the segments of one line. See the module contract.
pub struct Segments<'a> {
    ambi: AmbiWidth,
    tab_width: usize,
    col: usize,
    chunks: Utf8Chunks<'a>,
    valid: Option<GraphemeIndices<'a>>,
    valid_base: usize,
    invalid: &'a [u8],
    invalid_next: usize,
    invalid_base: usize,
    cursor: usize,
}

/// Walk the segments of `line`. `tab_width` must be at least 1.
pub fn segments(line: &[u8], ambi: AmbiWidth, tab_width: usize) -> Segments<'_> {
    debug_assert!(tab_width >= 1, "tab width must be positive");
    Segments {
        ambi,
        tab_width: tab_width.max(1),
        col: 0,
        chunks: line.utf8_chunks(),
        valid: None,
        valid_base: 0,
        invalid: &[],
        invalid_next: 0,
        invalid_base: 0,
        cursor: 0,
    }
}

/// Total display width of a line under the given policy.
pub fn line_width(line: &[u8], ambi: AmbiWidth, tab_width: usize) -> usize {
    segments(line, ambi, tab_width).map(|s| s.width).sum()
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        loop {
            if let Some(gi) = &mut self.valid {
                if let Some((idx, g)) = gi.next() {
                    let start = self.valid_base + idx;
                    let width = if g == "\t" {
                        self.tab_width - self.col % self.tab_width
                    } else {
                        cluster_width(g, self.ambi)
                    };
                    self.col += width;
                    return Some(Segment {
                        bytes: start..start + g.len(),
                        chars: g.chars().count(),
                        width,
                    });
                }
                self.valid = None;
            }
            if self.invalid_next < self.invalid.len() {
                let start = self.invalid_base + self.invalid_next;
                self.invalid_next += 1;
                self.col += 1;
                return Some(Segment {
                    bytes: start..start + 1,
                    chars: 1,
                    width: 1,
                });
            }
            let chunk = self.chunks.next()?;
            let valid = chunk.valid();
            let invalid = chunk.invalid();
            self.valid_base = self.cursor;
            self.invalid_base = self.cursor + valid.len();
            self.cursor += valid.len() + invalid.len();
            self.valid = Some(valid.grapheme_indices(true));
            self.invalid = invalid;
            self.invalid_next = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &[u8]) -> Vec<Segment> {
        segments(line, AmbiWidth::Narrow, 4).collect()
    }

    #[test]
    fn ascii_one_segment_per_byte() {
        let segs = collect(b"abc");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1].bytes, 1..2);
        assert!(segs.iter().all(|s| s.chars == 1 && s.width == 1));
    }

    #[test]
    fn segments_cover_line_contiguously() {
        let line = "a漢e\u{0301}🇺🇸👨\u{200D}👩\u{200D}👧\u{200D}👦z".as_bytes();
        let segs = collect(line);
        let mut end = 0usize;
        for s in &segs {
            assert_eq!(s.bytes.start, end);
            end = s.bytes.end;
        }
        assert_eq!(end, line.len());
    }

    #[test]
    fn combining_mark_rides_its_base() {
        let segs = collect("e\u{0301}z".as_bytes());
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].chars, 2);
        assert_eq!(segs[0].width, 1);
    }

    #[test]
    fn zwj_family_is_one_segment() {
        let segs = collect("👨\u{200D}👩\u{200D}👧\u{200D}👦".as_bytes());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].chars, 7);
        assert_eq!(segs[0].width, 2);
    }

    #[test]
    fn flag_pair_is_one_segment() {
        let segs = collect("🇺🇸x".as_bytes());
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].chars, 2);
        assert_eq!(segs[0].width, 2);
    }

    #[test]
    fn tab_expands_to_next_stop() {
        // Columns: 'a' at 0, tab from 1 to 4, 'b' at 4, tab from 5 to 8.
        let segs = collect(b"a\tb\t");
        assert_eq!(segs[1].width, 3);
        assert_eq!(segs[3].width, 3);
        // A tab at a stop boundary takes the full stop.
        let segs = collect(b"\tx");
        assert_eq!(segs[0].width, 4);
    }

    #[test]
    fn invalid_bytes_are_single_width_segments() {
        let segs = collect(b"a\xFF\xFEb");
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[1].bytes, 1..2);
        assert_eq!(segs[1].width, 1);
        assert_eq!(segs[1].chars, 1);
        assert_eq!(segs[3].bytes, 3..4);
    }

    #[test]
    fn truncated_scalar_at_end_is_invalid() {
        // First two bytes of a three-byte scalar.
        let segs = collect(b"ab\xE2\x82");
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[2].width, 1);
        assert_eq!(segs[3].width, 1);
    }

    #[test]
    fn wide_policy_widens_ambiguous() {
        let narrow: usize = segments("±x".as_bytes(), AmbiWidth::Narrow, 4)
            .map(|s| s.width)
            .sum();
        let wide: usize = segments("±x".as_bytes(), AmbiWidth::Wide, 4)
            .map(|s| s.width)
            .sum();
        assert_eq!(narrow, 2);
        assert_eq!(wide, 3);
    }

    #[test]
    fn line_width_sums_segments() {
        assert_eq!(line_width(b"a\tb", AmbiWidth::Narrow, 4), 5);
        assert_eq!(line_width("漢字".as_bytes(), AmbiWidth::Narrow, 4), 4);
        assert_eq!(line_width(b"", AmbiWidth::Narrow, 4), 0);
    }
}
