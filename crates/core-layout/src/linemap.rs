//! Char-to-cell mapping for one source line.
//!
//! Built once per rendered line from the segment iterator and then
//! queried by everything that needs column arithmetic: underline
//! placement, attach columns, windowing. Positions at or past the end
//! of the line text map to the one-past-text caret column.

use core_text::{AmbiWidth, segments};
use std::ops::Range;

/// One segment with its char and cell extents within the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedSegment {
    pub bytes: Range<usize>,
    pub chars: Range<usize>,
    pub cols: Range<usize>,
}

/// The full map of a line. Columns are tab-expanded display cells.
#[derive(Debug, Clone)]
pub struct LineMap {
    segs: Vec<MappedSegment>,
    char_len: usize,
    width: usize,
}

impl LineMap {
    pub fn build(line: &[u8], ambi: AmbiWidth, tab_width: usize) -> Self {
        let mut segs = Vec::new();
        let mut chars = 0usize;
        let mut cols = 0usize;
        for s in segments(line, ambi, tab_width) {
            segs.push(MappedSegment {
                bytes: s.bytes.clone(),
                chars: chars..chars + s.chars,
                cols: cols..cols + s.width,
            });
            chars += s.chars;
            cols += s.width;
        }
        Self {
            segs,
            char_len: chars,
            width: cols,
        }
    }

    pub fn segments(&self) -> &[MappedSegment] {
        &self.segs
    }

    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Total display width of the line.
    pub fn width(&self) -> usize {
        self.width
    }

    fn seg_of_char(&self, ch: usize) -> Option<&MappedSegment> {
        if ch >= self.char_len {
            return None;
        }
        let i = self
            .segs
            .partition_point(|s| s.chars.start <= ch)
            .saturating_sub(1);
        self.segs.get(i)
    }

    /// Cell where the segment containing `ch` starts; past the text this
    /// is the caret column one past the last cell.
    pub fn col_of_char(&self, ch: usize) -> usize {
        match self.seg_of_char(ch) {
            Some(s) => s.cols.start,
            None => self.width,
        }
    }

    /// Cell just past the segment containing `ch`.
    pub fn col_past_char(&self, ch: usize) -> usize {
        match self.seg_of_char(ch) {
            Some(s) => s.cols.end,
            None => self.width,
        }
    }

    /// Largest segment boundary at or below `col`.
    pub fn snap_down(&self, col: usize) -> usize {
        if col >= self.width {
            return self.width;
        }
        let i = self.segs.partition_point(|s| s.cols.start <= col);
        self.segs[i.saturating_sub(1)].cols.start
    }

    /// Smallest segment boundary at or above `col`.
    pub fn snap_up(&self, col: usize) -> usize {
        if col == 0 {
            return 0;
        }
        for s in &self.segs {
            if s.cols.start >= col {
                return s.cols.start;
            }
        }
        self.width
    }
}

/// Longest suffix of `text` no wider than `max_cols`, cut on segment
/// boundaries. Returns the suffix and whether anything was cut.
pub fn tail_fitting(text: &str, max_cols: usize, ambi: AmbiWidth) -> (&str, bool) {
    let map = LineMap::build(text.as_bytes(), ambi, 1);
    if map.width() <= max_cols {
        return (text, false);
    }
    let cut_col = map.snap_up(map.width() - max_cols);
    let byte = map
        .segments()
        .iter()
        .find(|s| s.cols.start == cut_col)
        .map(|s| s.bytes.start)
        .unwrap_or(text.len());
    (&text[byte..], true)
}
