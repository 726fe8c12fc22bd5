//! Column windowing for long lines.
//!
//! When a line's tab-expanded width exceeds the text-area budget, the
//! visible slice is chosen so the labels stay on screen: either a
//! truncation from column zero (labels already fit) or a window centered
//! on the leftmost label's attach column. Slices land on segment
//! boundaries — a cluster is never split. Labels too far apart for one
//! window split the line into several windows, each drawn with its own
//! underline and arrow rows.

use crate::linemap::LineMap;
use crate::plan::Entry;
use std::ops::Range;
use tracing::trace;

/// Cells an ellipsis occupies on either sliced side.
pub const ELLIPSIS_COLS: usize = 3;

/// One visible slice of a line and the entries drawn with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Visible display columns, segment-aligned.
    pub cols: Range<usize>,
    /// An ellipsis precedes the slice.
    pub left: bool,
    /// An ellipsis follows the slice.
    pub right: bool,
    /// Indices into the line's entry list.
    pub entries: Vec<usize>,
}

impl Window {
    /// Map an unwindowed column into the output row.
    pub fn project(&self, col: usize) -> usize {
        col - self.cols.start + if self.left { ELLIPSIS_COLS } else { 0 }
    }
}

fn needed_end(e: &Entry) -> usize {
    e.end_col.max(e.attach_col + 1)
}

/// Plan the windows for one line given the text-area budget `avail`.
/// `None` means the line fits and windowing must not change anything.
pub fn plan_windows(map: &LineMap, entries: &[Entry], avail: usize) -> Option<Vec<Window>> {
    let width = map.width();
    if width <= avail {
        return None;
    }
    // Below this there is no room for an ellipsis on each side plus one
    // visible column; clamp rather than emit nothing.
    let avail = avail.max(2 * ELLIPSIS_COLS + 1);

    let max_needed = entries.iter().map(needed_end).max().unwrap_or(0);
    if max_needed <= avail - ELLIPSIS_COLS {
        let cut = map.snap_down(avail - ELLIPSIS_COLS);
        if cut >= max_needed {
            return Some(vec![Window {
                cols: 0..cut,
                left: false,
                right: true,
                entries: (0..entries.len()).collect(),
            }]);
        }
    }

    // Cluster entries that share a window, left to right.
    let cap = avail - 2 * ELLIPSIS_COLS;
    let mut by_col: Vec<usize> = (0..entries.len()).collect();
    by_col.sort_by_key(|&i| entries[i].start_col.min(entries[i].attach_col));
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut anchor = 0usize;
    for &i in &by_col {
        let e = &entries[i];
        let start = e.start_col.min(e.attach_col);
        match clusters.last_mut() {
            Some(c) if needed_end(e).saturating_sub(anchor) <= cap => c.push(i),
            _ => {
                anchor = start;
                clusters.push(vec![i]);
            }
        }
    }
    if clusters.len() > 1 {
        trace!(
            clusters = clusters.len(),
            "line labels exceed one window, splitting"
        );
    }

    let windows = clusters
        .into_iter()
        .map(|cluster| {
            let attach = entries[cluster[0]].attach_col;
            let mut ws = attach.saturating_sub(cap / 2);
            if ws <= ELLIPSIS_COLS {
                // The ellipsis would hide fewer cells than it costs.
                ws = 0;
            }
            let left = ws > 0;
            let visible = avail - if left { ELLIPSIS_COLS } else { 0 } - ELLIPSIS_COLS;
            let mut we = ws + visible;
            if width - we.min(width) <= ELLIPSIS_COLS {
                // Showing the tail is cheaper than its ellipsis.
                we = width;
                let visible = avail - if left { ELLIPSIS_COLS } else { 0 };
                ws = we.saturating_sub(visible);
                if ws <= ELLIPSIS_COLS && avail - ELLIPSIS_COLS >= we {
                    ws = 0;
                }
            }
            let ws = map.snap_up(ws);
            let we = map.snap_down(we).max(ws + 1).min(width);
            Window {
                cols: ws..we,
                left: ws > 0,
                right: we < width,
                entries: cluster,
            }
        })
        .collect();
    Some(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::AmbiWidth;

    fn map(s: &str) -> LineMap {
        LineMap::build(s.as_bytes(), AmbiWidth::Narrow, 4)
    }

    fn entry(start: usize, end: usize, attach: usize) -> Entry {
        // Entries built by hand only need their geometry for windowing.
        let mut e = crate::plan::test_entry(start, end, attach);
        e.caret = start + 1 == end && start == attach;
        e
    }

    #[test]
    fn fitting_line_is_untouched() {
        let m = map("abcdef");
        let e = [entry(0, 3, 1)];
        assert!(plan_windows(&m, &e, 20).is_none());
    }

    #[test]
    fn leading_labels_truncate_from_zero() {
        let m = map("abcdefghijklmnopqrstuvwxyz");
        let e = [entry(0, 3, 1)];
        let w = plan_windows(&m, &e, 10).unwrap();
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].cols, 0..7);
        assert!(!w[0].left);
        assert!(w[0].right);
    }

    #[test]
    fn tail_label_centers_and_keeps_the_end() {
        let m = map("abcdefghijklmnopqrstuvwxyz");
        let e = [entry(23, 26, 24)];
        let w = plan_windows(&m, &e, 10).unwrap();
        assert_eq!(w[0].cols, 19..26);
        assert!(w[0].left);
        assert!(!w[0].right);
        // Projection accounts for the leading ellipsis.
        assert_eq!(w[0].project(24), ELLIPSIS_COLS + 5);
    }

    #[test]
    fn middle_label_gets_both_ellipses() {
        let m = map(&"x".repeat(100));
        let e = [entry(50, 52, 50)];
        let w = plan_windows(&m, &e, 20).unwrap();
        assert!(w[0].left && w[0].right);
        assert!(w[0].cols.contains(&50) && w[0].cols.contains(&51));
        assert_eq!(w[0].cols.len(), 20 - 2 * ELLIPSIS_COLS);
    }

    #[test]
    fn near_zero_window_drops_the_left_ellipsis() {
        let m = map(&"x".repeat(100));
        let e = [entry(4, 6, 4)];
        let w = plan_windows(&m, &e, 20).unwrap();
        assert_eq!(w[0].cols.start, 0);
        assert!(!w[0].left);
        assert!(w[0].right);
    }

    #[test]
    fn distant_labels_split_into_windows() {
        let m = map(&"x".repeat(200));
        let e = [entry(10, 13, 11), entry(150, 153, 151)];
        let w = plan_windows(&m, &e, 20).unwrap();
        assert_eq!(w.len(), 2);
        assert_eq!(w[0].entries, vec![0]);
        assert_eq!(w[1].entries, vec![1]);
        assert!(w[0].cols.contains(&11));
        assert!(w[1].cols.contains(&151));
    }

    #[test]
    fn windows_never_split_clusters() {
        let line = format!("{}👨\u{200D}👩\u{200D}👧\u{200D}👦{}", "a".repeat(20), "b".repeat(20));
        let m = map(&line);
        let e = [entry(30, 33, 31)];
        let w = plan_windows(&m, &e, 16).unwrap();
        // The family cluster occupies cells 20..22; a boundary may touch
        // its edges but never its interior.
        assert_ne!(w[0].cols.start, 21);
        assert_ne!(w[0].cols.end, 21);
    }
}
