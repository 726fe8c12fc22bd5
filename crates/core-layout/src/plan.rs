//! Label placement planning.
//!
//! The planner turns a report's label list into per-source groups with
//! resolved spans, multi-line lane assignments and, per rendered line,
//! an ordered entry list the drawing engine can walk without further
//! decisions. All scratch data is flat vectors owned by one render call.
//!
//! Ordering rules (the geometry below a line depends on these):
//! - Natural order is `(order, start column, span length)`, all
//!   ascending; `column_order` drops the leading key. Either way, of two
//!   labels at the same column the shorter span gets its message row
//!   first, closest to the source line.
//! - Lanes go to the longest spans first (ties: earlier start line);
//!   lane 0 is outermost.

use crate::linemap::LineMap;
use core_report::{Config, LabelAttach, Report, SourceMap};
use core_source::{Resolved, SourceId, resolve};
use tracing::debug;

/// A label that survived normalization, tied to its report slot.
#[derive(Debug, Clone)]
pub struct Placed {
    /// Position in `Report::labels`.
    pub index: usize,
    pub span: Resolved,
    /// Char the message arrow attaches to (inline placement).
    pub attach: usize,
}

/// A gutter lane occupied by one multi-line label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    /// Position in `Group::labels`.
    pub label: usize,
    pub start_line: usize,
    pub end_line: usize,
}

/// All surviving labels of one source, with the group's line window.
#[derive(Debug, Clone)]
pub struct Group {
    pub source: SourceId,
    pub labels: Vec<Placed>,
    pub first_line: usize,
    pub last_line: usize,
    /// Lane 0 outermost. Empty when multi-line arrows are disabled.
    pub lanes: Vec<Lane>,
}

impl Group {
    /// Lane index of a group label, if it has one.
    pub fn lane_of(&self, label: usize) -> Option<usize> {
        self.lanes.iter().position(|l| l.label == label)
    }
}

/// How an entry sits on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Underlined span with a hook row on this line.
    Inline,
    /// A multi-line span opens here.
    MultiStart,
    /// A multi-line span closes here; its message row is drawn here.
    MultiEnd,
}

/// One label's presence on one line, in unwindowed display columns.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Position in `Group::labels`.
    pub label: usize,
    pub kind: EntryKind,
    /// First underline cell.
    pub start_col: usize,
    /// One past the last underline cell; empty spans occupy one caret
    /// cell, so this always exceeds `start_col`.
    pub end_col: usize,
    /// Cell the message arrow attaches to.
    pub attach_col: usize,
    /// The span renders as a caret (no covered cells of its own).
    pub caret: bool,
    order: i32,
    pub span_len: usize,
}

impl Entry {
    /// Arrow rows come from inline entries and closing lanes.
    pub fn bears_message(&self) -> bool {
        !matches!(self.kind, EntryKind::MultiStart)
    }
}

/// Group the report's labels by source in first-appearance order,
/// normalizing every span. Labels that fail to place are dropped here
/// and nowhere else.
pub fn plan(report: &Report, sources: &dyn SourceMap) -> Vec<Group> {
    let cfg = &report.config;
    let mut groups: Vec<Group> = Vec::new();
    for (index, label) in report.labels.iter().enumerate() {
        let Some(source) = sources.get(label.source) else {
            debug!(
                label = index,
                source = label.source,
                "label references unknown source, dropped"
            );
            continue;
        };
        let Some(span) = resolve(source, label.span, cfg.index_type) else {
            continue;
        };
        let placed = Placed {
            index,
            span,
            attach: attach_char(&span, cfg.label_attach),
        };
        match groups.iter_mut().find(|g| g.source == label.source) {
            Some(g) => g.labels.push(placed),
            None => groups.push(Group {
                source: label.source,
                labels: vec![placed],
                first_line: 0,
                last_line: 0,
                lanes: Vec::new(),
            }),
        }
    }
    for g in &mut groups {
        g.first_line = g.labels.iter().map(|p| p.span.start_line).min().unwrap_or(0);
        g.last_line = g.labels.iter().map(|p| p.span.end_line).max().unwrap_or(0);
        g.lanes = assign_lanes(&g.labels, cfg);
    }
    groups
}

fn attach_char(span: &Resolved, attach: LabelAttach) -> usize {
    if span.is_empty() {
        return span.start;
    }
    match attach {
        LabelAttach::Start => span.start,
        LabelAttach::Middle => (span.start + span.end) / 2,
        LabelAttach::End => span.end - 1,
    }
}

fn assign_lanes(labels: &[Placed], cfg: &Config) -> Vec<Lane> {
    if !cfg.multiline_arrows {
        return Vec::new();
    }
    let mut multi: Vec<(usize, &Placed)> = labels
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.span.is_inline())
        .collect();
    multi.sort_by(|a, b| {
        b.1.span
            .len()
            .cmp(&a.1.span.len())
            .then(a.1.span.start_line.cmp(&b.1.span.start_line))
    });
    multi
        .into_iter()
        .map(|(label, p)| Lane {
            label,
            start_line: p.span.start_line,
            end_line: p.span.end_line,
        })
        .collect()
}

/// Build the ordered entry list for one line of a group.
///
/// `char_offset`/`char_len` describe the line within its source; `map`
/// is the line's cell map. Entries come back in arrow-row order.
pub fn line_entries(
    group: &Group,
    report: &Report,
    cfg: &Config,
    line: usize,
    char_offset: usize,
    char_len: usize,
    map: &LineMap,
) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (li, p) in group.labels.iter().enumerate() {
        let order = report.labels[p.index].order;
        let span_len = p.span.len();
        let lane_drawn = !p.span.is_inline() && cfg.multiline_arrows;
        if lane_drawn {
            let kind = if line == p.span.start_line {
                EntryKind::MultiStart
            } else if line == p.span.end_line {
                EntryKind::MultiEnd
            } else {
                continue;
            };
            let edge = match kind {
                EntryKind::MultiStart => p.span.start,
                _ => p.span.end - 1,
            };
            let col = edge_col(map, char_offset, char_len, edge);
            entries.push(Entry {
                label: li,
                kind,
                start_col: col,
                end_col: col + 1,
                attach_col: col,
                caret: false,
                order,
                span_len,
            });
            continue;
        }
        // Inline placement; a multi-line span without lane decorations
        // degrades to an entry on its closing line.
        let place_line = if p.span.is_inline() {
            p.span.start_line
        } else {
            p.span.end_line
        };
        if line != place_line {
            continue;
        }
        let rel_start = p.span.start.saturating_sub(char_offset);
        let rel_end = (p.span.end.saturating_sub(char_offset)).min(char_len);
        let caret = p.span.is_empty() || rel_start >= char_len || rel_end <= rel_start;
        let (start_col, end_col) = if caret {
            let col = map.col_of_char(rel_start.min(char_len));
            (col, col + 1)
        } else {
            let start = map.col_of_char(rel_start);
            let end = map.col_past_char(rel_end - 1).max(start + 1);
            (start, end)
        };
        let attach_col = if caret {
            start_col
        } else {
            map.col_of_char((p.attach.saturating_sub(char_offset)).min(char_len))
                .clamp(start_col, end_col - 1)
        };
        entries.push(Entry {
            label: li,
            kind: EntryKind::Inline,
            start_col,
            end_col,
            attach_col,
            caret,
            order,
            span_len,
        });
    }
    sort_entries(&mut entries, cfg);
    entries
}

fn edge_col(map: &LineMap, char_offset: usize, char_len: usize, edge: usize) -> usize {
    map.col_of_char((edge.saturating_sub(char_offset)).min(char_len))
}

#[cfg(test)]
pub(crate) fn test_entry(start_col: usize, end_col: usize, attach_col: usize) -> Entry {
    Entry {
        label: 0,
        kind: EntryKind::Inline,
        start_col,
        end_col,
        attach_col,
        caret: false,
        order: 0,
        span_len: end_col - start_col,
    }
}

fn sort_entries(entries: &mut [Entry], cfg: &Config) {
    if cfg.column_order {
        entries.sort_by(|a, b| {
            a.start_col
                .cmp(&b.start_col)
                .then(a.span_len.cmp(&b.span_len))
        });
    } else {
        entries.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.start_col.cmp(&b.start_col))
                .then(a.span_len.cmp(&b.span_len))
        });
    }
}
