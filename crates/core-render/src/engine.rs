//! The drawing engine.
//!
//! Consumes a planned report and emits rows in one forward pass: title,
//! box header, source rows with lane decorations, underline and arrow
//! rows, gap rows, footers, tail. Nothing here makes layout decisions —
//! columns, ordering, lanes and windows arrive precomputed from
//! `core-layout` — and nothing is buffered beyond the row being built,
//! so a writer error surfaces at the next chunk boundary.
//!
//! Row anatomy, left to right:
//! - margin: right-aligned line number (or blanks) and the gutter bar;
//! - one pad column unless compact;
//! - the lane area (`lanes + 3` columns) when the group has multi-line
//!   spans;
//! - the text area, possibly windowed with `...` on the sliced sides.

use crate::charset::Charset;
use crate::emit::{Paint, Row};
use crate::footer;
use core_layout::{
    Entry, EntryKind, Group, Lane, LineMap, Window, line_entries, plan, plan_windows, tail_fitting,
};
use core_report::{Config, Report, Scheme, SourceMap, StyleCategory};
use core_source::{IndexType, Source};
use core_text::{AmbiWidth, line_width};
use std::io::{self, Write};
use tracing::trace;

/// Render a report against its sources.
///
/// `scheme` is the report-wide color scheme; labels may override it with
/// their own. A `None` scheme with `config.color = true` means only
/// label-level schemes fire. The writer's first error aborts the render
/// and is returned unchanged.
pub fn render<W: Write>(
    report: &Report,
    sources: &dyn SourceMap,
    scheme: Option<&dyn Scheme>,
    out: &mut W,
) -> io::Result<()> {
    debug_assert!(report.config.validate().is_ok(), "unvalidated config");
    let groups = plan(report, sources);
    let digits = groups
        .iter()
        .filter_map(|g| {
            sources
                .get(g.source)
                .map(|s| s.display_line(g.last_line).to_string().len())
        })
        .max()
        .unwrap_or(1);
    let cfg = &report.config;
    let mut eng = Engine {
        report,
        cfg,
        cs: Charset::of(cfg.char_set),
        sources,
        scheme,
        out,
        ambi: AmbiWidth::from_cells(cfg.ambi_width).unwrap_or_default(),
        margin: digits + 2,
        pad: if cfg.compact { 0 } else { 1 },
    };
    eng.title()?;
    for (gi, group) in groups.iter().enumerate() {
        eng.group(gi, group)?;
    }
    eng.footers(!groups.is_empty())?;
    if !groups.is_empty() && !cfg.compact {
        eng.tail()?;
    }
    Ok(())
}

struct Engine<'a, W: Write> {
    report: &'a Report,
    cfg: &'a Config,
    cs: &'static Charset,
    sources: &'a dyn SourceMap,
    scheme: Option<&'a dyn Scheme>,
    out: &'a mut W,
    ambi: AmbiWidth,
    /// Margin width: digits of the widest line number plus a space on
    /// either side.
    margin: usize,
    pad: usize,
}

impl<'a, W: Write> Engine<'a, W> {
    // ---- chunk plumbing -------------------------------------------------

    // The returned scheme borrows the report or the caller's scheme, not
    // this engine, so emission can keep writing while holding it.
    fn style_for(&self, paint: Paint) -> Option<(&'a dyn Scheme, StyleCategory)> {
        if !self.cfg.color {
            return None;
        }
        match paint {
            Paint::None => None,
            Paint::Cat(cat) => self.scheme.map(|s| (s, cat)),
            Paint::Label(i) => match &self.report.labels[i].scheme {
                Some(own) => Some((own.as_ref(), StyleCategory::Label)),
                None => self.scheme.map(|s| (s, StyleCategory::Label)),
            },
        }
    }

    fn chunk_bytes(&mut self, bytes: &[u8], paint: Paint) -> io::Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        match self.style_for(paint) {
            Some((scheme, cat)) => match scheme.code(cat) {
                Some(code) => {
                    self.out.write_all(code.as_bytes())?;
                    self.out.write_all(bytes)?;
                    if let Some(reset) = scheme.code(StyleCategory::Reset) {
                        self.out.write_all(reset.as_bytes())?;
                    }
                    Ok(())
                }
                None => self.out.write_all(bytes),
            },
            None => self.out.write_all(bytes),
        }
    }

    fn chunk(&mut self, text: &str, paint: Paint) -> io::Result<()> {
        self.chunk_bytes(text.as_bytes(), paint)
    }

    fn chunk_cells(&mut self, cells: &[(char, Paint)]) -> io::Result<()> {
        let mut run = String::new();
        let mut cur = Paint::None;
        for &(ch, paint) in cells {
            if paint != cur && !run.is_empty() {
                let text = std::mem::take(&mut run);
                self.chunk(&text, cur)?;
            }
            cur = paint;
            run.push(ch);
        }
        self.chunk(&run, cur)
    }

    fn newline(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")
    }

    fn row(&mut self, row: Row) -> io::Result<()> {
        for (text, paint) in row.chunks() {
            self.chunk(&text, paint)?;
        }
        self.newline()
    }

    // ---- fixed rows -----------------------------------------------------

    fn title(&mut self) -> io::Result<()> {
        let mut head = String::new();
        if let Some(code) = &self.report.code {
            head.push('[');
            head.push_str(code);
            head.push_str("] ");
        }
        head.push_str(self.report.kind.word());
        let cat = self.report.kind.category();
        match &self.report.message {
            Some(message) => {
                head.push(':');
                self.chunk(&head, Paint::Cat(cat))?;
                self.chunk(" ", Paint::None)?;
                self.chunk(message, Paint::None)?;
            }
            None => self.chunk(&head, Paint::Cat(cat))?,
        }
        self.newline()
    }

    fn blank_gutter(&mut self) -> io::Result<()> {
        let mut row = Row::new();
        row.put(self.margin, self.cs.vbar, Paint::Cat(StyleCategory::Margin));
        self.row(row)
    }

    fn window_break(&mut self) -> io::Result<()> {
        let mut row = Row::new();
        row.put(
            self.margin,
            self.cs.vbar_break,
            Paint::Cat(StyleCategory::SkippedMargin),
        );
        self.row(row)
    }

    fn tail(&mut self) -> io::Result<()> {
        let mut row = Row::new();
        row.fill(0..self.margin, self.cs.hbar, Paint::Cat(StyleCategory::Margin));
        row.put(self.margin, self.cs.rbot, Paint::Cat(StyleCategory::Margin));
        self.row(row)
    }

    // ---- header ---------------------------------------------------------

    fn group_position(&self, first: bool, group: &Group, source: &Source) -> Option<(usize, usize)> {
        let (loc_src, loc_pos) = self.report.location;
        if first && loc_src == group.source {
            let ch = match self.cfg.index_type {
                IndexType::Char => loc_pos,
                IndexType::Byte => {
                    if loc_pos > source.len_bytes() {
                        return None;
                    }
                    source.byte_to_char(loc_pos)
                }
            };
            if ch > source.len_chars() {
                return None;
            }
            let line = source.line_of_char(ch);
            return Some((
                source.display_line(line),
                ch - source.line(line).char_offset + 1,
            ));
        }
        let earliest = group.labels.iter().map(|p| p.span.start).min()?;
        let line = source.line_of_char(earliest);
        Some((
            source.display_line(line),
            earliest - source.line(line).char_offset + 1,
        ))
    }

    fn box_header(&mut self, first: bool, group: &Group, source: &Source) -> io::Result<()> {
        let loc = match self.group_position(first, group, source) {
            Some((line, col)) => format!("{line}:{col}"),
            None => "?:?".to_string(),
        };
        let mut name = source.name().to_string();
        if let Some(limit) = self.cfg.limit_width {
            // margin + three box glyphs + two inner spaces + closing box
            let fixed = self.margin + 3 + 2 + 1;
            let text_cols = line_width(name.as_bytes(), self.ambi, 1)
                + 1
                + line_width(loc.as_bytes(), self.ambi, 1);
            if fixed + text_cols > limit {
                let tail_cols = 1 + line_width(loc.as_bytes(), self.ambi, 1);
                let budget = limit.saturating_sub(fixed + tail_cols + 3);
                let (suffix, cut) = tail_fitting(&name, budget, self.ambi);
                if cut {
                    name = format!("...{suffix}");
                }
            }
        }
        let open = format!(
            "{}{}{}",
            if first { self.cs.ltop } else { self.cs.lcross },
            self.cs.hbar,
            self.cs.lbox
        );
        self.chunk(&" ".repeat(self.margin), Paint::None)?;
        self.chunk(&open, Paint::Cat(StyleCategory::Margin))?;
        self.chunk(&format!(" {name}:{loc} "), Paint::None)?;
        self.chunk(&self.cs.rbox.to_string(), Paint::Cat(StyleCategory::Margin))?;
        self.newline()
    }

    // ---- group walk -----------------------------------------------------

    fn group(&mut self, gi: usize, group: &Group) -> io::Result<()> {
        let Some(source) = self.sources.get(group.source) else {
            return Ok(());
        };
        trace!(
            group = gi,
            source = source.name(),
            lines = group.last_line - group.first_line + 1,
            lanes = group.lanes.len(),
            "rendering group"
        );
        if gi > 0 && !self.cfg.compact {
            self.blank_gutter()?;
        }
        self.box_header(gi == 0, group, source)?;
        if !self.cfg.compact {
            self.blank_gutter()?;
        }
        let lanes = &group.lanes;
        let lane_area = if lanes.is_empty() { 0 } else { lanes.len() + 3 };
        let mut lane_done = vec![false; lanes.len()];
        let mut seen_active = false;
        let mut in_gap = false;
        let mut broke = false;
        for line in group.first_line..=group.last_line {
            let info = *source.line(line);
            let map = LineMap::build(source.line_bytes(line), self.ambi, self.cfg.tab_width);
            let entries = line_entries(
                group,
                self.report,
                self.cfg,
                line,
                info.char_offset,
                info.char_len,
                &map,
            );
            if entries.is_empty() {
                in_gap = true;
                continue;
            }
            if in_gap {
                // A gap row only separates two drawn lines; a group that
                // opens on an entry-less line starts directly.
                if seen_active {
                    if self.cfg.cross_gap {
                        self.gap_row(group, lanes, &lane_done, line)?;
                    } else {
                        broke = true;
                    }
                }
                in_gap = false;
            }
            seen_active = true;
            self.source_block(
                group,
                source,
                line,
                &map,
                &entries,
                lanes,
                &mut lane_done,
                lane_area,
                broke,
            )?;
            broke = false;
            for (l, lane) in lanes.iter().enumerate() {
                if lane.end_line == line {
                    lane_done[l] = true;
                }
            }
        }
        Ok(())
    }

    fn lane_paint(&self, group: &Group, lane: &Lane) -> Paint {
        Paint::Label(group.labels[lane.label].index)
    }

    fn gap_row(
        &mut self,
        group: &Group,
        lanes: &[Lane],
        lane_done: &[bool],
        next_line: usize,
    ) -> io::Result<()> {
        let mut row = Row::new();
        row.put(
            self.margin,
            self.cs.vbar_gap,
            Paint::Cat(StyleCategory::SkippedMargin),
        );
        let base = self.margin + 1 + self.pad;
        for (l, lane) in lanes.iter().enumerate() {
            if !lane_done[l] && lane.start_line < next_line && lane.end_line >= next_line {
                row.put(base + l, self.cs.vbar_gap, self.lane_paint(group, lane));
            }
        }
        self.row(row)
    }

    /// Lane cells for decoration rows: a bar under every lane that is
    /// still open at this line.
    fn lane_prefix(
        &self,
        row: &mut Row,
        group: &Group,
        lanes: &[Lane],
        lane_done: &[bool],
        line: usize,
    ) {
        let base = self.margin + 1 + self.pad;
        for (l, lane) in lanes.iter().enumerate() {
            if !lane_done[l] && lane.start_line <= line && line <= lane.end_line {
                row.put(base + l, self.cs.vbar, self.lane_paint(group, lane));
            }
        }
    }

    fn margin_row(&self) -> Row {
        let mut row = Row::new();
        row.put(self.margin, self.cs.vbar, Paint::Cat(StyleCategory::Margin));
        row
    }

    // ---- per-line drawing -----------------------------------------------

    #[allow(clippy::too_many_arguments)]
    fn source_block(
        &mut self,
        group: &Group,
        source: &Source,
        line: usize,
        map: &LineMap,
        entries: &[Entry],
        lanes: &[Lane],
        lane_done: &mut [bool],
        lane_area: usize,
        broke: bool,
    ) -> io::Result<()> {
        let avail = self
            .cfg
            .limit_width
            .map(|lw| lw.saturating_sub(self.margin + 1 + self.pad + lane_area));
        let windows = avail
            .and_then(|a| plan_windows(map, entries, a))
            .unwrap_or_else(|| {
                vec![Window {
                    cols: 0..map.width(),
                    left: false,
                    right: false,
                    entries: (0..entries.len()).collect(),
                }]
            });
        for (wi, w) in windows.iter().enumerate() {
            if wi > 0 {
                self.window_break()?;
            }
            self.source_row(
                group,
                source,
                line,
                map,
                entries,
                w,
                lanes,
                lane_done,
                broke && wi == 0,
            )?;
            if wi == 0 {
                // Lanes that close here without a message end at their
                // arrow mark; nothing below continues them.
                for (l, lane) in lanes.iter().enumerate() {
                    if lane.end_line == line
                        && self.report.labels[group.labels[lane.label].index]
                            .message
                            .is_none()
                    {
                        lane_done[l] = true;
                    }
                }
            }
            self.underline_row(group, line, entries, w, lanes, lane_done, lane_area)?;
            self.arrow_rows(group, line, entries, w, lanes, lane_done, lane_area)?;
        }
        Ok(())
    }

    /// Cells of the lane area on a source row, including the arrow run
    /// of any lane opening or closing at this line.
    fn source_lane_cells(
        &self,
        group: &Group,
        lanes: &[Lane],
        lane_done: &[bool],
        line: usize,
        broke: bool,
    ) -> Vec<(char, Paint)> {
        let m = lanes.len();
        let mut cells = vec![(' ', Paint::None); m + 3];
        for (l, lane) in lanes.iter().enumerate() {
            if lane_done[l] {
                continue;
            }
            if lane.start_line < line && line < lane.end_line {
                let glyph = if broke { self.cs.xbar } else { self.cs.vbar };
                cells[l] = (glyph, self.lane_paint(group, lane));
            }
        }
        // Outermost first, so an inner edge draws its run over an outer
        // lane's crossing.
        for (l, lane) in lanes.iter().enumerate() {
            if lane_done[l] {
                continue;
            }
            let glyph = if line == lane.start_line {
                self.cs.ltop
            } else if line == lane.end_line {
                self.cs.lcross
            } else {
                continue;
            };
            let paint = self.lane_paint(group, lane);
            cells[l] = (glyph, paint);
            for cell in cells.iter_mut().take(m + 1).skip(l + 1) {
                *cell = (self.cs.hbar, paint);
            }
            cells[m + 1] = (self.cs.rarrow, paint);
        }
        cells
    }

    /// Owner of a cell: covering label with the highest priority, ties
    /// to the shorter span, then to the earlier label.
    fn owner_at(
        &self,
        group: &Group,
        entries: &[Entry],
        w: &Window,
        col: usize,
        carets: bool,
    ) -> Option<usize> {
        let mut best: Option<(&Entry, i32)> = None;
        for &i in &w.entries {
            let e = &entries[i];
            if e.kind != EntryKind::Inline || (e.caret && !carets) {
                continue;
            }
            if col < e.start_col || col >= e.end_col {
                continue;
            }
            let priority = self.report.labels[group.labels[e.label].index].priority;
            best = match best {
                Some((be, bp)) if priority > bp || (priority == bp && e.span_len < be.span_len) => {
                    Some((e, priority))
                }
                None => Some((e, priority)),
                keep => keep,
            };
        }
        best.map(|(e, _)| group.labels[e.label].index)
    }

    #[allow(clippy::too_many_arguments)]
    fn source_row(
        &mut self,
        group: &Group,
        source: &Source,
        line: usize,
        map: &LineMap,
        entries: &[Entry],
        w: &Window,
        lanes: &[Lane],
        lane_done: &[bool],
        broke: bool,
    ) -> io::Result<()> {
        let n = source.display_line(line).to_string();
        self.chunk(&" ".repeat(self.margin - 1 - n.len()), Paint::None)?;
        self.chunk(
            &format!("{n} {}", self.cs.vbar),
            Paint::Cat(StyleCategory::Margin),
        )?;
        if self.pad == 1 {
            self.chunk(" ", Paint::None)?;
        }
        if !lanes.is_empty() {
            let cells = self.source_lane_cells(group, lanes, lane_done, line, broke);
            self.chunk_cells(&cells)?;
        }
        if w.left {
            self.chunk("...", Paint::Cat(StyleCategory::Unimportant))?;
        }
        let bytes = source.line_bytes(line);
        let mut run: Vec<u8> = Vec::new();
        let mut cur = Paint::None;
        for seg in map.segments() {
            if seg.cols.start < w.cols.start || seg.cols.start >= w.cols.end {
                continue;
            }
            let paint = self
                .owner_at(group, entries, w, seg.cols.start, false)
                .map_or(Paint::None, Paint::Label);
            if paint != cur && !run.is_empty() {
                let text = std::mem::take(&mut run);
                self.chunk_bytes(&text, cur)?;
            }
            cur = paint;
            if &bytes[seg.bytes.clone()] == b"\t" {
                run.extend(std::iter::repeat_n(b' ', seg.cols.len()));
            } else {
                run.extend_from_slice(&bytes[seg.bytes.clone()]);
            }
        }
        self.chunk_bytes(&run, cur)?;
        if w.right {
            self.chunk("...", Paint::Cat(StyleCategory::Unimportant))?;
        }
        self.newline()
    }

    /// Last drawable column of a window, one past the text when the
    /// window keeps the line's end (the end-of-line caret cell).
    fn draw_end(&self, entries: &[Entry], w: &Window) -> usize {
        if w.right {
            return w.cols.end;
        }
        w.entries
            .iter()
            .map(|&i| &entries[i])
            .filter(|e| e.kind == EntryKind::Inline)
            .map(|e| e.end_col.max(e.attach_col + 1))
            .max()
            .unwrap_or(0)
            .max(w.cols.end)
    }

    #[allow(clippy::too_many_arguments)]
    fn underline_row(
        &mut self,
        group: &Group,
        line: usize,
        entries: &[Entry],
        w: &Window,
        lanes: &[Lane],
        lane_done: &[bool],
        lane_area: usize,
    ) -> io::Result<()> {
        if !self.cfg.underlines {
            return Ok(());
        }
        let inline: Vec<&Entry> = w
            .entries
            .iter()
            .map(|&i| &entries[i])
            .filter(|e| e.kind == EntryKind::Inline)
            .collect();
        if inline.is_empty() {
            return Ok(());
        }
        let mut row = self.margin_row();
        self.lane_prefix(&mut row, group, lanes, lane_done, line);
        let tbase = self.margin + 1 + self.pad + lane_area;
        for col in w.cols.start..self.draw_end(entries, w) {
            let Some(owner) = self.owner_at(group, entries, w, col, true) else {
                continue;
            };
            let attach_here = inline
                .iter()
                .any(|e| !e.caret && e.attach_col == col);
            let caret_here = inline.iter().any(|e| e.caret && e.start_col == col);
            let glyph = if attach_here {
                self.cs.underbar
            } else if caret_here {
                self.cs.uarrow
            } else {
                self.cs.underline
            };
            row.put(tbase + w.project(col), glyph, Paint::Label(owner));
        }
        self.row(row)
    }

    #[allow(clippy::too_many_arguments)]
    fn arrow_rows(
        &mut self,
        group: &Group,
        line: usize,
        entries: &[Entry],
        w: &Window,
        lanes: &[Lane],
        lane_done: &mut [bool],
        lane_area: usize,
    ) -> io::Result<()> {
        let msgs: Vec<usize> = w
            .entries
            .iter()
            .copied()
            .filter(|&i| {
                let e = &entries[i];
                e.bears_message()
                    && self.report.labels[group.labels[e.label].index]
                        .message
                        .is_some()
            })
            .collect();
        if msgs.is_empty() {
            return Ok(());
        }
        let base = self.margin + 1 + self.pad;
        let tbase = base + lane_area;
        let end = self.draw_end(entries, w);
        let msg_gap = if self.cfg.compact { 2 } else { 3 };
        let line_msg_col = w
            .entries
            .iter()
            .map(|&i| &entries[i])
            .filter(|e| e.kind == EntryKind::Inline)
            .map(|e| w.project(e.end_col.max(e.attach_col + 1).min(end)))
            .max()
            .unwrap_or(0)
            + msg_gap;

        if msgs
            .iter()
            .any(|&i| entries[i].kind == EntryKind::MultiEnd)
        {
            // The closing arrow above needs a vertical before its hook.
            let mut row = self.margin_row();
            self.lane_prefix(&mut row, group, lanes, lane_done, line);
            for &i in &msgs {
                let e = &entries[i];
                if e.kind == EntryKind::Inline {
                    let col = e.attach_col.clamp(w.cols.start, end.saturating_sub(1));
                    row.put(
                        tbase + w.project(col),
                        self.cs.vbar,
                        Paint::Label(group.labels[e.label].index),
                    );
                }
            }
            self.row(row)?;
        }

        for (k, &mi) in msgs.iter().enumerate() {
            let e = &entries[mi];
            let report_idx = group.labels[e.label].index;
            let paint = Paint::Label(report_idx);
            let message = self.report.labels[report_idx]
                .message
                .clone()
                .unwrap_or_default();
            let mut lines = message.split('\n');
            let first = lines.next().unwrap_or("");

            let mut row = self.margin_row();
            let text_col;
            match e.kind {
                EntryKind::MultiEnd => {
                    let Some(l) = group.lane_of(e.label) else {
                        continue;
                    };
                    for (ol, lane) in lanes.iter().enumerate() {
                        if ol != l
                            && !lane_done[ol]
                            && lane.start_line <= line
                            && line <= lane.end_line
                        {
                            row.put(base + ol, self.cs.vbar, self.lane_paint(group, lane));
                        }
                    }
                    row.put(base + l, self.cs.lbot, paint);
                    row.fill(base + l + 1..base + lanes.len() + 2, self.cs.hbar, paint);
                    text_col = base + lanes.len() + 3;
                    lane_done[l] = true;
                }
                _ => {
                    self.lane_prefix(&mut row, group, lanes, lane_done, line);
                    let col = e.attach_col.clamp(w.cols.start, end.saturating_sub(1));
                    let acol = tbase + w.project(col);
                    row.put(acol, self.cs.lbot, paint);
                    let own_col = w.project(e.end_col.max(e.attach_col + 1).min(end)) + msg_gap;
                    let mcol = if self.cfg.align_messages {
                        line_msg_col
                    } else {
                        own_col
                    };
                    text_col = (tbase + mcol).max(acol + 2);
                    row.fill(acol + 1..text_col - 1, self.cs.hbar, paint);
                }
            }
            row.put_str(text_col, first, Paint::None);
            self.row(row)?;
            for cont in lines {
                let mut row = self.margin_row();
                self.lane_prefix(&mut row, group, lanes, lane_done, line);
                self.pending_bars(&mut row, group, entries, w, &msgs[k + 1..], tbase, end);
                row.put_str(text_col, cont, Paint::None);
                self.row(row)?;
            }
            if k + 1 < msgs.len() {
                let mut row = self.margin_row();
                self.lane_prefix(&mut row, group, lanes, lane_done, line);
                self.pending_bars(&mut row, group, entries, w, &msgs[k + 1..], tbase, end);
                self.row(row)?;
            }
        }
        Ok(())
    }

    /// Vertical bars under the attach columns of hooks not yet drawn.
    #[allow(clippy::too_many_arguments)]
    fn pending_bars(
        &self,
        row: &mut Row,
        group: &Group,
        entries: &[Entry],
        w: &Window,
        pending: &[usize],
        tbase: usize,
        end: usize,
    ) {
        for &i in pending {
            let e = &entries[i];
            if e.kind != EntryKind::Inline {
                continue;
            }
            let col = e.attach_col.clamp(w.cols.start, end.saturating_sub(1));
            row.put(
                tbase + w.project(col),
                self.cs.vbar,
                Paint::Label(group.labels[e.label].index),
            );
        }
    }

    // ---- footers --------------------------------------------------------

    fn footers(&mut self, boxed: bool) -> io::Result<()> {
        let blocks = footer::blocks(&self.report.helps, &self.report.notes);
        for block in blocks {
            if boxed && !self.cfg.compact {
                self.blank_gutter()?;
            }
            self.footer_margin(boxed)?;
            self.chunk(&block.prefix, Paint::Cat(block.category))?;
            self.chunk(block.lines[0], Paint::None)?;
            self.newline()?;
            let indent = " ".repeat(block.prefix.chars().count());
            for cont in &block.lines[1..] {
                self.footer_margin(boxed)?;
                self.chunk(&indent, Paint::None)?;
                self.chunk(cont, Paint::None)?;
                self.newline()?;
            }
        }
        Ok(())
    }

    fn footer_margin(&mut self, boxed: bool) -> io::Result<()> {
        if !boxed {
            return Ok(());
        }
        self.chunk(&" ".repeat(self.margin), Paint::None)?;
        self.chunk(
            &self.cs.vbar.to_string(),
            Paint::Cat(StyleCategory::Margin),
        )?;
        if self.pad == 1 {
            self.chunk(" ", Paint::None)?;
        }
        Ok(())
    }
}

/// Convenience for callers that want the report as a `String`. Invalid
/// UTF-8 source bytes pass through unchanged, so the output is rebuilt
/// lossily in that case.
pub fn render_to_string(
    report: &Report,
    sources: &dyn SourceMap,
    scheme: Option<&dyn Scheme>,
) -> String {
    let mut buf = Vec::new();
    match render(report, sources, scheme, &mut buf) {
        Ok(()) => {}
        Err(_) => return String::new(),
    }
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).into_owned())
}
