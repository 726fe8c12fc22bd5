//! The two fixed glyph tables.
//!
//! Both tables carry the same slots; the Unicode set uses box-drawing
//! characters that are all display-width 1, so lane and margin
//! arithmetic is identical across sets. The ellipsis is the literal
//! `...` in both sets and is charged three columns by the windowing
//! code.

use core_report::CharSetKind;

/// Glyphs used for drawing. Field names follow their role, not their
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    pub hbar: char,
    pub vbar: char,
    pub xbar: char,
    pub vbar_break: char,
    pub vbar_gap: char,
    pub uarrow: char,
    pub rarrow: char,
    pub ltop: char,
    pub mtop: char,
    pub rtop: char,
    pub lbot: char,
    pub rbot: char,
    pub mbot: char,
    pub lbox: char,
    pub rbox: char,
    pub lcross: char,
    pub rcross: char,
    pub underbar: char,
    pub underline: char,
}

pub const ASCII: Charset = Charset {
    hbar: '-',
    vbar: '|',
    xbar: '+',
    vbar_break: '*',
    vbar_gap: ':',
    uarrow: '^',
    rarrow: '>',
    ltop: ',',
    mtop: 'v',
    rtop: '.',
    lbot: '`',
    rbot: '\'',
    mbot: '^',
    lbox: '[',
    rbox: ']',
    lcross: '|',
    rcross: '|',
    underbar: '|',
    underline: '^',
};

pub const UNICODE: Charset = Charset {
    hbar: '─',
    vbar: '│',
    xbar: '┼',
    vbar_break: '┆',
    vbar_gap: '┆',
    uarrow: '▲',
    rarrow: '▶',
    ltop: '╭',
    mtop: '┬',
    rtop: '╮',
    lbot: '╰',
    rbot: '╯',
    mbot: '┴',
    lbox: '[',
    rbox: ']',
    lcross: '├',
    rcross: '┤',
    underbar: '┬',
    underline: '─',
};

impl Charset {
    pub fn of(kind: CharSetKind) -> &'static Charset {
        match kind {
            CharSetKind::Ascii => &ASCII,
            CharSetKind::Unicode => &UNICODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{AmbiWidth, scalar_width};

    #[test]
    fn every_glyph_is_one_cell_wide() {
        for cs in [ASCII, UNICODE] {
            for g in [
                cs.hbar,
                cs.vbar,
                cs.xbar,
                cs.vbar_break,
                cs.vbar_gap,
                cs.uarrow,
                cs.rarrow,
                cs.ltop,
                cs.mtop,
                cs.rtop,
                cs.lbot,
                cs.rbot,
                cs.mbot,
                cs.lbox,
                cs.rbox,
                cs.lcross,
                cs.rcross,
                cs.underbar,
                cs.underline,
            ] {
                assert_eq!(scalar_width(g, AmbiWidth::Narrow), 1, "glyph {g:?}");
            }
        }
    }
}
