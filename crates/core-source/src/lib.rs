//! Immutable source buffers with a precomputed line index.
//!
//! A [`Source`] is built once from an in-memory byte buffer and shared by
//! reference across any number of reports. Construction walks the buffer
//! a single time; every later lookup (line of a byte, line of a char,
//! byte-to-char conversion) is a binary search or a walk bounded by one
//! line.
//!
//! Index invariants:
//! - Lines split on `\n`; the terminator is not part of the line text.
//! - `line[i+1].byte_offset == line[i].byte_offset + line[i].byte_len + 1`
//!   (and the same in chars; the newline counts one char).
//! - An empty buffer has exactly one empty line.
//! - Bytes that are not valid UTF-8 count one char each.

pub mod span;

pub use span::{IndexType, Resolved, Span, resolve};

/// Identifier of a registered source: its registration order.
pub type SourceId = usize;

/// Per-line entry of the precomputed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    pub byte_offset: usize,
    pub byte_len: usize,
    pub char_offset: usize,
    pub char_len: usize,
}

/// An immutable byte buffer plus its line index and display metadata.
#[derive(Debug, Clone)]
pub struct Source {
    bytes: Vec<u8>,
    name: String,
    line_offset: usize,
    lines: Vec<LineInfo>,
    char_len: usize,
}

/// Chars in a byte run, counting each invalid byte as one char.
fn count_chars(bytes: &[u8]) -> usize {
    bytes
        .utf8_chunks()
        .map(|c| c.valid().chars().count() + c.invalid().len())
        .sum()
}

impl Source {
    /// Build a source with the placeholder name `<unknown>`.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self::with_name("<unknown>", content)
    }

    /// Build a source, indexing its lines in one pass.
    pub fn with_name(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let bytes = content.into();
        let mut lines = Vec::new();
        let mut byte_offset = 0usize;
        let mut char_offset = 0usize;
        loop {
            let rest = &bytes[byte_offset..];
            let byte_len = rest
                .iter()
                .position(|&b| b == b'\n')
                .unwrap_or(rest.len());
            let char_len = count_chars(&rest[..byte_len]);
            lines.push(LineInfo {
                byte_offset,
                byte_len,
                char_offset,
                char_len,
            });
            if byte_offset + byte_len == bytes.len() {
                break;
            }
            byte_offset += byte_len + 1;
            char_offset += char_len + 1;
        }
        let last = lines.last().copied().unwrap_or(LineInfo {
            byte_offset: 0,
            byte_len: 0,
            char_offset: 0,
            char_len: 0,
        });
        let char_len = last.char_offset + last.char_len;
        Self {
            bytes,
            name: name.into(),
            line_offset: 0,
            lines,
            char_len,
        }
    }

    /// Shift displayed line numbers: a source that starts at line
    /// `offset + 1` of the file it was cut from.
    pub fn with_line_offset(mut self, offset: usize) -> Self {
        self.line_offset = offset;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_offset(&self) -> usize {
        self.line_offset
    }

    pub fn len_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn len_chars(&self) -> usize {
        self.char_len
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> &LineInfo {
        &self.lines[index]
    }

    /// Line text without its terminator.
    pub fn line_bytes(&self, index: usize) -> &[u8] {
        let line = &self.lines[index];
        &self.bytes[line.byte_offset..line.byte_offset + line.byte_len]
    }

    /// One-based display number of a line.
    pub fn display_line(&self, index: usize) -> usize {
        self.line_offset + index + 1
    }

    /// Line containing a byte position; past-the-end maps to the last line.
    pub fn line_of_byte(&self, byte: usize) -> usize {
        self.lines
            .partition_point(|l| l.byte_offset <= byte)
            .saturating_sub(1)
    }

    /// Line containing a char position; past-the-end maps to the last line.
    pub fn line_of_char(&self, ch: usize) -> usize {
        self.lines
            .partition_point(|l| l.char_offset <= ch)
            .saturating_sub(1)
    }

    /// Convert a byte position to the char position of the scalar that
    /// encloses it. A byte pointing into the middle of a multi-byte
    /// scalar rounds down to the scalar's first byte.
    pub fn byte_to_char(&self, byte: usize) -> usize {
        if byte >= self.bytes.len() {
            return self.char_len;
        }
        let line = &self.lines[self.line_of_byte(byte)];
        let rel = byte - line.byte_offset;
        if rel >= line.byte_len {
            // The terminator itself.
            return line.char_offset + line.char_len;
        }
        let slice = &self.bytes[line.byte_offset..line.byte_offset + line.byte_len];
        let mut chars = 0usize;
        let mut off = 0usize;
        for chunk in slice.utf8_chunks() {
            for ch in chunk.valid().chars() {
                let next = off + ch.len_utf8();
                if next > rel {
                    return line.char_offset + chars;
                }
                off = next;
                chars += 1;
            }
            for _ in chunk.invalid() {
                let next = off + 1;
                if next > rel {
                    return line.char_offset + chars;
                }
                off = next;
                chars += 1;
            }
        }
        line.char_offset + chars
    }

    /// Char position within its line (the line-local column, in chars).
    pub fn char_col(&self, ch: usize) -> usize {
        let line = &self.lines[self.line_of_char(ch)];
        ch - line.char_offset
    }
}

impl From<&str> for Source {
    fn from(content: &str) -> Self {
        Source::new(content)
    }
}

impl From<String> for Source {
    fn from(content: String) -> Self {
        Source::new(content)
    }
}

/// `(content, name)` pairs, the common literal form.
impl From<(&str, &str)> for Source {
    fn from((content, name): (&str, &str)) -> Self {
        Source::with_name(name, content)
    }
}
