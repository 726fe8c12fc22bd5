//! Help and note footer blocks.
//!
//! Each block is a prefix (`Help: `, or `Help N: ` when several of the
//! same kind exist) and the user text split into physical lines; lines
//! after the first indent to align under the message's first column.

use core_report::StyleCategory;

/// One footer block, ready to lay out.
#[derive(Debug, PartialEq, Eq)]
pub struct Block<'a> {
    pub prefix: String,
    pub category: StyleCategory,
    pub lines: Vec<&'a str>,
}

/// Build the blocks for a report's helps and notes, in that order.
pub fn blocks<'a>(helps: &'a [String], notes: &'a [String]) -> Vec<Block<'a>> {
    let mut out = Vec::new();
    for (word, texts) in [("Help", helps), ("Note", notes)] {
        for (i, text) in texts.iter().enumerate() {
            let prefix = if texts.len() > 1 {
                format!("{word} {}: ", i + 1)
            } else {
                format!("{word}: ")
            };
            out.push(Block {
                prefix,
                category: StyleCategory::Note,
                lines: text.split('\n').collect(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entries_are_unnumbered() {
        let helps = vec!["try again".to_string()];
        let notes = vec!["for what it's worth".to_string()];
        let b = blocks(&helps, &notes);
        assert_eq!(b[0].prefix, "Help: ");
        assert_eq!(b[1].prefix, "Note: ");
    }

    #[test]
    fn multiple_entries_number_from_one() {
        let helps = vec!["a".to_string(), "b".to_string()];
        let b = blocks(&helps, &[]);
        assert_eq!(b[0].prefix, "Help 1: ");
        assert_eq!(b[1].prefix, "Help 2: ");
    }

    #[test]
    fn helps_precede_notes_and_split_lines() {
        let helps = vec!["one\ntwo".to_string()];
        let notes = vec!["n".to_string()];
        let b = blocks(&helps, &notes);
        assert_eq!(b[0].lines, vec!["one", "two"]);
        assert_eq!(b[1].lines, vec!["n"]);
    }
}
