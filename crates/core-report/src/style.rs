//! Style categories and the color-callback seam.
//!
//! The engine never emits escape codes of its own. Every styled run is
//! bracketed by two queries against a caller-supplied [`Scheme`]: one
//! with the category being drawn, one with [`StyleCategory::Reset`].
//! Whatever the scheme returns is written verbatim; `None` writes
//! nothing. Labels may carry their own scheme, queried with the
//! `Label` category for their underlines, arrows and covered text.

/// What is being drawn. A closed set; the engine never invents new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    Reset,
    Error,
    Warning,
    Kind,
    Margin,
    SkippedMargin,
    Unimportant,
    Note,
    Label,
}

/// Escape provider for one category. Return values are opaque to the
/// engine and written as-is.
pub trait Scheme: Send + Sync {
    fn code(&self, category: StyleCategory) -> Option<&str>;
}

impl<F> Scheme for F
where
    F: Fn(StyleCategory) -> Option<&'static str> + Send + Sync,
{
    fn code(&self, category: StyleCategory) -> Option<&str> {
        self(category)
    }
}

/// The stock 16-color ANSI scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiScheme;

impl Scheme for AnsiScheme {
    fn code(&self, category: StyleCategory) -> Option<&str> {
        Some(match category {
            StyleCategory::Reset => "\x1b[0m",
            StyleCategory::Error => "\x1b[31m",
            StyleCategory::Warning => "\x1b[33m",
            StyleCategory::Kind => "\x1b[36m",
            StyleCategory::Margin => "\x1b[38;5;246m",
            StyleCategory::SkippedMargin => "\x1b[2;38;5;246m",
            StyleCategory::Unimportant => "\x1b[2m",
            StyleCategory::Note => "\x1b[32m",
            StyleCategory::Label => "\x1b[35m",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_scheme_covers_every_category() {
        for c in [
            StyleCategory::Reset,
            StyleCategory::Error,
            StyleCategory::Warning,
            StyleCategory::Kind,
            StyleCategory::Margin,
            StyleCategory::SkippedMargin,
            StyleCategory::Unimportant,
            StyleCategory::Note,
            StyleCategory::Label,
        ] {
            assert!(AnsiScheme.code(c).is_some());
        }
    }

    #[test]
    fn closures_are_schemes() {
        let scheme = |c: StyleCategory| match c {
            StyleCategory::Reset => Some("}"),
            _ => Some("{"),
        };
        assert_eq!(Scheme::code(&scheme, StyleCategory::Margin), Some("{"));
        assert_eq!(Scheme::code(&scheme, StyleCategory::Reset), Some("}"));
    }
}
