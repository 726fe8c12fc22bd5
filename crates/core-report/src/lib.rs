//! Report data model.
//!
//! A [`Report`] is plain owned data: a kind, an optional code and title,
//! an ordered label sequence, footers and a configuration. The drawing
//! engine borrows it immutably; nothing here knows how to render.
//! Labels are identified positionally within their report — a dropped
//! label still holds its slot so later labels keep their identity.

pub mod config;
pub mod style;

pub use config::{CharSetKind, Config, ConfigError, LabelAttach, MIN_LIMIT_WIDTH};
pub use style::{AnsiScheme, Scheme, StyleCategory};

use core_source::{Source, SourceId, Span};
use std::fmt;
use std::sync::Arc;

/// Severity of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Error,
    Warning,
    Advice,
    /// Any other word, rendered verbatim.
    Custom(String),
}

impl Kind {
    /// The word shown in the title row. Custom kinds that spell a known
    /// severity (any case) canonicalize to it.
    pub fn word(&self) -> &str {
        match self {
            Kind::Error => "Error",
            Kind::Warning => "Warning",
            Kind::Advice => "Advice",
            Kind::Custom(s) => match s.to_ascii_lowercase().as_str() {
                "error" => "Error",
                "warning" => "Warning",
                "advice" => "Advice",
                _ => s,
            },
        }
    }

    /// Style category of the title word.
    pub fn category(&self) -> StyleCategory {
        match self.word() {
            "Error" => StyleCategory::Error,
            "Warning" => StyleCategory::Warning,
            _ => StyleCategory::Kind,
        }
    }
}

/// One labeled span with its message and drawing knobs.
#[derive(Clone)]
pub struct Label {
    pub span: Span,
    pub source: SourceId,
    /// May hold several physical lines; continuations indent under the
    /// first column of the message.
    pub message: Option<String>,
    /// Per-label color override, queried with the `Label` category.
    pub scheme: Option<Arc<dyn Scheme>>,
    /// Arrow-row ordering key, ascending. Default 0.
    pub order: i32,
    /// Underline ownership weight; higher wins a contested column.
    /// Default 0.
    pub priority: i32,
}

impl Label {
    pub fn new(span: impl Into<Span>, source: SourceId) -> Self {
        Self {
            span: span.into(),
            source,
            message: None,
            scheme: None,
            order: 0,
            priority: 0,
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("span", &self.span)
            .field("source", &self.source)
            .field("message", &self.message)
            .field("scheme", &self.scheme.as_ref().map(|_| ".."))
            .field("order", &self.order)
            .field("priority", &self.priority)
            .finish()
    }
}

/// A fully described diagnostic, ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: Kind,
    pub code: Option<String>,
    pub message: Option<String>,
    pub labels: Vec<Label>,
    pub helps: Vec<String>,
    pub notes: Vec<String>,
    /// Primary location shown in the first header: a source and a
    /// position in that source's configured index units.
    pub location: (SourceId, usize),
    pub config: Config,
}

impl Report {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            code: None,
            message: None,
            labels: Vec::new(),
            helps: Vec::new(),
            notes: Vec::new(),
            location: (0, 0),
            config: Config::default(),
        }
    }
}

/// Resolve source ids to sources.
///
/// The engine only ever asks for ids its labels mention; an unknown id
/// drops those labels rather than failing the render.
pub trait SourceMap {
    fn get(&self, id: SourceId) -> Option<&Source>;
}

/// The one-source degenerate case: id 0 is the source itself.
impl SourceMap for Source {
    fn get(&self, id: SourceId) -> Option<&Source> {
        (id == 0).then_some(self)
    }
}

impl SourceMap for [Source] {
    fn get(&self, id: SourceId) -> Option<&Source> {
        self.as_ref().get(id)
    }
}

impl SourceMap for Vec<Source> {
    fn get(&self, id: SourceId) -> Option<&Source> {
        self.as_slice().get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_words_canonicalize() {
        assert_eq!(Kind::Error.word(), "Error");
        assert_eq!(Kind::Custom("WARNING".into()).word(), "Warning");
        assert_eq!(Kind::Custom("Hint".into()).word(), "Hint");
    }

    #[test]
    fn kind_category_follows_word() {
        assert_eq!(Kind::Error.category(), StyleCategory::Error);
        assert_eq!(
            Kind::Custom("error".into()).category(),
            StyleCategory::Error
        );
        assert_eq!(Kind::Advice.category(), StyleCategory::Kind);
        assert_eq!(Kind::Custom("Hint".into()).category(), StyleCategory::Kind);
    }

    #[test]
    fn single_source_map_answers_id_zero_only() {
        let s = Source::new("x");
        assert!(SourceMap::get(&s, 0).is_some());
        assert!(SourceMap::get(&s, 1).is_none());
    }

    #[test]
    fn vec_source_map_indexes_by_registration_order() {
        let v = vec![Source::with_name("a", "1"), Source::with_name("b", "2")];
        assert_eq!(v.get(1).map(|s| s.name()), Some("b"));
        assert!(SourceMap::get(&v, 2).is_none());
    }
}
