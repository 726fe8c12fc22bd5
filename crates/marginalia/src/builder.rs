//! The fluent report builder.
//!
//! [`ReportBuilder`] collects sources, labels and footers through
//! chained calls; [`ReportBuilder::with_label`] hands back a nested
//! [`LabelBuilder`] whose setters apply to that label until it
//! re-surfaces into the outer builder — explicitly via
//! [`LabelBuilder::done`], or implicitly by calling any outer-level
//! method on it.
//!
//! Rendering borrows the builder, so one report can render repeatedly
//! (to a string for a test, to stderr for a user) without rebuilding.
//! Configuration domain errors are rejected here; the drawing engine
//! never sees an invalid config.

use core_render::render;
use core_report::{Config, ConfigError, Kind, Label, Report, Scheme};
use core_source::{Source, SourceId, Span};
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;

/// Failure of a render entry point.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Builds and renders one diagnostic report.
pub struct ReportBuilder {
    report: Report,
    sources: Vec<Source>,
    scheme: Option<Arc<dyn Scheme>>,
}

impl ReportBuilder {
    pub fn new(kind: Kind) -> Self {
        Self {
            report: Report::new(kind),
            sources: Vec::new(),
            scheme: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.report.config = config;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.report.code = Some(code.into());
        self
    }

    pub fn with_title(mut self, message: impl Into<String>) -> Self {
        self.report.message = Some(message.into());
        self
    }

    /// Primary location shown in the first header, in the configured
    /// index units.
    pub fn with_location(mut self, source: SourceId, position: usize) -> Self {
        self.report.location = (source, position);
        self
    }

    /// Register a source. Ids follow registration order: the first
    /// source is 0, the second 1, and so on.
    pub fn with_source(mut self, source: impl Into<Source>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn with_help(mut self, text: impl Into<String>) -> Self {
        self.report.helps.push(text.into());
        self
    }

    pub fn with_note(mut self, text: impl Into<String>) -> Self {
        self.report.notes.push(text.into());
        self
    }

    /// Report-wide color scheme. Labels may still override it.
    pub fn with_scheme(mut self, scheme: impl Scheme + 'static) -> Self {
        self.scheme = Some(Arc::new(scheme));
        self
    }

    /// Start a label over `span` in source 0; follow with the label
    /// setters, then any outer-level call to surface back.
    pub fn with_label(self, span: impl Into<Span>) -> LabelBuilder {
        LabelBuilder {
            outer: self,
            label: Label::new(span.into(), 0),
        }
    }

    fn validated(&self) -> Result<(), RenderError> {
        self.report.config.validate()?;
        Ok(())
    }

    /// Render into any writer. The writer's first error aborts the
    /// render and comes back unchanged.
    pub fn render_to<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        self.validated()?;
        render(&self.report, &self.sources, self.scheme.as_deref(), out)?;
        Ok(())
    }

    pub fn render_to_string(&self) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.render_to(&mut buf)?;
        Ok(String::from_utf8(buf)
            .unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).into_owned()))
    }

    pub fn render_to_stdout(&self) -> Result<(), RenderError> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.render_to(&mut lock)
    }
}

/// Per-label setters; created by [`ReportBuilder::with_label`].
pub struct LabelBuilder {
    outer: ReportBuilder,
    label: Label,
}

impl LabelBuilder {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.label.message = Some(message.into());
        self
    }

    /// Color this label through its own scheme instead of the report's.
    pub fn with_color(mut self, scheme: impl Scheme + 'static) -> Self {
        self.label.scheme = Some(Arc::new(scheme));
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.label.order = order;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.label.priority = priority;
        self
    }

    /// Attach the label to a registered source other than 0.
    pub fn in_source(mut self, id: SourceId) -> Self {
        self.label.source = id;
        self
    }

    /// Surface back into the report builder.
    pub fn done(mut self) -> ReportBuilder {
        self.outer.report.labels.push(self.label);
        self.outer
    }

    pub fn with_label(self, span: impl Into<Span>) -> LabelBuilder {
        self.done().with_label(span)
    }

    pub fn with_source(self, source: impl Into<Source>) -> ReportBuilder {
        self.done().with_source(source)
    }

    pub fn with_help(self, text: impl Into<String>) -> ReportBuilder {
        self.done().with_help(text)
    }

    pub fn with_note(self, text: impl Into<String>) -> ReportBuilder {
        self.done().with_note(text)
    }

    pub fn with_scheme(self, scheme: impl Scheme + 'static) -> ReportBuilder {
        self.done().with_scheme(scheme)
    }

    pub fn render_to<W: Write>(self, out: &mut W) -> Result<(), RenderError> {
        self.done().render_to(out)
    }

    pub fn render_to_string(self) -> Result<String, RenderError> {
        self.done().render_to_string()
    }

    pub fn render_to_stdout(self) -> Result<(), RenderError> {
        self.done().render_to_stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_report::CharSetKind;

    fn ascii() -> Config {
        Config::new().with_char_set(CharSetKind::Ascii)
    }

    #[test]
    fn invalid_config_is_rejected_before_render() {
        let err = ReportBuilder::new(Kind::Error)
            .with_config(ascii().with_tab_width(0))
            .with_source("x")
            .render_to_string()
            .unwrap_err();
        assert!(matches!(err, RenderError::Config(ConfigError::TabWidth(0))));
    }

    #[test]
    fn builder_renders_repeatedly() {
        let b = ReportBuilder::new(Kind::Warning)
            .with_config(ascii())
            .with_source(("hello", "test.rs"))
            .with_title("again")
            .with_label(0..5)
            .with_message("once")
            .done();
        assert_eq!(
            b.render_to_string().unwrap(),
            b.render_to_string().unwrap()
        );
    }

    #[test]
    fn writer_errors_propagate_unchanged() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let err = ReportBuilder::new(Kind::Error)
            .with_config(ascii())
            .with_source("abc")
            .with_title("boom")
            .render_to(&mut Broken)
            .unwrap_err();
        match err {
            RenderError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
