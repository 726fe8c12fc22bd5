//! Pretty compiler-style diagnostic reports.
//!
//! marginalia takes a structured description of an error — a title, an
//! optional code, labeled spans with messages, help and note footers —
//! and draws a rustc-style multi-line text report: line-number margins,
//! underlines, arrow connectors, multi-line span lanes, optional ANSI
//! color, and Unicode-aware column arithmetic (tabs, combining marks,
//! ZWJ emoji, CJK wide glyphs) that keeps everything vertically aligned.
//!
//! ```
//! use marginalia::{CharSetKind, Config, Kind, ReportBuilder};
//!
//! let out = ReportBuilder::new(Kind::Error)
//!     .with_config(Config::new().with_char_set(CharSetKind::Ascii))
//!     .with_source(("apple == orange;", "demo.rs"))
//!     .with_title("can't compare apples with oranges")
//!     .with_label(0..5)
//!     .with_message("This is an apple")
//!     .with_label(9..15)
//!     .with_message("This is an orange")
//!     .render_to_string()
//!     .unwrap();
//! assert!(out.contains("This is an apple"));
//! assert!(out.starts_with("Error: can't compare apples with oranges"));
//! ```
//!
//! The crate is a façade: column arithmetic lives in `core-text`, the
//! source model in `core-source`, planning in `core-layout` and drawing
//! in `core-render`. Everything needed for ordinary use is re-exported
//! here.

mod builder;

pub use builder::{LabelBuilder, RenderError, ReportBuilder};
pub use core_render::{render, render_to_string};
pub use core_report::{
    AnsiScheme, CharSetKind, Config, ConfigError, Kind, Label, LabelAttach, Report, Scheme,
    SourceMap, StyleCategory,
};
pub use core_source::{IndexType, Source, SourceId, Span};
pub use core_text::AmbiWidth;
