//! Geometry planning for diagnostic reports.
//!
//! Everything here is pure bookkeeping: which labels land on which
//! lines, in what order their arrows stack, which gutter lane each
//! multi-line span occupies, and which slice of an overlong line stays
//! visible. The drawing engine consumes these plans verbatim; no layout
//! decision is made while bytes are being emitted.

pub mod linemap;
pub mod plan;
pub mod window;

pub use linemap::{LineMap, MappedSegment, tail_fitting};
pub use plan::{Entry, EntryKind, Group, Lane, Placed, line_entries, plan};
pub use window::{ELLIPSIS_COLS, Window, plan_windows};
