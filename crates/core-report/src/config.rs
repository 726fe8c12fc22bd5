//! Renderer configuration.
//!
//! A closed set of options with serde support so embedders can persist
//! renderer settings alongside their own configuration. Domain errors
//! are rejected by [`Config::validate`] before a render ever starts;
//! the drawing engine itself assumes a valid configuration.

use core_source::IndexType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which column of a single-line span the message arrow attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAttach {
    Start,
    #[default]
    Middle,
    End,
}

/// Glyph table selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSetKind {
    #[default]
    Unicode,
    Ascii,
}

/// Smallest `limit_width` that can still hold a margin, an ellipsis and
/// one visible column.
pub const MIN_LIMIT_WIDTH: usize = 8;

/// Invalid configuration, caught before render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tab_width must be at least 1, got {0}")]
    TabWidth(usize),
    #[error("ambi_width must be 1 or 2, got {0}")]
    AmbiWidth(u8),
    #[error("limit_width must be at least {MIN_LIMIT_WIDTH}, got {0}")]
    LimitWidth(usize),
}

/// The closed option set of the renderer. Field defaults are the serde
/// defaults, so a partially specified config file fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Draw `vbar_gap` rows across gaps between labeled lines of one
    /// multi-line group.
    pub cross_gap: bool,
    /// Omit blank gutter rows, the tail row and the margin pad space.
    pub compact: bool,
    /// Draw the underline row beneath labeled source lines.
    pub underlines: bool,
    /// Order arrow rows strictly by column instead of the natural
    /// (order, column, span length) chain.
    pub column_order: bool,
    /// Align message text to one column across each source line.
    pub align_messages: bool,
    /// Draw lane decorations for multi-line spans.
    pub multiline_arrows: bool,
    /// Tab stop width, at least 1.
    pub tab_width: usize,
    /// Maximum output line width; enables header truncation and source
    /// line windowing.
    pub limit_width: Option<usize>,
    /// Cells for ambiguous East Asian characters: 1 or 2.
    pub ambi_width: u8,
    pub label_attach: LabelAttach,
    /// Interpretation of user span coordinates.
    pub index_type: IndexType,
    /// Invoke style callbacks. When false, categories are ignored.
    pub color: bool,
    pub char_set: CharSetKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cross_gap: true,
            compact: false,
            underlines: true,
            column_order: false,
            align_messages: true,
            multiline_arrows: true,
            tab_width: 4,
            limit_width: None,
            ambi_width: 1,
            label_attach: LabelAttach::default(),
            index_type: IndexType::default(),
            color: true,
            char_set: CharSetKind::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the domain of every option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width < 1 {
            return Err(ConfigError::TabWidth(self.tab_width));
        }
        if !matches!(self.ambi_width, 1 | 2) {
            return Err(ConfigError::AmbiWidth(self.ambi_width));
        }
        match self.limit_width {
            Some(w) if w < MIN_LIMIT_WIDTH => return Err(ConfigError::LimitWidth(w)),
            _ => {}
        }
        Ok(())
    }

    pub fn with_cross_gap(mut self, enabled: bool) -> Self {
        self.cross_gap = enabled;
        self
    }

    pub fn with_compact(mut self, enabled: bool) -> Self {
        self.compact = enabled;
        self
    }

    pub fn with_underlines(mut self, enabled: bool) -> Self {
        self.underlines = enabled;
        self
    }

    pub fn with_column_order(mut self, enabled: bool) -> Self {
        self.column_order = enabled;
        self
    }

    pub fn with_align_messages(mut self, enabled: bool) -> Self {
        self.align_messages = enabled;
        self
    }

    pub fn with_multiline_arrows(mut self, enabled: bool) -> Self {
        self.multiline_arrows = enabled;
        self
    }

    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    pub fn with_limit_width(mut self, width: impl Into<Option<usize>>) -> Self {
        self.limit_width = width.into();
        self
    }

    pub fn with_ambi_width(mut self, cells: u8) -> Self {
        self.ambi_width = cells;
        self
    }

    pub fn with_label_attach(mut self, attach: LabelAttach) -> Self {
        self.label_attach = attach;
        self
    }

    pub fn with_index_type(mut self, index: IndexType) -> Self {
        self.index_type = index;
        self
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn with_char_set(mut self, kind: CharSetKind) -> Self {
        self.char_set = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documentation() {
        let c = Config::default();
        assert!(c.cross_gap && c.underlines && c.align_messages && c.multiline_arrows && c.color);
        assert!(!c.compact && !c.column_order);
        assert_eq!(c.tab_width, 4);
        assert_eq!(c.ambi_width, 1);
        assert_eq!(c.limit_width, None);
        assert_eq!(c.label_attach, LabelAttach::Middle);
        assert_eq!(c.index_type, IndexType::Char);
        assert_eq!(c.char_set, CharSetKind::Unicode);
    }

    #[test]
    fn validate_rejects_out_of_domain_values() {
        assert_eq!(
            Config::new().with_tab_width(0).validate(),
            Err(ConfigError::TabWidth(0))
        );
        assert_eq!(
            Config::new().with_ambi_width(3).validate(),
            Err(ConfigError::AmbiWidth(3))
        );
        assert_eq!(
            Config::new().with_limit_width(4).validate(),
            Err(ConfigError::LimitWidth(4))
        );
        assert!(Config::new().with_limit_width(80).validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str(
            r#"
            compact = true
            tab_width = 8
            char_set = "ascii"
            index_type = "byte"
            "#,
        )
        .unwrap();
        assert!(c.compact);
        assert_eq!(c.tab_width, 8);
        assert_eq!(c.char_set, CharSetKind::Ascii);
        assert_eq!(c.index_type, IndexType::Byte);
        // Unspecified fields keep their documented defaults.
        assert!(c.cross_gap);
        assert_eq!(c.ambi_width, 1);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let c = Config::new()
            .with_limit_width(100)
            .with_label_attach(LabelAttach::End);
        let text = toml::to_string(&c).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, c);
    }
}
