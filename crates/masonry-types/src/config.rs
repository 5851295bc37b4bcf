//! Board configuration.
//!
//! Loaded from TOML; every field has a default matching the stock
//! three-column page, so an empty document is a valid config.

use std::path::Path;

use serde::Deserialize;

use crate::error::{BoardError, Result};

/// Grid geometry and gesture limits for a board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Initial width of the grid container in pixels.
    pub grid_width: f32,
    /// Document-relative top of the grid container.
    pub grid_top: f32,
    /// Number of columns.
    pub column_count: u32,
    /// Gap between columns and between stacked children, in pixels.
    pub gap: f32,
    /// Height of each column's structural header, if columns have one.
    pub header_height: Option<f32>,
    /// Height given to new cards before any resize.
    pub default_card_height: f32,
    /// Smallest width a resize gesture can produce.
    pub min_card_width: f32,
    /// Smallest height a resize gesture can produce.
    pub min_card_height: f32,
    /// Viewport widths at or below this reset explicit card sizes.
    pub compact_breakpoint: f32,
    /// Upper bound on the span a resize can snap to.
    pub max_span: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_width: 940.0,
            grid_top: 0.0,
            column_count: 3,
            gap: 20.0,
            header_height: None,
            default_card_height: 200.0,
            min_card_width: 200.0,
            min_card_height: 150.0,
            compact_breakpoint: 768.0,
            max_span: 3,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a config from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::warn!(
                "Board config '{}' not found -- using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Reject configs the layout cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.column_count == 0 {
            return Err(BoardError::Config(
                "column_count must be at least 1".into(),
            ));
        }
        if self.max_span == 0 {
            return Err(BoardError::Config("max_span must be at least 1".into()));
        }
        if !(self.gap >= 0.0) {
            return Err(BoardError::Config(format!(
                "gap must be non-negative, got {}",
                self.gap
            )));
        }
        if !(self.grid_width > 0.0) {
            return Err(BoardError::Config(format!(
                "grid_width must be positive, got {}",
                self.grid_width
            )));
        }
        if let Some(h) = self.header_height {
            if !(h >= 0.0) {
                return Err(BoardError::Config(format!(
                    "header_height must be non-negative, got {h}"
                )));
            }
        }
        Ok(())
    }
}
