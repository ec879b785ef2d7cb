//! Application configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! [grid]
//! days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
//! periods_per_day = 6
//!
//! [allocator]
//! teacher_order = "ascending_cap"
//!
//! [report]
//! blank_marker = "-"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TimetableError};
use crate::models::WeekGrid;
use crate::report::{RenderOptions, BLANK_MARKER};
use crate::scheduler::{GreedyAllocator, TeacherOrder};

/// Allocator settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Teacher candidate order.
    pub teacher_order: TeacherOrder,
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Text for empty cells.
    pub blank_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            blank_marker: BLANK_MARKER.to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Weekly grid.
    pub grid: WeekGrid,
    /// Allocator settings.
    pub allocator: AllocatorConfig,
    /// Report settings.
    pub report: ReportConfig,
}

impl AppConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(s).map_err(|e| TimetableError::Config(e.to_string()))?;
        config.grid.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TimetableError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// An allocator configured from these settings.
    pub fn allocator(&self) -> GreedyAllocator {
        GreedyAllocator::new()
            .with_grid(self.grid.clone())
            .with_teacher_order(self.allocator.teacher_order)
    }

    /// Render options configured from these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default().with_blank_marker(self.report.blank_marker.clone())
    }
}
