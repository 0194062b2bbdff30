//! Bounds and defaults for both simulation modes.
//!
//! Everything has a default, so an empty TOML document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};

pub const MAX_LATTICE_WIDTH: usize = 1000;   // Widest 1-D row a user may request
pub const MAX_ITERATIONS: usize = 1000;      // Most generations a 1-D run may hold
pub const MAX_BUFFER: usize = 500;          // Hidden cells allowed on each side of a 1-D row
pub const LIFE_VIEW_SIZE: usize = 80;        // Visible Life area (80x80)
pub const LIFE_MARGIN: usize = 20;           // Hidden dead border around the visible area

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_lattice_width: usize,
    pub max_iterations: usize,
    pub default_lattice_width: usize,
    pub default_iterations: usize,
    pub default_rule: u8,
    pub max_buffer: usize,
    /// Hidden cells on each side of a 1-D row; 0 shows the whole row.
    pub default_buffer: usize,
    /// Delay between automatic iterations, in milliseconds.
    pub default_delay_ms: u64,
    pub life_view_width: usize,
    pub life_view_height: usize,
    pub life_margin: usize,
    /// How many user-facing log lines are kept.
    pub message_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_lattice_width: MAX_LATTICE_WIDTH,
            max_iterations: MAX_ITERATIONS,
            default_lattice_width: 101,
            default_iterations: 100,
            default_rule: 90,
            max_buffer: MAX_BUFFER,
            default_buffer: 0,
            default_delay_ms: 750,
            life_view_width: LIFE_VIEW_SIZE,
            life_view_height: LIFE_VIEW_SIZE,
            life_margin: LIFE_MARGIN,
            message_capacity: 3,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| LatticeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LatticeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` if it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_lattice_width == 0 || self.max_iterations == 0 {
            return Err(LatticeError::Config(
                "max_lattice_width and max_iterations must be at least 1".into(),
            ));
        }
        if !(1..=self.max_lattice_width).contains(&self.default_lattice_width) {
            return Err(LatticeError::Config(format!(
                "default_lattice_width {} is outside 1..={}",
                self.default_lattice_width, self.max_lattice_width
            )));
        }
        if !(1..=self.max_iterations).contains(&self.default_iterations) {
            return Err(LatticeError::Config(format!(
                "default_iterations {} is outside 1..={}",
                self.default_iterations, self.max_iterations
            )));
        }
        if self.default_buffer > self.max_buffer {
            return Err(LatticeError::Config(format!(
                "default_buffer {} is above max_buffer {}",
                self.default_buffer, self.max_buffer
            )));
        }
        if self.life_view_width == 0 || self.life_view_height == 0 {
            return Err(LatticeError::Config("life view must not be empty".into()));
        }
        if self.message_capacity == 0 {
            return Err(LatticeError::Config("message_capacity must be at least 1".into()));
        }
        Ok(())
    }

    /// Rows/columns added per edge when live cells reach the border.
    pub fn growth_amount(&self) -> usize {
        (self.life_view_width / 2).max(1)
    }
}
