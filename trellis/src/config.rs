//! Host configuration.
//!
//! Everything a host needs before the first layout pass: the initial client
//! area, debug switches, and the metrics used to estimate text size when no
//! real text shaper is wired in.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::primitives::Size;

/// Configuration for a [`Host`](crate::host::Host).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Window title.
    pub title: String,

    /// Initial client area width.
    pub client_width: f32,

    /// Initial client area height.
    pub client_height: f32,

    /// Log the arranged tree after every layout pass.
    pub debug_layout: bool,

    /// Average glyph advance as a fraction of font size.
    pub text_char_width: f32,

    /// Line height as a fraction of font size.
    pub text_line_height: f32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: String::from("Trellis"),
            client_width: 800.0,
            client_height: 600.0,
            debug_layout: false,
            text_char_width: 0.6,
            text_line_height: 1.2,
        }
    }
}

impl HostConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Reject values no layout pass could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.client_width > 0.0 && self.client_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "client size must be positive, got {}x{}",
                self.client_width, self.client_height
            )));
        }
        if !(self.text_char_width > 0.0 && self.text_line_height > 0.0) {
            return Err(ConfigError::Invalid(String::from(
                "text metrics must be positive",
            )));
        }
        Ok(())
    }

    pub fn client_size(&self) -> Size {
        Size::new(self.client_width, self.client_height)
    }
}
