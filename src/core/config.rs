// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-session configuration.
//!
//! Byte order is not self-identifying in XSE streams, so it is supplied
//! by the caller. Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! wire_order = "swapped"
//! max_frame_size = 32000
//! lonflip = 0
//! interpolate_navigation = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{CodecError, Result};

/// Largest frame the scanner will buffer before giving up.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 32000;

/// Byte order of markers and numeric fields on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireOrder {
    /// Literal `$HSF` markers, big-endian numbers
    #[default]
    Native,
    /// Reversed `FSH$` markers, little-endian numbers
    Swapped,
}

impl WireOrder {
    /// True when multi-byte fields are byte-reversed.
    #[inline]
    pub fn is_swapped(self) -> bool {
        matches!(self, WireOrder::Swapped)
    }
}

/// Settings for one read or write session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Marker and field byte order
    pub wire_order: WireOrder,
    /// Maximum frame buffer size in bytes
    pub max_frame_size: usize,
    /// Longitude range for accessors: -1 => [-360,0], 0 => [-180,180], 1 => [0,360]
    pub lonflip: i32,
    /// Backfill ping navigation from navigation frames
    pub interpolate_navigation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            wire_order: WireOrder::Native,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            lonflip: 0,
            interpolate_navigation: true,
        }
    }
}

impl SessionConfig {
    /// Configuration for byte-swapped streams.
    pub fn swapped() -> Self {
        Self {
            wire_order: WireOrder::Swapped,
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SessionConfig =
            toml::from_str(text).map_err(|e| CodecError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check field ranges.
    pub fn validate(&self) -> Result<()> {
        // header plus both markers
        if self.max_frame_size < 32 {
            return Err(CodecError::config(format!(
                "max_frame_size must be at least 32, got {}",
                self.max_frame_size
            )));
        }
        if !(-1..=1).contains(&self.lonflip) {
            return Err(CodecError::config(format!(
                "lonflip must be -1, 0 or 1, got {}",
                self.lonflip
            )));
        }
        Ok(())
    }
}
