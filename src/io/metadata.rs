// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Swath file format identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Swath data file formats known to the library.
///
/// Only [`FileFormat::Xse`] has a codec; the others are recognized so that
/// opening them reports [`CodecError::Unsupported`] instead of garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// XSE multibeam/sidescan frames
    Xse,
    /// MGD77 underway geophysics, fixed-width text
    Mgd77,
    /// MGD77T tab-delimited text
    Mgd77Tab,
    /// Hydrographic 1993 soundings
    Hydrob93,
    /// ROV navigation text
    SoiRovNv,
    /// USBL navigation text
    SoiUsbln,
    /// Unknown format
    Unknown,
}

impl FileFormat {
    /// All named formats.
    pub const ALL: [FileFormat; 6] = [
        FileFormat::Xse,
        FileFormat::Mgd77,
        FileFormat::Mgd77Tab,
        FileFormat::Hydrob93,
        FileFormat::SoiRovNv,
        FileFormat::SoiUsbln,
    ];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Xse => "xse",
            FileFormat::Mgd77 => "mgd77",
            FileFormat::Mgd77Tab => "mgd77tab",
            FileFormat::Hydrob93 => "hydrob93",
            FileFormat::SoiRovNv => "soirovnv",
            FileFormat::SoiUsbln => "soiusbln",
            FileFormat::Unknown => "unknown",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Xse => "xse",
            FileFormat::Mgd77 => "a77",
            FileFormat::Mgd77Tab => "h77t",
            FileFormat::Hydrob93 => "h93",
            FileFormat::SoiRovNv => "nv",
            FileFormat::SoiUsbln => "usbl",
            FileFormat::Unknown => "",
        }
    }

    /// Parse a format name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Map a file extension to a format.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "xse" | "mb94" => FileFormat::Xse,
            "a77" => FileFormat::Mgd77,
            "h77t" => FileFormat::Mgd77Tab,
            "h93" => FileFormat::Hydrob93,
            "nv" => FileFormat::SoiRovNv,
            "usbl" => FileFormat::SoiUsbln,
            _ => FileFormat::Unknown,
        }
    }

    /// True when a codec is available.
    pub fn is_supported(&self) -> bool {
        matches!(self, FileFormat::Xse)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CodecError::unsupported(format!("format '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(FileFormat::from_name("XSE"), Some(FileFormat::Xse));
        assert_eq!(FileFormat::from_name("mgd77"), Some(FileFormat::Mgd77));
        assert_eq!(FileFormat::from_name("mgd77tab"), Some(FileFormat::Mgd77Tab));
        assert_eq!(FileFormat::from_name("tar"), None);
        assert!("nope".parse::<FileFormat>().is_err());
    }

    #[test]
    fn test_extension_mapping() {
        for format in FileFormat::ALL {
            assert_eq!(FileFormat::from_extension(format.extension()), format);
        }
        assert_eq!(FileFormat::from_extension("MB94"), FileFormat::Xse);
        assert_eq!(FileFormat::from_extension("txt"), FileFormat::Unknown);
    }

    #[test]
    fn test_only_xse_supported() {
        assert!(FileFormat::Xse.is_supported());
        assert!(!FileFormat::Hydrob93.is_supported());
        assert_eq!(FileFormat::SoiUsbln.to_string(), "soiusbln");
    }
}
