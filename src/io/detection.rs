// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format detection using frame markers and file extensions.
//!
//! XSE files are recognized by a frame start marker, in either byte order,
//! within the first KiB. Everything else falls back to the extension.
//!
//! # Example
//!
//! ```rust,no_run
//! use sonarcodec::io::detection::detect_format;
//! use sonarcodec::io::metadata::FileFormat;
//!
//! let format = detect_format("line.xse")?;
//! assert_eq!(format, FileFormat::Xse);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::WireOrder;
use crate::io::formats::xse::constants::Marker;
use crate::CodecError;

use super::metadata::FileFormat;

/// Bytes inspected for a frame marker.
pub const PROBE_SIZE: usize = 1024;

/// Try to detect the file format from the file content, then the extension.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<FileFormat, CodecError> {
    let path_ref = path.as_ref();

    match detect_from_magic(path_ref) {
        Ok(FileFormat::Unknown) | Err(_) => {}
        Ok(format) => return Ok(format),
    }

    Ok(detect_from_extension(path_ref))
}

/// Detect format by looking for a frame marker.
fn detect_from_magic(path: &Path) -> Result<FileFormat, CodecError> {
    let mut file = File::open(path)?;
    let mut header = Vec::with_capacity(PROBE_SIZE);
    file.by_ref()
        .take(PROBE_SIZE as u64)
        .read_to_end(&mut header)?;
    Ok(detect_from_bytes(&header))
}

/// Detect format from the leading bytes of a file.
pub fn detect_from_bytes(header: &[u8]) -> FileFormat {
    let native = Marker::FrameStart.bytes(WireOrder::Native);
    let swapped = Marker::FrameStart.bytes(WireOrder::Swapped);
    if header
        .windows(4)
        .any(|w| w == native.as_slice() || w == swapped.as_slice())
    {
        FileFormat::Xse
    } else {
        FileFormat::Unknown
    }
}

/// Byte order of the first frame marker, if any.
pub fn detect_wire_order(header: &[u8]) -> Option<WireOrder> {
    let native = Marker::FrameStart.bytes(WireOrder::Native);
    let swapped = Marker::FrameStart.bytes(WireOrder::Swapped);
    header.windows(4).find_map(|w| {
        if w == native.as_slice() {
            Some(WireOrder::Native)
        } else if w == swapped.as_slice() {
            Some(WireOrder::Swapped)
        } else {
            None
        }
    })
}

/// Detect format from file extension (fallback).
fn detect_from_extension(path: &Path) -> FileFormat {
    path.extension()
        .and_then(|e| e.to_str())
        .map(FileFormat::from_extension)
        .unwrap_or(FileFormat::Unknown)
}

/// Check if a file is likely an XSE file.
pub fn is_xse_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format(path), Ok(FileFormat::Xse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_temp_file(name: &str, ext: &str, data: &[u8]) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "sonarcodec_test_detect_{}_{}.{}",
            std::process::id(),
            name,
            ext
        ));
        {
            let mut temp_file = File::create(&path).unwrap();
            temp_file.write_all(data).unwrap();
            temp_file.flush().unwrap();
        }
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_detect_marker_any_extension() {
        let path = create_temp_file("magic", "bin", b"\0\0junk$HSF\0\0\0\0");

        assert_eq!(detect_format(&path).unwrap(), FileFormat::Xse);
        assert!(is_xse_file(&path));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_detect_swapped_marker() {
        assert_eq!(detect_from_bytes(b"FSH$...."), FileFormat::Xse);
        assert_eq!(detect_wire_order(b"..FSH$"), Some(WireOrder::Swapped));
        assert_eq!(detect_wire_order(b"$HSF"), Some(WireOrder::Native));
        assert_eq!(detect_wire_order(b"HSF$"), None);
    }

    #[test]
    fn test_detect_from_extension() {
        let path = create_temp_file("ext_h93", "h93", b"0123456789");

        assert_eq!(detect_format(&path).unwrap(), FileFormat::Hydrob93);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_uses_extension() {
        assert_eq!(
            detect_format("/nonexistent/dir/line.mb94").unwrap(),
            FileFormat::Xse
        );
    }

    #[test]
    fn test_unknown_format() {
        let path = create_temp_file("unknown", "xyz", b"unknown content");

        assert_eq!(detect_format(&path).unwrap(), FileFormat::Unknown);

        let _ = std::fs::remove_file(&path);
    }
}
