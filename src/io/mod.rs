// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for swath data formats.
//!
//! This module provides format identification, the codec trait every
//! format implements, and readers/writers that pick a codec at open time.

pub mod detection;
pub mod formats;
pub mod metadata;

// Re-exports
pub use detection::{detect_format, is_xse_file};
pub use metadata::FileFormat;

// Codec trait and the format-neutral record view
pub mod traits;
pub use traits::{BeamFlag, SwathCodec, SwathData};

// Unified reader/writer with auto-detection
pub mod reader;
pub mod writer;
pub use reader::SwathReader;
pub use writer::SwathWriter;
