// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout sonarcodec.
//!
//! - [`CodecError`] - error and signal kinds
//! - [`SessionConfig`] - per-session settings
//! - [`WireOrder`] - marker and field byte order

pub mod config;
pub mod error;

pub use config::{SessionConfig, WireOrder, DEFAULT_MAX_FRAME_SIZE};
pub use error::{CodecError, Result};
