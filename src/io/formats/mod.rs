// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File format implementations for swath data.
//!
//! - [`xse`]: XSE multibeam and sidescan frames

pub mod xse;
