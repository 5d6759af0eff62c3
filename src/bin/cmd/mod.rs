// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod comment;
mod copy;
mod dump;
mod info;

pub use comment::CommentCmd;
pub use copy::CopyCmd;
pub use dump::DumpCmd;
pub use info::InfoCmd;
