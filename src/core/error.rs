// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for sonarcodec.
//!
//! Provides error types for sonar format I/O:
//! - Stream exhaustion and frame resynchronization failures
//! - Short writes on the output stream
//! - Record kinds a format cannot encode
//! - Non-error signals returned by field accessors

use std::fmt;

/// Errors that can occur while reading or writing sonar records.
#[derive(Debug, Clone)]
pub enum CodecError {
    /// Underlying stream ran out, possibly in the middle of a frame
    Eof,

    /// Data could not be interpreted
    Unintelligible {
        /// What was being decoded
        context: String,
        /// Why it was rejected
        reason: String,
    },

    /// Short or failed write on the output stream
    WriteFail {
        /// Error message
        message: String,
    },

    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Record kind that this format cannot encode
    BadKind {
        /// Kind name
        kind: String,
    },

    /// Signal: the record is a comment, not survey data
    Comment,

    /// Signal: the record is neither survey data nor a comment
    Other {
        /// Kind name
        kind: String,
    },

    /// Format recognized but not supported
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Invalid session configuration
    Config {
        /// Error message
        message: String,
    },

    /// Any other I/O failure
    Io {
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create an unintelligible data error.
    pub fn unintelligible(context: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::Unintelligible {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a write failure error.
    pub fn write_fail(message: impl Into<String>) -> Self {
        CodecError::WriteFail {
            message: message.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a bad kind error.
    pub fn bad_kind(kind: impl Into<String>) -> Self {
        CodecError::BadKind { kind: kind.into() }
    }

    /// Create an "other record" signal.
    pub fn other(kind: impl Into<String>) -> Self {
        CodecError::Other { kind: kind.into() }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CodecError::Config {
            message: message.into(),
        }
    }

    /// True for the accessor signals that mean "not a survey record".
    pub fn is_signal(&self) -> bool {
        matches!(self, CodecError::Comment | CodecError::Other { .. })
    }

    /// True when the stream ended.
    pub fn is_eof(&self) -> bool {
        matches!(self, CodecError::Eof)
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::Eof => vec![],
            CodecError::Unintelligible { context, reason } => {
                vec![("context", context.clone()), ("reason", reason.clone())]
            }
            CodecError::WriteFail { message } => vec![("message", message.clone())],
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::BadKind { kind } => vec![("kind", kind.clone())],
            CodecError::Comment => vec![("kind", "comment".to_string())],
            CodecError::Other { kind } => vec![("kind", kind.clone())],
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
            CodecError::Config { message } => vec![("message", message.clone())],
            CodecError::Io { message } => vec![("message", message.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Eof => write!(f, "End of file"),
            CodecError::Unintelligible { context, reason } => {
                write!(f, "Unintelligible data in {context}: {reason}")
            }
            CodecError::WriteFail { message } => write!(f, "Write failed: {message}"),
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::BadKind { kind } => {
                write!(f, "Record kind '{kind}' cannot be written")
            }
            CodecError::Comment => write!(f, "Comment record"),
            CodecError::Other { kind } => write!(f, "Not a survey record: '{kind}'"),
            CodecError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            CodecError::Config { message } => write!(f, "Invalid configuration: {message}"),
            CodecError::Io { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => CodecError::Eof,
            std::io::ErrorKind::WriteZero => CodecError::WriteFail {
                message: err.to_string(),
            },
            _ => CodecError::Io {
                message: err.to_string(),
            },
        }
    }
}

/// Result type for sonarcodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
