//! Error types for the TlvInfo store
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using TlvError
pub type Result<T> = std::result::Result<T, TlvError>;

/// Unified error type for TlvInfo operations
#[derive(Debug, Error)]
pub enum TlvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error at offset {offset} ({len} bytes): {reason}")]
    Transport {
        offset: u32,
        len: usize,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Image Errors
    // -------------------------------------------------------------------------
    #[error("Invalid TlvInfo header: {0}")]
    InvalidHeader(String),

    #[error("Checksum mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("No CRC-32 trailer record")]
    MissingChecksum,

    #[error("Malformed record 0x{code:02X} at offset {offset}")]
    MalformedRecord { offset: usize, code: u8 },

    #[error("Not enough room: need {needed} bytes, {available} available")]
    BufferFull { needed: usize, available: usize },

    // -------------------------------------------------------------------------
    // Field Errors
    // -------------------------------------------------------------------------
    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Type 0x{0:02X} is managed by the store and cannot be set manually")]
    ReadOnlyField(u8),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid command: {0}")]
    Command(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TlvError {
    /// Shorthand for a bus failure at `offset` covering `len` bytes
    pub(crate) fn transport(offset: u32, len: usize, reason: impl Into<String>) -> Self {
        TlvError::Transport {
            offset,
            len,
            reason: reason.into(),
        }
    }
}
