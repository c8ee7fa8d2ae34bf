//! TlvInfo header codec

use crate::error::{Result, TlvError};

use super::HEADER_SIZE;

/// Signature identifying a TlvInfo image, NUL-terminated
pub const SIGNATURE: &[u8; 8] = b"TlvInfo\0";

/// The only supported format version
pub const VERSION: u8 = 1;

/// Decoded image header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version byte
    pub version: u8,
    /// Bytes of records following the header
    pub total_len: u16,
}

impl Header {
    /// Header of an image with no records
    pub fn empty() -> Self {
        Self {
            version: VERSION,
            total_len: 0,
        }
    }

    /// Parse and validate the first `HEADER_SIZE` bytes of `bytes`
    ///
    /// Valid iff the signature matches exactly, the version is `VERSION`
    /// and `total_len <= max_total_len`.
    pub fn parse(bytes: &[u8], max_total_len: usize) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(TlvError::InvalidHeader(format!(
                "expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        if &bytes[0..8] != SIGNATURE {
            return Err(TlvError::InvalidHeader(format!(
                "bad signature {:02X?}",
                &bytes[0..8]
            )));
        }

        let version = bytes[8];
        if version != VERSION {
            return Err(TlvError::InvalidHeader(format!(
                "unsupported version {}",
                version
            )));
        }

        let total_len = u16::from_be_bytes([bytes[9], bytes[10]]);
        if total_len as usize > max_total_len {
            return Err(TlvError::InvalidHeader(format!(
                "total length {} exceeds maximum {}",
                total_len, max_total_len
            )));
        }

        Ok(Self { version, total_len })
    }

    /// Encode to the on-device byte layout
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..8].copy_from_slice(SIGNATURE);
        out[8] = self.version;
        out[9..11].copy_from_slice(&self.total_len.to_be_bytes());
        out
    }
}
