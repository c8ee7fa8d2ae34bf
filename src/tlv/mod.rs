//! TlvInfo Image Module
//!
//! Binary layout of the EEPROM contents and the in-memory image that
//! mutates it.
//!
//! ## Responsibilities
//! - Encode/decode the fixed 11-byte header
//! - Walk the packed TLV records
//! - Maintain the CRC-32 trailer record after every mutation
//!
//! ## Image Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (11 bytes)                                        │
//! │   Signature: "TlvInfo\0" (8) | Version: u8 (1)           │
//! │   TotalLen: u16 BE (2)  -- bytes of records that follow  │
//! ├──────────────────────────────────────────────────────────┤
//! │ Records (TotalLen bytes)                                 │
//! │   [Type: u8][Len: u8][Value: Len bytes]                  │
//! │   ... repeated ...                                       │
//! ├──────────────────────────────────────────────────────────┤
//! │ CRC Record (always last, 6 bytes)                        │
//! │   [0xFE][0x04][CRC32 BE over everything before it]       │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod crc;
mod header;
mod image;
mod record;

pub use crc::{compute_crc32, is_checksum_valid, verify_checksum};
pub use header::{Header, SIGNATURE, VERSION};
pub use image::TlvImage;
pub use record::{is_valid_code, Record, RecordBuf, RecordIter};

// =============================================================================
// Shared Constants
// =============================================================================

/// Header size: Signature (8) + Version (1) + TotalLen (2) = 11 bytes
pub const HEADER_SIZE: usize = 11;

/// Record header size: Type (1) + Len (1)
pub const RECORD_HEADER_SIZE: usize = 2;

/// Largest value a single record can carry (length is one byte)
pub const TLV_VALUE_MAX_LEN: usize = 255;

/// Size of the CRC-32 value
pub const CRC_VALUE_SIZE: usize = 4;

/// Full size of the CRC trailer record
pub const CRC_RECORD_SIZE: usize = RECORD_HEADER_SIZE + CRC_VALUE_SIZE;

/// Capacity of the K1-X board EEPROM image
pub const DEFAULT_CAPACITY: usize = 256;

/// Value of a blank EEPROM byte
pub const ERASED_BYTE: u8 = 0xFF;
