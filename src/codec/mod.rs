//! Value Codecs
//!
//! Converts user-facing strings to record payloads and back, per field type.
//!
//! | Kind    | Input                          | Payload            |
//! |---------|--------------------------------|--------------------|
//! | Text    | any string                     | raw bytes (≤ 255)  |
//! | U8      | number < 256                   | 1 byte             |
//! | U16     | number < 65536                 | 2 bytes, BE        |
//! | Date    | `MM/DD/YYYY hh:mm:ss`          | 19 bytes, verbatim |
//! | Mac     | `XX:XX:XX:XX:XX:XX`            | 6 bytes            |
//! | Bytes   | `"1 0x02,3;4"`                 | 1 byte per token   |
//! | Crc     | rejected (store-managed)       | 4 bytes, BE        |
//!
//! Inputs are validated before the store is touched.

mod bytes;
mod date;
mod mac;
mod number;

pub use date::DATE_LEN;
pub use mac::{is_valid_ethaddr, MAC_LEN, MAC_STR_LEN};
pub use number::parse_unsigned;

use crate::codes;
use crate::error::{Result, TlvError};
use crate::tlv::TLV_VALUE_MAX_LEN;

/// Payload encoding of a type code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    U8,
    U16,
    Date,
    Mac,
    Bytes,
    Crc,
}

impl FieldKind {
    /// Encoding used for `code`; unknown codes take the byte-list form
    pub fn for_code(code: u8) -> Self {
        match code {
            codes::PRODUCT_NAME
            | codes::PART_NUMBER
            | codes::SERIAL_NUMBER
            | codes::LABEL_REVISION
            | codes::PLATFORM_NAME
            | codes::ONIE_VERSION
            | codes::MANUF_NAME
            | codes::MANUF_COUNTRY
            | codes::VENDOR_NAME
            | codes::DIAG_VERSION
            | codes::SERVICE_TAG
            | codes::DDR_TYPE => FieldKind::Text,
            codes::DEVICE_VERSION => FieldKind::U8,
            codes::MAC_SIZE => FieldKind::U16,
            codes::MANUF_DATE => FieldKind::Date,
            codes::MAC_BASE => FieldKind::Mac,
            codes::CRC_32 => FieldKind::Crc,
            _ => FieldKind::Bytes,
        }
    }

    /// Validate `input` and produce the record payload
    pub fn encode(self, input: &str) -> Result<Vec<u8>> {
        match self {
            FieldKind::Text => {
                let raw = input.as_bytes();
                Ok(raw[..raw.len().min(TLV_VALUE_MAX_LEN)].to_vec())
            }
            FieldKind::U8 => number::encode_u8(input),
            FieldKind::U16 => number::encode_u16(input),
            FieldKind::Date => date::encode(input),
            FieldKind::Mac => mac::encode(input),
            FieldKind::Bytes => bytes::encode(input),
            FieldKind::Crc => Err(TlvError::ReadOnlyField(codes::CRC_32)),
        }
    }

    /// Format a stored payload for display
    ///
    /// Payloads whose size does not match the kind fall back to the
    /// byte-list form.
    pub fn render(self, value: &[u8]) -> String {
        match self {
            FieldKind::Text | FieldKind::Date => String::from_utf8_lossy(value).into_owned(),
            FieldKind::U8 if value.len() == 1 => value[0].to_string(),
            FieldKind::U16 if value.len() == 2 => {
                u16::from_be_bytes([value[0], value[1]]).to_string()
            }
            FieldKind::Mac if value.len() == MAC_LEN => mac::render(value),
            FieldKind::Crc if value.len() == 4 => {
                format!(
                    "0x{:08X}",
                    u32::from_be_bytes([value[0], value[1], value[2], value[3]])
                )
            }
            _ => bytes::render(value),
        }
    }
}

/// Encode `input` for the field stored under `code`
pub fn encode_for_code(code: u8, input: &str) -> Result<Vec<u8>> {
    FieldKind::for_code(code).encode(input)
}

/// Render the payload stored under `code`
pub fn render_for_code(code: u8, value: &[u8]) -> String {
    FieldKind::for_code(code).render(value)
}
