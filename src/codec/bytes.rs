//! Byte-list codec
//!
//! Parses strings like `"128 0x55 0321"` into raw bytes. Tokens are
//! separated by any run of space, tab, comma or semicolon.

use crate::error::{Result, TlvError};
use crate::tlv::TLV_VALUE_MAX_LEN;

use super::number::parse_prefix;

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',' | ';')
}

pub fn encode(s: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut rest = s;

    loop {
        rest = rest.trim_start_matches(is_separator);
        if rest.is_empty() {
            break;
        }

        if out.len() == TLV_VALUE_MAX_LEN {
            return Err(TlvError::Validation(format!(
                "too many bytes (max {}) in `{}`",
                TLV_VALUE_MAX_LEN, s
            )));
        }

        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(TlvError::Validation(format!(
                "non-digit found in byte string `{}`",
                s
            )));
        }

        let (value, tail) = parse_prefix(rest)?;
        if value > u8::MAX as u64 {
            return Err(TlvError::Validation(format!(
                "value {} is greater than 255 in `{}`",
                value, s
            )));
        }

        out.push(value as u8);
        rest = tail;
    }

    Ok(out)
}

pub fn render(value: &[u8]) -> String {
    value
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
