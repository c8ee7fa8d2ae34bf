//! Unsigned number parsing with C radix prefixes
//!
//! `0x`/`0X` selects hex, a leading `0` selects octal, anything else is
//! decimal. Parsing stops at the first character that is not a digit of the
//! selected radix, like `strtoul(s, &end, 0)`.

use crate::error::{Result, TlvError};

/// Parse the longest numeric prefix of `s`; returns the value and the rest
///
/// `s` must start with a decimal digit.
pub(crate) fn parse_prefix(s: &str) -> Result<(u64, &str)> {
    let bytes = s.as_bytes();
    if bytes.first().map_or(true, |b| !b.is_ascii_digit()) {
        return Err(TlvError::Validation(format!("expected a number, found `{}`", s)));
    }

    let (radix, start) = if bytes.len() > 2
        && bytes[0] == b'0'
        && (bytes[1] == b'x' || bytes[1] == b'X')
        && bytes[2].is_ascii_hexdigit()
    {
        (16, 2)
    } else if bytes[0] == b'0' {
        (8, 0)
    } else {
        (10, 0)
    };

    let mut value: u64 = 0;
    let mut pos = start;
    while pos < bytes.len() {
        let digit = match (bytes[pos] as char).to_digit(radix) {
            Some(d) => d as u64,
            None => break,
        };
        value = value
            .checked_mul(radix as u64)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| TlvError::Validation(format!("number too large: `{}`", s)))?;
        pos += 1;
    }

    Ok((value, &s[pos..]))
}

/// Parse a whole string as one unsigned number
pub fn parse_unsigned(s: &str) -> Result<u64> {
    let trimmed = s.trim();
    let (value, rest) = parse_prefix(trimmed)?;
    if !rest.is_empty() {
        return Err(TlvError::Validation(format!(
            "trailing characters `{}` after number in `{}`",
            rest, s
        )));
    }
    Ok(value)
}

/// Decimal string to one byte (must be < 256)
pub fn encode_u8(s: &str) -> Result<Vec<u8>> {
    let value = parse_unsigned(s)?;
    if value > u8::MAX as u64 {
        return Err(TlvError::Validation(format!(
            "value must be 255 or less, got {}",
            value
        )));
    }
    Ok(vec![value as u8])
}

/// Decimal string to two big-endian bytes (must be < 65536)
pub fn encode_u16(s: &str) -> Result<Vec<u8>> {
    let value = parse_unsigned(s)?;
    if value > u16::MAX as u64 {
        return Err(TlvError::Validation(format!(
            "value must be 65535 or less, got {}",
            value
        )));
    }
    Ok((value as u16).to_be_bytes().to_vec())
}
