//! Manufacture date codec: `MM/DD/YYYY hh:mm:ss`, stored verbatim

use crate::error::{Result, TlvError};

pub const DATE_LEN: usize = 19;

pub fn encode(s: &str) -> Result<Vec<u8>> {
    let bytes = s.as_bytes();
    if bytes.len() != DATE_LEN {
        return Err(TlvError::Validation(format!(
            "date length {} != {}: bad date format (MM/DD/YYYY hh:mm:ss) `{}`",
            bytes.len(),
            DATE_LEN,
            s
        )));
    }

    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            2 | 5 => b == b'/',
            10 => b == b' ',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(TlvError::Validation(format!(
                "bad date format (MM/DD/YYYY hh:mm:ss) `{}`",
                s
            )));
        }
    }

    Ok(bytes.to_vec())
}
