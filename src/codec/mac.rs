//! Ethernet address codec: `XX:XX:XX:XX:XX:XX` to six bytes

use crate::error::{Result, TlvError};

pub const MAC_STR_LEN: usize = 17;
pub const MAC_LEN: usize = 6;

/// Rejects all-zero, broadcast and multicast addresses
pub fn is_valid_ethaddr(addr: &[u8; MAC_LEN]) -> bool {
    let zero = addr.iter().all(|&b| b == 0x00);
    let multicast = addr[0] & 0x01 != 0;
    !zero && !multicast
}

pub fn encode(s: &str) -> Result<Vec<u8>> {
    let bytes = s.as_bytes();
    if bytes.len() != MAC_STR_LEN {
        return Err(TlvError::Validation(format!(
            "MAC address length {} != {}: `{}`",
            bytes.len(),
            MAC_STR_LEN,
            s
        )));
    }

    for (i, &b) in bytes.iter().enumerate() {
        let ok = if i % 3 == 2 {
            b == b':'
        } else {
            b.is_ascii_hexdigit()
        };
        if !ok {
            return Err(TlvError::Validation(format!(
                "bad MAC address format at position {}: `{}`",
                i, s
            )));
        }
    }

    let mut addr = [0u8; MAC_LEN];
    for (slot, pair) in addr.iter_mut().zip(s.split(':')) {
        *slot = u8::from_str_radix(pair, 16)
            .map_err(|e| TlvError::Validation(format!("bad MAC octet `{}`: {}", pair, e)))?;
    }

    if !is_valid_ethaddr(&addr) {
        return Err(TlvError::Validation(format!(
            "MAC address must not be 00:00:00:00:00:00, a multicast address or FF:FF:FF:FF:FF:FF: `{}`",
            s
        )));
    }

    Ok(addr.to_vec())
}

pub fn render(value: &[u8]) -> String {
    value
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}
