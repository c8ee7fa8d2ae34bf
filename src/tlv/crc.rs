//! CRC-32 checksum engine
//!
//! Standard CRC-32 (IEEE, as used by zlib) via `crc32fast`. The checksum
//! covers the header and every record byte up to, but not including, the
//! CRC record's own value.

use crate::codes;
use crate::error::{Result, TlvError};

use super::{Header, RecordIter, CRC_RECORD_SIZE, CRC_VALUE_SIZE, HEADER_SIZE};

/// CRC-32 over the first `len` bytes of `buf`
pub fn compute_crc32(buf: &[u8], len: usize) -> u32 {
    crc32fast::hash(&buf[..len.min(buf.len())])
}

/// Check the trailer of a complete image
///
/// Succeeds iff the header is valid against the buffer's own capacity, the
/// records walk cleanly up to `totallen`, the last of them is a 4-byte CRC
/// record and its stored value matches.
pub fn verify_checksum(buf: &[u8]) -> Result<()> {
    let max_total_len = buf.len().saturating_sub(HEADER_SIZE);
    let header = Header::parse(buf, max_total_len)?;

    let total_len = header.total_len as usize;
    if total_len < CRC_RECORD_SIZE {
        return Err(TlvError::MissingChecksum);
    }

    let end = HEADER_SIZE + total_len;
    let crc_at = end - CRC_RECORD_SIZE;
    if buf[crc_at] != codes::CRC_32 || buf[crc_at + 1] as usize != CRC_VALUE_SIZE {
        return Err(TlvError::MissingChecksum);
    }

    // A CRC-shaped tail inside a longer record is not a trailer
    let mut last = None;
    for record in RecordIter::new(buf, HEADER_SIZE, end) {
        last = Some(record.map_err(|_| TlvError::MissingChecksum)?.offset);
    }
    if last != Some(crc_at) {
        return Err(TlvError::MissingChecksum);
    }

    let computed = compute_crc32(buf, end - CRC_VALUE_SIZE);
    let stored = u32::from_be_bytes([
        buf[end - 4],
        buf[end - 3],
        buf[end - 2],
        buf[end - 1],
    ]);

    if computed != stored {
        return Err(TlvError::ChecksumMismatch { stored, computed });
    }

    Ok(())
}

/// Boolean form of [`verify_checksum`]
pub fn is_checksum_valid(buf: &[u8]) -> bool {
    verify_checksum(buf).is_ok()
}
