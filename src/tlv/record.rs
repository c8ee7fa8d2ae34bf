//! TLV record decoding
//!
//! Records are walked fresh on every call; there is no persistent cursor.

use crate::error::{Result, TlvError};

use super::RECORD_HEADER_SIZE;

/// Type codes 0x00 and 0xFF mark blank or erased storage
pub fn is_valid_code(code: u8) -> bool {
    code != 0x00 && code != 0xFF
}

/// A record borrowed from an image buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Offset of the type byte from the start of the image
    pub offset: usize,
    pub code: u8,
    pub value: &'a [u8],
}

impl<'a> Record<'a> {
    /// Bytes occupied including the type/length prefix
    pub fn size(&self) -> usize {
        RECORD_HEADER_SIZE + self.value.len()
    }

    /// Offset one past the last value byte
    pub fn end(&self) -> usize {
        self.offset + self.size()
    }

    pub fn to_buf(&self) -> RecordBuf {
        RecordBuf {
            offset: self.offset,
            code: self.code,
            value: self.value.to_vec(),
        }
    }
}

/// An owned copy of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBuf {
    pub offset: usize,
    pub code: u8,
    pub value: Vec<u8>,
}

/// Iterator over the records between `start` and `end`
///
/// Yields `MalformedRecord` and stops when a reserved type code is met or a
/// record runs past `end`.
pub struct RecordIter<'a> {
    buf: &'a [u8],
    cursor: usize,
    end: usize,
    done: bool,
}

impl<'a> RecordIter<'a> {
    pub fn new(buf: &'a [u8], start: usize, end: usize) -> Self {
        Self {
            buf,
            cursor: start,
            end: end.min(buf.len()),
            done: false,
        }
    }

    fn malformed(&mut self, code: u8) -> Option<Result<Record<'a>>> {
        self.done = true;
        Some(Err(TlvError::MalformedRecord {
            offset: self.cursor,
            code,
        }))
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor >= self.end {
            return None;
        }

        let code = self.buf[self.cursor];
        if !is_valid_code(code) {
            return self.malformed(code);
        }

        // Type byte present but length byte cut off by the end of records
        if self.cursor + RECORD_HEADER_SIZE > self.end {
            return self.malformed(code);
        }

        let len = self.buf[self.cursor + 1] as usize;
        let value_start = self.cursor + RECORD_HEADER_SIZE;
        let value_end = value_start + len;
        if value_end > self.end {
            return self.malformed(code);
        }

        let record = Record {
            offset: self.cursor,
            code,
            value: &self.buf[value_start..value_end],
        };
        self.cursor = value_end;

        Some(Ok(record))
    }
}
