//! In-memory TlvInfo image
//!
//! Owns a fixed-capacity byte buffer and keeps it internally consistent:
//! after every completed `add`/`delete`/`reset` the header length is exact
//! and the CRC record is the last record with a matching checksum.

use tracing::debug;

use crate::codes;
use crate::error::{Result, TlvError};

use super::{
    verify_checksum, Header, Record, RecordIter, CRC_RECORD_SIZE, CRC_VALUE_SIZE, HEADER_SIZE,
    RECORD_HEADER_SIZE, SIGNATURE, TLV_VALUE_MAX_LEN, VERSION,
};

/// Fixed-capacity TlvInfo image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvImage {
    buf: Vec<u8>,
}

impl TlvImage {
    /// Zero-filled buffer of `capacity` bytes (not yet a valid image)
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
        }
    }

    /// Valid image with no records besides the CRC trailer
    pub fn empty(capacity: usize) -> Result<Self> {
        let mut image = Self::new(capacity);
        image.reset()?;
        Ok(image)
    }

    /// Copy raw bytes into a `capacity`-sized buffer, zero padding or
    /// truncating as needed. No validation is performed.
    pub fn from_bytes(bytes: &[u8], capacity: usize) -> Self {
        let mut image = Self::new(capacity);
        let n = bytes.len().min(capacity);
        image.buf[..n].copy_from_slice(&bytes[..n]);
        image
    }

    // =========================================================================
    // Raw Access
    // =========================================================================

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Upper bound on the sum of all record sizes
    pub fn max_total_len(&self) -> usize {
        self.buf.len().saturating_sub(HEADER_SIZE)
    }

    /// The whole buffer, including bytes past the last record
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Header plus records: the bytes that get written to the device
    pub fn used(&self) -> &[u8] {
        let end = (HEADER_SIZE + self.total_len()).min(self.buf.len());
        &self.buf[..end]
    }

    /// Decode and validate the header
    pub fn header(&self) -> Result<Header> {
        Header::parse(&self.buf, self.max_total_len())
    }

    /// Record byte count as stored in the header (unvalidated)
    pub fn total_len(&self) -> usize {
        if self.buf.len() < HEADER_SIZE {
            return 0;
        }
        u16::from_be_bytes([self.buf[9], self.buf[10]]) as usize
    }

    fn set_total_len(&mut self, len: usize) {
        self.buf[9..11].copy_from_slice(&(len as u16).to_be_bytes());
    }

    /// Bytes still available for new records
    pub fn free_space(&self) -> usize {
        self.max_total_len().saturating_sub(self.total_len())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Walk all records from the start
    pub fn records(&self) -> RecordIter<'_> {
        let end = HEADER_SIZE + self.total_len();
        RecordIter::new(&self.buf, HEADER_SIZE, end)
    }

    /// Offset of the first record with `code`
    pub fn find(&self, code: u8) -> Result<Option<usize>> {
        Ok(self.find_record(code)?.map(|r| r.offset))
    }

    /// Value bytes of the first record with `code`
    pub fn get(&self, code: u8) -> Result<Option<&[u8]>> {
        Ok(self.find_record(code)?.map(|r| r.value))
    }

    fn find_record(&self, code: u8) -> Result<Option<Record<'_>>> {
        for record in self.records() {
            let record = record?;
            if record.code == code {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append a record, keeping the CRC record last
    ///
    /// Fails without touching the buffer if the record plus a CRC record
    /// would not fit.
    pub fn add(&mut self, code: u8, value: &[u8]) -> Result<()> {
        if code == codes::CRC_32 {
            return Err(TlvError::ReadOnlyField(code));
        }
        if !super::is_valid_code(code) {
            return Err(TlvError::Validation(format!(
                "type code 0x{:02X} is reserved",
                code
            )));
        }
        if value.len() > TLV_VALUE_MAX_LEN {
            return Err(TlvError::Validation(format!(
                "value of {} bytes exceeds record limit {}",
                value.len(),
                TLV_VALUE_MAX_LEN
            )));
        }

        let needed = RECORD_HEADER_SIZE + value.len();
        let total = self.total_len();

        // Overwrite the trailer; update_crc appends a fresh one after the record
        let (at, kept) = match self.trailer()? {
            Some((offset, size)) => (offset, total - size),
            None => (HEADER_SIZE + total, total),
        };
        if kept + needed + CRC_RECORD_SIZE > self.max_total_len() {
            return Err(TlvError::BufferFull {
                needed,
                available: self
                    .max_total_len()
                    .saturating_sub(kept + CRC_RECORD_SIZE),
            });
        }

        self.buf[at] = code;
        self.buf[at + 1] = value.len() as u8;
        self.buf[at + RECORD_HEADER_SIZE..at + needed].copy_from_slice(value);
        self.set_total_len(kept + needed);

        debug!(code = code, len = value.len(), offset = at, "added record");

        self.update_crc()
    }

    /// Remove the first record with `code`, closing the gap
    ///
    /// Returns false and leaves the buffer untouched when absent.
    pub fn delete(&mut self, code: u8) -> Result<bool> {
        if !self.delete_raw(code)? {
            return Ok(false);
        }
        self.update_crc()?;
        Ok(true)
    }

    /// Recompute the CRC record, appending one if absent
    ///
    /// Fails with `BufferFull` when there is no room left for the trailer.
    pub fn update_crc(&mut self) -> Result<()> {
        let at = match self.trailer()? {
            Some((offset, size)) if size == CRC_RECORD_SIZE => offset,
            Some((offset, size)) => {
                // Wrong-sized trailer: drop it and append a well-formed one
                self.remove_at(offset, size);
                self.append_crc_slot()?
            }
            None => self.append_crc_slot()?,
        };

        self.buf[at] = codes::CRC_32;
        self.buf[at + 1] = CRC_VALUE_SIZE as u8;

        let covered = HEADER_SIZE + self.total_len() - CRC_VALUE_SIZE;
        let crc = super::compute_crc32(&self.buf, covered);
        self.buf[at + RECORD_HEADER_SIZE..at + CRC_RECORD_SIZE].copy_from_slice(&crc.to_be_bytes());

        debug!(crc, offset = at, "updated crc");
        Ok(())
    }

    fn append_crc_slot(&mut self) -> Result<usize> {
        let total = self.total_len();
        if total + CRC_RECORD_SIZE > self.max_total_len() {
            return Err(TlvError::BufferFull {
                needed: CRC_RECORD_SIZE,
                available: self.free_space(),
            });
        }
        self.set_total_len(total + CRC_RECORD_SIZE);
        Ok(HEADER_SIZE + total)
    }

    /// Offset and size of the last record when it is a CRC record
    fn trailer(&self) -> Result<Option<(usize, usize)>> {
        let mut last = None;
        for record in self.records() {
            last = Some(record?);
        }
        Ok(last
            .filter(|r| r.code == codes::CRC_32)
            .map(|r| (r.offset, r.size())))
    }

    fn delete_raw(&mut self, code: u8) -> Result<bool> {
        let (offset, size) = match self.find_record(code)? {
            Some(record) => (record.offset, record.size()),
            None => return Ok(false),
        };

        self.remove_at(offset, size);
        debug!(code = code, size = size, offset = offset, "deleted record");
        Ok(true)
    }

    fn remove_at(&mut self, offset: usize, size: usize) {
        let total = self.total_len();
        let end = (HEADER_SIZE + total).min(self.buf.len());
        self.buf.copy_within(offset + size..end, offset);
        self.set_total_len(total - size);
    }

    /// Reset to an empty valid image: fresh header, no records, new CRC
    pub fn reset(&mut self) -> Result<()> {
        if self.buf.len() < HEADER_SIZE + CRC_RECORD_SIZE {
            return Err(TlvError::BufferFull {
                needed: HEADER_SIZE + CRC_RECORD_SIZE,
                available: self.buf.len(),
            });
        }

        self.buf[0..8].copy_from_slice(SIGNATURE);
        self.buf[8] = VERSION;
        self.set_total_len(0);
        self.buf[HEADER_SIZE..].fill(0);

        self.update_crc()
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check header and CRC trailer
    pub fn verify(&self) -> Result<()> {
        verify_checksum(&self.buf)
    }

    pub fn is_checksum_valid(&self) -> bool {
        self.verify().is_ok()
    }
}
