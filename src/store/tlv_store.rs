//! TlvStore implementation

use tracing::{debug, info, warn};

use crate::codec;
use crate::codes;
use crate::config::Config;
use crate::error::{Result, TlvError};
use crate::tlv::{Header, RecordBuf, TlvImage, ERASED_BYTE, HEADER_SIZE, RECORD_HEADER_SIZE};
use crate::transport::ByteTransport;

/// Where the in-memory image stands relative to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Nothing read yet
    Unloaded,
    /// Image matches what was last read from or written to the device
    Loaded,
    /// Image has changes not yet flushed
    Dirty,
}

/// Why a load discarded the device contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCause {
    InvalidHeader,
    ChecksumMismatch,
}

/// Result of `TlvStore::load`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Device contents were valid and are now cached
    Loaded,
    /// A previous load is still cached; the device was not read
    AlreadyLoaded,
    /// Device contents were invalid; the image was reset to empty
    Recovered(RecoveryCause),
}

/// TlvInfo store over a byte transport
///
/// Single owner of the image. Wrap in `SharedTlvStore` to use from more
/// than one thread.
pub struct TlvStore<T: ByteTransport> {
    transport: T,
    image: TlvImage,
    state: StoreState,
}

impl<T: ByteTransport> TlvStore<T> {
    /// Create an unloaded store sized by `config.capacity`
    pub fn new(transport: T, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            image: TlvImage::new(config.capacity),
            state: StoreState::Unloaded,
        })
    }

    // =========================================================================
    // Load / Flush
    // =========================================================================

    /// Read the image from the device, once
    ///
    /// Later calls return `AlreadyLoaded` without touching the device, so
    /// changes made to the device by anyone else go unnoticed until
    /// `reload()`. A transport error leaves the store unloaded.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        if self.state != StoreState::Unloaded {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let capacity = self.image.capacity();
        let mut scratch = TlvImage::new(capacity);

        self.transport
            .read(0, &mut scratch.as_mut_bytes()[..HEADER_SIZE])?;

        let cause = match Header::parse(scratch.as_bytes(), scratch.max_total_len()) {
            Ok(header) => {
                let len = header.total_len as usize;
                self.transport.read(
                    HEADER_SIZE as u32,
                    &mut scratch.as_mut_bytes()[HEADER_SIZE..HEADER_SIZE + len],
                )?;

                match scratch.verify() {
                    Ok(()) => None,
                    Err(e) => {
                        warn!(error = %e, "eeprom checksum invalid");
                        Some(RecoveryCause::ChecksumMismatch)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "eeprom header invalid");
                Some(RecoveryCause::InvalidHeader)
            }
        };

        let outcome = match cause {
            None => {
                info!(total_len = scratch.total_len(), "loaded tlvinfo from eeprom");
                self.state = StoreState::Loaded;
                LoadOutcome::Loaded
            }
            Some(cause) => {
                info!(?cause, "resetting to an empty tlvinfo image");
                scratch.reset()?;
                self.state = StoreState::Dirty;
                LoadOutcome::Recovered(cause)
            }
        };

        self.image = scratch;
        Ok(outcome)
    }

    /// Drop the cached image and read the device again
    pub fn reload(&mut self) -> Result<LoadOutcome> {
        self.state = StoreState::Unloaded;
        self.load()
    }

    fn ensure_loaded(&mut self) -> Result<()> {
        self.load().map(|_| ())
    }

    /// Write header and records back to the device
    ///
    /// On transport failure the image stays dirty and the device may hold a
    /// partial write.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        self.image.update_crc()?;

        let used = self.image.used();
        self.transport.write(0, used)?;

        info!(bytes = used.len(), "flushed tlvinfo to eeprom");
        self.state = StoreState::Loaded;
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Offset of the first record with `code`
    pub fn find(&mut self, code: u8) -> Result<Option<usize>> {
        self.ensure_loaded()?;
        self.image.find(code)
    }

    /// Copy of the value bytes of the first record with `code`
    pub fn get(&mut self, code: u8) -> Result<Option<Vec<u8>>> {
        self.ensure_loaded()?;
        Ok(self.image.get(code)?.map(|v| v.to_vec()))
    }

    /// All records in storage order, CRC record included
    pub fn records(&mut self) -> Result<Vec<RecordBuf>> {
        self.ensure_loaded()?;
        self.image
            .records()
            .map(|r| r.map(|r| r.to_buf()))
            .collect()
    }

    /// Rendered value of a named field (or numeric code)
    pub fn get_field(&mut self, key: &str) -> Result<Option<String>> {
        let code = codes::resolve(key)?;
        Ok(self
            .get(code)?
            .map(|value| codec::render_for_code(code, &value)))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append an already-encoded record before the CRC record
    pub fn add(&mut self, code: u8, value: &[u8]) -> Result<()> {
        self.ensure_loaded()?;
        if let Err(e) = self.image.add(code, value) {
            warn!(code, len = value.len(), error = %e, "add rejected");
            return Err(e);
        }
        self.state = StoreState::Dirty;
        Ok(())
    }

    /// Remove the first record with `code`; false if absent
    pub fn delete(&mut self, code: u8) -> Result<bool> {
        self.ensure_loaded()?;
        let removed = self.image.delete(code)?;
        if removed {
            self.state = StoreState::Dirty;
        }
        Ok(removed)
    }

    /// Replace every record with `code` by one holding the encoded `value`,
    /// or just remove them when `value` is `None`
    ///
    /// The value is validated and the space checked before anything is
    /// removed, so a rejected set leaves the image unchanged. The new record
    /// always lands at the end, just before the CRC record.
    pub fn set(&mut self, code: u8, value: Option<&str>) -> Result<()> {
        if code == codes::CRC_32 {
            return Err(TlvError::ReadOnlyField(code));
        }
        self.ensure_loaded()?;

        let encoded = match value {
            Some(input) => match codec::encode_for_code(code, input) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!(code, error = %e, "value rejected");
                    return Err(e);
                }
            },
            None => None,
        };

        if let Some(bytes) = &encoded {
            let reclaimed: usize = self
                .image
                .records()
                .filter_map(|r| match r {
                    Ok(r) if r.code == code => Some(Ok(r.size())),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                })
                .sum::<Result<usize>>()?;

            let needed = RECORD_HEADER_SIZE + bytes.len();
            let available = self.image.free_space() + reclaimed;
            if needed > available {
                warn!(code, needed, available, "not enough room in eeprom");
                return Err(TlvError::BufferFull { needed, available });
            }
        }

        let mut removed = 0;
        while self.image.delete(code)? {
            removed += 1;
        }
        if removed > 0 {
            self.state = StoreState::Dirty;
        }

        if let Some(bytes) = encoded {
            self.image.add(code, &bytes)?;
            self.state = StoreState::Dirty;
        }

        debug!(code, removed, "set field");
        Ok(())
    }

    /// `set` addressed by field name or numeric code
    pub fn set_field(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let code = codes::resolve(key)?;
        self.set(code, value)
    }

    /// Reset the image to an empty valid one (header + CRC only)
    pub fn erase(&mut self) -> Result<()> {
        self.image.reset()?;
        self.state = StoreState::Dirty;
        info!("erased tlvinfo image");
        Ok(())
    }

    /// `erase`, then rewrite the whole device area
    ///
    /// Writes the empty image followed by blank bytes up to the capacity,
    /// so no old record bytes remain past the new end. On transport
    /// failure the image stays dirty.
    pub fn erase_device(&mut self) -> Result<()> {
        self.erase()?;

        let mut blank = vec![ERASED_BYTE; self.image.capacity()];
        let used = self.image.used();
        blank[..used.len()].copy_from_slice(used);
        self.transport.write(0, &blank)?;

        info!(bytes = blank.len(), "wrote erased eeprom");
        self.state = StoreState::Loaded;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state != StoreState::Unloaded
    }

    pub fn is_dirty(&self) -> bool {
        self.state == StoreState::Dirty
    }

    /// The in-memory image (zero-filled while unloaded)
    pub fn image(&self) -> &TlvImage {
        &self.image
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}
