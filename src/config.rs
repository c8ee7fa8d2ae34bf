//! Configuration for the TlvInfo store
//!
//! Centralized configuration with sensible defaults for the K1-X board
//! (a 24C02 EEPROM: 256 bytes, 16-byte pages).

use std::path::PathBuf;

use crate::error::{Result, TlvError};
use crate::tlv::{CRC_RECORD_SIZE, HEADER_SIZE};

/// Main configuration for a TlvInfo store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Image Configuration
    // -------------------------------------------------------------------------
    /// Size of the in-memory image and of the EEPROM area it mirrors (bytes).
    /// Records may occupy at most `capacity - HEADER_SIZE` bytes.
    pub capacity: usize,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Bus address of the EEPROM chip
    pub chip_addr: u8,

    /// Largest single bus transfer (bytes)
    pub chunk_size: usize,

    /// Delay after each written chunk (milliseconds)
    pub write_settle_ms: u64,

    /// Backing file for the file-based bus
    pub image_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 256,
            chip_addr: 0x50,
            chunk_size: 16,
            write_settle_ms: 0,
            image_path: PathBuf::from("./eeprom.bin"),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Upper bound on the sum of all record sizes
    pub fn max_total_len(&self) -> usize {
        self.capacity.saturating_sub(HEADER_SIZE)
    }

    /// Check that the values describe a usable image and bus
    pub fn validate(&self) -> Result<()> {
        let min = HEADER_SIZE + CRC_RECORD_SIZE;
        if self.capacity < min {
            return Err(TlvError::Config(format!(
                "capacity {} is below the minimum image size {}",
                self.capacity, min
            )));
        }

        let max = HEADER_SIZE + u16::MAX as usize;
        if self.capacity > max {
            return Err(TlvError::Config(format!(
                "capacity {} exceeds the addressable size {}",
                self.capacity, max
            )));
        }

        if self.chunk_size == 0 {
            return Err(TlvError::Config("chunk size must be non-zero".to_string()));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the image capacity (in bytes)
    pub fn capacity(mut self, bytes: usize) -> Self {
        self.config.capacity = bytes;
        self
    }

    /// Set the EEPROM chip address
    pub fn chip_addr(mut self, addr: u8) -> Self {
        self.config.chip_addr = addr;
        self
    }

    /// Set the maximum bus transfer size (in bytes)
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.config.chunk_size = bytes;
        self
    }

    /// Set the post-write settle delay (in milliseconds)
    pub fn write_settle_ms(mut self, ms: u64) -> Self {
        self.config.write_settle_ms = ms;
        self
    }

    /// Set the backing image file
    pub fn image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.image_path = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
