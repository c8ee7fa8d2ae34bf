//! Chunked EEPROM adapter
//!
//! Binds one chip address on a bus and splits transfers into page-sized
//! pieces, waiting for the write cycle after each written chunk.

use std::thread;
use std::time::Duration;

use tracing::trace;

use crate::config::Config;
use crate::error::Result;

use super::{ByteTransport, EepromBus};

/// One EEPROM chip reached through an `EepromBus`
pub struct ChunkedEeprom<B: EepromBus> {
    bus: B,
    chip: u8,
    chunk_size: usize,
    settle: Duration,
}

impl<B: EepromBus> ChunkedEeprom<B> {
    /// Take chip address, chunk size and settle delay from `config`
    pub fn new(bus: B, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bus,
            chip: config.chip_addr,
            chunk_size: config.chunk_size,
            settle: Duration::from_millis(config.write_settle_ms),
        })
    }

    pub fn chip(&self) -> u8 {
        self.chip
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: EepromBus> ByteTransport for ChunkedEeprom<B> {
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()> {
        for (i, chunk) in buf.chunks_mut(self.chunk_size).enumerate() {
            let at = offset + (i * self.chunk_size) as u32;
            trace!(chip = self.chip, offset = at, len = chunk.len(), "eeprom read");
            self.bus.read(self.chip, at, chunk)?;
        }
        Ok(())
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        for (i, chunk) in data.chunks(self.chunk_size).enumerate() {
            let at = offset + (i * self.chunk_size) as u32;
            trace!(chip = self.chip, offset = at, len = chunk.len(), "eeprom write");
            self.bus.write(self.chip, at, chunk)?;

            if !self.settle.is_zero() {
                thread::sleep(self.settle);
            }
        }
        Ok(())
    }
}
