//! In-memory EEPROM bus
//!
//! Each attached device is a fixed-size array that starts out erased
//! (all 0xFF). Used for tests and for simulating a board without hardware.

use std::collections::HashMap;

use crate::error::{Result, TlvError};
use crate::tlv::ERASED_BYTE;

use super::EepromBus;

/// Bus with any number of simulated devices keyed by chip address
#[derive(Debug, Default, Clone)]
pub struct MemoryBus {
    devices: HashMap<u8, Vec<u8>>,
    reads: usize,
    writes: usize,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an erased device of `size` bytes at `chip`
    pub fn with_device(mut self, chip: u8, size: usize) -> Self {
        self.devices.insert(chip, vec![ERASED_BYTE; size]);
        self
    }

    /// Attach a device with the given contents
    pub fn insert_device(&mut self, chip: u8, contents: Vec<u8>) {
        self.devices.insert(chip, contents);
    }

    pub fn device(&self, chip: u8) -> Option<&[u8]> {
        self.devices.get(&chip).map(|d| d.as_slice())
    }

    pub fn device_mut(&mut self, chip: u8) -> Option<&mut [u8]> {
        self.devices.get_mut(&chip).map(|d| d.as_mut_slice())
    }

    /// Number of read transfers served
    pub fn read_count(&self) -> usize {
        self.reads
    }

    /// Number of write transfers served
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn span(&mut self, chip: u8, offset: u32, len: usize) -> Result<(&mut Vec<u8>, usize)> {
        let device = self
            .devices
            .get_mut(&chip)
            .ok_or_else(|| TlvError::transport(offset, len, format!("no device at 0x{:02X}", chip)))?;

        let start = offset as usize;
        if start + len > device.len() {
            return Err(TlvError::transport(
                offset,
                len,
                format!("beyond device size {}", device.len()),
            ));
        }
        Ok((device, start))
    }
}

impl EepromBus for MemoryBus {
    fn read(&mut self, chip: u8, offset: u32, buf: &mut [u8]) -> Result<()> {
        let (device, start) = self.span(chip, offset, buf.len())?;
        buf.copy_from_slice(&device[start..start + buf.len()]);
        self.reads += 1;
        Ok(())
    }

    fn write(&mut self, chip: u8, offset: u32, data: &[u8]) -> Result<()> {
        let (device, start) = self.span(chip, offset, data.len())?;
        device[start..start + data.len()].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}
