//! Transport Module
//!
//! Byte-level access to the physical EEPROM.
//!
//! ## Layers
//! ```text
//! ┌──────────────────────────────┐
//! │          TlvStore            │   ByteTransport: offset-addressed
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │        ChunkedEeprom         │   splits into chunk_size transfers,
//! │  (one chip on one bus)       │   settles after each write
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │  EepromBus (MemoryBus,       │   chip-addressed raw read/write
//! │             ImageFileBus)    │
//! └──────────────────────────────┘
//! ```
//!
//! All calls block until the transfer completes; there is no cancellation.

mod chunked;
mod file;
mod memory;

pub use chunked::ChunkedEeprom;
pub use file::ImageFileBus;
pub use memory::MemoryBus;

use crate::error::Result;

/// Offset-addressed storage consumed by the store
pub trait ByteTransport {
    /// Fill `buf` with the bytes starting at `offset`
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()>;

    /// Store `data` starting at `offset`
    fn write(&mut self, offset: u32, data: &[u8]) -> Result<()>;
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()> {
        (**self).read(offset, buf)
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        (**self).write(offset, data)
    }
}

impl<T: ByteTransport + ?Sized> ByteTransport for Box<T> {
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()> {
        (**self).read(offset, buf)
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        (**self).write(offset, data)
    }
}

/// Raw chip-addressed bus
pub trait EepromBus {
    fn read(&mut self, chip: u8, offset: u32, buf: &mut [u8]) -> Result<()>;

    fn write(&mut self, chip: u8, offset: u32, data: &[u8]) -> Result<()>;
}
