//! File-backed EEPROM bus
//!
//! A host file stands in for a single EEPROM chip. Missing files are created
//! erased (0xFF) at the configured capacity.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, TlvError};
use crate::tlv::ERASED_BYTE;

use super::EepromBus;

/// EEPROM image file answering at a single chip address
pub struct ImageFileBus {
    path: PathBuf,
    file: File,
    chip: u8,
    capacity: usize,
}

impl ImageFileBus {
    /// Open or create the image at `path`, padding it to `capacity` bytes
    pub fn open(path: &Path, chip: u8, capacity: usize) -> Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let len = file.metadata()?.len() as usize;
        if len < capacity {
            if len == 0 {
                info!(path = %path.display(), capacity, "creating erased eeprom image");
            }
            file.seek(SeekFrom::Start(len as u64))?;
            file.write_all(&vec![ERASED_BYTE; capacity - len])?;
            file.sync_all()?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            chip,
            capacity,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn check(&self, chip: u8, offset: u32, len: usize) -> Result<()> {
        if chip != self.chip {
            return Err(TlvError::transport(
                offset,
                len,
                format!("no device at 0x{:02X}", chip),
            ));
        }
        if offset as usize + len > self.capacity {
            return Err(TlvError::transport(
                offset,
                len,
                format!("beyond device size {}", self.capacity),
            ));
        }
        Ok(())
    }
}

impl EepromBus for ImageFileBus {
    fn read(&mut self, chip: u8, offset: u32, buf: &mut [u8]) -> Result<()> {
        self.check(chip, offset, buf.len())?;
        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write(&mut self, chip: u8, offset: u32, data: &[u8]) -> Result<()> {
        self.check(chip, offset, data.len())?;
        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.write_all(data)?;
        self.file.sync_data()?;
        Ok(())
    }
}
