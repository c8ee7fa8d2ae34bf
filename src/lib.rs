//! # TlvInfo
//!
//! Board configuration storage for the K1-X platform, kept in an I2C
//! EEPROM as an ONIE-style TlvInfo image:
//! - Fixed 11-byte header + packed Type-Length-Value records
//! - CRC-32 trailer record maintained after every mutation
//! - Per-field value codecs (MAC, date, numbers, byte lists, text)
//! - Lazy load, explicit flush, silent recovery from corrupt contents
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            OEM config commands / board init / CLI            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ field name + string value
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Value Codecs                             │
//! │              (validate, string → payload)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      TlvStore                                │
//! │        (find / get / add / delete / set / flush)             │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │    TlvImage     │                │  ByteTransport  │
//!   │ (header, CRC)   │                │ (I2C EEPROM)    │
//!   └─────────────────┘                └─────────────────┘
//! ```
//!
//! The store is single-threaded; use `SharedTlvStore` when several threads
//! need it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codes;
pub mod tlv;
pub mod codec;
pub mod transport;
pub mod store;
pub mod oem;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TlvError, Result};
pub use config::Config;
pub use store::{LoadOutcome, RecoveryCause, SharedTlvStore, StoreState, TlvStore};
pub use tlv::TlvImage;

// =============================================================================
// Version Info
// =============================================================================

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
