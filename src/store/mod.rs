//! Store Module
//!
//! The TlvInfo store: an in-memory image lazily loaded from an EEPROM and
//! written back on demand.
//!
//! ## Lifecycle
//! ```text
//!   Unloaded ──load()──▶ Loaded ──add/delete/set/erase──▶ Dirty
//!                          ▲                                │
//!                          └────────────flush()─────────────┘
//! ```
//!
//! A device holding an invalid header or a bad checksum is not an error:
//! the image is reset to an empty valid one and `load()` reports
//! `LoadOutcome::Recovered`.

mod shared;
mod tlv_store;

pub use shared::SharedTlvStore;
pub use tlv_store::{LoadOutcome, RecoveryCause, StoreState, TlvStore};
