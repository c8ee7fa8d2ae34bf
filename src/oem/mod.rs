//! OEM Config Module
//!
//! The configuration command surface exposed by the boot firmware
//! (fastboot OEM config access, board console).
//!
//! ### Commands
//! - `get <field>`          - read a field
//! - `set <field> <value>`  - replace a field in memory
//! - `write`                - flush the image to the EEPROM
//! - `erase`                - reset the image and rewrite the whole device
//!
//! ### Responses
//! - `OKAY<message>` on success
//! - `FAIL<reason>` with one of `key NOT exist`, `NOT exist`, `write fail`,
//!   `erase eeprom fail`

mod command;
mod dispatch;
mod response;

pub use command::Command;
pub use dispatch::execute;
pub use response::{Response, Status};
