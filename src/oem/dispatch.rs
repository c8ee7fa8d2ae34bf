//! Command execution against a store

use tracing::{info, warn};

use crate::codes;
use crate::store::TlvStore;
use crate::transport::ByteTransport;

use super::{Command, Response};

pub const KEY_NOT_EXIST: &str = "key NOT exist";
pub const NOT_EXIST: &str = "NOT exist";
pub const WRITE_FAIL: &str = "write fail";
pub const ERASE_FAIL: &str = "erase eeprom fail";

/// Execute a command
///
/// Routes commands to the store; failures become `FAIL` responses rather
/// than errors.
pub fn execute<T: ByteTransport>(store: &mut TlvStore<T>, command: &Command) -> Response {
    match command {
        Command::Get { field } => {
            let spec = match codes::field_by_name(field) {
                Some(spec) => spec,
                None => return Response::fail(KEY_NOT_EXIST),
            };
            match store.get_field(spec.name) {
                Ok(Some(value)) => Response::okay(Some(value)),
                Ok(None) => Response::fail(KEY_NOT_EXIST),
                Err(e) => {
                    warn!(field = %field, error = %e, "get failed");
                    Response::fail(KEY_NOT_EXIST)
                }
            }
        }
        Command::Set { field, value } => {
            let spec = match codes::field_by_name(field) {
                Some(spec) if value.len() <= spec.max_len => spec,
                _ => return Response::fail(NOT_EXIST),
            };
            info!(field = %field, value = %value, "set config");
            match store.set(spec.code, Some(value.as_str())) {
                Ok(()) => Response::okay(None),
                Err(e) => {
                    warn!(field = %field, error = %e, "set failed");
                    Response::fail(NOT_EXIST)
                }
            }
        }
        Command::Write => match store.flush() {
            Ok(()) => Response::okay(None),
            Err(e) => {
                warn!(error = %e, "write failed");
                Response::fail(WRITE_FAIL)
            }
        },
        Command::Erase => match store.erase_device() {
            Ok(()) => Response::okay(None),
            Err(e) => {
                warn!(error = %e, "erase failed");
                Response::fail(ERASE_FAIL)
            }
        },
    }
}
