//! Command definitions
//!
//! Represents configuration commands from the console or fastboot.

use crate::error::{Result, TlvError};

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a field by name
    Get { field: String },

    /// Set a field; the value is the rest of the line
    Set { field: String, value: String },

    /// Flush the image to the device
    Write,

    /// Reset the image and rewrite the whole device
    Erase,
}

impl Command {
    /// Parse one command line
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb {
            "get" => {
                if rest.is_empty() || rest.contains(char::is_whitespace) {
                    return Err(TlvError::Command(format!(
                        "usage: get <field>, got `{}`",
                        line
                    )));
                }
                Ok(Command::Get {
                    field: rest.to_string(),
                })
            }
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    TlvError::Command(format!("usage: set <field> <value>, got `{}`", line))
                })?;
                Ok(Command::Set {
                    field: field.to_string(),
                    value: value.trim_start().to_string(),
                })
            }
            "write" if rest.is_empty() => Ok(Command::Write),
            "erase" if rest.is_empty() => Ok(Command::Erase),
            "" => Err(TlvError::Command("empty command".to_string())),
            _ => Err(TlvError::Command(format!("unknown command `{}`", line))),
        }
    }
}
