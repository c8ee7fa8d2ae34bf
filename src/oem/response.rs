//! Response definitions
//!
//! Represents responses to configuration commands.

use std::fmt;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Okay,
    Fail,
}

/// A response to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub message: Option<String>,
}

impl Response {
    /// Create an OKAY response with optional message
    pub fn okay(message: Option<String>) -> Self {
        Self {
            status: Status::Okay,
            message,
        }
    }

    /// Create a FAIL response with a reason
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(reason.into()),
        }
    }

    pub fn is_okay(&self) -> bool {
        self.status == Status::Okay
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.status {
            Status::Okay => "OKAY",
            Status::Fail => "FAIL",
        };
        write!(f, "{}{}", tag, self.message.as_deref().unwrap_or(""))
    }
}
