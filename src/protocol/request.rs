//! Request definitions
//!
//! One variant per operation the client can put on the wire.

use super::{Flags, Function, RequestHeader};
use crate::error::{OwError, Result};

/// A request to send to owserver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// No-op, used as a liveness check
    Nop,

    /// Read an attribute value
    Read { path: String, data_len: i32 },

    /// Write a value to an attribute
    Write { path: String, value: String },

    /// List a directory, one entry per response packet
    Dir { path: String },

    /// Check whether a path exists on the bus
    Presence { path: String },

    /// List a directory as one comma-joined packet
    DirAll { path: String },

    /// Read a file or list a directory, whichever the path is
    Get { path: String, data_len: i32 },
}

impl Request {
    /// Get the function code
    pub fn function(&self) -> Function {
        match self {
            Request::Nop => Function::Nop,
            Request::Read { .. } => Function::Read,
            Request::Write { .. } => Function::Write,
            Request::Dir { .. } => Function::Dir,
            Request::Presence { .. } => Function::Presence,
            Request::DirAll { .. } => Function::DirAll,
            Request::Get { .. } => Function::Get,
        }
    }

    /// Path named by the request, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Request::Nop => None,
            Request::Read { path, .. }
            | Request::Write { path, .. }
            | Request::Dir { path }
            | Request::Presence { path }
            | Request::DirAll { path }
            | Request::Get { path, .. } => Some(path),
        }
    }

    /// Build the header announcing this request's payload
    pub fn header(&self, flags: Flags) -> Result<RequestHeader> {
        let (payload_len, data_len) = match self {
            Request::Nop => (0, 0),
            Request::Read { path, data_len } | Request::Get { path, data_len } => {
                (c_len(path)?, *data_len)
            }
            Request::Write { path, value } => {
                let value_len = c_len(value)?;
                let payload_len = c_len(path)?
                    .checked_add(value_len)
                    .ok_or_else(|| too_long(path.len() + value.len()))?;
                (payload_len, value_len)
            }
            Request::Dir { path } | Request::Presence { path } | Request::DirAll { path } => {
                (c_len(path)?, 0)
            }
        };

        Ok(RequestHeader::new(self.function(), payload_len, data_len, flags))
    }
}

/// Wire length of a null-terminated string
fn c_len(s: &str) -> Result<i32> {
    i32::try_from(s.len() + 1).map_err(|_| too_long(s.len()))
}

fn too_long(len: usize) -> OwError {
    OwError::Protocol(format!(
        "Payload of {} bytes does not fit a 32-bit length field",
        len
    ))
}
