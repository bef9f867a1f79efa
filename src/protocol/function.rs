//! Function codes
//!
//! Carried in the third header field of a request.

use crate::error::{OwError, Result};

/// owserver message types (client -> server)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Function {
    Error = 0,
    Nop = 1,
    Read = 2,
    Write = 3,
    Dir = 4,
    /// No longer served by owserver; kept so the code can be decoded
    Size = 5,
    Presence = 6,
    DirAll = 7,
    Get = 8,
}

impl Function {
    /// Wire code for this function
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Function for a wire code
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Function::Error),
            1 => Ok(Function::Nop),
            2 => Ok(Function::Read),
            3 => Ok(Function::Write),
            4 => Ok(Function::Dir),
            5 => Ok(Function::Size),
            6 => Ok(Function::Presence),
            7 => Ok(Function::DirAll),
            8 => Ok(Function::Get),
            _ => Err(OwError::Protocol(format!("Unknown function code: {}", code))),
        }
    }
}
