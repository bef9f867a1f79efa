//! Message headers
//!
//! Both directions share the same six-field layout, but the third field means
//! something different each way: the requested function going out, the
//! server's return code coming back. Each direction gets its own type so the
//! slot is never read with the wrong meaning.

use super::{Flags, Function};

/// Header of a client -> server message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeader {
    /// Protocol version, always 0
    pub version: i32,

    /// Number of payload bytes following the header
    pub payload_len: i32,

    /// Requested function
    pub function: Function,

    /// Flags word (formatting + persistence request)
    pub flags: Flags,

    /// Expected (read) or supplied (write) data length
    pub data_len: i32,

    /// Data offset, always 0 from this client
    pub offset: i32,
}

impl RequestHeader {
    /// Create a request header with version and offset zeroed
    pub fn new(function: Function, payload_len: i32, data_len: i32, flags: Flags) -> Self {
        Self {
            version: 0,
            payload_len,
            function,
            flags,
            data_len,
            offset: 0,
        }
    }
}

/// Header of a server -> client message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub version: i32,

    /// Bytes on the wire after this header.
    /// 0 ends a directory listing, negative means "still working, keep waiting".
    pub payload_len: i32,

    /// Server return code, negative on error
    pub ret_value: i32,

    /// Flags echoed by the server; the persistence bit is authoritative
    pub flags: Flags,

    /// Length of the meaningful data inside the payload
    pub data_len: i32,

    /// Start of the meaningful data inside the payload
    pub offset: i32,
}

impl ResponseHeader {
    /// Successful response carrying `payload_len` bytes, all of them data
    #[doc(hidden)]
    pub fn ok(payload_len: i32, flags: Flags) -> Self {
        Self {
            version: 0,
            payload_len,
            ret_value: 0,
            flags,
            data_len: payload_len.max(0),
            offset: 0,
        }
    }

    /// Error response with the given (negative) return code and no payload
    #[doc(hidden)]
    pub fn error(ret_value: i32, flags: Flags) -> Self {
        Self {
            version: 0,
            payload_len: 0,
            ret_value,
            flags,
            data_len: 0,
            offset: 0,
        }
    }

    /// True when the server reported a failure
    pub fn is_error(&self) -> bool {
        self.ret_value < 0
    }

    /// True when the server keeps the connection open for reuse
    pub fn is_persistent(&self) -> bool {
        self.flags.is_persistent()
    }
}
