//! Protocol Module
//!
//! Defines the owserver wire protocol.
//!
//! ### Message Format
//! ```text
//! ┌─────────────────────────────────┬─────────────────────────────┐
//! │ Header (6 x i32, big-endian)    │   Payload (payload_len)     │
//! └─────────────────────────────────┴─────────────────────────────┘
//! ```
//!
//! ### Functions
//! - 1: NOP
//! - 2: READ      - Payload: path
//! - 3: WRITE     - Payload: path + value
//! - 4: DIR       - Payload: path, one response packet per entry
//! - 5: SIZE      - unused by current servers
//! - 6: PRESENCE  - Payload: path
//! - 7: DIRALL    - Payload: path, one comma-joined response
//! - 8: GET       - Payload: path, DIRALL or READ depending on the path
//!
//! ### Return Codes
//! - `>= 0`: success
//! - `< 0`:  error (negated errno on the server)

mod codec;
mod flags;
mod function;
mod header;
mod request;

pub use codec::{
    decode_header, decode_payload, decode_request_header, encode_header, encode_path,
    encode_request, encode_request_header, encode_response_header, read_header, read_payload,
    read_request, write_message, write_response, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
pub use flags::{DeviceFormat, Flags, TemperatureScale};
pub use function::Function;
pub use header::{RequestHeader, ResponseHeader};
pub use request::Request;
