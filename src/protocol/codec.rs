//! Protocol codec
//!
//! Encoding and decoding functions for the owserver wire protocol.
//!
//! ## Wire Format
//!
//! Every message, in both directions, is a fixed header followed by an
//! optional payload. All integers are signed 32-bit, big-endian.
//!
//! ```text
//! ┌─────────┬─────────────┬──────────────┬─────────┬──────────┬─────────┐
//! │ version │ payload_len │ function/ret │  flags  │ data_len │ offset  │
//! │   (4)   │     (4)     │     (4)      │   (4)   │   (4)    │   (4)   │
//! └─────────┴─────────────┴──────────────┴─────────┴──────────┴─────────┘
//! ┌──────────────────────────────────────────────────┐
//! │          Payload (payload_len bytes)             │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ### Request Payloads
//! - READ, DIR, DIRALL, PRESENCE, GET: path + NUL
//! - WRITE: path + NUL + value + NUL
//! - NOP:   empty
//!
//! ### Response Payloads
//! The meaningful bytes are `payload[offset..offset + data_len]`.

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Flags, Function, Request, RequestHeader, ResponseHeader};
use crate::error::{OwError, Result};

/// Header size: 6 fields of 4 bytes
pub const HEADER_SIZE: usize = 24;

/// Maximum payload size accepted from the server (16 MB)
pub const MAX_PAYLOAD_SIZE: i32 = 16 * 1024 * 1024;

// =============================================================================
// Header Encoding/Decoding
// =============================================================================

/// Encode a request header from its variable fields
///
/// Version and offset are always 0 on send.
pub fn encode_header(
    function: Function,
    payload_len: i32,
    data_len: i32,
    flags: Flags,
) -> [u8; HEADER_SIZE] {
    encode_request_header(&RequestHeader::new(function, payload_len, data_len, flags))
}

/// Encode a request header to bytes
pub fn encode_request_header(header: &RequestHeader) -> [u8; HEADER_SIZE] {
    pack([
        header.version,
        header.payload_len,
        header.function.code(),
        header.flags.bits() as i32,
        header.data_len,
        header.offset,
    ])
}

/// Decode a request header from bytes
#[doc(hidden)]
pub fn decode_request_header(bytes: &[u8]) -> Result<RequestHeader> {
    let [version, payload_len, function, flags, data_len, offset] = unpack(bytes)?;
    Ok(RequestHeader {
        version,
        payload_len,
        function: Function::from_code(function)?,
        flags: Flags::from_bits(flags as u32),
        data_len,
        offset,
    })
}

/// Encode a response header to bytes
#[doc(hidden)]
pub fn encode_response_header(header: &ResponseHeader) -> [u8; HEADER_SIZE] {
    pack([
        header.version,
        header.payload_len,
        header.ret_value,
        header.flags.bits() as i32,
        header.data_len,
        header.offset,
    ])
}

/// Decode a response header from bytes
pub fn decode_header(bytes: &[u8]) -> Result<ResponseHeader> {
    let [version, payload_len, ret_value, flags, data_len, offset] = unpack(bytes)?;
    Ok(ResponseHeader {
        version,
        payload_len,
        ret_value,
        flags: Flags::from_bits(flags as u32),
        data_len,
        offset,
    })
}

fn pack(fields: [i32; 6]) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    let mut buf = &mut out[..];
    for field in fields {
        buf.put_i32(field);
    }
    out
}

fn unpack(bytes: &[u8]) -> Result<[i32; 6]> {
    if bytes.len() < HEADER_SIZE {
        return Err(OwError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut buf = &bytes[..HEADER_SIZE];
    let mut fields = [0i32; 6];
    for field in fields.iter_mut() {
        *field = buf.get_i32();
    }
    Ok(fields)
}

// =============================================================================
// Payload Encoding/Decoding
// =============================================================================

/// Encode a path (or value) as a null-terminated byte string
pub fn encode_path(path: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(path.len() + 1);
    bytes.extend_from_slice(path.as_bytes());
    bytes.push(0);
    bytes
}

/// Extract the meaningful data from a received payload
///
/// `raw` must hold exactly the `payload_len` bytes read off the wire; the
/// result is `raw[offset..offset + data_len]`, byte for byte, not trimmed.
pub fn decode_payload(header: &ResponseHeader, raw: &[u8]) -> Result<String> {
    if header.offset < 0 || header.data_len < 0 {
        return Err(OwError::Protocol(format!(
            "Negative payload slice: offset {}, data_len {}",
            header.offset, header.data_len
        )));
    }

    let start = header.offset as usize;
    let end = start + header.data_len as usize;
    if end > raw.len() {
        return Err(OwError::Protocol(format!(
            "Payload slice {}..{} exceeds received {} bytes",
            start,
            end,
            raw.len()
        )));
    }

    Ok(String::from_utf8_lossy(&raw[start..end]).into_owned())
}

// =============================================================================
// Message Encoding
// =============================================================================

/// Encode a full request (header + payload) to bytes
pub fn encode_request(request: &Request, flags: Flags) -> Result<Bytes> {
    let header = request.header(flags)?;

    let mut message = BytesMut::with_capacity(HEADER_SIZE + header.payload_len as usize);
    message.put_slice(&encode_request_header(&header));

    match request {
        Request::Nop => {}
        Request::Write { path, value } => {
            message.put_slice(&encode_path(path));
            message.put_slice(&encode_path(value));
        }
        Request::Read { path, .. }
        | Request::Dir { path }
        | Request::Presence { path }
        | Request::DirAll { path }
        | Request::Get { path, .. } => {
            message.put_slice(&encode_path(path));
        }
    }

    Ok(message.freeze())
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a response header from a stream
///
/// EOF or a timeout before all 24 bytes arrive is a protocol error: the
/// stream can no longer be trusted to be aligned on a message boundary.
pub fn read_header<R: Read>(reader: &mut R) -> Result<ResponseHeader> {
    let mut header = [0u8; HEADER_SIZE];
    reader
        .read_exact(&mut header)
        .map_err(short_header)?;
    decode_header(&header)
}

/// Read the payload announced by `header`
///
/// Returns an empty buffer when `payload_len` is zero or negative. EOF or a
/// timeout mid-payload stays an I/O error.
pub fn read_payload<R: Read>(reader: &mut R, header: &ResponseHeader) -> Result<Vec<u8>> {
    if header.payload_len <= 0 {
        return Ok(Vec::new());
    }

    if header.payload_len > MAX_PAYLOAD_SIZE {
        return Err(OwError::Protocol(format!(
            "Response payload too large: {} bytes (max {})",
            header.payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let mut payload = vec![0u8; header.payload_len as usize];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}

/// Write an encoded message to a stream
pub fn write_message<W: Write>(writer: &mut W, message: &[u8]) -> std::io::Result<()> {
    writer.write_all(message)?;
    writer.flush()
}

/// Read a complete request (header + payload) from a stream
///
/// Server side of the exchange, kept for test servers.
#[doc(hidden)]
pub fn read_request<R: Read>(reader: &mut R) -> Result<(RequestHeader, Vec<u8>)> {
    let mut bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut bytes)?;
    let header = decode_request_header(&bytes)?;

    if header.payload_len < 0 || header.payload_len > MAX_PAYLOAD_SIZE {
        return Err(OwError::Protocol(format!(
            "Invalid request payload length: {}",
            header.payload_len
        )));
    }

    let mut payload = vec![0u8; header.payload_len as usize];
    reader.read_exact(&mut payload)?;
    Ok((header, payload))
}

/// Write a response (header + payload) to a stream
#[doc(hidden)]
pub fn write_response<W: Write>(
    writer: &mut W,
    header: &ResponseHeader,
    payload: &[u8],
) -> Result<()> {
    let mut message = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    message.put_slice(&encode_response_header(header));
    message.put_slice(payload);
    write_message(writer, &message)?;
    Ok(())
}

fn short_header(err: std::io::Error) -> OwError {
    match err.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::WouldBlock | ErrorKind::TimedOut => {
            OwError::Protocol(format!("Short read on response header: {}", err))
        }
        _ => OwError::Io(err),
    }
}
