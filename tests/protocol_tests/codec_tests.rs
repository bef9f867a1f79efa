//! Codec Tests
//!
//! Tests for header, request and payload encoding/decoding.

use std::io::Cursor;

use ownet::protocol::{
    decode_header, decode_payload, decode_request_header, encode_header, encode_path,
    encode_request, encode_request_header, encode_response_header, read_header, read_payload,
    read_request, write_response, Function, Request, RequestHeader, ResponseHeader,
    HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
use ownet::{Flags, OwError};

fn field(bytes: &[u8], index: usize) -> i32 {
    let start = index * 4;
    i32::from_be_bytes([
        bytes[start],
        bytes[start + 1],
        bytes[start + 2],
        bytes[start + 3],
    ])
}

// =============================================================================
// Header Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_header_field_order() {
    let bytes = encode_header(Function::Read, 19, 4096, Flags::from_bits(0x107));

    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(field(&bytes, 0), 0); // version
    assert_eq!(field(&bytes, 1), 19); // payload_len
    assert_eq!(field(&bytes, 2), 2); // function
    assert_eq!(field(&bytes, 3), 0x107); // flags
    assert_eq!(field(&bytes, 4), 4096); // data_len
    assert_eq!(field(&bytes, 5), 0); // offset
}

#[test]
fn test_encode_header_is_big_endian() {
    let bytes = encode_header(Function::DirAll, 0x0102_0304, 0, Flags::from_bits(0));

    assert_eq!(&bytes[4..8], &[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x00, 0x07]);
}

#[test]
fn test_response_header_roundtrip() {
    let headers = [
        ResponseHeader::ok(6, Flags::default()),
        ResponseHeader::error(-2, Flags::default().with_persist()),
        ResponseHeader {
            version: 0,
            payload_len: -1,
            ret_value: 0,
            flags: Flags::from_bits(0xFFFF_FFFF),
            data_len: 0,
            offset: 0,
        },
        ResponseHeader {
            version: 3,
            payload_len: 65536,
            ret_value: 12,
            flags: Flags::from_bits(0x0103),
            data_len: 12,
            offset: 100,
        },
    ];

    for header in headers {
        let decoded = decode_header(&encode_response_header(&header)).unwrap();
        assert_eq!(decoded, header);
    }
}

#[test]
fn test_request_header_roundtrip() {
    let header = RequestHeader::new(Function::Write, 25, 3, Flags::default().with_persist());
    let decoded = decode_request_header(&encode_request_header(&header)).unwrap();

    assert_eq!(decoded, header);
    assert_eq!(decoded.version, 0);
    assert_eq!(decoded.offset, 0);
}

#[test]
fn test_negative_flags_word_survives() {
    // High bits set make the wire i32 negative
    let flags = Flags::from_bits(0x8500_0104);
    let header = ResponseHeader::ok(0, flags);
    let decoded = decode_header(&encode_response_header(&header)).unwrap();

    assert_eq!(decoded.flags, flags);
    assert!(decoded.is_persistent());
}

#[test]
fn test_decode_header_too_short() {
    let bytes = encode_header(Function::Nop, 0, 0, Flags::default());
    let result = decode_header(&bytes[..HEADER_SIZE - 1]);

    assert!(matches!(result, Err(OwError::Protocol(_))));
}

#[test]
fn test_decode_request_unknown_function() {
    let mut bytes = encode_header(Function::Read, 0, 0, Flags::default());
    bytes[8..12].copy_from_slice(&42i32.to_be_bytes());

    assert!(matches!(
        decode_request_header(&bytes),
        Err(OwError::Protocol(_))
    ));
}

#[test]
fn test_function_codes() {
    assert_eq!(Function::Nop.code(), 1);
    assert_eq!(Function::Read.code(), 2);
    assert_eq!(Function::Write.code(), 3);
    assert_eq!(Function::Dir.code(), 4);
    assert_eq!(Function::Size.code(), 5);
    assert_eq!(Function::Presence.code(), 6);
    assert_eq!(Function::DirAll.code(), 7);
    assert_eq!(Function::Get.code(), 8);

    for code in 0..=8 {
        assert_eq!(Function::from_code(code).unwrap().code(), code);
    }
    assert!(Function::from_code(99999).is_err());
}

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_path_appends_nul() {
    assert_eq!(encode_path("/28.AA"), b"/28.AA\0".to_vec());
    assert_eq!(encode_path(""), vec![0]);
}

#[test]
fn test_encode_read_request() {
    let path = "/28.0E67C0000000/temperature";
    let request = Request::Read {
        path: path.to_string(),
        data_len: 4096,
    };
    let bytes = encode_request(&request, Flags::default().with_persist()).unwrap();
    let header = decode_request_header(&bytes).unwrap();

    assert_eq!(header.function, Function::Read);
    assert_eq!(header.payload_len, path.len() as i32 + 1);
    assert_eq!(header.data_len, 4096);
    assert!(header.flags.is_persistent());
    assert_eq!(&bytes[HEADER_SIZE..], encode_path(path).as_slice());
}

#[test]
fn test_encode_write_request() {
    let request = Request::Write {
        path: "/12.04E64A000000/PIO.A".to_string(),
        value: "1".to_string(),
    };
    let bytes = encode_request(&request, Flags::default()).unwrap();
    let header = decode_request_header(&bytes).unwrap();

    assert_eq!(header.function, Function::Write);
    assert_eq!(header.payload_len, 22 + 1 + 1 + 1);
    assert_eq!(header.data_len, 2);
    assert_eq!(&bytes[HEADER_SIZE..], b"/12.04E64A000000/PIO.A\x001\x00");
}

#[test]
fn test_encode_path_only_requests_have_zero_data_len() {
    let requests = [
        Request::Dir { path: "/".to_string() },
        Request::Presence { path: "/10.67C6697351FF".to_string() },
        Request::DirAll { path: "/bus.0".to_string() },
    ];

    for request in requests {
        let bytes = encode_request(&request, Flags::default()).unwrap();
        let header = decode_request_header(&bytes).unwrap();

        assert_eq!(header.function, request.function());
        assert_eq!(header.data_len, 0);
        assert_eq!(header.offset, 0);
        assert_eq!(bytes.len(), HEADER_SIZE + header.payload_len as usize);
    }
}

#[test]
fn test_encode_nop_has_no_payload() {
    let bytes = encode_request(&Request::Nop, Flags::default()).unwrap();
    let header = decode_request_header(&bytes).unwrap();

    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(header.function, Function::Nop);
    assert_eq!(header.payload_len, 0);
}

#[test]
fn test_payload_len_counts_bytes_not_chars() {
    let request = Request::Presence {
        path: "/é".to_string(),
    };
    let header = request.header(Flags::default()).unwrap();

    assert_eq!(header.payload_len, 4);
}

// =============================================================================
// Payload Decoding Tests
// =============================================================================

#[test]
fn test_decode_payload_is_not_trimmed() {
    let header = ResponseHeader::ok(6, Flags::default());
    let value = decode_payload(&header, b"25.5\0\0").unwrap();

    assert_eq!(value, "25.5\0\0");
    assert_eq!(value.len(), 6);
}

#[test]
fn test_decode_payload_honors_offset_and_data_len() {
    let header = ResponseHeader {
        version: 0,
        payload_len: 10,
        ret_value: 4,
        flags: Flags::default(),
        data_len: 4,
        offset: 3,
    };

    assert_eq!(decode_payload(&header, b"   21.5   ").unwrap(), "21.5");
}

#[test]
fn test_decode_payload_out_of_bounds() {
    let mut header = ResponseHeader::ok(4, Flags::default());
    header.data_len = 8;

    assert!(matches!(
        decode_payload(&header, b"abcd"),
        Err(OwError::Protocol(_))
    ));

    header.data_len = -1;
    assert!(matches!(
        decode_payload(&header, b"abcd"),
        Err(OwError::Protocol(_))
    ));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_read_header_short_stream() {
    let mut reader = Cursor::new(vec![0u8; 10]);
    let result = read_header(&mut reader);

    assert!(matches!(result, Err(OwError::Protocol(_))));
}

#[test]
fn test_read_payload_skips_non_positive_lengths() {
    let mut reader = Cursor::new(b"leftover".to_vec());

    let header = ResponseHeader::ok(-1, Flags::default());
    assert!(read_payload(&mut reader, &header).unwrap().is_empty());

    let header = ResponseHeader::ok(0, Flags::default());
    assert!(read_payload(&mut reader, &header).unwrap().is_empty());
    assert_eq!(reader.position(), 0);
}

#[test]
fn test_read_payload_rejects_oversized() {
    let mut reader = Cursor::new(Vec::new());
    let header = ResponseHeader::ok(MAX_PAYLOAD_SIZE + 1, Flags::default());

    assert!(matches!(
        read_payload(&mut reader, &header),
        Err(OwError::Protocol(_))
    ));
}

#[test]
fn test_read_payload_short_stream() {
    let mut reader = Cursor::new(b"abc".to_vec());
    let header = ResponseHeader::ok(6, Flags::default());

    let err = read_payload(&mut reader, &header).unwrap_err();

    assert!(matches!(&err, OwError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof));
    assert!(err.is_transport());
}

#[test]
fn test_response_through_stream() {
    let mut buffer = Vec::new();
    let header = ResponseHeader::ok(5, Flags::default().with_persist());
    write_response(&mut buffer, &header, b"hello").unwrap();

    let mut reader = Cursor::new(buffer);
    let decoded = read_header(&mut reader).unwrap();
    let payload = read_payload(&mut reader, &decoded).unwrap();

    assert_eq!(decoded, header);
    assert_eq!(decode_payload(&decoded, &payload).unwrap(), "hello");
}

#[test]
fn test_request_through_stream() {
    let request = Request::Write {
        path: "/a".to_string(),
        value: "bc".to_string(),
    };
    let bytes = encode_request(&request, Flags::default()).unwrap();

    let mut reader = Cursor::new(bytes.to_vec());
    let (header, payload) = read_request(&mut reader).unwrap();

    assert_eq!(header.function, Function::Write);
    assert_eq!(payload, b"/a\0bc\0");
}
