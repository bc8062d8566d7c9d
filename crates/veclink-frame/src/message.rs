//! Whole-message framing over byte buffers.
//!
//! Encode: codec payload, optional LZ4-frame compression above the size
//! threshold, then `header ‖ body`. Decode is the inverse. Each message is
//! independent; there is no cross-message state.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use veclink_types::Value;

use crate::error::{FrameError, Result};
use crate::header::{Header, HEADER_SIZE};

/// Payloads at or below this size are sent uncompressed even when the caller
/// asks for compression. Policy only; the decoder honors the COMPRESSED bit
/// regardless of body size.
pub const UNCOMPRESSED_SIZE_LIMIT: usize = 4096;

/// Frame a value into `header ‖ body` bytes.
///
/// With `compress` set, bodies larger than [`UNCOMPRESSED_SIZE_LIMIT`] are
/// LZ4-frame compressed and the header gets the COMPRESSED bit.
pub fn encode_message(value: &Value, compress: bool) -> Result<Bytes> {
    let mut payload = BytesMut::new();
    veclink_codec::encode_value(value, &mut payload)?;

    let mut header = Header::new();
    let body: Bytes = if compress && payload.len() > UNCOMPRESSED_SIZE_LIMIT {
        header = header.with_compressed();
        compress_lz4(&payload)?
    } else {
        payload.freeze()
    };

    header.len = body.len() as u64;

    let mut out = BytesMut::with_capacity(HEADER_SIZE + body.len());
    header.encode(&mut out);
    out.put_slice(&body);
    Ok(out.freeze())
}

/// Decode one framed message from a complete in-memory buffer.
///
/// A zero `len` is a legacy allowance meaning "body runs to the end of the
/// buffer". Bytes past the declared body length are ignored.
pub fn decode_message(bytes: &[u8]) -> Result<Value> {
    let mut buf = bytes;
    let header = Header::decode(&mut buf)?;

    if header.features.is_unsupported() {
        return Err(FrameError::PeerUnsupported);
    }

    let body = if header.len > 0 {
        let len = header.len as usize;
        if buf.remaining() < len {
            return Err(FrameError::ShortRead {
                needed: len,
                available: buf.remaining(),
            });
        }
        &buf[..len]
    } else {
        buf
    };

    let payload;
    let payload_bytes: &[u8] = if header.is_compressed() {
        payload = decompress_lz4(body)?;
        &payload
    } else {
        body
    };

    Ok(veclink_codec::decode(payload_bytes)?)
}

pub(crate) fn compress_lz4(data: &[u8]) -> Result<Bytes> {
    let mut encoder = lz4_flex::frame::FrameEncoder::new(Vec::new());
    encoder
        .write_all(data)
        .map_err(|e| FrameError::CompressionFailed(e.to_string()))?;
    let out = encoder
        .finish()
        .map_err(|e| FrameError::CompressionFailed(e.to_string()))?;
    Ok(Bytes::from(out))
}

pub(crate) fn decompress_lz4(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = lz4_flex::frame::FrameDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| FrameError::DecompressionFailed(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use veclink_types::Value;

    use super::*;

    #[test]
    fn small_payload_stays_uncompressed() {
        let bytes = encode_message(&Value::int(42), true).unwrap();
        let header = Header::decode(&mut &bytes[..]).unwrap();
        assert!(!header.is_compressed());
        assert_eq!(header.len as usize, bytes.len() - HEADER_SIZE);
        assert_eq!(decode_message(&bytes).unwrap(), Value::int(42));
    }

    #[test]
    fn large_payload_compresses() {
        // 4 tag + 4 len + 10_000 * 4 element bytes = 40_008 uncompressed.
        let v = Value::int_vec((0..10_000).collect());
        let bytes = encode_message(&v, true).unwrap();
        let header = Header::decode(&mut &bytes[..]).unwrap();
        assert!(header.is_compressed());
        assert_eq!(header.len as usize, bytes.len() - HEADER_SIZE);
        assert!((bytes.len() as u64) < 40_008);
        assert_eq!(decode_message(&bytes).unwrap(), v);
    }

    #[test]
    fn large_payload_without_hint_stays_uncompressed() {
        let v = Value::int_vec((0..10_000).collect());
        let bytes = encode_message(&v, false).unwrap();
        let header = Header::decode(&mut &bytes[..]).unwrap();
        assert!(!header.is_compressed());
        assert_eq!(header.len, 40_008);
        assert_eq!(decode_message(&bytes).unwrap(), v);
    }

    #[test]
    fn threshold_boundary() {
        // Char vector: 4 tag + 4 len + n bytes. Payload of exactly 4096
        // stays uncompressed, 4097 compresses.
        let at_limit = Value::char_vec(vec![b'a'; UNCOMPRESSED_SIZE_LIMIT - 8]);
        let bytes = encode_message(&at_limit, true).unwrap();
        assert!(!Header::decode(&mut &bytes[..]).unwrap().is_compressed());

        let over_limit = Value::char_vec(vec![b'a'; UNCOMPRESSED_SIZE_LIMIT - 7]);
        let bytes = encode_message(&over_limit, true).unwrap();
        assert!(Header::decode(&mut &bytes[..]).unwrap().is_compressed());
    }

    #[test]
    fn unsupported_header_rejected() {
        let mut bytes = encode_message(&Value::Nil, false).unwrap().to_vec();
        bytes[3] |= 0x80; // set the UNSUPPORTED bit in the features word
        assert!(matches!(
            decode_message(&bytes).unwrap_err(),
            FrameError::PeerUnsupported
        ));
    }

    #[test]
    fn zero_len_reads_to_end() {
        let payload = veclink_codec::encode(&Value::long(7)).unwrap();
        let mut bytes = Vec::new();
        let mut buf = BytesMut::new();
        Header::new().encode(&mut buf); // len stays 0
        bytes.extend_from_slice(&buf);
        bytes.extend_from_slice(&payload);
        assert_eq!(decode_message(&bytes).unwrap(), Value::long(7));
    }

    #[test]
    fn truncated_body_is_short_read() {
        let v = Value::char_vec(vec![b'x'; 100]);
        let bytes = encode_message(&v, false).unwrap();
        assert!(matches!(
            decode_message(&bytes[..bytes.len() - 10]).unwrap_err(),
            FrameError::ShortRead { .. }
        ));
    }

    #[test]
    fn trailing_bytes_after_body_ignored() {
        let mut bytes = encode_message(&Value::int(5), false).unwrap().to_vec();
        bytes.extend_from_slice(&[0xEE; 16]);
        assert_eq!(decode_message(&bytes).unwrap(), Value::int(5));
    }

    #[test]
    fn corrupt_compressed_body_fails() {
        let v = Value::int_vec((0..10_000).collect());
        let mut bytes = encode_message(&v, true).unwrap().to_vec();
        let last = bytes.len() - 1;
        bytes[HEADER_SIZE..=last].fill(0x55);
        assert!(matches!(
            decode_message(&bytes).unwrap_err(),
            FrameError::DecompressionFailed(_)
        ));
    }

    #[test]
    fn sentinels_survive_framed_roundtrip() {
        use veclink_types::{null, LongKind};

        let v = Value::long_vec(vec![
            100,
            null::NULL_LONG,
            null::INF_LONG,
            null::NEG_INF_LONG,
            0,
            -500,
        ]);
        let wire = encode_message(&v, false).unwrap();
        match decode_message(&wire).unwrap() {
            Value::LongVec(LongKind::Long, xs) => {
                assert_eq!(xs.len(), 6);
                assert!(null::is_null_long(xs[1]));
                assert!(null::is_pos_inf_long(xs[2]));
                assert!(null::is_neg_inf_long(xs[3]));
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn nested_tags_survive_compress_hint() {
        use veclink_types::{DictKind, ListKind};

        let v = Value::list(vec![
            Value::int(42),
            Value::from("Hello, World!"),
            Value::list(vec![Value::Float(3.14), Value::int_vec(vec![1, 2, 3, 4, 5])]),
            Value::dict(
                Value::symbol_vec(vec!["key1".into(), "key2".into()]),
                Value::int_vec(vec![100, 200]),
            ),
        ]);
        let wire = encode_message(&v, true).unwrap();
        let decoded = decode_message(&wire).unwrap();
        assert_eq!(decoded, v);
        match &decoded {
            Value::List(ListKind::List, items) => {
                assert!(matches!(items[2], Value::List(ListKind::List, _)));
                assert!(matches!(items[3], Value::Dict(DictKind::Dict, _, _)));
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn lz4_roundtrip() {
        let data = vec![7u8; 10_000];
        let compressed = compress_lz4(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress_lz4(&compressed).unwrap(), data);
    }
}
