//! Value tree decoder.
//!
//! Reads one `tag (u32 LE)` and dispatches on it, consuming exactly the
//! payload the tag prescribes. Tags outside the wire subset fail with
//! [`CodecError::UnknownTag`] before any payload is consumed. Trailing bytes
//! after the top-level value are left in the buffer for the caller; the
//! framing layer treats the header length as authoritative and ignores them.

use bytes::Buf;
use uuid::Uuid;
use veclink_types::{
    tag, DictKind, IntKind, Lambda, LambdaKind, ListKind, LongKind, SymbolKind, Value,
};

use crate::error::{CodecError, Result};

/// Decode a single value from the front of `bytes`, ignoring any trailing
/// bytes.
pub fn decode(mut bytes: &[u8]) -> Result<Value> {
    decode_value(&mut bytes)
}

/// Decode a single value from a cursor, leaving the cursor just past it.
pub fn decode_value<B: Buf>(buf: &mut B) -> Result<Value> {
    let t = read_u32(buf)?;

    match t {
        tag::NIL => Ok(Value::Nil),
        tag::ANY => Ok(Value::Any),
        tag::LAMBDA_REC => Ok(Value::LambdaRec),
        tag::REAGENT => Ok(Value::Reagent),

        tag::SC_BOOL => Ok(Value::Bool(read_u8(buf)? != 0)),
        tag::SC_BYTE => Ok(Value::Byte(read_u8(buf)? as i8)),
        tag::SC_SHORT => {
            need(buf, 2)?;
            Ok(Value::Short(buf.get_i16_le()))
        }
        tag::SC_INT | tag::SC_MONTH | tag::SC_DATE | tag::SC_MINUTE | tag::SC_SECOND
        | tag::SC_TIME => {
            let kind = IntKind::from_scalar_tag(t).ok_or(CodecError::UnknownTag(t))?;
            need(buf, 4)?;
            Ok(Value::Int(kind, buf.get_i32_le()))
        }
        tag::SC_ENUM => Ok(Value::Enum(read_u32(buf)?)),
        tag::SC_LONG | tag::SC_TIMESTAMP | tag::SC_DATETIME | tag::SC_TIMESPAN => {
            let kind = LongKind::from_scalar_tag(t).ok_or(CodecError::UnknownTag(t))?;
            need(buf, 8)?;
            Ok(Value::Long(kind, buf.get_i64_le()))
        }
        tag::SC_REAL => {
            need(buf, 4)?;
            Ok(Value::Real(buf.get_f32_le()))
        }
        tag::SC_FLOAT => {
            need(buf, 8)?;
            Ok(Value::Float(buf.get_f64_le()))
        }
        tag::SC_GUID => Ok(Value::Guid(read_guid(buf)?)),
        tag::SC_SYMBOL | tag::SC_SHADOW => {
            let kind = SymbolKind::from_scalar_tag(t).ok_or(CodecError::UnknownTag(t))?;
            Ok(Value::Symbol(kind, read_symbol(buf)?))
        }

        tag::VEC_BOOL => {
            let len = read_vec_len(buf, 1)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_u8() != 0);
            }
            Ok(Value::BoolVec(v))
        }
        tag::VEC_BYTE => {
            let len = read_vec_len(buf, 1)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_u8() as i8);
            }
            Ok(Value::ByteVec(v))
        }
        tag::VEC_SHORT => {
            let len = read_vec_len(buf, 2)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_i16_le());
            }
            Ok(Value::ShortVec(v))
        }
        tag::VEC_INT | tag::VEC_MONTH | tag::VEC_DATE | tag::VEC_MINUTE | tag::VEC_SECOND
        | tag::VEC_TIME => {
            let kind =
                IntKind::from_scalar_tag(tag::scalar_of(t)).ok_or(CodecError::UnknownTag(t))?;
            let len = read_vec_len(buf, 4)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_i32_le());
            }
            Ok(Value::IntVec(kind, v))
        }
        tag::VEC_ENUM => {
            let len = read_vec_len(buf, 4)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_u32_le());
            }
            Ok(Value::EnumVec(v))
        }
        tag::VEC_LONG | tag::VEC_TIMESTAMP | tag::VEC_DATETIME | tag::VEC_TIMESPAN => {
            let kind =
                LongKind::from_scalar_tag(tag::scalar_of(t)).ok_or(CodecError::UnknownTag(t))?;
            let len = read_vec_len(buf, 8)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_i64_le());
            }
            Ok(Value::LongVec(kind, v))
        }
        tag::VEC_REAL => {
            let len = read_vec_len(buf, 4)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_f32_le());
            }
            Ok(Value::RealVec(v))
        }
        tag::VEC_FLOAT => {
            let len = read_vec_len(buf, 8)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(buf.get_f64_le());
            }
            Ok(Value::FloatVec(v))
        }
        tag::VEC_GUID => {
            let len = read_vec_len(buf, 16)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(read_guid(buf)?);
            }
            Ok(Value::GuidVec(v))
        }
        tag::VEC_SYMBOL | tag::VEC_SHADOW => {
            let kind =
                SymbolKind::from_scalar_tag(tag::scalar_of(t)).ok_or(CodecError::UnknownTag(t))?;
            let len = read_vec_len(buf, 1)?;
            let mut v = Vec::with_capacity(len);
            for _ in 0..len {
                v.push(read_symbol(buf)?);
            }
            Ok(Value::SymbolVec(kind, v))
        }
        tag::VEC_CHAR => {
            let len = read_vec_len(buf, 1)?;
            Ok(Value::CharVec(buf.copy_to_bytes(len)))
        }

        tag::LIST | tag::LIST_EXPR | tag::RETURN => {
            let kind = ListKind::from_tag(t).ok_or(CodecError::UnknownTag(t))?;
            let len = read_vec_len(buf, 4)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(decode_value(buf)?);
            }
            Ok(Value::List(kind, items))
        }
        tag::DICT | tag::DICT_TABLE => {
            let kind = DictKind::from_tag(t).ok_or(CodecError::UnknownTag(t))?;
            let keys = decode_value(buf)?;
            let values = decode_value(buf)?;
            Ok(Value::Dict(kind, Box::new(keys), Box::new(values)))
        }
        tag::TABLE => {
            let keys = decode_value(buf)?;
            let values = decode_value(buf)?;
            Ok(Value::Table(Box::new(keys), Box::new(values)))
        }
        tag::PATTERN => {
            let exprs = decode_value(buf)?;
            let arms = decode_value(buf)?;
            Ok(Value::Pattern(Box::new(exprs), Box::new(arms)))
        }
        tag::LAMBDA | tag::CLOSURE => {
            let kind = LambdaKind::from_tag(t).ok_or(CodecError::UnknownTag(t))?;
            Ok(Value::Lambda(kind, Box::new(read_lambda(buf)?)))
        }

        other => Err(CodecError::UnknownTag(other)),
    }
}

fn need<B: Buf>(buf: &B, needed: usize) -> Result<()> {
    if buf.remaining() < needed {
        return Err(CodecError::ShortRead {
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

fn read_u8<B: Buf>(buf: &mut B) -> Result<u8> {
    need(buf, 1)?;
    Ok(buf.get_u8())
}

fn read_u32<B: Buf>(buf: &mut B) -> Result<u32> {
    need(buf, 4)?;
    Ok(buf.get_u32_le())
}

/// Read a `u32` element count and check the buffer can hold `len` elements
/// of at least `min_elem` bytes each, so the per-element loops below cannot
/// run past the buffer and `with_capacity` is bounded by real input.
fn read_vec_len<B: Buf>(buf: &mut B, min_elem: usize) -> Result<usize> {
    let len = read_u32(buf)? as usize;
    let needed = len
        .checked_mul(min_elem)
        .ok_or(CodecError::Overflow {
            what: "vector",
            len,
        })?;
    need(buf, needed)?;
    Ok(len)
}

fn read_guid<B: Buf>(buf: &mut B) -> Result<Uuid> {
    need(buf, 16)?;
    let mut raw = [0u8; 16];
    buf.copy_to_slice(&mut raw);
    Ok(Uuid::from_bytes(raw))
}

fn read_symbol<B: Buf>(buf: &mut B) -> Result<String> {
    let len = read_u8(buf)? as usize;
    need(buf, len)?;
    let mut raw = vec![0u8; len];
    buf.copy_to_slice(&mut raw);
    String::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8("symbol"))
}

fn read_lambda<B: Buf>(buf: &mut B) -> Result<Lambda> {
    let text_len = read_u32(buf)? as usize;
    need(buf, text_len)?;
    let mut raw = vec![0u8; text_len];
    buf.copy_to_slice(&mut raw);
    let text = String::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8("lambda text"))?;

    need(buf, 4)?;
    let cargs = buf.get_u16_le();
    let clocals = buf.get_u16_le();

    let bind = decode_value(buf)?;
    let channels = decode_value(buf)?;
    let args = decode_value(buf)?;
    let locals = decode_value(buf)?;
    let body = decode_value(buf)?;
    let upvals = decode_value(buf)?;

    Ok(Lambda {
        text,
        cargs,
        clocals,
        bind,
        channels,
        args,
        locals,
        body,
        upvals,
    })
}

#[cfg(test)]
mod tests {
    use veclink_types::null;

    use super::*;
    use crate::ser::encode;

    #[test]
    fn int_scalar_roundtrip() {
        let bytes = encode(&Value::int(42)).unwrap();
        assert_eq!(decode(&bytes).unwrap(), Value::int(42));
    }

    #[test]
    fn null_long_roundtrip() {
        let bytes = encode(&Value::null_long()).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert!(matches!(decoded, Value::Long(LongKind::Long, v) if null::is_null_long(v)));
    }

    #[test]
    fn unknown_tag_rejected() {
        // A deque tag is lattice-valid but never travels.
        let bytes = tag::DEQ_LONG.to_le_bytes();
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::UnknownTag(t) if t == tag::DEQ_LONG));

        let bytes = 0xDEAD_BEEFu32.to_le_bytes();
        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CodecError::UnknownTag(0xDEAD_BEEF)
        ));
    }

    #[test]
    fn truncated_scalar_is_short_read() {
        let mut bytes = encode(&Value::long(77)).unwrap().to_vec();
        bytes.truncate(7);
        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CodecError::ShortRead { .. }
        ));
    }

    #[test]
    fn truncated_vector_is_short_read() {
        let mut bytes = encode(&Value::int_vec(vec![1, 2, 3])).unwrap().to_vec();
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CodecError::ShortRead { .. }
        ));
    }

    #[test]
    fn declared_length_beyond_buffer_is_short_read() {
        let mut bytes = tag::VEC_LONG.to_le_bytes().to_vec();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CodecError::ShortRead { .. }
        ));
    }

    #[test]
    fn invalid_symbol_utf8_rejected() {
        let mut bytes = tag::SC_SYMBOL.to_le_bytes().to_vec();
        bytes.push(2);
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CodecError::InvalidUtf8("symbol")
        ));
    }

    #[test]
    fn char_vec_accepts_raw_bytes() {
        let v = Value::char_vec(vec![0xFFu8, 0x00, 0x7F]);
        let bytes = encode(&v).unwrap();
        assert_eq!(decode(&bytes).unwrap(), v);
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut bytes = encode(&Value::int(1)).unwrap().to_vec();
        bytes.extend_from_slice(&[0xAA; 9]);
        assert_eq!(decode(&bytes).unwrap(), Value::int(1));
    }

    #[test]
    fn shadow_symbol_tag_preserved() {
        let v = Value::Symbol(SymbolKind::Shadow, "s".into());
        let bytes = encode(&v).unwrap();
        assert_eq!(decode(&bytes).unwrap(), v);

        let vv = Value::SymbolVec(SymbolKind::Shadow, vec!["a".into(), "b".into()]);
        let bytes = encode(&vv).unwrap();
        assert_eq!(decode(&bytes).unwrap(), vv);
    }

    #[test]
    fn list_kind_tags_preserved() {
        for kind in [ListKind::List, ListKind::Expr, ListKind::Return] {
            let v = Value::List(kind, vec![Value::int(1), Value::Nil]);
            let bytes = encode(&v).unwrap();
            assert_eq!(decode(&bytes).unwrap(), v);
        }
    }

    #[test]
    fn dict_kind_tags_preserved() {
        for kind in [DictKind::Dict, DictKind::KeyedTable] {
            let v = Value::Dict(
                kind,
                Box::new(Value::symbol_vec(vec!["k".into()])),
                Box::new(Value::int_vec(vec![9])),
            );
            let bytes = encode(&v).unwrap();
            assert_eq!(decode(&bytes).unwrap(), v);
        }
    }

    #[test]
    fn lambda_roundtrip() {
        let lambda = Lambda {
            text: "{x+y}".to_string(),
            cargs: 2,
            clocals: 0,
            bind: Value::Nil,
            channels: Value::Nil,
            args: Value::symbol_vec(vec!["x".into(), "y".into()]),
            locals: Value::symbol_vec(vec![]),
            body: Value::List(ListKind::Expr, vec![Value::symbol("add")]),
            upvals: Value::list(vec![]),
        };
        for kind in [LambdaKind::Lambda, LambdaKind::Closure] {
            let v = Value::Lambda(kind, Box::new(lambda.clone()));
            let bytes = encode(&v).unwrap();
            assert_eq!(decode(&bytes).unwrap(), v);
        }
    }

    #[test]
    fn guid_roundtrip_is_opaque() {
        let id = Uuid::new_v4();
        let bytes = encode(&Value::Guid(id)).unwrap();
        assert_eq!(&bytes[4..], id.as_bytes());
        assert_eq!(decode(&bytes).unwrap(), Value::Guid(id));
    }

    #[test]
    fn vector_specials_roundtrip() {
        let v = Value::long_vec(vec![
            100,
            null::NULL_LONG,
            null::INF_LONG,
            null::NEG_INF_LONG,
            0,
            -500,
        ]);
        let bytes = encode(&v).unwrap();
        let decoded = decode(&bytes).unwrap();
        match &decoded {
            Value::LongVec(LongKind::Long, xs) => {
                assert_eq!(xs.len(), 6);
                assert!(null::is_null_long(xs[1]));
                assert!(null::is_pos_inf_long(xs[2]));
                assert!(null::is_neg_inf_long(xs[3]));
            }
            other => panic!("unexpected value: {other:?}"),
        }
        assert_eq!(decoded, v);
    }
}
