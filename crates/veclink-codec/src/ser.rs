//! Value tree encoder.
//!
//! Writes `tag (u32 LE)` then the tag-specific payload, recursing into
//! container children in wire order. Multi-byte quantities are little-endian
//! throughout; floats go out as their IEEE 754 bit patterns, so the null and
//! infinity sentinels pass through untouched.

use bytes::{BufMut, Bytes, BytesMut};
use veclink_types::{Lambda, Value};

use crate::error::{CodecError, Result};

/// Maximum byte length of a symbol on the wire.
pub const MAX_SYMBOL_LEN: usize = 255;

/// Encode a value tree into a fresh buffer.
pub fn encode(value: &Value) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    encode_value(value, &mut buf)?;
    Ok(buf.freeze())
}

/// Encode a value tree into `dst`.
pub fn encode_value(value: &Value, dst: &mut BytesMut) -> Result<()> {
    dst.put_u32_le(value.tag());

    match value {
        Value::Nil | Value::Any | Value::LambdaRec | Value::Reagent => Ok(()),

        Value::Bool(v) => {
            dst.put_u8(u8::from(*v));
            Ok(())
        }
        Value::Byte(v) => {
            dst.put_i8(*v);
            Ok(())
        }
        Value::Short(v) => {
            dst.put_i16_le(*v);
            Ok(())
        }
        Value::Int(_, v) => {
            dst.put_i32_le(*v);
            Ok(())
        }
        Value::Long(_, v) => {
            dst.put_i64_le(*v);
            Ok(())
        }
        Value::Real(v) => {
            dst.put_f32_le(*v);
            Ok(())
        }
        Value::Float(v) => {
            dst.put_f64_le(*v);
            Ok(())
        }
        Value::Enum(v) => {
            dst.put_u32_le(*v);
            Ok(())
        }
        Value::Guid(v) => {
            dst.put_slice(v.as_bytes());
            Ok(())
        }
        Value::Symbol(_, s) => put_symbol(dst, s),

        Value::BoolVec(v) => {
            put_len(dst, v.len(), "bool vector")?;
            for b in v {
                dst.put_u8(u8::from(*b));
            }
            Ok(())
        }
        Value::ByteVec(v) => {
            put_len(dst, v.len(), "byte vector")?;
            for b in v {
                dst.put_i8(*b);
            }
            Ok(())
        }
        Value::ShortVec(v) => {
            put_len(dst, v.len(), "short vector")?;
            for x in v {
                dst.put_i16_le(*x);
            }
            Ok(())
        }
        Value::IntVec(_, v) => {
            put_len(dst, v.len(), "int vector")?;
            for x in v {
                dst.put_i32_le(*x);
            }
            Ok(())
        }
        Value::LongVec(_, v) => {
            put_len(dst, v.len(), "long vector")?;
            for x in v {
                dst.put_i64_le(*x);
            }
            Ok(())
        }
        Value::RealVec(v) => {
            put_len(dst, v.len(), "real vector")?;
            for x in v {
                dst.put_f32_le(*x);
            }
            Ok(())
        }
        Value::FloatVec(v) => {
            put_len(dst, v.len(), "float vector")?;
            for x in v {
                dst.put_f64_le(*x);
            }
            Ok(())
        }
        Value::EnumVec(v) => {
            put_len(dst, v.len(), "enum vector")?;
            for x in v {
                dst.put_u32_le(*x);
            }
            Ok(())
        }
        Value::GuidVec(v) => {
            put_len(dst, v.len(), "guid vector")?;
            for g in v {
                dst.put_slice(g.as_bytes());
            }
            Ok(())
        }
        Value::SymbolVec(_, v) => {
            put_len(dst, v.len(), "symbol vector")?;
            for s in v {
                put_symbol(dst, s)?;
            }
            Ok(())
        }
        Value::CharVec(v) => {
            put_len(dst, v.len(), "char vector")?;
            dst.put_slice(v);
            Ok(())
        }

        Value::List(_, items) => {
            put_len(dst, items.len(), "list")?;
            for item in items {
                encode_value(item, dst)?;
            }
            Ok(())
        }
        Value::Dict(_, keys, values) => {
            encode_value(keys, dst)?;
            encode_value(values, dst)
        }
        Value::Table(keys, values) => {
            encode_value(keys, dst)?;
            encode_value(values, dst)
        }
        Value::Pattern(exprs, arms) => {
            encode_value(exprs, dst)?;
            encode_value(arms, dst)
        }
        Value::Lambda(_, lambda) => put_lambda(dst, lambda),
    }
}

fn put_len(dst: &mut BytesMut, len: usize, what: &'static str) -> Result<()> {
    let len32 = u32::try_from(len).map_err(|_| CodecError::Overflow { what, len })?;
    dst.put_u32_le(len32);
    Ok(())
}

fn put_symbol(dst: &mut BytesMut, s: &str) -> Result<()> {
    if s.len() > MAX_SYMBOL_LEN {
        return Err(CodecError::SymbolTooLong(s.len()));
    }
    dst.put_u8(s.len() as u8);
    dst.put_slice(s.as_bytes());
    Ok(())
}

fn put_lambda(dst: &mut BytesMut, lambda: &Lambda) -> Result<()> {
    put_len(dst, lambda.text.len(), "lambda text")?;
    dst.put_slice(lambda.text.as_bytes());
    dst.put_u16_le(lambda.cargs);
    dst.put_u16_le(lambda.clocals);
    encode_value(&lambda.bind, dst)?;
    encode_value(&lambda.channels, dst)?;
    encode_value(&lambda.args, dst)?;
    encode_value(&lambda.locals, dst)?;
    encode_value(&lambda.body, dst)?;
    encode_value(&lambda.upvals, dst)
}
