//! Scalar property codec: fixed-width numerics and booleans, plus
//! length-prefixed strings and raw byte blobs. All little-endian.

use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::tag::{TagRegistry, ValueKind};
use crate::value::Value;

/// Encode one scalar value.
///
/// With `prefix` set, the registry tag byte for the value's type is written
/// before the payload; an unregistered type fails with `UnknownType`.
/// Array values are not scalars and fail with `UnsupportedType`.
pub fn encode_scalar(w: &mut Writer, value: &Value, tags: &TagRegistry, prefix: bool) -> Result<()> {
    if let Value::Array(_) = value {
        return Err(Error::UnsupportedType { kind: value.kind() });
    }

    if prefix {
        let tag = tags.tag_of(value.kind())?;
        w.write_u8(tag);
    }

    match value {
        Value::Bool(v) => w.write_u8(*v as u8),
        Value::I16(v) => w.write_i16(*v),
        Value::I32(v) => w.write_i32(*v),
        Value::I64(v) => w.write_i64(*v),
        Value::F32(v) => w.write_f32(*v),
        Value::F64(v) => w.write_f64(*v),
        Value::String(s) => {
            w.write_u32(s.len() as u32);
            w.write_bytes(s.as_bytes());
        }
        Value::Bytes(b) => {
            w.write_u32(b.len() as u32);
            w.write_bytes(b);
        }
        Value::Array(_) => unreachable!("rejected above"),
    }

    Ok(())
}

/// Decode one scalar value of a known kind. Array kinds are not scalars.
pub fn decode_scalar(c: &mut Cursor, kind: ValueKind) -> Result<Value> {
    let value = match kind {
        ValueKind::Bool => Value::Bool(c.read_u8()? != 0),
        ValueKind::I16 => Value::I16(c.read_i16()?),
        ValueKind::I32 => Value::I32(c.read_i32()?),
        ValueKind::I64 => Value::I64(c.read_i64()?),
        ValueKind::F32 => Value::F32(c.read_f32()?),
        ValueKind::F64 => Value::F64(c.read_f64()?),
        ValueKind::String => Value::String(decode_string(c)?),
        ValueKind::Bytes => Value::Bytes(decode_blob(c)?.to_vec()),
        _ => return Err(Error::UnsupportedType { kind }),
    };
    Ok(value)
}

/// Read a 4-byte length prefix followed by that many UTF-8 bytes.
/// A zero length yields an empty string.
pub fn decode_string(c: &mut Cursor) -> Result<String> {
    let offset = c.position();
    let bytes = decode_blob(c)?;
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::InvalidString { offset, source: e })
}

/// Read a 4-byte length prefix followed by that many raw bytes.
pub fn decode_blob<'a>(c: &mut Cursor<'a>) -> Result<&'a [u8]> {
    let len = c.read_u32()? as usize;
    c.read_bytes(len)
}
