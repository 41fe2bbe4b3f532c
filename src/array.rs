//! Homogeneous array codec.
//!
//! Wire layout: `[count:u32][encoding:u32][payload_len:u32][payload]`.
//! RAW payloads are `count` consecutive fixed-width element encodings.
//! COMPRESSED payloads are a zlib blob of the RAW form; `payload_len` is
//! always the byte count consumed from the stream, so for compressed arrays
//! it is the compressed size, never the inflated one.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::tag::ValueKind;
use crate::value::{Array, ArrayData, ArrayEncoding};

/// Encode an array property, choosing RAW or COMPRESSED from the array's
/// own encoding setting.
pub fn encode_array(w: &mut Writer, arr: &Array) -> Result<()> {
    w.write_u32(arr.len() as u32);
    w.write_u32(arr.encoding as u32);

    let mut elements = Writer::with_capacity(arr.len() * arr.data.element_len());
    write_elements(&mut elements, &arr.data);
    let raw = elements.into_bytes();

    let payload = match arr.encoding {
        ArrayEncoding::Raw => raw,
        ArrayEncoding::Compressed => deflate(&raw)?,
    };

    w.write_u32(payload.len() as u32);
    w.write_bytes(&payload);
    Ok(())
}

/// Decode an array property whose subtype was already resolved from its tag.
pub fn decode_array(c: &mut Cursor, kind: ValueKind) -> Result<Array> {
    let count_offset = c.position();
    let count = c.read_u32()? as usize;

    let encoding_offset = c.position();
    let encoding_word = c.read_u32()?;
    let encoding = match encoding_word {
        0 => ArrayEncoding::Raw,
        1 => ArrayEncoding::Compressed,
        other => {
            return Err(Error::CorruptRecord {
                offset: encoding_offset,
                field: "array encoding",
                value: other as u64,
            })
        }
    };

    let len_offset = c.position();
    let payload_len = c.read_u32()? as usize;
    if payload_len > c.remaining() {
        return Err(Error::CorruptRecord {
            offset: len_offset,
            field: "array payload length",
            value: payload_len as u64,
        });
    }

    let element_len = element_len_of(kind)?;

    let data = match encoding {
        ArrayEncoding::Raw => {
            // Bound the element count against the declared payload before
            // reserving anything.
            if count * element_len > payload_len {
                return Err(Error::CorruptRecord {
                    offset: count_offset,
                    field: "array element count",
                    value: count as u64,
                });
            }
            read_elements(c, kind, count)?
        }
        ArrayEncoding::Compressed => {
            let payload_offset = c.position();
            let compressed = c.read_bytes(payload_len)?;
            let inflated = inflate(compressed, payload_offset)?;
            if count * element_len > inflated.len() {
                return Err(Error::CorruptRecord {
                    offset: count_offset,
                    field: "array element count",
                    value: count as u64,
                });
            }
            let mut inner = Cursor::new(&inflated);
            read_elements(&mut inner, kind, count)?
        }
    };

    Ok(Array { encoding, data })
}

fn element_len_of(kind: ValueKind) -> Result<usize> {
    match kind {
        ValueKind::BoolArray => Ok(1),
        ValueKind::I32Array | ValueKind::F32Array => Ok(4),
        ValueKind::I64Array | ValueKind::F64Array => Ok(8),
        other => Err(Error::UnsupportedSubtype { kind: other }),
    }
}

fn write_elements(w: &mut Writer, data: &ArrayData) {
    match data {
        ArrayData::Bool(v) => {
            for &b in v {
                w.write_u8(b as u8);
            }
        }
        ArrayData::I32(v) => {
            for &x in v {
                w.write_i32(x);
            }
        }
        ArrayData::I64(v) => {
            for &x in v {
                w.write_i64(x);
            }
        }
        ArrayData::F32(v) => {
            for &x in v {
                w.write_f32(x);
            }
        }
        ArrayData::F64(v) => {
            for &x in v {
                w.write_f64(x);
            }
        }
    }
}

fn read_elements(c: &mut Cursor, kind: ValueKind, count: usize) -> Result<ArrayData> {
    let data = match kind {
        ValueKind::BoolArray => {
            let mut v = Vec::with_capacity(count);
            for _ in 0..count {
                v.push(c.read_u8()? != 0);
            }
            ArrayData::Bool(v)
        }
        ValueKind::I32Array => {
            let mut v = Vec::with_capacity(count);
            for _ in 0..count {
                v.push(c.read_i32()?);
            }
            ArrayData::I32(v)
        }
        ValueKind::I64Array => {
            let mut v = Vec::with_capacity(count);
            for _ in 0..count {
                v.push(c.read_i64()?);
            }
            ArrayData::I64(v)
        }
        ValueKind::F32Array => {
            let mut v = Vec::with_capacity(count);
            for _ in 0..count {
                v.push(c.read_f32()?);
            }
            ArrayData::F32(v)
        }
        ValueKind::F64Array => {
            let mut v = Vec::with_capacity(count);
            for _ in 0..count {
                v.push(c.read_f64()?);
            }
            ArrayData::F64(v)
        }
        other => return Err(Error::UnsupportedSubtype { kind: other }),
    };
    Ok(data)
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(raw)
        .and_then(|_| encoder.finish())
        .map_err(|e| Error::Deflate { source: e })
}

fn inflate(compressed: &[u8], offset: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::Inflate { offset, source: e })?;
    Ok(out)
}
