use crate::tag::ValueKind;

/// A single typed property value attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Array),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Array(a) => a.data.kind(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

/// How an array payload is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayEncoding {
    /// Consecutive fixed-width element encodings.
    #[default]
    Raw = 0,
    /// Zlib-compressed blob of the raw element encodings.
    Compressed = 1,
}

/// A homogeneous array property with its configured wire encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub encoding: ArrayEncoding,
    pub data: ArrayData,
}

impl Array {
    pub fn raw(data: ArrayData) -> Self {
        Self {
            encoding: ArrayEncoding::Raw,
            data,
        }
    }

    pub fn compressed(data: ArrayData) -> Self {
        Self {
            encoding: ArrayEncoding::Compressed,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }
}

/// Element storage for the five supported array subtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Bool(Vec<bool>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ArrayData {
    pub fn kind(&self) -> ValueKind {
        match self {
            ArrayData::Bool(_) => ValueKind::BoolArray,
            ArrayData::I32(_) => ValueKind::I32Array,
            ArrayData::I64(_) => ValueKind::I64Array,
            ArrayData::F32(_) => ValueKind::F32Array,
            ArrayData::F64(_) => ValueKind::F64Array,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayData::Bool(v) => v.len(),
            ArrayData::I32(v) => v.len(),
            ArrayData::I64(v) => v.len(),
            ArrayData::F32(v) => v.len(),
            ArrayData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed byte width of one element.
    pub fn element_len(&self) -> usize {
        match self {
            ArrayData::Bool(_) => 1,
            ArrayData::I32(_) | ArrayData::F32(_) => 4,
            ArrayData::I64(_) | ArrayData::F64(_) => 8,
        }
    }
}
