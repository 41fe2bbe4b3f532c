use crate::error::{Error, Result};

/// Logical type of a property value, as discriminated by the one-byte wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,
    BoolArray,
    I32Array,
    I64Array,
    F32Array,
    F64Array,
}

impl ValueKind {
    const COUNT: usize = 13;

    fn index(self) -> usize {
        self as usize
    }

    /// Whether this kind is an array subtype wrapper.
    pub fn is_array(self) -> bool {
        matches!(
            self,
            ValueKind::BoolArray
                | ValueKind::I32Array
                | ValueKind::I64Array
                | ValueKind::F32Array
                | ValueKind::F64Array
        )
    }
}

/// Bidirectional map between logical value types and their reserved wire tags.
///
/// A registry is configuration, not state: build it once (usually via
/// [`TagRegistry::standard`]) and pass it by reference into every codec call.
/// Mutating a registry while decodes are in flight is a programming error,
/// which the borrow checker rules out for same-process concurrent decodes.
pub struct TagRegistry {
    by_kind: [Option<u8>; ValueKind::COUNT],
    by_tag: [Option<ValueKind>; 256],
}

impl TagRegistry {
    /// An empty registry with no tags claimed.
    pub fn empty() -> Self {
        Self {
            by_kind: [None; ValueKind::COUNT],
            by_tag: [None; 256],
        }
    }

    /// The reserved tag assignment used by binary FBX files.
    pub fn standard() -> Self {
        let mut reg = Self::empty();
        let assignments = [
            (ValueKind::Bool, b'C'),
            (ValueKind::I16, b'Y'),
            (ValueKind::I32, b'I'),
            (ValueKind::I64, b'L'),
            (ValueKind::F32, b'F'),
            (ValueKind::F64, b'D'),
            (ValueKind::String, b'S'),
            (ValueKind::Bytes, b'R'),
            (ValueKind::BoolArray, b'b'),
            (ValueKind::I32Array, b'i'),
            (ValueKind::I64Array, b'l'),
            (ValueKind::F32Array, b'f'),
            (ValueKind::F64Array, b'd'),
        ];
        for (kind, tag) in assignments {
            // Tags are distinct literals; registration cannot collide here.
            reg.register(kind, tag)
                .unwrap_or_else(|_| unreachable!("standard tags are unique"));
        }
        reg
    }

    /// Claim `tag` for `kind`. Re-registering the same pair is a no-op;
    /// claiming a tag already held by a different kind fails.
    pub fn register(&mut self, kind: ValueKind, tag: u8) -> Result<()> {
        match self.by_tag[tag as usize] {
            Some(existing) if existing != kind => return Err(Error::DuplicateTag { tag }),
            _ => {}
        }
        self.by_tag[tag as usize] = Some(kind);
        self.by_kind[kind.index()] = Some(tag);
        Ok(())
    }

    /// Wire tag for a logical type.
    pub fn tag_of(&self, kind: ValueKind) -> Result<u8> {
        self.by_kind[kind.index()].ok_or(Error::UnknownType { kind })
    }

    /// Logical type for a wire tag read from the stream.
    pub fn kind_of(&self, tag: u8) -> Result<ValueKind> {
        self.by_tag[tag as usize].ok_or(Error::UnknownTag { tag })
    }

    /// Whether `tag` is claimed.
    pub fn contains_tag(&self, tag: u8) -> bool {
        self.by_tag[tag as usize].is_some()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
