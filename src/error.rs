use thiserror::Error;

use crate::tag::ValueKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid file header: expected the Kaydara FBX binary magic, found {found:?}")]
    InvalidHeader { found: Vec<u8> },

    #[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have})")]
    Truncated {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("corrupt record at offset {offset:#x}: {field} = {value} is implausible")]
    CorruptRecord {
        offset: usize,
        field: &'static str,
        value: u64,
    },

    #[error("tag {tag:#04x} is already registered to a different type")]
    DuplicateTag { tag: u8 },

    #[error("no type registered for tag {tag:#04x}")]
    UnknownTag { tag: u8 },

    #[error("no tag registered for type {kind:?}")]
    UnknownType { kind: ValueKind },

    #[error("value of type {kind:?} is not serializable as a scalar")]
    UnsupportedType { kind: ValueKind },

    #[error("{kind:?} is not a supported array element type")]
    UnsupportedSubtype { kind: ValueKind },

    #[error("node name cannot be empty")]
    EmptyName,

    #[error("node name is too long ({len} bytes, limit 255)")]
    NameTooLong { len: usize },

    #[error("string at offset {offset:#x} is not valid UTF-8: {source}")]
    InvalidString {
        offset: usize,
        source: std::string::FromUtf8Error,
    },

    #[error("failed to parse child of node {parent:?} at offset {offset:#x}")]
    NodeParse {
        parent: String,
        offset: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to inflate compressed array payload at offset {offset:#x}: {source}")]
    Inflate {
        offset: usize,
        source: std::io::Error,
    },

    #[error("failed to compress array payload: {source}")]
    Deflate { source: std::io::Error },
}

impl Error {
    /// Wrap a child-parse failure with the parent's identity and the offset
    /// at which parsing failed. Never discards the cause.
    pub(crate) fn in_node(self, parent: &str, offset: usize) -> Error {
        Error::NodeParse {
            parent: parent.to_owned(),
            offset,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
