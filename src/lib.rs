//! Reader/writer for the binary FBX scene-interchange format.
//!
//! Three-layer architecture:
//! - **Layer 1** (`cursor`/`scalar`/`array`): raw little-endian I/O — fixed
//!   width scalars, length-prefixed strings/blobs, optionally compressed
//!   homogeneous arrays
//! - **Layer 2** (`record`): the recursive node record codec, driven by the
//!   one-byte type tag dispatch in `tag`
//! - **Layer 3** (`file`): magic header, format version, top-level record
//!   loop, footer padding
//!
//! The `schema` module holds the declarative alias tables consulted when a
//! decoded child is reattached to its parent. Tag and schema registries are
//! configuration: build them once and pass them by reference into every
//! codec call.

pub mod array;
pub mod cursor;
pub mod error;
pub mod file;
pub mod node;
pub mod record;
pub mod scalar;
pub mod schema;
pub mod tag;
pub mod value;
pub mod version;

pub use error::{Error, Result};
pub use file::{decode_file, encode_file, File, MAGIC};
pub use node::{Child, Node, Slot};
pub use record::{decode_node, encode_node};
pub use schema::{DeclaredType, FieldSpec, SchemaRegistry, Shape};
pub use tag::{TagRegistry, ValueKind};
pub use value::{Array, ArrayData, ArrayEncoding, Value};
pub use version::FormatVersion;
