//! Top-level file codec: magic signature, format version, the top-level
//! record sequence, and the zero-filled footer padding.

use log::debug;

use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::node::{attach_to, Child, Node};
use crate::record::{decode_node, encode_node};
use crate::schema::SchemaRegistry;
use crate::tag::TagRegistry;
use crate::version::FormatVersion;

/// Literal magic signature opening every binary FBX file.
pub const MAGIC: &[u8; 23] = b"Kaydara FBX Binary  \x00\x1a\x00";

/// Schema type name under which top-level children attach.
const ROOT_TYPE: &str = "root";

/// The root pseudo-node: owns the format version and the ordered top-level
/// children. It is never serialized as a record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub version: FormatVersion,
    pub children: Vec<Child>,
}

impl File {
    pub fn new(version: FormatVersion) -> Self {
        Self {
            version,
            children: Vec::new(),
        }
    }

    /// Attach a top-level child, consulting the root alias table.
    pub fn attach(&mut self, node: Node, schema: &SchemaRegistry) {
        attach_to(ROOT_TYPE, &mut self.children, node, schema);
    }

    /// Top-level child occupying a named root slot.
    pub fn get(&self, attribute: &str) -> Option<&Node> {
        self.children.iter().find_map(|c| match &c.slot {
            crate::node::Slot::Named(a) if *a == attribute => Some(&c.node),
            _ => None,
        })
    }

    /// All top-level children in file order.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().map(|c| &c.node)
    }
}

/// Encode a whole file: magic, version, each top-level record, footer.
pub fn encode_file(file: &File, tags: &TagRegistry) -> Result<Vec<u8>> {
    let mut w = Writer::new();
    w.write_bytes(MAGIC);
    w.write_u32(file.version.0);
    for child in &file.children {
        encode_node(&mut w, &child.node, tags, file.version)?;
    }
    w.write_zeros(file.version.footer_len());
    Ok(w.into_bytes())
}

/// Decode a whole file from a byte slice.
///
/// The slice's known total length bounds the top-level loop. Decoding stops
/// once only footer padding remains; a footer shorter than the nominal
/// length is tolerated as long as no further record header can be parsed
/// from it.
pub fn decode_file(data: &[u8], tags: &TagRegistry, schema: &SchemaRegistry) -> Result<File> {
    let mut c = Cursor::new(data);

    let found = c.peek_bytes(MAGIC.len());
    if found != MAGIC {
        return Err(Error::InvalidHeader {
            found: found.to_vec(),
        });
    }
    c.skip(MAGIC.len())?;

    let version = FormatVersion(c.read_u32()?);
    debug!("decoding FBX binary, format version {version}");

    let mut file = File::new(version);
    while c.remaining() > 0 {
        // All-zero bytes where a record header would start mean we've hit
        // the footer padding.
        let ahead = c.peek_bytes(version.null_record_len());
        if ahead.iter().all(|&b| b == 0) {
            break;
        }

        let offset = c.position();
        match decode_node(&mut c, tags, schema, version) {
            Ok(Some(node)) => {
                debug!("top-level record {:?} at offset {offset:#x}", node.name);
                file.attach(node, schema);
            }
            Ok(None) => break,
            Err(e) => return Err(e.in_node("(root)", offset)),
        }
    }

    Ok(file)
}
