//! Recursive node record codec.
//!
//! Record layout (field width per [`FormatVersion`]):
//!
//! ```text
//! [EndOffset][NumProperties][PropertyListByteLength][NameLength:u8][Name]
//! [PropertyBlock][NestedChildren]
//! ```
//!
//! EndOffset is the absolute stream position immediately after the last
//! nested child, so a reader can bound or skip a record without parsing its
//! contents. A record whose name length is zero is the end-of-children
//! sentinel: it is consumed but never attached, and attachment of any later
//! siblings stops while bytes continue to be consumed up to the parent's
//! EndOffset.

use log::{debug, trace};

use crate::array::{decode_array, encode_array};
use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::scalar::{decode_scalar, encode_scalar};
use crate::schema::SchemaRegistry;
use crate::tag::TagRegistry;
use crate::value::Value;
use crate::version::FormatVersion;

/// Encode one node record at the writer's current position.
///
/// The writer's position is taken as the absolute stream position, so a tree
/// encoded standalone starts at offset zero and a tree encoded by the file
/// codec starts wherever the file has written to.
pub fn encode_node(
    w: &mut Writer,
    node: &Node,
    tags: &TagRegistry,
    version: FormatVersion,
) -> Result<()> {
    if node.name.is_empty() {
        return Err(Error::EmptyName);
    }
    if node.name.len() > 255 {
        return Err(Error::NameTooLong {
            len: node.name.len(),
        });
    }

    let mut props = Writer::new();
    for value in &node.properties {
        encode_property(&mut props, value, tags)?;
    }
    let props = props.into_bytes();

    // The end offset is only known after the children are written; reserve
    // the field and backpatch.
    let end_offset_pos = w.position();
    write_header_field(w, version, 0);
    write_header_field(w, version, node.properties.len() as u64);
    write_header_field(w, version, props.len() as u64);

    w.write_u8(node.name.len() as u8);
    w.write_bytes(node.name.as_bytes());
    w.write_bytes(&props);

    for child in &node.children {
        encode_node(w, &child.node, tags, version)?;
    }

    patch_header_field(w, version, end_offset_pos, w.position() as u64);
    Ok(())
}

/// Encode a standalone node tree to bytes.
pub fn encode(node: &Node, tags: &TagRegistry, version: FormatVersion) -> Result<Vec<u8>> {
    let mut w = Writer::new();
    encode_node(&mut w, node, tags, version)?;
    Ok(w.into_bytes())
}

/// Decode one node record at the cursor's current position.
///
/// Returns `None` for the end-of-children sentinel (zero-length name). On
/// success the cursor sits exactly at the record's EndOffset.
pub fn decode_node(
    c: &mut Cursor,
    tags: &TagRegistry,
    schema: &SchemaRegistry,
    version: FormatVersion,
) -> Result<Option<Node>> {
    let record_start = c.position();

    let end_offset = read_header_field(c, version)? as usize;
    let num_properties = read_header_field(c, version)?;
    let props_len = read_header_field(c, version)? as usize;

    let name_len = c.read_u8()? as usize;
    if name_len == 0 {
        // Sentinel. A well-formed one is all zeros; tolerate a nonzero end
        // offset by skipping to it so the parent's loop stays aligned.
        if end_offset > c.position() && end_offset <= c.len() {
            c.seek(end_offset);
        }
        return Ok(None);
    }

    if end_offset < c.position() || end_offset > c.len() {
        return Err(Error::CorruptRecord {
            offset: record_start,
            field: "end offset",
            value: end_offset as u64,
        });
    }
    // Both lengths are decoder-controlled; compare against the record span
    // without arithmetic that could wrap.
    let span = end_offset - c.position();
    if name_len > span || props_len > span - name_len {
        return Err(Error::CorruptRecord {
            offset: record_start,
            field: "property list length",
            value: props_len as u64,
        });
    }

    let name_offset = c.position();
    let name_bytes = c.read_bytes(name_len)?;
    let name = String::from_utf8(name_bytes.to_vec()).map_err(|e| Error::InvalidString {
        offset: name_offset,
        source: e,
    })?;

    // Parse exactly props_len bytes as tag-dispatched property values.
    let props_start = c.position();
    let mut properties = Vec::new();
    while c.position() - props_start < props_len {
        properties.push(decode_property(c, tags)?);
    }
    if c.position() - props_start != props_len {
        return Err(Error::CorruptRecord {
            offset: props_start,
            field: "property block",
            value: (c.position() - props_start) as u64,
        });
    }
    if properties.len() as u64 != num_properties {
        debug!(
            "node {:?}: declared {} properties, parsed {}",
            name,
            num_properties,
            properties.len()
        );
    }

    let mut node = Node {
        name,
        properties,
        children: Vec::new(),
    };

    // Children run until EndOffset. Once a sentinel is seen, later siblings
    // are still consumed but no longer attached.
    let mut attaching = true;
    while c.position() < end_offset {
        let child_offset = c.position();
        let child = match decode_node(c, tags, schema, version) {
            Ok(child) => child,
            Err(e) => return Err(e.in_node(&node.name, child_offset)),
        };
        match child {
            Some(child) if attaching => node.attach(child, schema),
            Some(child) => trace!("node {:?}: discarding child {:?} after sentinel", node.name, child.name),
            None => attaching = false,
        }
    }
    if c.position() != end_offset {
        return Err(Error::CorruptRecord {
            offset: record_start,
            field: "end offset",
            value: end_offset as u64,
        });
    }

    trace!(
        "parsed node {:?}: {} properties, {} children, end offset {:#x}",
        node.name,
        node.properties.len(),
        node.children.len(),
        end_offset
    );
    Ok(Some(node))
}

/// Encode one property: registry tag byte, then the payload.
fn encode_property(w: &mut Writer, value: &Value, tags: &TagRegistry) -> Result<()> {
    match value {
        Value::Array(arr) => {
            w.write_u8(tags.tag_of(arr.data.kind())?);
            encode_array(w, arr)
        }
        scalar => encode_scalar(w, scalar, tags, true),
    }
}

/// Decode one tag-dispatched property.
pub fn decode_property(c: &mut Cursor, tags: &TagRegistry) -> Result<Value> {
    let tag = c.read_u8()?;
    let kind = tags.kind_of(tag)?;
    if kind.is_array() {
        Ok(Value::Array(decode_array(c, kind)?))
    } else {
        decode_scalar(c, kind)
    }
}

fn write_header_field(w: &mut Writer, version: FormatVersion, v: u64) {
    if version.wide_headers() {
        w.write_u64(v);
    } else {
        w.write_u32(v as u32);
    }
}

fn patch_header_field(w: &mut Writer, version: FormatVersion, pos: usize, v: u64) {
    if version.wide_headers() {
        w.patch_u64(pos, v);
    } else {
        w.patch_u32(pos, v as u32);
    }
}

fn read_header_field(c: &mut Cursor, version: FormatVersion) -> Result<u64> {
    if version.wide_headers() {
        c.read_u64()
    } else {
        Ok(c.read_u32()? as u64)
    }
}
