//! Node record codec: round trips, sentinel handling, attachment rules,
//! and corrupt-input failure modes.

use fbxbin::cursor::{Cursor, Writer};
use fbxbin::record::{decode_node, encode, encode_node};
use fbxbin::{
    Array, ArrayData, DeclaredType, Error, FormatVersion, Node, SchemaRegistry, Slot, TagRegistry,
    Value,
};

fn roundtrip(node: &Node, version: FormatVersion) -> Node {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let bytes = encode(node, &tags, version).expect("encode");
    let mut c = Cursor::new(&bytes);
    let decoded = decode_node(&mut c, &tags, &schema, version)
        .expect("decode")
        .expect("not a sentinel");
    assert_eq!(
        c.position(),
        bytes.len(),
        "cursor must sit at the record's end offset"
    );
    decoded
}

#[test]
fn primitive_node_roundtrips_exactly() {
    let node = Node::with_properties(
        "Creator",
        vec![
            Value::from("FBX SDK/FBX Plugins build 20070228"),
            Value::I32(7),
            Value::Bool(true),
            Value::F64(0.125),
        ],
    );
    for version in [FormatVersion::V7400, FormatVersion::V7500] {
        let decoded = roundtrip(&node, version);
        assert_eq!(decoded, node);
    }
}

#[test]
fn property_list_node_p_roundtrips() {
    // The stock "P" convention: name, type, label, flags, then payload.
    let node = Node::with_properties(
        "P",
        vec![
            Value::from("Lcl Translation"),
            Value::from("Number"),
            Value::from(""),
            Value::from("A"),
            Value::F64(0.0),
            Value::F64(0.0),
            Value::F64(0.0),
        ],
    );
    let decoded = roundtrip(&node, FormatVersion::V7400);
    assert_eq!(decoded.name, "P");
    assert_eq!(decoded.properties.len(), 7);
    assert_eq!(decoded.properties, node.properties);
}

#[test]
fn array_properties_roundtrip_inside_a_node() {
    let node = Node::with_properties(
        "Vertices",
        vec![Value::Array(Array::compressed(ArrayData::F64(vec![
            1.0, 2.0, 3.0,
        ])))],
    );
    assert_eq!(roundtrip(&node, FormatVersion::V7400), node);
}

#[test]
fn nested_children_roundtrip_with_schema_attachment() {
    let schema = SchemaRegistry::standard();
    let mut header = Node::new("FBXHeaderExtension");
    header.attach(
        Node::with_properties("FBXHeaderVersion", vec![Value::I32(1003)]),
        &schema,
    );
    header.attach(
        Node::with_properties("FBXVersion", vec![Value::I32(7400)]),
        &schema,
    );
    header.attach(
        Node::with_properties("Unexpected", vec![Value::I32(1)]),
        &schema,
    );

    let decoded = roundtrip(&header, FormatVersion::V7400);
    assert_eq!(decoded, header);
    assert_eq!(
        decoded.get("fbx_version").expect("aliased slot").properties,
        vec![Value::I32(7400)]
    );
    // Unknown wire name on a scalar-shaped parent lands in overflow.
    assert!(decoded.get_key("Unexpected").is_some());
}

#[test]
fn named_slot_last_write_wins() {
    // Two children with the same aliased wire name: the decoder keeps the
    // later one, with no duplicate detection.
    let mut header = Node::new("FBXHeaderExtension");
    header.push_child(
        Slot::Key("FBXVersion".into()),
        Node::with_properties("FBXVersion", vec![Value::I32(7300)]),
    );
    header.push_child(
        Slot::Key("FBXVersion".into()),
        Node::with_properties("FBXVersion", vec![Value::I32(7400)]),
    );

    let decoded = roundtrip(&header, FormatVersion::V7400);
    let slot = decoded.get("fbx_version").expect("aliased slot");
    assert_eq!(slot.properties, vec![Value::I32(7400)]);
    assert_eq!(decoded.children.len(), 1);
}

#[test]
fn list_shaped_parent_appends_in_order() {
    let schema = SchemaRegistry::standard();
    let mut connections = Node::new("Connections");
    for i in 0..3i64 {
        connections.attach(
            Node::with_properties("C", vec![Value::from("OO"), Value::I64(i), Value::I64(0)]),
            &schema,
        );
    }
    let decoded = roundtrip(&connections, FormatVersion::V7400);
    assert_eq!(decoded, connections);
    assert_eq!(decoded.items().count(), 3);
}

#[test]
fn schema_declares_fields_in_order() {
    let schema = SchemaRegistry::standard();
    let fields = schema.fields_of("CreationTimeStamp").expect("declared type");
    let aliases: Vec<&str> = fields.iter().map(|f| f.wire_alias).collect();
    assert_eq!(
        aliases,
        [
            "Version",
            "Year",
            "Month",
            "Day",
            "Hour",
            "Minute",
            "Second",
            "Millisecond"
        ]
    );
    assert!(fields.iter().all(|f| f.declared == DeclaredType::I32));
    assert!(schema.fields_of("NoSuchType").is_none());
}

#[test]
fn schema_fields_carry_declared_types() {
    let schema = SchemaRegistry::standard();
    let fields = schema.fields_of("FBXHeaderExtension").expect("declared type");

    let version = fields.iter().find(|f| f.attribute == "fbx_version").expect("field");
    assert_eq!(version.declared, DeclaredType::I32);
    assert_eq!(version.wire_alias, "FBXVersion");

    let stamp = fields
        .iter()
        .find(|f| f.attribute == "creation_time_stamp")
        .expect("field");
    assert_eq!(stamp.declared, DeclaredType::Node("CreationTimeStamp"));
}

#[test]
fn empty_name_fails_to_encode() {
    let tags = TagRegistry::standard();
    let err = encode(&Node::new(""), &tags, FormatVersion::V7400).unwrap_err();
    assert!(matches!(err, Error::EmptyName));
}

#[test]
fn oversized_name_fails_to_encode() {
    let tags = TagRegistry::standard();
    let err = encode(&Node::new("x".repeat(256)), &tags, FormatVersion::V7400).unwrap_err();
    assert!(matches!(err, Error::NameTooLong { len: 256 }));
}

#[test]
fn zero_length_name_decodes_as_sentinel() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let version = FormatVersion::V7400;

    let mut w = Writer::new();
    w.write_zeros(version.null_record_len());
    let bytes = w.into_bytes();

    let mut c = Cursor::new(&bytes);
    let decoded = decode_node(&mut c, &tags, &schema, version).expect("sentinel is not an error");
    assert!(decoded.is_none());
    assert_eq!(c.position(), version.null_record_len());
}

#[test]
fn sentinel_stops_attachment_but_consumes_to_end_offset() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let version = FormatVersion::V7400;

    // Hand-assemble a parent whose children are: real, sentinel, real.
    let mut w = Writer::new();
    let header_pos = w.position();
    w.write_u32(0); // end offset, patched below
    w.write_u32(0); // no properties
    w.write_u32(0);
    w.write_u8(6);
    w.write_bytes(b"Parent");

    encode_node(
        &mut w,
        &Node::with_properties("Kept", vec![Value::I32(1)]),
        &tags,
        version,
    )
    .expect("child encode");
    w.write_zeros(version.null_record_len()); // sentinel
    encode_node(
        &mut w,
        &Node::with_properties("Dropped", vec![Value::I32(2)]),
        &tags,
        version,
    )
    .expect("child encode");

    let end = w.position();
    w.patch_u32(header_pos, end as u32);
    let bytes = w.into_bytes();

    let mut c = Cursor::new(&bytes);
    let parent = decode_node(&mut c, &tags, &schema, version)
        .expect("decode")
        .expect("real record");

    // All bytes consumed, but only the pre-sentinel child attached.
    assert_eq!(c.position(), end);
    assert_eq!(parent.children.len(), 1);
    assert!(parent.get_key("Kept").is_some());
    assert!(parent.get_key("Dropped").is_none());
}

#[test]
fn implausible_end_offset_is_corrupt() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let version = FormatVersion::V7400;

    let mut w = Writer::new();
    w.write_u32(0xffff_ffff); // end offset far past the stream
    w.write_u32(0);
    w.write_u32(0);
    w.write_u8(1);
    w.write_bytes(b"X");
    let bytes = w.into_bytes();

    let err = decode_node(&mut Cursor::new(&bytes), &tags, &schema, version).unwrap_err();
    assert!(matches!(
        err,
        Error::CorruptRecord {
            field: "end offset",
            ..
        }
    ));
}

#[test]
fn huge_property_length_is_corrupt_not_a_panic() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let version = FormatVersion::V7500;

    // Wide-header record with a plausible end offset but a property list
    // length of u64::MAX; must fail fast as corrupt, not wrap around.
    let mut w = Writer::new();
    w.write_u64(26); // end offset: header (25) + one name byte
    w.write_u64(1);
    w.write_u64(u64::MAX);
    w.write_u8(1);
    w.write_bytes(b"X");
    let bytes = w.into_bytes();

    let err = decode_node(&mut Cursor::new(&bytes), &tags, &schema, version).unwrap_err();
    assert!(matches!(
        err,
        Error::CorruptRecord {
            field: "property list length",
            ..
        }
    ));
}

#[test]
fn child_failure_is_wrapped_with_parent_identity() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let version = FormatVersion::V7400;

    // A parent record whose single child declares an unknown property tag.
    let mut w = Writer::new();
    let parent_pos = w.position();
    w.write_u32(0);
    w.write_u32(0);
    w.write_u32(0);
    w.write_u8(6);
    w.write_bytes(b"Parent");

    let child_pos = w.position();
    w.write_u32(0);
    w.write_u32(1); // one property
    w.write_u32(1);
    w.write_u8(5);
    w.write_bytes(b"Child");
    w.write_u8(b'Z'); // not a registered tag
    let child_end = w.position();
    w.patch_u32(child_pos, child_end as u32);
    w.patch_u32(parent_pos, child_end as u32);
    let bytes = w.into_bytes();

    let err = decode_node(&mut Cursor::new(&bytes), &tags, &schema, version).unwrap_err();
    match err {
        Error::NodeParse {
            parent,
            offset,
            source,
        } => {
            assert_eq!(parent, "Parent");
            assert_eq!(offset, child_pos);
            assert!(matches!(*source, Error::UnknownTag { tag: b'Z' }));
        }
        other => panic!("expected NodeParse, got {other:?}"),
    }
}
