//! Whole-file codec: magic validation, version gating, footer handling,
//! and full document round trips.

use fbxbin::{
    decode_file, encode_file, Array, ArrayData, Error, File, FormatVersion, Node, SchemaRegistry,
    TagRegistry, Value, MAGIC,
};

fn sample_file(version: FormatVersion) -> File {
    let schema = SchemaRegistry::standard();

    let mut header = Node::new("FBXHeaderExtension");
    header.attach(
        Node::with_properties("FBXHeaderVersion", vec![Value::I32(1003)]),
        &schema,
    );
    header.attach(
        Node::with_properties("FBXVersion", vec![Value::I32(version.0 as i32)]),
        &schema,
    );

    let mut objects = Node::new("Objects");
    let mut geometry = Node::new("Geometry");
    geometry.attach(
        Node::with_properties(
            "Vertices",
            vec![Value::Array(Array::compressed(ArrayData::F64(vec![
                0.0, 1.0, 2.0,
            ])))],
        ),
        &schema,
    );
    objects.attach(geometry, &schema);

    let mut connections = Node::new("Connections");
    connections.attach(
        Node::with_properties(
            "C",
            vec![Value::from("OO"), Value::I64(42), Value::I64(0)],
        ),
        &schema,
    );

    let mut file = File::new(version);
    file.attach(header, &schema);
    file.attach(objects, &schema);
    file.attach(connections, &schema);
    file
}

#[test]
fn file_roundtrips_in_both_header_widths() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();

    for version in [FormatVersion::V7400, FormatVersion::V7500] {
        let file = sample_file(version);
        let bytes = encode_file(&file, &tags).expect("encode");
        let decoded = decode_file(&bytes, &tags, &schema).expect("decode");
        assert_eq!(decoded, file);
        assert_eq!(decoded.version, version);
    }
}

#[test]
fn encoded_file_layout() {
    let tags = TagRegistry::standard();
    let version = FormatVersion::V7400;
    let bytes = encode_file(&sample_file(version), &tags).expect("encode");

    assert_eq!(&bytes[..23], MAGIC);
    assert_eq!(bytes[23..27], 7400u32.to_le_bytes());
    // Footer: the trailing zero blocks are all present.
    let footer = &bytes[bytes.len() - version.footer_len()..];
    assert!(footer.iter().all(|&b| b == 0));
}

#[test]
fn bad_magic_carries_offending_bytes() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let bytes = b"Kaydara FBX ASCII   \x00\x1a\x00rest".to_vec();
    let err = decode_file(&bytes, &tags, &schema).unwrap_err();
    match err {
        Error::InvalidHeader { found } => assert_eq!(found, bytes[..23].to_vec()),
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}

#[test]
fn truncated_magic_is_invalid_header() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let err = decode_file(b"Kaydara", &tags, &schema).unwrap_err();
    assert!(matches!(err, Error::InvalidHeader { .. }));
}

#[test]
fn short_footer_is_tolerated() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let file = sample_file(FormatVersion::V7400);
    let mut bytes = encode_file(&file, &tags).expect("encode");

    // Drop all but three bytes of the footer; no record header parses from
    // what remains, so decoding still succeeds.
    bytes.truncate(bytes.len() - FormatVersion::V7400.footer_len() + 3);
    let decoded = decode_file(&bytes, &tags, &schema).expect("decode with short footer");
    assert_eq!(decoded, file);
}

#[test]
fn corrupt_top_level_record_is_wrapped() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let file = sample_file(FormatVersion::V7400);
    let mut bytes = encode_file(&file, &tags).expect("encode");

    // Smash the first record's end offset (it sits right after magic+version).
    bytes[27..31].copy_from_slice(&0xffff_ffffu32.to_le_bytes());
    let err = decode_file(&bytes, &tags, &schema).unwrap_err();
    match err {
        Error::NodeParse { parent, offset, source } => {
            assert_eq!(parent, "(root)");
            assert_eq!(offset, 27);
            assert!(matches!(*source, Error::CorruptRecord { .. }));
        }
        other => panic!("expected NodeParse, got {other:?}"),
    }
}

#[test]
fn top_level_attachment_uses_root_aliases() {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();
    let bytes = encode_file(&sample_file(FormatVersion::V7400), &tags).expect("encode");
    let decoded = decode_file(&bytes, &tags, &schema).expect("decode");

    let header = decoded.get("fbx_header_extension").expect("root slot");
    assert_eq!(
        header.get("fbx_version").expect("nested slot").properties,
        vec![Value::I32(7400)]
    );
    assert!(decoded.get("objects").is_some());
    assert!(decoded.get("connections").is_some());
}

#[test]
fn fixture_files_roundtrip() {
    // Fixtures are produced by `cargo run --bin gen_fixtures`; skip when absent.
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();

    for name in ["v7400_minimal.fbx", "v7500_minimal.fbx", "v7400_arrays.fbx"] {
        let path = format!("{dir}/{name}");
        let Ok(data) = std::fs::read(&path) else {
            eprintln!("skipping: {name} not found");
            continue;
        };
        let decoded = decode_file(&data, &tags, &schema)
            .unwrap_or_else(|e| panic!("failed to decode {name}: {e}"));
        let reencoded = encode_file(&decoded, &tags).expect("re-encode");
        assert_eq!(reencoded, data, "{name} must re-encode byte-identically");
    }
}
