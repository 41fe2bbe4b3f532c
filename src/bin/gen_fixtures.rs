//! Fixture generator for fbxbin integration tests.
//!
//! Generates small synthetic binary FBX files into `tests/fixtures/`. These
//! are committed to the repo and serve as regression inputs for
//! `tests/file_roundtrip.rs` (the tests skip gracefully when a fixture is
//! absent).
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin gen_fixtures
//! ```

use fbxbin::{
    encode_file, Array, ArrayData, File, FormatVersion, Node, SchemaRegistry, Slot, TagRegistry,
    Value,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn main() -> std::io::Result<()> {
    std::fs::create_dir_all(FIXTURES_DIR)?;

    write("v7400_minimal.fbx", build_minimal(FormatVersion::V7400))?;
    write("v7500_minimal.fbx", build_minimal(FormatVersion::V7500))?;
    write("v7400_arrays.fbx", build_arrays())?;

    Ok(())
}

fn write(name: &str, data: Vec<u8>) -> std::io::Result<()> {
    let path = format!("{FIXTURES_DIR}/{name}");
    std::fs::write(&path, &data)?;
    println!("wrote {name} ({} bytes)", data.len());
    Ok(())
}

/// A document with just a header extension and a creator string.
fn build_minimal(version: FormatVersion) -> Vec<u8> {
    let tags = TagRegistry::standard();
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
    header.attach(
        Node::with_properties("Creator", vec![Value::from("fbxbin fixture generator")]),
        &schema,
    );

    let mut file = File::new(version);
    file.attach(header, &schema);

    encode_file(&file, &tags).expect("fixture encodes")
}

/// A document exercising every array subtype in both wire encodings.
fn build_arrays() -> Vec<u8> {
    let tags = TagRegistry::standard();
    let schema = SchemaRegistry::standard();

    let mut geometry = Node::new("Geometry");
    geometry.push_child(
        Slot::Key("Vertices".into()),
        Node::with_properties(
            "Vertices",
            vec![Value::Array(Array::compressed(ArrayData::F64(vec![
                0.0, 1.0, 2.0, 3.0, 4.0, 5.0,
            ])))],
        ),
    );
    geometry.push_child(
        Slot::Key("PolygonVertexIndex".into()),
        Node::with_properties(
            "PolygonVertexIndex",
            vec![Value::Array(Array::raw(ArrayData::I32(vec![0, 1, -3])))],
        ),
    );
    geometry.push_child(
        Slot::Key("Normals".into()),
        Node::with_properties(
            "Normals",
            vec![Value::Array(Array::raw(ArrayData::F32(vec![0.0, 0.0, 1.0])))],
        ),
    );
    geometry.push_child(
        Slot::Key("Edges".into()),
        Node::with_properties(
            "Edges",
            vec![Value::Array(Array::compressed(ArrayData::I64(vec![
                7, 8, 9,
            ])))],
        ),
    );
    geometry.push_child(
        Slot::Key("EdgeVisibility".into()),
        Node::with_properties(
            "EdgeVisibility",
            vec![Value::Array(Array::raw(ArrayData::Bool(vec![
                true, false, true,
            ])))],
        ),
    );

    let mut objects = Node::new("Objects");
    objects.attach(geometry, &schema);

    let mut file = File::new(FormatVersion::V7400);
    file.attach(objects, &schema);

    encode_file(&file, &tags).expect("fixture encodes")
}
