//! Declarative shape definitions for structured document types.
//!
//! The registry is consumed by the node tree codec when reattaching decoded
//! children: it maps a child's wire name to the parent's declared attribute
//! slot and says whether the parent behaves as a scalar holder, an ordered
//! list, or a keyed collection.

use std::collections::HashMap;

/// How a structured type holds its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// Named attribute slots only; unrecognized children overflow.
    #[default]
    Scalar,
    /// Ordered list; unrecognized children are appended in file order.
    List,
    /// Keyed collection; unrecognized children are inserted by wire name.
    Map,
}

/// Declared value or node type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    I32,
    I64,
    Str,
    Bytes,
    /// A nested structured type, referenced by its registry type name.
    Node(&'static str),
}

/// One declared field of a structured type.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Attribute name the decoded child is attached under.
    pub attribute: &'static str,
    /// Declared type of the field's value.
    pub declared: DeclaredType,
    /// Wire name of the child record carrying this field.
    pub wire_alias: &'static str,
}

/// Declared layout of one structured type.
#[derive(Debug, Clone, Default)]
pub struct NodeType {
    pub shape: Shape,
    pub fields: Vec<FieldSpec>,
}

impl NodeType {
    fn new(shape: Shape, fields: &[(&'static str, DeclaredType, &'static str)]) -> Self {
        Self {
            shape,
            fields: fields
                .iter()
                .map(|&(attribute, declared, wire_alias)| FieldSpec {
                    attribute,
                    declared,
                    wire_alias,
                })
                .collect(),
        }
    }
}

/// Registry of declared structured types, keyed by type (wire) name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: HashMap<&'static str, NodeType>,
}

impl SchemaRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declare a type's shape and alias table. Replaces any prior declaration.
    pub fn declare(
        &mut self,
        type_name: &'static str,
        shape: Shape,
        fields: &[(&'static str, DeclaredType, &'static str)],
    ) {
        self.types.insert(type_name, NodeType::new(shape, fields));
    }

    /// The ordered declared field list of a type, if declared.
    pub fn fields_of(&self, type_name: &str) -> Option<&[FieldSpec]> {
        self.types.get(type_name).map(|t| t.fields.as_slice())
    }

    /// Container behavior of a type. Undeclared types act as scalar holders.
    pub fn shape_of(&self, type_name: &str) -> Shape {
        self.types
            .get(type_name)
            .map(|t| t.shape)
            .unwrap_or_default()
    }

    /// Map a decoded child's wire name to the parent's declared attribute.
    pub fn resolve_alias(&self, type_name: &str, wire_name: &str) -> Option<&'static str> {
        self.types.get(type_name).and_then(|t| {
            t.fields
                .iter()
                .find(|f| f.wire_alias == wire_name)
                .map(|f| f.attribute)
        })
    }

    /// Declarations for the stock FBX document elements.
    pub fn standard() -> Self {
        use DeclaredType::*;

        let mut reg = Self::empty();

        reg.declare(
            "root",
            Shape::Scalar,
            &[
                ("fbx_header_extension", Node("FBXHeaderExtension"), "FBXHeaderExtension"),
                ("file_id", Bytes, "FileId"),
                ("creation_time", Str, "CreationTime"),
                ("creator", Str, "Creator"),
                ("global_settings", Node("GlobalSettings"), "GlobalSettings"),
                ("documents", Node("Documents"), "Documents"),
                ("references", Node("References"), "References"),
                ("definitions", Node("Definitions"), "Definitions"),
                ("objects", Node("Objects"), "Objects"),
                ("connections", Node("Connections"), "Connections"),
                ("takes", Node("Takes"), "Takes"),
            ],
        );

        reg.declare(
            "FBXHeaderExtension",
            Shape::Scalar,
            &[
                ("fbx_header_version", I32, "FBXHeaderVersion"),
                ("fbx_version", I32, "FBXVersion"),
                ("encryption_type", I32, "EncryptionType"),
                ("creation_time_stamp", Node("CreationTimeStamp"), "CreationTimeStamp"),
                ("creator", Str, "Creator"),
                ("scene_info", Node("SceneInfo"), "SceneInfo"),
                ("other_flags", Node("OtherFlags"), "OtherFlags"),
            ],
        );

        reg.declare(
            "CreationTimeStamp",
            Shape::Scalar,
            &[
                ("version", I32, "Version"),
                ("year", I32, "Year"),
                ("month", I32, "Month"),
                ("day", I32, "Day"),
                ("hour", I32, "Hour"),
                ("minute", I32, "Minute"),
                ("second", I32, "Second"),
                ("millisecond", I32, "Millisecond"),
            ],
        );

        reg.declare(
            "SceneInfo",
            Shape::Scalar,
            &[
                ("type", Str, "Type"),
                ("version", I32, "Version"),
                ("metadata", Node("MetaData"), "MetaData"),
                ("properties70", Node("Properties70"), "Properties70"),
            ],
        );

        reg.declare(
            "MetaData",
            Shape::Scalar,
            &[
                ("version", I32, "Version"),
                ("title", Str, "Title"),
                ("subject", Str, "Subject"),
                ("author", Str, "Author"),
                ("keywords", Str, "Keywords"),
                ("revision", Str, "Revision"),
                ("comment", Str, "Comment"),
            ],
        );

        reg.declare("OtherFlags", Shape::Scalar, &[]);

        reg.declare(
            "GlobalSettings",
            Shape::Scalar,
            &[
                ("version", I32, "Version"),
                ("properties70", Node("Properties70"), "Properties70"),
            ],
        );

        reg.declare("Documents", Shape::List, &[("count", I32, "Count")]);
        reg.declare(
            "Document",
            Shape::Scalar,
            &[
                ("properties70", Node("Properties70"), "Properties70"),
                ("root_node", I64, "RootNode"),
            ],
        );

        reg.declare("References", Shape::List, &[]);

        reg.declare(
            "Definitions",
            Shape::List,
            &[("version", I32, "Version"), ("count", I32, "Count")],
        );
        reg.declare(
            "ObjectType",
            Shape::Scalar,
            &[
                ("count", I32, "Count"),
                ("property_template", Node("PropertyTemplate"), "PropertyTemplate"),
            ],
        );
        reg.declare(
            "PropertyTemplate",
            Shape::Scalar,
            &[("properties70", Node("Properties70"), "Properties70")],
        );

        reg.declare("Objects", Shape::List, &[]);
        reg.declare(
            "Model",
            Shape::Scalar,
            &[
                ("version", I32, "Version"),
                ("properties70", Node("Properties70"), "Properties70"),
            ],
        );

        reg.declare("Connections", Shape::List, &[]);
        reg.declare("Takes", Shape::Map, &[("current", Str, "Current")]);

        reg.declare("Properties70", Shape::List, &[]);
        reg.declare("P", Shape::Scalar, &[]);

        reg
    }
}
