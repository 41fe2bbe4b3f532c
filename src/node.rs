//! The decoded node tree: named records carrying property values and
//! recursively nested children.

use crate::schema::{SchemaRegistry, Shape};
use crate::value::Value;

/// How a child is attached to its parent, resolved once at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// A schema-declared attribute slot (alias table hit). Last write wins.
    Named(&'static str),
    /// Positional element of a list-shaped parent.
    Item,
    /// Keyed entry: map-shaped parents key by wire name, and scalar-shaped
    /// parents park unrecognized children here as overflow.
    Key(String),
}

/// A child record together with its resolved attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub slot: Slot,
    pub node: Node,
}

/// A named, recursively nested record: ordered property values plus children.
///
/// Children keep file order so a decoded tree re-encodes in the order it was
/// read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub name: String,
    pub properties: Vec<Value>,
    pub children: Vec<Child>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_properties(name: impl Into<String>, properties: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            properties,
            children: Vec::new(),
        }
    }

    /// Attach a decoded child, consulting the schema declaration for this
    /// node's type (keyed by the node's own wire name):
    ///
    /// 1. alias-table hit → named slot, replacing any earlier child in the
    ///    same slot;
    /// 2. list shape → append;
    /// 3. map shape → insert by the child's wire name, replacing;
    /// 4. otherwise → overflow entry under the child's literal wire name.
    pub fn attach(&mut self, child: Node, schema: &SchemaRegistry) {
        attach_to(&self.name, &mut self.children, child, schema);
    }

    /// Child currently occupying a named slot.
    pub fn get(&self, attribute: &str) -> Option<&Node> {
        self.children.iter().find_map(|c| match &c.slot {
            Slot::Named(a) if *a == attribute => Some(&c.node),
            _ => None,
        })
    }

    /// Child stored under a map or overflow key.
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        self.children.iter().find_map(|c| match &c.slot {
            Slot::Key(k) if k == key => Some(&c.node),
            _ => None,
        })
    }

    /// Positional children of a list-shaped node, in file order.
    pub fn items(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|c| match c.slot {
            Slot::Item => Some(&c.node),
            _ => None,
        })
    }

    /// All children in attachment order, regardless of slot.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().map(|c| &c.node)
    }

    /// Append a child into an explicit slot, bypassing schema resolution.
    /// Intended for tree construction by callers that already know the slot.
    pub fn push_child(&mut self, slot: Slot, node: Node) {
        self.children.push(Child { slot, node });
    }
}

/// Shared attachment logic for nodes and the file root.
pub(crate) fn attach_to(
    parent_type: &str,
    children: &mut Vec<Child>,
    node: Node,
    schema: &SchemaRegistry,
) {
    if let Some(attribute) = schema.resolve_alias(parent_type, &node.name) {
        let slot = Slot::Named(attribute);
        if let Some(existing) = children.iter_mut().find(|c| c.slot == slot) {
            existing.node = node;
        } else {
            children.push(Child { slot, node });
        }
        return;
    }

    match schema.shape_of(parent_type) {
        Shape::List => children.push(Child {
            slot: Slot::Item,
            node,
        }),
        Shape::Map => {
            let slot = Slot::Key(node.name.clone());
            if let Some(existing) = children.iter_mut().find(|c| c.slot == slot) {
                existing.node = node;
            } else {
                children.push(Child { slot, node });
            }
        }
        Shape::Scalar => {
            let slot = Slot::Key(node.name.clone());
            children.push(Child { slot, node });
        }
    }
}
