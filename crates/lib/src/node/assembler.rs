//! Single-pass construction of nodes.
//!
//! Construction follows a write-once protocol. Each state of the protocol is its
//! own type and exposes only the operations legal in that state:
//!
//! | State        | Type                 | Next steps                                   |
//! |--------------|----------------------|----------------------------------------------|
//! | expect value | [`NodeAssembler`]    | `begin_map`, `begin_list`, any `assign_*`     |
//! | map initial  | [`MapAssembler`]     | `assemble_key`, `assemble_entry`, `done`      |
//! | mid key      | [`KeyAssembler`]     | `assign_string`, `assign_node`                |
//! | expect value | [`EntryAssembler`]   | `assemble_value`                              |
//! | list initial | [`ListAssembler`]    | `assemble_value`, `done`                      |
//!
//! Transitions consume `self` or hold a `&mut` borrow of the parent, so assigning
//! a value twice, assembling a value without a key, or finishing a map while a
//! key is open does not compile.
//!
//! Values are committed to their parent only when they are complete: a scalar
//! on assignment, a map or list on `done`. A map entry lands in both the entry
//! table and the key index in that same step. Dropping an assembler before it
//! completes leaves the parent exactly as it was.

use std::sync::Arc;

use super::{Link, MapNode, Node, NodeError};
use crate::kind::{Kind, KindSet};

/// Where a completed value is written.
///
/// The map and list variants are the shared-state handle a child assembler
/// holds into its parent's storage; the `&mut` borrow makes it single-writer.
#[derive(Debug)]
enum Slot<'a> {
    Root(&'a mut Option<Node>),
    MapValue { map: &'a mut MapNode, key: String },
    ListItem(&'a mut Vec<Node>),
}

impl Slot<'_> {
    fn commit(self, node: Node) {
        match self {
            Slot::Root(slot) => *slot = Some(node),
            Slot::MapValue { map, key } => map.push_entry(key, node),
            Slot::ListItem(items) => items.push(node),
        }
    }
}

/// Owner of one construction.
///
/// ```
/// # use arbor::node::NodeBuilder;
/// let mut builder = NodeBuilder::new();
/// builder.assembler().assign_int(7);
/// assert_eq!(builder.build()?.as_int()?, 7);
/// # Ok::<(), arbor::node::NodeError>(())
/// ```
#[derive(Debug, Default)]
pub struct NodeBuilder {
    slot: Option<Node>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the assembler for the value this builder produces.
    ///
    /// # Panics
    /// Panics if a value has already been assembled. Reusing a builder without
    /// [`reset`](Self::reset) is a caller bug, not a data error.
    pub fn assembler(&mut self) -> NodeAssembler<'_> {
        assert!(
            self.slot.is_none(),
            "NodeBuilder already holds a finished value; call reset() before assembling again"
        );
        NodeAssembler {
            slot: Slot::Root(&mut self.slot),
        }
    }

    /// Returns true once a complete value has been assembled.
    pub fn is_done(&self) -> bool {
        self.slot.is_some()
    }

    /// Consumes the builder and returns the finished node.
    ///
    /// # Errors
    /// Returns [`NodeError::BuildIncomplete`] if no value was completed, for
    /// example when a map assembler was dropped without `done`.
    pub fn build(self) -> Result<Node, NodeError> {
        self.slot.ok_or(NodeError::BuildIncomplete)
    }

    /// Discards any assembled value so the builder can be used again.
    pub fn reset(&mut self) {
        self.slot = None;
    }
}

/// Assembler for exactly one value of any kind.
#[derive(Debug)]
#[must_use = "a NodeAssembler does nothing until a value is assigned"]
pub struct NodeAssembler<'a> {
    slot: Slot<'a>,
}

impl<'a> NodeAssembler<'a> {
    /// Starts a map. `size_hint` presizes storage and is not a limit.
    pub fn begin_map(self, size_hint: usize) -> MapAssembler<'a> {
        MapAssembler {
            slot: self.slot,
            map: MapNode::with_capacity(size_hint),
        }
    }

    /// Starts a list. `size_hint` presizes storage and is not a limit.
    pub fn begin_list(self, size_hint: usize) -> ListAssembler<'a> {
        ListAssembler {
            slot: self.slot,
            items: Vec::with_capacity(size_hint),
        }
    }

    pub fn assign_null(self) {
        self.slot.commit(Node::Null);
    }

    pub fn assign_bool(self, value: bool) {
        self.slot.commit(Node::Bool(value));
    }

    pub fn assign_int(self, value: i64) {
        self.slot.commit(Node::Int(value));
    }

    pub fn assign_float(self, value: f64) {
        self.slot.commit(Node::Float(value));
    }

    pub fn assign_string(self, value: &str) {
        self.slot.commit(Node::String(value.into()));
    }

    pub fn assign_bytes(self, value: &[u8]) {
        self.slot.commit(Node::Bytes(value.into()));
    }

    pub fn assign_link(self, link: Link) {
        self.slot.commit(Node::Link(link));
    }

    /// Assigns an existing node of any kind.
    ///
    /// Maps and lists are shared with `node`, not copied: nodes are immutable,
    /// so the new parent and every other holder see the same subtree.
    pub fn assign_node(self, node: &Node) {
        self.slot.commit(node.clone());
    }
}

/// Assembler for the entries of a map, in its initial state.
#[derive(Debug)]
#[must_use = "a map is only committed by calling done()"]
pub struct MapAssembler<'a> {
    slot: Slot<'a>,
    map: MapNode,
}

impl<'a> MapAssembler<'a> {
    /// Opens the next entry by assembling its key.
    pub fn assemble_key(&mut self) -> KeyAssembler<'_> {
        KeyAssembler {
            map: &mut self.map,
        }
    }

    /// Opens the next entry with `key` already assigned.
    ///
    /// # Errors
    /// Returns [`NodeError::RepeatedMapKey`] if the key is already present.
    pub fn assemble_entry(&mut self, key: &str) -> Result<NodeAssembler<'_>, NodeError> {
        Ok(self.assemble_key().assign_string(key)?.assemble_value())
    }

    /// Number of entries committed so far.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no entry has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Finishes the map and commits it to the parent.
    ///
    /// The generic data model has no structural validators, so this currently
    /// always succeeds.
    pub fn done(self) -> Result<(), NodeError> {
        self.slot.commit(Node::Map(Arc::new(self.map)));
        Ok(())
    }
}

/// Assembler for a map key.
#[derive(Debug)]
#[must_use = "the entry is discarded unless a key is assigned"]
pub struct KeyAssembler<'m> {
    map: &'m mut MapNode,
}

impl<'m> KeyAssembler<'m> {
    /// Assigns the key of the open entry.
    ///
    /// # Errors
    /// Returns [`NodeError::RepeatedMapKey`] if the map already holds `key`; the
    /// map is left unmodified.
    pub fn assign_string(self, key: &str) -> Result<EntryAssembler<'m>, NodeError> {
        if self.map.contains_key(key) {
            return Err(NodeError::RepeatedMapKey {
                key: key.to_string(),
            });
        }
        Ok(EntryAssembler {
            map: self.map,
            key: key.to_string(),
        })
    }

    /// Assigns the key from a node, which must be of string kind.
    pub fn assign_node(self, key: &Node) -> Result<EntryAssembler<'m>, NodeError> {
        match key {
            Node::String(s) => self.assign_string(s),
            other => Err(NodeError::WrongKind {
                method: "assign_node",
                appropriate: KindSet::JUST_STRING,
                actual: other.kind(),
            }),
        }
    }

    /// Map keys are always strings at the data model level.
    pub fn key_kind(&self) -> Kind {
        Kind::String
    }
}

/// A map entry whose key is assigned and whose value is expected next.
#[derive(Debug)]
#[must_use = "the key is discarded unless a value is assembled"]
pub struct EntryAssembler<'m> {
    map: &'m mut MapNode,
    key: String,
}

impl<'m> EntryAssembler<'m> {
    /// The key of this entry.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the assembler for this entry's value.
    pub fn assemble_value(self) -> NodeAssembler<'m> {
        NodeAssembler {
            slot: Slot::MapValue {
                map: self.map,
                key: self.key,
            },
        }
    }
}

/// Assembler for the elements of a list.
#[derive(Debug)]
#[must_use = "a list is only committed by calling done()"]
pub struct ListAssembler<'a> {
    slot: Slot<'a>,
    items: Vec<Node>,
}

impl<'a> ListAssembler<'a> {
    /// Returns the assembler for the next element.
    pub fn assemble_value(&mut self) -> NodeAssembler<'_> {
        NodeAssembler {
            slot: Slot::ListItem(&mut self.items),
        }
    }

    /// Number of elements committed so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no element has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finishes the list and commits it to the parent.
    pub fn done(self) -> Result<(), NodeError> {
        self.slot.commit(Node::List(self.items.into()));
        Ok(())
    }
}
