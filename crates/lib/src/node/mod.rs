//! The generic data model: immutable, kind-polymorphic value trees.
//!
//! A [`Node`] is one value of exactly one [`Kind`]. Scalars own their payload;
//! maps and lists hold their children behind `Arc`, so cloning a node is cheap
//! and a subtree can be shared by any number of parents. Nothing mutates a node
//! after it has been built, which makes concurrent unsynchronized reads safe.
//!
//! # Core Types
//!
//! - [`Node`] - The value itself, with the read contract (lookup, iteration, scalar access)
//! - [`MapNode`] - Insertion-ordered map storage with a key index
//! - [`MapIterator`] / [`ListIterator`] - One-shot iterators that fail on overread
//! - [`NodeBuilder`] - Entry point of the single-pass construction protocol
//!
//! # Building
//!
//! ```
//! use arbor::node::{Node, NodeBuilder};
//!
//! let mut builder = NodeBuilder::new();
//! let mut map = builder.assembler().begin_map(2);
//! map.assemble_key().assign_string("name")?.assemble_value().assign_string("Alice");
//! map.assemble_entry("age")?.assign_int(30);
//! map.done()?;
//! let node = builder.build()?;
//!
//! assert_eq!(node.lookup_by_string("name")?.as_string()?, "Alice");
//! assert_eq!(node.length()?, 2);
//! # Ok::<(), arbor::node::NodeError>(())
//! ```

pub mod assembler;
pub mod errors;
pub mod fluent;
pub mod ipld;

use std::{collections::HashMap, sync::Arc};

pub use assembler::{
    EntryAssembler, KeyAssembler, ListAssembler, MapAssembler, NodeAssembler, NodeBuilder,
};
pub use errors::NodeError;

use crate::{
    kind::{Kind, KindSet},
    path::PathSegment,
};

/// Opaque content address of another node, resolved outside the data model.
pub type Link = cid::Cid;

/// An immutable value of the data model.
///
/// Maps and lists are reference counted; `clone` shares the subtree instead of
/// copying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    List(Arc<[Node]>),
    Map(Arc<MapNode>),
    Link(Link),
}

/// Storage of a map node.
///
/// Entries are kept in insertion order for iteration; the index maps each key
/// to its position in the entry table. Keys are unique.
#[derive(Debug, Clone, Default)]
pub struct MapNode {
    entries: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl MapNode {
    pub(crate) fn with_capacity(size_hint: usize) -> Self {
        Self {
            entries: Vec::with_capacity(size_hint),
            index: HashMap::with_capacity(size_hint),
        }
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Appends an entry. The caller has already rejected duplicate keys.
    pub(crate) fn push_entry(&mut self, key: String, value: Node) {
        debug_assert!(!self.index.contains_key(&key));
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    /// Gets the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for MapNode {
    // The index is derived from the entry table.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Node {
    /// Creates a builder for a new node.
    pub fn builder() -> NodeBuilder {
        NodeBuilder::new()
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Node::Null => Kind::Null,
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::Float(_) => Kind::Float,
            Node::String(_) => Kind::String,
            Node::Bytes(_) => Kind::Bytes,
            Node::List(_) => Kind::List,
            Node::Map(_) => Kind::Map,
            Node::Link(_) => Kind::Link,
        }
    }

    fn wrong_kind(&self, method: &'static str, appropriate: KindSet) -> NodeError {
        NodeError::WrongKind {
            method,
            appropriate,
            actual: self.kind(),
        }
    }

    /// Looks up a map entry by key.
    pub fn lookup_by_string(&self, key: &str) -> Result<&Node, NodeError> {
        match self {
            Node::Map(map) => map.get(key).ok_or_else(|| NodeError::NotExists {
                segment: PathSegment::key(key),
            }),
            _ => Err(self.wrong_kind("lookup_by_string", KindSet::JUST_MAP)),
        }
    }

    /// Looks up a list element by position.
    pub fn lookup_by_index(&self, index: usize) -> Result<&Node, NodeError> {
        match self {
            Node::List(items) => items.get(index).ok_or(NodeError::NotExists {
                segment: PathSegment::Index(index),
            }),
            _ => Err(self.wrong_kind("lookup_by_index", KindSet::JUST_LIST)),
        }
    }

    /// Looks up a child by path segment.
    ///
    /// Against a map the segment is used in its key form; against a list it must
    /// be an index or a key that parses as one.
    pub fn lookup_by_segment(&self, segment: &PathSegment) -> Result<&Node, NodeError> {
        match self {
            Node::Map(_) => self.lookup_by_string(&segment.as_key()),
            Node::List(_) => {
                let index = segment
                    .as_index()
                    .ok_or_else(|| NodeError::InvalidSegmentForList {
                        segment: segment.clone(),
                    })?;
                self.lookup_by_index(index)
            }
            _ => Err(self.wrong_kind("lookup_by_segment", KindSet::RECURSIVE)),
        }
    }

    /// Looks up a child using another node as the key: a string for maps, an int for lists.
    pub fn lookup_by_node(&self, key: &Node) -> Result<&Node, NodeError> {
        match self {
            Node::Map(_) => self.lookup_by_string(key.as_string()?),
            Node::List(_) => {
                let index = key.as_int()?;
                let index =
                    usize::try_from(index).map_err(|_| NodeError::InvalidSegmentForList {
                        segment: PathSegment::key(index.to_string()),
                    })?;
                self.lookup_by_index(index)
            }
            _ => Err(self.wrong_kind("lookup_by_node", KindSet::RECURSIVE)),
        }
    }

    /// Returns a one-shot iterator over map entries.
    pub fn map_iterator(&self) -> Result<MapIterator<'_>, NodeError> {
        match self {
            Node::Map(map) => Ok(MapIterator {
                entries: &map.entries,
                position: 0,
            }),
            _ => Err(self.wrong_kind("map_iterator", KindSet::JUST_MAP)),
        }
    }

    /// Returns a one-shot iterator over list elements.
    pub fn list_iterator(&self) -> Result<ListIterator<'_>, NodeError> {
        match self {
            Node::List(items) => Ok(ListIterator { items, position: 0 }),
            _ => Err(self.wrong_kind("list_iterator", KindSet::JUST_LIST)),
        }
    }

    /// Number of entries of a map or elements of a list.
    pub fn length(&self) -> Result<usize, NodeError> {
        match self {
            Node::Map(map) => Ok(map.len()),
            Node::List(items) => Ok(items.len()),
            _ => Err(self.wrong_kind("length", KindSet::RECURSIVE)),
        }
    }

    /// Returns true for the explicit null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Absence is reserved for layers above the data model; a node built here
    /// is never undefined.
    pub fn is_undefined(&self) -> bool {
        false
    }

    pub fn as_bool(&self) -> Result<bool, NodeError> {
        match self {
            Node::Bool(b) => Ok(*b),
            _ => Err(self.wrong_kind("as_bool", KindSet::JUST_BOOL)),
        }
    }

    pub fn as_int(&self) -> Result<i64, NodeError> {
        match self {
            Node::Int(n) => Ok(*n),
            _ => Err(self.wrong_kind("as_int", KindSet::JUST_INT)),
        }
    }

    pub fn as_float(&self) -> Result<f64, NodeError> {
        match self {
            Node::Float(f) => Ok(*f),
            _ => Err(self.wrong_kind("as_float", KindSet::JUST_FLOAT)),
        }
    }

    pub fn as_string(&self) -> Result<&str, NodeError> {
        match self {
            Node::String(s) => Ok(s),
            _ => Err(self.wrong_kind("as_string", KindSet::JUST_STRING)),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], NodeError> {
        match self {
            Node::Bytes(b) => Ok(b),
            _ => Err(self.wrong_kind("as_bytes", KindSet::JUST_BYTES)),
        }
    }

    pub fn as_link(&self) -> Result<Link, NodeError> {
        match self {
            Node::Link(link) => Ok(*link),
            _ => Err(self.wrong_kind("as_link", KindSet::JUST_LINK)),
        }
    }

    /// Borrows the map storage for idiomatic iteration.
    pub fn as_map(&self) -> Result<&MapNode, NodeError> {
        match self {
            Node::Map(map) => Ok(map),
            _ => Err(self.wrong_kind("as_map", KindSet::JUST_MAP)),
        }
    }

    /// Borrows the list elements for idiomatic iteration.
    pub fn as_list(&self) -> Result<&[Node], NodeError> {
        match self {
            Node::List(items) => Ok(items),
            _ => Err(self.wrong_kind("as_list", KindSet::JUST_LIST)),
        }
    }

    /// Returns true if both nodes share the same map or list allocation.
    ///
    /// Scalars are never considered shared.
    pub fn shares_storage(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Map(a), Node::Map(b)) => Arc::ptr_eq(a, b),
            (Node::List(a), Node::List(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One-shot iterator over the entries of a map node.
///
/// Unlike [`Iterator`], advancing past the end is an error rather than `None`.
#[derive(Debug, Clone)]
pub struct MapIterator<'a> {
    entries: &'a [(String, Node)],
    position: usize,
}

impl<'a> MapIterator<'a> {
    /// Yields the next entry, or `IteratorOverread` once exhausted.
    pub fn next_entry(&mut self) -> Result<(&'a str, &'a Node), NodeError> {
        let (key, value) = self
            .entries
            .get(self.position)
            .ok_or(NodeError::IteratorOverread)?;
        self.position += 1;
        Ok((key.as_str(), value))
    }

    /// Returns true once every entry has been yielded.
    pub fn done(&self) -> bool {
        self.position >= self.entries.len()
    }
}

/// One-shot iterator over the elements of a list node.
#[derive(Debug, Clone)]
pub struct ListIterator<'a> {
    items: &'a [Node],
    position: usize,
}

impl<'a> ListIterator<'a> {
    /// Yields the next index and element, or `IteratorOverread` once exhausted.
    pub fn next_item(&mut self) -> Result<(usize, &'a Node), NodeError> {
        let item = self
            .items
            .get(self.position)
            .ok_or(NodeError::IteratorOverread)?;
        let index = self.position;
        self.position += 1;
        Ok((index, item))
    }

    /// Returns true once every element has been yielded.
    pub fn done(&self) -> bool {
        self.position >= self.items.len()
    }
}

// ===== CONVERSIONS =====

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(value.into())
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.into())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value.into())
    }
}

impl From<&[u8]> for Node {
    fn from(value: &[u8]) -> Self {
        Node::Bytes(value.into())
    }
}

impl From<Vec<u8>> for Node {
    fn from(value: Vec<u8>) -> Self {
        Node::Bytes(value.into())
    }
}

impl From<Link> for Node {
    fn from(value: Link) -> Self {
        Node::Link(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items.into())
    }
}
