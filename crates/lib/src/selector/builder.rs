//! Programmatic construction of selector specs.
//!
//! [`SelectorSpec`] builds the spec node for each variant, so callers do not
//! have to remember the single-character keys. The result is an ordinary node:
//! it can be stored, sent over the wire, or parsed with [`SelectorSpec::selector`].
//!
//! ```
//! use arbor::selector::{RecursionLimit, SelectorSpec};
//!
//! let spec = SelectorSpec::explore_recursive(
//!     RecursionLimit::Depth(3),
//!     SelectorSpec::explore_union([
//!         SelectorSpec::matcher(),
//!         SelectorSpec::explore_all(SelectorSpec::explore_recursive_edge()),
//!     ]),
//! );
//! let selector = spec.selector()?;
//! # Ok::<(), arbor::selector::SelectorError>(())
//! ```

use std::sync::Arc;

use super::{RecursionLimit, Selector, SelectorError, parse::keys};
use crate::node::{MapNode, Node, NodeError};

/// A selector spec node under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorSpec(Node);

impl SelectorSpec {
    /// `{".": {}}`
    pub fn matcher() -> Self {
        Self(keyed(keys::MATCHER, empty_map()))
    }

    /// `{"a": {">": next}}`
    pub fn explore_all(next: SelectorSpec) -> Self {
        Self(keyed(keys::EXPLORE_ALL, keyed(keys::NEXT, next.0)))
    }

    /// `{"f": {"f>": {name: selector, ...}}}`
    ///
    /// # Errors
    /// Returns [`NodeError::RepeatedMapKey`] if a field name appears twice.
    pub fn explore_fields<K, I>(fields: I) -> Result<Self, NodeError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, SelectorSpec)>,
    {
        let mut table = MapNode::default();
        for (name, spec) in fields {
            let name = name.as_ref();
            if table.contains_key(name) {
                return Err(NodeError::RepeatedMapKey {
                    key: name.to_string(),
                });
            }
            table.push_entry(name.to_string(), spec.0);
        }
        Ok(Self(keyed(
            keys::EXPLORE_FIELDS,
            keyed(keys::FIELDS, Node::Map(Arc::new(table))),
        )))
    }

    /// `{"i": {"i": index, ">": next}}`
    pub fn explore_index(index: usize, next: SelectorSpec) -> Self {
        let mut body = MapNode::with_capacity(2);
        body.push_entry(keys::INDEX.to_string(), int(index));
        body.push_entry(keys::NEXT.to_string(), next.0);
        Self(keyed(keys::EXPLORE_INDEX, Node::Map(Arc::new(body))))
    }

    /// `{"r": {"^": start, "$": end, ">": next}}`
    pub fn explore_range(start: usize, end: usize, next: SelectorSpec) -> Self {
        let mut body = MapNode::with_capacity(3);
        body.push_entry(keys::START.to_string(), int(start));
        body.push_entry(keys::END.to_string(), int(end));
        body.push_entry(keys::NEXT.to_string(), next.0);
        Self(keyed(keys::EXPLORE_RANGE, Node::Map(Arc::new(body))))
    }

    /// `{"|": [member, ...]}`
    pub fn explore_union(members: impl IntoIterator<Item = SelectorSpec>) -> Self {
        let members: Vec<Node> = members.into_iter().map(|m| m.0).collect();
        Self(keyed(keys::EXPLORE_UNION, Node::from(members)))
    }

    /// `{"R": {"l": limit, ":>": sequence}}`
    pub fn explore_recursive(limit: RecursionLimit, sequence: SelectorSpec) -> Self {
        let limit = match limit {
            RecursionLimit::Unbounded => keyed(keys::LIMIT_NONE, empty_map()),
            RecursionLimit::Depth(depth) => keyed(
                keys::LIMIT_DEPTH,
                Node::Int(i64::try_from(depth).unwrap_or(i64::MAX)),
            ),
        };
        let mut body = MapNode::with_capacity(2);
        body.push_entry(keys::LIMIT.to_string(), limit);
        body.push_entry(keys::SEQUENCE.to_string(), sequence.0);
        Self(keyed(keys::EXPLORE_RECURSIVE, Node::Map(Arc::new(body))))
    }

    /// `{"@": {}}`
    pub fn explore_recursive_edge() -> Self {
        Self(keyed(keys::EXPLORE_RECURSIVE_EDGE, empty_map()))
    }

    /// Borrows the spec node.
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Unwraps the spec node.
    pub fn into_node(self) -> Node {
        self.0
    }

    /// Parses the spec into a [`Selector`].
    pub fn selector(&self) -> Result<Selector, SelectorError> {
        Selector::parse(&self.0)
    }
}

impl From<SelectorSpec> for Node {
    fn from(spec: SelectorSpec) -> Self {
        spec.0
    }
}

fn keyed(key: &str, value: Node) -> Node {
    let mut map = MapNode::with_capacity(1);
    map.push_entry(key.to_string(), value);
    Node::Map(Arc::new(map))
}

fn empty_map() -> Node {
    Node::Map(Arc::new(MapNode::default()))
}

fn int(n: usize) -> Node {
    Node::Int(i64::try_from(n).unwrap_or(i64::MAX))
}
