//! Bridge between [`Node`] and [`ipld_core::ipld::Ipld`].
//!
//! Conversion into a node drives the assembler protocol, the same way a codec
//! would; conversion out walks the read contract. Codecs built on `ipld-core`
//! (such as `serde_ipld_dagcbor`) can therefore produce and consume nodes.
//!
//! `Ipld` maps are sorted by key, so the insertion order of a node's map does
//! not survive a trip through `Ipld`.

use std::collections::BTreeMap;

use ipld_core::ipld::Ipld;

use super::{Node, NodeAssembler, NodeBuilder, NodeError};

impl Node {
    /// Builds a node from an `Ipld` value.
    ///
    /// # Errors
    /// Returns [`NodeError::IntegerOutOfRange`] for integers outside `i64`.
    pub fn from_ipld(ipld: &Ipld) -> Result<Node, NodeError> {
        let mut builder = NodeBuilder::new();
        assemble_ipld(ipld, builder.assembler())?;
        builder.build()
    }

    /// Converts this node into an `Ipld` value.
    pub fn to_ipld(&self) -> Ipld {
        match self {
            Node::Null => Ipld::Null,
            Node::Bool(b) => Ipld::Bool(*b),
            Node::Int(n) => Ipld::Integer((*n).into()),
            Node::Float(f) => Ipld::Float(*f),
            Node::String(s) => Ipld::String(s.to_string()),
            Node::Bytes(b) => Ipld::Bytes(b.to_vec()),
            Node::List(items) => Ipld::List(items.iter().map(Node::to_ipld).collect()),
            Node::Map(map) => Ipld::Map(
                map.iter()
                    .map(|(k, v)| (k.to_string(), v.to_ipld()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            Node::Link(link) => Ipld::Link(*link),
        }
    }
}

/// Assembles `ipld` into `assembler`.
pub fn assemble_ipld(ipld: &Ipld, assembler: NodeAssembler<'_>) -> Result<(), NodeError> {
    match ipld {
        Ipld::Null => assembler.assign_null(),
        Ipld::Bool(b) => assembler.assign_bool(*b),
        Ipld::Integer(n) => {
            let value =
                i64::try_from(*n).map_err(|_| NodeError::IntegerOutOfRange { value: *n })?;
            assembler.assign_int(value);
        }
        Ipld::Float(f) => assembler.assign_float(*f),
        Ipld::String(s) => assembler.assign_string(s),
        Ipld::Bytes(b) => assembler.assign_bytes(b),
        Ipld::List(items) => {
            let mut list = assembler.begin_list(items.len());
            for item in items {
                assemble_ipld(item, list.assemble_value())?;
            }
            list.done()?;
        }
        Ipld::Map(entries) => {
            let mut map = assembler.begin_map(entries.len());
            for (key, value) in entries {
                assemble_ipld(value, map.assemble_entry(key)?)?;
            }
            map.done()?;
        }
        Ipld::Link(link) => assembler.assign_link(*link),
    }
    Ok(())
}

impl TryFrom<&Ipld> for Node {
    type Error = NodeError;

    fn try_from(ipld: &Ipld) -> Result<Self, Self::Error> {
        Node::from_ipld(ipld)
    }
}

impl From<&Node> for Ipld {
    fn from(node: &Node) -> Self {
        node.to_ipld()
    }
}
