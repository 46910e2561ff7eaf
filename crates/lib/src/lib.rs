//!
//! Arbor: a content-addressed data model with a selector traversal engine.
//! This library provides immutable node trees, a single-pass construction protocol
//! for them, and declarative selectors that drive traversals across linked trees.
//!
//! ## Core Concepts
//!
//! * **Nodes (`node::Node`)**: Immutable values of exactly one kind (null, bool, int, float, string, bytes, list, map, link). Maps and lists share their children through reference counting.
//! * **Assemblers (`node::NodeBuilder`)**: The write-once construction protocol codecs drive to produce nodes. Misordered calls do not compile.
//! * **Paths (`path::Path`)**: Sequences of map keys and list indices addressing nodes within a tree.
//! * **Selectors (`selector::Selector`)**: Declarative traversal plans, parsed from spec nodes, describing which nodes to visit and which to match.
//! * **Traversals (`traversal::Traversal`)**: Depth-first walks guided by a selector, reporting the covered set and the result set, optionally crossing links through a `traversal::LinkLoader`.
//! * **Stores (`store::MemoryStore`)**: An in-memory dag-cbor block store addressed by CIDv1 (requires the "store" feature).

pub mod kind;
pub mod node;
pub mod path;
pub mod selector;
#[cfg(feature = "store")]
pub mod store;
pub mod traversal;

pub use kind::Kind;
pub use node::{Link, Node};
pub use path::{Path, PathSegment};
pub use selector::{Selector, SelectorSpec};
pub use traversal::{Traversal, TraversalConfig};

/// Result type used throughout the Arbor library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Arbor library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured data model errors from the node module
    #[error(transparent)]
    Node(node::NodeError),

    /// Structured selector parse errors from the selector module
    #[error(transparent)]
    Selector(selector::SelectorError),

    /// Structured traversal errors from the traversal module
    #[error(transparent)]
    Traversal(traversal::TraversalError),

    /// Structured block store errors from the store module
    #[cfg(feature = "store")]
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Node(_) => "node",
            Error::Selector(_) => "selector",
            Error::Traversal(_) => "traversal",
            #[cfg(feature = "store")]
            Error::Store(_) => "store",
        }
    }

    /// Check if this error indicates a node, entry or block was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_not_found(),
            Error::Traversal(traversal_err) => traversal_err.is_not_found(),
            #[cfg(feature = "store")]
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a kind mismatch on a node.
    pub fn is_wrong_kind(&self) -> bool {
        match self {
            Error::Node(node_err) => node_err.is_wrong_kind(),
            Error::Traversal(traversal::TraversalError::Node { source, .. }) => {
                source.is_wrong_kind()
            }
            _ => false,
        }
    }

    /// Check if this error is a rejected selector spec.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Selector(_))
    }

    /// Check if this error is an exhausted traversal budget.
    pub fn is_budget_exceeded(&self) -> bool {
        match self {
            Error::Traversal(traversal_err) => traversal_err.is_budget_exceeded(),
            _ => false,
        }
    }

    /// Check if this error is a link that could not be loaded.
    pub fn is_link_error(&self) -> bool {
        match self {
            Error::Traversal(traversal_err) => traversal_err.is_link_error(),
            _ => false,
        }
    }

    /// Check if this error is about encoding or decoding blocks.
    pub fn is_codec_error(&self) -> bool {
        match self {
            #[cfg(feature = "store")]
            Error::Store(store_err) => store_err.is_codec_error(),
            Error::Node(node::NodeError::IntegerOutOfRange { .. }) => true,
            _ => false,
        }
    }
}
