//! Link resolution for traversals.
//!
//! The data model never dereferences a [`Link`] itself. A traversal that should
//! cross links is given a [`LinkLoader`]; anything that can map a link to a node
//! qualifies, including plain closures.

use thiserror::Error;

use crate::node::{Link, Node};

/// Why a link could not be resolved.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The loader has no block for the link.
    #[error("no block stored for link")]
    NotFound,

    /// The block exists but could not be produced (I/O, decoding, cancellation).
    #[error("link could not be loaded: {reason}")]
    Unavailable {
        /// Description of the failure
        reason: String,
    },
}

impl LoadError {
    /// Check if the loader simply has no such block
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound)
    }
}

/// Resolves links to nodes.
pub trait LinkLoader {
    /// Loads the node addressed by `link`.
    fn load(&self, link: &Link) -> Result<Node, LoadError>;
}

impl<F> LinkLoader for F
where
    F: Fn(&Link) -> Result<Node, LoadError>,
{
    fn load(&self, link: &Link) -> Result<Node, LoadError> {
        self(link)
    }
}
