//! Error types for traversals.

use thiserror::Error;

use super::loader::LoadError;
use crate::{
    node::{Link, NodeError},
    path::Path,
};

/// The budget that ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetResource {
    Nodes,
    Links,
}

impl std::fmt::Display for BudgetResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetResource::Nodes => f.write_str("node"),
            BudgetResource::Links => f.write_str("link"),
        }
    }
}

/// Errors that end a traversal.
///
/// Every variant carries the path at which the traversal stopped.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraversalError {
    /// A link could not be loaded and the policy is to abort.
    #[error("failed to load link {link} at \"{path}\": {source}")]
    LinkLoad {
        path: Path,
        link: Link,
        #[source]
        source: LoadError,
    },

    /// The configured budget was exhausted.
    #[error("{resource} budget exceeded at \"{path}\"")]
    BudgetExceeded { resource: BudgetResource, path: Path },

    /// A path could not be followed.
    #[error("cannot follow \"{path}\": {source}")]
    Node {
        path: Path,
        #[source]
        source: NodeError,
    },

    /// A visitor asked the traversal to stop.
    #[error("traversal stopped at \"{path}\": {reason}")]
    Stopped { path: Path, reason: String },
}

impl TraversalError {
    /// Check if this error is a budget exhaustion
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, TraversalError::BudgetExceeded { .. })
    }

    /// Check if this error is a link load failure
    pub fn is_link_error(&self) -> bool {
        matches!(self, TraversalError::LinkLoad { .. })
    }

    /// Check if this error came from a visitor
    pub fn is_stopped(&self) -> bool {
        matches!(self, TraversalError::Stopped { .. })
    }

    /// Check if a node or block was missing
    pub fn is_not_found(&self) -> bool {
        match self {
            TraversalError::LinkLoad { source, .. } => source.is_not_found(),
            TraversalError::Node { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Path at which the traversal ended
    pub fn path(&self) -> &Path {
        match self {
            TraversalError::LinkLoad { path, .. }
            | TraversalError::BudgetExceeded { path, .. }
            | TraversalError::Node { path, .. }
            | TraversalError::Stopped { path, .. } => path,
        }
    }
}

// Conversion from TraversalError to the main Error type
impl From<TraversalError> for crate::Error {
    fn from(err: TraversalError) -> Self {
        crate::Error::Traversal(err)
    }
}
