//! Error types for node reads and node assembly.
//!
//! These are data errors: they describe a mismatch between what a caller asked
//! of a node (or tried to assemble) and what the data actually holds. They are
//! always returned, never raised by aborting.

use thiserror::Error;

use crate::{
    kind::{Kind, KindSet},
    path::PathSegment,
};

/// Structured errors for the node read contract and the assembler protocol.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    /// A method was called on a node of a kind it does not support
    #[error("method {method} called on a {actual} node, but only valid for {appropriate}")]
    WrongKind {
        /// The method that was called
        method: &'static str,
        /// Kinds the method accepts
        appropriate: KindSet,
        /// Kind of the node it was called on
        actual: Kind,
    },

    /// A key or index lookup found nothing
    #[error("key not found: {segment}")]
    NotExists { segment: PathSegment },

    /// A map key was assembled twice
    #[error("cannot repeat map key \"{key}\"")]
    RepeatedMapKey { key: String },

    /// An iterator was advanced after reporting done
    #[error("iterator overread")]
    IteratorOverread,

    /// A key segment could not be used as a list index
    #[error("cannot traverse list with segment \"{segment}\": not a non-negative integer")]
    InvalidSegmentForList { segment: PathSegment },

    /// An integer does not fit the data model's 64-bit integer
    #[error("integer {value} out of range for the data model")]
    IntegerOutOfRange { value: i128 },

    /// `build` was called before a value was assembled
    #[error("builder has not assembled a value")]
    BuildIncomplete,
}

impl NodeError {
    /// Check if this error is a kind mismatch
    pub fn is_wrong_kind(&self) -> bool {
        matches!(self, NodeError::WrongKind { .. })
    }

    /// Check if this error indicates an absent key or index
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NodeError::NotExists { .. } | NodeError::InvalidSegmentForList { .. }
        )
    }

    /// Check if this error is a duplicate map key
    pub fn is_repeated_key(&self) -> bool {
        matches!(self, NodeError::RepeatedMapKey { .. })
    }

    /// Check if this error is an iterator overread
    pub fn is_overread(&self) -> bool {
        matches!(self, NodeError::IteratorOverread)
    }

    /// Get the offending segment if this is a lookup error
    pub fn segment(&self) -> Option<&PathSegment> {
        match self {
            NodeError::NotExists { segment } | NodeError::InvalidSegmentForList { segment } => {
                Some(segment)
            }
            _ => None,
        }
    }
}

// Conversion from NodeError to the main Error type
impl From<NodeError> for crate::Error {
    fn from(err: NodeError) -> Self {
        crate::Error::Node(err)
    }
}
