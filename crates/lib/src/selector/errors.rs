//! Error types for selector spec parsing.
//!
//! Every structural problem in a selector spec is reported when the spec is
//! parsed; a parsed [`Selector`](super::Selector) never fails during traversal.

use thiserror::Error;

use crate::kind::Kind;

/// Structured errors for rejected selector specs.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A selector was not a map
    #[error("selector spec parse rejected: selector is a keyed union and must be a map, found {kind}")]
    NotAMap { kind: Kind },

    /// A selector map did not have exactly one entry
    #[error("selector spec parse rejected: selector is a keyed union and must be a single-entry map, found {len} entries")]
    NotSingleEntry { len: usize },

    /// A selector map used a key that names no variant
    #[error("selector spec parse rejected: unknown selector variant \"{key}\"")]
    UnknownVariant { key: String },

    /// A known form this library deliberately does not interpret
    #[error("selector spec parse rejected: \"{key}\" is not supported: {reason}")]
    Unsupported { key: String, reason: String },

    /// A variant body had the wrong kind
    #[error("selector spec parse rejected: {variant} body must be a {expected}, found {actual}")]
    InvalidBody {
        variant: &'static str,
        expected: Kind,
        actual: Kind,
    },

    /// A required field was absent
    #[error("selector spec parse rejected: {variant} is missing field \"{field}\"")]
    MissingField {
        variant: &'static str,
        field: &'static str,
    },

    /// A field was present but malformed
    #[error("selector spec parse rejected: {variant} field \"{field}\" is invalid: {reason}")]
    InvalidField {
        variant: &'static str,
        field: &'static str,
        reason: String,
    },

    /// An ExploreRange whose end does not exceed its start
    #[error("selector spec parse rejected: ExploreRange end {end} must be greater than start {start}")]
    InvalidRange { start: usize, end: usize },

    /// An ExploreRecursiveEdge with no enclosing ExploreRecursive
    #[error("selector spec parse rejected: ExploreRecursiveEdge must be beneath an ExploreRecursive")]
    EdgeOutsideRecursion,

    /// An ExploreRecursive whose sequence never recurses
    #[error("selector spec parse rejected: ExploreRecursive sequence must contain an ExploreRecursiveEdge")]
    RecursionWithoutEdge,

    /// An edge at the top of a recursive sequence, which would recurse without moving
    #[error("selector spec parse rejected: ExploreRecursiveEdge must be beneath an explore step of its sequence")]
    EdgeInHeadPosition,
}

impl SelectorError {
    /// Check if this error concerns recursion structure
    pub fn is_recursion_error(&self) -> bool {
        matches!(
            self,
            SelectorError::EdgeOutsideRecursion
                | SelectorError::RecursionWithoutEdge
                | SelectorError::EdgeInHeadPosition
        )
    }

    /// Check if this error is about the shape of a selector map itself
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            SelectorError::NotAMap { .. }
                | SelectorError::NotSingleEntry { .. }
                | SelectorError::UnknownVariant { .. }
        )
    }

    /// Check if this error is about a variant's fields
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            SelectorError::InvalidBody { .. }
                | SelectorError::MissingField { .. }
                | SelectorError::InvalidField { .. }
                | SelectorError::InvalidRange { .. }
        )
    }

    /// Get the variant name if this error is variant-specific
    pub fn variant(&self) -> Option<&'static str> {
        match self {
            SelectorError::InvalidBody { variant, .. }
            | SelectorError::MissingField { variant, .. }
            | SelectorError::InvalidField { variant, .. } => Some(variant),
            SelectorError::InvalidRange { .. } => Some("ExploreRange"),
            _ => None,
        }
    }
}

// Conversion from SelectorError to the main Error type
impl From<SelectorError> for crate::Error {
    fn from(err: SelectorError) -> Self {
        crate::Error::Selector(err)
    }
}
