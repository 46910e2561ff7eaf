//! Error types for the block store.

use thiserror::Error;

use crate::node::{Link, NodeError};

/// Errors that can occur while storing or loading blocks.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No block is stored under the link.
    #[error("block not found: {link}")]
    NotFound { link: Link },

    /// A node could not be encoded as dag-cbor.
    #[error("failed to encode block: {reason}")]
    Encoding { reason: String },

    /// Stored bytes could not be decoded as dag-cbor.
    #[error("failed to decode block: {reason}")]
    Decoding { reason: String },

    /// The bytes were encoded with a codec the store does not read.
    #[error("unsupported codec 0x{codec:x} in link {link}")]
    UnsupportedCodec { link: Link, codec: u64 },

    /// A writer panicked while holding the block table.
    #[error("block table lock poisoned")]
    LockPoisoned,

    /// Decoded data does not fit the data model.
    #[error(transparent)]
    Node(#[from] NodeError),
}

impl StoreError {
    /// Check if this error means the block is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Check if this error is about block encoding or decoding
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            StoreError::Encoding { .. }
                | StoreError::Decoding { .. }
                | StoreError::UnsupportedCodec { .. }
                | StoreError::Node(_)
        )
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
