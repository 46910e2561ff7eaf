//! In-memory content-addressed block store.
//!
//! [`MemoryStore`] keeps dag-cbor encoded blocks keyed by their CIDv1
//! (sha2-256). It is the simplest [`LinkLoader`]: a traversal given a
//! `MemoryStore` can cross every link whose block was put into it.
//!
//! ```
//! use arbor::node::{fluent, Node};
//! use arbor::store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let leaf = fluent::build_map(1, |m| m.insert("answer", 42))?;
//! let link = store.put(&leaf)?;
//!
//! assert_eq!(store.get(&link)?, leaf);
//! assert_eq!(store.put(&leaf)?, link);
//! # Ok::<(), arbor::Error>(())
//! ```

pub mod errors;

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use ipld_core::ipld::Ipld;
use multihash_codetable::{Code, MultihashDigest};

pub use errors::StoreError;

use crate::{
    node::{Link, Node},
    traversal::{LinkLoader, LoadError},
};

/// Multicodec code of dag-cbor.
pub const DAG_CBOR: u64 = 0x71;

/// Encodes `node` as dag-cbor.
///
/// Map keys are written in dag-cbor canonical order, so two nodes that differ
/// only in map insertion order encode identically.
pub fn encode(node: &Node) -> Result<Vec<u8>, StoreError> {
    serde_ipld_dagcbor::to_vec(&node.to_ipld()).map_err(|e| StoreError::Encoding {
        reason: e.to_string(),
    })
}

/// Decodes dag-cbor bytes into a node.
pub fn decode(bytes: &[u8]) -> Result<Node, StoreError> {
    let ipld: Ipld = serde_ipld_dagcbor::from_slice(bytes).map_err(|e| StoreError::Decoding {
        reason: e.to_string(),
    })?;
    Ok(Node::from_ipld(&ipld)?)
}

/// Computes the CIDv1 of an encoded dag-cbor block.
pub fn link_for(bytes: &[u8]) -> Link {
    Link::new_v1(DAG_CBOR, Code::Sha2_256.digest(bytes))
}

/// Thread-safe in-memory block store.
///
/// Clones share the same block table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blocks: Arc<RwLock<HashMap<Link, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes and stores `node`, returning its link.
    pub fn put(&self, node: &Node) -> Result<Link, StoreError> {
        let bytes = encode(node)?;
        self.insert(bytes)
    }

    /// Stores an already encoded dag-cbor block after checking that it decodes.
    pub fn put_block(&self, bytes: &[u8]) -> Result<Link, StoreError> {
        decode(bytes)?;
        self.insert(bytes.to_vec())
    }

    fn insert(&self, bytes: Vec<u8>) -> Result<Link, StoreError> {
        let link = link_for(&bytes);
        let mut blocks = self.blocks.write().map_err(|_| StoreError::LockPoisoned)?;
        let size = bytes.len();
        let fresh = blocks.insert(link, bytes).is_none();
        tracing::trace!(%link, size, fresh, "stored block");
        Ok(link)
    }

    /// Loads and decodes the node stored under `link`.
    pub fn get(&self, link: &Link) -> Result<Node, StoreError> {
        if link.codec() != DAG_CBOR {
            return Err(StoreError::UnsupportedCodec {
                link: *link,
                codec: link.codec(),
            });
        }
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        let bytes = blocks
            .get(link)
            .ok_or(StoreError::NotFound { link: *link })?;
        decode(bytes)
    }

    /// Returns a copy of the raw block stored under `link`.
    pub fn get_block(&self, link: &Link) -> Result<Vec<u8>, StoreError> {
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        blocks
            .get(link)
            .cloned()
            .ok_or(StoreError::NotFound { link: *link })
    }

    pub fn contains(&self, link: &Link) -> Result<bool, StoreError> {
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blocks.contains_key(link))
    }

    /// Removes the block under `link`, returning whether it was present.
    pub fn remove(&self, link: &Link) -> Result<bool, StoreError> {
        let mut blocks = self.blocks.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blocks.remove(link).is_some())
    }

    /// Number of stored blocks.
    pub fn len(&self) -> Result<usize, StoreError> {
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blocks.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl LinkLoader for MemoryStore {
    fn load(&self, link: &Link) -> Result<Node, LoadError> {
        self.get(link).map_err(|e| match e {
            StoreError::NotFound { .. } => LoadError::NotFound,
            other => LoadError::Unavailable {
                reason: other.to_string(),
            },
        })
    }
}
