//! Node stores: where encoded nodes live, keyed by their hash.
mod backed;
mod memory;

pub use backed::{BackedNodeStore, MemoryBackend, NodeBackend};
pub use memory::MemoryNodeStore;

use crate::error::Result;
use crate::node::{INLINE_THRESHOLD, Node, NodeRef};
use alloy_primitives::{B256, Bytes, keccak256};
use std::sync::Arc;

/// Content-addressed node storage shared by any number of trees.
///
/// Entries are immutable once written: a hash always maps to the same node, so stores can be
/// read concurrently and old roots stay readable as long as their nodes are kept.
pub trait NodeStore {
    /// Loads the node whose encoding hashes to `hash`.
    ///
    /// Fails with [`TrieError::MissingNode`](crate::TrieError::MissingNode) when the store
    /// does not hold it.
    fn resolve_hash(&self, hash: &B256) -> Result<Node>;

    /// Records `node` with its `encoded` form under `hash`.
    fn insert(&self, hash: B256, node: &Node, encoded: Bytes);

    /// Turns a reference into a node. Embedded references are decoded without a lookup.
    fn resolve(&self, reference: &NodeRef) -> Result<Node> {
        match reference {
            NodeRef::Inline(encoded) => Node::decode(encoded),
            NodeRef::Hash(hash) => self.resolve_hash(hash),
        }
    }

    /// Stores `node` if its encoding is too long to embed and returns its reference.
    fn put(&self, node: &Node) -> NodeRef {
        let encoded = node.encode();
        if encoded.len() < INLINE_THRESHOLD {
            return NodeRef::Inline(encoded);
        }
        let hash = keccak256(&encoded);
        self.insert(hash, node, encoded);
        NodeRef::Hash(hash)
    }

    /// Stores a root node. Roots are always addressed by hash, however short.
    fn put_root(&self, node: &Node) -> B256 {
        let encoded = node.encode();
        let hash = keccak256(&encoded);
        self.insert(hash, node, encoded);
        hash
    }
}

impl<S: NodeStore + ?Sized> NodeStore for &S {
    fn resolve_hash(&self, hash: &B256) -> Result<Node> {
        (**self).resolve_hash(hash)
    }

    fn insert(&self, hash: B256, node: &Node, encoded: Bytes) {
        (**self).insert(hash, node, encoded);
    }
}

impl<S: NodeStore + ?Sized> NodeStore for Arc<S> {
    fn resolve_hash(&self, hash: &B256) -> Result<Node> {
        (**self).resolve_hash(hash)
    }

    fn insert(&self, hash: B256, node: &Node, encoded: Bytes) {
        (**self).insert(hash, node, encoded);
    }
}
