//! Eager in-memory node store.
use super::NodeStore;
use crate::error::{Result, TrieError};
use crate::node::Node;
use alloy_primitives::map::B256Map;
use alloy_primitives::{B256, Bytes};
use parking_lot::RwLock;

/// Keeps decoded nodes in a hash map. Nothing is ever evicted.
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    nodes: RwLock<B256Map<Node>>,
}

impl MemoryNodeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hashed nodes held.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Whether a node with this hash is stored.
    pub fn contains(&self, hash: &B256) -> bool {
        self.nodes.read().contains_key(hash)
    }
}

impl NodeStore for MemoryNodeStore {
    fn resolve_hash(&self, hash: &B256) -> Result<Node> {
        self.nodes.read().get(hash).cloned().ok_or(TrieError::MissingNode(*hash))
    }

    fn insert(&self, hash: B256, node: &Node, _encoded: Bytes) {
        self.nodes.write().entry(hash).or_insert_with(|| node.clone());
    }
}
