//! Lazy node store over an external key-value backend.
use super::NodeStore;
use crate::error::{Result, TrieError};
use crate::node::Node;
use alloy_primitives::map::B256Map;
use alloy_primitives::{B256, Bytes, keccak256};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Raw storage of node encodings keyed by their hash.
pub trait NodeBackend {
    /// The encoding stored under `hash`, if any.
    fn read(&self, hash: &B256) -> Option<Bytes>;

    /// Stores `encoded` under `hash`.
    fn write(&self, hash: B256, encoded: Bytes);
}

impl<B: NodeBackend + ?Sized> NodeBackend for Arc<B> {
    fn read(&self, hash: &B256) -> Option<Bytes> {
        (**self).read(hash)
    }

    fn write(&self, hash: B256, encoded: Bytes) {
        (**self).write(hash, encoded);
    }
}

/// Node store which keeps only encodings and decodes nodes on access.
#[derive(Debug, Default)]
pub struct BackedNodeStore<B> {
    backend: B,
}

impl<B: NodeBackend> BackedNodeStore<B> {
    /// Wraps `backend`.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwraps the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: NodeBackend> NodeStore for BackedNodeStore<B> {
    fn resolve_hash(&self, hash: &B256) -> Result<Node> {
        let Some(encoded) = self.backend.read(hash) else {
            debug!(target: "trie::store", %hash, "node missing from backend");
            return Err(TrieError::MissingNode(*hash));
        };
        Node::decode(&encoded)
    }

    fn insert(&self, hash: B256, _node: &Node, encoded: Bytes) {
        self.backend.write(hash, encoded);
    }
}

/// In-memory [`NodeBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<B256Map<Bytes>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a backend with node encodings, each keyed by its keccak hash.
    ///
    /// Feeding it the nodes of a proof yields a partial trie: keys along the proven path
    /// resolve, everything else reports a missing node.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        nodes.into_iter().map(Into::into).collect()
    }

    /// Number of stored encodings.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl FromIterator<Bytes> for MemoryBackend {
    fn from_iter<T: IntoIterator<Item = Bytes>>(iter: T) -> Self {
        let entries = iter.into_iter().map(|encoded| (keccak256(&encoded), encoded)).collect();
        Self { entries: RwLock::new(entries) }
    }
}

impl NodeBackend for MemoryBackend {
    fn read(&self, hash: &B256) -> Option<Bytes> {
        self.entries.read().get(hash).cloned()
    }

    fn write(&self, hash: B256, encoded: Bytes) {
        self.entries.write().entry(hash).or_insert(encoded);
    }
}
