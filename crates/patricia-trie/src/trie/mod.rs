//! Persistent Merkle Patricia tree over a shared node store.
mod display;
mod get;
mod insert;
mod remove;
mod walk;

pub use walk::BranchStep;

use crate::error::Result;
use crate::nibbles::NibblePath;
use crate::node::Node;
use crate::store::NodeStore;
use alloy_primitives::{B256, Bytes, hex};
use alloy_trie::EMPTY_ROOT_HASH;
use remove::Removal;
use std::collections::BTreeMap;
use tracing::trace;

/// A Merkle Patricia tree: a root hash plus the store its nodes live in.
///
/// Nodes are never modified in place. Every update writes new nodes along the touched path
/// and moves the root, so a clone taken before an update (or a tree re-opened with
/// [`PatriciaTree::with_root`]) keeps seeing the old contents as long as the store is shared.
#[derive(Debug, Clone)]
pub struct PatriciaTree<S> {
    store: S,
    root: Option<B256>,
}

impl<S: NodeStore> PatriciaTree<S> {
    /// Empty tree backed by `store`.
    pub const fn new(store: S) -> Self {
        Self { store, root: None }
    }

    /// Opens the tree rooted at `root`. Nodes are resolved lazily, so a root the store does
    /// not know only surfaces as [`TrieError::MissingNode`](crate::TrieError::MissingNode)
    /// on first access.
    pub fn with_root(store: S, root: B256) -> Self {
        Self { store, root: (root != EMPTY_ROOT_HASH).then_some(root) }
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Releases the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Merkle root. [`EMPTY_ROOT_HASH`] for an empty tree.
    pub fn root_hash(&self) -> B256 {
        self.root.unwrap_or(EMPTY_ROOT_HASH)
    }

    /// Whether the tree holds no entries.
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The decoded root node, `None` for an empty tree.
    pub fn root_node(&self) -> Result<Option<Node>> {
        self.root.map(|root| self.store.resolve_hash(&root)).transpose()
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        match self.root_node()? {
            Some(root) => root.lookup(&self.store, &NibblePath::from_bytes(key)),
            None => Ok(None),
        }
    }

    /// Whether `key` has a value.
    pub fn contains_key(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// An empty value removes the key: a branch cannot tell an empty value from no value.
    pub fn insert(&mut self, key: &[u8], value: impl Into<Bytes>) -> Result<()> {
        let value = value.into();
        if value.is_empty() {
            self.remove(key)?;
            return Ok(());
        }
        trace!(target: "trie::patricia", key = %hex::encode(key), len = value.len(), "insert");

        let path = NibblePath::from_bytes(key);
        let root = match self.root_node()? {
            Some(root) => root.insert(&self.store, &path, value)?,
            None => Node::Leaf { path, value },
        };
        self.root = Some(self.store.put_root(&root));
        Ok(())
    }

    /// Deletes `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &[u8]) -> Result<bool> {
        let Some(root) = self.root_node()? else {
            return Ok(false);
        };
        trace!(target: "trie::patricia", key = %hex::encode(key), "remove");

        match root.remove(&self.store, &NibblePath::from_bytes(key))? {
            Removal::NotFound => Ok(false),
            Removal::Empty => {
                self.root = None;
                Ok(true)
            }
            Removal::Node(root) => {
                self.root = Some(self.store.put_root(&root));
                Ok(true)
            }
        }
    }

    /// Every key/value pair, with keys rebuilt from their paths.
    pub fn entries(&self) -> Result<BTreeMap<Bytes, Bytes>> {
        let mut entries = BTreeMap::new();
        if let Some(root) = self.root_node()? {
            walk::collect_entries(&self.store, root, NibblePath::new(), &mut entries)?;
        }
        Ok(entries)
    }
}

impl<S: NodeStore + Clone> PatriciaTree<S> {
    /// A new tree with `value` stored under `key`. `self` is left untouched.
    pub fn inserted(&self, key: &[u8], value: impl Into<Bytes>) -> Result<Self> {
        let mut tree = self.clone();
        tree.insert(key, value)?;
        Ok(tree)
    }

    /// A new tree without `key`. `self` is left untouched.
    pub fn removed(&self, key: &[u8]) -> Result<Self> {
        let mut tree = self.clone();
        tree.remove(key)?;
        Ok(tree)
    }
}

impl<S: Default + NodeStore> Default for PatriciaTree<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
