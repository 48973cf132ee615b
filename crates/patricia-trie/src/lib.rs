//! Persistent Ethereum Merkle Patricia trie.
//!
//! Trees are immutable node graphs addressed by keccak-256 hashes and kept in a pluggable
//! [`NodeStore`]. Every update produces a new root while earlier roots stay readable, and
//! any key can be proven present or absent with a [`MerkleProof`].
mod error;
mod nibbles;
mod node;
mod proof;
mod store;
mod trie;

pub use alloy_trie::EMPTY_ROOT_HASH;
pub use error::{ProofError, Result, TrieError};
pub use nibbles::NibblePath;
pub use node::{BranchChildren, INLINE_THRESHOLD, Node, NodeRef};
pub use proof::{MerkleProof, verify_proof, verify_value};
pub use store::{BackedNodeStore, MemoryBackend, MemoryNodeStore, NodeBackend, NodeStore};
pub use trie::{BranchStep, PatriciaTree};
