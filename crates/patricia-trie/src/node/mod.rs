//! Trie node model and node references.
mod children;
mod rlp;

pub use children::BranchChildren;

use crate::nibbles::NibblePath;
use alloy_primitives::{B256, Bytes, keccak256};
use core::fmt;

/// Encodings strictly shorter than this are embedded in their parent instead of hashed.
pub const INLINE_THRESHOLD: usize = 32;

/// The way a parent points at a child.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRef {
    /// The child's full encoding, shorter than [`INLINE_THRESHOLD`].
    Inline(Bytes),
    /// Keccak-256 of the child's encoding.
    Hash(B256),
}

impl NodeRef {
    /// Derives the reference of an already encoded node.
    pub fn from_encoded(encoded: &[u8]) -> Self {
        if encoded.len() < INLINE_THRESHOLD {
            Self::Inline(Bytes::copy_from_slice(encoded))
        } else {
            Self::Hash(keccak256(encoded))
        }
    }

    /// The digest, for hash references.
    pub const fn as_hash(&self) -> Option<&B256> {
        match self {
            Self::Hash(hash) => Some(hash),
            Self::Inline(_) => None,
        }
    }

    /// Whether the child is embedded.
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(encoded) => write!(f, "Inline({encoded})"),
            Self::Hash(hash) => write!(f, "Hash({hash})"),
        }
    }
}

/// A trie node. Nodes are never mutated once stored; updates build new nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Terminates a key: the remaining nibbles and the value.
    Leaf {
        /// Key suffix below this node.
        path: NibblePath,
        /// Stored value.
        value: Bytes,
    },
    /// Shared path fragment above a branch.
    Extension {
        /// Non-empty fragment.
        path: NibblePath,
        /// The branch below the fragment.
        child: NodeRef,
    },
    /// 16-way fan-out plus the value of a key ending exactly here.
    Branch {
        /// Child references by next nibble.
        children: BranchChildren,
        /// Value of the key ending at this branch.
        value: Option<Bytes>,
    },
}

impl Node {
    /// The reference a parent holds for this node.
    pub fn reference(&self) -> NodeRef {
        NodeRef::from_encoded(&self.encode())
    }

    /// Value stored directly in this node.
    pub const fn value(&self) -> Option<&Bytes> {
        match self {
            Self::Leaf { value, .. } => Some(value),
            Self::Branch { value, .. } => value.as_ref(),
            Self::Extension { .. } => None,
        }
    }
}
