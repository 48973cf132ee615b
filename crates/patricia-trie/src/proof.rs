//! Merkle proofs of inclusion and exclusion.
//!
//! A proof is the ordered list of node encodings from the root toward a key. Children held
//! inline by their parent travel inside the parent's encoding, so only the root and nodes
//! reached through a hash reference are listed. Verification needs nothing but the root hash.
use crate::error::{ProofError, Result};
use crate::nibbles::NibblePath;
use crate::node::{Node, NodeRef};
use crate::store::NodeStore;
use crate::trie::PatriciaTree;
use alloy_primitives::{B256, Bytes, hex, keccak256};
use alloy_trie::EMPTY_ROOT_HASH;
use tracing::debug;

/// Proof that `key` maps to `value` (or to nothing, when `value` is `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleProof {
    /// The proven key.
    pub key: Bytes,
    /// The value found under the key, if any.
    pub value: Option<Bytes>,
    /// Node encodings, root first.
    pub nodes: Vec<Bytes>,
}

impl MerkleProof {
    /// Checks the proof against `root`, including the claimed value.
    pub fn verify(&self, root: B256) -> bool {
        let value = self.value.as_ref().map(|value| &value[..]);
        match verify_value(root, &self.key, value, &self.nodes) {
            Ok(()) => true,
            Err(err) => {
                debug!(target: "trie::proof", key = %hex::encode(&self.key), %err, "proof rejected");
                false
            }
        }
    }
}

impl<S: NodeStore> PatriciaTree<S> {
    /// Builds a proof for `key`. Absent keys get an exclusion proof.
    pub fn prove(&self, key: &[u8]) -> Result<MerkleProof> {
        let steps = self.walk(key)?;
        let nodes = steps
            .iter()
            .filter(|step| !step.reference.is_inline())
            .map(|step| step.node.encode())
            .collect();
        Ok(MerkleProof { key: Bytes::copy_from_slice(key), value: self.get(key)?, nodes })
    }
}

/// Replays `nodes` from `root` along `key` and returns the value the proof commits to.
///
/// `Ok(None)` is a valid exclusion proof. Any node that does not hash to the reference its
/// parent holds, a walk that runs out of nodes, or nodes left over after the walk reject
/// the proof.
pub fn verify_proof(
    root: B256,
    key: &[u8],
    nodes: &[Bytes],
) -> Result<Option<Bytes>, ProofError> {
    let Some(first) = nodes.first() else {
        if root == EMPTY_ROOT_HASH {
            return Ok(None);
        }
        return Err(ProofError::MissingProofNode(root));
    };
    let got = keccak256(first);
    if got != root {
        return Err(ProofError::RootMismatch { expected: root, got });
    }

    let path = NibblePath::from_bytes(key);
    let path = path.as_slice();
    let mut used = 1;
    let mut depth = 0;
    let mut node = Node::decode(first).map_err(ProofError::Decode)?;
    let value = loop {
        let child = match node {
            Node::Leaf { path: leaf_path, value } => {
                break (leaf_path.as_slice() == &path[depth..]).then_some(value);
            }
            Node::Extension { path: fragment, child } => {
                if !path[depth..].starts_with(fragment.as_slice()) {
                    break None;
                }
                depth += fragment.len();
                child
            }
            Node::Branch { children, value } => {
                let Some(nibble) = path.get(depth) else {
                    break value;
                };
                let Some(child) = children.get(*nibble) else {
                    break None;
                };
                depth += 1;
                child.clone()
            }
        };

        let encoded = match child {
            NodeRef::Inline(encoded) => encoded,
            NodeRef::Hash(expected) => {
                let Some(encoded) = nodes.get(used) else {
                    return Err(ProofError::MissingProofNode(expected));
                };
                let got = keccak256(encoded);
                if got != expected {
                    return Err(ProofError::HashMismatch { index: used, expected, got });
                }
                used += 1;
                encoded.clone()
            }
        };
        node = Node::decode(&encoded).map_err(ProofError::Decode)?;
    };

    if used < nodes.len() {
        return Err(ProofError::UnusedProofNodes(nodes.len() - used));
    }
    Ok(value)
}

/// Like [`verify_proof`], and also requires the proven value to equal `expected`.
pub fn verify_value(
    root: B256,
    key: &[u8],
    expected: Option<&[u8]>,
    nodes: &[Bytes],
) -> Result<(), ProofError> {
    let proven = verify_proof(root, key, nodes)?;
    if proven.as_ref().map(|value| &value[..]) != expected {
        return Err(ProofError::ValueMismatch);
    }
    Ok(())
}
