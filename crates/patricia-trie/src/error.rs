//! Error types of the trie engine.
use alloy_primitives::B256;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = TrieError> = core::result::Result<T, E>;

/// Failures raised while reading or rewriting a trie.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// A nibble path was indexed or sliced outside of its bounds.
    #[error("nibble index {index} out of bounds for path of length {len}")]
    IllegalAccess {
        /// Requested index or length.
        index: usize,
        /// Length of the path.
        len: usize,
    },
    /// A nibble value above `0x0f`.
    #[error("invalid nibble {0:#04x}")]
    InvalidNibble(u8),
    /// Hex-prefix encoding with an unknown flag nibble or a non-zero padding nibble.
    #[error("invalid hex-prefix flag byte {0:#04x}")]
    InvalidHexPrefix(u8),
    /// A hash reference the node store cannot supply.
    #[error("missing trie node {0}")]
    MissingNode(B256),
    /// Well-formed RLP which does not describe a trie node.
    #[error("invalid trie node: {0}")]
    InvalidNode(&'static str),
    /// RLP decoding failure.
    #[error(transparent)]
    Rlp(#[from] alloy_rlp::Error),
}

/// Reasons a Merkle proof is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// The first proof node does not hash to the expected root.
    #[error("proof root {got} does not match expected root {expected}")]
    RootMismatch {
        /// Root the proof was checked against.
        expected: B256,
        /// Hash of the first proof node.
        got: B256,
    },
    /// A proof node does not hash to the reference held by its parent.
    #[error("proof node {index} hashes to {got}, parent references {expected}")]
    HashMismatch {
        /// Position of the offending node in the proof.
        index: usize,
        /// Reference held by the parent.
        expected: B256,
        /// Hash of the proof node.
        got: B256,
    },
    /// The walk needs a node the proof does not carry.
    #[error("proof ends before node {0}")]
    MissingProofNode(B256),
    /// The walk finished before consuming every proof node.
    #[error("{0} proof node(s) left unused")]
    UnusedProofNodes(usize),
    /// The proven value differs from the claimed one.
    #[error("proven value does not match the claimed value")]
    ValueMismatch,
    /// A proof node failed to decode.
    #[error("undecodable proof node: {0}")]
    Decode(TrieError),
}
