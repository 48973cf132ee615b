#![allow(unused_crate_dependencies)]
//! Workload generation for the trie benchmarks.

use alloy_primitives::{B256, Bytes, keccak256};
use alloy_trie::{HashBuilder, Nibbles};
use patricia_trie::{NodeStore, PatriciaTree, Result};
use std::collections::BTreeMap;

/// Shape of a generated workload.
#[derive(Debug)]
pub struct WorkloadConfig {
    /// Number of key/value pairs.
    pub num_entries: usize,
    /// Length of every value in bytes.
    pub value_len: usize,
}

/// Generated key/value pairs with their expected root.
#[derive(Debug)]
pub struct GeneratedWorkload {
    /// Hashed 32-byte keys with their values, in generation order.
    pub entries: Vec<(B256, Bytes)>,
    /// Root of a trie holding every entry, computed with alloy's `HashBuilder`.
    pub root: B256,
}

/// Deterministic 32-byte key for index `i`, spread like a hashed account address.
pub fn make_key(i: usize) -> B256 {
    keccak256((i as u64).to_be_bytes())
}

/// Generates a workload and its reference root.
pub fn generate_workload(config: &WorkloadConfig) -> GeneratedWorkload {
    let entries: Vec<(B256, Bytes)> = (0..config.num_entries)
        .map(|i| {
            let mut value = vec![0u8; config.value_len.max(1)];
            value[0] = (i % 255) as u8 + 1;
            (make_key(i), Bytes::from(value))
        })
        .collect();

    let sorted: BTreeMap<_, _> = entries.iter().cloned().collect();
    let mut hb = HashBuilder::default();
    for (key, value) in &sorted {
        hb.add_leaf(Nibbles::unpack(key), value);
    }

    GeneratedWorkload { entries, root: hb.root() }
}

/// Inserts every entry of `workload` into a fresh tree over `store`.
pub fn populate<S: NodeStore>(
    store: S,
    workload: &GeneratedWorkload,
) -> Result<PatriciaTree<S>> {
    let mut tree = PatriciaTree::new(store);
    for (key, value) in &workload.entries {
        tree.insert(key.as_slice(), value.clone())?;
    }
    debug_assert_eq!(tree.root_hash(), workload.root);
    Ok(tree)
}
