#![no_main]

use std::collections::BTreeMap;

use alloy_primitives::{B256, Bytes};
use alloy_trie::{HashBuilder, Nibbles};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use patricia_trie::{MemoryNodeStore, PatriciaTree};

#[derive(Debug, Arbitrary)]
enum Op {
    Insert { key: [u8; 32], value: Vec<u8> },
    Remove { key: [u8; 32] },
}

#[derive(Debug, Arbitrary)]
struct Input {
    ops: Vec<Op>,
}

fn model_root(model: &BTreeMap<B256, Bytes>) -> B256 {
    let mut hash_builder = HashBuilder::default();
    for (key, value) in model {
        hash_builder.add_leaf(Nibbles::unpack(*key), value);
    }
    hash_builder.root()
}

fuzz_target!(|input: Input| {
    let mut tree = PatriciaTree::<MemoryNodeStore>::default();
    let mut model = BTreeMap::<B256, Bytes>::new();

    for op in &input.ops {
        match op {
            Op::Insert { key, value } => {
                let key = B256::from(*key);
                let value = Bytes::copy_from_slice(value);
                tree.insert(key.as_slice(), value.clone()).unwrap();
                // An empty value deletes the key.
                if value.is_empty() {
                    model.remove(&key);
                } else {
                    model.insert(key, value);
                }
            }
            Op::Remove { key } => {
                let key = B256::from(*key);
                let removed = tree.remove(key.as_slice()).unwrap();
                assert_eq!(removed, model.remove(&key).is_some());
            }
        }

        // Validate after each operation so transient divergences are not masked by later ops.
        assert_eq!(tree.root_hash(), model_root(&model), "tree root != HashBuilder root");
    }
});
