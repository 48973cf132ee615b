#![no_main]

use std::collections::BTreeMap;

use alloy_primitives::Bytes;
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use patricia_trie::{MemoryNodeStore, PatriciaTree};

#[derive(Debug, Arbitrary)]
enum Op {
    Insert { key: Vec<u8>, value: Vec<u8> },
    Remove { key: Vec<u8> },
}

#[derive(Debug, Arbitrary)]
struct Input {
    ops: Vec<Op>,
}

// Keys of any length, including prefixes of each other and the empty key, exercise branch
// values and every collapse path. Without a reference hasher for such keys, the checks are
// lookups against a model and order independence of the final root.
fuzz_target!(|input: Input| {
    let mut tree = PatriciaTree::<MemoryNodeStore>::default();
    let mut model = BTreeMap::<Bytes, Bytes>::new();

    for op in &input.ops {
        match op {
            Op::Insert { key, value } => {
                tree.insert(key, value.clone()).unwrap();
                let model_key = Bytes::copy_from_slice(key);
                if value.is_empty() {
                    model.remove(&model_key);
                } else {
                    model.insert(model_key.clone(), Bytes::copy_from_slice(value));
                }
                assert_eq!(tree.get(key).unwrap(), model.get(&model_key).cloned());
            }
            Op::Remove { key } => {
                let removed = tree.remove(key).unwrap();
                assert_eq!(removed, model.remove(&Bytes::copy_from_slice(key)).is_some());
                assert_eq!(tree.get(key).unwrap(), None);
            }
        }
    }

    assert_eq!(tree.entries().unwrap(), model);

    let mut rebuilt = PatriciaTree::<MemoryNodeStore>::default();
    for (key, value) in model.iter().rev() {
        rebuilt.insert(key, value.clone()).unwrap();
    }
    assert_eq!(rebuilt.root_hash(), tree.root_hash(), "root depends on insertion history");
});
