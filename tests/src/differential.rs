//! Root equivalence against alloy's `HashBuilder`.
use crate::common::{hash_builder_root, hashed_key, init_tracing, tree_from, value_for};
use alloy_primitives::{B256, Bytes, keccak256};
use patricia_trie::{EMPTY_ROOT_HASH, MemoryNodeStore, Node, NodeStore, PatriciaTree};
use std::collections::BTreeMap;

fn assert_roots_match(tree: &PatriciaTree<MemoryNodeStore>, model: &BTreeMap<B256, Bytes>) {
    assert_eq!(tree.root_hash(), hash_builder_root(model), "root diverged from HashBuilder");
}

#[test]
fn key1_key2_scenario() {
    init_tracing();
    // First nibbles 6 and 4: the keys share no prefix.
    let (key1, key2) = (&b"key1"[..], &b"Key2"[..]);

    let mut tree = PatriciaTree::<MemoryNodeStore>::default();
    tree.insert(key1, b"value1".to_vec()).unwrap();
    assert_eq!(tree.get(key1).unwrap(), Some(Bytes::from_static(b"value1")));

    tree.insert(key2, b"value2".to_vec()).unwrap();
    let Some(Node::Branch { children, value }) = tree.root_node().unwrap() else {
        panic!("root should be a branch");
    };
    assert_eq!(value, None);
    assert_eq!(children.len(), 2);
    for (_, child) in children.iter() {
        assert!(matches!(tree.store().resolve(child).unwrap(), Node::Leaf { .. }));
    }

    assert!(tree.remove(key1).unwrap());
    assert_eq!(tree.get(key1).unwrap(), None);
    assert!(matches!(tree.root_node().unwrap(), Some(Node::Leaf { .. })));

    let mut fresh = PatriciaTree::<MemoryNodeStore>::default();
    fresh.insert(key2, b"value2".to_vec()).unwrap();
    assert_eq!(tree.root_hash(), fresh.root_hash());
}

#[test]
fn insertion_order_independence() {
    init_tracing();
    let model: BTreeMap<B256, Bytes> = (0..300).map(|i| (hashed_key(i), value_for(i))).collect();
    let expected = hash_builder_root(&model);

    let mut shuffled: Vec<_> = model.iter().collect();
    // Deterministic permutation: order by the hash of the key.
    shuffled.sort_by_key(|(key, _)| keccak256(key.as_slice()));
    let mut tree = PatriciaTree::<MemoryNodeStore>::default();
    for (key, value) in shuffled {
        tree.insert(key.as_slice(), value.clone()).unwrap();
    }
    assert_eq!(tree.root_hash(), expected);
    assert_eq!(tree_from(&model).root_hash(), expected);
}

#[test]
fn randomized_differential_root_equivalence() {
    init_tracing();
    let mut tree = PatriciaTree::<MemoryNodeStore>::default();
    let mut model = BTreeMap::new();

    for step in 0u64..600 {
        let seed = keccak256(step.to_le_bytes());
        // Small key space so removals and overwrites actually hit existing keys.
        let key = hashed_key(u64::from(seed[0] % 64));
        if seed[1] % 3 == 0 {
            let removed = tree.remove(key.as_slice()).unwrap();
            assert_eq!(removed, model.remove(&key).is_some());
        } else {
            let value = value_for(u64::from(seed[2]));
            tree.insert(key.as_slice(), value.clone()).unwrap();
            model.insert(key, value);
        }
        assert_roots_match(&tree, &model);
    }

    for key in model.keys().copied().collect::<Vec<_>>() {
        tree.remove(key.as_slice()).unwrap();
        model.remove(&key);
        assert_roots_match(&tree, &model);
    }
    assert_eq!(tree.root_hash(), EMPTY_ROOT_HASH);
}

#[test]
fn delete_matches_fresh_build() {
    init_tracing();
    let full: BTreeMap<B256, Bytes> = (0..128).map(|i| (hashed_key(i), value_for(i))).collect();
    let mut tree = tree_from(&full);

    let mut remaining = full.clone();
    for i in (0..128).step_by(3) {
        let key = hashed_key(i);
        tree.remove(key.as_slice()).unwrap();
        remaining.remove(&key);
        assert_eq!(tree.get(key.as_slice()).unwrap(), None);
    }
    assert_eq!(tree.root_hash(), tree_from(&remaining).root_hash());
    assert_roots_match(&tree, &remaining);
    for (key, value) in &remaining {
        assert_eq!(tree.get(key.as_slice()).unwrap().as_ref(), Some(value));
    }
}

#[test]
fn value_size_boundaries_match_hash_builder() {
    init_tracing();
    for len in [1usize, 31, 32, 33, 55, 56, 1024] {
        let model: BTreeMap<B256, Bytes> =
            (0..20).map(|i| (hashed_key(i), Bytes::from(vec![0xab; len]))).collect();
        assert_roots_match(&tree_from(&model), &model);
    }
}

#[test]
fn exported_entries_match_inserted() {
    init_tracing();
    let model: BTreeMap<B256, Bytes> = (0..50).map(|i| (hashed_key(i), value_for(i))).collect();
    let exported = tree_from(&model).entries().unwrap();
    let expected: BTreeMap<Bytes, Bytes> = model
        .into_iter()
        .map(|(key, value)| (Bytes::copy_from_slice(key.as_slice()), value))
        .collect();
    assert_eq!(exported, expected);
}
