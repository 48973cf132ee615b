//! Several trees over one store: snapshots, re-opening, and concurrent readers.
use crate::common::{hashed_key, init_tracing, value_for};
use alloy_primitives::{Bytes, keccak256};
use patricia_trie::{
    BackedNodeStore, EMPTY_ROOT_HASH, MemoryBackend, MemoryNodeStore, NodeStore, PatriciaTree,
    TrieError,
};
use std::sync::Arc;
use std::thread;

#[test]
fn pre_and_post_state_share_a_store() {
    init_tracing();
    let store = Arc::new(MemoryNodeStore::new());
    let mut pre = PatriciaTree::new(store.clone());
    for i in 0..64 {
        pre.insert(hashed_key(i).as_slice(), value_for(i)).unwrap();
    }
    let nodes_before = store.len();

    let mut post = pre.clone();
    post.insert(hashed_key(1).as_slice(), b"changed".to_vec()).unwrap();
    post.remove(hashed_key(2).as_slice()).unwrap();
    post.insert(hashed_key(1000).as_slice(), value_for(1000)).unwrap();

    // Untouched subtrees are shared, so the update only adds a handful of nodes.
    assert!(store.len() > nodes_before);
    assert!(store.len() - nodes_before < 40);

    assert_eq!(pre.get(hashed_key(1).as_slice()).unwrap(), Some(value_for(1)));
    assert_eq!(pre.get(hashed_key(2).as_slice()).unwrap(), Some(value_for(2)));
    assert_eq!(pre.get(hashed_key(1000).as_slice()).unwrap(), None);
    assert_eq!(
        post.get(hashed_key(1).as_slice()).unwrap(),
        Some(Bytes::from_static(b"changed"))
    );
    assert_eq!(post.get(hashed_key(2).as_slice()).unwrap(), None);
    assert_eq!(post.get(hashed_key(1000).as_slice()).unwrap(), Some(value_for(1000)));
    assert_ne!(pre.root_hash(), post.root_hash());
}

#[test]
fn every_historical_root_stays_readable() {
    init_tracing();
    let store = Arc::new(MemoryNodeStore::new());
    let mut tree = PatriciaTree::new(store.clone());
    let mut history = vec![(tree.root_hash(), 0u64)];
    for i in 0..40 {
        tree.insert(hashed_key(i).as_slice(), value_for(i)).unwrap();
        history.push((tree.root_hash(), i + 1));
    }
    for (root, count) in history {
        let snapshot = PatriciaTree::with_root(store.clone(), root);
        assert_eq!(snapshot.entries().unwrap().len() as u64, count);
        for i in 0..40 {
            let expected = (i < count).then(|| value_for(i));
            assert_eq!(snapshot.get(hashed_key(i).as_slice()).unwrap(), expected);
        }
    }
}

#[test]
fn concurrent_readers() {
    init_tracing();
    let store = Arc::new(MemoryNodeStore::new());
    let mut tree = PatriciaTree::new(store);
    for i in 0..256 {
        tree.insert(hashed_key(i).as_slice(), value_for(i)).unwrap();
    }
    let tree = Arc::new(tree);

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for i in (worker..256).step_by(4) {
                    assert_eq!(tree.get(hashed_key(i).as_slice()).unwrap(), Some(value_for(i)));
                    let proof = tree.prove(hashed_key(i).as_slice()).unwrap();
                    assert!(proof.verify(tree.root_hash()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn writers_on_forks_do_not_disturb_each_other() {
    init_tracing();
    let store = Arc::new(MemoryNodeStore::new());
    let mut base = PatriciaTree::new(store);
    for i in 0..32 {
        base.insert(hashed_key(i).as_slice(), value_for(i)).unwrap();
    }
    let base_root = base.root_hash();

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let mut fork = base.clone();
            thread::spawn(move || {
                for i in 0..16 {
                    let key = keccak256([worker as u8, i as u8]);
                    fork.insert(key.as_slice(), value_for(i)).unwrap();
                }
                fork.root_hash()
            })
        })
        .collect();
    let roots: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

    assert_eq!(base.root_hash(), base_root);
    for (worker, root) in roots.into_iter().enumerate() {
        let mut expected = base.clone();
        for i in 0..16 {
            let key = keccak256([worker as u8, i as u8]);
            expected.insert(key.as_slice(), value_for(i)).unwrap();
        }
        assert_eq!(root, expected.root_hash());
    }
}

#[test]
fn backed_store_survives_reopening() {
    init_tracing();
    let backend = Arc::new(MemoryBackend::new());
    let root = {
        let mut tree = PatriciaTree::new(BackedNodeStore::new(backend.clone()));
        for i in 0..50 {
            tree.insert(hashed_key(i).as_slice(), value_for(i)).unwrap();
        }
        tree.root_hash()
    };

    let reopened = PatriciaTree::with_root(BackedNodeStore::new(backend.clone()), root);
    for i in 0..50 {
        assert_eq!(reopened.get(hashed_key(i).as_slice()).unwrap(), Some(value_for(i)));
    }
    assert!(reopened.store().resolve_hash(&root).is_ok());

    let elsewhere = PatriciaTree::with_root(BackedNodeStore::new(MemoryBackend::new()), root);
    assert_eq!(elsewhere.get(b"any"), Err(TrieError::MissingNode(root)));
    let empty = PatriciaTree::with_root(BackedNodeStore::new(backend), EMPTY_ROOT_HASH);
    assert_eq!(empty.get(b"x"), Ok(None));
}
