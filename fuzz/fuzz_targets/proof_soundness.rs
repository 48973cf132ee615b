#![no_main]

use alloy_primitives::{B256, Bytes};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use patricia_trie::{MemoryNodeStore, PatriciaTree, verify_proof};

#[derive(Debug, Arbitrary)]
struct Input {
    entries: Vec<([u8; 4], Vec<u8>)>,
    query: [u8; 4],
    flip: (u16, u16, u8),
}

fuzz_target!(|input: Input| {
    let mut tree = PatriciaTree::<MemoryNodeStore>::default();
    for (key, value) in &input.entries {
        tree.insert(key, value.clone()).unwrap();
    }
    let root = tree.root_hash();

    let proof = tree.prove(&input.query).unwrap();
    assert_eq!(proof.value, tree.get(&input.query).unwrap());
    assert!(proof.verify(root));
    assert_eq!(verify_proof(root, &input.query, &proof.nodes), Ok(proof.value.clone()));
    assert!(!proof.verify(B256::repeat_byte(0x5a)) || root == B256::repeat_byte(0x5a));

    let (index, offset, mask) = input.flip;
    if proof.nodes.is_empty() || mask == 0 {
        return;
    }
    let index = index as usize % proof.nodes.len();
    let offset = offset as usize % proof.nodes[index].len();
    let mut tampered = proof.clone();
    let mut node = tampered.nodes[index].to_vec();
    node[offset] ^= mask;
    tampered.nodes[index] = Bytes::from(node);
    assert!(!tampered.verify(root), "tampered proof accepted");
});
