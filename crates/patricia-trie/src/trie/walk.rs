//! Path walks: the chain of nodes toward a key, and the depth-first entry export.
use crate::error::Result;
use crate::nibbles::NibblePath;
use crate::node::{Node, NodeRef};
use crate::store::NodeStore;
use crate::trie::PatriciaTree;
use alloy_primitives::Bytes;
use std::collections::BTreeMap;

/// One node on the path from the root toward a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStep {
    /// The node reached.
    pub node: Node,
    /// How its parent refers to it. The root is always a hash reference.
    pub reference: NodeRef,
    /// Key nibbles consumed by the nodes above.
    pub consumed: usize,
    /// Key nibbles left to match from this node on.
    pub remaining: usize,
}

impl<S: NodeStore> PatriciaTree<S> {
    /// Every node visited while looking up `key`, root first.
    ///
    /// The walk stops at a leaf, at an extension whose fragment diverges from the key, at an
    /// empty branch slot, or at the branch where the key runs out. An empty tree yields no
    /// steps.
    pub fn walk(&self, key: &[u8]) -> Result<Vec<BranchStep>> {
        let Some(root) = self.root else {
            return Ok(Vec::new());
        };
        let path = NibblePath::from_bytes(key);
        let mut steps = Vec::new();
        let mut reference = NodeRef::Hash(root);
        let mut depth = 0;
        loop {
            let node = self.store.resolve(&reference)?;
            let next = match &node {
                Node::Leaf { .. } => None,
                Node::Extension { path: fragment, child } => path.as_slice()[depth..]
                    .starts_with(fragment.as_slice())
                    .then(|| (fragment.len(), child.clone())),
                Node::Branch { children, .. } => path
                    .as_slice()
                    .get(depth)
                    .and_then(|nibble| children.get(*nibble))
                    .map(|child| (1, child.clone())),
            };
            steps.push(BranchStep {
                node,
                reference,
                consumed: depth,
                remaining: path.len() - depth,
            });
            let Some((advance, child)) = next else {
                return Ok(steps);
            };
            depth += advance;
            reference = child;
        }
    }
}

/// Adds every entry below `node`, whose path starts with `prefix`, to `entries`.
pub(super) fn collect_entries<S: NodeStore + ?Sized>(
    store: &S,
    node: Node,
    prefix: NibblePath,
    entries: &mut BTreeMap<Bytes, Bytes>,
) -> Result<()> {
    match node {
        Node::Leaf { path, value } => {
            entries.insert(prefix.concat(&path).pack().into(), value);
        }
        Node::Extension { path, child } => {
            collect_entries(store, store.resolve(&child)?, prefix.concat(&path), entries)?;
        }
        Node::Branch { children, value } => {
            if let Some(value) = value {
                entries.insert(prefix.pack().into(), value);
            }
            for (nibble, child) in children.iter() {
                let mut path = prefix.clone();
                path.push(nibble);
                collect_entries(store, store.resolve(child)?, path, entries)?;
            }
        }
    }
    Ok(())
}
