//! Removal with re-canonicalization: branches left with a single entry collapse and
//! adjacent path fragments merge.
use crate::error::Result;
use crate::nibbles::NibblePath;
use crate::node::{BranchChildren, Node};
use crate::store::NodeStore;
use alloy_primitives::Bytes;
use tracing::trace;

/// Outcome of removing a key below a node.
#[derive(Debug)]
pub(crate) enum Removal {
    /// The key was not there; the node is unchanged.
    NotFound,
    /// Nothing is left below the node.
    Empty,
    /// The node to put in place of the old one.
    Node(Node),
}

impl Node {
    pub(crate) fn remove<S: NodeStore + ?Sized>(
        self,
        store: &S,
        path: &NibblePath,
    ) -> Result<Removal> {
        match self {
            Self::Leaf { path: leaf_path, .. } => {
                Ok(if leaf_path == *path { Removal::Empty } else { Removal::NotFound })
            }
            Self::Extension { path: fragment, child } => {
                if !path.starts_with(&fragment) {
                    return Ok(Removal::NotFound);
                }
                match store.resolve(&child)?.remove(store, &path.slice(fragment.len()..))? {
                    Removal::Node(node) => Ok(Removal::Node(node.prepend(store, &fragment))),
                    other => Ok(other),
                }
            }
            Self::Branch { mut children, mut value } => {
                if path.is_empty() {
                    if value.take().is_none() {
                        return Ok(Removal::NotFound);
                    }
                } else {
                    let nibble = path.at(0);
                    let Some(child) = children.get(nibble) else {
                        return Ok(Removal::NotFound);
                    };
                    match store.resolve(child)?.remove(store, &path.slice(1..))? {
                        Removal::NotFound => return Ok(Removal::NotFound),
                        Removal::Empty => {
                            children.remove(nibble);
                        }
                        Removal::Node(node) => children.set(nibble, store.put(&node)),
                    }
                }
                collapse(store, children, value)
            }
        }
    }

    /// Puts `prefix` in front of the node's path: fragments of leaves and extensions merge,
    /// a branch goes below a new extension.
    pub(crate) fn prepend<S: NodeStore + ?Sized>(self, store: &S, prefix: &NibblePath) -> Self {
        if prefix.is_empty() {
            return self;
        }
        match self {
            Self::Leaf { path, value } => Self::Leaf { path: prefix.concat(&path), value },
            Self::Extension { path, child } => {
                Self::Extension { path: prefix.concat(&path), child }
            }
            branch @ Self::Branch { .. } => {
                Self::Extension { path: prefix.clone(), child: store.put(&branch) }
            }
        }
    }
}

/// Restores the branch invariant: a branch keeps at least two entries.
fn collapse<S: NodeStore + ?Sized>(
    store: &S,
    children: BranchChildren,
    value: Option<Bytes>,
) -> Result<Removal> {
    if children.is_empty() {
        return Ok(match value {
            Some(value) => Removal::Node(Node::Leaf { path: NibblePath::new(), value }),
            None => Removal::Empty,
        });
    }
    if value.is_none() {
        if let Some((nibble, child)) = children.single() {
            trace!(target: "trie::patricia", nibble, "collapsing branch");
            let mut prefix = NibblePath::new();
            prefix.push(nibble);
            return Ok(Removal::Node(store.resolve(child)?.prepend(store, &prefix)));
        }
    }
    Ok(Removal::Node(Node::Branch { children, value }))
}
