//! Insertion: rebuilds the path to the key, splitting leaves and extensions where paths diverge.
use crate::error::Result;
use crate::nibbles::NibblePath;
use crate::node::{BranchChildren, Node};
use crate::store::NodeStore;
use alloy_primitives::Bytes;
use tracing::trace;

impl Node {
    /// Returns the node replacing `self` once `value` is stored under `path`.
    pub(crate) fn insert<S: NodeStore + ?Sized>(
        self,
        store: &S,
        path: &NibblePath,
        value: Bytes,
    ) -> Result<Self> {
        match self {
            Self::Leaf { path: leaf_path, value: leaf_value } => {
                let shared = leaf_path.common_prefix_len(path);
                if shared == leaf_path.len() && shared == path.len() {
                    return Ok(Self::Leaf { path: leaf_path, value });
                }
                trace!(target: "trie::patricia", shared, "splitting leaf");

                let mut children = BranchChildren::new();
                let mut branch_value = None;
                let (old_rest, new_rest) = (leaf_path.slice(shared..), path.slice(shared..));
                attach(store, &mut children, &mut branch_value, &old_rest, leaf_value);
                attach(store, &mut children, &mut branch_value, &new_rest, value);
                Ok(under_prefix(store, path.slice(..shared), Self::Branch {
                    children,
                    value: branch_value,
                }))
            }
            Self::Extension { path: fragment, child } => {
                let shared = fragment.common_prefix_len(path);
                if shared == fragment.len() {
                    let child =
                        store.resolve(&child)?.insert(store, &path.slice(shared..), value)?;
                    return Ok(Self::Extension { path: fragment, child: store.put(&child) });
                }
                trace!(target: "trie::patricia", shared, "splitting extension");

                // The fragment keeps at least one nibble past the split point.
                let mut children = BranchChildren::new();
                let remainder = fragment.slice(shared + 1..);
                let moved = if remainder.is_empty() {
                    child
                } else {
                    store.put(&Self::Extension { path: remainder, child })
                };
                children.set(fragment.at(shared), moved);

                let mut branch_value = None;
                attach(store, &mut children, &mut branch_value, &path.slice(shared..), value);
                Ok(under_prefix(store, path.slice(..shared), Self::Branch {
                    children,
                    value: branch_value,
                }))
            }
            Self::Branch { mut children, value: branch_value } => {
                if path.is_empty() {
                    return Ok(Self::Branch { children, value: Some(value) });
                }
                let nibble = path.at(0);
                let rest = path.slice(1..);
                let child = match children.get(nibble) {
                    Some(child) => store.resolve(child)?.insert(store, &rest, value)?,
                    None => Self::Leaf { path: rest, value },
                };
                children.set(nibble, store.put(&child));
                Ok(Self::Branch { children, value: branch_value })
            }
        }
    }
}

/// Hangs `value` off a branch being built: in the value slot when `rest` is exhausted,
/// otherwise as a leaf under the slot of its first nibble.
fn attach<S: NodeStore + ?Sized>(
    store: &S,
    children: &mut BranchChildren,
    branch_value: &mut Option<Bytes>,
    rest: &NibblePath,
    value: Bytes,
) {
    if rest.is_empty() {
        *branch_value = Some(value);
    } else {
        children.set(rest.at(0), store.put(&Node::Leaf { path: rest.slice(1..), value }));
    }
}

/// Puts `branch` below an extension over `prefix`, unless the prefix is empty.
fn under_prefix<S: NodeStore + ?Sized>(store: &S, prefix: NibblePath, branch: Node) -> Node {
    if prefix.is_empty() {
        branch
    } else {
        Node::Extension { path: prefix, child: store.put(&branch) }
    }
}
