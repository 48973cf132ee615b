//! Lookup of a value by its nibble path.
use crate::error::Result;
use crate::nibbles::NibblePath;
use crate::node::Node;
use crate::store::NodeStore;
use alloy_primitives::Bytes;

impl Node {
    /// Follows `path` down from `self`, resolving children through `store`.
    pub(crate) fn lookup<S: NodeStore + ?Sized>(
        self,
        store: &S,
        path: &NibblePath,
    ) -> Result<Option<Bytes>> {
        let path = path.as_slice();
        let mut node = self;
        let mut depth = 0;
        loop {
            let child = match node {
                Self::Leaf { path: leaf_path, value } => {
                    return Ok((leaf_path.as_slice() == &path[depth..]).then_some(value));
                }
                Self::Extension { path: fragment, child } => {
                    if !path[depth..].starts_with(fragment.as_slice()) {
                        return Ok(None);
                    }
                    depth += fragment.len();
                    child
                }
                Self::Branch { children, value } => {
                    let Some(nibble) = path.get(depth) else {
                        return Ok(value);
                    };
                    let Some(child) = children.get(*nibble) else {
                        return Ok(None);
                    };
                    depth += 1;
                    child.clone()
                }
            };
            node = store.resolve(&child)?;
        }
    }
}
