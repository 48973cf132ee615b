//! Simple printing implementation of a tree.
use crate::node::{Node, NodeRef};
use crate::store::NodeStore;
use crate::trie::PatriciaTree;
use std::fmt::{self, Display};

impl<S: NodeStore> Display for PatriciaTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return write!(f, "PatriciaTree {{ EMPTY }}");
        };
        writeln!(f, "PatriciaTree {{ root: {root} }}")?;
        fmt_ref(f, &self.store, &NodeRef::Hash(root), 0)
    }
}

fn fmt_ref<S: NodeStore + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    store: &S,
    reference: &NodeRef,
    indent: usize,
) -> fmt::Result {
    write!(f, "{}", " ".repeat(indent))?;
    let node = match store.resolve(reference) {
        Ok(node) => node,
        Err(err) => return write!(f, "<{err}>"),
    };
    match node {
        Node::Leaf { path, value } => write!(f, "Leaf {{ path: {path:?}, value: {value} }}"),
        Node::Extension { path, child } => {
            writeln!(f, "Extension {{ path: {path:?} }}")?;
            fmt_ref(f, store, &child, indent + 4)
        }
        Node::Branch { children, value } => {
            write!(f, "Branch")?;
            if let Some(value) = value {
                write!(f, " {{ value: {value} }}")?;
            }
            for (nibble, child) in children.iter() {
                writeln!(f)?;
                write!(f, "{}{nibble:x}:", " ".repeat(indent + 2))?;
                writeln!(f)?;
                fmt_ref(f, store, child, indent + 4)?;
            }
            Ok(())
        }
    }
}
