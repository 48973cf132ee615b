//! Integration tests for the patricia-trie crate.
#![allow(missing_docs)]

#[cfg(test)]
mod differential;
#[cfg(test)]
mod shared_store;
