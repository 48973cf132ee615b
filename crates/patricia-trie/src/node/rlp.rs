//! RLP encoding and decoding of trie nodes.
use super::{BranchChildren, INLINE_THRESHOLD, Node, NodeRef};
use crate::error::{Result, TrieError};
use crate::nibbles::NibblePath;
use alloy_primitives::{B256, Bytes};
use alloy_rlp::{EMPTY_LIST_CODE, EMPTY_STRING_CODE, Encodable, Header, PayloadView};

impl Node {
    /// Canonical encoding: an RLP list of two (leaf, extension) or seventeen (branch) items.
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Leaf { path, value } => {
                let path = path.encode_hex_prefix(true);
                let mut out =
                    encode_list_header(path.as_slice().length() + value[..].length());
                path.as_slice().encode(&mut out);
                value[..].encode(&mut out);
                out.into()
            }
            Self::Extension { path, child } => {
                let path = path.encode_hex_prefix(false);
                let mut out = encode_list_header(path.as_slice().length() + ref_length(child));
                path.as_slice().encode(&mut out);
                encode_ref(child, &mut out);
                out.into()
            }
            Self::Branch { children, value } => {
                let slots = children.slots();
                let payload_length = slots
                    .iter()
                    .map(|slot| slot.as_ref().map_or(1, ref_length))
                    .sum::<usize>()
                    + value.as_ref().map_or(1, |value| value[..].length());
                let mut out = encode_list_header(payload_length);
                for slot in slots {
                    match slot {
                        Some(child) => encode_ref(child, &mut out),
                        None => out.push(EMPTY_STRING_CODE),
                    }
                }
                match value {
                    Some(value) => value[..].encode(&mut out),
                    None => out.push(EMPTY_STRING_CODE),
                }
                out.into()
            }
        }
    }

    /// Parses a node encoding. The whole input must be consumed.
    pub fn decode(mut encoded: &[u8]) -> Result<Self> {
        let buf = &mut encoded;
        let PayloadView::List(items) = Header::decode_raw(buf)? else {
            return Err(TrieError::InvalidNode("node is not an RLP list"));
        };
        if !buf.is_empty() {
            return Err(alloy_rlp::Error::UnexpectedLength.into());
        }

        match items.as_slice() {
            [path, second] => {
                let (path, is_leaf) = NibblePath::decode_hex_prefix(decode_string(path)?)?;
                if is_leaf {
                    return Ok(Self::Leaf {
                        path,
                        value: Bytes::copy_from_slice(decode_string(second)?),
                    });
                }
                if path.is_empty() {
                    return Err(TrieError::InvalidNode("extension with an empty path"));
                }
                let child =
                    decode_ref(second)?.ok_or(TrieError::InvalidNode("extension without a child"))?;
                Ok(Self::Extension { path, child })
            }
            [slots @ .., value] if slots.len() == 16 => {
                let mut children = BranchChildren::new();
                for (nibble, slot) in slots.iter().enumerate() {
                    if let Some(child) = decode_ref(slot)? {
                        children.set(nibble as u8, child);
                    }
                }
                let value = decode_string(value)?;
                Ok(Self::Branch {
                    children,
                    value: (!value.is_empty()).then(|| Bytes::copy_from_slice(value)),
                })
            }
            _ => Err(TrieError::InvalidNode("node list must have 2 or 17 items")),
        }
    }
}

#[inline]
fn decode_string<'a>(mut item: &'a [u8]) -> Result<&'a [u8]> {
    Ok(Header::decode_bytes(&mut item, false)?)
}

/// Decodes a child slot: an embedded list, a 32-byte hash, or the empty string.
fn decode_ref(item: &[u8]) -> Result<Option<NodeRef>> {
    if item.first().is_some_and(|first| *first >= EMPTY_LIST_CODE) {
        if item.len() >= INLINE_THRESHOLD {
            return Err(TrieError::InvalidNode("embedded node longer than a hash"));
        }
        return Ok(Some(NodeRef::Inline(Bytes::copy_from_slice(item))));
    }
    match decode_string(item)? {
        [] => Ok(None),
        hash if hash.len() == 32 => Ok(Some(NodeRef::Hash(B256::from_slice(hash)))),
        _ => Err(TrieError::InvalidNode("child reference is neither embedded nor a hash")),
    }
}

#[inline]
fn ref_length(child: &NodeRef) -> usize {
    match child {
        NodeRef::Inline(encoded) => encoded.len(),
        NodeRef::Hash(_) => 1 + 32,
    }
}

#[inline]
fn encode_ref(child: &NodeRef, out: &mut Vec<u8>) {
    match child {
        NodeRef::Inline(encoded) => out.extend_from_slice(encoded),
        NodeRef::Hash(hash) => hash.as_slice().encode(out),
    }
}

// Encodes list header for known payload length. Reserves memory.
#[inline]
fn encode_list_header(payload_length: usize) -> Vec<u8> {
    let header = Header { list: true, payload_length };
    let mut out = Vec::with_capacity(header.length() + payload_length);
    header.encode(&mut out);
    out
}
