//! Nibble path: the 4-bit digit sequence a byte key is traversed by.
use crate::error::{Result, TrieError};
use core::fmt;
use core::ops::{Bound, RangeBounds};
use smallvec::SmallVec;

/// Hex-prefix flag nibbles.
const ODD_FLAG: u8 = 0x1;
const LEAF_FLAG: u8 = 0x2;

/// Immutable sequence of nibbles, one nibble per byte.
///
/// 64 nibbles (a 32-byte key) fit without a heap allocation.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NibblePath(SmallVec<[u8; 64]>);

impl NibblePath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Splits every byte into its high nibble followed by its low nibble.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut nibbles = SmallVec::with_capacity(bytes.len() * 2);
        for byte in bytes {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0f);
        }
        Self(nibbles)
    }

    /// Builds a path from raw nibble values.
    ///
    /// Fails with [`TrieError::InvalidNibble`] if a value does not fit in four bits.
    pub fn from_nibbles(nibbles: &[u8]) -> Result<Self> {
        if let Some(bad) = nibbles.iter().find(|nibble| **nibble > 0x0f) {
            return Err(TrieError::InvalidNibble(*bad));
        }
        Ok(Self(SmallVec::from_slice(nibbles)))
    }

    /// Number of nibbles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path holds no nibbles.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nibble at `index`, or [`TrieError::IllegalAccess`] when out of bounds.
    pub fn get(&self, index: usize) -> Result<u8> {
        self.0.get(index).copied().ok_or(TrieError::IllegalAccess { index, len: self.len() })
    }

    /// Nibble at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn at(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// The first `n` nibbles.
    pub fn prefix(&self, n: usize) -> Result<Self> {
        self.check_len(n)?;
        Ok(self.slice(..n))
    }

    /// The last `n` nibbles.
    pub fn suffix(&self, n: usize) -> Result<Self> {
        self.check_len(n)?;
        Ok(self.slice(self.len() - n..))
    }

    /// The path without its first `n` nibbles.
    pub fn drop_first(&self, n: usize) -> Result<Self> {
        self.check_len(n)?;
        Ok(self.slice(n..))
    }

    /// The path without its last `n` nibbles.
    pub fn drop_last(&self, n: usize) -> Result<Self> {
        self.check_len(n)?;
        Ok(self.slice(..self.len() - n))
    }

    /// Sub-path over `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
        let start = match range.start_bound() {
            Bound::Included(start) => *start,
            Bound::Excluded(start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(end) => end + 1,
            Bound::Excluded(end) => *end,
            Bound::Unbounded => self.len(),
        };
        Self(SmallVec::from_slice(&self.0[start..end]))
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let mut nibbles = SmallVec::with_capacity(self.len() + other.len());
        nibbles.extend_from_slice(&self.0);
        nibbles.extend_from_slice(&other.0);
        Self(nibbles)
    }

    /// The nibbles as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Appends a single nibble.
    pub fn push(&mut self, nibble: u8) {
        debug_assert!(nibble < 16);
        self.0.push(nibble);
    }

    /// Length of the longest common prefix of two paths.
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        self.0.iter().zip(other.0.iter()).take_while(|(a, b)| a == b).count()
    }

    /// Whether `prefix` is a prefix of `self`.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Iterator over the nibbles.
    pub fn iter(&self) -> core::slice::Iter<'_, u8> {
        self.0.iter()
    }

    /// Hex-prefix (compact) encoding.
    ///
    /// The first nibble carries the flags: bit 1 is set for leaves, bit 0 for odd lengths.
    /// Even-length paths get a zero padding nibble after the flag.
    pub fn encode_hex_prefix(&self, is_leaf: bool) -> Vec<u8> {
        let odd = self.len() % 2 == 1;
        let mut flag = if is_leaf { LEAF_FLAG } else { 0 };
        let mut out = Vec::with_capacity(self.len() / 2 + 1);
        let rest = if odd {
            flag |= ODD_FLAG;
            out.push((flag << 4) | self.0[0]);
            &self.0[1..]
        } else {
            out.push(flag << 4);
            &self.0[..]
        };
        out.extend(rest.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]));
        out
    }

    /// Decodes a hex-prefix encoding into the path and its leaf flag.
    pub fn decode_hex_prefix(encoded: &[u8]) -> Result<(Self, bool)> {
        let Some((&first, rest)) = encoded.split_first() else {
            return Err(TrieError::IllegalAccess { index: 0, len: 0 });
        };
        let flag = first >> 4;
        if flag > (LEAF_FLAG | ODD_FLAG) {
            return Err(TrieError::InvalidHexPrefix(first));
        }
        let odd = flag & ODD_FLAG != 0;
        let mut nibbles = SmallVec::with_capacity(rest.len() * 2 + 1);
        if odd {
            nibbles.push(first & 0x0f);
        } else if first & 0x0f != 0 {
            return Err(TrieError::InvalidHexPrefix(first));
        }
        for byte in rest {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0f);
        }
        Ok((Self(nibbles), flag & LEAF_FLAG != 0))
    }

    /// Packs the nibbles back into bytes. An odd trailing nibble lands in the high half of
    /// the last byte.
    pub fn pack(&self) -> Vec<u8> {
        self.0
            .chunks(2)
            .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or_default())
            .collect()
    }

    #[inline]
    fn check_len(&self, n: usize) -> Result<()> {
        if n > self.0.len() {
            return Err(TrieError::IllegalAccess { index: n, len: self.0.len() });
        }
        Ok(())
    }
}

impl fmt::Debug for NibblePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NibblePath(0x")?;
        for nibble in &self.0 {
            write!(f, "{nibble:x}")?;
        }
        write!(f, ")")
    }
}

impl<'a> IntoIterator for &'a NibblePath {
    type Item = &'a u8;
    type IntoIter = core::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
