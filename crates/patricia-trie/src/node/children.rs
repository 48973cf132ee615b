//! 16-slot child array of a branch node.
//! A bit flag per slot tracks occupancy so counting and single-child checks are cheap.
use super::NodeRef;

/// Child references of a branch, indexed by nibble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchChildren {
    children: Box<[Option<NodeRef>; 16]>,
    flags: u16,
}

impl BranchChildren {
    /// An array with every slot empty.
    pub fn new() -> Self {
        Self { children: Box::new([const { None }; 16]), flags: 0 }
    }

    /// Reference stored at `nibble`.
    #[inline]
    pub fn get(&self, nibble: u8) -> Option<&NodeRef> {
        self.children[nibble as usize].as_ref()
    }

    /// Stores `child` at `nibble`, replacing any previous occupant.
    #[inline]
    pub fn set(&mut self, nibble: u8, child: NodeRef) {
        self.children[nibble as usize] = Some(child);
        self.flags |= 1 << nibble;
    }

    /// Empties the slot at `nibble` and returns what it held.
    #[inline]
    pub fn remove(&mut self, nibble: u8) -> Option<NodeRef> {
        self.flags &= !(1 << nibble);
        self.children[nibble as usize].take()
    }

    /// Number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.flags.count_ones() as usize
    }

    /// Whether every slot is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.flags == 0
    }

    /// The only occupied slot, if exactly one is.
    pub fn single(&self) -> Option<(u8, &NodeRef)> {
        if self.flags.count_ones() != 1 {
            return None;
        }
        let nibble = self.flags.trailing_zeros() as u8;
        self.get(nibble).map(|child| (nibble, child))
    }

    /// Iterates over the occupied slots in nibble order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &NodeRef)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(nibble, child)| child.as_ref().map(|child| (nibble as u8, child)))
    }

    /// All 16 slots, occupied or not.
    pub(crate) fn slots(&self) -> &[Option<NodeRef>; 16] {
        &self.children
    }
}
