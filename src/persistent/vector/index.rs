//! Index decomposition for the 32-way trie.
//!
//! A linear index is split into 5-bit digits, one per trie level. The digit
//! for a level is `(index >> shift) & MASK`, where `shift` starts at the
//! vector's shift and drops by [`BITS_PER_LEVEL`] at each level down to 0.
//! All arithmetic is on `usize`, so the right shift is always logical.

use static_assertions::const_assert_eq;

// =============================================================================
// Constants
// =============================================================================

/// Bits consumed per level in the trie.
pub(crate) const BITS_PER_LEVEL: usize = 5;

/// Branching factor (2^5 = 32).
pub(crate) const BRANCHING_FACTOR: usize = 1 << BITS_PER_LEVEL;

/// Bit mask for extracting the slot within a node.
pub(crate) const MASK: usize = BRANCHING_FACTOR - 1;

/// Maximum number of trie levels addressable by a `usize` index.
pub(crate) const MAX_DEPTH: usize = (usize::BITS as usize).div_ceil(BITS_PER_LEVEL);

const_assert_eq!(BRANCHING_FACTOR, 32);
const_assert_eq!(MASK, 0b11111);

// =============================================================================
// Digit Extraction
// =============================================================================

/// Returns the slot selected by `index` at the level whose shift is `shift`.
#[inline]
pub(crate) const fn digit(index: usize, shift: usize) -> usize {
    (index >> shift) & MASK
}

/// Returns the digits of `index` from `shift` down to the leaf level.
///
/// The first item selects a child of the root, the last one selects the leaf
/// slot.
#[inline]
pub(crate) const fn path(index: usize, shift: usize) -> IndexPath {
    IndexPath {
        index,
        shift,
        exhausted: false,
    }
}

/// Iterator over the per-level digits of an index, top-down.
#[derive(Clone, Debug)]
pub(crate) struct IndexPath {
    index: usize,
    shift: usize,
    exhausted: bool,
}

impl Iterator for IndexPath {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let slot = digit(self.index, self.shift);
        if self.shift == 0 {
            self.exhausted = true;
        } else {
            self.shift -= BITS_PER_LEVEL;
        }
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.exhausted {
            0
        } else {
            self.shift / BITS_PER_LEVEL + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IndexPath {}

// =============================================================================
// Capacity
// =============================================================================

/// Number of elements a trie rooted at `shift` holds when completely full.
///
/// This is `32^(shift / 5 + 1)`. Returns `None` when the value does not fit
/// in a `usize`, i.e. at the deepest level a `usize` index can reach.
#[inline]
pub(crate) const fn capacity(shift: usize) -> Option<usize> {
    let bits = shift + BITS_PER_LEVEL;
    if bits >= usize::BITS as usize {
        None
    } else {
        Some(1 << bits)
    }
}

/// Returns `true` when a trie with `length` elements at `shift` has no free
/// slot left, so the next append must add a level above the root.
#[inline]
pub(crate) const fn is_full(length: usize, shift: usize) -> bool {
    match capacity(shift) {
        Some(capacity) => length == capacity,
        None => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
