//! Persistent (immutable) vector based on a 32-way branching trie.
//!
//! This module provides [`PersistentVector`], an immutable indexed sequence
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! Every element lives in a leaf of a trie whose nodes have 32 slots. An
//! index is decomposed into 5-bit digits, one per level, and the digits
//! select the path from the root to the element. It provides:
//!
//! - O(log32 N) random access (`get`)
//! - O(log32 N) update (`set`)
//! - O(log32 N) append and `pop`
//! - O(1) `len` and `is_empty`
//!
//! All operations return new vectors without modifying the original. Only
//! the nodes on the path to the touched index are copied; every other
//! subtree is shared with the previous version.
//!
//! # Internal Structure
//!
//! The vector is a handle of three fields:
//! - `root`: the root node, a leaf while the vector holds at most 32 elements
//! - `shift`: the bit offset of the root level, `5 * (depth - 1)`
//! - `length`: the number of elements
//!
//! When the trie is full at its current depth (32, 1024, 32768, ...
//! elements) the next append adds a new root whose first child is the old
//! root, so the old nodes are reused untouched.
//!
//! # Examples
//!
//! ```rust
//! use trie_collections::persistent::PersistentVector;
//!
//! let vector = PersistentVector::new()
//!     .append(1)
//!     .append(2)
//!     .append(3);
//!
//! assert_eq!(vector.get(0), Some(&1));
//! assert_eq!(vector.get(2), Some(&3));
//! assert_eq!(vector.get(-1), None);
//!
//! // Structural sharing: the original vector is preserved
//! let updated = vector.set(1, 20);
//! assert_eq!(vector.get(1), Some(&2));   // Original unchanged
//! assert_eq!(updated.get(1), Some(&20)); // New version
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use super::ReferenceCounter;
use super::list::PersistentList;

mod index;
mod iter;
mod node;

use index::{BITS_PER_LEVEL, BRANCHING_FACTOR, capacity, digit, is_full, path};
use node::{Children, Node, Values};

pub use iter::{PersistentVectorIntoIterator, PersistentVectorIterator};

// =============================================================================
// PersistentVector Definition
// =============================================================================

/// A persistent (immutable) vector based on a 32-way branching trie.
///
/// `PersistentVector` never changes once built. `set`, `append` and `pop`
/// return a new version that shares every untouched subtree with the
/// receiver.
///
/// # Time Complexity
///
/// | Operation  | Complexity                      |
/// |------------|---------------------------------|
/// | `new`      | O(1)                            |
/// | `get`      | O(log32 N)                      |
/// | `set`      | O(log32 N)                      |
/// | `append`   | O(log32 N)                      |
/// | `pop`      | O(log32 N)                      |
/// | `len`      | O(1)                            |
/// | `iter`     | O(1) to create, O(N) to iterate |
///
/// # Examples
///
/// ```rust
/// use trie_collections::persistent::PersistentVector;
///
/// let vector: PersistentVector<i32> = (0..100).collect();
/// assert_eq!(vector.len(), 100);
/// assert_eq!(vector.get(50), Some(&50));
/// ```
#[derive(Clone)]
pub struct PersistentVector<T> {
    /// Total number of elements
    length: usize,
    /// Shift amount for index calculation: (depth - 1) * `BITS_PER_LEVEL`
    shift: usize,
    /// Root node of the trie
    root: ReferenceCounter<Node<T>>,
}

impl<T> PersistentVector<T> {
    /// Creates a new empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = PersistentVector::new();
    /// assert!(vector.is_empty());
    /// assert_eq!(vector.get(0), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            length: 0,
            shift: 0,
            root: ReferenceCounter::new(Node::empty_leaf()),
        }
    }

    /// Creates a new empty vector. Same as [`PersistentVector::new`].
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::new()
    }

    /// Creates a vector containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::singleton(42);
    /// assert_eq!(vector.len(), 1);
    /// assert_eq!(vector.get(0), Some(&42));
    /// ```
    #[must_use]
    pub fn singleton(element: T) -> Self {
        let mut values = Values::new();
        values.push(element);
        Self {
            length: 1,
            shift: 0,
            root: ReferenceCounter::new(Node::Leaf(values)),
        }
    }

    /// Returns the number of elements in the vector.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the vector contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let empty: PersistentVector<i32> = PersistentVector::new();
    /// assert!(empty.is_empty());
    /// assert!(!empty.append(1).is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Converts any integer index into a position within bounds.
    ///
    /// Negative indices and indices `>= len()` yield `None`.
    #[inline]
    fn position<I: TryInto<usize>>(&self, index: I) -> Option<usize> {
        index
            .try_into()
            .ok()
            .filter(|&position| position < self.length)
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Any integer type is accepted. Returns `None` if the index is negative
    /// or not less than `len()`; this never panics.
    ///
    /// # Arguments
    ///
    /// * `index` - The zero-based index of the element
    ///
    /// # Complexity
    ///
    /// O(log32 N), no allocation
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.get(0), Some(&1));
    /// assert_eq!(vector.get(4_usize), Some(&5));
    /// assert_eq!(vector.get(10), None);
    /// assert_eq!(vector.get(-1_i64), None);
    /// ```
    #[must_use]
    pub fn get<I: TryInto<usize>>(&self, index: I) -> Option<&T> {
        let index = self.position(index)?;
        let mut node = self.root.as_ref();

        for slot in path(index, self.shift) {
            if node.is_leaf() {
                return node.value(slot);
            }
            node = node.child(slot)?.as_ref();
        }
        None
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0_usize)
    }

    /// Returns a reference to the last element, or `None` if empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// assert_eq!(vector.last(), Some(&5));
    /// ```
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.length
            .checked_sub(1)
            .and_then(|position| self.get(position))
    }

    /// Returns an iterator over references to the elements.
    ///
    /// Each call starts a fresh traversal; iterators never share a cursor.
    /// The traversal visits every node once, so a full pass is O(N).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let collected: Vec<&i32> = vector.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4, &5]);
    ///
    /// // Restartable: a second traversal sees the same elements
    /// assert_eq!(vector.iter().count(), 5);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentVectorIterator<'_, T> {
        PersistentVectorIterator::new(self)
    }

    /// Builds a vector bottom-up from owned elements.
    ///
    /// Leaves are filled left to right and grouped 32 at a time into
    /// branches until a single root remains, which yields the same shape
    /// as appending the elements one by one.
    fn build_from_vec(elements: Vec<T>) -> Self {
        let length = elements.len();
        if length == 0 {
            return Self::new();
        }

        let mut level: Vec<ReferenceCounter<Node<T>>> =
            Vec::with_capacity(length.div_ceil(BRANCHING_FACTOR));
        let mut values = Values::new();
        for element in elements {
            values.push(element);
            if values.is_full() {
                level.push(ReferenceCounter::new(Node::Leaf(std::mem::take(&mut values))));
            }
        }
        if !values.is_empty() {
            level.push(ReferenceCounter::new(Node::Leaf(values)));
        }

        let mut shift = 0;
        while level.len() > 1 {
            shift += BITS_PER_LEVEL;
            let mut parents = Vec::with_capacity(level.len().div_ceil(BRANCHING_FACTOR));
            let mut nodes = level.into_iter().peekable();
            while nodes.peek().is_some() {
                let mut children: Children<T> = std::array::from_fn(|_| None);
                for (slot, node) in children.iter_mut().zip(nodes.by_ref()) {
                    *slot = Some(node);
                }
                parents.push(ReferenceCounter::new(Node::Branch(children)));
            }
            level = parents;
        }

        match level.pop() {
            Some(root) => Self {
                length,
                shift,
                root,
            },
            None => Self::new(),
        }
    }
}

impl<T: Clone> PersistentVector<T> {
    /// Returns a new vector with the element at `index` replaced.
    ///
    /// Any integer type is accepted. If the index is negative or not less
    /// than `len()`, the receiver is returned unchanged, so `set` is total.
    ///
    /// Only the nodes on the path from the root to `index` are copied; all
    /// other subtrees are shared with the receiver.
    ///
    /// # Arguments
    ///
    /// * `index` - The zero-based index to update
    /// * `element` - The new element value
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let updated = vector.set(2, 100);
    ///
    /// assert_eq!(updated.get(2), Some(&100));
    /// assert_eq!(vector.get(2), Some(&3)); // Original unchanged
    ///
    /// // Out of range: no-op
    /// assert_eq!(vector.set(5, 0), vector);
    /// assert_eq!(vector.set(-1, 0), vector);
    /// ```
    #[must_use]
    pub fn set<I: TryInto<usize>>(&self, index: I, element: T) -> Self {
        let Some(index) = self.position(index) else {
            return self.clone();
        };

        let root = Self::assign(self.root.as_ref().clone(), self.shift, index, element);

        Self {
            length: self.length,
            shift: self.shift,
            root: ReferenceCounter::new(root),
        }
    }

    /// Writes `element` at `index` below a freshly cloned `node`.
    fn assign(mut node: Node<T>, shift: usize, index: usize, element: T) -> Node<T> {
        let slot = digit(index, shift);

        match &mut node {
            Node::Leaf(values) => {
                if let Some(value) = values.get_mut(slot) {
                    *value = element;
                }
            }
            Node::Branch(children) => {
                let updated = children[slot].as_deref().map(|child| {
                    Self::assign(child.clone(), shift - BITS_PER_LEVEL, index, element)
                });
                if let Some(updated) = updated {
                    children[slot] = Some(ReferenceCounter::new(updated));
                }
            }
        }
        node
    }

    /// Appends an element to the back of the vector.
    ///
    /// Returns a new vector with `len() + 1` elements and `element` at the
    /// old length. If the trie is full at its current depth, a new root is
    /// allocated whose first child is the existing root.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::new().append(1).append(2);
    /// let extended = vector.append(3);
    ///
    /// assert_eq!(vector.len(), 2);
    /// assert_eq!(extended.len(), 3);
    /// assert_eq!(extended.get(2), Some(&3));
    /// ```
    #[must_use]
    pub fn append(&self, element: T) -> Self {
        let (base, shift) = if is_full(self.length, self.shift) {
            (
                Node::wrapping(self.root.clone()),
                self.shift + BITS_PER_LEVEL,
            )
        } else {
            (self.root.as_ref().clone(), self.shift)
        };

        let root = Self::push_into(base, shift, self.length, element);

        Self {
            length: self.length + 1,
            shift,
            root: ReferenceCounter::new(root),
        }
    }

    /// Writes `element` at `index`, materializing absent nodes on the way.
    fn push_into(mut node: Node<T>, shift: usize, index: usize, element: T) -> Node<T> {
        let slot = digit(index, shift);

        match &mut node {
            Node::Leaf(values) => {
                // Leaves fill in order, so `slot` is either the next free slot
                // or (never in practice) an occupied one.
                if let Some(value) = values.get_mut(slot) {
                    *value = element;
                } else {
                    values.push(element);
                }
            }
            Node::Branch(children) => {
                let child_shift = shift - BITS_PER_LEVEL;
                let child = children[slot]
                    .as_deref()
                    .map_or_else(|| Node::empty_at(child_shift), Node::clone);
                children[slot] = Some(ReferenceCounter::new(Self::push_into(
                    child,
                    child_shift,
                    index,
                    element,
                )));
            }
        }
        node
    }

    /// Appends every element of `elements` in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let extended = vector.append_all(4..=6);
    ///
    /// assert_eq!(extended.len(), 6);
    /// assert_eq!(vector.len(), 3);
    /// ```
    #[must_use]
    pub fn append_all<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        elements
            .into_iter()
            .fold(self.clone(), |vector, element| vector.append(element))
    }

    /// Returns a new vector without its last element.
    ///
    /// The mirror of [`append`](Self::append): the path to the last index is
    /// copied, emptied nodes are dropped, and when the length falls back to
    /// the previous full-depth threshold the root is unwrapped to its first
    /// child. An empty vector is returned unchanged.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let shorter = vector.pop();
    ///
    /// assert_eq!(shorter.len(), 4);
    /// assert_eq!(shorter.last(), Some(&4));
    /// assert_eq!(vector.len(), 5); // Original unchanged
    ///
    /// let empty: PersistentVector<i32> = PersistentVector::new();
    /// assert!(empty.pop().is_empty());
    /// ```
    #[must_use]
    pub fn pop(&self) -> Self {
        match self.length {
            0 => self.clone(),
            1 => Self::new(),
            length => {
                let last = length - 1;

                // Dropping back to a full subtree: that subtree is the first
                // child of the root and holds exactly the remaining elements.
                if self.shift > 0
                    && capacity(self.shift - BITS_PER_LEVEL) == Some(last)
                    && let Some(first) = self.root.child(0)
                {
                    return Self {
                        length: last,
                        shift: self.shift - BITS_PER_LEVEL,
                        root: first.clone(),
                    };
                }

                let root = Self::remove_last(self.root.as_ref().clone(), self.shift, last);

                Self {
                    length: last,
                    shift: self.shift,
                    root: ReferenceCounter::new(root),
                }
            }
        }
    }

    /// Removes the element at `index` (the last one) below a cloned `node`.
    fn remove_last(mut node: Node<T>, shift: usize, index: usize) -> Node<T> {
        let slot = digit(index, shift);

        match &mut node {
            Node::Leaf(values) => {
                values.pop();
            }
            Node::Branch(children) => {
                let shrunk = children[slot].as_deref().map(|child| {
                    Self::remove_last(child.clone(), shift - BITS_PER_LEVEL, index)
                });
                if let Some(shrunk) = shrunk {
                    children[slot] = if shrunk.is_vacant() {
                        None
                    } else {
                        Some(ReferenceCounter::new(shrunk))
                    };
                }
            }
        }
        node
    }

    /// Converts this vector into a [`PersistentList`] with the same elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::{PersistentList, PersistentVector};
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let list = vector.to_list();
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(vector, list);
    /// ```
    #[must_use]
    pub fn to_list(&self) -> PersistentList<T> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// Compile-time Checks
// =============================================================================

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentVector<i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentVector<String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentVector<i32>: Send, Sync);

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentVector<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build_from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone> IntoIterator for PersistentVector<T> {
    type Item = T;
    type IntoIter = PersistentVectorIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentVectorIntoIterator::new(self)
    }
}

impl<'a, T> IntoIterator for &'a PersistentVector<T> {
    type Item = &'a T;
    type IntoIter = PersistentVectorIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentVector<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        if ReferenceCounter::ptr_eq(&self.root, &other.root) {
            return true;
        }
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentVector<T> {}

impl<T: PartialEq> PartialEq<PersistentList<T>> for PersistentVector<T> {
    fn eq(&self, other: &PersistentList<T>) -> bool {
        self.length == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Clone> From<&PersistentList<T>> for PersistentVector<T> {
    fn from(list: &PersistentList<T>) -> Self {
        list.iter().cloned().collect()
    }
}

/// Hashes the length first, then each element in order, so that equal
/// vectors hash equally regardless of how they were built.
impl<T: Hash> Hash for PersistentVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentVector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentVectorVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentVectorVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentVector<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(PersistentVector::build_from_vec(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentVector<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentVectorVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
