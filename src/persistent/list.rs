//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], an immutable cons-list that
//! shares its suffixes between versions.
//!
//! # Overview
//!
//! - O(1) `prepend`, `head` and `tail`
//! - O(n) `take`, `drop_first` and equality
//! - forward-only iteration
//!
//! # Examples
//!
//! ```rust
//! use trie_collections::persistent::PersistentList;
//!
//! let list = PersistentList::of([1, 2, 3]);
//! assert_eq!(list.head(), Some(&1));
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.prepend(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//! assert_eq!(extended.tail(), list);
//! ```
//!
//! # Structural Sharing
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.prepend(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use super::ReferenceCounter;
use super::vector::PersistentVector;

/// Elements buffered on the stack while building a list back to front.
const INLINE_BUFFER: usize = 8;

/// Internal node structure for the persistent list.
struct Node<T> {
    element: T,
    next: Option<ReferenceCounter<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// # Time Complexity
///
/// | Operation    | Complexity |
/// |--------------|------------|
/// | `new`        | O(1)       |
/// | `prepend`    | O(1)       |
/// | `head`       | O(1)       |
/// | `tail`       | O(1)       |
/// | `len`        | O(1)       |
/// | `take`       | O(n)       |
/// | `drop_first` | O(n)       |
/// | `eq`         | O(n)       |
///
/// # Examples
///
/// ```rust
/// use trie_collections::persistent::PersistentList;
///
/// let list = PersistentList::singleton(42);
/// assert_eq!(list.head(), Some(&42));
/// ```
pub struct PersistentList<T> {
    head: Option<ReferenceCounter<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = PersistentList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.head(), None);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a new empty list. Same as [`PersistentList::new`].
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self::new()
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().prepend(element)
    }

    /// Creates a list holding `values` in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentList;
    ///
    /// let list = PersistentList::of(vec!["a", "b"]);
    /// let collected: Vec<&&str> = list.iter().collect();
    /// assert_eq!(collected, vec![&"a", &"b"]);
    /// ```
    #[must_use]
    pub fn of<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut buffer: SmallVec<[T; INLINE_BUFFER]> = values.into_iter().collect();
        let length = buffer.len();

        let mut head: Option<ReferenceCounter<Node<T>>> = None;
        while let Some(element) = buffer.pop() {
            head = Some(ReferenceCounter::new(Node {
                element,
                next: head,
            }));
        }

        Self { head, length }
    }

    /// Prepends an element to the front of the list.
    ///
    /// The new list shares every node of the receiver.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().prepend(3).prepend(2).prepend(1);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn prepend(&self, element: T) -> Self {
        Self {
            head: Some(ReferenceCounter::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element, or `None` if the list is
    /// empty.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the list without its first element.
    ///
    /// The tail of an empty list is the empty list. The result shares its
    /// nodes with the receiver.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentList;
    ///
    /// let list = PersistentList::of([1, 2, 3]);
    /// assert_eq!(list.tail().head(), Some(&2));
    ///
    /// let empty: PersistentList<i32> = PersistentList::new();
    /// assert!(empty.tail().is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over references to the elements, front to back.
    ///
    /// Each call starts from the head again.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_ref(),
            remaining: self.length,
        }
    }

    /// Returns the list with the first `count` elements removed.
    ///
    /// If `count` exceeds the length the result is empty. The result is a
    /// suffix of the receiver and shares all of its nodes.
    ///
    /// # Complexity
    ///
    /// O(min(n, count))
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentList;
    ///
    /// let list = PersistentList::of(1..=5);
    /// assert_eq!(list.drop_first(2), PersistentList::of([3, 4, 5]));
    /// assert!(list.drop_first(10).is_empty());
    /// ```
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let mut current = self.head.as_ref();
        let mut length = self.length;
        for _ in 0..count {
            match current {
                Some(node) => {
                    current = node.next.as_ref();
                    length -= 1;
                }
                None => break,
            }
        }
        Self {
            head: current.cloned(),
            length,
        }
    }
}

impl<T: Clone> PersistentList<T> {
    /// Returns a new list containing the first `count` elements.
    ///
    /// If `count` exceeds the length, the whole list is copied.
    ///
    /// # Complexity
    ///
    /// O(min(n, count))
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentList;
    ///
    /// let list = PersistentList::of(1..=5);
    /// assert_eq!(list.take(3), PersistentList::of([1, 2, 3]));
    /// assert_eq!(list.take(10), list);
    /// assert!(list.take(0).is_empty());
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        if count >= self.length {
            return self.clone();
        }
        Self::of(self.iter().take(count).cloned())
    }

    /// Converts this list into a [`PersistentVector`] with the same elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trie_collections::persistent::PersistentList;
    ///
    /// let list = PersistentList::of([1, 2, 3]);
    /// let vector = list.to_vector();
    /// assert_eq!(vector.get(2), Some(&3));
    /// assert_eq!(list, vector);
    /// ```
    #[must_use]
    pub fn to_vector(&self) -> PersistentVector<T> {
        self.iter().cloned().collect()
    }
}

/// Unlinks uniquely owned nodes one at a time so that dropping a long list
/// does not recurse once per node.
impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match ReferenceCounter::try_unwrap(node) {
                Ok(mut node) => current = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentList<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentList<i32>: Send, Sync);

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a ReferenceCounter<Node<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            self.remaining = self.remaining.saturating_sub(1);
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentListIterator<'_, T> {}

/// An owning iterator over elements of a [`PersistentList`].
///
/// Nodes may be shared with other lists, so elements are cloned.
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.list.head()?.clone();
        self.list = self.list.tail();
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: PartialEq> PartialEq<PersistentVector<T>> for PersistentList<T> {
    fn eq(&self, other: &PersistentVector<T>) -> bool {
        self.length == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Clone> From<&PersistentVector<T>> for PersistentList<T> {
    fn from(vector: &PersistentVector<T>) -> Self {
        vector.to_list()
    }
}

/// Hashes the length first, then each element in order.
impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
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
impl<T: serde::Serialize> serde::Serialize for PersistentList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentList<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::of(elements))
    }
}

// =============================================================================
// Tests
// =============================================================================
