//! Persistent (immutable) data structures.
//!
//! This module provides immutable sequences that use structural sharing to
//! minimize copying:
//!
//! - [`PersistentVector`]: Persistent vector (32-way branching trie)
//! - [`PersistentList`]: Persistent singly-linked list
//!
//! # Structural Sharing
//!
//! Every operation that "changes" a collection returns a new version and
//! leaves the receiver untouched. The new version reuses every node the
//! operation did not need to copy.
//!
//! # Examples
//!
//! ## `PersistentVector`
//!
//! ```rust
//! use trie_collections::persistent::PersistentVector;
//!
//! let vector: PersistentVector<i32> = (0..100).collect();
//! assert_eq!(vector.get(50), Some(&50));
//!
//! // Structural sharing: the original vector is preserved
//! let updated = vector.set(50, 999);
//! assert_eq!(vector.get(50), Some(&50));     // Original unchanged
//! assert_eq!(updated.get(50), Some(&999));   // New version
//! ```
//!
//! ## `PersistentList`
//!
//! ```rust
//! use trie_collections::persistent::PersistentList;
//!
//! let list = PersistentList::new().prepend(3).prepend(2).prepend(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! let extended = list.prepend(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list
//! ```
//!
//! ## Between the two
//!
//! ```rust
//! use trie_collections::persistent::{PersistentList, PersistentVector};
//!
//! let list = PersistentList::of(["x", "y"]);
//! let vector = PersistentVector::from(&list);
//! assert_eq!(vector, list);
//! assert_eq!(vector.to_list(), list);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled (default), this is `std::sync::Arc`,
/// so collections can be shared between threads.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`, which is
/// faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod list;
mod vector;

pub use list::PersistentList;
pub use list::PersistentListIntoIterator;
pub use list::PersistentListIterator;
pub use vector::PersistentVector;
pub use vector::PersistentVectorIntoIterator;
pub use vector::PersistentVectorIterator;

// =============================================================================
// Tests
// =============================================================================
