//! # trie-collections
//!
//! Persistent (immutable) sequences with structural sharing.
//!
//! ## Overview
//!
//! - [`persistent::PersistentVector`]: an indexed sequence stored in a
//!   32-way branching trie, with `get`, `set`, `append` and `pop` in
//!   O(log32 N)
//! - [`persistent::PersistentList`]: a singly-linked cons list with O(1)
//!   `prepend`, `head` and `tail`
//!
//! Updates never mutate a published value. They return a new version that
//! shares every untouched node with the old one, so old versions stay valid
//! and cheap to keep.
//!
//! ## Feature Flags
//!
//! - `arc` (default): share nodes through `Arc`, making the collections
//!   `Send + Sync`; without it nodes use `Rc`
//! - `serde`: `Serialize`/`Deserialize` as plain sequences
//! - `rayon`: `IntoParallelIterator` for the vector (implies `arc`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use trie_collections::prelude::*;
//!
//! let vector = PersistentVector::new().append("a").append("b");
//! let updated = vector.set(0, "z");
//!
//! assert_eq!(vector.get(0), Some(&"a"));
//! assert_eq!(updated.get(0), Some(&"z"));
//! assert_eq!(updated.get(2), None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the collection types.
///
/// # Usage
///
/// ```rust
/// use trie_collections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
