//! Iterators over [`PersistentVector`].
//!
//! Both iterators walk the trie depth-first with an explicit stack, so each
//! node is visited once and a full pass costs O(N) rather than O(N log32 N).
//! The stack never grows past the trie depth, which is bounded by
//! [`MAX_DEPTH`].

use arrayvec::ArrayVec;
#[cfg(feature = "rayon")]
use rayon::iter::IntoParallelIterator;

use super::PersistentVector;
use super::index::{BRANCHING_FACTOR, MAX_DEPTH};
use super::node::{Children, Node};
use crate::persistent::ReferenceCounter;

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// A stack entry for tree traversal.
///
/// Holds a branch's children and the next slot to visit.
struct TraversalStackEntry<'a, T> {
    children: &'a Children<T>,
    child_index: usize,
}

/// An iterator over references to elements of a [`PersistentVector`].
///
/// Created by [`PersistentVector::iter`]. Every call to `iter` builds a new
/// iterator starting at index 0.
pub struct PersistentVectorIterator<'a, T> {
    /// Branches on the path to the current leaf
    traversal_stack: ArrayVec<TraversalStackEntry<'a, T>, MAX_DEPTH>,
    /// Elements of the current leaf
    current_leaf: &'a [T],
    /// Position within the current leaf
    leaf_index: usize,
    /// Elements not yet returned (for `ExactSizeIterator`)
    remaining: usize,
}

impl<'a, T> PersistentVectorIterator<'a, T> {
    pub(super) fn new(vector: &'a PersistentVector<T>) -> Self {
        let mut iterator = Self {
            traversal_stack: ArrayVec::new(),
            current_leaf: &[],
            leaf_index: 0,
            remaining: vector.len(),
        };

        match vector.root.as_ref() {
            Node::Leaf(values) => iterator.current_leaf = values.as_slice(),
            Node::Branch(children) => {
                iterator.traversal_stack.push(TraversalStackEntry {
                    children,
                    child_index: 0,
                });
                iterator.descend_to_next_leaf();
            }
        }
        iterator
    }

    /// Moves to the next leaf in index order.
    ///
    /// Backtracks through the stack until a branch with an unvisited child
    /// is found, then descends to the leftmost leaf below it. Leaves
    /// `current_leaf` empty once the trie is exhausted.
    fn descend_to_next_leaf(&mut self) {
        while let Some(entry) = self.traversal_stack.last_mut() {
            let children: &'a Children<T> = entry.children;
            let mut found: Option<&'a Node<T>> = None;

            while entry.child_index < BRANCHING_FACTOR {
                let index = entry.child_index;
                entry.child_index += 1;
                if let Some(child) = &children[index] {
                    found = Some(child.as_ref());
                    break;
                }
            }

            match found {
                Some(Node::Leaf(values)) => {
                    self.current_leaf = values.as_slice();
                    self.leaf_index = 0;
                    return;
                }
                Some(Node::Branch(children)) => {
                    self.traversal_stack.push(TraversalStackEntry {
                        children,
                        child_index: 0,
                    });
                }
                None => {
                    self.traversal_stack.pop();
                }
            }
        }

        self.current_leaf = &[];
        self.leaf_index = 0;
    }
}

impl<'a, T> Iterator for PersistentVectorIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.current_leaf.get(self.leaf_index) {
                self.leaf_index += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(element);
            }
            if self.traversal_stack.is_empty() {
                return None;
            }
            self.descend_to_next_leaf();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentVectorIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> std::iter::FusedIterator for PersistentVectorIterator<'_, T> {}

// =============================================================================
// Owning Iterator
// =============================================================================

/// A stack entry for the owning iterator; holds the branch by reference count.
struct IntoIteratorStackEntry<T> {
    node: ReferenceCounter<Node<T>>,
    child_index: usize,
}

/// An owning iterator over elements of a [`PersistentVector`].
///
/// Nodes may still be shared with other vectors, so elements are cloned out
/// of the leaves as they are returned.
pub struct PersistentVectorIntoIterator<T> {
    traversal_stack: ArrayVec<IntoIteratorStackEntry<T>, MAX_DEPTH>,
    current_leaf: Option<ReferenceCounter<Node<T>>>,
    leaf_index: usize,
    remaining: usize,
}

impl<T: Clone> PersistentVectorIntoIterator<T> {
    pub(super) fn new(vector: PersistentVector<T>) -> Self {
        let PersistentVector { length, root, .. } = vector;

        let mut iterator = Self {
            traversal_stack: ArrayVec::new(),
            current_leaf: None,
            leaf_index: 0,
            remaining: length,
        };

        if root.is_leaf() {
            iterator.current_leaf = Some(root);
        } else {
            iterator.traversal_stack.push(IntoIteratorStackEntry {
                node: root,
                child_index: 0,
            });
            iterator.descend_to_next_leaf();
        }
        iterator
    }

    /// Moves to the next leaf in index order, see
    /// [`PersistentVectorIterator`] for the traversal.
    fn descend_to_next_leaf(&mut self) {
        while let Some(entry) = self.traversal_stack.last_mut() {
            let mut found: Option<ReferenceCounter<Node<T>>> = None;

            while entry.child_index < BRANCHING_FACTOR {
                let index = entry.child_index;
                entry.child_index += 1;
                if let Some(child) = entry.node.child(index) {
                    found = Some(child.clone());
                    break;
                }
            }

            match found {
                Some(node) if node.is_leaf() => {
                    self.current_leaf = Some(node);
                    self.leaf_index = 0;
                    return;
                }
                Some(node) => {
                    self.traversal_stack.push(IntoIteratorStackEntry {
                        node,
                        child_index: 0,
                    });
                }
                None => {
                    self.traversal_stack.pop();
                }
            }
        }

        self.current_leaf = None;
        self.leaf_index = 0;
    }
}

impl<T: Clone> Iterator for PersistentVectorIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let element = self
                .current_leaf
                .as_deref()
                .and_then(|leaf| leaf.value(self.leaf_index))
                .cloned();
            if let Some(element) = element {
                self.leaf_index += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(element);
            }
            if self.traversal_stack.is_empty() {
                self.current_leaf = None;
                return None;
            }
            self.descend_to_next_leaf();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentVectorIntoIterator<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T: Clone> std::iter::FusedIterator for PersistentVectorIntoIterator<T> {}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<'a, T: Sync + 'a> IntoParallelIterator for &'a PersistentVector<T> {
    type Iter = rayon::vec::IntoIter<&'a T>;
    type Item = &'a T;

    fn into_par_iter(self) -> Self::Iter {
        let elements: Vec<&'a T> = self.iter().collect();
        elements.into_par_iter()
    }
}

#[cfg(feature = "rayon")]
impl<T: Clone + Send> IntoParallelIterator for PersistentVector<T> {
    type Iter = rayon::vec::IntoIter<T>;
    type Item = T;

    fn into_par_iter(self) -> Self::Iter {
        let elements: Vec<T> = self.into_iter().collect();
        elements.into_par_iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
