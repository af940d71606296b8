//! Trie nodes.
//!
//! A node is either a [`Node::Leaf`] holding up to 32 elements, or a
//! [`Node::Branch`] holding up to 32 optional children. Nodes reachable from
//! a published vector are never mutated: an update shallow-clones the node
//! (children are shared by reference count) and changes one slot of the copy.

use arrayvec::ArrayVec;

use super::index::BRANCHING_FACTOR;
use crate::persistent::ReferenceCounter;

/// Child slots of a branch node. `None` means no child has been written there.
pub(crate) type Children<T> = [Option<ReferenceCounter<Node<T>>>; BRANCHING_FACTOR];

/// Element slots of a leaf node. Only the populated prefix holds values.
pub(crate) type Values<T> = ArrayVec<T, BRANCHING_FACTOR>;

/// Internal node structure for the trie.
#[derive(Clone)]
pub(crate) enum Node<T> {
    /// Leaf node containing elements
    Leaf(Values<T>),
    /// Branch node containing child nodes
    Branch(Children<T>),
}

impl<T> Node<T> {
    /// Creates a leaf with no populated slots.
    #[inline]
    pub(crate) const fn empty_leaf() -> Self {
        Self::Leaf(ArrayVec::new_const())
    }

    /// Creates a branch with every slot absent.
    #[inline]
    pub(crate) fn empty_branch() -> Self {
        Self::Branch(std::array::from_fn(|_| None))
    }

    /// Creates the empty node that belongs at a level with the given shift.
    #[inline]
    pub(crate) fn empty_at(shift: usize) -> Self {
        if shift == 0 {
            Self::empty_leaf()
        } else {
            Self::empty_branch()
        }
    }

    /// Creates a branch whose first slot is `root`, one level above it.
    pub(crate) fn wrapping(root: ReferenceCounter<Self>) -> Self {
        let mut children: Children<T> = std::array::from_fn(|_| None);
        children[0] = Some(root);
        Self::Branch(children)
    }

    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the element in `slot` of a leaf.
    ///
    /// `None` for a branch or an unpopulated slot.
    #[inline]
    pub(crate) fn value(&self, slot: usize) -> Option<&T> {
        match self {
            Self::Leaf(values) => values.get(slot),
            Self::Branch(_) => None,
        }
    }

    /// Returns the child in `slot` of a branch.
    ///
    /// `None` for a leaf or an absent slot.
    #[inline]
    pub(crate) fn child(&self, slot: usize) -> Option<&ReferenceCounter<Self>> {
        match self {
            Self::Branch(children) => children.get(slot).and_then(Option::as_ref),
            Self::Leaf(_) => None,
        }
    }

    /// Returns `true` when no slot is populated.
    pub(crate) fn is_vacant(&self) -> bool {
        match self {
            Self::Leaf(values) => values.is_empty(),
            Self::Branch(children) => children.iter().all(Option::is_none),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_empty_leaf_is_vacant_leaf() {
        let node: Node<i32> = Node::empty_leaf();
        assert!(node.is_leaf());
        assert!(node.is_vacant());
        assert_eq!(node.value(0), None);
    }

    #[rstest]
    fn test_empty_branch_has_no_children() {
        let node: Node<i32> = Node::empty_branch();
        assert!(!node.is_leaf());
        assert!(node.is_vacant());
        assert!((0..BRANCHING_FACTOR).all(|slot| node.child(slot).is_none()));
    }

    #[rstest]
    #[case(0, true)]
    #[case(5, false)]
    #[case(10, false)]
    fn test_empty_at(#[case] shift: usize, #[case] expected_leaf: bool) {
        let node: Node<i32> = Node::empty_at(shift);
        assert_eq!(node.is_leaf(), expected_leaf);
        assert!(node.is_vacant());
    }

    #[rstest]
    fn test_wrapping_shares_root_in_first_slot() {
        let mut values = Values::new();
        values.push(1);
        let root = ReferenceCounter::new(Node::Leaf(values));
        let wrapped = Node::wrapping(root.clone());

        let first = wrapped.child(0).expect("slot 0 must be populated");
        assert!(ReferenceCounter::ptr_eq(first, &root));
        assert!((1..BRANCHING_FACTOR).all(|slot| wrapped.child(slot).is_none()));
    }

    #[rstest]
    fn test_absent_child_differs_from_empty_child() {
        let mut children: Children<i32> = std::array::from_fn(|_| None);
        children[1] = Some(ReferenceCounter::new(Node::empty_leaf()));
        let branch = Node::Branch(children);

        assert!(branch.child(0).is_none());
        assert!(branch.child(1).is_some());
        assert!(!branch.is_vacant());
    }

    #[rstest]
    fn test_shallow_clone_shares_children() {
        let child = ReferenceCounter::new(Node::<i32>::empty_leaf());
        let branch = Node::wrapping(child.clone());
        let copy = branch.clone();

        let original_child = branch.child(0).expect("populated");
        let copied_child = copy.child(0).expect("populated");
        assert!(ReferenceCounter::ptr_eq(original_child, copied_child));
        assert!(ReferenceCounter::ptr_eq(copied_child, &child));
    }

    #[rstest]
    fn test_leaf_accessors_on_branch_return_none() {
        let node: Node<i32> = Node::empty_branch();
        assert_eq!(node.value(0), None);
        let leaf: Node<i32> = Node::empty_leaf();
        assert!(leaf.child(0).is_none());
    }
}
