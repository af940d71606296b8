//! Tests for conversions and comparisons between PersistentVector and
//! PersistentList.

use rstest::rstest;
use trie_collections::persistent::{PersistentList, PersistentVector};

#[rstest]
#[case(0)]
#[case(1)]
#[case(32)]
#[case(33)]
#[case(1025)]
fn test_vector_to_list_keeps_order(#[case] count: usize) {
    let vector: PersistentVector<usize> = (0..count).collect();
    let list = vector.to_list();

    assert_eq!(list.len(), count);
    assert!(list.iter().copied().eq(0..count));
    assert_eq!(vector, list);
    assert_eq!(list, vector);
}

#[rstest]
fn test_list_to_vector_keeps_order() {
    let list = PersistentList::of(0..100);
    let vector = list.to_vector();

    assert_eq!(vector.len(), 100);
    assert_eq!(vector.get(99), Some(&99));
    assert_eq!(vector, list);
}

#[rstest]
fn test_from_references() {
    let list = PersistentList::of(["a", "b"]);
    let vector = PersistentVector::from(&list);
    let back = PersistentList::from(&vector);
    assert_eq!(back, list);
}

#[rstest]
fn test_cross_inequality() {
    let vector: PersistentVector<i32> = (0..5).collect();
    assert_ne!(vector, PersistentList::of(0..4));
    assert_ne!(vector, PersistentList::of([0, 1, 2, 3, 9]));
    assert_ne!(PersistentList::of(0..6), vector);
}

#[rstest]
fn test_updating_converted_vector_leaves_list_untouched() {
    let list = PersistentList::of(1..=3);
    let vector = list.to_vector().set(0, 10).append(4);

    assert_eq!(list, PersistentList::of([1, 2, 3]));
    assert_eq!(vector.to_list(), PersistentList::of([10, 2, 3, 4]));
}
