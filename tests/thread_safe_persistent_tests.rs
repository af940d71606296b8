//! Integration tests for sharing persistent collections between threads.
//!
//! These tests need the `arc` feature, which makes the collections
//! `Send + Sync`.

#![cfg(feature = "arc")]

use rstest::rstest;
use std::sync::Arc;
use std::thread;
use trie_collections::persistent::{PersistentList, PersistentVector};

// =============================================================================
// PersistentVector Integration Tests
// =============================================================================

#[rstest]
fn test_vector_cross_thread_structural_sharing() {
    let original: Arc<PersistentVector<usize>> = Arc::new((0..1000).collect());

    let handles: Vec<_> = (0..4)
        .map(|thread_index| {
            let vector = Arc::clone(&original);
            thread::spawn(move || {
                let updated = vector.set(thread_index, 10_000 + thread_index).append(thread_index);
                assert_eq!(updated.get(thread_index), Some(&(10_000 + thread_index)));
                assert_eq!(updated.len(), 1001);
                assert_eq!(vector.get(thread_index), Some(&thread_index));
                updated
            })
        })
        .collect();

    let results: Vec<PersistentVector<usize>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    for (thread_index, vector) in results.iter().enumerate() {
        assert_eq!(vector.get(thread_index), Some(&(10_000 + thread_index)));
        assert_eq!(vector.last(), Some(&thread_index));
    }
    assert_eq!(original.len(), 1000);
    assert!(original.iter().copied().eq(0..1000));
}

#[rstest]
fn test_vector_moved_into_thread() {
    let vector: PersistentVector<String> = (0..50).map(|index| index.to_string()).collect();
    let handle = thread::spawn(move || vector.iter().map(String::len).sum::<usize>());
    assert_eq!(handle.join().expect("Thread panicked"), 10 + 40 * 2);
}

#[rstest]
fn test_vector_shared_by_reference_in_scope() {
    let vector: PersistentVector<u64> = (0..10_000).collect();
    let (left, right) = thread::scope(|scope| {
        let left = scope.spawn(|| vector.iter().take(5000).sum::<u64>());
        let right = scope.spawn(|| vector.iter().skip(5000).sum::<u64>());
        (
            left.join().expect("Thread panicked"),
            right.join().expect("Thread panicked"),
        )
    });
    assert_eq!(left + right, (0..10_000).sum::<u64>());
}

// =============================================================================
// PersistentList Integration Tests
// =============================================================================

#[rstest]
fn test_list_cross_thread_structural_sharing() {
    let original = Arc::new(PersistentList::new().prepend(3).prepend(2).prepend(1));

    let handles: Vec<_> = (0..4)
        .map(|thread_index| {
            let list = Arc::clone(&original);
            thread::spawn(move || {
                let extended = list.prepend(thread_index * 10);
                assert_eq!(extended.head(), Some(&(thread_index * 10)));
                assert_eq!(extended.len(), 4);
                assert_eq!(list.len(), 3);
                extended
            })
        })
        .collect();

    for handle in handles {
        let extended = handle.join().expect("Thread panicked");
        assert_eq!(extended.tail(), *original);
    }
    assert_eq!(original.head(), Some(&1));
}
