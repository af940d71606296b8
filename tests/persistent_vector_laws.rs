//! Property-based tests for PersistentVector laws.
//!
//! Each property compares the vector against a `Vec` model built from the
//! same elements.

use proptest::prelude::*;
use trie_collections::persistent::PersistentVector;

// =============================================================================
// Strategies
// =============================================================================

/// Element lists long enough to cross the first growth threshold.
fn elements_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..200)
}

fn build_by_append(elements: &[i32]) -> PersistentVector<i32> {
    elements
        .iter()
        .fold(PersistentVector::new(), |vector, &element| {
            vector.append(element)
        })
}

proptest! {
    // =========================================================================
    // Append Laws
    // =========================================================================

    #[test]
    fn prop_append_increments_len_and_stores_at_end(
        elements in elements_strategy(),
        element: i32
    ) {
        let vector = build_by_append(&elements);
        let extended = vector.append(element);

        prop_assert_eq!(extended.len(), vector.len() + 1);
        prop_assert_eq!(extended.get(vector.len()), Some(&element));
    }

    #[test]
    fn prop_append_preserves_prior_reads(
        elements in elements_strategy(),
        element: i32
    ) {
        let vector = build_by_append(&elements);
        let extended = vector.append(element);

        for index in 0..vector.len() {
            prop_assert_eq!(extended.get(index), vector.get(index));
        }
    }

    #[test]
    fn prop_round_trip_reproduces_sequence(elements in elements_strategy()) {
        let vector = build_by_append(&elements);
        let read_back: Vec<i32> = (0..elements.len())
            .filter_map(|index| vector.get(index).copied())
            .collect();
        prop_assert_eq!(read_back, elements);
    }

    #[test]
    fn prop_collect_equals_append(elements in elements_strategy()) {
        let collected: PersistentVector<i32> = elements.iter().copied().collect();
        prop_assert_eq!(collected, build_by_append(&elements));
    }

    // =========================================================================
    // Set Laws
    // =========================================================================

    #[test]
    fn prop_set_then_get(
        elements in prop::collection::vec(any::<i32>(), 1..200),
        seed: usize,
        value: i32
    ) {
        let vector = build_by_append(&elements);
        let index = seed % elements.len();
        let updated = vector.set(index, value);

        prop_assert_eq!(updated.get(index), Some(&value));
        prop_assert_eq!(updated.len(), vector.len());
    }

    #[test]
    fn prop_set_leaves_other_indices_and_original(
        elements in prop::collection::vec(any::<i32>(), 1..200),
        seed: usize,
        value: i32
    ) {
        let vector = build_by_append(&elements);
        let index = seed % elements.len();
        let updated = vector.set(index, value);

        for other in 0..elements.len() {
            if other != index {
                prop_assert_eq!(updated.get(other), Some(&elements[other]));
            }
            prop_assert_eq!(vector.get(other), Some(&elements[other]));
        }
    }

    #[test]
    fn prop_set_out_of_range_is_identity(
        elements in elements_strategy(),
        overshoot in 0_i64..1000,
        value: i32
    ) {
        let vector = build_by_append(&elements);
        let past_end = i64::try_from(elements.len()).unwrap_or(i64::MAX) + overshoot;
        let negative = -1 - overshoot;

        prop_assert_eq!(vector.set(past_end, value), vector.clone());
        prop_assert_eq!(vector.set(negative, value), vector);
    }

    #[test]
    fn prop_get_out_of_range_is_none(
        elements in elements_strategy(),
        overshoot in 0_i64..1000
    ) {
        let vector = build_by_append(&elements);
        let past_end = i64::try_from(elements.len()).unwrap_or(i64::MAX) + overshoot;

        prop_assert_eq!(vector.get(past_end), None);
        prop_assert_eq!(vector.get(-1 - overshoot), None);
    }

    // =========================================================================
    // Pop and Iteration
    // =========================================================================

    #[test]
    fn prop_pop_inverts_append(elements in elements_strategy(), element: i32) {
        let vector = build_by_append(&elements);
        prop_assert_eq!(vector.append(element).pop(), vector);
    }

    #[test]
    fn prop_pop_matches_vec_model(elements in elements_strategy(), pops in 0_usize..250) {
        let mut vector = build_by_append(&elements);
        let mut model = elements;
        for _ in 0..pops {
            vector = vector.pop();
            model.pop();
        }
        prop_assert_eq!(vector.len(), model.len());
        prop_assert_eq!(vector.iter().copied().collect::<Vec<_>>(), model);
    }

    #[test]
    fn prop_iter_matches_get(elements in elements_strategy()) {
        let vector: PersistentVector<i32> = elements.iter().copied().collect();
        let iterated: Vec<&i32> = vector.iter().collect();
        let indexed: Vec<&i32> = (0..vector.len()).filter_map(|index| vector.get(index)).collect();
        prop_assert_eq!(iterated, indexed);
    }
}
