//! Behavioral tests for [`VecSet`]: ordering, growth, invalidation and the
//! whole-container operations.

use rstest::rstest;
use vecset::{Comparator, NaturalOrder, ReverseOrder, TryReserveError, VecSet};

/// The reference workload from the removal/insertion scenarios: nine keys,
/// exact-fit, with a gap at 6.
fn gapped() -> VecSet<i32> {
	VecSet::from_ordered_unique([1, 2, 3, 4, 5, 7, 8, 9, 10])
}

#[rstest]
fn new_set_is_empty_and_unallocated() {
	let set = VecSet::<i32>::new();
	assert_eq!(set.len(), 0);
	assert_eq!(set.capacity(), 0);
	assert!(set.is_empty());
	assert_eq!(set.iter().next(), None);
	assert!(set.key_comp().precedes(&1, &2));
}

#[rstest]
fn comparator_only_construction() {
	let set = VecSet::<i32, _>::with_comparator(ReverseOrder);
	assert_eq!(set.len(), 0);
	assert_eq!(set.capacity(), 0);
	assert!(set.comparator().precedes(&2, &1));
}

#[rstest]
fn closure_comparators_work() {
	let mut evens_first = VecSet::with_comparator(|a: &i32, b: &i32| (a % 2, a) < (b % 2, b));
	for key in [5, 4, 1, 2, 3] {
		evens_first.insert(key);
	}
	assert_eq!(evens_first.as_slice(), &[2, 4, 1, 3, 5]);
}

#[rstest]
fn reverse_order_sorts_descending() {
	let mut set = VecSet::with_comparator(ReverseOrder);
	for key in [1, 3, 2] {
		set.insert(key);
	}
	assert_eq!(set.as_slice(), &[3, 2, 1]);
}

#[rstest]
fn bulk_load_is_exact_fit() {
	let set = VecSet::from_ordered_unique([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
	assert_eq!(set.len(), 10);
	assert_eq!(set.capacity(), 10);
	assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
}

#[rstest]
fn bulk_load_with_descending_comparator() {
	let set = VecSet::from_ordered_unique_with([10, 9, 8, 7, 6], ReverseOrder);
	assert_eq!(set.len(), 5);
	assert_eq!(set.capacity(), 5);
	assert_eq!(set.find(&8), Some(2));
}

#[rstest]
fn insert_into_empty_bootstraps_capacity_two() {
	let mut set = VecSet::new();
	assert_eq!(set.insert(6), (0, true));
	assert_eq!(set.len(), 1);
	assert_eq!(set.capacity(), 2);
}

#[rstest]
#[case(0, 0)]
#[case(6, 5)]
#[case(11, 9)]
fn insert_into_full_set_doubles_capacity(#[case] key: i32, #[case] at: usize) {
	let mut set = gapped();
	assert_eq!(set.insert(key), (at, true));
	assert_eq!(set.len(), 10);
	assert_eq!(set.capacity(), 18);
	assert!(set.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
	assert_eq!(set.as_slice()[at], key);
}

#[rstest]
#[case(0, 0)]
#[case(6, 5)]
#[case(11, 9)]
fn insert_with_spare_capacity_does_not_reallocate(#[case] key: i32, #[case] at: usize) {
	let mut set = gapped();
	set.reserve(20);
	let before = set.as_slice().as_ptr();

	assert_eq!(set.insert(key), (at, true));
	assert_eq!(set.len(), 10);
	assert_eq!(set.capacity(), 20);
	// The relaxed contract: no reallocation, and keys before the insertion
	// point kept their addresses.
	assert_eq!(set.as_slice().as_ptr(), before);
	assert_eq!(set.as_slice()[at], key);
}

#[rstest]
fn duplicate_insert_mutates_nothing() {
	let mut set = gapped();
	assert_eq!(set.insert(5), (4, false));
	assert_eq!(set.len(), 9);
	assert_eq!(set.capacity(), 9);
	assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5, 7, 8, 9, 10]);
}

#[rstest]
fn growth_doubles_from_two() {
	let mut set = VecSet::new();
	for key in 0..40 {
		set.insert(key);
		let len = set.len();
		let expected = if len <= 2 { 2 } else { len.next_power_of_two() };
		assert_eq!(set.capacity(), expected, "after {len} insertions");
	}
}

#[rstest]
fn removal_shifts_the_tail_down() {
	let mut set = gapped();
	assert_eq!(set.remove_at(3), 4);
	assert_eq!(set.len(), 8);
	assert_eq!(set.capacity(), 9);
	// The old successor now occupies the removed position.
	assert_eq!(set.as_slice()[3], 5);
	assert_eq!(set.as_slice(), &[1, 2, 3, 5, 7, 8, 9, 10]);
}

#[rstest]
fn removal_of_the_last_key() {
	let mut set = gapped();
	assert_eq!(set.remove_at(8), 10);
	assert_eq!(set.len(), 8);
	assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5, 7, 8, 9]);
}

#[rstest]
#[should_panic(expected = "out of bounds")]
fn removal_out_of_bounds_panics() {
	let mut set = gapped();
	set.remove_at(9);
}

#[rstest]
fn remove_by_key() {
	let mut set = gapped();
	assert_eq!(set.remove(&5), Some(5));
	assert_eq!(set.remove(&6), None);
	assert_eq!(set.as_slice(), &[1, 2, 3, 4, 7, 8, 9, 10]);
}

#[rstest]
fn find_get_contains() {
	let set = gapped();
	assert_eq!(set.find(&7), Some(5));
	assert_eq!(set.find(&6), None);
	assert_eq!(set.get(&3), Some(&3));
	assert_eq!(set.get(&6), None);
	assert!(set.contains(&10));
	assert!(!set.contains(&0));
	assert_eq!(VecSet::<i32>::new().find(&1), None);
}

#[rstest]
fn get_mut_edits_in_place() {
	let mut set = VecSet::from_ordered_unique([1, 2, 30]);
	*set.get_mut(&2).unwrap() = 20;
	assert_eq!(set.get_mut(&2), None);
	assert_eq!(set.as_slice(), &[1, 20, 30]);
}

#[rstest]
fn insert_find_remove_round_trip() {
	let mut set = VecSet::new();
	set.insert(42);
	let at = set.find(&42).unwrap();
	assert_eq!(set.remove_at(at), 42);
	assert_eq!(set.find(&42), None);
}

#[rstest]
fn reserve_is_absolute_and_never_shrinks() {
	let mut set = gapped();
	set.reserve(20);
	assert_eq!(set.capacity(), 20);
	set.reserve(5);
	assert_eq!(set.capacity(), 20);
	assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5, 7, 8, 9, 10]);
}

#[rstest]
fn try_reserve_reports_overflow() {
	let mut set = VecSet::<u64>::new();
	assert_eq!(
		set.try_reserve(usize::MAX),
		Err(TryReserveError::CapacityOverflow)
	);
	// Strong guarantee: the set is untouched.
	assert_eq!(set.capacity(), 0);
	assert_eq!(set.try_reserve(8), Ok(()));
	assert_eq!(set.capacity(), 8);
}

#[rstest]
fn shrink_to_fit_reaches_exact_fit() {
	let mut set = VecSet::from_ordered_unique([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
	set.reserve(20);
	assert_eq!(set.capacity(), 20);
	set.shrink_to_fit();
	assert_eq!(set.capacity(), 10);
	assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
	// Already exact-fit: no-op.
	set.shrink_to_fit();
	assert_eq!(set.capacity(), 10);
}

#[rstest]
fn clear_retains_the_allocation() {
	let mut set = gapped();
	set.clear();
	assert_eq!(set.len(), 0);
	assert_eq!(set.capacity(), 9);
	set.insert(1);
	assert_eq!(set.as_slice(), &[1]);
}

#[rstest]
fn swap_exchanges_everything_in_place() {
	let mut a = VecSet::from_ordered_unique([1, 2, 3, 4, 5]);
	let mut b = VecSet::from_ordered_unique([6, 7, 8, 9, 10]);
	let (a_ptr, b_ptr) = (a.as_slice().as_ptr(), b.as_slice().as_ptr());

	a.swap(&mut b);

	assert_eq!(a.as_slice(), &[6, 7, 8, 9, 10]);
	assert_eq!(b.as_slice(), &[1, 2, 3, 4, 5]);
	// No key moved: the buffers themselves changed hands.
	assert_eq!(a.as_slice().as_ptr(), b_ptr);
	assert_eq!(b.as_slice().as_ptr(), a_ptr);
}

#[rstest]
fn clones_are_exact_fit() {
	let mut set = gapped();
	set.reserve(20);
	let clone = set.clone();
	assert_eq!(clone.len(), 9);
	assert_eq!(clone.capacity(), 9);
	assert_eq!(clone, set);

	let mut target = VecSet::from_ordered_unique([100, 200]);
	target.clone_from(&set);
	assert_eq!(target.len(), 9);
	assert_eq!(target.capacity(), 9);
	assert_eq!(target, set);
}

#[rstest]
fn equality_is_by_key_sequence() {
	let a = VecSet::from_ordered_unique([1, 2, 3]);
	let mut b = VecSet::new();
	for key in [3, 1, 2] {
		b.insert(key);
	}
	assert_eq!(a, b);
	b.insert(4);
	assert_ne!(a, b);
}

#[rstest]
fn debug_formats_as_a_set() {
	let set = VecSet::from_ordered_unique([1, 2]);
	assert_eq!(format!("{set:?}"), "{1, 2}");
}

#[rstest]
fn collecting_sorts_and_dedups() {
	let set: VecSet<i32> = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3].into_iter().collect();
	assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5, 6, 9]);

	let mut set = set;
	set.extend([0, 4, 7]);
	assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 9]);
}

#[rstest]
fn owning_iteration_is_ordered_both_ways() {
	let set = VecSet::from_ordered_unique([1, 2, 3, 4, 5]);
	assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

	let set = VecSet::from_ordered_unique([1, 2, 3, 4, 5]);
	assert_eq!(
		set.into_iter().rev().collect::<Vec<_>>(),
		vec![5, 4, 3, 2, 1]
	);
}

#[rstest]
fn borrowing_iteration() {
	let mut set = VecSet::from_ordered_unique([1, 2, 3]);
	assert_eq!((&set).into_iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
	for key in &mut set {
		*key *= 10;
	}
	assert_eq!(set.as_slice(), &[10, 20, 30]);
}

#[rstest]
fn zero_sized_keys_deduplicate_without_allocating() {
	let mut set = VecSet::new();
	assert_eq!(set.insert(()), (0, true));
	assert_eq!(set.insert(()), (0, false));
	assert_eq!(set.len(), 1);
	assert_eq!(set.capacity(), 2);
	assert_eq!(set.remove_at(0), ());
	assert!(set.is_empty());
}

#[rstest]
fn key_comp_is_a_detached_copy() {
	let set = VecSet::from_ordered_unique_with([3, 2, 1], ReverseOrder);
	let comparator = set.key_comp();
	drop(set);
	assert!(comparator.precedes(&2, &1));
	assert!(comparator.equivalent(&1, &1));
}

#[rstest]
fn default_is_the_canonical_empty_state() {
	let set = VecSet::<i32, NaturalOrder>::default();
	assert_eq!(set.len(), 0);
	assert_eq!(set.capacity(), 0);
}
