//! The sorted-vector set proper.

use core::{
	fmt,
	iter::FusedIterator,
	mem::{self, ManuallyDrop},
	ptr, slice,
};

use scopeguard::ScopeGuard;
use tap::Pipe;

use crate::{
	compare::{Comparator, NaturalOrder},
	raw_buffer::{capacity_overflow, RawBuffer},
	TryReserveError,
};

/// An ordered set of unique keys in a single contiguous allocation.
///
/// Keys in the live prefix `[0, len)` are kept strictly ascending under the
/// set's [`Comparator`]; the slots `[len, capacity)` are allocated but
/// uninitialised. Lookup is a lower-bound binary search, so two keys are
/// considered equal exactly when neither precedes the other.
///
/// Positions returned by [`insert`](`VecSet::insert`) and accepted by
/// [`remove_at`](`VecSet::remove_at`) are plain indices; the crate-level
/// documentation spells out when they (and element addresses) stay valid
/// across mutations.
///
/// ```rust
/// use vecset::VecSet;
///
/// let mut set = VecSet::new();
/// assert_eq!(set.insert(6), (0, true));
/// assert_eq!(set.insert(2), (0, true));
/// assert_eq!(set.insert(6), (1, false));
/// assert_eq!(set.as_slice(), &[2, 6]);
/// ```
pub struct VecSet<K, C = NaturalOrder> {
	buffer: RawBuffer<K>,
	len: usize,
	comparator: C,
}

impl<K> VecSet<K> {
	/// Creates an empty set ordered by [`Ord`], without allocating.
	#[must_use]
	pub const fn new() -> Self {
		Self::with_comparator(NaturalOrder)
	}

	/// Bulk-loads a set from keys that are **already strictly ascending and
	/// unique** under [`Ord`]. See
	/// [`from_ordered_unique_with`](`VecSet::from_ordered_unique_with`).
	pub fn from_ordered_unique<I>(keys: I) -> Self
	where
		K: Ord,
		I: IntoIterator<Item = K>,
		I::IntoIter: ExactSizeIterator,
	{
		Self::from_ordered_unique_with(keys, NaturalOrder)
	}
}

impl<K, C> VecSet<K, C> {
	/// Creates an empty set with the given comparator, without allocating.
	#[must_use]
	pub const fn with_comparator(comparator: C) -> Self {
		Self {
			buffer: RawBuffer::new(),
			len: 0,
			comparator,
		}
	}

	/// The number of live keys.
	#[must_use]
	pub const fn len(&self) -> usize {
		self.len
	}

	/// Whether the set holds no keys.
	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// The number of keys the set can hold without reallocating.
	#[must_use]
	pub const fn capacity(&self) -> usize {
		self.buffer.cap()
	}

	/// The live keys, ascending.
	#[must_use]
	pub fn as_slice(&self) -> &[K] {
		unsafe { slice::from_raw_parts(self.buffer.ptr(), self.len) }
	}

	/// The live keys, ascending and mutable.
	///
	/// Mutating a key such that the ascending order or uniqueness no longer
	/// holds is a logic error: later lookups misbehave (safely).
	#[must_use]
	pub fn as_mut_slice(&mut self) -> &mut [K] {
		unsafe { slice::from_raw_parts_mut(self.buffer.ptr(), self.len) }
	}

	/// Iterates the keys in ascending order.
	pub fn iter(&self) -> slice::Iter<'_, K> {
		self.as_slice().iter()
	}

	/// Iterates the keys in ascending order, mutably.
	///
	/// The order-preservation obligation of
	/// [`as_mut_slice`](`VecSet::as_mut_slice`) applies.
	pub fn iter_mut(&mut self) -> slice::IterMut<'_, K> {
		self.as_mut_slice().iter_mut()
	}

	/// A reference to the stored comparator.
	#[must_use]
	pub const fn comparator(&self) -> &C {
		&self.comparator
	}

	/// A copy of the stored comparator.
	#[must_use]
	pub fn key_comp(&self) -> C
	where
		C: Clone,
	{
		self.comparator.clone()
	}

	/// Drops all keys. The capacity (and allocation) is retained.
	pub fn clear(&mut self) {
		// Zeroed before dropping, so a panicking key `Drop` cannot lead to a
		// second drop of the same key later.
		let live = self.len;
		self.len = 0;
		unsafe { ptr::drop_in_place(slice::from_raw_parts_mut(self.buffer.ptr(), live)) };
	}

	/// Exchanges the entire contents (buffer, length, comparator) of two
	/// sets in constant time. No key is moved within memory, copied or
	/// dropped.
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(self, other);
	}

	/// Ensures capacity for at least `capacity` keys in total.
	///
	/// This is an **absolute** request, unlike [`Vec::reserve`]'s
	/// "additional" parameter: after `set.reserve(n)`, no insertion
	/// reallocates until the length exceeds `n`. No-op if the current
	/// capacity is already sufficient; the capacity is never reduced.
	///
	/// Aborts the process on allocation failure (see
	/// [`try_reserve`](`VecSet::try_reserve`)). On a reallocation, all
	/// element addresses are invalidated; indices stay valid.
	///
	/// [`Vec::reserve`]: alloc::vec::Vec::reserve
	pub fn reserve(&mut self, capacity: usize) {
		if capacity > self.buffer.cap() {
			self.reallocate(RawBuffer::with_capacity(capacity));
		}
	}

	/// [`reserve`](`VecSet::reserve`), but reporting allocation failure
	/// instead of aborting. The set is untouched when `Err` is returned.
	pub fn try_reserve(&mut self, capacity: usize) -> Result<(), TryReserveError> {
		if capacity > self.buffer.cap() {
			self.reallocate(RawBuffer::try_with_capacity(capacity)?);
		}
		Ok(())
	}

	/// Reduces the capacity to match the length exactly. No-op if they
	/// already match. Reallocates (invalidating all element addresses)
	/// otherwise.
	pub fn shrink_to_fit(&mut self) {
		if self.buffer.cap() > self.len {
			self.reallocate(RawBuffer::with_capacity(self.len));
		}
	}

	/// Moves the live prefix into `new` and adopts it, freeing the old
	/// allocation. `new` must have room for at least `self.len` keys.
	fn reallocate(&mut self, new: RawBuffer<K>) {
		debug_assert!(new.cap() >= self.len);
		unsafe { ptr::copy_nonoverlapping(self.buffer.ptr(), new.ptr(), self.len) };
		self.buffer = new;
	}
}

impl<K, C: Comparator<K>> VecSet<K, C> {
	/// Bulk-loads a set from keys that are **already strictly ascending and
	/// unique** under `comparator`.
	///
	/// Allocates exactly as many slots as the iterator promises and moves
	/// every key in, in linear time; no validation pass is performed in
	/// release builds (debug builds assert the precondition). Feeding keys
	/// that are out of order or duplicated is a logic error: the set stays
	/// memory-safe but lookups misbehave.
	///
	/// If the iterator panics partway, the keys it already yielded are
	/// dropped and the allocation is freed; nothing observable remains.
	pub fn from_ordered_unique_with<I>(keys: I, comparator: C) -> Self
	where
		I: IntoIterator<Item = K>,
		I::IntoIter: ExactSizeIterator,
	{
		let keys = keys.into_iter();
		let (buffer, len) = RawBuffer::with_capacity(keys.len()).pipe(|buffer| fill(buffer, keys));
		let set = Self {
			buffer,
			len,
			comparator,
		};
		debug_assert!(set.is_ordered_and_unique());
		set
	}

	/// The first position whose key does not precede `key`; `len` if all
	/// keys do.
	fn lower_bound(&self, key: &K) -> usize {
		let comparator = &self.comparator;
		self.as_slice()
			.partition_point(|probe| comparator.precedes(probe, key))
	}

	/// The position of the key equivalent to `key`, if present.
	/// Logarithmic; never mutates, never invalidates.
	#[must_use]
	pub fn find(&self, key: &K) -> Option<usize> {
		let at = self.lower_bound(key);
		(at < self.len && self.comparator.equivalent(&self.as_slice()[at], key)).then_some(at)
	}

	/// A reference to the stored key equivalent to `key`, if present.
	#[must_use]
	pub fn get(&self, key: &K) -> Option<&K> {
		self.find(key).map(|at| &self.as_slice()[at])
	}

	/// A mutable reference to the stored key equivalent to `key`, if
	/// present.
	///
	/// The order-preservation obligation of
	/// [`as_mut_slice`](`VecSet::as_mut_slice`) applies.
	#[must_use]
	pub fn get_mut(&mut self, key: &K) -> Option<&mut K> {
		self.find(key).map(|at| &mut self.as_mut_slice()[at])
	}

	/// Whether a key equivalent to `key` is present.
	#[must_use]
	pub fn contains(&self, key: &K) -> bool {
		self.find(key).is_some()
	}

	/// Inserts `key`, keeping the set ordered and unique.
	///
	/// Returns the key's position and whether an insertion happened. If an
	/// equivalent key is already present, nothing is mutated (the offered
	/// `key` is dropped) and the position of the existing key is returned
	/// with `false`.
	///
	/// Lookup is logarithmic; the insertion itself is linear in the number
	/// of keys after the insertion point, or in `len` when the set is full
	/// and must grow (doubling its capacity, `0 → 2` initially). Keys
	/// before the insertion point keep their addresses unless a growth
	/// reallocation happens.
	pub fn insert(&mut self, key: K) -> (usize, bool) {
		let at = self.lower_bound(&key);
		if at < self.len && self.comparator.equivalent(&self.as_slice()[at], &key) {
			return (at, false);
		}

		if self.len == self.buffer.cap() {
			self.grow_with_gap(at, key);
		} else {
			unsafe {
				let slot = self.buffer.ptr().add(at);
				// Bitwise moves cannot panic, so the shifted tail is never
				// observable in a half-moved state.
				ptr::copy(slot, slot.add(1), self.len - at);
				slot.write(key);
			}
			self.len += 1;
		}
		(at, true)
	}

	/// Reallocates at double capacity, interleaving `key` at position `at`
	/// while moving the live keys over.
	fn grow_with_gap(&mut self, at: usize, key: K) {
		let new_cap = match self.buffer.cap() {
			0 => 2,
			cap => cap.checked_mul(2).unwrap_or_else(|| capacity_overflow()),
		};
		let new = RawBuffer::with_capacity(new_cap);
		unsafe {
			ptr::copy_nonoverlapping(self.buffer.ptr(), new.ptr(), at);
			new.ptr().add(at).write(key);
			ptr::copy_nonoverlapping(
				self.buffer.ptr().add(at),
				new.ptr().add(at + 1),
				self.len - at,
			);
		}
		// The old buffer only holds moved-out bits now; dropping it frees
		// the allocation without touching any key.
		self.buffer = new;
		self.len += 1;
	}

	/// Removes and returns the key at position `at`, shifting the tail down
	/// one slot. The capacity is unchanged, and so are the addresses of all
	/// keys before `at`; the old successor (if any) now lives at `at`.
	///
	/// # Panics
	///
	/// Panics if `at >= self.len()`.
	pub fn remove_at(&mut self, at: usize) -> K {
		assert!(
			at < self.len,
			"removal position {at} out of bounds (len {})",
			self.len
		);
		unsafe {
			let slot = self.buffer.ptr().add(at);
			let key = slot.read();
			ptr::copy(slot.add(1), slot, self.len - at - 1);
			self.len -= 1;
			key
		}
	}

	/// Removes and returns the key equivalent to `key`, if present.
	pub fn remove(&mut self, key: &K) -> Option<K> {
		self.find(key).map(|at| self.remove_at(at))
	}

	fn is_ordered_and_unique(&self) -> bool {
		self.as_slice()
			.windows(2)
			.all(|pair| self.comparator.precedes(&pair[0], &pair[1]))
	}
}

/// Moves `keys` into the uninitialised `buffer`, returning both it and the
/// key count. If the iterator panics partway, the keys already moved in are
/// dropped (and the buffer, owned by the guard, is freed by its own drop).
fn fill<K>(buffer: RawBuffer<K>, keys: impl Iterator<Item = K>) -> (RawBuffer<K>, usize) {
	let mut filled = scopeguard::guard((buffer, 0_usize), |(buffer, n)| {
		unsafe { ptr::drop_in_place(slice::from_raw_parts_mut(buffer.ptr(), n)) };
	});
	for key in keys {
		let (buffer, n) = &mut *filled;
		assert!(
			*n < buffer.cap(),
			"iterator yielded more keys than its length promised"
		);
		unsafe { buffer.ptr().add(*n).write(key) };
		*n += 1;
	}
	ScopeGuard::into_inner(filled)
}

impl<K, C> Drop for VecSet<K, C> {
	fn drop(&mut self) {
		// Keys first; the buffer field then frees the allocation, also when
		// a key's `Drop` panicked (the slice drop glue keeps going).
		self.clear();
	}
}

impl<K, C: Default> Default for VecSet<K, C> {
	fn default() -> Self {
		Self::with_comparator(C::default())
	}
}

impl<K: Clone, C: Clone> Clone for VecSet<K, C> {
	/// Clones are exact-fit: the clone's capacity equals the source's
	/// *length*, not its capacity. A panicking key clone drops the cloned
	/// prefix and frees the allocation; no clone is observable.
	fn clone(&self) -> Self {
		let (buffer, len) = fill(RawBuffer::with_capacity(self.len), self.iter().cloned());
		Self {
			buffer,
			len,
			comparator: self.comparator.clone(),
		}
	}

	/// Reuses nothing: the current keys are dropped and the allocation
	/// released *before* the source is copied. A panicking key clone
	/// therefore leaves `self` logically empty but structurally sound,
	/// rather than holding stale keys. (This deliberately weaker-than-swap
	/// guarantee is part of the contract.)
	fn clone_from(&mut self, source: &Self) {
		self.clear();
		self.buffer = RawBuffer::new();
		self.comparator = source.comparator.clone();
		let (buffer, len) = fill(
			RawBuffer::with_capacity(source.len),
			source.iter().cloned(),
		);
		self.buffer = buffer;
		self.len = len;
	}
}

impl<K: fmt::Debug, C> fmt::Debug for VecSet<K, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<K: PartialEq, C> PartialEq for VecSet<K, C> {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}
impl<K: Eq, C> Eq for VecSet<K, C> {}

/// Inserts every key in turn. Input may be unsorted and may contain
/// duplicates (which are dropped); worst case is quadratic, so prefer
/// [`VecSet::from_ordered_unique_with`] for presorted bulk data.
impl<K, C: Comparator<K>> Extend<K> for VecSet<K, C> {
	fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
		for key in keys {
			self.insert(key);
		}
	}
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for VecSet<K, C> {
	fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
		let mut set = Self::with_comparator(C::default());
		set.extend(keys);
		set
	}
}

impl<'a, K, C> IntoIterator for &'a VecSet<K, C> {
	type Item = &'a K;
	type IntoIter = slice::Iter<'a, K>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, K, C> IntoIterator for &'a mut VecSet<K, C> {
	type Item = &'a mut K;
	type IntoIter = slice::IterMut<'a, K>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

impl<K, C> IntoIterator for VecSet<K, C> {
	type Item = K;
	type IntoIter = IntoIter<K>;

	fn into_iter(self) -> IntoIter<K> {
		let mut this = ManuallyDrop::new(self);
		// Disassembled by hand: the buffer moves into the iterator, the
		// comparator is dropped here, and `this` itself must not drop.
		let buffer = unsafe { ptr::read(&this.buffer) };
		unsafe { ptr::drop_in_place(&mut this.comparator) };
		IntoIter {
			buffer,
			at: 0,
			len: this.len,
		}
	}
}

/// An owning iterator over a [`VecSet`]'s keys, ascending.
///
/// Keys not consumed by the time the iterator is dropped are dropped with
/// it, along with the allocation.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<K> {
	buffer: RawBuffer<K>,
	at: usize,
	len: usize,
}

impl<K> Iterator for IntoIter<K> {
	type Item = K;

	fn next(&mut self) -> Option<K> {
		(self.at < self.len).then(|| {
			let key = unsafe { self.buffer.ptr().add(self.at).read() };
			self.at += 1;
			key
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let rest = self.len - self.at;
		(rest, Some(rest))
	}
}

impl<K> DoubleEndedIterator for IntoIter<K> {
	fn next_back(&mut self) -> Option<K> {
		(self.at < self.len).then(|| {
			self.len -= 1;
			unsafe { self.buffer.ptr().add(self.len).read() }
		})
	}
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> FusedIterator for IntoIter<K> {}

impl<K> Drop for IntoIter<K> {
	fn drop(&mut self) {
		unsafe {
			ptr::drop_in_place(slice::from_raw_parts_mut(
				self.buffer.ptr().add(self.at),
				self.len - self.at,
			));
		}
	}
}
