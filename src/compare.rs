//! Pluggable key ordering.

/// A strict weak order over keys of type `K`.
///
/// [`precedes(a, b)`](`Comparator::precedes`) answers whether `a` sorts
/// strictly before `b`. Two keys neither of which precedes the other are
/// *equivalent*, and equivalence is the only notion of key equality
/// [`VecSet`](`crate::VecSet`) ever consults; [`Eq`] plays no role.
///
/// The comparator is stored by value inside the set and travels with it
/// through clones, moves and swaps.
pub trait Comparator<K: ?Sized> {
	/// Whether `a` sorts strictly before `b`.
	fn precedes(&self, a: &K, b: &K) -> bool;

	/// Whether `a` and `b` occupy the same position in the order.
	#[inline]
	fn equivalent(&self, a: &K, b: &K) -> bool {
		!self.precedes(a, b) && !self.precedes(b, a)
	}
}

/// Orders keys ascending by their [`Ord`] implementation.
///
/// This is the default comparator of [`VecSet`](`crate::VecSet`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
	#[inline]
	fn precedes(&self, a: &K, b: &K) -> bool {
		a < b
	}

	#[inline]
	fn equivalent(&self, a: &K, b: &K) -> bool {
		a == b
	}
}

/// Orders keys descending by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: Ord> Comparator<K> for ReverseOrder {
	#[inline]
	fn precedes(&self, a: &K, b: &K) -> bool {
		a > b
	}

	#[inline]
	fn equivalent(&self, a: &K, b: &K) -> bool {
		a == b
	}
}

/// Any binary predicate works as an ad-hoc comparator, as long as it
/// implements a strict weak order (a non-conforming predicate makes the set
/// misbehave, but safely so).
impl<K: ?Sized, F: Fn(&K, &K) -> bool> Comparator<K> for F {
	#[inline]
	fn precedes(&self, a: &K, b: &K) -> bool {
		self(a, b)
	}
}
