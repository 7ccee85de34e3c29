//! The allocation engine backing [`VecSet`](`crate::VecSet`).

use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::{fmt, marker::PhantomData, mem, ptr::NonNull};
use tap::Pipe;

/// An exclusively owned allocation of `cap` uninitialised slots of `K`.
///
/// `RawBuffer` manages memory only: it allocates on construction and
/// deallocates on drop, but never constructs or destroys a `K`. Whoever
/// holds the buffer tracks which slots are live and drops them before the
/// buffer goes away. Replacing a set's buffer after moving the live keys
/// out of the old one is therefore safe by construction: the old buffer's
/// drop frees the allocation without touching any key.
///
/// Zero capacity and zero-sized `K` are both represented without an
/// allocation, as a dangling (but well-aligned) pointer.
pub(crate) struct RawBuffer<K> {
	ptr: NonNull<K>,
	cap: usize,
	_marker: PhantomData<K>,
}

// The buffer is an owner, like `Vec`: it aliases nothing.
unsafe impl<K: Send> Send for RawBuffer<K> {}
unsafe impl<K: Sync> Sync for RawBuffer<K> {}

impl<K> RawBuffer<K> {
	/// An empty buffer; no allocation.
	pub(crate) const fn new() -> Self {
		Self {
			ptr: NonNull::dangling(),
			cap: 0,
			_marker: PhantomData,
		}
	}

	/// Allocates room for exactly `cap` slots, aborting the process if the
	/// allocator declines.
	pub(crate) fn with_capacity(cap: usize) -> Self {
		match Self::try_with_capacity(cap) {
			Ok(buffer) => buffer,
			Err(TryReserveError::CapacityOverflow) => capacity_overflow(),
			Err(TryReserveError::AllocError { layout }) => handle_alloc_error(layout),
		}
	}

	/// Allocates room for exactly `cap` slots, reporting failure instead of
	/// aborting.
	pub(crate) fn try_with_capacity(cap: usize) -> Result<Self, TryReserveError> {
		if cap == 0 || mem::size_of::<K>() == 0 {
			// Zero-sized keys never need backing memory; `cap` is still
			// honoured as the slot count.
			return Ok(Self {
				ptr: NonNull::dangling(),
				cap,
				_marker: PhantomData,
			});
		}

		let layout =
			Layout::array::<K>(cap).map_err(|_| TryReserveError::CapacityOverflow)?;
		unsafe { alloc(layout) }
			.cast::<K>()
			.pipe(NonNull::new)
			.ok_or(TryReserveError::AllocError { layout })
			.map(|ptr| Self {
				ptr,
				cap,
				_marker: PhantomData,
			})
	}

	/// The first slot. Dangling (but aligned) when nothing is allocated.
	pub(crate) const fn ptr(&self) -> *mut K {
		self.ptr.as_ptr()
	}

	/// The number of slots.
	pub(crate) const fn cap(&self) -> usize {
		self.cap
	}
}

impl<K> Drop for RawBuffer<K> {
	fn drop(&mut self) {
		if self.cap != 0 && mem::size_of::<K>() != 0 {
			unsafe {
				// The identical layout was computed successfully when this
				// buffer was allocated.
				let layout = Layout::array::<K>(self.cap).unwrap_unchecked();
				dealloc(self.ptr.as_ptr().cast(), layout);
			}
		}
	}
}

/// The error type for [`VecSet::try_reserve`](`crate::VecSet::try_reserve`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TryReserveError {
	/// The requested capacity does not fit in `isize::MAX` bytes.
	CapacityOverflow,
	/// The allocator declined the request.
	AllocError {
		/// The layout of the allocation that was not fulfilled.
		layout: Layout,
	},
}

impl fmt::Display for TryReserveError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CapacityOverflow => {
				write!(f, "requested capacity exceeds `isize::MAX` bytes")
			}
			Self::AllocError { layout } => write!(
				f,
				"allocation of {} bytes (align {}) failed",
				layout.size(),
				layout.align()
			),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for TryReserveError {}

#[cold]
pub(crate) fn capacity_overflow() -> ! {
	panic!("`VecSet` capacity overflows `isize::MAX` bytes")
}
