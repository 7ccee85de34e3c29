//! An ordered set of unique keys stored in one contiguous allocation.
//!
//! [`VecSet`] keeps its keys strictly ascending under a pluggable
//! [`Comparator`], so lookup is a binary search and iteration is a plain
//! slice walk. Storage is a single manually managed buffer with a live
//! prefix and an uninitialised reserve, grown geometrically (doubling,
//! bootstrapping `0 → 2`).
//!
//! # Performance Focus
//!
//! This implementation is optimised for read-heavy workloads over small to
//! medium key counts, where cache locality beats the pointer chasing of a
//! node-based set. Insertion and removal are linear in the number of keys
//! *after* the affected position.
//!
//! # Position and address invalidation
//!
//! Positions are plain indices into the live prefix, and element addresses
//! follow a weaker contract than a node-based set would need:
//!
//! - Read-only calls ([`VecSet::find`], iteration, [`VecSet::len`],
//!   [`VecSet::capacity`]) never invalidate anything.
//! - An insertion into spare capacity shifts only the keys at or after the
//!   insertion point; keys before it keep their addresses.
//! - A removal shifts only the keys after the removed position.
//! - [`VecSet::reserve`], [`VecSet::shrink_to_fit`] and a full-capacity
//!   insertion reallocate and thereby invalidate every address (reserve and
//!   shrink only when they actually change the capacity).

#![no_std]
#![doc(html_root_url = "https://docs.rs/vecset/0.1.0")]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::semicolon_if_nothing_returned)]

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
mod readme {}

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod compare;
mod raw_buffer;
mod set;

pub use compare::{Comparator, NaturalOrder, ReverseOrder};
pub use raw_buffer::TryReserveError;
pub use set::{IntoIter, VecSet};
