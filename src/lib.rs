#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod control;
mod probe;

/// Byte-wise matching over 16-slot control groups.
///
/// This module exposes the comparison primitive the table probes with. It
/// is public so callers can check the active backend against the portable
/// one.
pub mod group;

/// A flat hash map built on the SwissTable `HashTable`.
///
/// This module provides a `FlatHashMap` that wraps the `HashTable` and
/// provides a standard key-value map interface with configurable hashers.
pub mod hash_map;

pub mod hash_table;

/// A flat hash set built on `FlatHashMap`.
///
/// This module provides a `FlatHashSet` that stores keys in a `FlatHashMap`
/// with unit values and adds the usual set algebra.
pub mod hash_set;

#[cfg(test)]
mod proptests;

pub use hash_map::FlatHashMap;
pub use hash_set::FlatHashSet;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder for builds without a default hasher.
        ///
        /// Neither `foldhash` nor `std` is enabled, so maps and sets must be
        /// constructed with an explicit hasher via `with_hasher`.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}
