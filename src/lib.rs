#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A static membership set built on the two-level FKS core.
///
/// This module provides `FixedSet`, which wraps the `OuterTable` and
/// provides a build-once set interface with reproducible seeding.
pub mod fixed_set;

/// The universal hash function family used by both table levels.
pub mod hash;

pub mod table;

pub use fixed_set::FixedSet;
pub use hash::Key;
pub use hash::UniversalHash;
pub use table::OuterTable;
