//! Ordered symbol tables over `i64` keys for Rust.
//!
//! This crate provides [`BstMap`], an ordered map from `i64` keys to `i64`
//! values stored in an unbalanced binary search tree, and [`SortedArrayMap`],
//! the same interface over a sorted array. Besides the usual map operations
//! both answer ordered queries:
//!
//! - [`min`](BstMap::min) / [`max`](BstMap::max) - The smallest and largest entries
//! - [`floor`](BstMap::floor) / [`ceiling`](BstMap::ceiling) - The nearest key at or below / above a query key
//! - [`select`](BstMap::select) - The entry at a given sorted position
//! - [`rank`](BstMap::rank) - How many keys are smaller than a query key
//! - [`range_keys`](BstMap::range_keys) / [`range_len`](BstMap::range_len) - The keys in an inclusive range
//!
//! # Example
//!
//! ```
//! use bst_symtab::{BstMap, Rank};
//!
//! let mut map = BstMap::new();
//! map.insert(1, 3);
//! map.insert(1, 4);
//! map.insert(2, 3);
//! map.insert(4, 5);
//! map.insert(10, 1);
//!
//! assert_eq!(map.len(), 4);
//! assert_eq!(map.get(1), Some(4));
//! assert_eq!(map.min(), Ok((1, 4)));
//!
//! map.delete_min();
//! assert_eq!(map.min(), Ok((2, 3)));
//!
//! // Order statistics in O(height)
//! assert_eq!(map.select(1), Some((4, 5)));
//! assert_eq!(map.rank(10), 2);
//! assert_eq!(map[Rank(2)], 1);
//! ```
//!
//! # Implementation
//!
//! Every tree node caches the size of its subtree. Select and rank read those
//! sizes on the way down instead of counting, and every insertion or deletion
//! refreshes them on the way back up to the root. Nodes live in an arena and
//! link to each other by index; deleted nodes return their slot to a free list.
//!
//! The tree is never rebalanced, so its height depends on insertion order and
//! is linear in the worst case. No walk recurses on the call stack, so deep
//! trees are slow but safe.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod bst_map;
pub mod sorted_array_map;

pub use bst_map::BstMap;
pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use sorted_array_map::SortedArrayMap;
