use alloc::vec::Vec;
use core::fmt;
use core::iter::{Copied, Map};
use core::ops::Index;
use core::slice;

use tracing::trace;

use crate::Rank;
use crate::error::{Error, Result};

/// An ordered symbol table from `i64` keys to `i64` values, stored as a
/// sorted array.
///
/// Lookups binary-search the array. Insertion and removal shift every later
/// entry, so they cost O(n). This is the baseline [`BstMap`](crate::BstMap)
/// is measured against: the same ordered interface with opposite costs.
///
/// # Examples
///
/// ```
/// use bst_symtab::SortedArrayMap;
///
/// let mut map = SortedArrayMap::new();
/// map.insert(10, 5);
/// map.insert(4, 7);
/// map.insert(1, 4);
/// map.insert(3, 9);
///
/// assert_eq!(format!("{map:?}"), "[1, 3, 4, 10]");
/// assert_eq!(map.rank(4), 2);
/// assert_eq!(map.select(0), Some((1, 4)));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SortedArrayMap {
    entries: Vec<(i64, i64)>,
}

/// An iterator over the entries of a `SortedArrayMap`, in ascending key order.
pub type Iter<'a> = Copied<slice::Iter<'a, (i64, i64)>>;

/// An iterator over the keys of a `SortedArrayMap`, in ascending order.
pub type Keys<'a> = Map<slice::Iter<'a, (i64, i64)>, fn(&(i64, i64)) -> i64>;

impl SortedArrayMap {
    /// Makes a new, empty `SortedArrayMap`.
    #[must_use]
    pub const fn new() -> Self {
        SortedArrayMap { entries: Vec::new() }
    }

    /// Creates an empty table with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SortedArrayMap {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the table can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns the number of entries in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::SortedArrayMap;
    ///
    /// let mut map = SortedArrayMap::new();
    /// map.insert(1, 3);
    /// map.insert(1, 4);
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `Ok(index)` of `key`, or `Err(index)` where it would be inserted.
    /// Either way the index counts the keys less than `key`.
    fn search(&self, key: i64) -> core::result::Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |&(k, _)| k)
    }

    /// Returns the number of keys strictly less than `key`.
    ///
    /// For a stored key this is its index in the array; otherwise it is the
    /// index at which `key` would be inserted.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank(&self, key: i64) -> usize {
        self.search(key).unwrap_or_else(|index| index)
    }

    /// Returns the entry at zero-based position `k`, or `None` if
    /// `k >= len()`.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn select(&self, k: usize) -> Option<(i64, i64)> {
        self.entries.get(k).copied()
    }

    /// Returns `true` if the table holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.search(key).is_ok()
    }

    /// Returns the value stored under `key`.
    ///
    /// A stored `0` is reported as `Some(0)`; `None` only ever means the key
    /// is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::SortedArrayMap;
    ///
    /// let map = SortedArrayMap::from([(7, 0)]);
    /// assert_eq!(map.get(7), Some(0));
    /// assert_eq!(map.get(8), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: i64) -> Option<i64> {
        let index = self.search(key).ok()?;
        Some(self.entries[index].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::SortedArrayMap;
    ///
    /// let mut map = SortedArrayMap::from([(1, 10)]);
    /// if let Some(value) = map.get_mut(1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(map.get(1), Some(15));
    /// ```
    pub fn get_mut(&mut self, key: i64) -> Option<&mut i64> {
        let index = self.search(key).ok()?;
        Some(&mut self.entries[index].1)
    }

    /// Inserts an entry, or overwrites the value of an existing key.
    ///
    /// Returns the previous value if the key was present. A new key shifts
    /// every larger entry one slot to the right.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::SortedArrayMap;
    ///
    /// let mut map = SortedArrayMap::new();
    /// assert_eq!(map.insert(2, 20), None);
    /// assert_eq!(map.insert(2, 21), Some(20));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        match self.search(key) {
            Ok(index) => Some(core::mem::replace(&mut self.entries[index].1, value)),
            Err(index) => {
                trace!(key, index, shifted = self.entries.len() - index, "inserting entry");
                self.entries.insert(index, (key, value));
                None
            }
        }
    }

    /// Removes `key` and returns its value, or does nothing if it is absent.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn remove(&mut self, key: i64) -> Option<i64> {
        let index = self.search(key).ok()?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTable`] if the table has no entries.
    pub fn min(&self) -> Result<(i64, i64)> {
        self.entries.first().copied().ok_or(Error::EmptyTable { operation: "min" })
    }

    /// Returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTable`] if the table has no entries.
    pub fn max(&self) -> Result<(i64, i64)> {
        self.entries.last().copied().ok_or(Error::EmptyTable { operation: "max" })
    }

    /// Gets an iterator over the entries, sorted by key.
    pub fn iter(&self) -> Iter<'_> {
        self.entries.iter().copied()
    }

    /// Gets an iterator over the keys, in ascending order.
    pub fn keys(&self) -> Keys<'_> {
        self.entries.iter().map(key_of as fn(&(i64, i64)) -> i64)
    }
}

fn key_of(entry: &(i64, i64)) -> i64 {
    entry.0
}

/// Prints the keys in ascending order.
impl fmt::Debug for SortedArrayMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl FromIterator<(i64, i64)> for SortedArrayMap {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> SortedArrayMap {
        let mut map = SortedArrayMap::new();
        map.extend(iter);
        map
    }
}

impl Extend<(i64, i64)> for SortedArrayMap {
    fn extend<T: IntoIterator<Item = (i64, i64)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<const N: usize> From<[(i64, i64); N]> for SortedArrayMap {
    fn from(arr: [(i64, i64); N]) -> Self {
        SortedArrayMap::from_iter(arr)
    }
}

impl<'a> IntoIterator for &'a SortedArrayMap {
    type Item = (i64, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Indexes into the table by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl Index<Rank> for SortedArrayMap {
    type Output = i64;

    fn index(&self, rank: Rank) -> &i64 {
        &self.entries.get(rank.0).expect("index out of bounds").1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn insertion_keeps_keys_sorted() {
        let map = SortedArrayMap::from([(10, 5), (4, 7), (1, 4), (3, 9)]);
        assert_eq!(map.keys().collect::<Vec<_>>(), [1, 3, 4, 10]);
        assert_eq!(map.rank(0), 0);
        assert_eq!(map.rank(5), 3);
        assert_eq!(map.rank(11), 4);
    }

    #[test]
    fn duplicate_key_overwrites() {
        let mut map = SortedArrayMap::new();
        map.insert(1, 3);
        map.insert(1, 4);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(1), Some(4));
        assert_eq!(map[Rank(0)], 4);
    }

    #[test]
    fn empty_table() {
        let mut map = SortedArrayMap::default();
        assert_eq!(map.min(), Err(Error::EmptyTable { operation: "min" }));
        assert_eq!(map.max(), Err(Error::EmptyTable { operation: "max" }));
        assert_eq!(map.select(0), None);
        assert_eq!(map.remove(1), None);
        assert!(!map.contains_key(0));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn rank_index_out_of_bounds_panics() {
        let map = SortedArrayMap::from([(1, 1)]);
        let _ = map[Rank(1)];
    }

    proptest! {
        #[test]
        fn matches_btreemap(ops in prop::collection::vec((any::<bool>(), -100i64..100, any::<i64>()), 0..300)) {
            let mut map = SortedArrayMap::new();
            let mut model = BTreeMap::new();

            for (insert, key, value) in ops {
                if insert {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                } else {
                    prop_assert_eq!(map.remove(key), model.remove(&key));
                }
                prop_assert_eq!(map.len(), model.len());
            }

            prop_assert!(map.iter().eq(model.iter().map(|(&k, &v)| (k, v))));
            for (rank, (&key, &value)) in model.iter().enumerate() {
                prop_assert_eq!(map.rank(key), rank);
                prop_assert_eq!(map.select(rank), Some((key, value)));
            }
        }
    }
}
