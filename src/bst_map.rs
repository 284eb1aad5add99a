use alloc::collections::VecDeque;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::raw::{Handle, RawBst};

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// Explicit stack of nodes still to be visited by an in-order walk.
type Stack = SmallVec<[Handle; 32]>;

/// An ordered symbol table from `i64` keys to `i64` values, stored in an
/// unbalanced [binary search tree].
///
/// Every node caches the size of its subtree, so besides the usual map
/// operations the table answers order-statistic queries ([`select`],
/// [`rank`]) and range counts ([`range_len`]) in time proportional to the
/// height of the tree.
///
/// The tree is never rebalanced. Inserting keys in sorted order produces a
/// chain whose height equals the number of entries; every operation then takes
/// linear time. All walks use explicit stacks, so such a chain costs time but
/// never overflows the call stack.
///
/// # Examples
///
/// ```
/// use bst_symtab::BstMap;
///
/// let mut map = BstMap::new();
/// map.insert(4, 3);
/// map.insert(2, 4);
/// map.insert(1, 3);
/// map.insert(3, 5);
///
/// assert_eq!(map.len(), 4);
/// assert_eq!(map.get(2), Some(4));
/// assert_eq!(map.select(0), Some((1, 3)));
/// assert_eq!(map.rank(6), 4);
/// assert!(map.keys().eq([1, 2, 3, 4]));
/// assert!(map.range_keys(2, 3).eq([2, 3]));
/// ```
///
/// A table with a known list of entries can be initialized from an array:
///
/// ```
/// use bst_symtab::BstMap;
///
/// let map = BstMap::from([(10, 1), (4, 5), (2, 3)]);
/// assert_eq!(map.min(), Ok((2, 3)));
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [`select`]: BstMap::select
/// [`rank`]: BstMap::rank
/// [`range_len`]: BstMap::range_len
#[derive(Clone)]
pub struct BstMap {
    raw: RawBst,
}

/// An in-order walk over a `BstMap`, shared by the ordered iterators.
#[derive(Clone)]
struct InOrder<'a> {
    raw: &'a RawBst,
    stack: Stack,
    remaining: usize,
}

impl<'a> InOrder<'a> {
    fn new(raw: &'a RawBst) -> Self {
        let mut walk = InOrder {
            raw,
            stack: Stack::new(),
            remaining: raw.len(),
        };
        walk.push_left_spine(raw.root());
        walk
    }

    fn push_left_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.raw.node(handle).left();
        }
    }

    fn next_handle(&mut self) -> Option<Handle> {
        let handle = self.stack.pop()?;
        self.push_left_spine(self.raw.node(handle).right());
        self.remaining -= 1;
        Some(handle)
    }
}

/// An iterator over the entries of a `BstMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`BstMap`].
///
/// [`iter`]: BstMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a> {
    walk: InOrder<'a>,
}

/// An iterator over the keys of a `BstMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`BstMap`].
///
/// [`keys`]: BstMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Keys<'a> {
    inner: Iter<'a>,
}

/// An iterator over the values of a `BstMap`, in ascending key order.
///
/// This `struct` is created by the [`values`] method on [`BstMap`].
///
/// [`values`]: BstMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Values<'a> {
    inner: Iter<'a>,
}

/// An iterator over the entries of a `BstMap` whose keys lie in `lo..=hi`.
///
/// Subtrees entirely outside the bounds are never visited.
///
/// This `struct` is created by the [`range`] method on [`BstMap`].
///
/// [`range`]: BstMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Range<'a> {
    raw: &'a RawBst,
    stack: Stack,
    lo: i64,
    hi: i64,
}

/// An iterator over the keys of a `BstMap` that lie in `lo..=hi`.
///
/// This `struct` is created by the [`range_keys`] method on [`BstMap`].
///
/// [`range_keys`]: BstMap::range_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct RangeKeys<'a> {
    inner: Range<'a>,
}

/// A breadth-first iterator over the keys of a `BstMap`.
///
/// This `struct` is created by the [`level_order`] method on [`BstMap`].
///
/// [`level_order`]: BstMap::level_order
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct LevelOrder<'a> {
    raw: &'a RawBst,
    queue: VecDeque<Handle>,
}

impl BstMap {
    /// Makes a new, empty `BstMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 10);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        BstMap { raw: RawBst::new() }
    }

    /// Returns the number of entries in the table.
    ///
    /// # Complexity
    ///
    /// O(1); the root caches the size of the whole tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, 3);
    /// map.insert(1, 4);
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every entry, keeping the allocated node storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(1, 10), (2, 20)]);
    /// let capacity = map.capacity();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the value stored under `key`.
    ///
    /// A stored `0` is reported as `Some(0)`; `None` only ever means the key
    /// is absent.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(7, 0);
    /// assert_eq!(map.get(7), Some(0));
    /// assert_eq!(map.get(8), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: i64) -> Option<i64> {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(1, 10)]);
    /// if let Some(value) = map.get_mut(1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(map.get(1), Some(15));
    /// ```
    pub fn get_mut(&mut self, key: i64) -> Option<&mut i64> {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the table holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.raw.contains_key(key)
    }

    /// Inserts an entry, or overwrites the value of an existing key.
    ///
    /// Returns the previous value if the key was present. Overwriting leaves
    /// the tree shape untouched; a new key allocates exactly one node.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(37, 1), None);
    /// assert_eq!(map.insert(37, 2), Some(1));
    /// assert_eq!(map.get(37), Some(2));
    /// ```
    pub fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        self.raw.insert(key, value)
    }

    /// Removes `key` and returns its value, or does nothing if it is absent.
    ///
    /// A node with two children takes over the entry of its in-order
    /// successor, and the successor's node is released instead (Hibbard
    /// deletion).
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(1, 10), (2, 20)]);
    /// assert_eq!(map.remove(1), Some(10));
    /// assert_eq!(map.remove(1), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove(&mut self, key: i64) -> Option<i64> {
        self.raw.remove(key)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// Does nothing and returns `None` on an empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::from([(1, 4), (2, 3), (4, 5), (10, 1)]);
    /// assert_eq!(map.delete_min(), Some((1, 4)));
    /// assert_eq!(map.min(), Ok((2, 3)));
    ///
    /// let mut empty = BstMap::new();
    /// assert_eq!(empty.delete_min(), None);
    /// ```
    pub fn delete_min(&mut self) -> Option<(i64, i64)> {
        self.raw.delete_min()
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// Does nothing and returns `None` on an empty table.
    pub fn delete_max(&mut self) -> Option<(i64, i64)> {
        self.raw.delete_max()
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTable`] if the table has no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyTable { operation: "min" }));
    ///
    /// map.insert(3, 30);
    /// map.insert(1, 10);
    /// assert_eq!(map.min(), Ok((1, 10)));
    /// ```
    pub fn min(&self) -> Result<(i64, i64)> {
        self.raw.min().ok_or(Error::EmptyTable { operation: "min" })
    }

    /// Returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTable`] if the table has no entries.
    pub fn max(&self) -> Result<(i64, i64)> {
        self.raw.max().ok_or(Error::EmptyTable { operation: "max" })
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(2, 3), (4, 5), (10, 1)]);
    /// assert_eq!(map.floor(3), Some((2, 3)));
    /// assert_eq!(map.floor(4), Some((4, 5)));
    /// assert_eq!(map.floor(1), None);
    /// ```
    #[must_use]
    pub fn floor(&self, key: i64) -> Option<(i64, i64)> {
        self.raw.floor(key).map(|handle| self.raw.node(handle).entry())
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(2, 3), (4, 5), (10, 1)]);
    /// assert_eq!(map.ceiling(1), Some((2, 3)));
    /// assert_eq!(map.ceiling(5), Some((10, 1)));
    /// assert_eq!(map.ceiling(11), None);
    /// ```
    #[must_use]
    pub fn ceiling(&self, key: i64) -> Option<(i64, i64)> {
        self.raw.ceiling(key).map(|handle| self.raw.node(handle).entry())
    }

    /// Returns the number of keys in `lo..=hi`.
    ///
    /// Computed from two rank queries rather than by walking the range. An
    /// empty range (`lo > hi`) has no keys.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(1, 0), (2, 0), (3, 0), (4, 0)]);
    /// assert_eq!(map.range_len(2, 3), 2);
    /// assert_eq!(map.range_len(0, i64::MAX), 4);
    /// assert_eq!(map.range_len(3, 2), 0);
    /// ```
    #[must_use]
    pub fn range_len(&self, lo: i64, hi: i64) -> usize {
        self.raw.range_len(lo, hi)
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, or `0` for an empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let chain: BstMap = (0..8).map(|key| (key, key)).collect();
    /// assert_eq!(chain.height(), 8);
    ///
    /// let bushy = BstMap::from([(2, 0), (1, 0), (3, 0)]);
    /// assert_eq!(bushy.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator over the entries of the table, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(3, 30), (1, 10), (2, 20)]);
    /// let mut iter = map.iter();
    /// assert_eq!(iter.next(), Some((1, 10)));
    /// assert_eq!(iter.len(), 2);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            walk: InOrder::new(&self.raw),
        }
    }

    /// Gets an iterator over the keys of the table, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(4, 3), (2, 4), (1, 3), (3, 5)]);
    /// assert_eq!(map.keys().collect::<Vec<_>>(), [1, 2, 3, 4]);
    /// ```
    pub fn keys(&self) -> Keys<'_> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the table, in ascending key order.
    pub fn values(&self) -> Values<'_> {
        Values { inner: self.iter() }
    }

    /// Gets an iterator over the entries whose keys lie in `lo..=hi`, sorted
    /// by key.
    ///
    /// The walk skips every subtree that lies entirely outside the bounds. An
    /// empty range (`lo > hi`) yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(5, 50), (1, 10), (9, 90), (3, 30)]);
    /// assert_eq!(map.range(2, 6).collect::<Vec<_>>(), [(3, 30), (5, 50)]);
    /// ```
    pub fn range(&self, lo: i64, hi: i64) -> Range<'_> {
        let mut range = Range {
            raw: &self.raw,
            stack: Stack::new(),
            lo,
            hi,
        };
        if lo <= hi {
            range.push_left_spine(self.raw.root());
        }
        range
    }

    /// Gets an iterator over the keys in `lo..=hi`, in ascending order.
    ///
    /// Yields exactly [`range_len(lo, hi)`](BstMap::range_len) keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(4, 3), (2, 4), (1, 3), (3, 5)]);
    /// assert_eq!(map.range_keys(2, 3).collect::<Vec<_>>(), [2, 3]);
    /// ```
    pub fn range_keys(&self, lo: i64, hi: i64) -> RangeKeys<'_> {
        RangeKeys {
            inner: self.range(lo, hi),
        }
    }

    /// Gets a breadth-first iterator over the keys: the root, then its
    /// children left to right, then their children, and so on.
    ///
    /// The order reflects the tree shape and is meant for diagnostics.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::from([(4, 3), (2, 4), (1, 3), (3, 5)]);
    /// assert_eq!(map.level_order().collect::<Vec<_>>(), [4, 2, 1, 3]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_> {
        LevelOrder {
            raw: &self.raw,
            queue: self.raw.root().into_iter().collect(),
        }
    }
}

impl Range<'_> {
    /// Stacks the nodes of the left spine under `link` that are not below `lo`.
    /// A node below `lo` is skipped along with its left subtree.
    fn push_left_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            let node = self.raw.node(handle);
            if node.key() < self.lo {
                link = node.right();
            } else {
                self.stack.push(handle);
                link = node.left();
            }
        }
    }
}

impl PartialEq for BstMap {
    fn eq(&self, other: &BstMap) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for BstMap {}

impl fmt::Debug for BstMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Default for BstMap {
    fn default() -> BstMap {
        BstMap::new()
    }
}

impl FromIterator<(i64, i64)> for BstMap {
    fn from_iter<T: IntoIterator<Item = (i64, i64)>>(iter: T) -> BstMap {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl Extend<(i64, i64)> for BstMap {
    #[inline]
    fn extend<T: IntoIterator<Item = (i64, i64)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<const N: usize> From<[(i64, i64); N]> for BstMap {
    /// Later entries overwrite earlier ones with the same key. Insertion
    /// follows array order, which therefore decides the tree shape.
    fn from(arr: [(i64, i64); N]) -> Self {
        BstMap::from_iter(arr)
    }
}

impl<'a> IntoIterator for &'a BstMap {
    type Item = (i64, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Iterator for Iter<'_> {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        let handle = self.walk.next_handle()?;
        Some(self.walk.raw.node(handle).entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl Iterator for Keys<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl FusedIterator for Keys<'_> {}

impl fmt::Debug for Keys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl Iterator for Values<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Values<'_> {}

impl FusedIterator for Values<'_> {}

impl fmt::Debug for Values<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl Iterator for Range<'_> {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        let handle = self.stack.pop()?;
        let node = self.raw.node(handle);
        // Everything still stacked is larger, so the walk ends here.
        if node.key() > self.hi {
            self.stack.clear();
            return None;
        }
        self.push_left_spine(node.right());
        Some(node.entry())
    }
}

impl FusedIterator for Range<'_> {}

impl fmt::Debug for Range<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl Iterator for RangeKeys<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl FusedIterator for RangeKeys<'_> {}

impl fmt::Debug for RangeKeys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl Iterator for LevelOrder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let handle = self.queue.pop_front()?;
        let node = self.raw.node(handle);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node.key())
    }
}

impl FusedIterator for LevelOrder<'_> {}

impl fmt::Debug for LevelOrder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
