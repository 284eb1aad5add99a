use core::ops::Index;

use super::BstMap;
use crate::Rank;

impl BstMap {
    /// Returns the entry at zero-based position `k` in key order, or `None`
    /// if `k >= len()`.
    ///
    /// Each step compares `k` with the cached size of the left subtree, so no
    /// subtree is ever counted.
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
    /// let map = BstMap::from([(4, 3), (2, 4), (1, 3), (3, 5)]);
    /// assert_eq!(map.select(0), Some((1, 3)));
    /// assert_eq!(map.select(3), Some((4, 3)));
    /// assert_eq!(map.select(4), None);
    /// ```
    #[must_use]
    pub fn select(&self, k: usize) -> Option<(i64, i64)> {
        self.raw.select(k).map(|handle| self.raw.node(handle).entry())
    }

    /// Returns the number of keys strictly less than `key`.
    ///
    /// `key` need not be present. For a stored key this is its position in
    /// key order, so `select(rank(key))` finds it again.
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
    /// let map = BstMap::from([(4, 3), (2, 4), (1, 3), (3, 5)]);
    /// assert_eq!(map.rank(0), 0);
    /// assert_eq!(map.rank(2), 1);
    /// assert_eq!(map.rank(6), 4);
    /// ```
    #[must_use]
    pub fn rank(&self, key: i64) -> usize {
        self.raw.rank(key)
    }
}

/// Indexes into the table by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use bst_symtab::{BstMap, Rank};
///
/// let map = BstMap::from([(10, 1), (20, 2)]);
/// assert_eq!(map[Rank(1)], 2);
/// ```
impl Index<Rank> for BstMap {
    type Output = i64;

    fn index(&self, rank: Rank) -> &i64 {
        let handle = self.raw.select(rank.0).expect("index out of bounds");
        self.raw.node(handle).value_ref()
    }
}
