use super::BstMap;
use crate::raw::RawBst;

impl BstMap {
    /// Creates an empty table with node storage for at least `capacity`
    /// entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let map = BstMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BstMap {
            raw: RawBst::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the table can hold before its node
    /// storage reallocates.
    ///
    /// Removed entries free their slot for the next insertion, so a table that
    /// removes as often as it inserts does not grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_symtab::BstMap;
    ///
    /// let mut map = BstMap::with_capacity(4);
    /// let capacity = map.capacity();
    /// for key in 0..100 {
    ///     map.insert(key, key);
    ///     map.remove(key);
    /// }
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
