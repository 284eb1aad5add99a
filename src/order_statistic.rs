/// A zero-based position in the key order of a table.
///
/// Indexing a table by `Rank` selects the value at that position.
///
/// # Examples
///
/// ```
/// use bst_symtab::{BstMap, Rank};
///
/// let mut map = BstMap::new();
/// map.insert(20, 200);
/// map.insert(10, 100);
///
/// assert_eq!(map[Rank(0)], 100);
/// assert_eq!(map[Rank(1)], 200);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
