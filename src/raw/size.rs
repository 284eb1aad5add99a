use super::handle::{Handle, RawHandle};

/// Cached node count of a subtree, the node itself included.
///
/// A tree never holds more nodes than the arena has handles, so a size fits in
/// the same integer width as a [`Handle`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(RawHandle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self(0);
    pub(crate) const ONE: Self = Self(1);

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(size as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Size of a node whose children have sizes `left` and `right`.
    #[inline]
    pub(crate) const fn of_parent(left: Self, right: Self) -> Self {
        Self::from_usize(1 + left.to_usize() + right.to_usize())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, Handle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn size_past_max_panics() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    fn leaf_has_size_one() {
        assert_eq!(Size::of_parent(Size::ZERO, Size::ZERO), Size::ONE);
    }

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn parent_of_full_subtrees_overflows() {
        let half = Size::from_usize(Size::MAX / 2);
        let _ = Size::of_parent(half, Size::from_usize(Size::MAX - Size::MAX / 2));
    }

    proptest! {
        #[test]
        fn size_survives_encoding(size in 0..=Size::MAX) {
            prop_assert_eq!(Size::from_usize(size).to_usize(), size);
        }

        #[test]
        fn parent_counts_both_children(left in 0..1000usize, right in 0..1000usize) {
            let parent = Size::of_parent(Size::from_usize(left), Size::from_usize(right));
            prop_assert_eq!(parent.to_usize(), left + right + 1);
        }
    }
}
