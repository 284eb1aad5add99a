use super::handle::Handle;
use super::size::Size;

/// Which child link a walk followed out of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A tree vertex. Each child link is owned by exactly one parent.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    key: i64,
    value: i64,
    // 1 + size(left) + size(right), refreshed whenever a child link changes.
    size: Size,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl Node {
    /// A new childless node of size one.
    pub(crate) const fn leaf(key: i64, value: i64) -> Self {
        Self {
            key,
            value,
            size: Size::ONE,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> i64 {
        self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub(crate) const fn value_ref(&self) -> &i64 {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut i64 {
        &mut self.value
    }

    #[inline]
    pub(crate) const fn entry(&self) -> (i64, i64) {
        (self.key, self.value)
    }

    /// Overwrites both key and value, keeping the node's links and slot.
    pub(crate) fn replace_entry(&mut self, key: i64, value: i64) {
        self.key = key;
        self.value = value;
    }

    #[inline]
    pub(crate) const fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, direction: Direction) -> Option<Handle> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, direction: Direction, child: Option<Handle>) {
        match direction {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }
}
