use core::cmp::Ordering;
use core::mem;

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Direction, Node};
use super::size::Size;

/// The unbalanced binary search tree backing `BstMap`.
#[derive(Clone, Debug)]
pub(crate) struct RawBst {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// One step of a mutating descent: the node we left and the link we took.
struct PathElement {
    node: Handle,
    direction: Direction,
}

/// Ancestors of the mutation site, root first.
type Path = SmallVec<[PathElement; 32]>;

impl RawBst {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of entries, read from the root's cached size.
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root).to_usize()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        debug!(len = self.len(), capacity = self.nodes.capacity(), "clearing table");
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Size of the subtree behind `link`; an absent link has size zero.
    #[inline]
    fn size_of(&self, link: Option<Handle>) -> Size {
        link.map_or(Size::ZERO, |handle| self.nodes.get(handle).size())
    }

    /// Recomputes a node's cached size from its children.
    fn update_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = Size::of_parent(self.size_of(node.left()), self.size_of(node.right()));
        self.nodes.get_mut(handle).set_size(size);
    }

    /// Rebuilds the path bottom-up.
    ///
    /// `subtree` is the new root of the subtree below the last path element.
    /// Each ancestor relinks the subtree it descended into, refreshes its size,
    /// and becomes the subtree handed to its own parent. Returns the new root
    /// of the whole path.
    fn unwind(&mut self, path: &mut Path, mut subtree: Option<Handle>) -> Option<Handle> {
        while let Some(element) = path.pop() {
            self.nodes.get_mut(element.node).set_child(element.direction, subtree);
            self.update_size(element.node);
            subtree = Some(element.node);
        }
        subtree
    }

    /// Finds the node holding `key`.
    pub(crate) fn search(&self, key: i64) -> Option<Handle> {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(&node.key()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    pub(crate) fn get(&self, key: i64) -> Option<i64> {
        self.search(key).map(|handle| self.nodes.get(handle).value())
    }

    pub(crate) fn get_mut(&mut self, key: i64) -> Option<&mut i64> {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    pub(crate) fn contains_key(&self, key: i64) -> bool {
        self.search(key).is_some()
    }

    /// Inserts `key` or overwrites its value. Returns the overwritten value.
    ///
    /// Overwriting changes no sizes. Otherwise exactly one node is allocated at
    /// the absent link the descent ended on.
    pub(crate) fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        let mut path: Path = SmallVec::new();
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            let direction = match key.cmp(&node.key()) {
                Ordering::Equal => return Some(mem::replace(node.value_mut(), value)),
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
            };
            current = node.child(direction);
            path.push(PathElement { node: handle, direction });
        }

        trace!(key, depth = path.len(), "allocating node");
        let leaf = self.nodes.alloc(Node::leaf(key, value));
        self.root = self.unwind(&mut path, Some(leaf));
        None
    }

    /// Walks from `start` along `direction` to the last node on that chain and
    /// frees it.
    ///
    /// Returns the freed entry and its remaining child, which takes its place.
    /// The nodes passed on the way are pushed onto `path`.
    fn detach_extreme(&mut self, start: Handle, direction: Direction, path: &mut Path) -> ((i64, i64), Option<Handle>) {
        let mut current = start;
        while let Some(next) = self.nodes.get(current).child(direction) {
            path.push(PathElement { node: current, direction });
            current = next;
        }

        let node = self.nodes.take(current);
        trace!(key = node.key(), "releasing node");
        (node.entry(), node.child(direction.opposite()))
    }

    /// Removes and returns the entry at the end of the `direction` chain.
    fn delete_extreme(&mut self, direction: Direction) -> Option<(i64, i64)> {
        let root = self.root?;
        let mut path: Path = SmallVec::new();
        let (entry, replacement) = self.detach_extreme(root, direction, &mut path);
        self.root = self.unwind(&mut path, replacement);
        Some(entry)
    }

    /// Removes the smallest entry. Does nothing on an empty tree.
    pub(crate) fn delete_min(&mut self) -> Option<(i64, i64)> {
        self.delete_extreme(Direction::Left)
    }

    /// Removes the largest entry. Does nothing on an empty tree.
    pub(crate) fn delete_max(&mut self) -> Option<(i64, i64)> {
        self.delete_extreme(Direction::Right)
    }

    /// Hibbard deletion of `key`. Returns the removed value.
    pub(crate) fn remove(&mut self, key: i64) -> Option<i64> {
        let mut path: Path = SmallVec::new();
        let mut current = self.root;

        let target = loop {
            let handle = current?;
            let node = self.nodes.get(handle);
            let direction = match key.cmp(&node.key()) {
                Ordering::Equal => break handle,
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
            };
            current = node.child(direction);
            path.push(PathElement { node: handle, direction });
        };

        let node = self.nodes.get(target);
        let (left, right) = (node.left(), node.right());

        let (removed, replacement) = match (left, right) {
            (Some(_), Some(right)) => {
                // The successor (minimum of the right subtree) moves into `target`,
                // and the successor's own node is the one freed.
                let mut successor_path: Path = SmallVec::new();
                let ((successor_key, successor_value), remainder) =
                    self.detach_extreme(right, Direction::Left, &mut successor_path);
                let new_right = self.unwind(&mut successor_path, remainder);

                trace!(key, successor = successor_key, "promoting successor");
                let node = self.nodes.get_mut(target);
                let removed = node.value();
                node.replace_entry(successor_key, successor_value);
                node.set_child(Direction::Right, new_right);
                self.update_size(target);

                (removed, Some(target))
            }
            _ => {
                let node = self.nodes.take(target);
                trace!(key, "releasing node");
                (node.value(), left.or(right))
            }
        };

        self.root = self.unwind(&mut path, replacement);
        Some(removed)
    }

    /// Follows `direction` links from the root to the end.
    fn extreme(&self, direction: Direction) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(next) = self.nodes.get(current).child(direction) {
            current = next;
        }
        Some(current)
    }

    pub(crate) fn min(&self) -> Option<(i64, i64)> {
        self.extreme(Direction::Left).map(|handle| self.nodes.get(handle).entry())
    }

    pub(crate) fn max(&self) -> Option<(i64, i64)> {
        self.extreme(Direction::Right).map(|handle| self.nodes.get(handle).entry())
    }

    /// The node with the largest key `<= key`.
    pub(crate) fn floor(&self, key: i64) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match node.key().cmp(&key) {
                Ordering::Equal => return Some(handle),
                // This node is a candidate unless something in its right subtree is closer.
                Ordering::Less => {
                    best = Some(handle);
                    node.right()
                }
                Ordering::Greater => node.left(),
            };
        }

        best
    }

    /// The node with the smallest key `>= key`.
    pub(crate) fn ceiling(&self, key: i64) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match node.key().cmp(&key) {
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    best = Some(handle);
                    node.left()
                }
                Ordering::Less => node.right(),
            };
        }

        best
    }

    /// The node at zero-based position `rank` in key order.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;

        loop {
            let node = self.nodes.get(current);
            let left_size = self.size_of(node.left()).to_usize();
            let next = match remaining.cmp(&left_size) {
                Ordering::Equal => return Some(current),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    node.right()
                }
                Ordering::Less => node.left(),
            };
            debug_assert!(
                next.is_some(),
                "`RawBst::select()` - subtree sizes disagree with the tree shape at rank {rank}"
            );
            current = next?;
        }
    }

    /// Number of keys strictly less than `key`.
    pub(crate) fn rank(&self, key: i64) -> usize {
        let mut rank = 0;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left()).to_usize();
            current = match node.key().cmp(&key) {
                Ordering::Less => {
                    rank += left_size + 1;
                    node.right()
                }
                Ordering::Equal => return rank + left_size,
                Ordering::Greater => node.left(),
            };
        }

        rank
    }

    /// Number of keys in `lo..=hi`.
    pub(crate) fn range_len(&self, lo: i64, hi: i64) -> usize {
        if lo > hi {
            return 0;
        }
        self.rank(hi) - self.rank(lo) + usize::from(self.contains_key(hi))
    }

    /// Nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut height = 0;
        let mut stack: SmallVec<[(Handle, usize); 32]> = SmallVec::new();
        stack.push((root, 1));

        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            stack.extend([node.left(), node.right()].into_iter().flatten().map(|child| (child, depth + 1)));
        }

        height
    }
}
