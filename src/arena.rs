//! Index-addressed storage for tree nodes.
//!
//! Nodes never point at each other directly. Each child link is an `Option<NodeId>` into the
//! [`Arena`], so re-parenting a subtree is a matter of overwriting an index. Released slots are
//! kept on a free list and handed out again by the next [`Arena::alloc`].

use std::ops::{Index, IndexMut};

/// Position of a node inside its [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A child link. `None` is an empty subtree.
pub(crate) type Link = Option<NodeId>;

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<NodeId>,
    len: usize,
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores a new leaf holding `key` and returns its id.
    pub(crate) fn alloc(&mut self, key: K) -> NodeId {
        let node = Node {
            key,
            height: 1,
            left: None,
            right: None,
        };
        self.len += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Frees the slot of `id` and hands back its key. The caller must already have unlinked the
    /// node from its parent.
    pub(crate) fn release(&mut self, id: NodeId) -> K {
        let node = self.slots[id.0]
            .take()
            .expect("Releasing a node that was already released");
        self.free.push(id);
        self.len -= 1;
        node.key
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Height of the subtree behind `link`; 0 when empty.
    pub(crate) fn height(&self, link: Link) -> usize {
        link.map_or(0, |id| self[id].height)
    }

    /// `height(left) - height(right)` of the node behind `link`; 0 when empty.
    pub(crate) fn balance_factor(&self, link: Link) -> isize {
        link.map_or(0, |id| {
            let node = &self[id];
            self.height(node.left) as isize - self.height(node.right) as isize
        })
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    pub(crate) fn fix_height(&mut self, id: NodeId) {
        let node = &self[id];
        let height = self.height(node.left).max(self.height(node.right)) + 1;
        self[id].height = height;
    }

    /// Follows left links from `id` until there is no left child.
    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self[id].left {
            id = left;
        }
        id
    }

    /// Follows right links from `id` until there is no right child.
    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self[id].right {
            id = right;
        }
        id
    }

    /// Exchanges the keys of two distinct nodes, leaving links and heights alone.
    pub(crate) fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        assert_ne!(a, b, "Swapping a key with itself");
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(high);
        match (head[low].as_mut(), tail[0].as_mut()) {
            (Some(x), Some(y)) => std::mem::swap(&mut x.key, &mut y.key),
            _ => panic!("Swapping keys of a released node"),
        }
    }
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        match &self.slots[id.0] {
            Some(node) => node,
            None => panic!("Node {} was released", id.0),
        }
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => panic!("Node {} was released", id.0),
        }
    }
}
