//! Borrowing iterators over the keys of a [`BalancedTree`](crate::BalancedTree).
//!
//! Both keep an explicit stack of pending nodes instead of recursing, so they can be driven
//! lazily and stopped at any point.

use std::iter::FusedIterator;

use crate::arena::{Arena, Link, NodeId};

/// Root-first traversal: a node, then its left subtree, then its right subtree.
///
/// Created by [`BalancedTree::pre_order`](crate::BalancedTree::pre_order).
pub struct PreOrder<'a, K> {
    arena: &'a Arena<K>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>, root: Link) -> Self {
        Self {
            arena,
            stack: root.into_iter().collect(),
            remaining: arena.len(),
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        // Right goes on first so the left subtree is popped before it.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for PreOrder<'_, K> {}
impl<K> FusedIterator for PreOrder<'_, K> {}

/// Ascending traversal: left subtree, node, right subtree.
///
/// Created by [`BalancedTree::iter`](crate::BalancedTree::iter).
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>, root: Link) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
            remaining: arena.len(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(id) = link {
            self.stack.push(id);
            link = self.arena[id].left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}
