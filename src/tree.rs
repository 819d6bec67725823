//! A self-balancing BST over an index arena. Every mutation is a recursive descent that hands
//! back the (possibly new) root of the subtree it touched, so rebalancing happens frame by frame
//! on the way back up.
//!
//! # Examples
//!
//! ```
//! use avl::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! tree.insert(1);
//! assert_eq!(tree.search(&1).map(|n| *n.key()), Some(1));
//!
//! // Inserting the same key again changes nothing.
//! tree.insert(1);
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting a node hands back its key.
//! assert_eq!(tree.remove(&1), Some(1));
//! assert!(tree.search(&1).is_none());
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::debug;

use crate::arena::{Arena, Link, NodeId};
use crate::balance;
use crate::error::UpdateError;
use crate::traverse::{Iter, PreOrder};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) of unique keys. This can be
/// used for inserting, finding, rekeying, and deleting keys.
#[derive(Clone)]
pub struct BalancedTree<K> {
    pub(crate) arena: Arena<K>,
    pub(crate) root: Link,
}

impl<K> Default for BalancedTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for BalancedTree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancedTree")
            .field("root", &self.root())
            .finish()
    }
}

impl<K> BalancedTree<K> {
    /// Generate a new, empty `BalancedTree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels in the tree. The empty tree has height 0 and a single node has height 1.
    pub fn height(&self) -> usize {
        self.arena.height(self.root)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// A read-only view of the root node, if there is one.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|id| NodeRef::new(&self.arena, id))
    }

    /// Visits keys root first, then the left subtree, then the right subtree. This is **not**
    /// sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::BalancedTree;
    ///
    /// let tree: BalancedTree<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), [2, 1, 3]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder::new(&self.arena, self.root)
    }

    /// Visits keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.arena, self.root)
    }

    /// Collects every key, in ascending order, into a freshly built `Vec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::BalancedTree;
    ///
    /// let tree: BalancedTree<_> = [30, 10, 20].into_iter().collect();
    /// assert_eq!(tree.keys(), [10, 20, 30]);
    /// ```
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        collect_keys(&self.arena, self.root, &mut keys);
        keys
    }

    /// Inserts `key` if it isn't already present. Inserting a key that is already in the tree
    /// leaves the tree untouched.
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let (root, _) = insert_node(&mut self.arena, self.root, key);
        self.root = Some(root);
    }

    /// Deletes the node containing `key` and returns its key. If the tree does not contain the
    /// key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::BalancedTree;
    ///
    /// let mut tree: BalancedTree<_> = [1, 2, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.remove(&2), None);
    /// assert_eq!(tree.keys(), [1, 3]);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let (root, removed) = remove_node(&mut self.arena, self.root, key);
        self.root = root;
        if removed.is_none() {
            debug!("remove: key not present");
        }
        removed
    }

    /// Replaces the key `old` with `new` in place and rebalances the path back to the root. If
    /// `old` isn't present, nothing happens.
    ///
    /// The caller must pick a `new` that keeps the tree ordered: strictly greater than `old`'s
    /// in-order predecessor and strictly less than its successor. Nothing checks this; a bad
    /// `new` leaves the tree misordered: later searches may miss keys, and debug builds may
    /// panic while rebalancing a later insert. Use [`try_update`](Self::try_update) for the
    /// checked version.
    pub fn update(&mut self, old: &K, new: K)
    where
        K: Ord,
    {
        let (root, updated) = update_node(&mut self.arena, self.root, old, new);
        self.root = root;
        if updated.is_none() {
            debug!("update: key not present");
        }
    }

    /// Like [`update`](Self::update) but first validates the rekey against the rest of the tree.
    ///
    /// # Errors
    ///
    /// * [`UpdateError::NotFound`] when `old` is not in the tree.
    /// * [`UpdateError::Occupied`] when `new` is already held by another node.
    /// * [`UpdateError::OutOfOrder`] when `new` is not strictly between `old`'s in-order
    ///   neighbours.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{BalancedTree, UpdateError};
    ///
    /// let mut tree: BalancedTree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.try_update(&20, 25), Ok(()));
    /// assert_eq!(tree.try_update(&25, 30), Err(UpdateError::Occupied));
    /// assert_eq!(tree.try_update(&25, 5), Err(UpdateError::OutOfOrder));
    /// assert_eq!(tree.try_update(&20, 21), Err(UpdateError::NotFound));
    /// assert_eq!(tree.keys(), [10, 25, 30]);
    /// ```
    pub fn try_update(&mut self, old: &K, new: K) -> Result<(), UpdateError>
    where
        K: Ord,
    {
        let (predecessor, successor) = self.neighbours(old).ok_or(UpdateError::NotFound)?;
        if new != *old {
            if self.contains(&new) {
                return Err(UpdateError::Occupied);
            }
            let above = predecessor.map_or(true, |p| *p < new);
            let below = successor.map_or(true, |s| new < *s);
            if !(above && below) {
                return Err(UpdateError::OutOfOrder);
            }
        }

        self.update(old, new);
        Ok(())
    }

    /// Finds the node holding `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::BalancedTree;
    ///
    /// let tree: BalancedTree<_> = [1, 2, 3].into_iter().collect();
    ///
    /// let node = tree.search(&2).unwrap();
    /// assert_eq!(*node.key(), 2);
    /// assert_eq!(node.left().map(|n| *n.key()), Some(1));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>>
    where
        K: Ord,
    {
        find_node(&self.arena, self.root, key).map(|id| NodeRef::new(&self.arena, id))
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        find_node(&self.arena, self.root, key).is_some()
    }

    /// The in-order predecessor and successor keys of `key`, or `None` if `key` is absent.
    fn neighbours(&self, key: &K) -> Option<(Option<&K>, Option<&K>)>
    where
        K: Ord,
    {
        let mut predecessor = None;
        let mut successor = None;
        let mut link = self.root;
        while let Some(id) = link {
            let node = &self.arena[id];
            match key.cmp(&node.key) {
                Ordering::Less => {
                    successor = Some(id);
                    link = node.left;
                }
                Ordering::Equal => {
                    if let Some(left) = node.left {
                        predecessor = Some(self.arena.rightmost(left));
                    }
                    if let Some(right) = node.right {
                        successor = Some(self.arena.leftmost(right));
                    }
                    let arena = &self.arena;
                    let key_of = move |id: NodeId| &arena[id].key;
                    return Some((predecessor.map(key_of), successor.map(key_of)));
                }
                Ordering::Greater => {
                    predecessor = Some(id);
                    link = node.right;
                }
            }
        }
        None
    }
}

impl<K: Ord> FromIterator<K> for BalancedTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for BalancedTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a BalancedTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// A read-only view of one node and, through [`left`](Self::left) and [`right`](Self::right),
/// of its whole subtree.
pub struct NodeRef<'a, K> {
    arena: &'a Arena<K>,
    id: NodeId,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for NodeRef<'_, K> {}

impl<K> fmt::Debug for NodeRef<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("height", &self.height())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K> NodeRef<'a, K> {
    fn new(arena: &'a Arena<K>, id: NodeId) -> Self {
        Self { arena, id }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.arena[self.id].key
    }

    /// Number of levels in the subtree rooted here; 1 for a leaf.
    pub fn height(&self) -> usize {
        self.arena[self.id].height
    }

    /// `height(left) - height(right)`. Always in `-1..=1` for a tree that upholds its contract.
    pub fn balance_factor(&self) -> isize {
        self.arena.balance_factor(Some(self.id))
    }

    /// The root of the left subtree.
    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.arena[self.id].left.map(|id| Self::new(self.arena, id))
    }

    /// The root of the right subtree.
    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.arena[self.id].right.map(|id| Self::new(self.arena, id))
    }
}

/// Returns the new root of the subtree at `link` and, if a node was created, its id.
fn insert_node<K: Ord>(arena: &mut Arena<K>, link: Link, key: K) -> (NodeId, Option<NodeId>) {
    let Some(id) = link else {
        let id = arena.alloc(key);
        return (id, Some(id));
    };

    let inserted = match key.cmp(&arena[id].key) {
        Ordering::Less => {
            let left = arena[id].left;
            let (left, inserted) = insert_node(arena, left, key);
            arena[id].left = Some(left);
            inserted
        }
        Ordering::Equal => None,
        Ordering::Greater => {
            let right = arena[id].right;
            let (right, inserted) = insert_node(arena, right, key);
            arena[id].right = Some(right);
            inserted
        }
    };

    match inserted {
        Some(probe) => {
            let root = balance::rebalance(arena, id, |arena, id| balance::by_key(arena, id, probe));
            (root, inserted)
        }
        None => (id, None),
    }
}

/// Returns the new root of the subtree at `link` and the removed key, if `key` was found.
fn remove_node<K: Ord>(arena: &mut Arena<K>, link: Link, key: &K) -> (Link, Option<K>) {
    let Some(id) = link else {
        return (None, None);
    };

    let removed = match key.cmp(&arena[id].key) {
        Ordering::Less => {
            let left = arena[id].left;
            let (left, removed) = remove_node(arena, left, key);
            arena[id].left = left;
            removed
        }
        Ordering::Greater => {
            let right = arena[id].right;
            let (right, removed) = remove_node(arena, right, key);
            arena[id].right = right;
            removed
        }
        Ordering::Equal => match (arena[id].left, arena[id].right) {
            (None, None) => return (None, Some(arena.release(id))),
            // The only child takes this node's slot as is.
            (Some(child), None) | (None, Some(child)) => {
                return (Some(child), Some(arena.release(id)))
            }
            (Some(_), Some(right)) => {
                // Trade keys with the in-order successor. The successor now holds `key`, which is
                // smaller than every other key on the right, so descending by `key` runs straight
                // down the left spine to it.
                let successor = arena.leftmost(right);
                arena.swap_keys(id, successor);
                let (right, removed) = remove_node(arena, Some(right), key);
                arena[id].right = right;
                removed
            }
        },
    };

    match removed {
        Some(_) => (
            Some(balance::rebalance(arena, id, balance::by_child_balance)),
            removed,
        ),
        None => (Some(id), None),
    }
}

/// Returns the new root of the subtree at `link` and the id of the rekeyed node, if `old` was
/// found.
fn update_node<K: Ord>(
    arena: &mut Arena<K>,
    link: Link,
    old: &K,
    new: K,
) -> (Link, Option<NodeId>) {
    let Some(id) = link else {
        return (None, None);
    };

    let updated = match old.cmp(&arena[id].key) {
        Ordering::Less => {
            let left = arena[id].left;
            let (left, updated) = update_node(arena, left, old, new);
            arena[id].left = left;
            updated
        }
        Ordering::Equal => {
            arena[id].key = new;
            return (Some(id), Some(id));
        }
        Ordering::Greater => {
            let right = arena[id].right;
            let (right, updated) = update_node(arena, right, old, new);
            arena[id].right = right;
            updated
        }
    };

    match updated {
        Some(probe) => {
            let root = balance::rebalance(arena, id, |arena, id| balance::by_key(arena, id, probe));
            (Some(root), updated)
        }
        None => (Some(id), None),
    }
}

fn find_node<K: Ord>(arena: &Arena<K>, link: Link, key: &K) -> Link {
    let id = link?;
    match key.cmp(&arena[id].key) {
        Ordering::Less => find_node(arena, arena[id].left, key),
        Ordering::Equal => Some(id),
        Ordering::Greater => find_node(arena, arena[id].right, key),
    }
}

fn collect_keys<K: Clone>(arena: &Arena<K>, link: Link, keys: &mut Vec<K>) {
    if let Some(id) = link {
        let node = &arena[id];
        collect_keys(arena, node.left, keys);
        keys.push(node.key.clone());
        collect_keys(arena, node.right, keys);
    }
}
