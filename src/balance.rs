//! Rotations and the rebalancing step run on every frame of a mutation's unwind.
//!
//! See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.

use std::cmp::Ordering;

use log::trace;

use crate::arena::{Arena, NodeId};

/// Which restructuring brings a node back within `|balance| <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rotation {
    /// Left-left: rotate the node right.
    Right,
    /// Right-right: rotate the node left.
    Left,
    /// Left-right: rotate the left child left, then the node right.
    LeftRight,
    /// Right-left: rotate the right child right, then the node left.
    RightLeft,
}

/// Rotate `old_root` to the right. This moves its left child up vertically and `old_root` down
/// vertically. Used to rebalance the tree when the left child is too tall.
///
/// ## Panics
///
/// When called on a node without a left child.
///
/// # Diagram
///
/// ```text
///      old_root              new_root
///      /     \               /     \
///   new_root  z   rotate ->  x    old_root
///    / \                           /  \
///   x   y                         y    z
/// ```
pub(crate) fn rotate_right<K>(arena: &mut Arena<K>, old_root: NodeId) -> NodeId {
    let new_root = arena[old_root].left.expect("Rotate right => left child");
    trace!("rotating right around node {}", old_root.index());

    arena[old_root].left = arena[new_root].right;
    arena[new_root].right = Some(old_root);

    arena.fix_height(old_root);
    arena.fix_height(new_root);
    new_root
}

/// Mirror of [`rotate_right`]: the right child moves up and `old_root` becomes its left child.
///
/// ## Panics
///
/// When called on a node without a right child.
pub(crate) fn rotate_left<K>(arena: &mut Arena<K>, old_root: NodeId) -> NodeId {
    let new_root = arena[old_root].right.expect("Rotate left => right child");
    trace!("rotating left around node {}", old_root.index());

    arena[old_root].right = arena[new_root].left;
    arena[new_root].left = Some(old_root);

    arena.fix_height(old_root);
    arena.fix_height(new_root);
    new_root
}

/// Performs `rotation` at `id` and returns the root of the restructured subtree.
pub(crate) fn apply<K>(arena: &mut Arena<K>, id: NodeId, rotation: Rotation) -> NodeId {
    match rotation {
        Rotation::Right => rotate_right(arena, id),
        Rotation::Left => rotate_left(arena, id),
        Rotation::LeftRight => {
            let left = arena[id].left.expect("Rotate left-right => left child");
            arena[id].left = Some(rotate_left(arena, left));
            rotate_right(arena, id)
        }
        Rotation::RightLeft => {
            let right = arena[id].right.expect("Rotate right-left => right child");
            arena[id].right = Some(rotate_right(arena, right));
            rotate_left(arena, id)
        }
    }
}

/// Picks a rotation for `id` by comparing the key stored at `probe` (the node that was just
/// inserted or rekeyed) with the key of the taller child. Used on the unwind of insert and
/// update, where the key says which grandchild grew.
pub(crate) fn by_key<K: Ord>(arena: &Arena<K>, id: NodeId, probe: NodeId) -> Option<Rotation> {
    let node = &arena[id];
    let key = &arena[probe].key;
    match arena.balance_factor(Some(id)) {
        b if b > 1 => match key.cmp(&arena[node.left?].key) {
            Ordering::Less => Some(Rotation::Right),
            Ordering::Greater => Some(Rotation::LeftRight),
            Ordering::Equal => None,
        },
        b if b < -1 => match key.cmp(&arena[node.right?].key) {
            Ordering::Greater => Some(Rotation::Left),
            Ordering::Less => Some(Rotation::RightLeft),
            Ordering::Equal => None,
        },
        _ => None,
    }
}

/// Picks a rotation for `id` from the balance factor of its taller child. Used on the unwind of
/// delete, where the removed key says nothing about which side is now too tall.
pub(crate) fn by_child_balance<K>(arena: &Arena<K>, id: NodeId) -> Option<Rotation> {
    let node = &arena[id];
    match arena.balance_factor(Some(id)) {
        b if b > 1 => Some(if arena.balance_factor(node.left) >= 0 {
            Rotation::Right
        } else {
            Rotation::LeftRight
        }),
        b if b < -1 => Some(if arena.balance_factor(node.right) <= 0 {
            Rotation::Left
        } else {
            Rotation::RightLeft
        }),
        _ => None,
    }
}

/// One unwind step: recompute the height of `id`, then restructure it with whatever `choose`
/// picks. Returns the new subtree root.
pub(crate) fn rebalance<K>(
    arena: &mut Arena<K>,
    id: NodeId,
    choose: impl FnOnce(&Arena<K>, NodeId) -> Option<Rotation>,
) -> NodeId {
    arena.fix_height(id);
    let root = match choose(&*arena, id) {
        Some(rotation) => apply(arena, id, rotation),
        None => id,
    };

    if cfg!(debug_assertions) {
        let node = &arena[root];
        let left_height = arena.height(node.left);
        let right_height = arena.height(node.right);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!(left_height.abs_diff(right_height) <= 1);
    }
    root
}
