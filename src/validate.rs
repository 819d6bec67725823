//! Whole-tree invariant checking.

use crate::arena::{Arena, Link};
use crate::error::InvariantError;
use crate::BalancedTree;

impl<K: Ord> BalancedTree<K> {
    /// Walks every node and checks, in this order per node, that its key is strictly between
    /// its ancestors' bounds, that its cached height is right, and that its children's heights
    /// differ by at most one. Finally checks that the number of nodes found matches
    /// [`len`](Self::len).
    ///
    /// A tree only fails this after [`update`](Self::update) was handed a key that breaks the
    /// ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{BalancedTree, InvariantError};
    ///
    /// let mut tree: BalancedTree<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(tree.check_invariants(), Ok(()));
    ///
    /// // The root's left child may not be larger than the root.
    /// tree.update(&1, 5);
    /// assert_eq!(
    ///     tree.check_invariants(),
    ///     Err(InvariantError::Unordered { depth: 1 })
    /// );
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut counted = 0;
        check(&self.arena, self.root, None, None, 0, &mut counted)?;
        if counted != self.len() {
            return Err(InvariantError::LengthMismatch {
                counted,
                recorded: self.len(),
            });
        }
        Ok(())
    }
}

/// Returns the real height of the subtree at `link`. Every key must be strictly between `lower`
/// and `upper`.
fn check<'a, K: Ord>(
    arena: &'a Arena<K>,
    link: Link,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
    depth: usize,
    counted: &mut usize,
) -> Result<usize, InvariantError> {
    let Some(id) = link else {
        return Ok(0);
    };
    let node = &arena[id];

    let above = lower.map_or(true, |lower| *lower < node.key);
    let below = upper.map_or(true, |upper| node.key < *upper);
    if !(above && below) {
        return Err(InvariantError::Unordered { depth });
    }

    let left = check(arena, node.left, lower, Some(&node.key), depth + 1, counted)?;
    let right = check(arena, node.right, Some(&node.key), upper, depth + 1, counted)?;

    let actual = left.max(right) + 1;
    if node.height != actual {
        return Err(InvariantError::WrongHeight {
            depth,
            cached: node.height,
            actual,
        });
    }

    let balance = left as isize - right as isize;
    if balance.abs() > 1 {
        return Err(InvariantError::Unbalanced { depth, balance });
    }

    *counted += 1;
    Ok(actual)
}
