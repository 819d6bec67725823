//! This crate exposes an AVL tree: a self-balancing Binary Search Tree of
//! unique keys.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a
//! BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)`, where `height` is the
//! number of nodes on the longest path from the root `Node` down to a leaf.
//!
//! ## AVL
//!
//! An AVL tree adds one more invariant: for every `Node`, the heights of its
//! two subtrees differ by at most one. Every insert, delete, and rekey walks
//! back up the path it took and rotates any `Node` that has drifted out of
//! balance, which keeps the height within `1.44 lg N`.
//!
//! Nodes live in a slot arena owned by the tree and point at each other by
//! index, so there is no `unsafe` and no reference counting.
//!
//! ```
//! use avl::BalancedTree;
//!
//! let tree: BalancedTree<_> = (1..=7).collect();
//!
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), [4, 2, 1, 3, 6, 5, 7]);
//! assert_eq!(tree.keys(), [1, 2, 3, 4, 5, 6, 7]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod balance;
pub mod error;
mod print;
pub mod script;
pub mod traverse;
mod tree;
mod validate;

pub use error::{InvariantError, ScriptError, UpdateError};
pub use traverse::{Iter, PreOrder};
pub use tree::{BalancedTree, NodeRef};
