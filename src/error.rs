//! Errors reported by the checked operations, the invariant checker, and the script driver.
//!
//! The core operations (`insert`, `remove`, `update`, `search`) never fail: missing keys and
//! duplicates are silent no-ops.

use std::io;

use thiserror::Error;

/// Why [`BalancedTree::try_update`](crate::BalancedTree::try_update) refused to rekey a node.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UpdateError {
    /// The key to replace is not in the tree.
    #[error("key to update is not present")]
    NotFound,
    /// The replacement key is already held by another node.
    #[error("replacement key is already present")]
    Occupied,
    /// The replacement key does not sit strictly between the old key's in-order neighbours.
    #[error("replacement key would break the ordering of its neighbours")]
    OutOfOrder,
}

/// The first broken invariant found by
/// [`BalancedTree::check_invariants`](crate::BalancedTree::check_invariants).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// A key is not strictly between the bounds set by its ancestors.
    #[error("key at depth {depth} is out of order")]
    Unordered {
        /// Edges between the root and the offending node.
        depth: usize,
    },
    /// A cached height disagrees with the heights of the children.
    #[error("node at depth {depth} caches height {cached} but has height {actual}")]
    WrongHeight {
        /// Edges between the root and the offending node.
        depth: usize,
        /// Height stored in the node.
        cached: usize,
        /// Height derived from the children.
        actual: usize,
    },
    /// The children's heights differ by more than one.
    #[error("node at depth {depth} has balance factor {balance}")]
    Unbalanced {
        /// Edges between the root and the offending node.
        depth: usize,
        /// `height(left) - height(right)`.
        balance: isize,
    },
    /// The number of reachable nodes disagrees with the tree's length.
    #[error("found {counted} nodes but the tree holds {recorded}")]
    LengthMismatch {
        /// Nodes reachable from the root.
        counted: usize,
        /// Nodes the tree believes it holds.
        recorded: usize,
    },
}

/// Failures while parsing or running a command script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The first word of a line is not a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// A command got the wrong number of arguments.
    #[error("`{command}` expects {expected}")]
    Arity {
        /// Name of the command.
        command: &'static str,
        /// Human readable description of the expected arguments.
        expected: &'static str,
    },
    /// An argument could not be parsed as a key.
    #[error("cannot parse key `{0}`")]
    InvalidKey(String),
    /// A checked update was refused.
    #[error(transparent)]
    Update(#[from] UpdateError),
    /// A `check` command found a broken invariant.
    #[error("invariant check failed: {0}")]
    Invariant(#[from] InvariantError),
    /// Reading the script failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Wraps any of the above with the 1-based line it came from.
    #[error("line {line}: {source}")]
    Line {
        /// 1-based line number in the script.
        line: usize,
        /// What went wrong on that line.
        #[source]
        source: Box<ScriptError>,
    },
}
