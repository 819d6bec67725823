//! Box-drawing rendering of a tree's shape.
//!
//! ```text
//! 40
//! ├─ 20
//! │  ├─ 10
//! │  └─ 30
//! └─ 60
//!    ├─ 50
//!    └─ 70
//!       ├─ ∅
//!       └─ 80
//! ```

use std::fmt;

use crate::arena::{Arena, NodeId};
use crate::BalancedTree;

/// Drawn in place of a missing child when its sibling exists, and for the empty tree.
const EMPTY: &str = "∅";

impl<K> fmt::Display for BalancedTree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            None => f.write_str(EMPTY),
            Some(root) => {
                write!(f, "{}", self.arena[root].key)?;
                print_children(f, &self.arena, root, "")
            }
        }
    }
}

fn print_children<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    arena: &Arena<K>,
    id: NodeId,
    tab: &str,
) -> fmt::Result {
    let node = &arena[id];
    if node.left.is_none() && node.right.is_none() {
        return Ok(());
    }

    for (child, is_last) in [(node.left, false), (node.right, true)] {
        let branch = if is_last { "└─" } else { "├─" };
        write!(f, "\n{tab}{branch} ")?;
        match child {
            Some(child) => {
                write!(f, "{}", arena[child].key)?;
                let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
                print_children(f, arena, child, &child_tab)?;
            }
            None => f.write_str(EMPTY)?,
        }
    }
    Ok(())
}
