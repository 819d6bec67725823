use avl::BalancedTree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts, rekeys,
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut BalancedTree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Remove(k) => {
                bst.remove(k);
                set.remove(k);
            }
            Op::Update(old, new) => {
                if bst.try_update(old, new.clone()).is_ok() {
                    set.remove(old);
                    set.insert(new.clone());
                }
            }
        }
    }
}

/// The most levels an AVL tree of `len` keys can have.
fn height_bound(len: usize) -> f64 {
    1.45 * ((len + 2) as f64).log2()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = BalancedTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.check_invariants().is_ok()
        && tree.len() == set.len()
        && tree.keys().into_iter().eq(set)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: BalancedTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|n| n.key()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: BalancedTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: BalancedTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same key multiple times - drop each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    tree.check_invariants().is_ok()
        && deletes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.search(x).is_some())
}

#[quickcheck]
fn duplicate_insert_is_ignored(xs: Vec<i16>, again: usize) -> bool {
    let mut tree: BalancedTree<_> = xs.iter().copied().collect();
    let before: Vec<_> = tree.pre_order().copied().collect();
    let len = tree.len();

    if let Some(x) = xs.get(again % xs.len().max(1)) {
        tree.insert(*x);
    }

    tree.len() == len && tree.pre_order().copied().eq(before)
}

#[quickcheck]
fn height_stays_logarithmic(xs: Vec<u16>) -> bool {
    let tree: BalancedTree<_> = xs.into_iter().collect();

    tree.height() as f64 <= height_bound(tree.len())
}

#[quickcheck]
fn sorted_inserts_stay_logarithmic(len: u16) -> bool {
    let len = len % 2048;
    let tree: BalancedTree<_> = (0..len).collect();

    tree.check_invariants().is_ok()
        && tree.height() as f64 <= height_bound(tree.len())
        && tree.iter().copied().eq(0..len)
}

#[quickcheck]
fn pre_order_visits_every_key_once(xs: Vec<i8>) -> bool {
    let tree: BalancedTree<_> = xs.iter().copied().collect();
    let mut visited: Vec<_> = tree.pre_order().copied().collect();
    visited.sort_unstable();

    visited == tree.keys()
        && tree.root().map(|n| *n.key()) == tree.pre_order().next().copied()
}
