use quickcheck::{Arbitrary, Gen};

mod script;
mod tree;

/// Something to do to a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Remove the K from the tree
    Remove(K),
    /// Rekey the first K to the second through `try_update`
    Update(K, K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Update(K::arbitrary(g), K::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
