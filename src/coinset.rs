//! `CoinSet`: the snapshot of currently-committed coin commitments a
//! shielded input proves membership against.
//!
//! Backed by an explicit `BTreeSet` rather than a Merkle tree — simplest
//! structure that supports membership proofs. Equality is derived from a
//! digest over the sorted set rather than `BTreeSet`'s own element-wise
//! equality, so that comparing two coin sets stays cheap even as they
//! grow large.

use std::collections::BTreeSet;
use std::io::{self, Write};

use sha3::{Digest, Sha3_512};

use crate::curve::FieldElem;
use crate::serial::Encodable;

#[derive(Clone, Debug, Default)]
pub struct CoinSet {
    coins: BTreeSet<[u8; 32]>,
}

impl CoinSet {
    pub fn new() -> Self {
        CoinSet { coins: BTreeSet::new() }
    }

    pub fn insert(&mut self, coin: FieldElem) {
        self.coins.insert(coin.to_bytes());
    }

    pub fn contains(&self, coin: &FieldElem) -> bool {
        self.coins.contains(&coin.to_bytes())
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// A digest over the sorted coin set, used for equality instead of
    /// comparing every element.
    pub fn digest(&self) -> [u8; 64] {
        let mut hasher = Sha3_512::new();
        for coin in &self.coins {
            hasher.update(coin);
        }
        let out = hasher.finalize();
        let mut buf = [0u8; 64];
        buf.copy_from_slice(&out);
        buf
    }
}

impl PartialEq for CoinSet {
    fn eq(&self, other: &Self) -> bool {
        self.digest() == other.digest()
    }
}
impl Eq for CoinSet {}

impl FromIterator<FieldElem> for CoinSet {
    fn from_iter<I: IntoIterator<Item = FieldElem>>(iter: I) -> Self {
        let mut set = CoinSet::new();
        for coin in iter {
            set.insert(coin);
        }
        set
    }
}

impl Encodable for CoinSet {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        w.write_all(&self.digest())?;
        Ok(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::OsRngAdapter;
    use crate::curve::CurveAdapter;

    #[test]
    fn membership_and_equality() {
        let a = OsRngAdapter.random_base();
        let b = OsRngAdapter.random_base();
        let mut set: CoinSet = [a].into_iter().collect();
        assert!(set.contains(&a));
        assert!(!set.contains(&b));

        let mut other = set.clone();
        assert_eq!(set, other);
        other.insert(b);
        assert_ne!(set, other);
        set.insert(b);
        assert_eq!(set, other);
    }
}
