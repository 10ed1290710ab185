//! `BurnProof`: the witness proving possession and membership of a
//! previously-minted note, plus its public projection, `BurnRevealed`.

use std::io::{self, Write};

use crate::coinset::CoinSet;
use crate::curve::{commit, ff_hash, FieldElem, Point, Scalar, G};
use crate::serial::Encodable;

use super::coin_hash;

#[derive(Clone, Debug)]
pub struct BurnProof {
    pub value: u64,
    pub token_id: FieldElem,
    pub value_blind: Scalar,
    pub token_blind: Scalar,
    pub serial: FieldElem,
    pub coin_blind: FieldElem,
    pub secret: Scalar,
    pub depends: FieldElem,
    pub attrs: FieldElem,
    pub all_coins: CoinSet,
    pub signature_secret: Scalar,
}

#[derive(Clone, Debug)]
pub struct BurnRevealed {
    pub nullifier: FieldElem,
    pub value_commit: Point,
    pub token_commit: Point,
    pub all_coins: CoinSet,
    pub signature_public: Point,
}

impl PartialEq for BurnRevealed {
    fn eq(&self, other: &Self) -> bool {
        self.nullifier == other.nullifier
            && self.value_commit == other.value_commit
            && self.token_commit == other.token_commit
            && self.all_coins == other.all_coins
            && self.signature_public == other.signature_public
    }
}
impl Eq for BurnRevealed {}

impl Encodable for BurnRevealed {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut n = self.nullifier.encode(w)?;
        n += self.value_commit.encode(w)?;
        n += self.token_commit.encode(w)?;
        n += self.all_coins.encode(w)?;
        n += self.signature_public.encode(w)?;
        Ok(n)
    }
}

impl Encodable for BurnProof {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut n = self.value.encode(w)?;
        n += self.token_id.encode(w)?;
        n += self.value_blind.encode(w)?;
        n += self.token_blind.encode(w)?;
        n += self.serial.encode(w)?;
        n += self.coin_blind.encode(w)?;
        n += self.depends.encode(w)?;
        n += self.attrs.encode(w)?;
        n += self.all_coins.encode(w)?;
        Ok(n)
        // `secret` and `signature_secret` are intentionally not encoded:
        // the message a transaction signs and verifies over is treated as
        // public, so spending keys never flow into it.
    }
}

impl BurnProof {
    /// The public view a verifier checks the proof against.
    pub fn reveal(&self) -> BurnRevealed {
        BurnRevealed {
            nullifier: ff_hash(&[self.secret.into(), self.serial]),
            value_commit: commit(Scalar::from_u64(self.value), self.value_blind),
            token_commit: commit(self.token_id.as_scalar(), self.token_blind),
            all_coins: self.all_coins.clone(),
            signature_public: self.signature_secret * *G,
        }
    }

    /// 1. Re-derives the owner's public key from `secret`.
    /// 2. Recomputes the coin commitment and checks it is a member of `all_coins`.
    /// 3. Recomputes `reveal()` and compares every field against `claim`.
    pub fn verify(&self, claim: &BurnRevealed) -> bool {
        let pk = self.secret * *G;
        let coin = coin_hash(
            pk,
            self.value,
            self.token_id,
            self.serial,
            self.coin_blind,
            self.depends,
            self.attrs,
        );
        if !self.all_coins.contains(&coin) {
            return false;
        }
        &self.reveal() == claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurveAdapter, OsRngAdapter};

    fn minted_coin(
        adapter: &dyn CurveAdapter,
        value: u64,
        token_id: FieldElem,
        serial: FieldElem,
        coin_blind: FieldElem,
        depends: FieldElem,
        attrs: FieldElem,
        owner_secret: Scalar,
    ) -> FieldElem {
        let pk = owner_secret * *G;
        let _ = adapter;
        super::coin_hash(pk, value, token_id, serial, coin_blind, depends, attrs)
    }

    fn sample_proof(adapter: &dyn CurveAdapter, all_coins: CoinSet) -> BurnProof {
        BurnProof {
            value: 10,
            token_id: adapter.random_base(),
            value_blind: adapter.random_scalar(),
            token_blind: adapter.random_scalar(),
            serial: adapter.random_base(),
            coin_blind: adapter.random_base(),
            secret: adapter.random_scalar(),
            depends: adapter.random_base(),
            attrs: adapter.random_base(),
            all_coins,
            signature_secret: adapter.random_scalar(),
        }
    }

    #[test]
    fn valid_membership_verifies() {
        let adapter = OsRngAdapter;
        let mut proof = sample_proof(&adapter, CoinSet::new());
        let coin = minted_coin(
            &adapter,
            proof.value,
            proof.token_id,
            proof.serial,
            proof.coin_blind,
            proof.depends,
            proof.attrs,
            proof.secret,
        );
        proof.all_coins.insert(coin);
        let revealed = proof.reveal();
        assert!(proof.verify(&revealed));
    }

    #[test]
    fn foreign_coin_fails_membership() {
        let adapter = OsRngAdapter;
        let proof = sample_proof(&adapter, CoinSet::new());
        let revealed = proof.reveal();
        assert!(!proof.verify(&revealed));
    }

    #[test]
    fn nullifier_is_deterministic_for_fixed_secret_and_serial() {
        let secret = OsRngAdapter.random_scalar();
        let serial = OsRngAdapter.random_base();
        let a = ff_hash(&[secret.into(), serial]);
        let b = ff_hash(&[secret.into(), serial]);
        assert_eq!(a, b);
    }
}
