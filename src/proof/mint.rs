//! `MintProof`: the witness backing a freshly-created output, and its
//! public projection, `MintRevealed`.

use std::io::{self, Write};

use crate::curve::{commit, FieldElem, Point, Scalar};
use crate::serial::Encodable;

use super::coin_hash;

#[derive(Clone, Copy, Debug)]
pub struct MintProof {
    pub value: u64,
    pub token_id: FieldElem,
    pub value_blind: Scalar,
    pub token_blind: Scalar,
    pub serial: FieldElem,
    pub coin_blind: FieldElem,
    pub recipient_public: Point,
    pub depends: FieldElem,
    pub attrs: FieldElem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintRevealed {
    pub coin: FieldElem,
    pub value_commit: Point,
    pub token_commit: Point,
}

impl Encodable for MintRevealed {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut n = self.coin.encode(w)?;
        n += self.value_commit.encode(w)?;
        n += self.token_commit.encode(w)?;
        Ok(n)
    }
}

impl Encodable for MintProof {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut n = self.value.encode(w)?;
        n += self.token_id.encode(w)?;
        n += self.value_blind.encode(w)?;
        n += self.token_blind.encode(w)?;
        n += self.serial.encode(w)?;
        n += self.coin_blind.encode(w)?;
        n += self.recipient_public.encode(w)?;
        n += self.depends.encode(w)?;
        n += self.attrs.encode(w)?;
        Ok(n)
    }
}

impl MintProof {
    /// The public view a verifier checks the proof against.
    pub fn reveal(&self) -> MintRevealed {
        MintRevealed {
            coin: coin_hash(
                self.recipient_public,
                self.value,
                self.token_id,
                self.serial,
                self.coin_blind,
                self.depends,
                self.attrs,
            ),
            value_commit: commit(Scalar::from_u64(self.value), self.value_blind),
            token_commit: commit(self.token_id.as_scalar(), self.token_blind),
        }
    }

    /// Recomputes `reveal()` and compares it against the claimed public
    /// values. Does not check that `value` fits any particular range or
    /// that `recipient_public` is a valid destination — a real proving
    /// system would enforce those as circuit constraints; here they are
    /// left to whatever policy layer consumes this core.
    pub fn verify(&self, claim: &MintRevealed) -> bool {
        &self.reveal() == claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurveAdapter, OsRngAdapter};

    fn sample_proof(adapter: &dyn CurveAdapter) -> MintProof {
        MintProof {
            value: 42,
            token_id: adapter.random_base(),
            value_blind: adapter.random_scalar(),
            token_blind: adapter.random_scalar(),
            serial: adapter.random_base(),
            coin_blind: adapter.random_base(),
            recipient_public: adapter.random_scalar() * *crate::curve::G,
            depends: adapter.random_base(),
            attrs: adapter.random_base(),
        }
    }

    #[test]
    fn self_consistent_proof_verifies() {
        let proof = sample_proof(&OsRngAdapter);
        let revealed = proof.reveal();
        assert!(proof.verify(&revealed));
    }

    #[test]
    fn coin_is_deterministic_for_fixed_witness() {
        let proof = sample_proof(&OsRngAdapter);
        assert_eq!(proof.reveal().coin, proof.reveal().coin);
    }

    #[test]
    fn tampered_value_fails() {
        let proof = sample_proof(&OsRngAdapter);
        let mut revealed = proof.reveal();
        revealed.coin = OsRngAdapter.random_base();
        assert!(!proof.verify(&revealed));
    }
}
