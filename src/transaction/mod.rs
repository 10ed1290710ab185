//! The finalized, signed `Transaction` and its multi-gate verifier.

pub mod builder;

pub use builder::{ClearInputSpec, OutputSpec, ShieldedInputSpec, TransactionBuilder};

use std::io::{self, Write};

use log::{debug, error};

use crate::curve::{commit, FieldElem, Point, Scalar};
use crate::error::Error;
use crate::keys::{PublicKey, SchnorrPublic, Signature};
use crate::note::Note;
use crate::proof::{BurnProof, BurnRevealed, MintProof, MintRevealed};
use crate::serial::Encodable;

#[derive(Clone, Debug)]
pub struct TxClearInput {
    pub value: u64,
    pub token_id: FieldElem,
    pub value_blind: Scalar,
    pub token_blind: Scalar,
    pub signature_public: PublicKey,
    pub signature: Signature,
}

#[derive(Clone, Debug)]
pub struct TxInput {
    pub burn_proof: BurnProof,
    pub revealed: BurnRevealed,
    pub signature: Signature,
}

#[derive(Clone, Debug)]
pub struct TxOutput {
    pub mint_proof: MintProof,
    pub revealed: MintRevealed,
    pub enc_note: Note,
}

/// A fully-built, signed transaction. Immutable once constructed — there is
/// no public way to mutate a `Transaction` after `TransactionBuilder::build`
/// returns one.
#[derive(Clone, Debug)]
pub struct Transaction {
    pub clear_inputs: Vec<TxClearInput>,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    /// A deterministic byte encoding covering every field of the
    /// transaction except signatures. Computed identically at signing
    /// time and at verification time, so both sides agree on exactly
    /// what was signed.
    pub fn partial_encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_unsigned(&mut buf).expect("encoding to a Vec<u8> is infallible");
        buf
    }

    fn encode_unsigned<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut n = (self.clear_inputs.len() as u64).encode(w)?;
        for input in &self.clear_inputs {
            n += input.value.encode(w)?;
            n += input.token_id.encode(w)?;
            n += input.value_blind.encode(w)?;
            n += input.token_blind.encode(w)?;
            n += input.signature_public.encode(w)?;
        }

        n += (self.inputs.len() as u64).encode(w)?;
        for input in &self.inputs {
            n += input.burn_proof.encode(w)?;
            n += input.revealed.encode(w)?;
        }

        n += (self.outputs.len() as u64).encode(w)?;
        for output in &self.outputs {
            n += output.mint_proof.encode(w)?;
            n += output.revealed.encode(w)?;
            n += output.enc_note.encode(w)?;
        }

        Ok(n)
    }

    /// Runs the value-balance, proof, token-uniformity and signature
    /// gates in order and returns `(ok, reason)`. Signature failure is
    /// reported as `(false, None)` without naming the offending input;
    /// callers that want a named reason for every failure, including
    /// signatures, should use [`Transaction::verify_detailed`].
    pub fn verify(&self) -> (bool, Option<&'static str>) {
        if self.outputs.is_empty() {
            return (false, Some("transaction has no outputs"));
        }
        if !self.check_value_commits() {
            return (false, Some("value commits do not match"));
        }
        if !self.check_proofs() {
            return (false, Some("proofs failed to verify"));
        }
        if !self.check_token_commitments() {
            return (false, Some("token ID mismatch"));
        }

        let msg = self.partial_encode();
        for input in &self.clear_inputs {
            if !input.signature_public.verify(&msg, &input.signature) {
                return (false, None);
            }
        }
        for input in &self.inputs {
            let public = PublicKey::from(input.revealed.signature_public);
            if !public.verify(&msg, &input.signature) {
                return (false, None);
            }
        }

        (true, None)
    }

    /// Same gates as [`Transaction::verify`], surfaced as a typed
    /// [`Error`] with the signing input's index for signature failures.
    pub fn verify_detailed(&self) -> Result<(), Error> {
        if self.outputs.is_empty() {
            return Err(Error::EmptyOutputs);
        }
        if !self.check_value_commits() {
            return Err(Error::ValueCommitMismatch);
        }
        if !self.check_proofs() {
            return Err(Error::ProofInvalid);
        }
        if !self.check_token_commitments() {
            return Err(Error::TokenMismatch);
        }

        let msg = self.partial_encode();
        for (i, input) in self.clear_inputs.iter().enumerate() {
            if !input.signature_public.verify(&msg, &input.signature) {
                return Err(Error::SignatureInvalid(i));
            }
        }
        let offset = self.clear_inputs.len();
        for (i, input) in self.inputs.iter().enumerate() {
            let public = PublicKey::from(input.revealed.signature_public);
            if !public.verify(&msg, &input.signature) {
                return Err(Error::SignatureInvalid(offset + i));
            }
        }

        Ok(())
    }

    fn check_value_commits(&self) -> bool {
        let mut total = Point::identity();
        for input in &self.clear_inputs {
            total = total + commit(Scalar::from_u64(input.value), input.value_blind);
        }
        for input in &self.inputs {
            total = total + input.revealed.value_commit;
        }
        for output in &self.outputs {
            total = total + output.revealed.value_commit.negate();
        }
        let ok = total == Point::identity();
        if !ok {
            debug!(target: "zswap_core::transaction", "value commit imbalance");
        }
        ok
    }

    fn check_proofs(&self) -> bool {
        for input in &self.inputs {
            if !input.burn_proof.verify(&input.revealed) {
                error!(target: "zswap_core::transaction", "burn proof failed to verify");
                return false;
            }
        }
        for output in &self.outputs {
            if !output.mint_proof.verify(&output.revealed) {
                error!(target: "zswap_core::transaction", "mint proof failed to verify");
                return false;
            }
        }
        true
    }

    fn check_token_commitments(&self) -> bool {
        debug_assert!(!self.outputs.is_empty());
        let anchor = self.outputs[0].revealed.token_commit;

        for input in &self.clear_inputs {
            let token_commit = commit(input.token_id.as_scalar(), input.token_blind);
            if token_commit != anchor {
                return false;
            }
        }
        for input in &self.inputs {
            if input.revealed.token_commit != anchor {
                return false;
            }
        }
        for output in &self.outputs {
            if output.revealed.token_commit != anchor {
                return false;
            }
        }
        true
    }
}

impl From<Point> for PublicKey {
    fn from(p: Point) -> Self {
        // BurnRevealed.signature_public is a bare Point; verification
        // needs the Schnorr wrapper around it.
        PublicKey::from_point(p)
    }
}
