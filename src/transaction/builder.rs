//! `TransactionBuilder`: arranges clear inputs, shielded inputs and
//! outputs so that the sum of value-commitment blinding factors balances
//! exactly to zero, then signs the result.

use log::debug;

use crate::coinset::CoinSet;
use crate::curve::{CurveAdapter, FieldElem, Scalar};
use crate::error::Error;
use crate::keys::{PublicKey, SchnorrSecret, SecretKey};
use crate::note::Note;
use crate::proof::{BurnProof, MintProof};

use super::{Transaction, TxClearInput, TxInput, TxOutput};

pub struct ClearInputSpec {
    pub value: u64,
    pub token_id: FieldElem,
    pub signature_secret: SecretKey,
}

pub struct ShieldedInputSpec {
    pub all_coins: CoinSet,
    pub secret: Scalar,
    pub note: Note,
}

pub struct OutputSpec {
    pub value: u64,
    pub token_id: FieldElem,
    pub recipient_public: PublicKey,
    pub depends: FieldElem,
    pub attrs: FieldElem,
}

pub struct TransactionBuilder<'a> {
    adapter: &'a dyn CurveAdapter,
    clear_inputs: Vec<ClearInputSpec>,
    inputs: Vec<ShieldedInputSpec>,
    outputs: Vec<OutputSpec>,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(adapter: &'a dyn CurveAdapter) -> Self {
        TransactionBuilder { adapter, clear_inputs: vec![], inputs: vec![], outputs: vec![] }
    }

    pub fn add_clear_input(&mut self, value: u64, token_id: FieldElem, signature_secret: SecretKey) {
        self.clear_inputs.push(ClearInputSpec { value, token_id, signature_secret });
    }

    pub fn add_input(&mut self, all_coins: CoinSet, secret: Scalar, note: Note) {
        self.inputs.push(ShieldedInputSpec { all_coins, secret, note });
    }

    pub fn add_output(
        &mut self,
        value: u64,
        token_id: FieldElem,
        recipient_public: PublicKey,
        depends: FieldElem,
        attrs: FieldElem,
    ) {
        self.outputs.push(OutputSpec { value, token_id, recipient_public, depends, attrs });
    }

    fn compute_remainder_blind(
        clear_inputs: &[TxClearInput],
        input_blinds: &[Scalar],
        output_blinds: &[Scalar],
    ) -> Scalar {
        let mut total = clear_inputs.iter().map(|c| c.value_blind).sum::<Scalar>();
        total = total + input_blinds.iter().copied().sum::<Scalar>();
        for blind in output_blinds {
            total = total - *blind;
        }
        total
    }

    /// Runs the build algorithm: shared token blind, clear inputs,
    /// shielded inputs, outputs closing the balance equation, mint
    /// self-checks, then signing.
    pub fn build(self) -> Result<Transaction, Error> {
        if self.outputs.is_empty() {
            return Err(Error::EmptyOutputs);
        }

        // Step 1: one token blind shared by every clear input and output.
        let token_blind = self.adapter.random_scalar();

        // Step 2: clear inputs.
        let mut clear_inputs = Vec::with_capacity(self.clear_inputs.len());
        for spec in &self.clear_inputs {
            clear_inputs.push(TxClearInput {
                value: spec.value,
                token_id: spec.token_id,
                value_blind: self.adapter.random_scalar(),
                token_blind,
                signature_public: spec.signature_secret.public(),
                // placeholder until signing, replaced in step 6.
                signature: spec.signature_secret.sign(&[]),
            });
        }

        // Step 3: shielded inputs. Each reuses its note's own value_blind
        // and token_blind rather than sampling fresh ones, so the burn
        // proof's value commitment matches the commitment the note was
        // originally minted with.
        let mut inputs = Vec::with_capacity(self.inputs.len());
        let mut input_blinds = Vec::with_capacity(self.inputs.len());
        let mut input_signature_secrets = Vec::with_capacity(self.inputs.len());
        for spec in &self.inputs {
            input_blinds.push(spec.note.value_blind);
            let signature_secret = SecretKey::from_scalar(self.adapter.random_scalar());

            let burn_proof = BurnProof {
                value: spec.note.value,
                token_id: spec.note.token_id,
                value_blind: spec.note.value_blind,
                token_blind: spec.note.token_blind,
                serial: spec.note.serial,
                coin_blind: spec.note.coin_blind,
                secret: spec.secret,
                depends: spec.note.depends,
                attrs: spec.note.attrs,
                all_coins: spec.all_coins.clone(),
                signature_secret: signature_secret.0,
            };
            let revealed = burn_proof.reveal();

            inputs.push(TxInput {
                burn_proof,
                revealed,
                // placeholder until signing, replaced in step 6.
                signature: signature_secret.sign(&[]),
            });
            input_signature_secrets.push(signature_secret);
        }

        // Step 4: outputs, closing the value-balance equation on the last one.
        let mut outputs = Vec::with_capacity(self.outputs.len());
        let mut output_blinds: Vec<Scalar> = Vec::with_capacity(self.outputs.len());
        let last = self.outputs.len() - 1;

        for (i, spec) in self.outputs.iter().enumerate() {
            let value_blind = if i == last {
                Self::compute_remainder_blind(&clear_inputs, &input_blinds, &output_blinds)
            } else {
                self.adapter.random_scalar()
            };
            output_blinds.push(value_blind);

            // Step 5: output note and mint proof.
            let note = Note {
                serial: self.adapter.random_base(),
                value: spec.value,
                token_id: spec.token_id,
                coin_blind: self.adapter.random_base(),
                value_blind,
                token_blind,
                depends: spec.depends,
                attrs: spec.attrs,
            };

            let mint_proof = MintProof {
                value: note.value,
                token_id: note.token_id,
                value_blind: note.value_blind,
                token_blind: note.token_blind,
                serial: note.serial,
                coin_blind: note.coin_blind,
                recipient_public: spec.recipient_public.point(),
                depends: note.depends,
                attrs: note.attrs,
            };
            let revealed = mint_proof.reveal();
            debug_assert!(mint_proof.verify(&revealed), "mint proof must self-verify at build time");

            outputs.push(TxOutput { mint_proof, revealed, enc_note: note });
        }

        let mut tx = Transaction { clear_inputs, inputs, outputs };

        // Step 6: sign the unsigned encoding and attach real signatures.
        let msg = tx.partial_encode();
        for (input, spec) in tx.clear_inputs.iter_mut().zip(&self.clear_inputs) {
            input.signature = spec.signature_secret.sign(&msg);
        }
        for (input, signature_secret) in tx.inputs.iter_mut().zip(&input_signature_secrets) {
            input.signature = signature_secret.sign(&msg);
        }

        debug!(
            target: "zswap_core::builder",
            "built transaction with {} clear input(s), {} shielded input(s), {} output(s)",
            tx.clear_inputs.len(),
            tx.inputs.len(),
            tx.outputs.len(),
        );

        Ok(tx)
    }
}
