//! Error kinds surfaced by the transaction core.
//!
//! One variant per verification failure, carrying an index where the
//! failure points at a specific input.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Raised by `build()` with zero outputs, and by `verify()` on a
    /// transaction that was somehow constructed with none.
    #[error("transaction has no outputs")]
    EmptyOutputs,

    /// `verify()` gate 1: value commitments across the transaction do not
    /// sum to the identity point.
    #[error("value commits do not match")]
    ValueCommitMismatch,

    /// `verify()` gate 2: a mint or burn proof is inconsistent with its
    /// revealed public outputs.
    #[error("proofs failed to verify")]
    ProofInvalid,

    /// `verify()` gate 3: not every clear input, shielded input and output
    /// shares the same token commitment.
    #[error("token ID mismatch")]
    TokenMismatch,

    /// `verify()` gate 4: a clear or shielded input's signature does not
    /// verify against its disclosed public key. [`crate::transaction::Transaction::verify`]
    /// reports this case without an index; [`crate::transaction::Transaction::verify_detailed`]
    /// names the offending input.
    #[error("invalid signature for input {0}")]
    SignatureInvalid(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
