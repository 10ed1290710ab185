//! A confidential, shielded-UTXO transaction core: builder, mint/burn
//! proof objects and a multi-gate verifier.
//!
//! The proofs in this crate are plain algebraic witnesses, not
//! zero-knowledge proofs — they reveal the data a real proof system
//! would hide. Initializing a logger is left to whatever binary embeds
//! this crate; the library only emits `log` records.

pub mod coinset;
pub mod curve;
pub mod error;
pub mod keys;
pub mod note;
pub mod proof;
pub mod serial;
pub mod transaction;

pub use coinset::CoinSet;
pub use curve::{commit, ff_hash, ChaChaAdapter, CurveAdapter, FieldElem, OsRngAdapter, Point, Scalar};
pub use error::{Error, Result};
pub use keys::{sign, verify, PublicKey, SchnorrPublic, SchnorrSecret, SecretKey, Signature};
pub use note::Note;
pub use proof::{BurnProof, BurnRevealed, MintProof, MintRevealed};
pub use serial::{encode_to_vec, Encodable};
pub use transaction::{
    ClearInputSpec, OutputSpec, ShieldedInputSpec, Transaction, TransactionBuilder, TxClearInput,
    TxInput, TxOutput,
};
