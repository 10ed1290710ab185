//! Mint and burn proof objects: the witnesses behind a transaction's
//! outputs and shielded inputs.
//!
//! Both proofs share the shape `reveal() -> R, verify(R) -> bool` with a
//! distinct `R` per kind. They are modeled as two independent types
//! rather than behind a shared abstract `Proof` trait, since the
//! revealed payloads differ in both fields and semantics — a mint's
//! `coin` has no nullifier, a burn's nullifier has no recipient key.

pub mod burn;
pub mod mint;

pub use burn::{BurnProof, BurnRevealed};
pub use mint::{MintProof, MintRevealed};

use crate::curve::{FieldElem, Point};

/// `coin = ff_hash(domain_tag, pk.x, pk.y, value, token_id, serial, coin_blind, depends, attrs)`.
///
/// Shared by [`MintProof::reveal`] (with the recipient's public key) and
/// [`BurnProof::verify`] (with the public key re-derived from the spending
/// secret) — both sides must compute the exact same coin commitment for a
/// burn to successfully prove membership of a coin minted earlier.
#[allow(clippy::too_many_arguments)]
pub(crate) fn coin_hash(
    pk: Point,
    value: u64,
    token_id: FieldElem,
    serial: FieldElem,
    coin_blind: FieldElem,
    depends: FieldElem,
    attrs: FieldElem,
) -> FieldElem {
    let (x, y) = pk.coordinates();
    let value = FieldElem::from_u64(value);
    crate::curve::ff_hash(&[
        *crate::curve::COIN_DOMAIN_TAG,
        x,
        y,
        value,
        token_id,
        serial,
        coin_blind,
        depends,
        attrs,
    ])
}
