//! Schnorr keys and signatures over the Ristretto group.
//!
//! Every clear and shielded input carries a signing key; a transaction's
//! builder signs the finalized, unsigned encoding once all inputs and
//! outputs are in place, and the verifier checks each input's signature
//! against that same encoding.

use std::io::{self, Write};

use curve25519_dalek::scalar::Scalar as DalekScalar;
use sha3::{Digest, Sha3_512};

use crate::curve::{CurveAdapter, Point, Scalar, G};
use crate::serial::Encodable;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SecretKey(pub(crate) Scalar);

impl SecretKey {
    pub fn random(adapter: &dyn CurveAdapter) -> Self {
        SecretKey(adapter.random_scalar())
    }

    pub fn from_scalar(s: Scalar) -> Self {
        SecretKey(s)
    }

    pub fn public(&self) -> PublicKey {
        PublicKey(self.0 * *G)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PublicKey(pub(crate) Point);

impl PublicKey {
    pub fn from_secret(secret: &SecretKey) -> Self {
        secret.public()
    }

    pub fn from_point(p: Point) -> Self {
        PublicKey(p)
    }

    pub fn point(&self) -> Point {
        self.0
    }
}

impl Encodable for PublicKey {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        self.0.encode(w)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Signature {
    r: Point,
    s: Scalar,
}

impl Encodable for Signature {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut n = self.r.encode(w)?;
        n += self.s.encode(w)?;
        Ok(n)
    }
}

/// `e = H(R, pk, msg)`, reduced into the scalar field.
fn challenge(r: &Point, pk: &Point, msg: &[u8]) -> Scalar {
    let mut hasher = Sha3_512::new();
    hasher.update(r.to_bytes());
    hasher.update(pk.to_bytes());
    hasher.update(msg);
    let digest = hasher.finalize();
    let mut buf = [0u8; 64];
    buf.copy_from_slice(&digest);
    Scalar(DalekScalar::from_bytes_mod_order_wide(&buf))
}

/// Nonce for a deterministic Schnorr signature: `k = H(sk, msg)`, analogous
/// to EdDSA's deterministic nonce derivation. Keeps signing reproducible
/// for a fixed key and message without a second RNG call site.
fn nonce(sk: &Scalar, msg: &[u8]) -> Scalar {
    let mut hasher = Sha3_512::new();
    hasher.update(sk.to_bytes());
    hasher.update(msg);
    let digest = hasher.finalize();
    let mut buf = [0u8; 64];
    buf.copy_from_slice(&digest);
    Scalar(DalekScalar::from_bytes_mod_order_wide(&buf))
}

pub trait SchnorrSecret {
    fn sign(&self, msg: &[u8]) -> Signature;
}

pub trait SchnorrPublic {
    fn verify(&self, msg: &[u8], signature: &Signature) -> bool;
}

impl SchnorrSecret for SecretKey {
    fn sign(&self, msg: &[u8]) -> Signature {
        let pk = self.public().0;
        let k = nonce(&self.0, msg);
        let r = k * *G;
        let e = challenge(&r, &pk, msg);
        let s = k + e * self.0;
        Signature { r, s }
    }
}

impl SchnorrPublic for PublicKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        let e = challenge(&signature.r, &self.0, msg);
        signature.s * *G == signature.r + e * self.0
    }
}

/// Free-function form of [`SchnorrSecret::sign`], for callers that don't
/// want to import the trait.
pub fn sign(msg: &[u8], sk: &SecretKey) -> Signature {
    sk.sign(msg)
}

pub fn verify(msg: &[u8], signature: &Signature, pk: &PublicKey) -> bool {
    pk.verify(msg, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::OsRngAdapter;

    #[test]
    fn sign_then_verify_roundtrips() {
        let sk = SecretKey::random(&OsRngAdapter);
        let pk = sk.public();
        let msg = b"hello shielded world";
        let sig = sk.sign(msg);
        assert!(pk.verify(msg, &sig));
    }

    #[test]
    fn tampered_message_fails() {
        let sk = SecretKey::random(&OsRngAdapter);
        let pk = sk.public();
        let sig = sk.sign(b"hello");
        assert!(!pk.verify(b"goodbye", &sig));
    }

    #[test]
    fn wrong_key_fails() {
        let sk = SecretKey::random(&OsRngAdapter);
        let other = SecretKey::random(&OsRngAdapter);
        let msg = b"hello";
        let sig = sk.sign(msg);
        assert!(!other.public().verify(msg, &sig));
    }
}
