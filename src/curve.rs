//! Curve, field and commitment primitives.
//!
//! Wraps the Ristretto group from `curve25519-dalek` with the scalar/base
//! field and Pedersen commitment this crate's proofs are built on. These
//! are plain algebraic instantiations, not a zero-knowledge proving
//! system — there is no circuit or trusted setup here, just group
//! arithmetic and hashing.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};

use curve25519_dalek::constants::{RISTRETTO_BASEPOINT_COMPRESSED, RISTRETTO_BASEPOINT_POINT};
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar as DalekScalar;
use lazy_static::lazy_static;
use rand_core::{CryptoRng, RngCore};
use sha3::{Digest, Sha3_512};

use crate::serial::Encodable;

lazy_static! {
    /// The fixed generator `G` of the Pedersen commitment and of all public keys.
    pub static ref G: Point = Point(RISTRETTO_BASEPOINT_POINT);
    /// The second Pedersen generator `H`, with unknown discrete log relative to `G`.
    pub static ref H: Point =
        Point(RistrettoPoint::from_uniform_bytes(&double_hash(RISTRETTO_BASEPOINT_COMPRESSED.as_bytes())));
    /// Domain-separation tag mixed into every coin hash, so that a coin
    /// hash can never collide with a hash computed for an unrelated
    /// purpose even if the rest of the inputs happened to coincide.
    pub static ref COIN_DOMAIN_TAG: FieldElem =
        FieldElem(DalekScalar::from_bytes_mod_order_wide(&double_hash(b"zswap-core/coin-domain-tag")));
}

fn double_hash(msg: &[u8]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    hasher.update(msg);
    let out = hasher.finalize();
    let mut buf = [0u8; 64];
    buf.copy_from_slice(&out);
    buf
}

/// An element of the curve's scalar field: blinding factors and committed values.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Scalar(pub(crate) DalekScalar);

impl Scalar {
    pub fn zero() -> Self {
        Scalar(DalekScalar::ZERO)
    }

    pub fn from_u64(v: u64) -> Self {
        Scalar(DalekScalar::from(v))
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl std::ops::Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

impl std::iter::Sum for Scalar {
    fn sum<I: Iterator<Item = Scalar>>(iter: I) -> Scalar {
        iter.fold(Scalar::zero(), |a, b| a + b)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", hex_of(&self.to_bytes()))
    }
}

impl Encodable for Scalar {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        w.write_all(&self.to_bytes())?;
        Ok(32)
    }
}

/// An element of the curve's base field: serials, coin blinds, token ids,
/// coin commitments and nullifiers. Kept as a distinct Rust type from
/// [`Scalar`] so the type system tells values and blinding factors apart
/// from the other base-field quantities that flow through a coin, even
/// though both share the same representation here.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FieldElem(pub(crate) DalekScalar);

impl FieldElem {
    pub fn from_u64(v: u64) -> Self {
        FieldElem(DalekScalar::from(v))
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0.to_bytes()
    }

    pub fn as_scalar(self) -> Scalar {
        Scalar(self.0)
    }
}

impl From<Scalar> for FieldElem {
    fn from(s: Scalar) -> Self {
        FieldElem(s.0)
    }
}

impl fmt::Debug for FieldElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElem({})", hex_of(&self.to_bytes()))
    }
}

impl Encodable for FieldElem {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        w.write_all(&self.to_bytes())?;
        Ok(32)
    }
}

/// A curve point. `O`, the group identity, is representable via [`Point::identity`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Point(pub(crate) RistrettoPoint);

impl Point {
    pub fn identity() -> Self {
        Point(RistrettoPoint::default())
    }

    pub fn negate(self) -> Self {
        Point(-self.0)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Splits a point's canonical 32-byte encoding into two field elements.
    /// Ristretto points don't expose affine `(x, y)` coordinates, so coin
    /// hashing instead binds to both halves of the compressed encoding,
    /// which is just as collision-resistant for that purpose.
    pub fn coordinates(self) -> (FieldElem, FieldElem) {
        let bytes = self.to_bytes();
        let mut x_buf = [0u8; 32];
        let mut y_buf = [0u8; 32];
        x_buf[..16].copy_from_slice(&bytes[..16]);
        y_buf[..16].copy_from_slice(&bytes[16..]);
        (
            FieldElem(DalekScalar::from_bytes_mod_order(x_buf)),
            FieldElem(DalekScalar::from_bytes_mod_order(y_buf)),
        )
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl std::ops::Mul<Point> for Scalar {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        Point(self.0 * rhs.0)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", hex_of(&self.to_bytes()))
    }
}

impl Encodable for Point {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        w.write_all(&self.to_bytes())?;
        Ok(32)
    }
}

fn hex_of(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// The Pedersen commitment `commit(v, r) = v*G + r*H`. Homomorphic:
/// `commit(a, x) + commit(b, y) == commit(a + b, x + y)`.
pub fn commit(v: Scalar, r: Scalar) -> Point {
    v * *G + r * *H
}

/// `ff_hash(x_1, .., x_n)`: a collision-resistant hash into the base field.
/// Domain separation is positional — callers fix the arity of each call
/// site and never reorder arguments between distinct logical hashes.
pub fn ff_hash(xs: &[FieldElem]) -> FieldElem {
    let mut hasher = Sha3_512::new();
    for x in xs {
        hasher.update(x.to_bytes());
    }
    let digest = hasher.finalize();
    let mut buf = [0u8; 64];
    buf.copy_from_slice(&digest);
    FieldElem(DalekScalar::from_bytes_mod_order_wide(&buf))
}

/// Source of the randomness a transaction build consumes: scalar and
/// base-field sampling. Production code uses [`OsRngAdapter`]; tests
/// substitute [`ChaChaAdapter`] for determinism.
pub trait CurveAdapter {
    fn random_scalar(&self) -> Scalar;
    fn random_base(&self) -> FieldElem;
}

/// Production adapter backed by the operating system's CSPRNG.
#[derive(Default, Clone, Copy)]
pub struct OsRngAdapter;

impl CurveAdapter for OsRngAdapter {
    fn random_scalar(&self) -> Scalar {
        let mut rng = rand::rngs::OsRng;
        Scalar(DalekScalar::random(&mut rng))
    }

    fn random_base(&self) -> FieldElem {
        let mut rng = rand::rngs::OsRng;
        FieldElem(DalekScalar::random(&mut rng))
    }
}

/// Deterministic adapter for tests: wraps a seeded RNG so that builds are
/// reproducible across runs.
pub struct ChaChaAdapter<R> {
    rng: RefCell<R>,
}

impl<R: RngCore + CryptoRng> ChaChaAdapter<R> {
    pub fn new(rng: R) -> Self {
        ChaChaAdapter { rng: RefCell::new(rng) }
    }
}

impl<R: RngCore + CryptoRng> CurveAdapter for ChaChaAdapter<R> {
    fn random_scalar(&self) -> Scalar {
        Scalar(DalekScalar::random(&mut *self.rng.borrow_mut()))
    }

    fn random_base(&self) -> FieldElem {
        FieldElem(DalekScalar::random(&mut *self.rng.borrow_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_is_homomorphic() {
        let adapter = OsRngAdapter;
        let a = Scalar::from_u64(7);
        let b = Scalar::from_u64(35);
        let x = adapter.random_scalar();
        let y = adapter.random_scalar();

        let lhs = commit(a, x) + commit(b, y);
        let rhs = commit(a + b, x + y);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn identity_is_additive_identity() {
        let p = OsRngAdapter.random_scalar() * *G;
        assert_eq!(p + Point::identity(), p);
        assert_eq!(p + p.negate(), Point::identity());
    }

    #[test]
    fn ff_hash_is_deterministic() {
        let a = OsRngAdapter.random_base();
        let b = OsRngAdapter.random_base();
        assert_eq!(ff_hash(&[a, b]), ff_hash(&[a, b]));
        assert_ne!(ff_hash(&[a, b]), ff_hash(&[b, a]));
    }
}
