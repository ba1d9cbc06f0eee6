use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use super::rng::fill_random;
use crate::{Error, Result};

/// Number of bytes in a Ristretto255 scalar or compressed element (32 bytes).
pub const RISTRETTO_BYTES: usize = 32;

/// Number of bytes used for wide scalar reduction (64 bytes).
const WIDE_REDUCTION_BYTES: usize = 64;

/// Domain separation tag for deriving the commitment generator `h`.
///
/// Changing this value produces a different generator and invalidates every
/// existing location commitment.
const GENERATOR_H_DST: &[u8] = b"zk13-geoid-v1-location-commitment-h";

/// Ristretto255, the prime-order group carrying identity keys and location commitments.
#[derive(Clone, Debug)]
pub struct Ristretto255;

impl Ristretto255 {
    /// Returns the standard basepoint.
    pub fn generator_g() -> RistrettoPoint {
        RISTRETTO_BASEPOINT_POINT
    }

    /// Returns a second generator with no known discrete log relative to `g`.
    pub fn generator_h() -> RistrettoPoint {
        let mut hasher = Sha512::new();
        hasher.update(GENERATOR_H_DST);
        RistrettoPoint::from_uniform_bytes(&wide_digest(hasher))
    }

    /// Generates a uniformly random scalar.
    pub fn random_scalar<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Scalar> {
        let mut bytes = [0u8; WIDE_REDUCTION_BYTES];
        fill_random(rng, &mut bytes)?;
        let scalar = Scalar::from_bytes_mod_order_wide(&bytes);
        bytes.zeroize();
        Ok(scalar)
    }

    /// Hashes arbitrary bytes to a scalar with SHA-512 and wide reduction.
    pub fn hash_to_scalar(data: &[u8]) -> Scalar {
        let mut hasher = Sha512::new();
        hasher.update(data);
        Scalar::from_bytes_mod_order_wide(&wide_digest(hasher))
    }

    /// Encodes an element in its 32-byte compressed form.
    pub fn element_to_bytes(element: &RistrettoPoint) -> [u8; RISTRETTO_BYTES] {
        element.compress().to_bytes()
    }

    /// Decodes a compressed element, rejecting non-canonical encodings.
    pub fn element_from_bytes(bytes: &[u8]) -> Result<RistrettoPoint> {
        if bytes.len() != RISTRETTO_BYTES {
            return Err(Error::PointDecoding(format!(
                "Expected {} bytes, got {}",
                RISTRETTO_BYTES,
                bytes.len()
            )));
        }

        let mut arr = [0u8; RISTRETTO_BYTES];
        arr.copy_from_slice(bytes);

        CompressedRistretto(arr).decompress().ok_or_else(|| {
            Error::PointDecoding("Bytes do not represent a valid Ristretto point".to_string())
        })
    }
}

fn wide_digest(hasher: Sha512) -> [u8; WIDE_REDUCTION_BYTES] {
    let mut bytes = [0u8; WIDE_REDUCTION_BYTES];
    bytes.copy_from_slice(hasher.finalize().as_slice());
    bytes
}

/// Identity key pair. The private scalar is zeroized on drop.
pub struct KeyPair {
    secret: Scalar,
    public: RistrettoPoint,
}

impl KeyPair {
    /// Generates a fresh key pair `(x, x·G)`.
    pub fn generate<R: CryptoRngCore>(rng: &mut R) -> Result<Self> {
        let secret = Ristretto255::random_scalar(rng)?;
        let public = Ristretto255::generator_g() * secret;
        Ok(Self { secret, public })
    }

    /// Returns the private scalar.
    pub fn secret(&self) -> &Scalar {
        &self.secret
    }

    /// Returns the public point.
    pub fn public(&self) -> &RistrettoPoint {
        &self.public
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public.compress())
            .finish_non_exhaustive()
    }
}
