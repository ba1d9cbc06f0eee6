//! Location commitments over Ristretto255.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand_core::CryptoRngCore;

use crate::error::BoxError;
use crate::primitives::ristretto::Ristretto255;

/// Binds an identity's private scalar to encoded location bytes.
pub trait LocationCommitter {
    /// Commits to `location` under `private_key`, returning the blinding randomness and the commitment point.
    fn commit(
        &self,
        private_key: &Scalar,
        location: &[u8],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(Scalar, RistrettoPoint), BoxError>;
}

/// Pedersen-style commitment `C = m·G + (x + r)·H`.
///
/// `m` is the SHA-512 wide reduction of the location bytes, `x` the private
/// key and `r` fresh blinding. Opening requires `x`, so only the key owner can
/// demonstrate the committed location.
#[derive(Clone, Copy, Debug, Default)]
pub struct PedersenCommitter;

impl PedersenCommitter {
    /// Recomputes the commitment from its opening and compares.
    pub fn verify_opening(
        &self,
        private_key: &Scalar,
        randomness: &Scalar,
        location: &[u8],
        commitment: &RistrettoPoint,
    ) -> bool {
        !location.is_empty() && compute(private_key, randomness, location) == *commitment
    }
}

impl LocationCommitter for PedersenCommitter {
    fn commit(
        &self,
        private_key: &Scalar,
        location: &[u8],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(Scalar, RistrettoPoint), BoxError> {
        if location.is_empty() {
            return Err("cannot commit to an empty location".into());
        }
        let randomness = Ristretto255::random_scalar(rng)?;
        let commitment = compute(private_key, &randomness, location);
        Ok((randomness, commitment))
    }
}

fn compute(private_key: &Scalar, randomness: &Scalar, location: &[u8]) -> RistrettoPoint {
    let m = Ristretto255::hash_to_scalar(location);
    Ristretto255::generator_g() * m + Ristretto255::generator_h() * (private_key + randomness)
}
