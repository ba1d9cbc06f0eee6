use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::trace;

use super::{GroupParameters, ProofPair};
use crate::primitives::rng::random_below;
use crate::{Error, Result};

/// Prover for ZK13.
///
/// Produces `(r, P)` with `r = g^k` and `P = g^((Hs·k) mod (p-1))`, so that
/// `r^Hs = P (mod p)` holds without `k` leaving the prover.
///
/// # Security
///
/// - `k` is drawn fresh from the supplied RNG on every call and never stored
/// - Use [`SecureRng`](crate::SecureRng) or another CSPRNG
pub struct Prover<'a> {
    params: &'a GroupParameters,
    hash_exponent: &'a BigUint,
}

impl<'a> Prover<'a> {
    /// Creates a prover over `params` for the hash-exponent `Hs`.
    pub fn new(params: &'a GroupParameters, hash_exponent: &'a BigUint) -> Self {
        Self {
            params,
            hash_exponent,
        }
    }

    /// Generates a proof pair.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParams`] if the modulus is below 3
    /// - [`Error::Entropy`] if the RNG fails
    pub fn prove<R: CryptoRngCore>(&self, rng: &mut R) -> Result<ProofPair> {
        if self.params.modulus() < &BigUint::from(3u32) {
            return Err(Error::InvalidParams(
                "modulus must be at least 3".to_string(),
            ));
        }
        let k = random_below(rng, self.params.modulus())?;
        let proof = self.prove_with_nonce(&k);
        trace!("generated ZK13 proof");
        Ok(proof)
    }

    fn prove_with_nonce(&self, k: &BigUint) -> ProofPair {
        let r = self.calculate_r(k);
        let f = self.calculate_f(k);
        let big_p = self.calculate_p(&f);
        ProofPair::new(r, big_p)
    }

    /// `r = g^k mod p`
    fn calculate_r(&self, k: &BigUint) -> BigUint {
        self.params.generator().modpow(k, self.params.modulus())
    }

    /// `F = Hs·k mod (p - 1)`
    fn calculate_f(&self, k: &BigUint) -> BigUint {
        (self.hash_exponent * k) % self.params.order()
    }

    /// `P = g^F mod p`
    fn calculate_p(&self, f: &BigUint) -> BigUint {
        self.params.generator().modpow(f, self.params.modulus())
    }
}
