//! ZK13 discrete-log proof engine.
//!
//! The prover shows consistent use of a secret exponent `Hs` over a safe-ish
//! prime modulus: it publishes `r = g^k` and `P = g^((Hs·k) mod (p-1))`, and
//! the verifier checks `r^Hs = P (mod p)`.
//!
//! # Witness visibility
//!
//! The verifier needs `Hs` itself to run the check. The construction binds a
//! proof to an exponent both parties already hold; it does not hide `Hs` from
//! the verifier and is not a general zero-knowledge proof of knowledge. Only
//! the nonce `k` stays private. Anyone verifying must be trusted with `Hs`.

/// Modulus/generator selection and configuration.
pub mod params;
/// Proof pair and its text form.
pub mod proof;
/// Prover implementation.
pub mod prover;
/// Verifier implementation.
pub mod verifier;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

pub use params::{GroupParameters, ParameterGenerator, Zk13Config};
pub use proof::{ProofPair, PROOF_DELIMITER};
pub use prover::Prover;
pub use verifier::{verify_with_exponent, Verifier};

use crate::primitives::hash::{Blake3Wide, SecretHasher};
use crate::Result;

/// A ZK13 instance owning its parameters `(p, g)` and hash-exponent `Hs`.
#[derive(Clone, Debug)]
pub struct Zk13 {
    params: GroupParameters,
    hash_exponent: BigUint,
}

impl Zk13 {
    /// Generates fresh parameters of `bits` bits and hashes `secret` with BLAKE3.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use zk13::{SecureRng, Zk13};
    ///
    /// let mut rng = SecureRng::new();
    /// let zk = Zk13::new(b"test_secret", 256, &mut rng).unwrap();
    /// let proof = zk.prove(&mut rng).unwrap();
    /// assert!(zk.verify(&proof));
    /// ```
    pub fn new<R: CryptoRngCore>(secret: &[u8], bits: u64, rng: &mut R) -> Result<Self> {
        Self::with_config(secret, bits, &Zk13Config::default(), &Blake3Wide, rng)
    }

    /// Generates fresh parameters under `config` and derives `Hs` with `hasher`.
    pub fn with_config<H, R>(
        secret: &[u8],
        bits: u64,
        config: &Zk13Config,
        hasher: &H,
        rng: &mut R,
    ) -> Result<Self>
    where
        H: SecretHasher + ?Sized,
        R: CryptoRngCore,
    {
        let params = ParameterGenerator::new(config.clone()).generate(bits, rng)?;
        Ok(Self::with_parameters(params, hasher.hash_exponent(secret)))
    }

    /// Builds an engine over existing parameters.
    pub fn with_parameters(params: GroupParameters, hash_exponent: BigUint) -> Self {
        Self {
            params,
            hash_exponent,
        }
    }

    /// Returns the group parameters.
    pub fn params(&self) -> &GroupParameters {
        &self.params
    }

    /// Returns the hash-exponent `Hs`.
    pub fn hash_exponent(&self) -> &BigUint {
        &self.hash_exponent
    }

    /// Produces a proof pair with a fresh nonce.
    pub fn prove<R: CryptoRngCore>(&self, rng: &mut R) -> Result<ProofPair> {
        Prover::new(&self.params, &self.hash_exponent).prove(rng)
    }

    /// Checks a proof pair against this engine's `p` and `Hs`.
    pub fn verify(&self, proof: &ProofPair) -> bool {
        Verifier::new(&self.params, &self.hash_exponent).verify(proof)
    }
}
