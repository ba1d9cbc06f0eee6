//! Derivation of the proof hash-exponent `Hs` from secret baggage.
//!
//! Whether two identities built from the same secret should be linkable is a
//! caller decision, so the derivation is a trait. [`Blake3Wide`] is unkeyed
//! and therefore links equal secrets; [`KeyedBlake3`] separates them by key.

use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Width of the derived exponent in bytes (512 bits).
pub const HASH_EXPONENT_BYTES: usize = 64;

/// Maps secret baggage to the wide hash-exponent used by the prover and verifier.
pub trait SecretHasher {
    /// Returns the digest of `secret` interpreted as a big-endian unsigned integer.
    fn hash_exponent(&self, secret: &[u8]) -> BigUint;
}

/// Unkeyed BLAKE3 in extendable-output mode, 64 bytes of output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Wide;

impl SecretHasher for Blake3Wide {
    fn hash_exponent(&self, secret: &[u8]) -> BigUint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(secret);
        wide_output(hasher)
    }
}

/// Keyed BLAKE3, so equal secrets under different keys yield unrelated exponents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyedBlake3 {
    key: [u8; 32],
}

impl KeyedBlake3 {
    /// Creates a hasher bound to `key`.
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }
}

impl core::fmt::Debug for KeyedBlake3 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyedBlake3").finish_non_exhaustive()
    }
}

impl SecretHasher for KeyedBlake3 {
    fn hash_exponent(&self, secret: &[u8]) -> BigUint {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(secret);
        wide_output(hasher)
    }
}

impl<H: SecretHasher + ?Sized> SecretHasher for &H {
    fn hash_exponent(&self, secret: &[u8]) -> BigUint {
        (**self).hash_exponent(secret)
    }
}

fn wide_output(hasher: blake3::Hasher) -> BigUint {
    let mut digest = [0u8; HASH_EXPONENT_BYTES];
    hasher.finalize_xof().fill(&mut digest);
    let exponent = BigUint::from_bytes_be(&digest);
    digest.zeroize();
    exponent
}
