use num_bigint::BigUint;
use num_traits::Zero;
use subtle::ConstantTimeEq;

use super::{GroupParameters, ProofPair};

/// Verifier for ZK13.
///
/// Accepts `(r, P)` iff `r^Hs mod p == P`. The verifier must hold the same
/// `Hs` as the prover; see the [module docs](crate::protocol).
pub struct Verifier<'a> {
    params: &'a GroupParameters,
    hash_exponent: &'a BigUint,
}

impl<'a> Verifier<'a> {
    /// Creates a verifier over `params` expecting the hash-exponent `Hs`.
    pub fn new(params: &'a GroupParameters, hash_exponent: &'a BigUint) -> Self {
        Self {
            params,
            hash_exponent,
        }
    }

    /// Verifies a proof pair. Rejection is `false`, never an error.
    pub fn verify(&self, proof: &ProofPair) -> bool {
        verify_with_exponent(
            self.params.modulus(),
            self.hash_exponent,
            proof.r(),
            proof.big_p(),
        )
    }
}

/// Stateless check of `r^Hs mod p == P`, comparing encodings in constant time.
///
/// A zero modulus never verifies.
pub fn verify_with_exponent(
    modulus: &BigUint,
    hash_exponent: &BigUint,
    r: &BigUint,
    big_p: &BigUint,
) -> bool {
    if modulus.is_zero() {
        return false;
    }
    let v = r.modpow(hash_exponent, modulus);
    v.to_bytes_be().ct_eq(&big_p.to_bytes_be()).into()
}
