//! Primality testing and random prime sampling for `BigUint` moduli.
//!
//! The number theory is done by `crypto-primes` over heap-allocated
//! `BoxedUint`s sized at runtime; values cross over through big-endian bytes.

use crypto_bigint::{BoxedUint, Limb};
use crypto_primes::RandomPrimeWithRng;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::{Error, Result};

/// Reports whether `n` is probably prime.
///
/// Each of the `rounds` iterations is a full `crypto-primes` check
/// (Miller-Rabin to base 2, strong Lucas, Miller-Rabin to a random base), so
/// every extra round adds an independent random base.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if `rounds` is zero.
pub fn is_probable_prime<R: CryptoRngCore>(
    n: &BigUint,
    rounds: usize,
    rng: &mut R,
) -> Result<bool> {
    if rounds == 0 {
        return Err(Error::InvalidParams(
            "primality rounds must be positive".to_string(),
        ));
    }

    let candidate = to_boxed(n)?;
    for _ in 0..rounds {
        if !candidate.is_prime_with_rng(rng) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Samples a random prime of exactly `bits` bits with its two most
/// significant bits set.
///
/// `crypto-primes` fixes the top bit; candidates without the second bit are
/// drawn again.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if `bits` is below 2 or does not fit in a `u32`.
pub fn random_prime<R: CryptoRngCore>(bits: u64, rng: &mut R) -> Result<BigUint> {
    let bit_length = u32::try_from(bits)
        .ok()
        .filter(|&b| b >= 2)
        .ok_or_else(|| {
            Error::InvalidParams(format!(
                "prime size must be between 2 and {} bits, got {bits}",
                u32::MAX
            ))
        })?;

    loop {
        let prime = BoxedUint::generate_prime_with_rng(rng, bit_length);
        let prime = from_boxed(&prime);
        if prime.bit(bits - 2) {
            return Ok(prime);
        }
    }
}

fn to_boxed(n: &BigUint) -> Result<BoxedUint> {
    let bytes = n.to_bytes_be();
    let limbs = (bytes.len() as u32 * 8).div_ceil(Limb::BITS).max(1);
    BoxedUint::from_be_slice(&bytes, limbs * Limb::BITS)
        .map_err(|e| Error::InvalidParams(format!("cannot convert integer: {e}")))
}

fn from_boxed(n: &BoxedUint) -> BigUint {
    BigUint::from_bytes_be(&n.to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecureRng;
    use num_traits::One;

    #[test]
    fn small_values() {
        let mut rng = SecureRng::new();
        let primes = [2u32, 3, 5, 7, 97, 101, 7919];
        let composites = [0u32, 1, 4, 9, 91, 561, 7917];

        for p in primes {
            assert!(is_probable_prime(&BigUint::from(p), 20, &mut rng).unwrap(), "{p}");
        }
        for c in composites {
            assert!(!is_probable_prime(&BigUint::from(c), 20, &mut rng).unwrap(), "{c}");
        }
    }

    #[test]
    fn carmichael_numbers_are_rejected() {
        let mut rng = SecureRng::new();
        for c in [1105u32, 1729, 2465, 2821, 6601, 8911] {
            assert!(!is_probable_prime(&BigUint::from(c), 20, &mut rng).unwrap(), "{c}");
        }
    }

    #[test]
    fn mersenne_prime_127() {
        let mut rng = SecureRng::new();
        let m127 = (BigUint::one() << 127u32) - 1u32;
        assert!(is_probable_prime(&m127, 20, &mut rng).unwrap());

        let composite = &m127 * BigUint::from(3u32);
        assert!(!is_probable_prime(&composite, 20, &mut rng).unwrap());
    }

    #[test]
    fn zero_rounds_are_rejected() {
        let mut rng = SecureRng::new();
        assert!(matches!(
            is_probable_prime(&BigUint::from(7919u32), 0, &mut rng),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn random_prime_has_requested_size() {
        let mut rng = SecureRng::new();
        for bits in [16u64, 64, 128] {
            let p = random_prime(bits, &mut rng).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(p.bit(bits - 2));
            assert!(p.bit(0));
            assert!(is_probable_prime(&p, 5, &mut rng).unwrap());
        }
    }

    #[test]
    fn random_prime_rejects_bad_sizes() {
        let mut rng = SecureRng::new();
        for bits in [0u64, 1, u64::from(u32::MAX) + 1] {
            assert!(matches!(
                random_prime(bits, &mut rng),
                Err(Error::InvalidParams(_))
            ));
        }
    }
}
