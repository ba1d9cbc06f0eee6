//! Modulus/generator selection for ZK13.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::primitives::prime::{is_probable_prime, random_prime};
use crate::{Error, Result};

/// Default group generator.
pub const DEFAULT_GENERATOR: u32 = 7;

/// Default divisor whose cofactor `(p - 1) / 224` must be prime.
pub const DEFAULT_MIN_PRIME_FACTOR: u32 = 224;

/// Default number of primality rounds.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 20;

/// Default ceiling on primes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000;

/// Smallest modulus size accepted by the generator.
pub const MIN_MODULUS_BITS: u64 = 64;

/// Largest modulus size accepted by the generator.
pub const MAX_MODULUS_BITS: u64 = 16_384;

/// Tunables for parameter generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zk13Config {
    /// Group generator `g`.
    pub generator: u32,
    /// Divisor applied to `p - 1` before the cofactor primality check.
    pub min_prime_factor: u32,
    /// Rounds for every primality test, each with a fresh random base.
    pub primality_rounds: usize,
    /// Maximum number of primes tried against the safety predicate.
    pub max_attempts: u64,
}

impl Default for Zk13Config {
    fn default() -> Self {
        Self {
            generator: DEFAULT_GENERATOR,
            min_prime_factor: DEFAULT_MIN_PRIME_FACTOR,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Zk13Config {
    /// Checks the configuration against a requested modulus size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if any value is out of range.
    pub fn validate(&self, bits: u64) -> Result<()> {
        if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) {
            return Err(Error::InvalidParams(format!(
                "modulus must be between {MIN_MODULUS_BITS} and {MAX_MODULUS_BITS} bits, got {bits}"
            )));
        }
        self.validate_predicate()?;
        if self.max_attempts == 0 {
            return Err(Error::InvalidParams(
                "max attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks the values the safety predicate depends on.
    fn validate_predicate(&self) -> Result<()> {
        if self.generator < 2 {
            return Err(Error::InvalidParams(
                "generator must be at least 2".to_string(),
            ));
        }
        if self.min_prime_factor < 2 {
            return Err(Error::InvalidParams(
                "minimum prime factor must be at least 2".to_string(),
            ));
        }
        if self.primality_rounds == 0 {
            return Err(Error::InvalidParams(
                "primality rounds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validated modulus `p` and generator `g`.
///
/// Only [`GroupParameters::new`] and [`ParameterGenerator::generate`] build
/// values, so `p` is always an odd prime above `g`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupParameters {
    p: BigUint,
    g: BigUint,
}

impl GroupParameters {
    /// Imports externally chosen parameters, checking primality of `p` and the safety predicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] for an invalid `config`, or if `p` is
    /// not prime or fails the predicate.
    pub fn new<R: CryptoRngCore>(
        p: BigUint,
        g: BigUint,
        config: &Zk13Config,
        rng: &mut R,
    ) -> Result<Self> {
        let params = Self { p, g };
        if !params.is_safe(config, rng)? {
            return Err(Error::InvalidParams(
                "modulus does not satisfy the safety predicate".to_string(),
            ));
        }
        Ok(params)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(p: BigUint, g: BigUint) -> Self {
        Self { p, g }
    }

    /// Returns the modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Returns the generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Returns the exponent modulus `p - 1`.
    pub fn order(&self) -> BigUint {
        &self.p - 1u32
    }

    /// Reports whether `p` is prime and the parameters satisfy the safety predicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if `config` cannot drive the predicate.
    pub fn is_safe<R: CryptoRngCore>(&self, config: &Zk13Config, rng: &mut R) -> Result<bool> {
        config.validate_predicate()?;
        if self.g < BigUint::from(2u32) || self.p <= self.g {
            return Ok(false);
        }
        if !is_probable_prime(&self.p, config.primality_rounds, rng)? {
            return Ok(false);
        }
        satisfies_predicate(&self.p, &self.g, config, rng)
    }
}

/// `(p-1) mod g != 0`, `g^(p-1) = 1 mod p` and `(p-1) / min_prime_factor` probably prime.
fn satisfies_predicate<R: CryptoRngCore>(
    p: &BigUint,
    g: &BigUint,
    config: &Zk13Config,
    rng: &mut R,
) -> Result<bool> {
    let p_minus_one = p - 1u32;

    if (&p_minus_one % g).is_zero() {
        return Ok(false);
    }
    if !g.modpow(&p_minus_one, p).is_one() {
        return Ok(false);
    }

    let cofactor = &p_minus_one / config.min_prime_factor;
    is_probable_prime(&cofactor, config.primality_rounds, rng)
}

/// Searches for a modulus satisfying the safety predicate.
#[derive(Clone, Debug, Default)]
pub struct ParameterGenerator {
    config: Zk13Config,
}

impl ParameterGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: Zk13Config) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Zk13Config {
        &self.config
    }

    /// Samples primes of `bits` bits until one passes the safety predicate.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParams`] for an invalid configuration, before any entropy is used
    /// - [`Error::ParameterSearchExhausted`] after `max_attempts` rejected primes
    pub fn generate<R: CryptoRngCore>(&self, bits: u64, rng: &mut R) -> Result<GroupParameters> {
        self.config.validate(bits)?;
        let g = BigUint::from(self.config.generator);

        for attempt in 1..=self.config.max_attempts {
            let p = random_prime(bits, rng)?;
            if satisfies_predicate(&p, &g, &self.config, rng)? {
                info!(bits, attempts = attempt, "found safe modulus");
                return Ok(GroupParameters { p, g });
            }
            trace!(bits, attempt, "prime rejected by safety predicate");
        }

        debug!(
            bits,
            attempts = self.config.max_attempts,
            "parameter search exhausted"
        );
        Err(Error::ParameterSearchExhausted {
            bits,
            attempts: self.config.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecureRng;

    #[test]
    fn generated_parameters_are_safe() {
        let mut rng = SecureRng::new();
        let generator = ParameterGenerator::default();
        let params = generator.generate(256, &mut rng).unwrap();

        assert_eq!(params.modulus().bits(), 256);
        assert_eq!(params.generator(), &BigUint::from(DEFAULT_GENERATOR));
        assert!(params.is_safe(generator.config(), &mut rng).unwrap());
    }

    #[test]
    fn custom_generator_is_used() {
        let mut rng = SecureRng::new();
        let config = Zk13Config {
            generator: 5,
            ..Zk13Config::default()
        };
        let params = ParameterGenerator::new(config.clone())
            .generate(128, &mut rng)
            .unwrap();

        assert_eq!(params.generator(), &BigUint::from(5u32));
        assert!(params.is_safe(&config, &mut rng).unwrap());
    }

    #[test]
    fn exhaustion_is_reported() {
        let mut rng = SecureRng::new();
        // Every odd prime has an even p - 1, so g = 2 never passes.
        let config = Zk13Config {
            generator: 2,
            max_attempts: 5,
            ..Zk13Config::default()
        };
        let err = ParameterGenerator::new(config)
            .generate(128, &mut rng)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::ParameterSearchExhausted {
                bits: 128,
                attempts: 5
            }
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = SecureRng::new();
        let cases = [
            (Zk13Config::default(), 32),
            (Zk13Config::default(), MAX_MODULUS_BITS + 1),
            (Zk13Config::default(), u64::MAX),
            (
                Zk13Config {
                    generator: 1,
                    ..Zk13Config::default()
                },
                256,
            ),
            (
                Zk13Config {
                    min_prime_factor: 0,
                    ..Zk13Config::default()
                },
                256,
            ),
            (
                Zk13Config {
                    primality_rounds: 0,
                    ..Zk13Config::default()
                },
                256,
            ),
            (
                Zk13Config {
                    max_attempts: 0,
                    ..Zk13Config::default()
                },
                256,
            ),
        ];

        for (config, bits) in cases {
            assert!(matches!(
                ParameterGenerator::new(config).generate(bits, &mut rng),
                Err(Error::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn import_rejects_composite_modulus() {
        let mut rng = SecureRng::new();
        let result = GroupParameters::new(
            BigUint::from(1_000_000u32),
            BigUint::from(7u32),
            &Zk13Config::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(Error::InvalidParams(_))));
    }

    fn import(p: u32, config: &Zk13Config) -> Result<GroupParameters> {
        let mut rng = SecureRng::new();
        GroupParameters::new(BigUint::from(p), BigUint::from(7u32), config, &mut rng)
    }

    #[test]
    fn import_accepts_prime_passing_predicate() {
        // (p - 1) mod 7 = 2 and (p - 1) / 224 = 4481 is prime.
        assert!(import(1_003_747, &Zk13Config::default()).is_ok());
    }

    #[test]
    fn import_rejects_prime_divisible_by_generator() {
        // p - 1 = 224 * 1013 with 1013 prime, so only (p - 1) mod 7 fails.
        let err = import(226_913, &Zk13Config::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[test]
    fn import_rejects_prime_with_composite_cofactor() {
        // (p - 1) mod 7 = 2, but (p - 1) / 224 = 4464 is composite.
        let err = import(1_000_003, &Zk13Config::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[test]
    fn import_rejects_degenerate_modulus() {
        for p in [0u32, 1, 2, 7] {
            assert!(
                matches!(import(p, &Zk13Config::default()), Err(Error::InvalidParams(_))),
                "{p}"
            );
        }
    }

    #[test]
    fn import_validates_config() {
        let zero_factor = Zk13Config {
            min_prime_factor: 0,
            ..Zk13Config::default()
        };
        let zero_rounds = Zk13Config {
            primality_rounds: 0,
            ..Zk13Config::default()
        };
        let one_generator = Zk13Config {
            generator: 1,
            ..Zk13Config::default()
        };

        for config in [zero_factor, zero_rounds, one_generator] {
            assert!(matches!(
                import(1_003_747, &config),
                Err(Error::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn is_safe_validates_config() {
        let mut rng = SecureRng::new();
        let params = import(1_003_747, &Zk13Config::default()).unwrap();
        let config = Zk13Config {
            min_prime_factor: 0,
            ..Zk13Config::default()
        };
        assert!(matches!(
            params.is_safe(&config, &mut rng),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn import_accepts_generated_parameters() {
        let mut rng = SecureRng::new();
        let config = Zk13Config::default();
        let params = ParameterGenerator::new(config.clone())
            .generate(128, &mut rng)
            .unwrap();

        let imported = GroupParameters::new(
            params.modulus().clone(),
            params.generator().clone(),
            &config,
            &mut rng,
        )
        .unwrap();
        assert_eq!(imported, params);
    }

    #[test]
    fn config_defaults_fill_missing_json_fields() {
        let config: Zk13Config = serde_json::from_str(r#"{"generator": 11}"#).unwrap();
        assert_eq!(config.generator, 11);
        assert_eq!(config.min_prime_factor, DEFAULT_MIN_PRIME_FACTOR);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }
}
