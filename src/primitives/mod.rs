//! Cryptographic building blocks shared by the proof engine and identity assembly:
//! - **rng**: secure randomness with fallible sampling
//! - **prime**: primality testing and random primes over `BigUint`, backed by `crypto-primes`
//! - **hash**: secret baggage to hash-exponent derivation
//! - **ristretto**: key pairs and point encoding over Ristretto255

/// Secret-to-exponent hashing.
pub mod hash;
/// Primality testing and prime sampling.
pub mod prime;
/// Ristretto255 keys and point encoding.
pub mod ristretto;
/// Cryptographically secure random number generation.
pub mod rng;

pub use hash::{Blake3Wide, KeyedBlake3, SecretHasher};
pub use ristretto::{KeyPair, Ristretto255};
pub use rng::SecureRng;
