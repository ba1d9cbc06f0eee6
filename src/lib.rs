//! Pseudonymous network identities bound to a ZK13 discrete-log proof.
//!
//! An identity is a Ristretto255 key pair, a commitment to a coarsened
//! location, and a proof pair `(r, P)` over a freshly generated prime modulus
//! whose exponent is the hash of that location.
//!
//! ```rust,no_run
//! use zk13::{IdentityAssembler, SecureRng};
//!
//! let mut rng = SecureRng::new();
//! let address = IdentityAssembler::default()
//!     .assemble(37.8199, -122.4783, 256, &mut rng)
//!     .unwrap();
//! assert!(address.verify_proof());
//! println!("{}", address.to_compact().zkp_proof);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Location commitments.
pub mod commitment;
/// Error types.
pub mod error;
/// Grid cells and locators.
pub mod geo;
/// Identity assembly and wire encodings.
pub mod identity;
/// Randomness, primes, hashing and group helpers.
pub mod primitives;
/// The ZK13 proof engine.
pub mod protocol;

pub use commitment::{LocationCommitter, PedersenCommitter};
pub use error::{BoxError, Error};
pub use geo::{GridCell, GridConfig, GridLocator, PrecisionGrid, PrecisionLevel};
pub use identity::{
    CompactAddress, IdentityAssembler, IdentityConfig, NetworkAddress, StructuredAddress,
    WireFormat,
};
pub use primitives::{Blake3Wide, KeyPair, KeyedBlake3, Ristretto255, SecretHasher, SecureRng};
pub use protocol::{
    verify_with_exponent, GroupParameters, ParameterGenerator, ProofPair, Prover, Verifier, Zk13,
    Zk13Config,
};

/// Result type for ZK13 operations.
pub type Result<T> = core::result::Result<T, Error>;
