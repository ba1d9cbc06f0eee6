//! Assembly of pseudonymous network identities.
//!
//! An identity binds a Ristretto255 key pair and a commitment to an
//! anonymized grid cell to a ZK13 proof whose witness is the cell itself.

/// Wire encodings of identity records.
pub mod wire;

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};
use zeroize::Zeroize;

pub use wire::{CompactAddress, StructuredAddress, WireFormat};

use crate::commitment::{LocationCommitter, PedersenCommitter};
use crate::geo::{GridCell, GridConfig, GridLocator, PrecisionGrid};
use crate::primitives::hash::{Blake3Wide, SecretHasher};
use crate::primitives::ristretto::KeyPair;
use crate::protocol::{ProofPair, Zk13, Zk13Config};
use crate::{Error, Result, SecureRng};

/// Default modulus size for identity proofs.
pub const DEFAULT_PROOF_BITS: u64 = 256;

/// Identity generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Modulus size for the ZK13 proof.
    pub proof_bits: u64,
    /// Parameter generation settings.
    pub zk13: Zk13Config,
    /// Default locator settings.
    pub grid: GridConfig,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            proof_bits: DEFAULT_PROOF_BITS,
            zk13: Zk13Config::default(),
            grid: GridConfig::default(),
        }
    }
}

impl IdentityConfig {
    /// Parses a configuration from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A complete identity held by its owner.
///
/// Holds the private key and commitment randomness; only the public parts
/// leave through [`wire`].
pub struct NetworkAddress {
    anon_geo_location: GridCell,
    location_commitment: RistrettoPoint,
    commitment_randomness: Scalar,
    keys: KeyPair,
    zkp: Zk13,
    proof: ProofPair,
}

impl NetworkAddress {
    /// Returns the anonymized location.
    pub fn anon_geo_location(&self) -> &GridCell {
        &self.anon_geo_location
    }

    /// Returns the location commitment.
    pub fn location_commitment(&self) -> &RistrettoPoint {
        &self.location_commitment
    }

    /// Returns the blinding randomness of the location commitment.
    pub fn commitment_randomness(&self) -> &Scalar {
        &self.commitment_randomness
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &RistrettoPoint {
        self.keys.public()
    }

    /// Returns the private key.
    pub fn private_key(&self) -> &Scalar {
        self.keys.secret()
    }

    /// Returns the proof engine the proof was produced with.
    pub fn zkp(&self) -> &Zk13 {
        &self.zkp
    }

    /// Returns the proof pair.
    pub fn proof(&self) -> &ProofPair {
        &self.proof
    }

    /// Re-checks the stored proof against the stored engine.
    pub fn verify_proof(&self) -> bool {
        self.zkp.verify(&self.proof)
    }

    /// Encodes the identity in compact form.
    pub fn to_compact(&self) -> CompactAddress {
        CompactAddress::from_address(self)
    }

    /// Encodes the identity with the structured marshaller.
    pub fn marshal_structured(&self) -> Result<String> {
        StructuredAddress::marshal(self)
    }
}

impl Drop for NetworkAddress {
    fn drop(&mut self) {
        self.commitment_randomness.zeroize();
    }
}

impl core::fmt::Debug for NetworkAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NetworkAddress")
            .field("anon_geo_location", &self.anon_geo_location)
            .field("location_commitment", &self.location_commitment.compress())
            .field("public_key", &self.keys.public().compress())
            .field("proof", &self.proof)
            .finish_non_exhaustive()
    }
}

/// Builds identities from coordinates.
///
/// The locator, committer and hasher are independent collaborators; the
/// defaults are [`PrecisionGrid`], [`PedersenCommitter`] and [`Blake3Wide`].
pub struct IdentityAssembler<L = PrecisionGrid, C = PedersenCommitter, H = Blake3Wide> {
    locator: L,
    committer: C,
    hasher: H,
    zk13: Zk13Config,
}

impl IdentityAssembler {
    /// Creates an assembler with the default collaborators.
    pub fn new(config: &IdentityConfig) -> Self {
        Self::with_collaborators(
            PrecisionGrid::new(config.grid.clone()),
            PedersenCommitter,
            Blake3Wide,
            config.zk13.clone(),
        )
    }
}

impl Default for IdentityAssembler {
    fn default() -> Self {
        Self::new(&IdentityConfig::default())
    }
}

impl<L, C, H> IdentityAssembler<L, C, H>
where
    L: GridLocator,
    C: LocationCommitter,
    H: SecretHasher,
{
    /// Creates an assembler from explicit collaborators.
    pub fn with_collaborators(locator: L, committer: C, hasher: H, zk13: Zk13Config) -> Self {
        Self {
            locator,
            committer,
            hasher,
            zk13,
        }
    }

    /// Runs the full pipeline for one identity.
    ///
    /// # Errors
    ///
    /// - [`Error::Entropy`] if key or nonce generation fails
    /// - [`Error::PrecisionLookup`], [`Error::GridConversion`] or
    ///   [`Error::Commitment`] with the collaborator's cause
    /// - [`Error::EmptyWitness`] if the locator returns an empty cell
    /// - any parameter generation error for `bits`
    pub fn assemble<R: CryptoRngCore>(
        &self,
        latitude: f64,
        longitude: f64,
        bits: u64,
        rng: &mut R,
    ) -> Result<NetworkAddress> {
        let span = info_span!("assemble_identity", bits);
        let _guard = span.enter();

        let keys = KeyPair::generate(rng)?;

        let precision = self
            .locator
            .dynamic_precision()
            .map_err(Error::PrecisionLookup)?;
        let anon_geo_location = self
            .locator
            .to_grid(latitude, longitude, precision)
            .map_err(Error::GridConversion)?;
        if anon_geo_location.is_empty() {
            return Err(Error::EmptyWitness);
        }
        debug!(precision = precision.digits(), "location snapped to grid");

        let (commitment_randomness, location_commitment) = self
            .committer
            .commit(keys.secret(), &anon_geo_location.to_bytes(), &mut *rng)
            .map_err(Error::Commitment)?;

        let (zkp, proof) = self.prove_location(&anon_geo_location, bits, rng)?;

        info!("identity assembled");
        Ok(NetworkAddress {
            anon_geo_location,
            location_commitment,
            commitment_randomness,
            keys,
            zkp,
            proof,
        })
    }

    /// Generates parameters and a proof whose witness is the cell's string form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWitness`] for an empty cell, before any parameters are generated.
    pub fn prove_location<R: CryptoRngCore>(
        &self,
        cell: &GridCell,
        bits: u64,
        rng: &mut R,
    ) -> Result<(Zk13, ProofPair)> {
        if cell.is_empty() {
            return Err(Error::EmptyWitness);
        }

        let witness = cell.to_string();
        let zkp = Zk13::with_config(witness.as_bytes(), bits, &self.zk13, &self.hasher, rng)?;
        let proof = zkp.prove(rng)?;
        Ok((zkp, proof))
    }

    /// Assembles an identity with the OS RNG and returns its compact encoding.
    pub fn generate_address(
        &self,
        latitude: f64,
        longitude: f64,
        bits: u64,
    ) -> Result<CompactAddress> {
        let mut rng = SecureRng::new();
        let address = self.assemble(latitude, longitude, bits, &mut rng)?;
        Ok(address.to_compact())
    }
}
