//! The two identity record encodings.
//!
//! They are deliberately incompatible and versioned separately:
//!
//! | | compact | structured |
//! |---|---|---|
//! | public key | base64, no padding | base64 with padding (read only) |
//! | commitment | raw point bytes | base64 with padding |
//! | proof | hex pair | absent |

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use curve25519_dalek::ristretto::RistrettoPoint;
use serde::{Deserialize, Serialize};

use super::NetworkAddress;
use crate::geo::GridCell;
use crate::primitives::ristretto::Ristretto255;
use crate::protocol::ProofPair;
use crate::Result;

/// Version of the compact encoding.
pub const COMPACT_VERSION: u8 = 1;

/// Version of the structured encoding.
pub const STRUCTURED_VERSION: u8 = 1;

/// Selects one of the identity record encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Public key, raw commitment bytes and proof string.
    Compact,
    /// Base64 commitment only on write; commitment, key and cell on read.
    Structured,
}

impl WireFormat {
    /// Returns the version of this encoding.
    pub const fn version(self) -> u8 {
        match self {
            WireFormat::Compact => COMPACT_VERSION,
            WireFormat::Structured => STRUCTURED_VERSION,
        }
    }

    /// Encodes `address` as JSON in this format.
    pub fn encode(self, address: &NetworkAddress) -> Result<String> {
        match self {
            WireFormat::Compact => address.to_compact().to_json(),
            WireFormat::Structured => StructuredAddress::marshal(address),
        }
    }
}

/// Compact identity record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactAddress {
    /// Compressed public key, base64 without padding.
    pub public_key: String,
    /// Compressed commitment point, raw bytes.
    pub location_commitment: Vec<u8>,
    /// `"<r hex>|<P hex>"`.
    pub zkp_proof: String,
}

impl CompactAddress {
    /// Encodes the public parts of `address`.
    pub fn from_address(address: &NetworkAddress) -> Self {
        Self {
            public_key: STANDARD_NO_PAD
                .encode(Ristretto255::element_to_bytes(address.public_key())),
            location_commitment: Ristretto255::element_to_bytes(address.location_commitment())
                .to_vec(),
            zkp_proof: address.proof().to_string(),
        }
    }

    /// Decodes the public key.
    pub fn public_key_point(&self) -> Result<RistrettoPoint> {
        let bytes = STANDARD_NO_PAD.decode(&self.public_key)?;
        Ristretto255::element_from_bytes(&bytes)
    }

    /// Decodes the location commitment.
    pub fn location_commitment_point(&self) -> Result<RistrettoPoint> {
        Ristretto255::element_from_bytes(&self.location_commitment)
    }

    /// Parses the proof pair.
    pub fn proof(&self) -> Result<ProofPair> {
        self.zkp_proof.parse()
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Identity record as read by the structured decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuredAddress {
    /// Anonymized location.
    pub anon_geo_location: GridCell,
    /// Location commitment.
    pub location_commitment: RistrettoPoint,
    /// Public key.
    pub public_key: RistrettoPoint,
}

#[derive(Serialize)]
struct StructuredOut {
    #[serde(rename = "locationCommitment")]
    location_commitment: String,
}

#[derive(Deserialize)]
struct StructuredIn {
    #[serde(rename = "anonGeoLocation", default)]
    anon_geo_location: GridCell,
    #[serde(rename = "locationCommitment")]
    location_commitment: String,
    #[serde(rename = "public_key")]
    public_key: String,
}

impl StructuredAddress {
    /// Writes `{"locationCommitment": <base64>}`; nothing else is emitted.
    pub fn marshal(address: &NetworkAddress) -> Result<String> {
        let out = StructuredOut {
            location_commitment: STANDARD
                .encode(Ristretto255::element_to_bytes(address.location_commitment())),
        };
        Ok(serde_json::to_string(&out)?)
    }

    /// Reads the cell, commitment and public key, decoding both points.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`](crate::Error::Json) for malformed JSON or missing fields
    /// - [`Error::Base64`](crate::Error::Base64) for invalid base64
    /// - [`Error::PointDecoding`](crate::Error::PointDecoding) for invalid points
    pub fn unmarshal(json: &str) -> Result<Self> {
        let input: StructuredIn = serde_json::from_str(json)?;

        let commitment_bytes = STANDARD.decode(&input.location_commitment)?;
        let location_commitment = Ristretto255::element_from_bytes(&commitment_bytes)?;

        let public_key_bytes = STANDARD.decode(&input.public_key)?;
        let public_key = Ristretto255::element_from_bytes(&public_key_bytes)?;

        Ok(Self {
            anon_geo_location: input.anon_geo_location,
            location_commitment,
            public_key,
        })
    }
}
