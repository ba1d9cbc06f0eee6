//! Error types for ZK13 identities

/// Boxed error returned by pluggable collaborators (locators, committers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration or group parameters were provided.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The secure random source failed.
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// No modulus passed the safety predicate within the attempt ceiling.
    #[error("No safe {bits}-bit modulus found after {attempts} attempts")]
    ParameterSearchExhausted {
        /// Requested modulus size.
        bits: u64,
        /// Number of primes rejected before giving up.
        attempts: u64,
    },

    /// The precision level could not be determined.
    #[error("Error getting dynamic precision: {0}")]
    PrecisionLookup(#[source] BoxError),

    /// Coordinates could not be mapped onto the precision grid.
    #[error("Error converting to precision grid: {0}")]
    GridConversion(#[source] BoxError),

    /// The location commitment could not be created.
    #[error("Error creating location commitment: {0}")]
    Commitment(#[source] BoxError),

    /// A proof was requested over an empty grid cell.
    #[error("Anonymized location is empty, cannot generate proof")]
    EmptyWitness,

    /// Proof text could not be parsed.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// A group element could not be decoded.
    #[error("Invalid group element: {0}")]
    PointDecoding(String),

    /// Base64 text could not be decoded.
    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// JSON encoding or decoding failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
