//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
///
/// The validation variants (`MalformedEnvelope`, `InvalidSignature`,
/// `MalformedLicense`, `Expired`, `Inactive`) all mean "license rejected";
/// `Storage` is a distinct failure domain for persistence I/O.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Armor, base64, or envelope structure is broken before signature
    /// verification is even attempted.
    #[error("malformed license envelope: {0}")]
    MalformedEnvelope(String),

    /// Algorithm mismatch, undecodable signature, or Ed25519 verification
    /// failure. Intentionally carries no detail.
    #[error("license signature invalid")]
    InvalidSignature,

    /// Authenticated payload is not a parseable license or misses required
    /// fields.
    #[error("malformed license payload: {0}")]
    MalformedLicense(String),

    /// Now is outside the license validity window (not yet issued, or
    /// expired).
    #[error("license is outside its validity window")]
    Expired,

    /// Signature and dates check out, but the issuer deactivated the
    /// license.
    #[error("license is not active")]
    Inactive,

    /// The configured verifying key is not 32 bytes of valid hex.
    #[error("invalid license public key: {0}")]
    InvalidPublicKey(String),

    /// I/O failure reading or writing the persisted license file.
    #[error("license storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
