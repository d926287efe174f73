//! Armored license file parsing.
//!
//! A license file is an armored, base64-wrapped JSON envelope:
//!
//! ```text
//! -----BEGIN LICENSE FILE-----
//! <base64 of {"enc": "...", "sig": "...", "alg": "base64+ed25519"}>
//! -----END LICENSE FILE-----
//! ```
//!
//! `enc` is the still-base64-encoded license payload (the signed message is
//! `"license/" + enc`), `sig` the base64 Ed25519 signature, and `alg` the
//! signing scheme identifier.

use crate::error::{LicenseError, LicenseResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

/// Begin marker of the armored license file.
pub const ARMOR_HEADER: &str = "-----BEGIN LICENSE FILE-----";
/// End marker of the armored license file.
pub const ARMOR_FOOTER: &str = "-----END LICENSE FILE-----";
/// The only supported signing scheme identifier.
pub const SIGNING_ALGORITHM: &str = "base64+ed25519";

/// The decoded outer envelope of a license file.
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseEnvelope {
    /// Base64-encoded license payload, signed in this encoded form.
    pub enc: String,
    /// Base64-encoded Ed25519 signature.
    pub sig: String,
    /// Signing scheme identifier; must equal [`SIGNING_ALGORITHM`].
    pub alg: String,
}

impl LicenseEnvelope {
    /// Parses the armored text of a license file into an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MalformedEnvelope`] if the base64 body or
    /// the envelope JSON cannot be decoded, or if any field is empty.
    pub fn parse(raw: &str) -> LicenseResult<Self> {
        // Drop the armor markers and every newline, leaving one contiguous
        // base64 token.
        let token: String = raw
            .replace(ARMOR_HEADER, "")
            .replace(ARMOR_FOOTER, "")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if token.is_empty() {
            return Err(LicenseError::MalformedEnvelope(
                "empty license file".to_string(),
            ));
        }

        let payload = STANDARD.decode(&token).map_err(|e| {
            LicenseError::MalformedEnvelope(format!("invalid envelope base64: {e}"))
        })?;

        let envelope: Self = serde_json::from_slice(&payload).map_err(|e| {
            LicenseError::MalformedEnvelope(format!("invalid envelope JSON: {e}"))
        })?;

        if envelope.enc.is_empty() || envelope.sig.is_empty() || envelope.alg.is_empty() {
            return Err(LicenseError::MalformedEnvelope(
                "envelope field is empty".to_string(),
            ));
        }

        Ok(envelope)
    }
}
