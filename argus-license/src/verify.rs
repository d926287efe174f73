//! Ed25519 signature verification for license payloads.
//!
//! The signed message is the ASCII bytes of `"license/"` followed by the
//! still-base64-encoded payload string, not the decoded license JSON.
//! Verifying against the encoded form means the payload bytes that were
//! signed are byte-identical to the ones later decoded.

use crate::error::{LicenseError, LicenseResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Prefix prepended to the encoded payload before signing.
const MESSAGE_PREFIX: &str = "license/";

/// Parses a hex-encoded Ed25519 verifying key into its 32 raw bytes.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidPublicKey`] if the string is not valid
/// hex or does not decode to exactly 32 bytes.
pub fn parse_public_key(hex_key: &str) -> LicenseResult<[u8; 32]> {
    let bytes = hex::decode(hex_key.trim())
        .map_err(|e| LicenseError::InvalidPublicKey(format!("invalid hex: {e}")))?;

    bytes
        .try_into()
        .map_err(|_| LicenseError::InvalidPublicKey("key must be 32 bytes".to_string()))
}

/// Verifies the Ed25519 signature over `"license/" + encoded_data`.
///
/// Every failure along the way (undecodable signature base64, wrong
/// lengths, unusable key bytes, cryptographic mismatch) yields `false`; an
/// unverifiable signature and an invalid one are indistinguishable to
/// callers. The comparison itself is the dalek verification primitive,
/// never a manual byte compare.
#[must_use]
pub fn verify_signature(public_key: &[u8; 32], encoded_data: &str, signature_b64: &str) -> bool {
    let Ok(sig_bytes) = STANDARD.decode(signature_b64) else {
        return false;
    };

    let Ok(signature) = Signature::from_slice(&sig_bytes) else {
        return false;
    };

    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };

    let message = format!("{MESSAGE_PREFIX}{encoded_data}");
    verifying_key.verify(message.as_bytes(), &signature).is_ok()
}
