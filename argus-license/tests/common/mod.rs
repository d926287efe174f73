//! Shared test helpers for license validation tests.

#![allow(dead_code)]

use argus_license::LicenseStorage;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Duration, Utc};
use ed25519_dalek::{Signer, SigningKey};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (SigningKey, [u8; 32]) {
    let seed: [u8; 32] = [
        7, 12, 3, 44, 5, 6, 97, 8, 9, 110, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
        24, 25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key.to_bytes())
}

/// Wraps a base64 body in the license file armor, 64 characters per line.
pub fn wrap_armor(body: &str) -> String {
    let mut out = String::from("-----BEGIN LICENSE FILE-----\n");
    for chunk in body.as_bytes().chunks(64) {
        out.push_str(std::str::from_utf8(chunk).unwrap());
        out.push('\n');
    }
    out.push_str("-----END LICENSE FILE-----\n");
    out
}

/// Builds an armored license file around an arbitrary envelope JSON string.
pub fn armor_envelope_json(envelope_json: &str) -> String {
    wrap_armor(&STANDARD.encode(envelope_json.as_bytes()))
}

/// Base64-encodes a license JSON payload and signs `"license/" + enc`,
/// matching the issuing side. Returns `(enc, sig_b64)`.
pub fn sign_payload(signing_key: &SigningKey, license_json: &str) -> (String, String) {
    let enc = STANDARD.encode(license_json.as_bytes());
    let message = format!("license/{enc}");
    let signature = signing_key.sign(message.as_bytes());
    (enc, STANDARD.encode(signature.to_bytes()))
}

/// Builds the complete armored license file for a raw license JSON string.
pub fn armor_license(signing_key: &SigningKey, license_json: &str) -> String {
    armor_license_with_alg(signing_key, license_json, "base64+ed25519")
}

/// Same as [`armor_license`] but with a caller-chosen algorithm id.
pub fn armor_license_with_alg(signing_key: &SigningKey, license_json: &str, alg: &str) -> String {
    let (enc, sig) = sign_payload(signing_key, license_json);
    let envelope = serde_json::json!({ "enc": enc, "sig": sig, "alg": alg });
    armor_envelope_json(&envelope.to_string())
}

/// Renders a license JSON payload with the given fields.
pub fn license_json(
    plan: &str,
    active: bool,
    features: &[&str],
    issued: DateTime<Utc>,
    expiry: DateTime<Utc>,
) -> String {
    serde_json::json!({
        "meta": {
            "issued": issued.to_rfc3339(),
            "expiry": expiry.to_rfc3339(),
        },
        "planName": plan,
        "active": active,
        "features": features,
    })
    .to_string()
}

/// A currently-valid Enterprise license with a couple of features.
pub fn valid_license_file(signing_key: &SigningKey) -> String {
    let now = Utc::now();
    armor_license(
        signing_key,
        &license_json(
            "Enterprise",
            true,
            &["AUTH", "UNLIMITED_MODELS"],
            now - Duration::days(1),
            now + Duration::days(30),
        ),
    )
}

/// In-memory license storage with write-failure injection.
#[derive(Debug)]
pub struct MemStorage {
    data: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemStorage {
    pub fn empty() -> Self {
        Self {
            data: Mutex::new(None),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(Some(bytes.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent write fail with an I/O error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.lock().unwrap().clone()
    }
}

impl LicenseStorage for MemStorage {
    fn exists(&self) -> bool {
        self.data.lock().unwrap().is_some()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        self.data
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no license stored"))
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("disk full"));
        }
        *self.data.lock().unwrap() = Some(bytes.to_vec());
        Ok(())
    }
}
