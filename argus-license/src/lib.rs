//! Offline license validation and entitlements for Argus.
//!
//! This crate is the single gatekeeper for premium features:
//! - Parses the armored license file format (base64-wrapped JSON envelope)
//! - Verifies the Ed25519 signature over the still-encoded payload
//! - Checks the validity window using UTC instants
//! - Publishes the resulting entitlements process-wide
//!
//! # Design Principles
//!
//! - **Offline-first**: validation never touches the network; airgapped
//!   deployments are the baseline
//! - **Fail closed**: every rejection leaves the previous (or default
//!   inactive) license in place, so premium features stay off
//! - **Immutable licenses**: a new [`License`] is always built whole and
//!   swapped in; the installed one is never mutated in place
//!
//! # License File Format
//!
//! ```text
//! -----BEGIN LICENSE FILE-----
//! <base64 of {"enc": "<base64 license JSON>", "sig": "<base64 signature>",
//!             "alg": "base64+ed25519"}>
//! -----END LICENSE FILE-----
//! ```
//!
//! The signature covers the ASCII bytes of `"license/" + enc` (the encoded
//! payload string, not the decoded JSON).

mod envelope;
mod error;
mod license;
mod manager;
mod storage;
mod store;
mod verify;

pub use envelope::{LicenseEnvelope, SIGNING_ALGORITHM};
pub use error::{LicenseError, LicenseResult};
pub use license::{FeatureFlag, License, LicenseMetadata};
pub use manager::LicenseManager;
pub use storage::{FsLicenseStorage, LicenseStorage};
pub use store::EntitlementStore;
pub use verify::{parse_public_key, verify_signature};
