//! License payload decoding and temporal validity.
//!
//! The decoded license JSON has the shape:
//!
//! ```json
//! {
//!   "meta": {"issued": "<ISO-8601 offset datetime>",
//!            "expiry": "<ISO-8601 offset datetime>"},
//!   "planName": "Enterprise",
//!   "active": true,
//!   "features": ["AUTH", "UNLIMITED_MODELS"]
//! }
//! ```

use crate::error::{LicenseError, LicenseResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A capability a license can grant.
///
/// Closed set: adding or removing a flag is a compile-time-checked change
/// across every feature-gated call site. Wire names are
/// SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureFlag {
    /// User authentication and role management.
    Auth,
    /// No cap on registered models.
    UnlimitedModels,
    /// No cap on user accounts.
    UnlimitedUsers,
    /// No cap on projects.
    UnlimitedProjects,
}

/// Validity window of a license, UTC-normalized on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseMetadata {
    /// Instant the license was issued.
    pub issued: DateTime<Utc>,
    /// Instant the license stops being valid.
    pub expiry: DateTime<Utc>,
}

impl LicenseMetadata {
    /// Returns true iff `now` falls strictly inside `(issued, expiry)`.
    ///
    /// Boundary instants are invalid on both sides, and no clock-skew
    /// tolerance is applied; callers wanting a grace period adjust `now`
    /// before calling.
    #[must_use]
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.issued < now && self.expiry > now
    }
}

/// Wire shape of the decoded license JSON.
#[derive(Debug, Deserialize)]
struct LicenseDocument {
    meta: LicenseMetadata,
    #[serde(rename = "planName")]
    plan_name: String,
    active: bool,
    features: Vec<FeatureFlag>,
}

/// The validated, in-memory entitlement object.
///
/// Immutable once constructed; a replacement license is always built whole
/// and swapped in via [`crate::EntitlementStore::replace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Commercial plan name; empty for the default license.
    pub plan_name: String,
    /// Whether the issuer considers this license active.
    pub active: bool,
    /// Capabilities granted while the license is active.
    pub features: HashSet<FeatureFlag>,
    /// Validity window; `None` only for the default license.
    pub metadata: Option<LicenseMetadata>,
}

impl Default for License {
    /// The fallback license: inactive, no features, no plan.
    fn default() -> Self {
        Self {
            plan_name: String::new(),
            active: false,
            features: HashSet::new(),
            metadata: None,
        }
    }
}

impl License {
    /// Decodes the base64 license payload into a typed license.
    ///
    /// Must only be called with payloads whose signature has already been
    /// accepted; this function trusts its input structurally, not
    /// cryptographically.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MalformedLicense`] on base64, JSON, or
    /// field-level parse failures (including unknown feature names).
    pub fn decode(encoded_data: &str) -> LicenseResult<Self> {
        let json = STANDARD.decode(encoded_data).map_err(|e| {
            LicenseError::MalformedLicense(format!("invalid payload base64: {e}"))
        })?;

        let doc: LicenseDocument = serde_json::from_slice(&json).map_err(|e| {
            LicenseError::MalformedLicense(format!("invalid license JSON: {e}"))
        })?;

        Ok(Self {
            plan_name: doc.plan_name,
            active: doc.active,
            features: doc.features.into_iter().collect(),
            metadata: Some(doc.meta),
        })
    }

    /// Returns true iff the license is active and grants `flag`.
    ///
    /// Both checks are required: a deactivated license grants nothing no
    /// matter what its feature set says.
    #[must_use]
    pub fn has_feature(&self, flag: FeatureFlag) -> bool {
        self.active && self.features.contains(&flag)
    }
}
