//! License lifecycle orchestration.
//!
//! The pipeline for one artifact is fixed: envelope parse → algorithm
//! allow-list → signature verification → payload decode → validity window
//! → active flag. The first failure rejects the artifact and leaves the
//! entitlement store untouched.

use crate::envelope::{LicenseEnvelope, SIGNING_ALGORITHM};
use crate::error::{LicenseError, LicenseResult};
use crate::license::{FeatureFlag, License};
use crate::storage::LicenseStorage;
use crate::store::EntitlementStore;
use crate::verify::{parse_public_key, verify_signature};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

/// Validates license artifacts and owns the process-wide entitlements.
#[derive(Debug)]
pub struct LicenseManager<S: LicenseStorage> {
    verify_key: [u8; 32],
    entitlements: Arc<EntitlementStore>,
    storage: S,
    /// Serializes installs against each other; readers never take this.
    install_lock: Mutex<()>,
}

impl<S: LicenseStorage> LicenseManager<S> {
    /// Creates a manager with a raw 32-byte Ed25519 verifying key.
    pub fn new(verify_key: [u8; 32], storage: S) -> Self {
        Self {
            verify_key,
            entitlements: Arc::new(EntitlementStore::new()),
            storage,
            install_lock: Mutex::new(()),
        }
    }

    /// Creates a manager from a hex-encoded verifying key, the usual
    /// configuration form.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidPublicKey`] if the key is not 32
    /// bytes of valid hex.
    pub fn from_hex_key(hex_key: &str, storage: S) -> LicenseResult<Self> {
        Ok(Self::new(parse_public_key(hex_key)?, storage))
    }

    /// Startup path: restores the persisted license if one exists and
    /// still validates, otherwise keeps the default inactive license.
    ///
    /// Never fails: a stored license that became invalid while the process
    /// was down degrades to "no license" with a warning, not a boot
    /// failure.
    pub fn load(&self) -> Arc<License> {
        let _guard = self.install_lock.lock();

        if !self.storage.exists() {
            info!("no stored license, starting with the default inactive license");
            return self.entitlements.current();
        }

        let raw = match self.storage.read() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to read stored license, starting inactive");
                return self.entitlements.current();
            }
        };

        match self.validate(&raw) {
            Ok(license) => {
                info!(plan = %license.plan_name, "license file loaded");
                self.entitlements.replace(license);
            }
            Err(e) => {
                warn!(error = %e, "stored license rejected, starting inactive");
            }
        }

        self.entitlements.current()
    }

    /// Upload path: validates `raw`, publishes the new license, then
    /// persists the bytes verbatim.
    ///
    /// # Errors
    ///
    /// Validation failures reject the artifact and leave both the store
    /// and the persisted file untouched. A [`LicenseError::Storage`] after
    /// successful validation means the new license IS live in this process
    /// but could not be saved; the operator can retry the upload once
    /// storage recovers.
    pub fn install(&self, raw: &[u8]) -> LicenseResult<Arc<License>> {
        let _guard = self.install_lock.lock();

        let license = self.validate(raw)?;
        info!(plan = %license.plan_name, "license installed");
        self.entitlements.replace(license);
        self.storage.write(raw)?;

        Ok(self.entitlements.current())
    }

    /// Runs the full validation pipeline without touching any state.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing pipeline step; see
    /// [`LicenseError`] for the taxonomy.
    pub fn validate(&self, raw: &[u8]) -> LicenseResult<License> {
        let text = std::str::from_utf8(raw).map_err(|_| {
            LicenseError::MalformedEnvelope("license file is not UTF-8".to_string())
        })?;

        let envelope = LicenseEnvelope::parse(text)?;

        // Allow-list the algorithm before any cryptographic work.
        if envelope.alg != SIGNING_ALGORITHM {
            return Err(LicenseError::InvalidSignature);
        }

        if !verify_signature(&self.verify_key, &envelope.enc, &envelope.sig) {
            return Err(LicenseError::InvalidSignature);
        }

        // The payload is authenticated from here on.
        let license = License::decode(&envelope.enc)?;

        let Some(metadata) = &license.metadata else {
            return Err(LicenseError::MalformedLicense(
                "missing validity window".to_string(),
            ));
        };
        if !metadata.is_current_at(Utc::now()) {
            return Err(LicenseError::Expired);
        }

        if !license.active {
            return Err(LicenseError::Inactive);
        }

        Ok(license)
    }

    /// Returns the current license.
    #[must_use]
    pub fn current(&self) -> Arc<License> {
        self.entitlements.current()
    }

    /// Shorthand for `current().has_feature(flag)`; the most common call.
    #[must_use]
    pub fn has_feature(&self, flag: FeatureFlag) -> bool {
        self.entitlements.has_feature(flag)
    }

    /// Returns the current plan name.
    #[must_use]
    pub fn plan_name(&self) -> String {
        self.entitlements.plan_name()
    }

    /// Returns a handle to the entitlement store for feature-gated call
    /// sites that should not hold the whole manager.
    #[must_use]
    pub fn entitlements(&self) -> Arc<EntitlementStore> {
        Arc::clone(&self.entitlements)
    }
}
