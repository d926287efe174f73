//! Process-wide entitlement state.
//!
//! Holds exactly one current [`License`] behind a `parking_lot::RwLock`
//! around an `Arc`. Readers take a brief read lock and clone the `Arc`, so
//! a feature check never blocks on an in-flight install beyond the swap
//! itself, and never observes a half-updated license. The lock is
//! `parking_lot`, not an async lock, because nothing here suspends.

use crate::license::{FeatureFlag, License};
use parking_lot::RwLock;
use std::sync::Arc;

/// The process-wide current license.
#[derive(Debug, Default)]
pub struct EntitlementStore {
    current: RwLock<Arc<License>>,
}

impl EntitlementStore {
    /// Creates a store holding the default inactive license.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current license.
    #[must_use]
    pub fn current(&self) -> Arc<License> {
        self.current.read().clone()
    }

    /// Publishes a new license, replacing the previous one wholesale.
    ///
    /// The value is complete before the swap; the installed license is
    /// never mutated field by field.
    pub fn replace(&self, license: License) {
        let license = Arc::new(license);
        *self.current.write() = license;
    }

    /// Returns true iff the current license is active and grants `flag`.
    #[must_use]
    pub fn has_feature(&self, flag: FeatureFlag) -> bool {
        self.current().has_feature(flag)
    }

    /// Returns the current plan name (empty when no license is installed).
    #[must_use]
    pub fn plan_name(&self) -> String {
        self.current().plan_name.clone()
    }
}
