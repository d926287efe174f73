//! Durable storage boundary for the raw license file.
//!
//! Persistence failures are a separate domain from validation failures:
//! they surface as [`crate::LicenseError::Storage`] and never masquerade
//! as a rejected license.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Byte-level storage for the raw license artifact.
pub trait LicenseStorage: Send + Sync {
    /// Returns true if a license file is present.
    fn exists(&self) -> bool;

    /// Reads the stored license bytes.
    fn read(&self) -> io::Result<Vec<u8>>;

    /// Writes the license bytes durably.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;
}

impl<S: LicenseStorage + ?Sized> LicenseStorage for &S {
    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
}

impl<S: LicenseStorage + ?Sized> LicenseStorage for std::sync::Arc<S> {
    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
}

/// Filesystem-backed license storage.
#[derive(Debug, Clone)]
pub struct FsLicenseStorage {
    path: PathBuf,
}

impl FsLicenseStorage {
    /// Creates storage for the license file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the license file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LicenseStorage for FsLicenseStorage {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)
    }
}
