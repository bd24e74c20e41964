// src/merge/version_info.rs

//! Per-version provenance records for the merged package list.

use std::path::{Path, PathBuf};

/// Which of the two sources a version has been seen in.
///
/// A record is only ever created on a sighting, so "seen in neither" is not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Provenance {
    /// Only the availability catalog claims this version is installed.
    AvailableOnly,
    /// Only the on-disk package database has this version.
    InstalledOnly,
    /// Both sources agree.
    Both,
}

impl Provenance {
    pub fn in_available(self) -> bool {
        matches!(self, Self::AvailableOnly | Self::Both)
    }

    pub fn in_installed(self) -> bool {
        matches!(self, Self::InstalledOnly | Self::Both)
    }
}

/// One installed-or-available version of a package: the version id, the
/// install directory when the package database supplied one, and where the
/// version has been seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    version: String,
    install_path: Option<PathBuf>,
    provenance: Provenance,
}

impl VersionInfo {
    pub(crate) fn new_available(version: &str) -> Self {
        Self {
            version: version.to_string(),
            install_path: None,
            provenance: Provenance::AvailableOnly,
        }
    }

    pub(crate) fn new_installed(version: &str, install_path: Option<PathBuf>) -> Self {
        Self {
            version: version.to_string(),
            install_path,
            provenance: Provenance::InstalledOnly,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn install_path(&self) -> Option<&Path> {
        self.install_path.as_deref()
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn in_available(&self) -> bool {
        self.provenance.in_available()
    }

    pub fn in_installed(&self) -> bool {
        self.provenance.in_installed()
    }

    pub(crate) fn mark_available(&mut self) {
        self.provenance = match self.provenance {
            Provenance::AvailableOnly => Provenance::AvailableOnly,
            Provenance::InstalledOnly | Provenance::Both => Provenance::Both,
        };
    }

    /// Record an installed sighting, keeping any previously recorded install
    /// path unless the new sighting supplies one.
    pub(crate) fn mark_installed(&mut self, install_path: Option<PathBuf>) {
        self.provenance = match self.provenance {
            Provenance::InstalledOnly => Provenance::InstalledOnly,
            Provenance::AvailableOnly | Provenance::Both => Provenance::Both,
        };
        if install_path.is_some() {
            self.install_path = install_path;
        }
    }
}
