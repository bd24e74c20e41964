// src/merge/mod.rs

//! Reconciliation of the availability catalog with the installed-package
//! database.
//!
//! Two independently produced views of the system are merged into one
//! per-package version ledger: the availability catalog's idea of what is
//! installed, and the on-disk package database's record of what actually
//! is. A package with a version present on disk but unknown to the catalog
//! is a *zombie* - typically an install left behind after its entry
//! disappeared from the repositories.
//!
//! The merge is rebuilt from empty on every load; there is no incremental
//! diffing between reload cycles.

mod package_list;
mod version_info;

pub use package_list::{MergedPackageList, VersionLedger};
pub use version_info::{Provenance, VersionInfo};

use std::fmt;

/// (category, package) pair identifying a package regardless of version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageKey {
    pub category: String,
    pub name: String,
}

impl PackageKey {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// How the installed-database pass treats packages the store has not seen.
///
/// When the availability catalog was produced under a search filter, a
/// package missing from the store may simply have been filtered out, so it
/// must not be re-added from the installed side: that is `MergeOnly`. The
/// cost is that such packages are invisible to zombie detection for the
/// duration of the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Create store entries for previously unseen packages.
    #[default]
    Add,
    /// Only merge into packages already present in the store.
    MergeOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_equality_is_structural() {
        let a = PackageKey::new("dev-qt", "qtcore");
        let b = PackageKey::new("dev-qt".to_string(), "qtcore".to_string());
        assert_eq!(a, b);

        let c = PackageKey::new("dev-qt", "qtgui");
        assert_ne!(a, c);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            PackageKey::new("dev-qt", "qt-creator").to_string(),
            "dev-qt/qt-creator"
        );
    }
}
