// src/installed/mod.rs

//! Installed-package database scanning.
//!
//! The live record of what is installed is a two-level directory tree
//! (category / package-version), `/var/db/pkg` on a stock system. The
//! lister abstraction yields one entry per package directory; splitting the
//! directory name into package name and version is left to the consumer so
//! that listers stay format-agnostic.

use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

/// Default location of the installed-package database.
pub const DEFAULT_PKG_DB_ROOT: &str = "/var/db/pkg";

/// One package directory found in the installed-package database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledEntry {
    /// Category directory name, e.g. "dev-qt".
    pub category: String,
    /// Package directory name, e.g. "qt-creator-12.4.3".
    pub package_dir: String,
    /// Absolute path of the package directory, when known.
    pub path: Option<PathBuf>,
}

/// Errors that can occur while scanning the package database.
#[derive(Debug, Error)]
pub enum ListerError {
    #[error("failed to scan package database at {root}: {source}")]
    Scan {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A source of installed-package entries.
pub trait InstalledLister {
    fn list(&self) -> Result<Vec<InstalledEntry>, ListerError>;
}

/// Directory lister over an on-disk package database.
#[derive(Debug, Clone)]
pub struct PkgDbLister {
    root: PathBuf,
}

impl PkgDbLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn default_root() -> Self {
        Self::new(DEFAULT_PKG_DB_ROOT)
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl InstalledLister for PkgDbLister {
    fn list(&self) -> Result<Vec<InstalledEntry>, ListerError> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ListerError::Scan {
                root: self.root.clone(),
                source,
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let package_dir = entry.file_name().to_string_lossy().into_owned();
            let Some(category) = entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
            else {
                warn!(dir = %package_dir, "package directory without a category parent");
                continue;
            };

            entries.push(InstalledEntry {
                category,
                package_dir,
                path: Some(entry.into_path()),
            });
        }

        Ok(entries)
    }
}

/// Split a package directory name into (package name, version) at the first
/// hyphen immediately followed by a digit, e.g. "qt-creator-12.4.3" into
/// ("qt-creator", "12.4.3"). Returns `None` when no version suffix exists.
pub fn split_package_dir(dir: &str) -> Option<(&str, &str)> {
    let bytes = dir.as_bytes();
    for pos in 0..bytes.len().saturating_sub(1) {
        if bytes[pos] == b'-' && bytes[pos + 1].is_ascii_digit() {
            return Some((&dir[..pos], &dir[pos + 1..]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_package_dir("qtcore-5.15.3"), Some(("qtcore", "5.15.3")));
    }

    #[test]
    fn test_split_name_with_hyphens() {
        assert_eq!(
            split_package_dir("qt-creator-12.4.3"),
            Some(("qt-creator", "12.4.3"))
        );
    }

    #[test]
    fn test_split_revision_suffix() {
        assert_eq!(
            split_package_dir("emacspeak-39.0-r2"),
            Some(("emacspeak", "39.0-r2"))
        );
    }

    #[test]
    fn test_split_no_version() {
        assert_eq!(split_package_dir("no-version-here"), None);
        assert_eq!(split_package_dir("plain"), None);
        assert_eq!(split_package_dir(""), None);
    }

    #[test]
    fn test_split_trailing_hyphen() {
        assert_eq!(split_package_dir("oddname-"), None);
    }

    #[test]
    fn test_lister_scans_two_levels() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("dev-qt/qtcore-5.15.3")).unwrap();
        fs::create_dir_all(temp.path().join("dev-qt/qt-creator-12.4.3")).unwrap();
        fs::create_dir_all(temp.path().join("app-misc/oldtool-0.9")).unwrap();

        let lister = PkgDbLister::new(temp.path());
        let entries = lister.list().unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.path.is_some()));
        assert!(entries
            .iter()
            .any(|e| e.category == "dev-qt" && e.package_dir == "qtcore-5.15.3"));
        assert!(entries
            .iter()
            .any(|e| e.category == "app-misc" && e.package_dir == "oldtool-0.9"));
    }

    #[test]
    fn test_lister_ignores_plain_files() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("dev-qt")).unwrap();
        fs::write(temp.path().join("dev-qt/notes.txt"), "x").unwrap();

        let lister = PkgDbLister::new(temp.path());
        assert!(lister.list().unwrap().is_empty());
    }

    #[test]
    fn test_lister_missing_root() {
        let lister = PkgDbLister::new("/nonexistent/pkg-db");
        assert!(matches!(lister.list(), Err(ListerError::Scan { .. })));
    }
}
