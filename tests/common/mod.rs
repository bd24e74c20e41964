// tests/common/mod.rs

//! Shared catalog and package-database fixtures for integration tests.

use std::fs;

use portview::catalog::{Category, Collection, InstallRecord, KeyFlag, MaskFlag, Package, Version};
use tempfile::TempDir;

/// A version that is stable on this architecture.
pub fn stable_version(id: &str) -> Version {
    Version {
        id: id.to_string(),
        local_key_flags: vec![KeyFlag::ArchStable],
        ..Version::default()
    }
}

/// A testing/unstable version.
pub fn unstable_version(id: &str) -> Version {
    Version {
        id: id.to_string(),
        local_key_flags: vec![KeyFlag::ArchUnstable],
        ..Version::default()
    }
}

/// Mark a version installed per the catalog, with the given mask flags.
pub fn installed(mut version: Version, mask: Vec<MaskFlag>) -> Version {
    version.installed = Some(InstallRecord::default());
    version.local_mask_flags = mask;
    version
}

pub fn package(name: &str, versions: Vec<Version>) -> Package {
    Package {
        name: name.to_string(),
        description: format!("{} description", name),
        versions,
        ..Package::default()
    }
}

pub fn category(name: &str, packages: Vec<Package>) -> Category {
    Category {
        name: name.to_string(),
        packages,
    }
}

pub fn collection(categories: Vec<Category>) -> Collection {
    Collection { categories }
}

/// Create an on-disk package database: one directory per (category,
/// package-version) pair. Keep the TempDir alive to prevent cleanup.
pub fn pkg_db(layout: &[(&str, &str)]) -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    for (category, package_dir) in layout {
        fs::create_dir_all(temp.path().join(category).join(package_dir)).unwrap();
    }
    temp
}
