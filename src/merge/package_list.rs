// src/merge/package_list.rs

//! The merged per-package version ledger and zombie detection.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use tracing::warn;

use super::{MergeMode, PackageKey, VersionInfo};
use crate::catalog::Collection;
use crate::installed::{self, InstalledEntry};

/// Versions of one package, keyed by version id. Ids are unique within a
/// package; iteration order is the id's lexical order.
pub type VersionLedger = BTreeMap<String, VersionInfo>;

/// The authoritative merged state: one version ledger per package, plus the
/// derived zombie set.
///
/// A load cycle walks the states Empty, AvailableLoaded, Merged and
/// ZombiesKnown, in that order:
///
/// 1. [`clear`](Self::clear)
/// 2. [`read_available`](Self::read_available)
/// 3. [`read_installed`](Self::read_installed)
/// 4. [`identify_zombies`](Self::identify_zombies)
///
/// [`load`](Self::load) runs the whole sequence. Zombie queries issued
/// before step 4 completes return stale (possibly pre-clear) answers; the
/// caller is responsible for sequencing, it is not checked at runtime.
#[derive(Debug, Default)]
pub struct MergedPackageList {
    packages: HashMap<PackageKey, VersionLedger>,
    zombies: HashSet<PackageKey>,
}

impl MergedPackageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the store and the zombie set.
    pub fn clear(&mut self) {
        self.packages.clear();
        self.zombies.clear();
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn ledger(&self, category: &str, name: &str) -> Option<&VersionLedger> {
        self.packages.get(&PackageKey::new(category, name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageKey, &VersionLedger)> {
        self.packages.iter()
    }

    /// Merge in every version the availability catalog itself marks as
    /// installed. Re-running against the same catalog does not change the
    /// store.
    pub fn read_available(&mut self, catalog: &Collection) {
        for category in &catalog.categories {
            for package in &category.packages {
                for version in &package.versions {
                    if version.is_installed() {
                        self.add_available(
                            PackageKey::new(&category.name, &package.name),
                            &version.id,
                        );
                    }
                }
            }
        }
    }

    /// Merge in the installed-package database entries. Each entry's
    /// directory name is split into package name and version at the first
    /// hyphen followed by a digit; names with no version suffix are logged
    /// and skipped.
    pub fn read_installed<I>(&mut self, entries: I, mode: MergeMode)
    where
        I: IntoIterator<Item = InstalledEntry>,
    {
        for entry in entries {
            let Some((name, version)) = installed::split_package_dir(&entry.package_dir) else {
                warn!(
                    category = %entry.category,
                    dir = %entry.package_dir,
                    "no version suffix in package directory name, skipping"
                );
                continue;
            };
            let key = PackageKey::new(&entry.category, name);
            let version = version.to_string();
            self.add_installed(key, &version, entry.path, mode);
        }
    }

    /// Recompute the zombie set from scratch. A package is a zombie when any
    /// of its versions is on disk but unknown to the availability catalog.
    pub fn identify_zombies(&mut self) {
        self.zombies.clear();

        for (key, ledger) in &self.packages {
            let orphaned = ledger
                .values()
                .any(|info| info.in_installed() && !info.in_available());
            if orphaned {
                self.zombies.insert(key.clone());
            }
        }
    }

    pub fn is_zombie(&self, category: &str, name: &str) -> bool {
        self.zombies.contains(&PackageKey::new(category, name))
    }

    /// The full version ledger of a zombie package, or an empty ledger for
    /// anything not currently flagged. Zombie identity is per package, not
    /// per version: every recorded version of a flagged package is returned.
    pub fn zombie_versions(&self, category: &str, name: &str) -> VersionLedger {
        let key = PackageKey::new(category, name);
        if self.zombies.contains(&key) {
            self.packages.get(&key).cloned().unwrap_or_default()
        } else {
            VersionLedger::new()
        }
    }

    /// All zombies as "category/name" strings, sorted for reproducibility.
    pub fn zombie_list(&self) -> Vec<String> {
        let mut list: Vec<String> = self.zombies.iter().map(PackageKey::to_string).collect();
        list.sort();
        list
    }

    /// Run a complete load cycle: clear, both read passes, zombie scan.
    pub fn load<I>(&mut self, catalog: &Collection, entries: I, mode: MergeMode)
    where
        I: IntoIterator<Item = InstalledEntry>,
    {
        self.clear();
        self.read_available(catalog);
        self.read_installed(entries, mode);
        self.identify_zombies();
    }

    fn add_available(&mut self, key: PackageKey, version: &str) {
        let ledger = self.packages.entry(key).or_default();
        match ledger.get_mut(version) {
            Some(info) => info.mark_available(),
            None => {
                ledger.insert(version.to_string(), VersionInfo::new_available(version));
            }
        }
    }

    fn add_installed(
        &mut self,
        key: PackageKey,
        version: &str,
        install_path: Option<PathBuf>,
        mode: MergeMode,
    ) {
        let ledger = match mode {
            MergeMode::Add => self.packages.entry(key).or_default(),
            MergeMode::MergeOnly => match self.packages.get_mut(&key) {
                Some(ledger) => ledger,
                // The catalog was filtered; absence does not mean "not
                // installed", so do not re-introduce the package.
                None => return,
            },
        };
        match ledger.get_mut(version) {
            Some(info) => info.mark_installed(install_path),
            None => {
                ledger.insert(
                    version.to_string(),
                    VersionInfo::new_installed(version, install_path),
                );
            }
        }
    }
}
