// src/report/item.rs

//! One row of the package report.

use crate::catalog::{InstallKind, Package};
use crate::merge::VersionLedger;

/// Report columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Installed,
    Name,
    InstalledVersion,
    AvailableVersion,
    Description,
}

impl Column {
    pub const COUNT: usize = 5;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Installed),
            1 => Some(Self::Name),
            2 => Some(Self::InstalledVersion),
            3 => Some(Self::AvailableVersion),
            4 => Some(Self::Description),
            _ => None,
        }
    }
}

/// Immutable summary of one catalog package, combined with the package's
/// zombie ledger. Everything is computed once at construction; a rebuild of
/// the report replaces the row wholesale.
#[derive(Debug, Clone)]
pub struct PackageReportItem {
    category: String,
    name: String,
    description: String,
    installed: bool,
    install_kind: InstallKind,
    /// Display strings for installed versions, in catalog order. Unstable
    /// versions carry a "(~)" prefix.
    installed_versions: Vec<String>,
    available_version: String,
    zombie_versions: VersionLedger,
}

impl PackageReportItem {
    /// Build a row from a catalog package entry. "Installed" here is the
    /// catalog's own per-version record, independent of the merged store;
    /// the zombie ledger supplies the versions only the disk knows about.
    pub fn new(category: &str, package: &Package, zombie_versions: VersionLedger) -> Self {
        let mut installed = false;
        let mut install_kind = InstallKind::Unknown;
        let mut installed_versions = Vec::new();

        for version in &package.versions {
            if version.is_installed() {
                installed = true;
                // The classification of the last installed version wins.
                install_kind = version.install_kind();

                if version.is_stable() {
                    installed_versions.push(version.id.clone());
                } else {
                    installed_versions.push(format!("(~){}", version.id));
                }
            }
        }

        Self {
            category: category.to_string(),
            name: package.name.clone(),
            description: package.description.clone(),
            installed,
            install_kind,
            installed_versions,
            available_version: highest_version_name(package),
            zombie_versions,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether any version of the package is installed.
    pub fn installed(&self) -> bool {
        self.installed
    }

    pub fn install_kind(&self) -> InstallKind {
        self.install_kind
    }

    pub fn installed_versions(&self) -> &[String] {
        &self.installed_versions
    }

    pub fn available_version(&self) -> &str {
        &self.available_version
    }

    pub fn zombie_versions(&self) -> &VersionLedger {
        &self.zombie_versions
    }

    /// Installed version names plus the zombie versions, the latter marked
    /// with a "**" suffix.
    pub fn version_names(&self) -> Vec<String> {
        let mut names = self.installed_versions.clone();
        for version in self.zombie_versions.keys() {
            names.push(format!("{}**", version));
        }
        names
    }

    /// Display text for one column.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Installed => {
                if self.installed {
                    self.install_kind.marker().to_string()
                } else {
                    String::new()
                }
            }
            Column::Name => self.name.clone(),
            Column::InstalledVersion => self.installed_versions.join(", "),
            Column::AvailableVersion => self.available_version.clone(),
            Column::Description => self.description.clone(),
        }
    }
}

/// The newest version worth offering: scan backwards through the catalog's
/// version list, skipping live builds (ids starting with three nines), and
/// take the first hit, "~"-prefixed when unstable. When every version is
/// live, fall back to the lowest-indexed live version seen - a rolling
/// release beats nothing. An empty version list yields an empty string.
pub fn highest_version_name(package: &Package) -> String {
    let mut lowest_live = None;

    for version in package.versions.iter().rev() {
        if version.id.starts_with("999") {
            lowest_live = Some(version);
            continue;
        }
        return if version.is_stable() {
            version.id.clone()
        } else {
            format!("~{}", version.id)
        };
    }

    match lowest_live {
        Some(version) if version.is_stable() => version.id.clone(),
        Some(version) => format!("~{}", version.id),
        None => String::new(),
    }
}
