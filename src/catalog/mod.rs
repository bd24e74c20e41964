// src/catalog/mod.rs

//! Availability-catalog data model.
//!
//! The catalog is the externally generated database of every package known
//! to be installable, independent of what is actually installed. It arrives
//! already parsed (the CLI front-end loads a JSON dump of it); this crate
//! only ever reads the structure.
//!
//! The shape follows the generator's output: an ordered list of categories,
//! each holding an ordered list of packages, each holding an ordered list of
//! versions with per-version install records and flag sets.

pub mod flags;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use flags::{InstallKind, KeyFlag, MaskFlag};

/// Errors that can occur when loading a catalog dump.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to decode catalog file: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A complete availability catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Collection {
    /// Load a catalog from a JSON dump on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        let collection = serde_json::from_reader(BufReader::new(file))?;
        Ok(collection)
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

/// One category of packages, e.g. "dev-qt".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// One package entry with its available versions, in catalog order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub versions: Vec<Version>,
}

/// One version of a package. Version ids are opaque order-preserving tokens;
/// the catalog's ordering is the only version ordering this crate relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Version {
    pub id: String,

    /// Present when the catalog itself believes this version is installed.
    #[serde(default)]
    pub installed: Option<InstallRecord>,

    #[serde(default)]
    pub local_mask_flags: Vec<MaskFlag>,
    #[serde(default)]
    pub system_mask_flags: Vec<MaskFlag>,
    #[serde(default)]
    pub local_key_flags: Vec<KeyFlag>,
    #[serde(default)]
    pub system_key_flags: Vec<KeyFlag>,

    /// Overlay/repository the version comes from, when not the main tree.
    #[serde(default)]
    pub repository: Option<String>,

    /// USE flags defined by the build recipe: neutral, default-on and
    /// default-off respectively.
    #[serde(default)]
    pub iuse: Vec<String>,
    #[serde(default)]
    pub iuse_plus: Vec<String>,
    #[serde(default)]
    pub iuse_minus: Vec<String>,
}

impl Version {
    /// Whether the catalog marks this version installed.
    pub fn is_installed(&self) -> bool {
        self.installed.is_some()
    }

    /// A version is stable when either flag set carries the
    /// architecture-stable keyword.
    pub fn is_stable(&self) -> bool {
        flags::has_arch_stable(&self.local_key_flags)
            || flags::has_arch_stable(&self.system_key_flags)
    }

    /// Install-set classification for this version. Local mask flags take
    /// priority; the system set is only consulted when local yields nothing.
    pub fn install_kind(&self) -> InstallKind {
        let kind = flags::classify_mask_flags(&self.local_mask_flags);
        if kind == InstallKind::Unknown {
            return flags::classify_mask_flags(&self.system_mask_flags);
        }
        kind
    }

    /// Merged, sorted USE-flag list. Default-on flags are prefixed with `+`,
    /// default-off flags with `-`, neutral flags are bare.
    pub fn use_flag_summary(&self) -> String {
        let mut uses: Vec<String> = self
            .iuse
            .iter()
            .cloned()
            .chain(self.iuse_plus.iter().map(|f| format!("+{}", f)))
            .chain(self.iuse_minus.iter().map(|f| format!("-{}", f)))
            .collect();
        uses.sort_by(|a, b| {
            a.trim_start_matches(['+', '-'])
                .cmp(b.trim_start_matches(['+', '-']))
        });
        uses.join(" ")
    }
}

/// The catalog's install sub-record for a version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallRecord {
    /// When the version was installed, if the catalog recorded it.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}
