// src/catalog/flags.rs

//! Keyword and mask flag vocabulary for catalog versions.
//!
//! Each catalog version carries two pairs of flag sets: local/system
//! keyword flags (stability on this architecture) and local/system mask
//! flags (why the version is masked or which install set it belongs to).
//! The local set reflects the machine's own configuration and takes
//! priority; the system set is the profile default and is only consulted
//! when the local set yields nothing.

use serde::{Deserialize, Serialize};

/// Keyword flag attached to a version, mirroring the generator's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyFlag {
    Unknown,
    Stable,
    ArchStable,
    ArchUnstable,
    AlienStable,
    AlienUnstable,
    MinusKeyword,
    MinusUnstable,
    MinusAsterisk,
}

impl KeyFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Stable => "STABLE",
            Self::ArchStable => "ARCH-STABLE",
            Self::ArchUnstable => "ARCH-UNSTABLE",
            Self::AlienStable => "ALIEN-STABLE",
            Self::AlienUnstable => "ALIEN-UNSTABLE",
            Self::MinusKeyword => "MINUS-KEYWORD",
            Self::MinusUnstable => "MINUS-UNSTABLE",
            Self::MinusAsterisk => "MINUS-ASTERISK",
        }
    }
}

/// Mask flag attached to a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaskFlag {
    Unknown,
    MaskPackage,
    /// The package is in the @system set.
    MaskSystem,
    MaskProfile,
    InProfile,
    /// The package is in the @world file.
    World,
    /// The package is in a user-defined world set.
    WorldSets,
    Marked,
}

impl MaskFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::MaskPackage => "MASK-PACKAGE",
            Self::MaskSystem => "MASK-SYSTEM",
            Self::MaskProfile => "MASK-PROFILE",
            Self::InProfile => "IN-PROFILE",
            Self::World => "WORLD",
            Self::WorldSets => "WORLD-SETS",
            Self::Marked => "MARKED",
        }
    }
}

/// Why an installed package is on the system: pulled in explicitly (world),
/// via a named user set, as part of the base system, or as a plain
/// dependency of something else (unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallKind {
    World,
    WorldSet,
    System,
    #[default]
    Unknown,
}

impl InstallKind {
    /// Short marker used in report output. `Unknown` renders as a plain
    /// dependency marker.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::World => "world",
            Self::WorldSet => "set",
            Self::System => "system",
            Self::Unknown => "dep",
        }
    }
}

/// Classify a mask-flag set into an install kind. The first world, world-set
/// or system flag in list order wins.
pub fn classify_mask_flags(flags: &[MaskFlag]) -> InstallKind {
    for flag in flags {
        match flag {
            MaskFlag::World => return InstallKind::World,
            MaskFlag::WorldSets => return InstallKind::WorldSet,
            MaskFlag::MaskSystem => return InstallKind::System,
            _ => {}
        }
    }
    InstallKind::Unknown
}

/// Whether a keyword-flag set marks the version stable on this architecture.
pub fn has_arch_stable(flags: &[KeyFlag]) -> bool {
    flags.contains(&KeyFlag::ArchStable)
}

pub fn format_key_flags(flags: &[KeyFlag]) -> String {
    flags
        .iter()
        .map(KeyFlag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_mask_flags(flags: &[MaskFlag]) -> String {
    flags
        .iter()
        .map(MaskFlag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_world() {
        assert_eq!(
            classify_mask_flags(&[MaskFlag::Marked, MaskFlag::World]),
            InstallKind::World
        );
    }

    #[test]
    fn test_classify_first_match_wins() {
        assert_eq!(
            classify_mask_flags(&[MaskFlag::WorldSets, MaskFlag::World]),
            InstallKind::WorldSet
        );
        assert_eq!(
            classify_mask_flags(&[MaskFlag::MaskSystem, MaskFlag::WorldSets]),
            InstallKind::System
        );
    }

    #[test]
    fn test_classify_no_set_membership() {
        assert_eq!(classify_mask_flags(&[]), InstallKind::Unknown);
        assert_eq!(
            classify_mask_flags(&[MaskFlag::MaskPackage, MaskFlag::InProfile]),
            InstallKind::Unknown
        );
    }

    #[test]
    fn test_arch_stable() {
        assert!(has_arch_stable(&[KeyFlag::Stable, KeyFlag::ArchStable]));
        assert!(!has_arch_stable(&[KeyFlag::ArchUnstable]));
        assert!(!has_arch_stable(&[]));
    }

    #[test]
    fn test_format_flags() {
        assert_eq!(
            format_key_flags(&[KeyFlag::ArchStable, KeyFlag::Stable]),
            "ARCH-STABLE, STABLE"
        );
        assert_eq!(format_mask_flags(&[]), "");
        assert_eq!(
            format_mask_flags(&[MaskFlag::World, MaskFlag::MaskSystem]),
            "WORLD, MASK-SYSTEM"
        );
    }
}
