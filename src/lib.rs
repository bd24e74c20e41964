// src/lib.rs

//! Portview - Portage package browser core
//!
//! Merges the two views a Gentoo system has of its packages - the generated
//! availability catalog and the on-disk installed-package database - into
//! one per-package version ledger, and derives the structures a viewer
//! displays from it.
//!
//! # Architecture
//!
//! - [`catalog`]: the read-only availability-catalog data model
//! - [`installed`]: the installed-package database lister
//! - [`merge`]: the reconciliation engine and zombie detection
//! - [`tree`]: the two-level category tree with rolled-up package counts
//! - [`report`]: the flat per-package report rows
//! - [`session`]: the context object tying the pieces together
//!
//! All state lives in process memory and is rebuilt wholesale on each load;
//! the core is single-threaded and driven by one reload at a time.

pub mod catalog;
pub mod installed;
pub mod merge;
pub mod report;
pub mod session;
pub mod tree;

pub use catalog::{CatalogError, Collection, InstallKind, KeyFlag, MaskFlag};
pub use installed::{InstalledEntry, InstalledLister, ListerError, PkgDbLister};
pub use merge::{MergeMode, MergedPackageList, PackageKey, Provenance, VersionInfo, VersionLedger};
pub use report::{PackageReportItem, PackageReportModel};
pub use session::{SelectionFilter, Session};
pub use tree::{CategoryTree, CellValue, NodeId};
