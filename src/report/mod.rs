// src/report/mod.rs

//! Flat per-package report.
//!
//! The report is rebuilt on demand for whichever category subtree is
//! selected: one row per catalog package, combining the catalog entry with
//! the package's zombie ledger from the merged store. Rows are append-only
//! within a build cycle and cleared wholesale by the next one.

mod item;

pub use item::{highest_version_name, Column, PackageReportItem};

use tracing::trace;

use crate::catalog::Package;
use crate::merge::VersionLedger;

/// Column captions; the installed-marker column has none.
pub const HEADERS: [&str; Column::COUNT] = ["", "Package", "Version", "Available", "Description"];

/// Ordered list of report rows.
#[derive(Debug, Default)]
pub struct PackageReportModel {
    rows: Vec<PackageReportItem>,
}

impl PackageReportModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce the start of a rebuild; see [`CategoryTree::start_update`]
    /// for the consumer contract.
    ///
    /// [`CategoryTree::start_update`]: crate::tree::CategoryTree::start_update
    pub fn start_update(&mut self) {
        trace!("package report rebuild started");
    }

    pub fn end_update(&mut self) {
        trace!(rows = self.rows.len(), "package report rebuild finished");
    }

    /// Append one row for a catalog package.
    pub fn add_package(&mut self, category: &str, package: &Package, zombies: VersionLedger) {
        self.rows.push(PackageReportItem::new(category, package, zombies));
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        Column::COUNT
    }

    /// Row accessor; out-of-range rows yield `None`.
    pub fn item(&self, row: usize) -> Option<&PackageReportItem> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[PackageReportItem] {
        &self.rows
    }

    pub fn header(&self, column: usize) -> Option<&'static str> {
        HEADERS.get(column).copied()
    }
}
