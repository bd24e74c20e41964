// src/session.rs

//! The per-process browsing context.
//!
//! A [`Session`] owns the loaded catalog, the merged package store and the
//! two derived views, plus the caller's filter state. It is constructed
//! once at startup and passed down explicitly; there is no global instance.

use crate::catalog::Collection;
use crate::installed::InstalledEntry;
use crate::merge::{MergeMode, MergedPackageList};
use crate::report::PackageReportModel;
use crate::tree::{CategoryTree, NodeId};

/// Which subset of packages the catalog was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionFilter {
    #[default]
    All,
    Installed,
    World,
}

/// Everything a viewer needs: catalog, merged store, category tree, report,
/// and the current filter state.
#[derive(Debug, Default)]
pub struct Session {
    catalog: Collection,
    packages: MergedPackageList,
    category_tree: CategoryTree,
    report: PackageReportModel,
    selection: SelectionFilter,
    search: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Collection {
        &self.catalog
    }

    pub fn packages(&self) -> &MergedPackageList {
        &self.packages
    }

    pub fn category_tree(&self) -> &CategoryTree {
        &self.category_tree
    }

    pub fn report(&self) -> &PackageReportModel {
        &self.report
    }

    pub fn selection_filter(&self) -> SelectionFilter {
        self.selection
    }

    pub fn set_selection_filter(&mut self, filter: SelectionFilter) {
        self.selection = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Whether any filter is currently active.
    pub fn filters_active(&self) -> bool {
        self.selection != SelectionFilter::All || !self.search.is_empty()
    }

    /// The merge mode for the next load. A search-filtered catalog must not
    /// have filtered-out packages re-added from the installed side, so a
    /// non-empty search forces [`MergeMode::MergeOnly`]. Packages outside
    /// the filter are then invisible to zombie detection for this load; that
    /// is the documented trade-off, not a defect.
    pub fn merge_mode(&self) -> MergeMode {
        if self.search.is_empty() {
            MergeMode::Add
        } else {
            MergeMode::MergeOnly
        }
    }

    /// Take ownership of a freshly parsed catalog, merge the installed
    /// entries into it, and rebuild the category tree.
    pub fn load_catalog(&mut self, catalog: Collection, installed: Vec<InstalledEntry>) {
        let mode = self.merge_mode();
        self.packages.load(&catalog, installed, mode);
        self.catalog = catalog;
        self.rebuild_category_tree();
    }

    /// Rebuild the report for the subtree rooted at `node`: containers
    /// recurse into their children, leaves emit one row per catalog package.
    pub fn populate_report(&mut self, node: NodeId) {
        self.report.start_update();
        self.report.clear();

        let mut leaves = Vec::new();
        collect_leaf_categories(&self.category_tree, node, &mut leaves);

        for category_index in leaves {
            let Some(category) = self.catalog.category(category_index) else {
                continue;
            };
            for package in &category.packages {
                let zombies = self.packages.zombie_versions(&category.name, &package.name);
                self.report.add_package(&category.name, package, zombies);
            }
        }

        self.report.end_update();
    }

    fn rebuild_category_tree(&mut self) {
        self.category_tree.start_update();
        self.category_tree.clear();

        for (index, category) in self.catalog.categories.iter().enumerate() {
            self.category_tree
                .add_category(index, &category.name, category.packages.len() as u64);
        }

        self.category_tree.end_update();
    }
}

/// Catalog indexes of every leaf at or below `node`, in tree order.
fn collect_leaf_categories(tree: &CategoryTree, node: NodeId, out: &mut Vec<usize>) {
    if tree.is_container(node) {
        for row in 0..tree.child_count(node) {
            if let Some(child) = tree.child(node, row) {
                collect_leaf_categories(tree, child, out);
            }
        }
    } else {
        out.push(tree.category_index(node) as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Package};

    fn catalog() -> Collection {
        Collection {
            categories: vec![
                Category {
                    name: "dev-qt".to_string(),
                    packages: vec![
                        Package {
                            name: "qtcore".to_string(),
                            ..Package::default()
                        },
                        Package {
                            name: "qtgui".to_string(),
                            ..Package::default()
                        },
                    ],
                },
                Category {
                    name: "dev-lang".to_string(),
                    packages: vec![Package {
                        name: "rust".to_string(),
                        ..Package::default()
                    }],
                },
                Category {
                    name: "virtual".to_string(),
                    packages: vec![Package {
                        name: "libc".to_string(),
                        ..Package::default()
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_merge_mode_follows_search() {
        let mut session = Session::new();
        assert_eq!(session.merge_mode(), MergeMode::Add);
        assert!(!session.filters_active());

        session.set_search("qt");
        assert_eq!(session.merge_mode(), MergeMode::MergeOnly);
        assert!(session.filters_active());

        session.set_search("");
        session.set_selection_filter(SelectionFilter::World);
        assert_eq!(session.merge_mode(), MergeMode::Add);
        assert!(session.filters_active());
    }

    #[test]
    fn test_load_builds_tree() {
        let mut session = Session::new();
        session.load_catalog(catalog(), Vec::new());

        let tree = session.category_tree();
        let all = tree.all();
        assert_eq!(tree.package_count(all), 4);
        assert_eq!(tree.child_count(all), 2);

        let dev = tree.find_child(all, "dev").unwrap();
        assert_eq!(tree.package_count(dev), 3);
        assert_eq!(tree.child_count(dev), 2);
        assert!(tree.find_child(all, "virtual").is_some());
    }

    #[test]
    fn test_reload_resets_tree() {
        let mut session = Session::new();
        session.load_catalog(catalog(), Vec::new());
        session.load_catalog(catalog(), Vec::new());

        let tree = session.category_tree();
        assert_eq!(tree.package_count(tree.all()), 4);
        assert_eq!(tree.child_count(tree.all()), 2);
    }

    #[test]
    fn test_populate_report_for_leaf() {
        let mut session = Session::new();
        session.load_catalog(catalog(), Vec::new());

        let tree = session.category_tree();
        let dev = tree.find_child(tree.all(), "dev").unwrap();
        let qt = tree.find_child(dev, "qt").unwrap();

        session.populate_report(qt);
        assert_eq!(session.report().row_count(), 2);
        assert_eq!(session.report().item(0).unwrap().name(), "qtcore");
    }

    #[test]
    fn test_populate_report_recurses_containers() {
        let mut session = Session::new();
        session.load_catalog(catalog(), Vec::new());

        let all = session.category_tree().all();
        session.populate_report(all);
        assert_eq!(session.report().row_count(), 4);

        let dev = session
            .category_tree()
            .find_child(session.category_tree().all(), "dev")
            .unwrap();
        session.populate_report(dev);
        assert_eq!(session.report().row_count(), 3);
    }
}
