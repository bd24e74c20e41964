// src/tree/mod.rs

//! Two-level category tree with running package counts.
//!
//! The tree is derived from the availability catalog alone: each catalog
//! category named "group-subgroup" becomes a leaf under a shared "group"
//! container, and dashless names become leaves directly under the synthetic
//! "All" node. Counts roll up incrementally as leaves are appended.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; parent/child
//! links are stored as indices. Ids are invalidated by [`CategoryTree::clear`]
//! - consumers must re-read the whole structure after a rebuild, which is
//! exactly the contract the [`CategoryTree::start_update`] /
//! [`CategoryTree::end_update`] bracket announces.

use std::fmt;

use tracing::{debug, trace};

/// Column captions shown by tree views.
pub const HEADERS: [&str; 3] = ["Categories", "Pkgs", "Idx"];

/// Index of a node within its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Tree columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    PkgCount,
    CatIndex,
}

impl Column {
    pub const COUNT: usize = 3;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Name),
            1 => Some(Self::PkgCount),
            2 => Some(Self::CatIndex),
            _ => None,
        }
    }
}

/// A single displayable tree cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Count(u64),
    Index(i64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Count(n) => write!(f, "{}", n),
            CellValue::Index(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug)]
struct Node {
    name: String,
    package_count: u64,
    /// Catalog index of the category this leaf represents; -1 for
    /// containers, which have no direct catalog entry.
    category_index: i64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The category tree. Always contains a hidden root and its single child
/// "All", the visible ancestor of every category.
#[derive(Debug)]
pub struct CategoryTree {
    nodes: Vec<Node>,
    root: NodeId,
    all: NodeId,
}

impl CategoryTree {
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            all: NodeId(1),
        };
        tree.nodes.push(Node {
            name: String::new(),
            package_count: 0,
            category_index: -1,
            parent: None,
            children: Vec::new(),
        });
        let all = tree.append_child(tree.root, "All", 0, -1);
        debug_assert_eq!(all, tree.all);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn all(&self) -> NodeId {
        self.all
    }

    pub fn header(&self, column: usize) -> Option<&'static str> {
        HEADERS.get(column).copied()
    }

    /// Announce the start of a rebuild. Consumers must treat the tree as
    /// unreadable until [`end_update`](Self::end_update).
    pub fn start_update(&mut self) {
        trace!("category tree rebuild started");
    }

    /// Announce the end of a rebuild; consumers re-read the whole tree.
    pub fn end_update(&mut self) {
        trace!("category tree rebuild finished");
    }

    /// Remove every category, keeping the root and the "All" node. Any
    /// previously handed-out ids below "All" become invalid.
    pub fn clear(&mut self) {
        self.nodes.truncate(self.all.0 + 1);
        self.nodes[self.all.0].children.clear();
        self.nodes[self.all.0].package_count = 0;
    }

    /// Add one catalog category.
    ///
    /// The name splits at its first dash into (group, subgroup): the leaf is
    /// appended under a find-or-created group container, and counts roll up
    /// into the container and "All". Dashless names become leaves directly
    /// under "All". Odd names are logged but still processed; splitting
    /// always uses the first dash only, any further dashes stay in the
    /// subgroup name.
    pub fn add_category(&mut self, index: usize, name: &str, size: u64) {
        if name.is_empty() {
            debug!("empty category name");
        } else if name.starts_with('-') {
            debug!(category = %name, "category name starts with a dash");
        }

        match name.split_once('-') {
            None => {
                self.append_child(self.all, name, size, index as i64);
            }
            Some((group, subgroup)) => {
                if subgroup.contains('-') {
                    debug!(category = %name, "category name with more than one dash");
                }
                let top = self
                    .find_child(self.all, group)
                    .unwrap_or_else(|| self.append_child(self.all, group, 0, -1));
                self.append_child(top, subgroup, size, index as i64);
                self.nodes[top.0].package_count += size;
            }
        }
        self.nodes[self.all.0].package_count += size;
    }

    /// Direct child of `node` with exactly this name, by linear scan.
    pub fn find_child(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].name == name)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn child(&self, node: NodeId, row: usize) -> Option<NodeId> {
        self.nodes[node.0].children.get(row).copied()
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.nodes[node.0].children.len()
    }

    /// Position of `node` within its parent's child list; 0 for the root.
    pub fn row(&self, node: NodeId) -> usize {
        match self.nodes[node.0].parent {
            Some(parent) => self.nodes[parent.0]
                .children
                .iter()
                .position(|&c| c == node)
                .unwrap_or(0),
            None => 0,
        }
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    pub fn package_count(&self, node: NodeId) -> u64 {
        self.nodes[node.0].package_count
    }

    pub fn category_index(&self, node: NodeId) -> i64 {
        self.nodes[node.0].category_index
    }

    /// Containers group leaves and have no catalog entry of their own.
    pub fn is_container(&self, node: NodeId) -> bool {
        self.nodes[node.0].category_index < 0
    }

    /// Column-indexed cell access; out-of-range columns yield `None`.
    pub fn cell(&self, node: NodeId, column: usize) -> Option<CellValue> {
        let node = &self.nodes[node.0];
        match Column::from_index(column)? {
            Column::Name => Some(CellValue::Text(node.name.clone())),
            Column::PkgCount => Some(CellValue::Count(node.package_count)),
            Column::CatIndex => Some(CellValue::Index(node.category_index)),
        }
    }

    fn append_child(&mut self, parent: NodeId, name: &str, size: u64, index: i64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            package_count: size,
            category_index: index,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl Default for CategoryTree {
    fn default() -> Self {
        Self::new()
    }
}
