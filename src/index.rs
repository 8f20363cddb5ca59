//! Index pages and key routing
//!
//! An index page stores `n` separator keys and `n + 1` children. Separator
//! `i` is the largest primary key reachable through child `i`, so a key equal
//! to a separator belongs to the child on the separator's left.
//!
//! Children of a leaf index page are data pages, referenced by their
//! [`PageId`]; children of an internal index page are owned index pages.

use crate::error::PageId;
use crate::page::DataPage;
use crate::record::Key;

/// Default maximum number of children per index page
pub const DEFAULT_FAN_OUT: usize = 3;

static_assertions::const_assert!(DEFAULT_FAN_OUT >= 2);

/// A child reference held by an index page
#[derive(Debug, Clone)]
pub enum Child {
    /// A data page in the physical page sequence
    Data(PageId),
    /// A lower index page
    Index(Box<IndexPage>),
}

impl Child {
    /// Largest primary key reachable through this child.
    ///
    /// Follows the rightmost child down to a data page; overflow chains are
    /// never consulted.
    pub fn max_key(&self, pages: &[DataPage]) -> Option<Key> {
        match self {
            Child::Data(id) => pages.get(id.0).and_then(DataPage::max_key),
            Child::Index(node) => node.max_key(pages),
        }
    }
}

/// A page of the routing index
#[derive(Debug, Clone)]
pub struct IndexPage {
    keys: Vec<Key>,
    children: Vec<Child>,
    is_leaf: bool,
}

impl IndexPage {
    /// Build an index page over `children`, deriving one separator per child
    /// except the last from the children's maximum keys.
    ///
    /// `children` must not be empty and every data page it reaches must hold
    /// at least one primary record.
    pub(crate) fn from_children(children: Vec<Child>, pages: &[DataPage]) -> Self {
        debug_assert!(!children.is_empty(), "index page without children");
        let is_leaf = children.iter().all(|c| matches!(c, Child::Data(_)));
        let keys = children[..children.len().saturating_sub(1)]
            .iter()
            .filter_map(|child| child.max_key(pages))
            .collect::<Vec<_>>();
        debug_assert_eq!(keys.len() + 1, children.len(), "separator missing for empty page");
        Self { keys, children, is_leaf }
    }

    /// Separator keys, ascending
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Children in ascending key-range order
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Whether the children are data pages
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub(crate) fn into_children(self) -> Vec<Child> {
        self.children
    }

    /// Slot of the child responsible for `key`: the smallest `i` with
    /// `keys[i] >= key`, or the last child when every separator is smaller.
    pub fn route_slot(&self, key: Key) -> usize {
        self.keys.partition_point(|&separator| separator < key)
    }

    /// Route `key` down to the data page that owns it
    pub fn descend(&self, key: Key) -> PageId {
        let mut node = self;
        let mut depth = 0usize;
        loop {
            let slot = node.route_slot(key);
            tracing::trace!(
                target: "isam::index",
                depth,
                slot,
                leaf = node.is_leaf,
                "descending through index page"
            );
            match &node.children[slot] {
                Child::Data(id) => return *id,
                Child::Index(child) => {
                    node = child.as_ref();
                    depth += 1;
                }
            }
        }
    }

    /// Largest primary key reachable through this page
    pub fn max_key(&self, pages: &[DataPage]) -> Option<Key> {
        self.children.last().and_then(|child| child.max_key(pages))
    }

    /// Number of index levels from this page down to the data pages
    pub fn height(&self) -> usize {
        let mut node = self;
        let mut height = 1;
        while let Some(Child::Index(child)) = node.children.first() {
            node = child.as_ref();
            height += 1;
        }
        height
    }
}
