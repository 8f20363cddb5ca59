//! Primary data pages
//!
//! Data pages are the leaves of the ISAM structure. They are laid out in
//! ascending key order in one flat sequence (the physical page sequence) and
//! addressed by [`PageId`], their position in that sequence. A data page's
//! primary record list has a fixed capacity that never grows; records that do
//! not fit go to the page's overflow chain.

use crate::error::PageId;
use crate::overflow::{insert_into_chain, search_chain, OverflowIter, OverflowPage};
use crate::record::{insert_sorted, search_sorted, Key, Record, Value};
use static_assertions::const_assert;

/// Default number of records held by the primary list of one data page
pub const DEFAULT_DATA_PAGE_CAPACITY: usize = 4;

const_assert!(DEFAULT_DATA_PAGE_CAPACITY > 0);
const_assert!(crate::overflow::DEFAULT_OVERFLOW_PAGE_CAPACITY > 0);

/// Where a record ended up after [`DataPage::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Stored in the primary record list
    Primary,
    /// Stored in an existing overflow page
    Overflow,
    /// Stored in a freshly linked overflow page
    NewOverflowPage,
}

/// A primary page with its overflow chain
#[derive(Debug, Clone)]
pub struct DataPage {
    id: PageId,
    records: Vec<Record>,
    capacity: usize,
    overflow_capacity: usize,
    overflow: Option<Box<OverflowPage>>,
}

impl DataPage {
    /// Create an empty page at position `id` of the physical sequence
    pub fn new(id: PageId, capacity: usize, overflow_capacity: usize) -> Self {
        Self {
            id,
            records: Vec::with_capacity(capacity),
            capacity,
            overflow_capacity,
            overflow: None,
        }
    }

    /// Position of this page in the physical page sequence
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Insert a record.
    ///
    /// While the primary list has room the record is placed in key order
    /// there. Afterwards it goes to the first non-full overflow page, and a
    /// new overflow page is linked at the tail when all are full.
    pub fn insert(&mut self, key: Key, value: Value) -> Placement {
        let record = Record::new(key, value);
        if !self.is_full() {
            insert_sorted(&mut self.records, record);
            return Placement::Primary;
        }

        if insert_into_chain(&mut self.overflow, record, self.overflow_capacity) {
            tracing::debug!(
                target: "isam::page",
                page = self.id.0,
                chain_len = self.overflow_pages().count(),
                "linked new overflow page"
            );
            Placement::NewOverflowPage
        } else {
            Placement::Overflow
        }
    }

    /// Whether the primary list has reached its capacity
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Smallest key in the primary list
    pub fn min_key(&self) -> Option<Key> {
        self.records.first().map(|r| r.key)
    }

    /// Largest key in the primary list. Overflow records are not considered.
    pub fn max_key(&self) -> Option<Key> {
        self.records.last().map(|r| r.key)
    }

    /// Primary records, sorted by key
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Head of the overflow chain
    pub fn overflow(&self) -> Option<&OverflowPage> {
        self.overflow.as_deref()
    }

    /// Overflow pages in link order
    pub fn overflow_pages(&self) -> OverflowIter<'_> {
        OverflowIter::new(self.overflow())
    }

    /// Every overflow record in chain order
    pub fn overflow_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.overflow_pages().flat_map(|page| page.records().iter())
    }

    /// Look up `key`: binary search of the primary list, then each overflow
    /// page in turn.
    pub fn get(&self, key: Key) -> Option<Value> {
        search_sorted(&self.records, key).or_else(|| search_chain(self.overflow(), key))
    }

    /// Number of records on the page, overflow included
    pub fn len(&self) -> usize {
        self.records.len() + self.overflow_records().count()
    }

    /// Whether the page holds no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.overflow.is_none()
    }
}
