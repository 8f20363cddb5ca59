//! Overflow page management
//!
//! Once a data page's primary record list is full, further records routed to
//! it are stored in a singly-linked chain of overflow pages. Each overflow page
//! keeps its own records sorted, but the chain as a whole is append-only and
//! therefore not globally ordered: a later page may hold smaller keys than an
//! earlier one.

use crate::record::{insert_sorted, search_sorted, Key, Record, Value};

/// Default number of records held by one overflow page
pub const DEFAULT_OVERFLOW_PAGE_CAPACITY: usize = 4;

/// A fixed-capacity page in an overflow chain
#[derive(Debug, Clone)]
pub struct OverflowPage {
    records: Vec<Record>,
    capacity: usize,
    next: Option<Box<OverflowPage>>,
}

impl OverflowPage {
    /// Create an empty overflow page
    pub fn new(capacity: usize) -> Self {
        Self { records: Vec::with_capacity(capacity), capacity, next: None }
    }

    /// Insert a record in key order.
    ///
    /// Callers go through [`insert_into_chain`], which only hands a record to
    /// a page that still has room.
    pub fn insert(&mut self, record: Record) {
        debug_assert!(!self.is_full(), "insert into full overflow page");
        insert_sorted(&mut self.records, record);
    }

    /// Whether the page has reached its capacity
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Records on this page, sorted by key
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Next page in the chain
    pub fn next(&self) -> Option<&OverflowPage> {
        self.next.as_deref()
    }

    /// Binary search this page alone
    pub fn get(&self, key: Key) -> Option<Value> {
        search_sorted(&self.records, key)
    }
}

/// Iterator over the pages of an overflow chain in link order
#[derive(Debug, Clone)]
pub struct OverflowIter<'a> {
    current: Option<&'a OverflowPage>,
}

impl<'a> OverflowIter<'a> {
    /// Start iterating at `head`
    pub fn new(head: Option<&'a OverflowPage>) -> Self {
        Self { current: head }
    }
}

impl<'a> Iterator for OverflowIter<'a> {
    type Item = &'a OverflowPage;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.current?;
        self.current = page.next();
        Some(page)
    }
}

/// Insert a record into the chain starting at `head`.
///
/// The record goes to the first page that is not full; if every page is full
/// (or the chain is empty) a new page is linked at the tail. Returns `true`
/// when a page was allocated.
pub fn insert_into_chain(
    head: &mut Option<Box<OverflowPage>>,
    record: Record,
    capacity: usize,
) -> bool {
    let mut slot = head;
    while let Some(page) = slot {
        if !page.is_full() {
            page.insert(record);
            return false;
        }
        slot = &mut page.next;
    }

    let mut page = Box::new(OverflowPage::new(capacity));
    page.insert(record);
    *slot = Some(page);
    true
}

/// Search every page of a chain, first hit in link order wins
pub fn search_chain(head: Option<&OverflowPage>, key: Key) -> Option<Value> {
    OverflowIter::new(head).find_map(|page| page.get(key))
}
