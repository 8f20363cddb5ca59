//! The ISAM coordinator
//!
//! [`Isam`] owns the physical page sequence and the root of the routing
//! index. The index is built once from sorted input and is never restructured
//! by inserts: new records land in the primary list of the page they route to
//! while it has room, and in that page's overflow chain afterwards. Calling
//! [`Isam::rebuild`] packs everything back into a compact layout.

use crate::builder::{build_index, pack_pages};
use crate::config::IsamConfig;
use crate::error::{Error, PageId, Result};
use crate::index::IndexPage;
use crate::page::{DataPage, Placement};
use crate::record::{Key, Record, Value};
use crate::stats::IsamStats;
use crate::tree_utils::{self, IndexWalk};

/// An in-memory ISAM structure
#[derive(Debug, Clone)]
pub struct Isam {
    config: IsamConfig,
    /// Data pages in ascending key order; a page's position is its `PageId`
    pages: Vec<DataPage>,
    root: Option<IndexPage>,
}

impl Default for Isam {
    fn default() -> Self {
        Self::new()
    }
}

impl Isam {
    /// Create an empty structure with the default layout
    pub fn new() -> Self {
        Self::with_valid_config(IsamConfig::default())
    }

    /// Create an empty structure with a custom layout
    pub fn with_config(config: IsamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    pub(crate) fn with_valid_config(config: IsamConfig) -> Self {
        Self { config, pages: Vec::new(), root: None }
    }

    /// Layout parameters
    pub fn config(&self) -> &IsamConfig {
        &self.config
    }

    /// Build from keys in ascending order, each stored with itself as payload.
    ///
    /// Any previous contents are discarded. The input is expected to be
    /// sorted; lookups on an index built from unsorted keys may miss records.
    /// Use [`Isam::try_build`] to have the order checked first.
    pub fn build(&mut self, sorted_keys: &[Key]) {
        let records: Vec<Record> = sorted_keys.iter().copied().map(Record::keyed).collect();
        self.build_records(&records);
    }

    /// Build from records in ascending key order
    pub fn build_records(&mut self, sorted_records: &[Record]) {
        self.pages = pack_pages(sorted_records, &self.config);
        self.root = build_index(&self.pages, self.config.fan_out);
    }

    /// Check that `sorted_keys` is ascending, then build.
    ///
    /// On error the current contents are left untouched.
    pub fn try_build(&mut self, sorted_keys: &[Key]) -> Result<()> {
        check_sorted(sorted_keys)?;
        self.build(sorted_keys);
        Ok(())
    }

    /// Look up the payload stored under `key`
    pub fn get(&self, key: Key) -> Option<Value> {
        let id = self.root.as_ref()?.descend(key);
        self.pages[id.0].get(key)
    }

    /// Whether a record with `key` exists
    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Payloads of the records with keys in `low..=high`.
    ///
    /// Primary records come out in page order. Each visited page's overflow
    /// chain is scanned in full after its primary records, so overflow
    /// payloads are interleaved in chain order and the result is not sorted.
    ///
    /// The scan stops as soon as the next page's smallest primary key exceeds
    /// `high`. Overflow records of pages past that point are not examined,
    /// even if they fall in range.
    pub fn range_scan(&self, low: Key, high: Key) -> Vec<Value> {
        let mut out = Vec::new();
        if low > high {
            return out;
        }
        let Some(mut id) = self.start_page(low) else {
            return out;
        };

        loop {
            let page = &self.pages[id.0];

            let mut past_high = false;
            for record in page.records() {
                if record.key < low {
                    continue;
                }
                if record.key > high {
                    past_high = true;
                    break;
                }
                out.push(record.value);
            }

            // Overflow pages are not ordered relative to each other or to
            // the primary list: always scan the whole chain.
            out.extend(
                page.overflow_records()
                    .filter(|record| (low..=high).contains(&record.key))
                    .map(|record| record.value),
            );

            if past_high {
                break;
            }
            id = id.next();
            match self.pages.get(id.0) {
                None => break,
                Some(next) if next.min_key().is_some_and(|min| min > high) => {
                    tracing::trace!(
                        target: "isam::scan",
                        page = id.0,
                        high,
                        "next page starts past range, stopping"
                    );
                    break;
                }
                Some(_) => {}
            }
        }
        out
    }

    /// First page that can hold keys `>= low`.
    ///
    /// Routing picks the first child whose maximum is `>= low`, except that
    /// keys beyond every separator land on the last child; in that case the
    /// routed page may end below `low` and the scan moves to the next one.
    /// The last page is kept even then: its overflow chain receives every
    /// insert above the built maximum.
    fn start_page(&self, low: Key) -> Option<PageId> {
        let id = self.root.as_ref()?.descend(low);
        let next = id.next();
        if self.pages[id.0].max_key().is_some_and(|max| max < low) && next.0 < self.pages.len() {
            return Some(next);
        }
        Some(id)
    }

    /// Insert `key` with itself as payload
    pub fn insert(&mut self, key: Key) -> Placement {
        self.insert_record(key, key)
    }

    /// Insert a record.
    ///
    /// An empty structure is bootstrapped as a one-page build. Otherwise the
    /// record goes to the page the index routes `key` to; the index itself is
    /// never changed.
    pub fn insert_record(&mut self, key: Key, value: Value) -> Placement {
        let Some(root) = self.root.as_ref() else {
            self.build_records(&[Record::new(key, value)]);
            return Placement::Primary;
        };
        let id = root.descend(key);
        self.pages[id.0].insert(key, value)
    }

    /// Repack every record, overflow included, into a compact layout with a
    /// fresh index.
    ///
    /// Records with equal keys keep their relative order from a physical
    /// scan: primary records of a page before its overflow records.
    pub fn rebuild(&mut self) {
        let before = self.stats();
        let mut records: Vec<Record> = self.records().copied().collect();
        records.sort_by_key(|record| record.key);
        self.build_records(&records);

        tracing::debug!(
            target: "isam::rebuild",
            records = records.len(),
            data_pages_before = before.data_pages,
            overflow_pages_before = before.overflow_pages,
            data_pages_after = self.pages.len(),
            depth = self.depth(),
            "rebuilt index"
        );
    }

    /// Every record in physical order: each page's primary records, then its
    /// overflow records in chain order
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.pages.iter().flat_map(|page| page.records().iter().chain(page.overflow_records()))
    }

    /// Number of records, overflow included
    pub fn len(&self) -> usize {
        self.pages.iter().map(DataPage::len).sum()
    }

    /// Whether nothing has been built or inserted yet
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of data pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of index levels above the data pages
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, IndexPage::height)
    }

    /// Root of the routing index
    pub fn root(&self) -> Option<&IndexPage> {
        self.root.as_ref()
    }

    /// The physical page sequence
    pub fn pages(&self) -> &[DataPage] {
        &self.pages
    }

    /// Data page at `id`
    pub fn page(&self, id: PageId) -> Result<&DataPage> {
        self.pages.get(id.0).ok_or(Error::PageNotFound(id))
    }

    /// Pre-order walk over the index pages
    pub fn walk_index(&self) -> IndexWalk<'_> {
        IndexWalk::new(self.root.as_ref())
    }

    /// Primary keys of each data page, in physical order
    pub fn data_page_keys(&self) -> Vec<Vec<Key>> {
        self.pages.iter().map(|page| page.records().iter().map(|r| r.key).collect()).collect()
    }

    /// Check the index against the page sequence
    pub fn verify(&self) -> Result<()> {
        match &self.root {
            Some(root) => tree_utils::verify_index(root, &self.pages, self.config.fan_out),
            None if self.pages.is_empty() => Ok(()),
            None => Err(Error::Corruption {
                details: format!("{} data pages without an index", self.pages.len()),
                page_id: None,
            }),
        }
    }

    /// Page, record and index counters
    pub fn stats(&self) -> IsamStats {
        IsamStats::collect(self)
    }
}

/// Reject the first key that is smaller than its predecessor
fn check_sorted(keys: &[Key]) -> Result<()> {
    match keys.windows(2).position(|pair| pair[0] > pair[1]) {
        Some(i) => Err(Error::UnsortedInput { index: i + 1, previous: keys[i], key: keys[i + 1] }),
        None => Ok(()),
    }
}
