//! Page and record counters for monitoring overflow growth

use std::fmt;

use crate::isam::Isam;

/// Snapshot of how records are spread over an ISAM structure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsamStats {
    /// Number of primary data pages
    pub data_pages: usize,
    /// Data pages whose primary list is at capacity
    pub full_data_pages: usize,
    /// Overflow pages across all chains
    pub overflow_pages: usize,
    /// Longest overflow chain, in pages
    pub longest_chain: usize,
    /// Records held in primary lists
    pub primary_records: usize,
    /// Records held in overflow pages
    pub overflow_records: usize,
    /// Index pages, root included
    pub index_pages: usize,
    /// Index levels above the data pages
    pub depth: usize,
}

impl IsamStats {
    pub(crate) fn collect(isam: &Isam) -> Self {
        let mut stats = IsamStats {
            data_pages: isam.page_count(),
            index_pages: isam.walk_index().count(),
            depth: isam.depth(),
            ..Default::default()
        };

        for page in isam.pages() {
            if page.is_full() {
                stats.full_data_pages += 1;
            }
            stats.primary_records += page.records().len();

            let mut chain = 0;
            for overflow in page.overflow_pages() {
                chain += 1;
                stats.overflow_records += overflow.records().len();
            }
            stats.overflow_pages += chain;
            stats.longest_chain = stats.longest_chain.max(chain);
        }
        stats
    }

    /// Records in primary lists and overflow pages together
    pub fn total_records(&self) -> usize {
        self.primary_records + self.overflow_records
    }

    /// Share of records living in overflow pages (0.0 to 1.0)
    pub fn overflow_ratio(&self) -> f64 {
        let total = self.total_records();
        if total == 0 {
            0.0
        } else {
            self.overflow_records as f64 / total as f64
        }
    }

    /// Whether lookups may need to walk overflow chains
    pub fn has_overflow(&self) -> bool {
        self.overflow_pages > 0
    }
}

impl fmt::Display for IsamStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ISAM Layout:")?;
        writeln!(f, "  Index: {} pages over {} levels", self.index_pages, self.depth)?;
        writeln!(
            f,
            "  Data pages: {} ({} full)",
            self.data_pages, self.full_data_pages
        )?;
        writeln!(
            f,
            "  Overflow pages: {} (longest chain {})",
            self.overflow_pages, self.longest_chain
        )?;
        write!(
            f,
            "  Records: {} primary, {} overflow ({:.1}%)",
            self.primary_records,
            self.overflow_records,
            self.overflow_ratio() * 100.0
        )
    }
}
