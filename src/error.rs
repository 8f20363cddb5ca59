//! Error types for isam

use std::fmt;
use thiserror::Error;

use crate::record::Key;

/// The main error type for isam operations
///
/// Lookups and scans never fail: absence is reported through `Option` or an
/// empty result. Errors only come from configuration and checked builds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Input handed to a checked build is not in ascending key order
    #[error("Unsorted input at position {index}: {key} follows {previous}")]
    UnsortedInput {
        /// Position of the offending key
        index: usize,
        /// Key immediately before the offending one
        previous: Key,
        /// The offending key
        key: Key,
    },

    /// Index structure violates one of its invariants
    #[error("Corruption detected: {details}")]
    Corruption {
        /// Description of the violated invariant
        details: String,
        /// Data page involved, if any
        page_id: Option<PageId>,
    },

    /// Page not found in the physical page sequence
    #[error("Page {0} not found")]
    PageNotFound(PageId),
}

/// Position of a data page in the physical page sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(pub usize);

impl PageId {
    /// The page that physically follows this one
    #[inline]
    pub fn next(self) -> PageId {
        PageId(self.0 + 1)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result type alias for isam operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::UnsortedInput { index: 3, previous: 9, key: 4 };
        assert_eq!(err.to_string(), "Unsorted input at position 3: 4 follows 9");

        let err = Error::PageNotFound(PageId(7));
        assert_eq!(err.to_string(), "Page 7 not found");
    }

    #[test]
    fn test_page_id_next() {
        assert_eq!(PageId(0).next(), PageId(1));
        assert!(PageId(1) < PageId(2));
    }
}
