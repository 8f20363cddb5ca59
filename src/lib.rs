//! In-memory Index Sequential Access Method
//!
//! Sorted keys are packed into fixed-capacity primary data pages and covered
//! by a static, multi-level routing index built bottom-up. Inserts never
//! restructure the index: they fill the routed page's primary list and then
//! spill into a chain of overflow pages. Point lookups descend the index and
//! search the page and its chain; range scans walk the physical page sequence.
//!
//! ```
//! use isam::Isam;
//!
//! let mut isam = Isam::new();
//! isam.build(&[3, 7, 9, 14, 15, 18, 21, 25]);
//! isam.insert(16);
//!
//! assert_eq!(isam.get(16), Some(16));
//! assert_eq!(isam.get(8), None);
//! assert_eq!(isam.range_scan(20, 30), vec![21, 25]);
//! ```
//!
//! The structure is single-threaded and entirely memory resident.

#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod index;
pub mod isam;
pub mod overflow;
pub mod page;
pub mod record;
pub mod stats;
pub mod tree_utils;

// Re-exports
pub use config::{IsamBuilder, IsamConfig};
pub use error::{Error, PageId, Result};
pub use index::{Child, IndexPage};
pub use isam::Isam;
pub use page::{DataPage, Placement};
pub use record::{Key, Record, Value};
pub use stats::IsamStats;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
