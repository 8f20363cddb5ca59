//! Records and sorted record lists
//!
//! Both primary and overflow pages hold their records in a `Vec<Record>`
//! ordered by key. The helpers here keep that ordering and search it.

use std::cmp::Ordering;

/// Key type stored in the index
pub type Key = i32;

/// Payload type stored alongside each key
pub type Value = i32;

/// A single key/value entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record {
    /// Routing and ordering key
    pub key: Key,
    /// Payload returned by lookups
    pub value: Value,
}

impl Record {
    /// Create a new record
    pub fn new(key: Key, value: Value) -> Self {
        Self { key, value }
    }

    /// Record whose payload is its own key
    pub fn keyed(key: Key) -> Self {
        Self { key, value: key }
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Ordering looks at the key only. Two records with the same key but different
// payloads compare equal here even though `==` tells them apart.
impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Insert `record` into a key-sorted list.
///
/// Equal keys keep arrival order: the new record lands after every existing
/// record with the same key.
pub fn insert_sorted(records: &mut Vec<Record>, record: Record) {
    let pos = records.partition_point(|r| r.key <= record.key);
    records.insert(pos, record);
}

/// Binary search a key-sorted list, returning the payload of a matching record
pub fn search_sorted(records: &[Record], key: Key) -> Option<Value> {
    records
        .binary_search_by(|r| r.key.cmp(&key))
        .ok()
        .map(|i| records[i].value)
}
