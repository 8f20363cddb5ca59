//! Bottom-up construction of data pages and the routing index
//!
//! Sorted records are packed into full data pages, a single leaf index page
//! is laid over all of them, and index levels are stacked on top until one
//! page fits within the fan-out. Each new level groups the children of the
//! level below into `ceil(n / fan_out)` groups of `ceil(n / groups)` children,
//! which keeps every page within the fan-out without leaving a tiny trailing
//! group whenever the counts divide evenly.

use crate::config::IsamConfig;
use crate::error::PageId;
use crate::index::{Child, IndexPage};
use crate::page::DataPage;
use crate::record::Record;

/// Pack sorted records into data pages in input order
pub(crate) fn pack_pages(records: &[Record], config: &IsamConfig) -> Vec<DataPage> {
    records
        .chunks(config.data_page_capacity)
        .enumerate()
        .map(|(i, chunk)| {
            let mut page =
                DataPage::new(PageId(i), config.data_page_capacity, config.overflow_page_capacity);
            for record in chunk {
                page.insert(record.key, record.value);
            }
            page
        })
        .collect()
}

/// Build the index over `pages`, returning the root.
///
/// Returns `None` when there are no pages.
pub(crate) fn build_index(pages: &[DataPage], fan_out: usize) -> Option<IndexPage> {
    if pages.is_empty() {
        return None;
    }

    let leaf_children = pages.iter().map(|page| Child::Data(page.id())).collect();
    let mut current = IndexPage::from_children(leaf_children, pages);

    let mut levels = 1;
    while current.keys().len() > fan_out - 1 {
        current = build_next_level(current, pages, fan_out);
        levels += 1;
    }

    tracing::debug!(
        target: "isam::builder",
        data_pages = pages.len(),
        levels,
        root_children = current.children().len(),
        "built index"
    );
    Some(current)
}

/// Regroup the children of an oversized index page into a new level.
///
/// The returned page's children are the newly formed groups.
fn build_next_level(current: IndexPage, pages: &[DataPage], fan_out: usize) -> IndexPage {
    let children = current.into_children();
    let n = children.len();
    let groups = n.div_ceil(fan_out);
    let group_size = n.div_ceil(groups);

    let mut nodes = Vec::with_capacity(groups);
    let mut rest = children.into_iter().peekable();
    while rest.peek().is_some() {
        let group: Vec<Child> = rest.by_ref().take(group_size).collect();
        nodes.push(Child::Index(Box::new(IndexPage::from_children(group, pages))));
    }

    tracing::trace!(
        target: "isam::builder",
        children = n,
        groups = nodes.len(),
        group_size,
        "grouped index level"
    );
    IndexPage::from_children(nodes, pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Key;

    fn records(keys: impl IntoIterator<Item = Key>) -> Vec<Record> {
        keys.into_iter().map(Record::keyed).collect()
    }

    fn child_counts(node: &IndexPage) -> Vec<usize> {
        node.children()
            .iter()
            .map(|child| match child {
                Child::Index(page) => page.children().len(),
                Child::Data(_) => 0,
            })
            .collect()
    }

    #[test]
    fn test_pack_pages_fills_each_page() {
        let config = IsamConfig::default();
        let pages = pack_pages(&records(1..=10), &config);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].records().len(), 4);
        assert_eq!(pages[2].records().len(), 2);
        assert!(pages.iter().all(|p| p.overflow().is_none()));
        assert_eq!(pages[1].id(), PageId(1));
    }

    #[test]
    fn test_single_level_when_within_fan_out() {
        let config = IsamConfig::default();
        let pages = pack_pages(&records(1..=12), &config);
        let root = build_index(&pages, config.fan_out).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.keys(), &[4, 8]);
        assert_eq!(root.height(), 1);
    }

    #[test]
    fn test_four_pages_split_into_balanced_pairs() {
        let config = IsamConfig::default();
        let keys = [3, 7, 9, 14, 15, 18, 21, 25, 30, 32, 40, 41, 50, 55, 60, 70];
        let pages = pack_pages(&records(keys), &config);
        let root = build_index(&pages, config.fan_out).unwrap();

        assert!(!root.is_leaf());
        assert_eq!(root.keys(), &[25]);
        assert_eq!(child_counts(&root), vec![2, 2]);
        match &root.children()[1] {
            Child::Index(node) => {
                assert!(node.is_leaf());
                assert_eq!(node.keys(), &[41]);
            }
            Child::Data(_) => panic!("expected index child"),
        }
    }

    #[test]
    fn test_multi_level_respects_fan_out() {
        let config = IsamConfig::default();
        // 10 data pages: groups = 4, group size = 3.
        let pages = pack_pages(&records(0..40), &config);
        let root = build_index(&pages, config.fan_out).unwrap();
        assert_eq!(root.height(), 3);
        assert!(root.children().len() <= config.fan_out);
        assert_eq!(root.max_key(&pages), Some(39));
    }

    #[test]
    fn test_empty_input_has_no_index() {
        let pages = pack_pages(&[], &IsamConfig::default());
        assert!(pages.is_empty());
        assert!(build_index(&pages, 3).is_none());
    }
}
