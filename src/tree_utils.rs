//! Index traversal utilities

use crate::error::{Error, PageId, Result};
use crate::index::{Child, IndexPage};
use crate::page::DataPage;
use crate::record::Key;

/// One index page as seen by [`IndexWalk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLevel<'a> {
    /// Distance from the root, which is at depth 0
    pub depth: usize,
    /// Separator keys of the page
    pub keys: &'a [Key],
    /// Whether the page's children are data pages
    pub is_leaf: bool,
}

/// Pre-order iterator over the pages of an index
#[derive(Debug, Clone)]
pub struct IndexWalk<'a> {
    stack: Vec<(usize, &'a IndexPage)>,
}

impl<'a> IndexWalk<'a> {
    /// Walk the index rooted at `root`
    pub fn new(root: Option<&'a IndexPage>) -> Self {
        Self { stack: root.map(|page| (0, page)).into_iter().collect() }
    }
}

impl<'a> Iterator for IndexWalk<'a> {
    type Item = IndexLevel<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, page) = self.stack.pop()?;
        // Push right to left so the leftmost child is visited first.
        for child in page.children().iter().rev() {
            if let Child::Index(node) = child {
                self.stack.push((depth + 1, node.as_ref()));
            }
        }
        Some(IndexLevel { depth, keys: page.keys(), is_leaf: page.is_leaf() })
    }
}

/// Data pages reachable from `root`, left to right
pub fn collect_data_pages(root: &IndexPage) -> Vec<PageId> {
    let mut pages = Vec::new();
    collect_in_order(root, &mut pages);
    pages
}

fn collect_in_order(page: &IndexPage, out: &mut Vec<PageId>) {
    for child in page.children() {
        match child {
            Child::Data(id) => out.push(*id),
            Child::Index(node) => collect_in_order(node, out),
        }
    }
}

/// Check every index page against the page sequence.
///
/// Verifies separator counts, separator values (the maximum primary key of
/// the child on their left), fan-out limits, leaf flags, and that the data
/// pages are reached exactly once in physical order.
pub fn verify_index(root: &IndexPage, pages: &[DataPage], fan_out: usize) -> Result<()> {
    verify_page(root, pages, fan_out)?;

    let reached = collect_data_pages(root);
    if reached.len() != pages.len() {
        return Err(Error::Corruption {
            details: format!("index reaches {} of {} data pages", reached.len(), pages.len()),
            page_id: None,
        });
    }
    for (position, (id, page)) in reached.iter().zip(pages).enumerate() {
        if id.0 != position || page.id() != *id {
            return Err(Error::Corruption {
                details: format!("data page at position {position} is out of order"),
                page_id: Some(*id),
            });
        }
    }
    Ok(())
}

fn verify_page(page: &IndexPage, pages: &[DataPage], fan_out: usize) -> Result<()> {
    let children = page.children();
    if page.keys().len() + 1 != children.len() {
        return Err(Error::Corruption {
            details: format!(
                "{} separators for {} children",
                page.keys().len(),
                children.len()
            ),
            page_id: None,
        });
    }
    if children.len() > fan_out {
        return Err(Error::Corruption {
            details: format!("{} children exceed fan-out {fan_out}", children.len()),
            page_id: None,
        });
    }
    let all_data = children.iter().all(|c| matches!(c, Child::Data(_)));
    if all_data != page.is_leaf() {
        return Err(Error::Corruption { details: "leaf flag mismatch".into(), page_id: None });
    }

    for (separator, child) in page.keys().iter().zip(children) {
        let max = child.max_key(pages);
        if max != Some(*separator) {
            return Err(Error::Corruption {
                details: format!("separator {separator} does not match child maximum {max:?}"),
                page_id: match child {
                    Child::Data(id) => Some(*id),
                    Child::Index(_) => None,
                },
            });
        }
    }

    for child in children {
        match child {
            Child::Data(id) if id.0 >= pages.len() => return Err(Error::PageNotFound(*id)),
            Child::Data(_) => {}
            Child::Index(node) => verify_page(node, pages, fan_out)?,
        }
    }
    Ok(())
}
