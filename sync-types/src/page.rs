//! Paginated response envelope.

use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of items in the collection.
    pub count: u64,
    /// Total number of pages.
    pub pages: u32,
    /// Link to the next page, absent on the last page.
    pub next: Option<String>,
    /// Link to the previous page, absent on the first page.
    pub prev: Option<String>,
}

impl PageInfo {
    /// Whether the server advertises a page after this one.
    ///
    /// An empty `next` link counts as the last page.
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|link| !link.is_empty())
    }
}

/// One page of results plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Pagination metadata.
    pub info: PageInfo,
    /// Items on this page, in server order.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Create a page from metadata and results.
    pub fn new(info: PageInfo, results: Vec<T>) -> Self {
        Self { info, results }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether this page carries no items.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
