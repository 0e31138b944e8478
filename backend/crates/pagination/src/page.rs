//! Result pages and their metadata.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Paging summary emitted alongside list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Requested page size.
    pub size: u32,
    /// Number of items matching the query across all pages.
    pub total_elements: u64,
    /// Number of pages needed to cover every match.
    pub total_pages: u64,
    /// Zero-based index of this page.
    pub number: u32,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Wrap a slice of results for `request` out of `total_elements` matches.
    #[must_use]
    pub const fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            request,
            total_elements,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page, keeping only its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Request that produced the page.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Matches across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Pages needed to cover every match; zero when nothing matched.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.request.size() as u64)
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.request.number() as u64) + 1 < self.total_pages()
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.number() > 0
    }

    /// Transform every item, keeping the paging information.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }

    /// Summary for response envelopes.
    #[must_use]
    pub const fn metadata(&self) -> PageMetadata {
        PageMetadata {
            size: self.request.size(),
            total_elements: self.total_elements,
            total_pages: self.total_pages(),
            number: self.request.number(),
        }
    }
}
