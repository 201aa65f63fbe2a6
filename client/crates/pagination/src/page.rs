//! Slicing helpers and the page envelope returned to views.

use std::ops::Range;

use serde::Serialize;

use crate::PageRequest;

/// Number of pages needed to show `total_items` at `page_size` per page.
///
/// An empty listing has zero pages.
#[must_use]
pub const fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Index range covered by `request` in a listing of `total_items`.
///
/// Returns `None` when the page lies outside the listing.
#[must_use]
pub fn page_bounds(total_items: usize, request: PageRequest) -> Option<Range<usize>> {
    let start = request.offset()?;
    if start >= total_items {
        return None;
    }
    let end = start.saturating_add(request.size()).min(total_items);
    Some(start..end)
}

/// Borrow the items on the requested page. Out-of-range pages are empty.
#[must_use]
pub fn paginate<T>(items: &[T], request: PageRequest) -> &[T] {
    page_bounds(items.len(), request)
        .and_then(|range| items.get(range))
        .unwrap_or_default()
}

/// One page of a listing together with the numbers a pager needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Copy the requested page out of `items`.
    #[must_use]
    pub fn from_slice(items: &[T], request: PageRequest) -> Self {
        Self {
            items: paginate(items, request).to_vec(),
            page: request.page(),
            page_size: request.size(),
            total_items: items.len(),
            total_pages: total_pages(items.len(), request.size()),
        }
    }
}

impl<T> Page<T> {
    /// Take the requested page out of an owned listing.
    #[must_use]
    pub fn from_vec(items: Vec<T>, request: PageRequest) -> Self {
        let total_items = items.len();
        let range = page_bounds(total_items, request);
        let page_items = match range {
            Some(range) => items
                .into_iter()
                .skip(range.start)
                .take(range.len())
                .collect(),
            None => Vec::new(),
        };
        Self {
            items: page_items,
            page: request.page(),
            page_size: request.size(),
            total_items,
            total_pages: total_pages(total_items, request.size()),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-indexed page number that was requested.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Size of the whole listing.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages in the whole listing.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Map every item while keeping the pager numbers.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
