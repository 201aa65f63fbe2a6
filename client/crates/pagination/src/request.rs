//! Validated page requests.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used by listing views unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

const DEFAULT_SIZE: NonZeroUsize = match NonZeroUsize::new(DEFAULT_PAGE_SIZE) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// A page must hold at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// A 1-indexed page number paired with a non-zero page size.
///
/// Page `0` is representable on purpose: it is the "before the first page"
/// position a view reaches by stepping back from page 1, and it always
/// resolves to an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: usize,
    size: NonZeroUsize,
}

impl PageRequest {
    /// Build a request for `page` with `size` items per page.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPageSize`] when `size` is zero.
    pub fn new(page: usize, size: usize) -> Result<Self, PageRequestError> {
        let size = NonZeroUsize::new(size).ok_or(PageRequestError::ZeroPageSize)?;
        Ok(Self { page, size })
    }

    /// First page for the given page size.
    #[must_use]
    pub const fn first(size: NonZeroUsize) -> Self {
        Self { page: 1, size }
    }

    /// 1-indexed page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size.get()
    }

    /// Index of the first item on this page, or `None` for page `0` and
    /// for pages whose offset would overflow.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.page
            .checked_sub(1)
            .and_then(|index| index.checked_mul(self.size.get()))
    }

    /// Request for the following page.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
        }
    }

    /// Request for the preceding page, saturating at page `1`.
    #[must_use]
    pub fn previous(self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            size: self.size,
        }
    }

    /// Same page number with a different page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPageSize`] when `size` is zero.
    pub fn with_size(self, size: usize) -> Result<Self, PageRequestError> {
        Self::new(self.page, size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_SIZE,
        }
    }
}
