//! Page arithmetic and page envelopes for fully loaded listings.
//!
//! Listings in the job board client are fetched in one response and paged
//! purely in memory. This crate owns the arithmetic so every view slices
//! lists the same way: pages are 1-indexed, page `k` holds the items
//! `[(k - 1) * size, k * size)` and any page outside the listing is empty.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let names = ["ada", "grace", "linus", "ken", "dennis", "barbara", "edsger"];
//! let request = PageRequest::new(2, 6).expect("non-zero page size");
//! let page = Page::from_slice(&names, request);
//!
//! assert_eq!(page.items(), &["edsger"]);
//! assert_eq!(page.total_pages(), 2);
//! ```

mod page;
mod request;

pub use page::{Page, page_bounds, paginate, total_pages};
pub use request::{DEFAULT_PAGE_SIZE, PageRequest, PageRequestError};
