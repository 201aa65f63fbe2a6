//! Job board client library.
//!
//! The crate is laid out in hexagonal style:
//! - [`domain`] holds resource records, session and routing types, list
//!   filters and the driven ports.
//! - [`store`] holds the per-resource state containers the view layer reads.
//! - [`outbound`] holds the REST gateway and session store adapters.
//! - [`inbound`] holds the command-line view layer.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod store;

pub use config::ClientSettings;
pub use store::AppStore;
