//! Adapters for the session store port.

mod dto;
mod file;
mod memory;

pub use file::{FileSessionStore, SESSION_FILE_NAME};
pub use memory::InMemorySessionStore;
