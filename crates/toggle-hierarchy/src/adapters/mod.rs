//! # Adapters Module
//!
//! In-memory implementations of the outbound ports.

pub mod app_directory;
pub mod memory_store;

pub use app_directory::InMemoryApplicationDirectory;
pub use memory_store::InMemoryToggleStore;
