//! # Application Layer
//!
//! The toggle lifecycle service wiring algorithms to ports.

pub mod app_locks;
pub mod service;


pub use app_locks::AppLocks;
pub use service::{ToggleService, ToggleServiceDependencies};
