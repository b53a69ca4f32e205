//! # Domain Module
//!
//! Core types for the toggle hierarchy. No I/O; stores are reached through
//! the traits in `ports`.

pub mod activation;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use activation::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
