//! # Algorithms Module
//!
//! Hierarchy algorithms over the outbound store port: path handling,
//! creation, resolution, cascade, deletion and rendering.

pub mod cascade;
pub mod forest;
pub mod hierarchical_create;
pub mod path_codec;
pub mod path_validation;
pub mod renderer;
pub mod resolver;
pub mod subtree_delete;

pub use cascade::set_enabled_recursively;
pub use forest::ToggleForest;
pub use hierarchical_create::create_toggle_hierarchy;
pub use path_codec::{build_toggle_path, parse_toggle_path, path_prefixes};
pub use path_validation::validate_toggle_path;
pub use renderer::build_tree;
pub use resolver::is_effectively_enabled;
pub use subtree_delete::delete_subtree;
