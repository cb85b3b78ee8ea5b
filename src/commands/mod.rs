//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod browse;
pub mod models;

// Re-export main command functions
pub use browse::{execute_browse, load_dump, validate_args};
pub use models::BrowseArgs;
