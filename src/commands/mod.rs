//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod fetch;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use fetch::{execute_fetch, execute_normalize, validate_args, validate_normalize_args};
pub use models::{FetchArgs, NormalizeArgs};
pub use utils::{display_schema, display_version, validate_report_file};
