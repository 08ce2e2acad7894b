//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod explore;
pub mod models;
pub mod summary;
pub mod utils;

// Re-export main command functions
pub use explore::{execute_explore, run_session};
pub use models::{ExploreArgs, InputArgs, SummaryArgs};
pub use summary::execute_summary;
pub use utils::{build_index, display_version};
