//! CLI command handlers, one per file.

mod classify;
mod completions;
mod sync;
mod types;

pub use classify::run_classify;
pub use completions::run_completions;
pub use sync::{run_sync, SyncArgs};
pub use types::run_types;
