pub mod config;
pub mod error;
pub mod logging;
pub mod naming;
pub mod orchestrator;
pub mod registry;
pub mod runner;
pub mod source_list;
pub mod source_type;
pub mod template;

pub use error::{FetchError, NameResolutionError, SourceTypeError};
pub use orchestrator::{
    plan_fetch, run_sources, FetchOutcome, FetchPlan, RunOptions, RunReport, RunSummary,
};
pub use registry::SourceTypeRegistry;
pub use runner::{CommandOutput, CommandRunner, ShellRunner};
pub use source_type::{CommandMode, SourceType, SourceTypeDef};
