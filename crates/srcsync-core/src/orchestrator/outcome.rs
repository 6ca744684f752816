//! Per-line outcomes and the run summary.

use std::fmt;
use std::io;

use crate::runner::CommandOutput;
use crate::source_list::SourceLine;

use super::FetchPlan;

/// Why an executed command counts as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    /// Non-zero exit; `None` when killed by a signal.
    Exit(Option<i32>),
    /// The shell could not be started.
    Spawn(String),
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandFailure::Exit(Some(code)) => write!(f, "exit status {}", code),
            CommandFailure::Exit(None) => write!(f, "terminated by signal"),
            CommandFailure::Spawn(e) => write!(f, "could not start command: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Blank or comment-only line.
    Skipped,
    /// No source type matched.
    Unclassifiable,
    /// Matched, but no directory name could be derived.
    Unresolved(String),
    /// Dry run: command expanded, not executed.
    Planned,
    Succeeded,
    Failed(CommandFailure),
}

impl FetchOutcome {
    pub fn from_command(result: io::Result<CommandOutput>) -> Self {
        match result {
            Ok(output) if output.success => FetchOutcome::Succeeded,
            Ok(output) => FetchOutcome::Failed(CommandFailure::Exit(output.code)),
            Err(e) => FetchOutcome::Failed(CommandFailure::Spawn(e.to_string())),
        }
    }

    /// Line printed after a failed command.
    pub fn failure_line(&self) -> Option<String> {
        match self {
            FetchOutcome::Failed(failure) => Some(format!("  failed: {}", failure)),
            _ => None,
        }
    }
}

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    pub line_no: usize,
    pub url: Option<String>,
    pub plan: Option<FetchPlan>,
    pub outcome: FetchOutcome,
}

impl LineReport {
    pub(super) fn new(line: &SourceLine, plan: Option<FetchPlan>, outcome: FetchOutcome) -> Self {
        Self {
            line_no: line.line_no,
            url: line.url.clone(),
            plan,
            outcome,
        }
    }
}

/// Counts per outcome. Unclassifiable URLs count as skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub unresolved: usize,
    pub skipped: usize,
    pub planned: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Skipped | FetchOutcome::Unclassifiable => self.skipped += 1,
            FetchOutcome::Unresolved(_) => self.unresolved += 1,
            FetchOutcome::Planned => self.planned += 1,
            FetchOutcome::Succeeded => self.succeeded += 1,
            FetchOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// No command failed and every classified URL got a name.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.unresolved == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.planned > 0 {
            write!(f, "{} planned, ", self.planned)?;
        }
        write!(
            f,
            "{} succeeded, {} failed, {} unresolved, {} skipped",
            self.succeeded, self.failed, self.unresolved, self.skipped
        )
    }
}
