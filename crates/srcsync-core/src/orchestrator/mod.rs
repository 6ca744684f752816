//! Runs a source list: plan each URL, then download or update it.
//!
//! Lines are processed in input order. With `jobs == 1` each command runs to
//! completion, with inherited stdio, before the next line is planned. With
//! `jobs > 1` every line is planned first and the commands go to a worker pool.
//! A failing command never stops the run; the summary tells the caller whether
//! anything failed.

mod outcome;
mod plan;
mod pool;

use std::io::{self, Write};
use std::path::Path;

use crate::error::FetchError;
use crate::registry::SourceTypeRegistry;
use crate::runner::CommandRunner;
use crate::source_list::SourceLine;

pub use outcome::{CommandFailure, FetchOutcome, LineReport, RunSummary};
pub use plan::{plan_fetch, FetchPlan};

/// How a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum concurrent commands; values below 1 are treated as 1.
    pub jobs: usize,
    /// Print the expanded commands instead of running them.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            dry_run: false,
        }
    }
}

/// Per-line reports (input order) and their totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub lines: Vec<LineReport>,
    pub summary: RunSummary,
}

/// Processes `lines` against `work_dir`, writing progress to `out`.
///
/// Only I/O errors on `out` abort the run; per-URL problems end up in the report.
pub fn run_sources<R: CommandRunner>(
    registry: &SourceTypeRegistry,
    lines: &[SourceLine],
    work_dir: &Path,
    runner: &R,
    options: &RunOptions,
    out: &mut dyn Write,
) -> io::Result<RunReport> {
    let parallel = options.jobs > 1 && !options.dry_run;
    let mut reports = Vec::with_capacity(lines.len());
    let mut pending = Vec::new();

    for line in lines {
        let url = match line.url.as_deref() {
            Some(url) => url,
            None => {
                writeln!(out, "- No valid URL. Skipped.")?;
                reports.push(LineReport::new(line, None, FetchOutcome::Skipped));
                continue;
            }
        };

        let plan = match plan_fetch(registry, work_dir, url) {
            Ok(plan) => plan,
            Err(FetchError::UnclassifiableUrl(_)) => {
                tracing::warn!(line = line.line_no, %url, "no source type matches");
                writeln!(out, "- No valid URL ({}). Skipped.", url)?;
                reports.push(LineReport::new(line, None, FetchOutcome::Unclassifiable));
                continue;
            }
            Err(e) => {
                tracing::warn!(line = line.line_no, %url, error = %e, "cannot plan");
                writeln!(out, "- {}. Skipped.", e)?;
                reports.push(LineReport::new(
                    line,
                    None,
                    FetchOutcome::Unresolved(e.to_string()),
                ));
                continue;
            }
        };

        if options.dry_run {
            writeln!(out, "{}", plan.announcement())?;
            writeln!(out, "  $ {}", plan.command)?;
            reports.push(LineReport::new(line, Some(plan), FetchOutcome::Planned));
        } else if parallel {
            pending.push((reports.len(), plan.clone()));
            reports.push(LineReport::new(line, Some(plan), FetchOutcome::Planned));
        } else {
            writeln!(out, "{}", plan.announcement())?;
            out.flush()?;
            let outcome = FetchOutcome::from_command(runner.run(&plan.command, work_dir, false));
            if let Some(failure) = outcome.failure_line() {
                tracing::warn!(line = line.line_no, url = %plan.url, "{}", failure.trim());
                writeln!(out, "{}", failure)?;
            }
            reports.push(LineReport::new(line, Some(plan), outcome));
        }
    }

    if parallel {
        for (slot, outcome) in pool::run_pool(pending, options.jobs, work_dir, runner, out)? {
            reports[slot].outcome = outcome;
        }
    }

    let mut summary = RunSummary::default();
    for report in &reports {
        summary.record(&report.outcome);
    }
    writeln!(out, "- Done!")?;
    writeln!(out, "{}", summary)?;
    tracing::info!(%summary, work_dir = %work_dir.display(), "run finished");

    Ok(RunReport {
        lines: reports,
        summary,
    })
}
