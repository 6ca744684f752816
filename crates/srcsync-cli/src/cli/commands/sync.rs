//! `srcsync sync` – download or update everything in the source list.

use anyhow::{bail, Result};
use srcsync_core::source_list::read_source_list;
use srcsync_core::{run_sources, RunOptions, ShellRunner, SourceTypeRegistry};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolved `sync` settings (CLI flags over config.toml).
#[derive(Debug, Clone)]
pub struct SyncArgs {
    pub input: PathBuf,
    pub work_dir: PathBuf,
    pub options: RunOptions,
    pub strict: bool,
    pub shell: String,
}

pub fn run_sync(registry: &SourceTypeRegistry, args: &SyncArgs) -> Result<ExitCode> {
    if !args.work_dir.is_dir() {
        bail!("working directory {} does not exist", args.work_dir.display());
    }
    let lines = read_source_list(&args.input)?;
    tracing::info!(
        input = %args.input.display(),
        work_dir = %args.work_dir.display(),
        jobs = args.options.jobs,
        dry_run = args.options.dry_run,
        "sync started"
    );

    let runner = ShellRunner::new(args.shell.as_str());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = run_sources(
        registry,
        &lines,
        &args.work_dir,
        &runner,
        &args.options,
        &mut out,
    )?;

    if args.strict && !report.summary.all_succeeded() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
