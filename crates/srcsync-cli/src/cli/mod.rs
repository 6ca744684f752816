//! CLI for srcsync.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use srcsync_core::config;
use srcsync_core::RunOptions;
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_classify, run_completions, run_sync, run_types, SyncArgs};

/// Top-level CLI for srcsync.
#[derive(Debug, Parser)]
#[command(name = "srcsync")]
#[command(
    about = "srcsync: fetch and refresh source repositories and archives from a URL list",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download new sources and update existing ones from the source list.
    Sync {
        /// Source list file (default: `input` from config.toml, i.e. source.txt in DIR).
        #[arg(long, short, value_name = "PATH")]
        input: Option<PathBuf>,
        /// Directory holding the fetched sources (default: current directory).
        #[arg(long, short = 'C', value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Run up to N fetches concurrently (default: `jobs` from config.toml).
        #[arg(long, short, value_name = "N")]
        jobs: Option<usize>,
        /// Print the commands that would run without running them.
        #[arg(long)]
        dry_run: bool,
        /// Exit with status 1 if any URL failed or could not be resolved.
        #[arg(long)]
        strict: bool,
    },

    /// Show the source type, directory name and commands for each URL.
    Classify {
        /// URLs to inspect.
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
        /// Directory used for the download/update decision (default: current directory).
        #[arg(long, short = 'C', value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// List known source types in classification order.
    Types,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(ExitCode::SUCCESS);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let registry = cfg
            .registry()
            .context("invalid source type in config.toml")?;

        match cli.command {
            CliCommand::Sync {
                input,
                dir,
                jobs,
                dry_run,
                strict,
            } => {
                let work_dir = match dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                let args = SyncArgs {
                    input: input.unwrap_or_else(|| work_dir.join(&cfg.input)),
                    work_dir,
                    options: RunOptions {
                        jobs: jobs.unwrap_or(cfg.jobs).max(1),
                        dry_run,
                    },
                    strict: strict || cfg.fail_on_error,
                    shell: cfg.shell.clone(),
                };
                return run_sync(&registry, &args);
            }
            CliCommand::Classify { urls, dir } => {
                let work_dir = match dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_classify(&registry, &work_dir, &urls)?;
            }
            CliCommand::Types => run_types(&registry),
            CliCommand::Completions { .. } => {}
        }

        Ok(ExitCode::SUCCESS)
    }
}
