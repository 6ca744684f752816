//! Child-process execution of expanded command lines.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Result of one command. `stdout`/`stderr` are only filled when captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    fn from_status(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
            success: status.success(),
            ..Self::default()
        }
    }
}

/// Runs a shell command line inside a working directory, blocking until it exits.
pub trait CommandRunner: Sync {
    /// With `capture` the child's output is collected instead of inherited.
    fn run(&self, command: &str, work_dir: &Path, capture: bool) -> io::Result<CommandOutput>;
}

/// Runs commands through `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, work_dir: &Path, capture: bool) -> io::Result<CommandOutput> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command).current_dir(work_dir);
        tracing::debug!(shell = %self.shell, %command, "spawning");

        if !capture {
            let status = cmd.status()?;
            return Ok(CommandOutput::from_status(status));
        }

        let output = cmd.stdin(Stdio::null()).output()?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            ..CommandOutput::from_status(output.status)
        })
    }
}
