//! A `CommandRunner` that records commands instead of running them.

use srcsync_core::{CommandOutput, CommandRunner};
use std::io;
use std::path::Path;
use std::sync::Mutex;

/// Records every command; commands containing `fail_marker` exit with status 1.
pub struct RecordingRunner {
    pub commands: Mutex<Vec<String>>,
    fail_marker: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            fail_marker: None,
        }
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            fail_marker: Some(marker.to_string()),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, _work_dir: &Path, capture: bool) -> io::Result<CommandOutput> {
        self.commands.lock().unwrap().push(command.to_string());
        let failed = self
            .fail_marker
            .as_deref()
            .map(|m| command.contains(m))
            .unwrap_or(false);
        Ok(CommandOutput {
            code: Some(if failed { 1 } else { 0 }),
            success: !failed,
            stdout: if capture { format!("ran {}\n", command) } else { String::new() },
            stderr: String::new(),
        })
    }
}
