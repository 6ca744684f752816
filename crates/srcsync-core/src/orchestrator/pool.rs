//! Bounded worker pool for running several plans at once.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::runner::CommandRunner;

use super::{FetchOutcome, FetchPlan};

/// Runs `pending` plans on up to `jobs` threads. Child output is captured and
/// each plan's announcement, output and result are written to `out` as one
/// block, in completion order. Returns `(slot, outcome)` pairs.
pub(super) fn run_pool<R: CommandRunner>(
    pending: Vec<(usize, FetchPlan)>,
    jobs: usize,
    work_dir: &Path,
    runner: &R,
    out: &mut dyn Write,
) -> io::Result<Vec<(usize, FetchOutcome)>> {
    let count = pending.len();
    let num_workers = jobs.min(count);
    if num_workers == 0 {
        return Ok(Vec::new());
    }
    let work = Mutex::new(pending.into_iter().collect::<VecDeque<_>>());
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            scope.spawn(move || loop {
                let next = work
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                let (slot, plan) = match next {
                    Some(item) => item,
                    None => break,
                };
                // A panicking runner fails its own URL; the worker keeps draining the queue.
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    runner.run(&plan.command, work_dir, true)
                }))
                .unwrap_or_else(|_| Err(io::Error::other("command runner panicked")));
                if tx.send((slot, plan, result)).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        let mut done = Vec::with_capacity(count);
        for (slot, plan, result) in rx {
            let mut block = plan.announcement();
            block.push('\n');
            if let Ok(output) = &result {
                block.push_str(&output.stdout);
                block.push_str(&output.stderr);
            }
            let outcome = FetchOutcome::from_command(result);
            if let Some(line) = outcome.failure_line() {
                tracing::warn!(url = %plan.url, "{}", line.trim());
                block.push_str(&line);
                block.push('\n');
            }
            out.write_all(block.as_bytes())?;
            out.flush()?;
            done.push((slot, outcome));
        }
        Ok(done)
    })
}
