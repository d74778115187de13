//! Version command execution.
//!
//! Commands are spawned directly from their argv, never through a shell.
//! Stdout and stderr are read on separate threads and merged in arrival
//! order, so the extraction regex sees what a terminal would show.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use tracing::debug;

use crate::error::{DoctorError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to keep reading pipes after the process exits.
const DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Output of a version command that exited successfully.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Stdout and stderr interleaved by line.
    pub output: String,

    /// Execution duration.
    pub duration: Duration,
}

/// Run `argv` with a deadline and capture combined output.
///
/// # Errors
///
/// Returns `CommandTimeout` if the process is still running when the
/// deadline passes (it is killed first), and `CommandFailed` if it cannot
/// be spawned or exits unsuccessfully.
pub fn run_command(argv: &[String], timeout: Duration) -> Result<CommandOutput> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| DoctorError::Other(anyhow!("no check command specified")))?;
    let command_line = argv.join(" ");
    let start = Instant::now();
    let deadline = start
        .checked_add(timeout)
        .ok_or_else(|| DoctorError::CommandFailed {
            command: command_line.clone(),
            code: None,
            output: format!("timeout {:?} is out of range", timeout),
        })?;

    debug!("Running '{}' with timeout {:?}", command_line, timeout);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| DoctorError::CommandFailed {
            command: command_line.clone(),
            code: None,
            output: e.to_string(),
        })?;

    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        spawn_reader(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_reader(stderr, tx);
    }

    let mut output = String::new();
    let status = match wait_with_deadline(&mut child, &rx, &mut output, deadline)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            debug!("'{}' timed out after {:?}", command_line, timeout);
            return Err(DoctorError::CommandTimeout {
                command: command_line,
                timeout,
            });
        }
    };

    drain(&rx, &mut output, deadline.min(Instant::now() + DRAIN_GRACE));
    let duration = start.elapsed();

    if !status.success() {
        return Err(DoctorError::CommandFailed {
            command: command_line,
            code: status.code(),
            output,
        });
    }

    Ok(CommandOutput {
        exit_code: status.code(),
        output,
        duration,
    })
}

fn spawn_reader<R: Read + Send + 'static>(stream: R, tx: Sender<String>) {
    thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.split(b'\n').map_while(std::result::Result::ok) {
            let mut text = String::from_utf8_lossy(&line).into_owned();
            text.push('\n');
            if tx.send(text).is_err() {
                break;
            }
        }
    });
}

/// Poll the child until it exits or the deadline passes, collecting output.
///
/// Returns `None` on timeout.
fn wait_with_deadline(
    child: &mut Child,
    rx: &Receiver<String>,
    output: &mut String,
    deadline: Instant,
) -> Result<Option<ExitStatus>> {
    loop {
        while let Ok(chunk) = rx.try_recv() {
            output.push_str(&chunk);
        }

        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }

        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Collect output still in flight after exit.
///
/// Stops when both pipes close or at the deadline, whichever is first.
/// A background grandchild can hold a pipe open long after the version
/// command exits, so callers pass a short grace deadline.
fn drain(rx: &Receiver<String>, output: &mut String, deadline: Instant) {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining.max(POLL_INTERVAL)) {
            Ok(chunk) => {
                output.push_str(&chunk);
                if remaining.is_zero() {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) | Err(RecvTimeoutError::Timeout) => break,
        }
    }
}
