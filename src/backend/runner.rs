//! Subprocess execution of generated code with a timeout ceiling.

use super::{Runner, RunOutput};
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver};
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Interval between liveness checks on the child process.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs generated code by writing it to a scratch file and spawning an
/// interpreter.
#[derive(Debug, Clone)]
pub struct SubprocessRunner {
    interpreter: String,
}

impl SubprocessRunner {
    /// Create a runner using the given interpreter binary.
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

impl Runner for SubprocessRunner {
    fn run(&self, code: &str, timeout: Duration) -> Result<RunOutput> {
        let mut script = tempfile::Builder::new()
            .prefix("forge-run-")
            .suffix(".py")
            .tempfile()
            .map_err(|e| Error::Runner(format!("cannot create scratch file: {e}")))?;
        script
            .write_all(code.as_bytes())
            .map_err(|e| Error::Runner(format!("cannot write scratch file: {e}")))?;
        script
            .flush()
            .map_err(|e| Error::Runner(format!("cannot flush scratch file: {e}")))?;

        let mut child = Command::new(&self.interpreter)
            .arg(script.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Runner(format!("cannot spawn {}: {e}", self.interpreter)))?;

        // Drain both pipes on worker threads so a chatty child never blocks
        // on a full pipe while we wait for it.
        let stdout_rx = spawn_reader(child.stdout.take());
        let stderr_rx = spawn_reader(child.stderr.take());

        let timed_out = wait_with_deadline(&mut child, timeout)?;
        let status = child
            .wait()
            .map_err(|e| Error::Runner(format!("wait failed: {e}")))?;

        let stdout = collect(&stdout_rx);
        let stderr = collect(&stderr_rx);

        log::debug!(
            "run finished: timed_out={timed_out} exit={:?} stdout={}B stderr={}B",
            status.code(),
            stdout.len(),
            stderr.len()
        );

        Ok(RunOutput {
            stdout,
            stderr,
            terminated_by_timeout: timed_out,
            exit_code: if timed_out { None } else { status.code() },
        })
    }
}

/// Poll the child until it exits or the deadline passes; kill on timeout.
///
/// Returns whether the timeout fired.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return Ok(false),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    return Ok(true);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(Error::Runner(format!("wait failed: {e}"))),
        }
    }
}

/// Spawn a thread that reads a pipe to completion and sends the result.
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = bounded(1);
    if let Some(mut pipe) = pipe {
        std::thread::spawn(move || {
            let mut output = String::new();
            let _ = pipe.read_to_string(&mut output);
            let _ = tx.send(output);
        });
    }
    rx
}

/// Collect a reader thread's output; a killed child closes the pipe, so the
/// reader finishes promptly.
fn collect(rx: &Receiver<String>) -> String {
    rx.recv_timeout(Duration::from_secs(1)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests shell out to python3 and are representative of how the
    // runner is used in the session.

    fn runner() -> SubprocessRunner {
        SubprocessRunner::new("python3")
    }

    #[test]
    fn test_captures_stdout_and_exit() {
        let output = runner()
            .run("print('hello')", Duration::from_secs(10))
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert!(!output.terminated_by_timeout);
        assert_eq!(output.exit_code, Some(0));
    }

    #[test]
    fn test_captures_stderr() {
        let output = runner()
            .run("import sys; sys.stderr.write('oops\\n')", Duration::from_secs(10))
            .unwrap();
        assert!(output.stderr.contains("oops"));
    }

    #[test]
    fn test_timeout_kills_process() {
        let output = runner()
            .run("import time; time.sleep(60)", Duration::from_millis(300))
            .unwrap();
        assert!(output.terminated_by_timeout);
        assert_eq!(output.exit_code, None);
    }

    #[test]
    fn test_missing_interpreter_is_runner_error() {
        let runner = SubprocessRunner::new("definitely-not-an-interpreter");
        let result = runner.run("print(1)", Duration::from_secs(1));
        assert!(matches!(result, Err(Error::Runner(_))));
    }
}
