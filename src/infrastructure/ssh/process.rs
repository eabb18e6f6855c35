//! Child processes with a deadline
//!
//! `std::process` has no timed wait, so the child is polled with `try_wait`
//! while helper threads drain its pipes.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output of a finished child
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `-1` when the child was killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Wait for `child` until `deadline` elapses. On expiry the child is killed
/// and `None` is returned. `None` as deadline waits forever.
pub fn wait_with_deadline(
    child: &mut Child,
    deadline: Option<Duration>,
) -> io::Result<Option<ExitStatus>> {
    let Some(deadline) = deadline else {
        return child.wait().map(Some);
    };

    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if started.elapsed() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Run `cmd` to completion with piped output.
///
/// Returns `Ok(None)` when the deadline expired. Reader threads of a killed
/// child are not joined: a grandchild may still hold the pipe open.
pub fn run_with_deadline(
    cmd: &mut Command,
    deadline: Option<Duration>,
) -> io::Result<Option<ProcessOutput>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let Some(status) = wait_with_deadline(&mut child, deadline)? else {
        return Ok(None);
    };

    Ok(Some(ProcessOutput {
        exit_code: status.code().unwrap_or(-1),
        stdout: join(stdout),
        stderr: join(stderr),
    }))
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join(handle: Option<thread::JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}
