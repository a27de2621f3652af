// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bounded subprocess execution for the platform adapters.
//
// Every interaction with the OS printing subsystem goes through `run`, which
// enforces the configured timeout. A hang in the printing service therefore
// surfaces as `SpoolwerkError::Timeout` instead of propagating to the caller
// as a hang.

use std::io::{ErrorKind, Read, Write};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use spoolwerk_core::error::{Result, SpoolwerkError};

/// How often the child is polled while waiting for exit.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output of a finished platform command.
#[derive(Debug)]
pub struct PlatformOutput {
    /// Process exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl PlatformOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stderr as a diagnostic string. Lossy conversion is fine here — this
    /// feeds error messages, not printer data.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Run a platform command with an optional stdin payload, killing it when
/// `timeout` expires.
///
/// A missing binary maps to `PlatformQuery` — if `lpstat` or `lp` is absent
/// the printing service is unavailable as far as this layer is concerned.
pub fn run(mut command: Command, stdin_data: Option<&[u8]>, timeout: Duration) -> Result<PlatformOutput> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(if stdin_data.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(program = %program, "spawning platform command");

    let mut child = command.spawn().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            SpoolwerkError::PlatformQuery(format!("`{program}` is not available on this system"))
        } else {
            SpoolwerkError::Io(e)
        }
    })?;

    // Drain stdout/stderr on their own threads so the child never blocks on
    // a full pipe while we are still feeding stdin.
    let mut stdout_pipe = child.stdout.take().expect("stdout pipe requested");
    let mut stderr_pipe = child.stderr.take().expect("stderr pipe requested");
    let stdout_reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf);
        buf
    });
    let stderr_reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf);
        buf
    });

    if let (Some(data), Some(mut stdin)) = (stdin_data, child.stdin.take()) {
        if let Err(e) = stdin.write_all(data) {
            // The child exiting before consuming its input is reported via
            // the exit code below, not as an I/O failure on our side.
            if e.kind() != ErrorKind::BrokenPipe {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SpoolwerkError::Io(e));
            }
            warn!(program = %program, "platform command closed stdin early");
        }
        // Dropping stdin closes the pipe and lets the child see EOF.
    }

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                warn!(program = %program, ?timeout, "platform command timed out, killing");
                let _ = child.kill();
                let _ = child.wait();
                return Err(SpoolwerkError::Timeout(timeout));
            }
            None => std::thread::sleep(WAIT_POLL_INTERVAL),
        }
    };

    let stdout = stdout_reader.join().expect("stdout reader thread panicked");
    let stderr = stderr_reader.join().expect("stderr reader thread panicked");

    debug!(program = %program, code = ?status.code(), "platform command finished");

    Ok(PlatformOutput {
        code: status.code(),
        stdout,
        stderr,
    })
}

/// Decode platform bytes that are contractually text.
///
/// Conversion is lossless or fails: printer names and queue listings must
/// round-trip exactly, so invalid UTF-8 is an `Encoding` error rather than a
/// replacement-character mangling.
pub fn utf8(bytes: Vec<u8>, what: &str) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| SpoolwerkError::Encoding(format!("{what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn captures_stdout_and_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "printf hello"]);
        let out = run(cmd, None, Duration::from_secs(5)).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, b"hello");
    }

    #[test]
    #[cfg(unix)]
    fn feeds_stdin_to_the_child() {
        let cmd = Command::new("cat");
        let out = run(cmd, Some(b"spooled content"), Duration::from_secs(5)).unwrap();
        assert_eq!(out.stdout, b"spooled content");
    }

    #[test]
    #[cfg(unix)]
    fn nonzero_exit_is_reported_not_erred() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo oops >&2; exit 3"]);
        let out = run(cmd, None, Duration::from_secs(5)).unwrap();
        assert!(!out.success());
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stderr_text(), "oops");
    }

    #[test]
    #[cfg(unix)]
    fn hang_becomes_timeout_error() {
        let mut cmd = Command::new("sleep");
        cmd.arg("30");
        let err = run(cmd, None, Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, SpoolwerkError::Timeout(_)));
    }

    #[test]
    fn missing_binary_is_a_platform_query_error() {
        let cmd = Command::new("spoolwerk-definitely-not-a-real-binary");
        let err = run(cmd, None, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, SpoolwerkError::PlatformQuery(_)));
    }

    #[test]
    fn invalid_utf8_fails_explicitly() {
        let err = utf8(vec![0x66, 0xff, 0x6f], "printer listing").unwrap_err();
        assert!(matches!(err, SpoolwerkError::Encoding(_)));
    }
}
