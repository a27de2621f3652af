// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CUPS adapter for Unix-like systems.
//
// Destinations are read through the CUPS command front-ends rather than
// libcups: `lpstat -l -p` for queues and their state, `lpstat -d` for the
// system default, `lpstat -v` for device URIs. Jobs are handed to `lp`,
// which blocks until the scheduler has accepted the job into its queue —
// exactly the synchronous contract the engine exposes. Parsing lives in
// pure functions so it can be tested against captured output.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info};

use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::{DestinationRecord, SubmitReceipt};

use crate::exec;
use crate::traits::PlatformAdapter;

/// Adapter over the CUPS scheduler.
pub struct CupsAdapter {
    /// Upper bound on each `lpstat`/`lp` invocation.
    timeout: Duration,
}

impl CupsAdapter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `lpstat` with the given arguments and return its stdout.
    ///
    /// A system with no configured queues makes `lpstat` exit non-zero with
    /// "No destinations added" — that is an empty listing, not a failure.
    fn lpstat(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("lpstat");
        cmd.args(args);
        let out = exec::run(cmd, None, self.timeout)?;
        if !out.success() {
            let detail = out.stderr_text();
            if detail.contains("No destinations added") {
                return Ok(String::new());
            }
            return Err(SpoolwerkError::PlatformQuery(format!(
                "lpstat {}: {detail}",
                args.join(" ")
            )));
        }
        exec::utf8(out.stdout, "lpstat output")
    }

    /// Run `lp` and turn its exit status into a receipt or a typed error.
    fn lp(&self, args: &[&str], stdin: Option<&[u8]>) -> Result<SubmitReceipt> {
        let mut cmd = Command::new("lp");
        cmd.args(args);
        let out = exec::run(cmd, stdin, self.timeout)?;
        if !out.success() {
            let detail = out.stderr_text();
            let detail = if detail.is_empty() {
                format!("lp exited with code {:?}", out.code)
            } else {
                detail
            };
            return Err(SpoolwerkError::Submission(detail));
        }
        let stdout = exec::utf8(out.stdout, "lp output")?;
        let job_id = parse_request_id(&stdout);
        info!(job_id = ?job_id, "CUPS accepted job");
        Ok(SubmitReceipt { job_id })
    }
}

impl PlatformAdapter for CupsAdapter {
    fn platform_name(&self) -> &str {
        "CUPS"
    }

    fn query_destinations(&self) -> Result<Vec<DestinationRecord>> {
        let listing = self.lpstat(&["-l", "-p"])?;
        let mut records = parse_printer_listing(&listing);
        if records.is_empty() {
            debug!("no CUPS destinations registered");
            return Ok(records);
        }

        if let Some(default) = parse_default_destination(&self.lpstat(&["-d"])?) {
            for record in &mut records {
                record.is_default = record.name == default;
            }
        }

        for (name, uri) in parse_device_uris(&self.lpstat(&["-v"])?) {
            if let Some(record) = records.iter_mut().find(|r| r.name == name) {
                record.uri = Some(uri);
            }
        }

        debug!(count = records.len(), "queried CUPS destinations");
        Ok(records)
    }

    fn submit_raw(&self, printer: &str, text: &str, job_name: &str) -> Result<SubmitReceipt> {
        self.lp(&["-d", printer, "-t", job_name], Some(text.as_bytes()))
    }

    fn submit_file(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        let path = path_str(path)?;
        self.lp(&["-d", printer, "-t", job_name, "--", path], None)
    }

    fn submit_pdf(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        // Pinning the document format keeps the scheduler's PDF filter chain
        // in charge instead of whatever auto-detection would guess.
        let path = path_str(path)?;
        self.lp(
            &[
                "-d",
                printer,
                "-t",
                job_name,
                "-o",
                "document-format=application/pdf",
                "--",
                path,
            ],
            None,
        )
    }
}

/// Paths are passed to `lp` as arguments, so they must be valid UTF-8.
fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| SpoolwerkError::Encoding(format!("payload path {}", path.display())))
}

// -- lpstat output parsing ---------------------------------------------------

/// Parse `lpstat -l -p` output into raw destination records.
///
/// Top-level lines announce a queue and its state:
///   printer Office is idle.  enabled since Tue 07 Jan 2026 ...
///   printer Lab now printing Lab-3.  enabled since ...
///   printer Attic disabled since ... -
/// Indented continuation lines carry queue attributes; only `Description:`
/// and `Location:` are of interest here.
fn parse_printer_listing(text: &str) -> Vec<DestinationRecord> {
    let mut records: Vec<DestinationRecord> = Vec::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("printer ") {
            let Some(name) = rest.split_whitespace().next() else {
                continue;
            };
            let state = if rest.contains("is idle") {
                "idle"
            } else if rest.contains("now printing") {
                "printing"
            } else if rest.contains("disabled") {
                "disabled"
            } else {
                "unknown"
            };
            let mut record = DestinationRecord::named(name);
            // CUPS queue names are their own system names.
            record.system_name = Some(name.to_string());
            record.state = Some(state.to_string());
            records.push(record);
        } else if line.starts_with(' ') || line.starts_with('\t') {
            let Some(record) = records.last_mut() else {
                continue;
            };
            let attr = line.trim_start();
            if let Some(desc) = attr.strip_prefix("Description:") {
                record.driver = non_empty(desc);
            } else if let Some(loc) = attr.strip_prefix("Location:") {
                record.location = non_empty(loc);
            }
        }
    }

    records
}

/// Parse `lpstat -d` output: "system default destination: Office".
fn parse_default_destination(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        line.strip_prefix("system default destination:")
            .and_then(non_empty)
    })
}

/// Parse `lpstat -v` output: "device for Office: ipp://10.0.0.12/ipp/print".
fn parse_device_uris(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("device for ")?;
            let (name, uri) = rest.split_once(':')?;
            Some((name.trim().to_string(), uri.trim().to_string()))
        })
        .collect()
}

/// Extract the request id from `lp` stdout:
/// "request id is Office-42 (1 file(s))".
fn parse_request_id(stdout: &str) -> Option<String> {
    let rest = stdout.split("request id is ").nth(1)?;
    non_empty(rest.split_whitespace().next()?)
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
