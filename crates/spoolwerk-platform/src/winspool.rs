// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Windows spooler adapter.
//
// Enumeration goes through CIM (`Get-CimInstance Win32_Printer`) with JSON
// output so the record shape is machine-parsed, not screen-scraped. Raw text
// is spooled with `Out-Printer`; files and PDFs dispatch through the shell
// print verb of their registered handler. All invocations run under the
// adapter timeout via `exec::run`.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::{DestinationRecord, SubmitReceipt};

use crate::exec;
use crate::traits::PlatformAdapter;

/// Adapter over the Windows print spooler.
pub struct SpoolerAdapter {
    timeout: Duration,
}

/// One `Win32_Printer` CIM instance as serialized by `ConvertTo-Json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CimPrinter {
    name: String,
    system_name: Option<String>,
    driver_name: Option<String>,
    port_name: Option<String>,
    location: Option<String>,
    default: Option<bool>,
    shared: Option<bool>,
    printer_status: Option<u32>,
}

impl SpoolerAdapter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run a PowerShell command line, optionally feeding stdin.
    fn powershell(&self, script: &str, stdin: Option<&[u8]>) -> Result<exec::PlatformOutput> {
        let mut cmd = Command::new("powershell.exe");
        cmd.args(["-NoProfile", "-NonInteractive", "-Command", script]);
        exec::run(cmd, stdin, self.timeout)
    }

    fn dispatch(&self, script: &str, stdin: Option<&[u8]>) -> Result<SubmitReceipt> {
        let out = self.powershell(script, stdin)?;
        if !out.success() {
            return Err(SpoolwerkError::Submission(out.stderr_text()));
        }
        // The spooler exposes no job identifier through these paths.
        Ok(SubmitReceipt { job_id: None })
    }
}

impl PlatformAdapter for SpoolerAdapter {
    fn platform_name(&self) -> &str {
        "Windows spooler"
    }

    fn query_destinations(&self) -> Result<Vec<DestinationRecord>> {
        let script = "Get-CimInstance Win32_Printer | \
                      Select-Object Name,SystemName,DriverName,PortName,Location,Default,Shared,PrinterStatus | \
                      ConvertTo-Json -Compress";
        let out = self.powershell(script, None)?;
        if !out.success() {
            return Err(SpoolwerkError::PlatformQuery(out.stderr_text()));
        }
        let json = exec::utf8(out.stdout, "Win32_Printer listing")?;
        let records = parse_cim_printers(&json)?;
        debug!(count = records.len(), "queried spooler destinations");
        Ok(records)
    }

    fn submit_raw(&self, printer: &str, text: &str, job_name: &str) -> Result<SubmitReceipt> {
        // Out-Printer offers no job-name control; the spooler names the job
        // after the submitting host. `job_name` still appears in our logs.
        info!(printer, job_name, "spooling raw text via Out-Printer");
        let script = format!("$input | Out-Printer -Name {}", ps_quote(printer));
        self.dispatch(&script, Some(text.as_bytes()))
    }

    fn submit_file(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        // The shell print verb dispatches through the format's registered
        // handler; the handler owns queue selection, so the target printer
        // is honoured only by handlers that read the default-printer hint.
        info!(printer, job_name, path = %path.display(), "dispatching file via shell print verb");
        let script = format!(
            "Start-Process -FilePath {} -Verb Print -WindowStyle Hidden",
            ps_quote(&path.display().to_string())
        );
        self.dispatch(&script, None)
    }

    fn submit_pdf(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        // PDFs need a PDF-aware handler; raw byte spooling is not printable
        // on most drivers, so this path always goes through the registered
        // PDF application's print verb.
        info!(printer, job_name, path = %path.display(), "dispatching PDF via shell print verb");
        let script = format!(
            "Start-Process -FilePath {} -Verb Print -WindowStyle Hidden",
            ps_quote(&path.display().to_string())
        );
        self.dispatch(&script, None)
    }
}

/// Quote a value as a PowerShell single-quoted string literal.
fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Decode `ConvertTo-Json` output, which collapses a single instance into a
/// bare object instead of a one-element array.
fn parse_cim_printers(json: &str) -> Result<Vec<DestinationRecord>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_str(json)?;
    let printers: Vec<CimPrinter> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(printers.into_iter().map(cim_to_record).collect())
}

fn cim_to_record(cim: CimPrinter) -> DestinationRecord {
    DestinationRecord {
        name: cim.name,
        system_name: cim.system_name,
        driver: cim.driver_name,
        uri: cim.port_name,
        location: cim.location,
        state: cim.printer_status.map(|s| status_word(s).to_string()),
        is_default: cim.default.unwrap_or(false),
        is_shared: cim.shared,
    }
}

/// Map `Win32_Printer.PrinterStatus` onto the shared state vocabulary.
fn status_word(status: u32) -> &'static str {
    match status {
        3 => "idle",
        4 | 5 => "printing", // 5 = warming up
        6 | 7 => "stopped",  // 6 = stopped printing, 7 = offline
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_powershell_literals() {
        assert_eq!(ps_quote("Office"), "'Office'");
        assert_eq!(ps_quote("O'Brien's"), "'O''Brien''s'");
    }

    #[test]
    fn maps_printer_status_words() {
        assert_eq!(status_word(3), "idle");
        assert_eq!(status_word(4), "printing");
        assert_eq!(status_word(7), "stopped");
        assert_eq!(status_word(1), "unknown");
    }

    #[test]
    fn parses_single_instance_and_array() {
        let single = r#"{"Name":"Office","SystemName":"\\\\DESKTOP","DriverName":"HP Universal",
            "PortName":"USB001","Location":null,"Default":true,"Shared":false,"PrinterStatus":3}"#;
        let records = parse_cim_printers(single).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Office");
        assert!(records[0].is_default);
        assert_eq!(records[0].state.as_deref(), Some("idle"));

        let array = format!("[{single},{single}]");
        assert_eq!(parse_cim_printers(&array).unwrap().len(), 2);
    }

    #[test]
    fn empty_listing_is_empty() {
        assert!(parse_cim_printers("").unwrap().is_empty());
    }
}
