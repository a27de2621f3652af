// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Spoolwerk printing engine.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reported state of a print destination.
///
/// Serialized in upper case because that is the exchange format consumers of
/// the printer record expect (`"READY"`, `"PAUSED"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrinterState {
    /// Idle and accepting jobs.
    Ready,
    /// Stopped or disabled by an operator; jobs queue but do not print.
    Paused,
    /// Currently processing a job.
    Printing,
    /// The platform reported no state, or one we do not recognise.
    #[default]
    Unknown,
}

impl PrinterState {
    /// Map a platform state word onto the uniform state set.
    ///
    /// CUPS reports `idle` / `printing` / `stopped` (and `disabled` in older
    /// `lpstat` output); the Windows spooler reports numeric `PrinterStatus`
    /// values which the adapter stringifies before we see them.
    pub fn from_platform(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "idle" | "ready" => Self::Ready,
            "printing" | "processing" => Self::Printing,
            "stopped" | "paused" | "disabled" => Self::Paused,
            _ => Self::Unknown,
        }
    }
}

/// A print destination as seen by the caller.
///
/// Constructed fresh on every discovery query — there is no persistent
/// identity across calls, and the engine never mutates a returned value.
/// Platform fields the OS did not report default to the empty string so the
/// exchange record never carries an absent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printer {
    /// Queue name; the sole key used to re-target this printer for submission.
    pub name: String,
    /// Platform-internal name where it differs from the queue name.
    #[serde(default)]
    pub system_name: String,
    /// Driver or make-and-model string.
    #[serde(default)]
    pub driver_name: String,
    /// Device URI (e.g. `ipp://10.0.0.12:631/ipp/print`).
    #[serde(default)]
    pub uri: String,
    /// Physical location, when the platform records one.
    #[serde(default)]
    pub location: String,
    /// Whether this is the system default destination.
    #[serde(default)]
    pub is_default: bool,
    /// Whether the queue is shared with other hosts.
    #[serde(default)]
    pub is_shared: bool,
    /// Last reported state.
    #[serde(default)]
    pub state: PrinterState,
}

impl Printer {
    /// A printer with the documented defaults for every optional field.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_name: String::new(),
            driver_name: String::new(),
            uri: String::new(),
            location: String::new(),
            is_default: false,
            is_shared: false,
            state: PrinterState::Unknown,
        }
    }
}

/// The content of a print job. Each variant takes a distinct dispatch path
/// through the platform adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Spool the text directly as plain content, no driver formatting.
    /// Empty text is a valid job.
    RawText(String),
    /// Hand the file path to the OS print-file facility as-is. The engine
    /// does not inspect the contents; unsupported formats fail at the OS
    /// layer as a submission failure.
    GenericFile(PathBuf),
    /// A PDF document, routed through the PDF-aware print path.
    PdfFile(PathBuf),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::RawText(_) => PayloadKind::RawText,
            Self::GenericFile(_) => PayloadKind::GenericFile,
            Self::PdfFile(_) => PayloadKind::PdfFile,
        }
    }

    /// The file path for file-backed payloads.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::RawText(_) => None,
            Self::GenericFile(p) | Self::PdfFile(p) => Some(p),
        }
    }
}

/// Discriminant of a [`Payload`], used in reports and dispatch records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    RawText,
    GenericFile,
    PdfFile,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::RawText => "raw text",
            Self::GenericFile => "file",
            Self::PdfFile => "PDF file",
        };
        write!(f, "{label}")
    }
}

/// A raw destination record as produced by a platform adapter, before the
/// registry normalizes it into a [`Printer`]. Fields the platform did not
/// report stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationRecord {
    pub name: String,
    pub system_name: Option<String>,
    pub driver: Option<String>,
    pub uri: Option<String>,
    pub location: Option<String>,
    /// Platform state word (`idle`, `printing`, ...), unparsed.
    pub state: Option<String>,
    pub is_default: bool,
    pub is_shared: Option<bool>,
}

impl DestinationRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// What the platform returned when it accepted a job into its queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Platform job identifier (e.g. CUPS request id `Office-42`), when the
    /// platform reports one.
    pub job_id: Option<String>,
}

/// Unique identifier for one submission attempt, generated locally.
///
/// This exists for log correlation only — the engine does not track jobs
/// after submission returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record of a successfully submitted job, returned to the caller.
///
/// Ephemeral — nothing is persisted, and the engine offers no way to query
/// the job again once this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub id: SubmissionId,
    /// Name of the printer the job went to.
    pub printer: String,
    /// Job name as handed to the platform (caller-supplied or the default).
    pub job_name: String,
    pub payload: PayloadKind,
    /// Platform job identifier, when reported.
    pub platform_job_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printer_state_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&PrinterState::Ready).unwrap(),
            "\"READY\""
        );
        assert_eq!(
            serde_json::from_str::<PrinterState>("\"PAUSED\"").unwrap(),
            PrinterState::Paused
        );
    }

    #[test]
    fn printer_state_from_platform_words() {
        assert_eq!(PrinterState::from_platform("idle"), PrinterState::Ready);
        assert_eq!(PrinterState::from_platform(" Printing "), PrinterState::Printing);
        assert_eq!(PrinterState::from_platform("stopped"), PrinterState::Paused);
        assert_eq!(PrinterState::from_platform("disabled"), PrinterState::Paused);
        assert_eq!(PrinterState::from_platform("banana"), PrinterState::Unknown);
        assert_eq!(PrinterState::from_platform(""), PrinterState::Unknown);
    }

    #[test]
    fn printer_round_trips_through_json() {
        let printer = Printer {
            name: "Office".into(),
            system_name: "Office_HP".into(),
            driver_name: "HP LaserJet".into(),
            uri: "ipp://10.0.0.12:631/ipp/print".into(),
            location: "2nd floor".into(),
            is_default: true,
            is_shared: false,
            state: PrinterState::Ready,
        };
        let json = serde_json::to_string(&printer).unwrap();
        let back: Printer = serde_json::from_str(&json).unwrap();
        assert_eq!(printer, back);
    }

    #[test]
    fn printer_deserializes_with_missing_optional_fields() {
        // A minimal exchange record only carries the name; everything else
        // takes the documented defaults.
        let printer: Printer = serde_json::from_str(r#"{"name":"Lonely"}"#).unwrap();
        assert_eq!(printer, Printer::named("Lonely"));
        assert_eq!(printer.state, PrinterState::Unknown);
    }

    #[test]
    fn payload_kind_and_path() {
        let text = Payload::RawText(String::new());
        assert_eq!(text.kind(), PayloadKind::RawText);
        assert!(text.path().is_none());

        let pdf = Payload::PdfFile(PathBuf::from("/tmp/report.pdf"));
        assert_eq!(pdf.kind(), PayloadKind::PdfFile);
        assert_eq!(pdf.path().unwrap(), Path::new("/tmp/report.pdf"));
    }
}
