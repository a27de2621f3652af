// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result/status reporting.
//
// Normalizes what the platform returned into the caller-facing report, and
// owns the one place where typed errors may collapse into the legacy
// boolean contract. Each distinguishable failure is logged under its own
// stable code first — "file not found" and "printer not found" never share
// a log shape. No retries happen here or anywhere else.

use chrono::Utc;
use tracing::{info, warn};

use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::{PayloadKind, SubmissionId, SubmissionReport, SubmitReceipt};

/// Build the caller-facing report for an accepted job.
pub fn success(
    printer: &str,
    job_name: &str,
    payload: PayloadKind,
    receipt: SubmitReceipt,
) -> SubmissionReport {
    let report = SubmissionReport {
        id: SubmissionId::new(),
        printer: printer.to_string(),
        job_name: job_name.to_string(),
        payload,
        platform_job_id: receipt.job_id,
        submitted_at: Utc::now(),
    };
    info!(
        submission = %report.id,
        printer = %report.printer,
        job = %report.job_name,
        platform_job_id = ?report.platform_job_id,
        "platform accepted job"
    );
    report
}

/// Stable failure code, one per distinguishable failure.
pub fn failure_code(err: &SpoolwerkError) -> &'static str {
    match err {
        SpoolwerkError::PlatformQuery(_) => "platform-query",
        SpoolwerkError::PrinterNotFound(_) => "printer-not-found",
        SpoolwerkError::DuplicatePrinterName(_) => "duplicate-printer-name",
        SpoolwerkError::FileNotFound(_) => "file-not-found",
        SpoolwerkError::UnsupportedPayload(_) => "unsupported-payload",
        SpoolwerkError::Submission(_) => "submission-rejected",
        SpoolwerkError::Timeout(_) => "timeout",
        SpoolwerkError::Encoding(_) => "encoding",
        SpoolwerkError::PlatformUnavailable => "platform-unavailable",
        SpoolwerkError::Io(_) => "io",
        SpoolwerkError::Serialization(_) => "serialization",
    }
}

/// Log a submission failure under its own code.
pub fn log_failure(printer: &str, err: &SpoolwerkError) {
    warn!(
        printer,
        failure = failure_code(err),
        error = %err,
        "print submission failed"
    );
}

/// The compatibility boundary: collapse a typed result into the legacy
/// boolean, logging the typed error before it is discarded.
pub fn to_bool(printer: &str, result: Result<SubmissionReport>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            log_failure(printer, &err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn not_found_failures_have_distinct_codes() {
        let file = SpoolwerkError::FileNotFound(PathBuf::from("/gone.pdf"));
        let printer = SpoolwerkError::PrinterNotFound("Office".into());
        assert_eq!(failure_code(&file), "file-not-found");
        assert_eq!(failure_code(&printer), "printer-not-found");
        assert_ne!(failure_code(&file), failure_code(&printer));
    }

    #[test]
    fn timeout_does_not_share_a_code_with_rejection() {
        let timeout = SpoolwerkError::Timeout(std::time::Duration::from_secs(30));
        let rejected = SpoolwerkError::Submission("printer on fire".into());
        assert_ne!(failure_code(&timeout), failure_code(&rejected));
    }

    #[test]
    fn collapse_preserves_only_the_pass_fail_signal() {
        let report = success(
            "Office",
            "job",
            PayloadKind::RawText,
            SubmitReceipt {
                job_id: Some("Office-1".into()),
            },
        );
        assert!(to_bool("Office", Ok(report)));
        assert!(!to_bool(
            "Office",
            Err(SpoolwerkError::PrinterNotFound("Office".into()))
        ));
    }

    #[test]
    fn report_carries_the_platform_job_id() {
        let report = success(
            "Office",
            "quarterly",
            PayloadKind::PdfFile,
            SubmitReceipt {
                job_id: Some("Office-7".into()),
            },
        );
        assert_eq!(report.platform_job_id.as_deref(), Some("Office-7"));
        assert_eq!(report.printer, "Office");
        assert_eq!(report.job_name, "quarterly");
    }
}
