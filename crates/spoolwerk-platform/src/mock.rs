// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mock printing adapter.
//
// Doubles as the stub for targets with no supported printing subsystem and
// as the recording backend for the engine test suite: every submission is
// captured together with the dispatch path it arrived on, so tests can
// assert that e.g. a PDF payload really took the PDF-aware path.

use std::path::Path;
use std::sync::Mutex;

use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::{DestinationRecord, PayloadKind, SubmitReceipt};

use crate::traits::PlatformAdapter;

/// One captured submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub printer: String,
    pub job_name: String,
    /// Which dispatch path the submission arrived on.
    pub kind: PayloadKind,
    /// Raw text content, or the payload path for file-backed payloads.
    pub detail: String,
}

enum Behaviour {
    Normal,
    /// Every submission fails with this reason; queries still succeed.
    FailSubmissions(String),
    /// Every call fails — no printing subsystem on this target.
    Unavailable,
}

/// In-memory printing backend.
pub struct MockAdapter {
    destinations: Vec<DestinationRecord>,
    submissions: Mutex<Vec<RecordedSubmission>>,
    behaviour: Behaviour,
}

impl MockAdapter {
    /// A backend reporting the given destinations and accepting every job.
    pub fn with_destinations(destinations: Vec<DestinationRecord>) -> Self {
        Self {
            destinations,
            submissions: Mutex::new(Vec::new()),
            behaviour: Behaviour::Normal,
        }
    }

    /// A backend whose submissions all fail with `reason`.
    pub fn failing_submissions(destinations: Vec<DestinationRecord>, reason: &str) -> Self {
        Self {
            destinations,
            submissions: Mutex::new(Vec::new()),
            behaviour: Behaviour::FailSubmissions(reason.to_string()),
        }
    }

    /// The stub used on targets without a printing subsystem.
    pub fn unavailable() -> Self {
        Self {
            destinations: Vec::new(),
            submissions: Mutex::new(Vec::new()),
            behaviour: Behaviour::Unavailable,
        }
    }

    /// Snapshot of everything submitted so far.
    pub fn recorded(&self) -> Vec<RecordedSubmission> {
        self.submissions
            .lock()
            .expect("submission record lock poisoned")
            .clone()
    }

    fn record(
        &self,
        printer: &str,
        job_name: &str,
        kind: PayloadKind,
        detail: String,
    ) -> Result<SubmitReceipt> {
        match &self.behaviour {
            Behaviour::Unavailable => return Err(SpoolwerkError::PlatformUnavailable),
            Behaviour::FailSubmissions(reason) => {
                return Err(SpoolwerkError::Submission(reason.clone()));
            }
            Behaviour::Normal => {}
        }
        let mut submissions = self
            .submissions
            .lock()
            .expect("submission record lock poisoned");
        submissions.push(RecordedSubmission {
            printer: printer.to_string(),
            job_name: job_name.to_string(),
            kind,
            detail,
        });
        Ok(SubmitReceipt {
            job_id: Some(format!("{printer}-{}", submissions.len())),
        })
    }
}

impl PlatformAdapter for MockAdapter {
    fn platform_name(&self) -> &str {
        "mock"
    }

    fn query_destinations(&self) -> Result<Vec<DestinationRecord>> {
        match &self.behaviour {
            Behaviour::Unavailable => Err(SpoolwerkError::PlatformUnavailable),
            _ => Ok(self.destinations.clone()),
        }
    }

    fn submit_raw(&self, printer: &str, text: &str, job_name: &str) -> Result<SubmitReceipt> {
        self.record(printer, job_name, PayloadKind::RawText, text.to_string())
    }

    fn submit_file(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        self.record(
            printer,
            job_name,
            PayloadKind::GenericFile,
            path.display().to_string(),
        )
    }

    fn submit_pdf(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        self.record(
            printer,
            job_name,
            PayloadKind::PdfFile,
            path.display().to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_submissions_with_their_dispatch_path() {
        let mock = MockAdapter::with_destinations(vec![DestinationRecord::named("Office")]);
        mock.submit_raw("Office", "hello", "job-1").unwrap();
        mock.submit_pdf("Office", Path::new("/tmp/a.pdf"), "job-2")
            .unwrap();

        let recorded = mock.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].kind, PayloadKind::RawText);
        assert_eq!(recorded[1].kind, PayloadKind::PdfFile);
        assert_eq!(recorded[1].detail, "/tmp/a.pdf");
    }

    #[test]
    fn unavailable_backend_fails_every_call() {
        let mock = MockAdapter::unavailable();
        assert!(matches!(
            mock.query_destinations(),
            Err(SpoolwerkError::PlatformUnavailable)
        ));
        assert!(matches!(
            mock.submit_raw("Office", "x", "job"),
            Err(SpoolwerkError::PlatformUnavailable)
        ));
    }

    #[test]
    fn receipts_carry_a_synthetic_job_id() {
        let mock = MockAdapter::with_destinations(vec![DestinationRecord::named("Office")]);
        let receipt = mock.submit_raw("Office", "x", "job").unwrap();
        assert_eq!(receipt.job_id.as_deref(), Some("Office-1"));
    }
}
