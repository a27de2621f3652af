// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definition for printing adapters.

use std::path::Path;

use spoolwerk_core::error::Result;
use spoolwerk_core::types::{DestinationRecord, SubmitReceipt};

/// Access to one OS printing subsystem.
///
/// Implementations must be stateless apart from configuration: every
/// `query_destinations` call reflects the live OS print-queue state, and no
/// result is cached between calls. All methods block until the platform
/// answers or the configured timeout expires.
pub trait PlatformAdapter: Send + Sync {
    /// Human-readable platform name (e.g. "CUPS", "Windows spooler").
    fn platform_name(&self) -> &str;

    /// Query the platform's registered print destinations.
    ///
    /// Returns raw records for the registry to normalize. An empty system
    /// yields an empty vector; an unreachable printing service yields
    /// `SpoolwerkError::PlatformQuery`.
    fn query_destinations(&self) -> Result<Vec<DestinationRecord>>;

    /// Spool text as plain content. Empty text is a valid job.
    fn submit_raw(&self, printer: &str, text: &str, job_name: &str) -> Result<SubmitReceipt>;

    /// Hand a file path to the platform's print-file facility without
    /// inspecting its contents.
    fn submit_file(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt>;

    /// Print a PDF through the platform's PDF-aware path. Callers guarantee
    /// the path names a PDF; raw spooling of PDF bytes is not a substitute
    /// for this method.
    fn submit_pdf(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt>;
}

// Shared handles delegate, so an adapter can be inspected (e.g. a recording
// mock) while the engine owns its boxed copy.
impl<T: PlatformAdapter + ?Sized> PlatformAdapter for std::sync::Arc<T> {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }

    fn query_destinations(&self) -> Result<Vec<DestinationRecord>> {
        (**self).query_destinations()
    }

    fn submit_raw(&self, printer: &str, text: &str, job_name: &str) -> Result<SubmitReceipt> {
        (**self).submit_raw(printer, text, job_name)
    }

    fn submit_file(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        (**self).submit_file(printer, path, job_name)
    }

    fn submit_pdf(&self, printer: &str, path: &Path, job_name: &str) -> Result<SubmitReceipt> {
        (**self).submit_pdf(printer, path, job_name)
    }
}
