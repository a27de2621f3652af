// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk Engine — printer registry, job submission, and result reporting
// over a platform adapter. This crate is the boundary surface: callers use
// `PrintEngine` and never touch the platform layer directly.

pub mod discovery;
pub mod registry;
pub mod report;
pub mod submit;

use std::path::Path;

use spoolwerk_platform::platform_adapter;
use spoolwerk_platform::traits::PlatformAdapter;

pub use spoolwerk_core::config::EngineConfig;
pub use spoolwerk_core::error::{Result, SpoolwerkError};
pub use spoolwerk_core::types::{
    Payload, PayloadKind, Printer, PrinterState, SubmissionReport,
};

/// The printing engine facade.
///
/// Owns the single handle to platform printing resources — construct once
/// at process start and share. Holds no other state; discovery hits the
/// live OS queue list on every call and submissions are independent,
/// synchronous, and unretried. Safe to share across threads: concurrency is
/// serialized by the OS printing service itself.
pub struct PrintEngine {
    adapter: Box<dyn PlatformAdapter>,
    config: EngineConfig,
}

impl PrintEngine {
    /// Engine over the native platform adapter with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine over the native platform adapter.
    pub fn with_config(config: EngineConfig) -> Self {
        let adapter = platform_adapter(config.platform_timeout);
        Self { adapter, config }
    }

    /// Engine over a caller-supplied adapter (tests, embedding).
    pub fn with_adapter(adapter: Box<dyn PlatformAdapter>, config: EngineConfig) -> Self {
        Self { adapter, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the platform backing this engine.
    pub fn platform_name(&self) -> &str {
        self.adapter.platform_name()
    }

    // -- Discovery -----------------------------------------------------------

    /// List the printers currently registered with the OS. Fresh snapshot
    /// on every call.
    pub fn list_printers(&self) -> Result<Vec<Printer>> {
        discovery::list_printers(self.adapter.as_ref(), &self.config)
    }

    /// Find a printer by its queue name.
    pub fn find_printer_by_name(&self, name: &str) -> Result<Printer> {
        discovery::find_printer_by_name(self.adapter.as_ref(), &self.config, name)
    }

    // -- Submission ----------------------------------------------------------

    /// Submit a job and get the typed report.
    pub fn submit(
        &self,
        printer: &Printer,
        payload: Payload,
        job_name: Option<&str>,
    ) -> Result<SubmissionReport> {
        submit::submit(
            self.adapter.as_ref(),
            &self.config,
            &printer.name,
            &payload,
            job_name,
        )
    }

    // -- Boolean compatibility boundary --------------------------------------
    //
    // The legacy contract: every failure collapses to `false`. The typed
    // error is logged by the reporter before being discarded.

    /// Spool text as plain content. Empty text still submits a job.
    pub fn print(&self, printer: &Printer, text: &str, job_name: Option<&str>) -> bool {
        report::to_bool(
            &printer.name,
            self.submit(printer, Payload::RawText(text.to_string()), job_name),
        )
    }

    /// Hand a file to the platform's print-file facility.
    pub fn print_file(
        &self,
        printer: &Printer,
        path: impl AsRef<Path>,
        job_name: Option<&str>,
    ) -> bool {
        report::to_bool(
            &printer.name,
            self.submit(
                printer,
                Payload::GenericFile(path.as_ref().to_path_buf()),
                job_name,
            ),
        )
    }

    /// Print a PDF through the platform's PDF-aware path.
    pub fn print_pdf_file(
        &self,
        printer: &Printer,
        path: impl AsRef<Path>,
        job_name: Option<&str>,
    ) -> bool {
        report::to_bool(
            &printer.name,
            self.submit(
                printer,
                Payload::PdfFile(path.as_ref().to_path_buf()),
                job_name,
            ),
        )
    }
}

impl Default for PrintEngine {
    fn default() -> Self {
        Self::new()
    }
}
