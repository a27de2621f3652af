// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job submission engine.
//
// Synchronous: a call blocks until the OS has accepted the job into its
// queue (not until paper comes out — there is no completion tracking). Each
// payload variant takes its own adapter dispatch path, and every failure
// keeps its typed variant so a missing file can never masquerade as a
// missing printer.

use std::io::ErrorKind;
use std::path::Path;

use tracing::instrument;

use spoolwerk_core::config::EngineConfig;
use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::{Payload, SubmissionReport};
use spoolwerk_platform::traits::PlatformAdapter;

use crate::{discovery, report};

/// Submit one job. Blocks until the platform queues it or fails.
///
/// The target is re-resolved by name against a live snapshot first, so a
/// `Printer` value held across queue changes cannot submit into the void.
/// An absent (or empty) job name falls back to the configured default —
/// some platforms reject an empty job name outright.
#[instrument(skip_all, fields(printer = %printer_name, payload = %payload.kind()))]
pub fn submit(
    adapter: &dyn PlatformAdapter,
    config: &EngineConfig,
    printer_name: &str,
    payload: &Payload,
    job_name: Option<&str>,
) -> Result<SubmissionReport> {
    let printer = discovery::find_printer_by_name(adapter, config, printer_name)?;

    let job_name = match job_name {
        Some(name) if !name.is_empty() => name,
        _ => config.default_job_name.as_str(),
    };

    let receipt = match payload {
        // Empty text is a valid job; the platform spools zero bytes.
        Payload::RawText(text) => adapter.submit_raw(&printer.name, text, job_name)?,
        Payload::GenericFile(path) => {
            ensure_file_exists(path)?;
            adapter.submit_file(&printer.name, path, job_name)?
        }
        Payload::PdfFile(path) => {
            ensure_pdf_extension(path)?;
            ensure_file_exists(path)?;
            adapter.submit_pdf(&printer.name, path, job_name)?
        }
    };

    Ok(report::success(&printer.name, job_name, payload.kind(), receipt))
}

/// File payloads must exist before the platform sees them, and absence must
/// surface as `FileNotFound` — not as whatever the platform's own complaint
/// would collapse into.
fn ensure_file_exists(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(SpoolwerkError::UnsupportedPayload(format!(
            "{} is not a regular file",
            path.display()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(SpoolwerkError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(SpoolwerkError::Io(e)),
    }
}

/// The PDF path only handles PDFs; anything else belongs on the generic
/// file path.
fn ensure_pdf_extension(path: &Path) -> Result<()> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Ok(())
    } else {
        Err(SpoolwerkError::UnsupportedPayload(format!(
            "{} does not name a PDF document",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn pdf_extension_check_is_case_insensitive() {
        assert!(ensure_pdf_extension(Path::new("/tmp/a.pdf")).is_ok());
        assert!(ensure_pdf_extension(Path::new("/tmp/a.PDF")).is_ok());
        assert!(ensure_pdf_extension(Path::new("/tmp/a.ps")).is_err());
        assert!(ensure_pdf_extension(Path::new("/tmp/noext")).is_err());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let path = PathBuf::from("/definitely/not/here.txt");
        let err = ensure_file_exists(&path).unwrap_err();
        assert!(matches!(err, SpoolwerkError::FileNotFound(p) if p == path));
    }

    #[test]
    fn directory_payload_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_file_exists(dir.path()).unwrap_err();
        assert!(matches!(err, SpoolwerkError::UnsupportedPayload(_)));
    }
}
