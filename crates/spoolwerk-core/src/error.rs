// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Spoolwerk.
//
// Every distinguishable failure keeps its own variant all the way through the
// engine. Collapsing to a plain boolean happens only at the compatibility
// boundary (`spoolwerk-engine::report`), never inside internal logic.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Top-level error type for all Spoolwerk operations.
#[derive(Debug, Error)]
pub enum SpoolwerkError {
    // -- Discovery errors --
    #[error("platform printer query failed: {0}")]
    PlatformQuery(String),

    #[error("no printer named \"{0}\" is registered with the system")]
    PrinterNotFound(String),

    #[error("platform reported more than one printer named \"{0}\"")]
    DuplicatePrinterName(String),

    // -- Submission errors --
    #[error("payload file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unsupported payload: {0}")]
    UnsupportedPayload(String),

    #[error("platform rejected the print job: {0}")]
    Submission(String),

    #[error("platform call exceeded the {0:?} timeout")]
    Timeout(Duration),

    // -- Encoding / platform availability --
    #[error("platform string is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("printing is not supported on this platform")]
    PlatformUnavailable,

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpoolwerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_and_printer_not_found_render_distinctly() {
        // The two "not found" failures must never look alike in logs.
        let file = SpoolwerkError::FileNotFound(PathBuf::from("/tmp/gone.pdf"));
        let printer = SpoolwerkError::PrinterNotFound("Office".into());
        assert!(file.to_string().contains("payload file"));
        assert!(printer.to_string().contains("printer named"));
        assert_ne!(file.to_string(), printer.to_string());
    }

    #[test]
    fn timeout_is_not_a_submission_failure() {
        let timeout = SpoolwerkError::Timeout(Duration::from_secs(30));
        assert!(timeout.to_string().contains("timeout"));
        assert!(!timeout.to_string().contains("rejected"));
    }
}
