// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings governing discovery and submission behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Job name used when the caller does not supply one. Some platforms
    /// reject an empty job name, so the fallback must be non-empty.
    pub default_job_name: String,
    /// Upper bound on any single platform call (discovery query or job
    /// submission). Expiry surfaces as `SpoolwerkError::Timeout`.
    pub platform_timeout: Duration,
    /// Accept a platform snapshot containing two printers with the same
    /// name. When true the first record wins and a warning is logged;
    /// when false (the default) the snapshot is rejected.
    pub allow_duplicate_names: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_job_name: "Spoolwerk Print Job".into(),
            platform_timeout: Duration::from_secs(30),
            allow_duplicate_names: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_job_name_is_never_empty() {
        assert!(!EngineConfig::default().default_job_name.is_empty());
    }
}
