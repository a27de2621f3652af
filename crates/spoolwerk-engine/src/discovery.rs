// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer discovery over a platform adapter.
//
// Every call queries the live OS print-queue state — printers come and go
// between invocations, so nothing is cached here.

use tracing::{debug, instrument};

use spoolwerk_core::config::EngineConfig;
use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::Printer;
use spoolwerk_platform::traits::PlatformAdapter;

use crate::registry;

/// Take a fresh snapshot of the platform's registered printers.
#[instrument(skip_all)]
pub fn list_printers(
    adapter: &dyn PlatformAdapter,
    config: &EngineConfig,
) -> Result<Vec<Printer>> {
    let records = adapter.query_destinations()?;
    let printers = registry::normalize(records, config.allow_duplicate_names)?;
    debug!(
        platform = adapter.platform_name(),
        count = printers.len(),
        "discovery snapshot"
    );
    Ok(printers)
}

/// Look one printer up by name against a fresh snapshot.
pub fn find_printer_by_name(
    adapter: &dyn PlatformAdapter,
    config: &EngineConfig,
    name: &str,
) -> Result<Printer> {
    list_printers(adapter, config)?
        .into_iter()
        .find(|printer| printer.name == name)
        .ok_or_else(|| SpoolwerkError::PrinterNotFound(name.to_string()))
}
