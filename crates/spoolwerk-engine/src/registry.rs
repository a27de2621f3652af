// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer registry — pure normalization of platform destination records.
//
// No I/O happens here. Missing optional fields take documented defaults:
// `system_name` falls back to the queue name, string fields to "", flags to
// false, state to Unknown. Printer names are the submission key, so a
// snapshot containing two destinations with the same name is rejected unless
// the configuration explicitly downgrades that to first-record-wins.

use std::collections::HashSet;

use tracing::warn;

use spoolwerk_core::error::{Result, SpoolwerkError};
use spoolwerk_core::types::{DestinationRecord, Printer, PrinterState};

/// Normalize a platform snapshot into caller-facing printers.
pub fn normalize(records: Vec<DestinationRecord>, allow_duplicates: bool) -> Result<Vec<Printer>> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut printers = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.name.clone()) {
            if allow_duplicates {
                warn!(name = %record.name, "platform reported a duplicate printer name, keeping the first record");
                continue;
            }
            return Err(SpoolwerkError::DuplicatePrinterName(record.name));
        }
        printers.push(from_record(record));
    }

    Ok(printers)
}

/// Convert one raw record, filling the documented defaults.
pub fn from_record(record: DestinationRecord) -> Printer {
    let state = record
        .state
        .as_deref()
        .map(PrinterState::from_platform)
        .unwrap_or_default();
    Printer {
        system_name: record.system_name.unwrap_or_else(|| record.name.clone()),
        name: record.name,
        driver_name: record.driver.unwrap_or_default(),
        uri: record.uri.unwrap_or_default(),
        location: record.location.unwrap_or_default(),
        is_default: record.is_default,
        is_shared: record.is_shared.unwrap_or(false),
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_record_gets_documented_defaults() {
        let printer = from_record(DestinationRecord::named("Office"));
        assert_eq!(printer.name, "Office");
        assert_eq!(printer.system_name, "Office");
        assert_eq!(printer.driver_name, "");
        assert_eq!(printer.uri, "");
        assert_eq!(printer.location, "");
        assert!(!printer.is_default);
        assert!(!printer.is_shared);
        assert_eq!(printer.state, PrinterState::Unknown);
    }

    #[test]
    fn platform_fields_survive_normalization() {
        let record = DestinationRecord {
            name: "Office".into(),
            system_name: Some("Office_HP".into()),
            driver: Some("HP LaserJet".into()),
            uri: Some("ipp://10.0.0.12/ipp/print".into()),
            location: Some("2nd floor".into()),
            state: Some("printing".into()),
            is_default: true,
            is_shared: Some(true),
        };
        let printer = from_record(record);
        assert_eq!(printer.system_name, "Office_HP");
        assert_eq!(printer.state, PrinterState::Printing);
        assert!(printer.is_default);
        assert!(printer.is_shared);
    }

    #[test]
    fn duplicate_names_are_rejected_by_default() {
        let records = vec![
            DestinationRecord::named("Office"),
            DestinationRecord::named("Lab"),
            DestinationRecord::named("Office"),
        ];
        let err = normalize(records, false).unwrap_err();
        assert!(matches!(err, SpoolwerkError::DuplicatePrinterName(name) if name == "Office"));
    }

    #[test]
    fn duplicate_names_keep_first_record_when_allowed() {
        let mut first = DestinationRecord::named("Office");
        first.location = Some("here".into());
        let mut second = DestinationRecord::named("Office");
        second.location = Some("there".into());

        let printers = normalize(vec![first, second], true).unwrap();
        assert_eq!(printers.len(), 1);
        assert_eq!(printers[0].location, "here");
    }
}
