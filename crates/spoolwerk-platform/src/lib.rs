// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk — Platform printing adapters.
//
// This crate is the only place that touches the OS printing subsystem. The
// `PlatformAdapter` trait is the seam: CUPS on Unix-like systems, the print
// spooler on Windows, and a recording mock everywhere else (and in tests).

pub mod mock;
pub mod traits;

#[cfg(any(unix, windows))]
pub mod exec;

#[cfg(unix)]
pub mod cups;

#[cfg(windows)]
pub mod winspool;

use std::time::Duration;

/// Construct the printing adapter for the target operating system.
///
/// This is the single owned handle to platform printing resources — create
/// it once at process start and share it behind the engine facade. The
/// adapter itself holds no mutable state; concurrent calls are serialized by
/// the OS printing service.
pub fn platform_adapter(timeout: Duration) -> Box<dyn traits::PlatformAdapter> {
    #[cfg(unix)]
    {
        Box::new(cups::CupsAdapter::new(timeout))
    }
    #[cfg(windows)]
    {
        Box::new(winspool::SpoolerAdapter::new(timeout))
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = timeout;
        Box::new(mock::MockAdapter::unavailable())
    }
}
