// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwerk — operator command line.
//
// Entry point. Initialises logging, constructs the engine over the native
// platform adapter, and runs one subcommand. Structured output is JSON so
// the tool composes with scripts.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use spoolwerk_engine::{Payload, PrintEngine, Printer, Result};

#[derive(Parser)]
#[command(name = "spoolwerk", version, about = "Discover local printers and submit print jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the printers registered with the OS.
    List,
    /// Show one printer by queue name.
    Show { name: String },
    /// Spool raw text as a print job. Reads stdin when --text is absent.
    PrintText {
        printer: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        job_name: Option<String>,
    },
    /// Hand a file to the platform's print-file facility.
    PrintFile {
        printer: String,
        path: PathBuf,
        #[arg(long)]
        job_name: Option<String>,
    },
    /// Print a PDF through the platform's PDF-aware path.
    PrintPdf {
        printer: String,
        path: PathBuf,
        #[arg(long)]
        job_name: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = PrintEngine::new();
    tracing::debug!(platform = engine.platform_name(), "engine ready");

    match run(&engine, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("spoolwerk: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(engine: &PrintEngine, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let printers = engine.list_printers()?;
            println!("{}", serde_json::to_string_pretty(&printers)?);
        }
        Command::Show { name } => {
            let printer = engine.find_printer_by_name(&name)?;
            println!("{}", serde_json::to_string_pretty(&printer)?);
        }
        Command::PrintText {
            printer,
            text,
            job_name,
        } => {
            let text = match text {
                Some(text) => text,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            submit(engine, &printer, Payload::RawText(text), job_name)?;
        }
        Command::PrintFile {
            printer,
            path,
            job_name,
        } => {
            submit(engine, &printer, Payload::GenericFile(path), job_name)?;
        }
        Command::PrintPdf {
            printer,
            path,
            job_name,
        } => {
            submit(engine, &printer, Payload::PdfFile(path), job_name)?;
        }
    }
    Ok(())
}

fn submit(
    engine: &PrintEngine,
    printer_name: &str,
    payload: Payload,
    job_name: Option<String>,
) -> Result<()> {
    let printer: Printer = engine.find_printer_by_name(printer_name)?;
    let report = engine.submit(&printer, payload, job_name.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
