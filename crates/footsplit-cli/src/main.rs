// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// footsplit — split a PDF wherever its page footer changes.
//
// Entry point. Initialises logging, resolves the configuration, runs the
// split and prints the per-page footers and the written part paths.

mod cli;

use clap::Parser;
use footsplit_core::error::Result;
use footsplit_core::human_errors::humanize_error;
use footsplit_document::{NativeBackend, SplitReport, split_by_footer};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        let human = humanize_error(&err);
        error!(error = %err, "split failed");
        eprintln!("error: {}", human.message);
        eprintln!("  hint: {}", human.suggestion);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.split_config()?;
    let backend = NativeBackend::from_config(&config);

    let report = split_by_footer(&cli.input, &config, &backend, cli.dry_run)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SplitReport) {
    for record in &report.records {
        println!("{record}");
    }
    if let Some(reason) = &report.pipeline_failure {
        println!("Footer recognition failed: {reason}");
    }
    let paths: Vec<String> = report
        .part_paths()
        .iter()
        .map(|path| format!("{:?}", path.display().to_string()))
        .collect();
    let label = if report.written { "Split PDFs" } else { "Would write" };
    println!("{label}: [{}]", paths.join(", "));
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
