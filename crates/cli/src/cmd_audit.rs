// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Audit command: the full batch pass.
//!
//! Load specs, scan artifacts, parse the latest run, aggregate coverage,
//! detect regressions, then render and archive the report. Everything is
//! sequential and in-memory; the filesystem is touched once per input set
//! and once for the report.

use std::process::ExitCode;

use chrono::Utc;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::runs::RunStore;
use crate::spec::Finding;
use crate::{artifact, coverage, regression, report, results, spec};

pub fn run(config: &Config, output: OutputFormat) -> anyhow::Result<ExitCode> {
    let loaded = spec::load_dir(&config.specs_dir)?;
    print_findings(&loaded.findings);

    let artifacts = artifact::scan_dir(&config.tests_dir)?;
    let matches = artifact::match_specs(&loaded.specs, &artifacts);

    let store = RunStore::new(&config.runs_dir);
    let run_names = store.list()?;
    let results = match store.latest()? {
        Some(dir) => results::parse_run_dir(&dir)?,
        None => Vec::new(),
    };

    let summary = coverage::calculate(&loaded.specs, &matches, &results);
    let regressions = regression::detect(&store)?;

    let ctx = report::ReportContext {
        summary: &summary,
        regressions: &regressions,
        latest_run: run_names.first().map(String::as_str),
        generated: Utc::now(),
    };

    // The archived document is always the markdown rendering; --output only
    // selects what goes to stdout.
    let rendered = report::format_report(OutputFormat::Text, &ctx)?;
    let written = report::write_report(&config.reports_dir, &rendered)?;
    tracing::debug!(path = %written.display(), "report written");

    match output {
        OutputFormat::Text => print!("{rendered}"),
        OutputFormat::Json => {
            println!("{}", report::format_report(OutputFormat::Json, &ctx)?);
        }
    }

    Ok(exit_code(&loaded))
}

pub(crate) fn exit_code(loaded: &spec::LoadOutcome) -> ExitCode {
    if loaded.has_errors() { ExitCode::from(1) } else { ExitCode::SUCCESS }
}

pub(crate) fn print_findings(findings: &[Finding]) {
    for f in findings {
        eprintln!("{}: {}: {}", f.severity, f.file.display(), f.message);
    }
}
