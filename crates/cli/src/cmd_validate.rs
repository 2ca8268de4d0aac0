// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Validate command: spec loading and findings only, no report.

use std::process::ExitCode;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::spec::{self, Severity};

pub fn run(config: &Config, output: OutputFormat) -> anyhow::Result<ExitCode> {
    let loaded = spec::load_dir(&config.specs_dir)?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&loaded.findings)?),
        OutputFormat::Text => {
            for f in &loaded.findings {
                println!("{}: {}: {}", f.severity, f.file.display(), f.message);
            }
            let errors = count(&loaded, Severity::Error);
            let warnings = count(&loaded, Severity::Warning);
            println!(
                "{} specs, {} errors, {} warnings",
                loaded.specs.len(),
                errors,
                warnings
            );
        }
    }

    Ok(crate::cmd_audit::exit_code(&loaded))
}

fn count(loaded: &spec::LoadOutcome, severity: Severity) -> usize {
    loaded.findings.iter().filter(|f| f.severity == severity).count()
}
