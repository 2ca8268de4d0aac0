// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run result parsing.
//!
//! One record per spec that ran: a key-value header (spec, run_date,
//! duration, aggregate counts) followed by a `scenario | status | duration |
//! notes` table. Rows that do not match the expected shape are dropped and
//! logged at warn level; reporting proceeds on whatever parsed.

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::runs;
use crate::spec::lexer::{Line, lex};

/// Terminal status of one scenario within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    Skip,
}

impl Status {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "SKIP" => Some(Self::Skip),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
            Self::Skip => write!(f, "SKIP"),
        }
    }
}

/// One row of the result table.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub status: Status,
    pub duration: Option<String>,
    pub notes: String,
}

/// One parsed result record.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub spec_id: String,
    pub run_date: Option<DateTime<Utc>>,
    pub duration: Option<String>,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub scenarios: Vec<ScenarioResult>,
    /// Table rows dropped for not matching the expected shape.
    pub dropped_rows: usize,
}

impl RunResult {
    /// Total attempts declared by the header counts.
    pub fn total(&self) -> u32 {
        self.passed + self.failed + self.skipped
    }
}

/// Parse one result record file.
pub fn parse_file(path: &Path) -> anyhow::Result<RunResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading run result {}", path.display()))?;
    Ok(parse_str(&content, path))
}

/// Parse every result record in a snapshot's `results/` subdirectory,
/// in path order.
pub fn parse_run_dir(run_dir: &Path) -> anyhow::Result<Vec<RunResult>> {
    let results_dir = run_dir.join(runs::RESULTS_DIR);
    let entries = match std::fs::read_dir(&results_dir) {
        Ok(e) => e,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!(dir = %results_dir.display(), "snapshot has no results directory");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("reading results directory {}", results_dir.display()));
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "md"))
        .collect();
    paths.sort();

    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        results.push(parse_file(&path)?);
    }
    Ok(results)
}

fn parse_str(content: &str, path: &Path) -> RunResult {
    // Fall back to the file name for identity: records are named
    // `<spec-id>.md` by the harness.
    let fallback_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    let mut result = RunResult {
        spec_id: fallback_id,
        run_date: None,
        duration: None,
        passed: 0,
        failed: 0,
        skipped: 0,
        scenarios: Vec::new(),
        dropped_rows: 0,
    };

    for (lineno, raw) in content.lines().enumerate() {
        match lex(raw) {
            Line::KeyValue { key, value } => header_field(&mut result, key, value, path),
            Line::TableRow(cells) => table_row(&mut result, &cells, path, lineno + 1),
            _ => {}
        }
    }
    result
}

fn header_field(result: &mut RunResult, key: &str, value: &str, path: &Path) {
    match key.to_ascii_lowercase().as_str() {
        "spec" => result.spec_id = value.to_string(),
        "run_date" => match DateTime::parse_from_rfc3339(value) {
            Ok(dt) => result.run_date = Some(dt.with_timezone(&Utc)),
            Err(_) => {
                tracing::warn!(file = %path.display(), value, "unparseable run_date");
            }
        },
        "duration" => result.duration = Some(value.to_string()),
        "passed" => result.passed = count_field(value, "passed", path),
        "failed" => result.failed = count_field(value, "failed", path),
        "skipped" => result.skipped = count_field(value, "skipped", path),
        _ => {}
    }
}

fn count_field(value: &str, key: &str, path: &Path) -> u32 {
    match value.parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(file = %path.display(), key, value, "unparseable count");
            0
        }
    }
}

fn table_row(result: &mut RunResult, cells: &[&str], path: &Path, lineno: usize) {
    // Header and separator rows are structural, not data.
    if is_header_row(cells) || is_separator_row(cells) {
        return;
    }

    let scenario = cells.first().copied().unwrap_or_default();
    let status = cells.get(1).copied().and_then(Status::parse);
    match status {
        Some(status) if !scenario.is_empty() => {
            result.scenarios.push(ScenarioResult {
                scenario: scenario.to_string(),
                status,
                duration: cells.get(2).filter(|c| !c.is_empty()).map(|c| c.to_string()),
                notes: cells.get(3).copied().unwrap_or_default().to_string(),
            });
        }
        _ => {
            result.dropped_rows += 1;
            tracing::warn!(
                file = %path.display(),
                line = lineno,
                "dropping result row that does not match scenario|status|duration|notes"
            );
        }
    }
}

fn is_header_row(cells: &[&str]) -> bool {
    cells.get(1).is_some_and(|c| c.eq_ignore_ascii_case("status"))
}

fn is_separator_row(cells: &[&str]) -> bool {
    cells
        .iter()
        .all(|c| !c.is_empty() && c.chars().all(|ch| matches!(ch, '-' | ':')))
}
