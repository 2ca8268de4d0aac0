// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report rendering and archival.
//!
//! One document per invocation at `<reports>/latest.md`. Before writing, an
//! existing report is moved into `history/` with its last-modified time as a
//! suffix, so a new write never silently destroys the previous report.

mod json;
mod markdown;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::cli::OutputFormat;
use crate::coverage::CoverageSummary;
use crate::regression::Regression;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;

/// Fixed file name of the current report.
pub const LATEST_REPORT: &str = "latest.md";

/// Subfolder of archived prior reports.
pub const HISTORY_DIR: &str = "history";

/// Everything a formatter needs for one rendering pass.
pub struct ReportContext<'a> {
    pub summary: &'a CoverageSummary,
    pub regressions: &'a [Regression],
    /// Name of the most recent run snapshot, if any exists.
    pub latest_run: Option<&'a str>,
    pub generated: DateTime<Utc>,
}

/// Trait for rendering the aggregate into an output format.
pub trait ReportFormatter {
    fn format(&self, ctx: &ReportContext) -> anyhow::Result<String>;
}

/// Render the report in the requested format.
pub fn format_report(format: OutputFormat, ctx: &ReportContext) -> anyhow::Result<String> {
    let formatter: Box<dyn ReportFormatter> = match format {
        OutputFormat::Text => Box::new(MarkdownFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    formatter.format(ctx)
}

/// Write `content` to the fixed latest-report path, archiving any prior
/// report first. Returns the written path.
pub fn write_report(reports_dir: &Path, content: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(reports_dir)
        .with_context(|| format!("creating reports directory {}", reports_dir.display()))?;

    let latest = reports_dir.join(LATEST_REPORT);
    if latest.exists() {
        let archived = archive(&latest, reports_dir)?;
        tracing::debug!(to = %archived.display(), "archived previous report");
    }

    std::fs::write(&latest, content)
        .with_context(|| format!("writing report {}", latest.display()))?;
    Ok(latest)
}

/// Move the existing report into `history/`, suffixed with its mtime. A
/// same-second archive gets a counter suffix rather than being replaced.
fn archive(latest: &Path, reports_dir: &Path) -> anyhow::Result<PathBuf> {
    let history = reports_dir.join(HISTORY_DIR);
    std::fs::create_dir_all(&history)?;

    let modified = std::fs::metadata(latest)?.modified()?;
    let stamp = DateTime::<Utc>::from(modified).format("%Y-%m-%d-%H%M%S");

    let mut dest = history.join(format!("report-{stamp}.md"));
    let mut counter = 0u32;
    while dest.exists() {
        counter += 1;
        dest = history.join(format!("report-{stamp}-{counter:02}.md"));
    }

    std::fs::rename(latest, &dest)
        .with_context(|| format!("archiving report to {}", dest.display()))?;
    Ok(dest)
}

/// Render a fixed-width coverage bar, e.g. `██████░░░░` for 0.6.
pub fn render_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..width {
        bar.push('░');
    }
    bar
}

/// Percent with one decimal, as shown in every table.
pub(crate) fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
