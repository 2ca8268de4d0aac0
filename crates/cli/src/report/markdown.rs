// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown report formatter.

use std::fmt::Write;

use super::{ReportContext, ReportFormatter, percent, render_bar};

const BAR_WIDTH: usize = 20;

/// Markdown report formatter.
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, ctx: &ReportContext) -> anyhow::Result<String> {
        let mut out = String::with_capacity(2048);
        let summary = ctx.summary;

        // Header
        writeln!(out, "# specaudit Report\n")?;
        writeln!(out, "Generated: {}", ctx.generated.format("%Y-%m-%d %H:%M:%S UTC"))?;
        match ctx.latest_run {
            Some(run) => writeln!(out, "Latest run: {run}\n")?,
            None => writeln!(out, "Latest run: none\n")?,
        }

        // Overall coverage
        writeln!(out, "## Overall Coverage\n")?;
        writeln!(
            out,
            "`{}` {}\n",
            render_bar(summary.coverage, BAR_WIDTH),
            percent(summary.coverage)
        )?;
        writeln!(out, "| Passed | Failed | Skipped | Total |")?;
        writeln!(out, "|-------:|-------:|--------:|------:|")?;
        writeln!(
            out,
            "| {} | {} | {} | {} |\n",
            summary.passed, summary.failed, summary.skipped, summary.total
        )?;

        // Per-area table
        writeln!(out, "## Coverage by Area\n")?;
        writeln!(out, "| Area | Coverage | Passed | Failed | Skipped | Total |")?;
        writeln!(out, "|------|---------:|-------:|-------:|--------:|------:|")?;
        for area in &summary.areas {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                area.area,
                percent(area.coverage),
                area.passed,
                area.failed,
                area.skipped,
                area.total
            )?;
        }
        writeln!(out)?;

        // Per-area detail
        for area in &summary.areas {
            writeln!(out, "### Area: {}\n", area.area)?;
            writeln!(out, "| Spec | Coverage | Passed | Failed | Skipped | Status |")?;
            writeln!(out, "|------|---------:|-------:|-------:|--------:|--------|")?;
            for spec in &area.specs {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    spec.spec_id,
                    percent(spec.coverage),
                    spec.passed,
                    spec.failed,
                    spec.skipped,
                    spec.status.label()
                )?;
            }
            writeln!(out)?;
        }

        // Regressions, only when non-empty
        if !ctx.regressions.is_empty() {
            writeln!(out, "## Regressions\n")?;
            writeln!(out, "| Spec | Scenario | Previous | Current |")?;
            writeln!(out, "|------|----------|----------|---------|")?;
            for r in ctx.regressions {
                writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    r.spec_id, r.scenario_id, r.previous, r.current
                )?;
            }
            writeln!(out)?;
        }

        // Never tested, only when non-empty
        if !summary.never_tested.is_empty() {
            writeln!(out, "## Never Tested\n")?;
            for id in &summary.never_tested {
                writeln!(out, "- {id}")?;
            }
            writeln!(out)?;
        }

        if !summary.recommendations.is_empty() {
            writeln!(out, "## Recommendations\n")?;
            for rec in &summary.recommendations {
                writeln!(out, "- {rec}")?;
            }
        }

        Ok(out)
    }
}
