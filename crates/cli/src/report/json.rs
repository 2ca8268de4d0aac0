// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON report formatter for machine consumers.

use serde::Serialize;

use crate::coverage::CoverageSummary;
use crate::regression::Regression;

use super::{ReportContext, ReportFormatter};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    latest_run: Option<&'a str>,
    summary: &'a CoverageSummary,
    regressions: &'a [Regression],
}

/// JSON report formatter.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, ctx: &ReportContext) -> anyhow::Result<String> {
        let report = JsonReport {
            generated: ctx.generated.to_rfc3339(),
            latest_run: ctx.latest_run,
            summary: ctx.summary,
            regressions: ctx.regressions,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
