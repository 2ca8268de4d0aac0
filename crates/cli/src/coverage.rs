// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage aggregation.
//!
//! Two coverage notions are kept side by side because they answer different
//! questions: run-based coverage (of the scenarios attempted, how many
//! passed?) and artifact-existence coverage (how many scenarios have a
//! generated test at all, executed or not?). A spec with no run history is
//! `never_tested`, an expected steady state to report on, not an error.

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::artifact::MatchOutcome;
use crate::results::RunResult;
use crate::spec::{Priority, Spec};

/// Area name used when a spec declared none.
const UNCATEGORIZED: &str = "uncategorized";

/// Derived status label, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecStatus {
    NeverTested,
    Failing,
    FullyCovered,
    Partial,
}

impl SpecStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::NeverTested => "Never Tested",
            Self::Failing => "Failing",
            Self::FullyCovered => "Fully Covered",
            Self::Partial => "Partial",
        }
    }
}

/// Per-spec coverage record. Derived fresh each invocation, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SpecCoverage {
    pub spec_id: String,
    pub area: String,
    pub priority: Option<Priority>,
    /// Run-based: passed / attempted from the matching run record.
    pub coverage: f64,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
    pub never_tested: bool,
    /// Artifact-existence: covered scenarios / total scenarios.
    pub artifact_coverage: f64,
    pub covered_scenarios: usize,
    pub total_scenarios: usize,
    pub uncovered_scenarios: Vec<u32>,
    pub status: SpecStatus,
}

/// Per-area aggregate over its specs' counts.
#[derive(Debug, Clone, Serialize)]
pub struct AreaCoverage {
    pub area: String,
    pub coverage: f64,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
    pub specs: Vec<SpecCoverage>,
}

/// Whole-corpus aggregate plus advisory output.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageSummary {
    pub coverage: f64,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
    pub areas: Vec<AreaCoverage>,
    pub never_tested: Vec<String>,
    pub orphaned: Vec<PathBuf>,
    /// Plain advisory strings, never blocking.
    pub recommendations: Vec<String>,
}

/// Aggregate spec, matcher, and run data into the summary.
pub fn calculate(specs: &[Spec], matches: &MatchOutcome, results: &[RunResult]) -> CoverageSummary {
    let mut by_area: BTreeMap<String, Vec<SpecCoverage>> = BTreeMap::new();
    let mut recommendations = Vec::new();

    for spec in specs {
        let record = spec_coverage(spec, matches, results);
        recommend(&record, &mut recommendations);
        let area = if record.area.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            record.area.clone()
        };
        by_area.entry(area).or_default().push(record);
    }

    for orphan in &matches.orphaned {
        recommendations.push(format!(
            "Write specs for or remove orphaned test {}",
            orphan.display()
        ));
    }

    let mut areas = Vec::with_capacity(by_area.len());
    let (mut passed, mut failed, mut skipped) = (0u32, 0u32, 0u32);
    for (area, mut records) in by_area {
        records.sort_by(|a, b| a.spec_id.cmp(&b.spec_id));
        let a_passed = records.iter().map(|r| r.passed).sum();
        let a_failed = records.iter().map(|r| r.failed).sum();
        let a_skipped = records.iter().map(|r| r.skipped).sum();
        passed += a_passed;
        failed += a_failed;
        skipped += a_skipped;
        areas.push(AreaCoverage {
            area,
            coverage: ratio(a_passed, a_passed + a_failed + a_skipped),
            passed: a_passed,
            failed: a_failed,
            skipped: a_skipped,
            total: a_passed + a_failed + a_skipped,
            specs: records,
        });
    }

    let never_tested = areas
        .iter()
        .flat_map(|a| a.specs.iter())
        .filter(|r| r.never_tested)
        .map(|r| r.spec_id.clone())
        .collect();

    CoverageSummary {
        coverage: ratio(passed, passed + failed + skipped),
        passed,
        failed,
        skipped,
        total: passed + failed + skipped,
        areas,
        never_tested,
        orphaned: matches.orphaned.clone(),
        recommendations,
    }
}

fn spec_coverage(spec: &Spec, matches: &MatchOutcome, results: &[RunResult]) -> SpecCoverage {
    let run = results.iter().find(|r| r.spec_id == spec.id);
    let (passed, failed, skipped) = run.map_or((0, 0, 0), |r| (r.passed, r.failed, r.skipped));
    let total = passed + failed + skipped;
    let never_tested = run.is_none();

    let spec_match = matches.specs.iter().find(|m| m.spec_id == spec.id);
    let covered = spec_match.map_or(0, |m| m.covered_scenarios());
    let uncovered = spec_match.map_or_else(
        || spec.scenarios.iter().map(|s| s.number).collect(),
        |m| m.uncovered_scenarios(),
    );
    let total_scenarios = spec.scenarios.len();

    let status = if never_tested {
        SpecStatus::NeverTested
    } else if failed > 0 {
        SpecStatus::Failing
    } else if total > 0 && passed == total {
        SpecStatus::FullyCovered
    } else {
        SpecStatus::Partial
    };

    SpecCoverage {
        spec_id: spec.id.clone(),
        area: spec.area.clone(),
        priority: spec.priority,
        coverage: ratio(passed, total),
        passed,
        failed,
        skipped,
        total,
        never_tested,
        artifact_coverage: ratio(covered as u32, total_scenarios as u32),
        covered_scenarios: covered,
        total_scenarios,
        uncovered_scenarios: uncovered,
        status,
    }
}

fn recommend(record: &SpecCoverage, out: &mut Vec<String>) {
    if record.total_scenarios == 0 {
        return;
    }
    if record.covered_scenarios == 0 {
        out.push(format!("Generate tests for {}", record.spec_id));
    } else if record.covered_scenarios < record.total_scenarios {
        out.push(format!("Review and regenerate tests for {}", record.spec_id));
    }
    if record.failed > 0 {
        out.push(format!("Investigate failing scenarios in {}", record.spec_id));
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}
