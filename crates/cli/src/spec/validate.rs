// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spec validation.
//!
//! Findings are collected, never thrown: callers decide whether warnings or
//! errors block further action, and loading always yields whatever parsed.

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{Persona, Priority, RawScenario, RawSpec, Scenario, Spec};

/// One validation finding against one spec file.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub file: PathBuf,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

impl Finding {
    fn error(file: &Path, message: impl Into<String>) -> Self {
        Self { file: file.to_path_buf(), message: message.into(), severity: Severity::Error }
    }

    fn warning(file: &Path, message: impl Into<String>) -> Self {
        Self { file: file.to_path_buf(), message: message.into(), severity: Severity::Warning }
    }
}

/// Turn a [`RawSpec`] into a typed [`Spec`], recording findings.
///
/// Returns None only when the document has no id: without an identity the
/// spec cannot participate in matching or coverage. Every other problem
/// degrades to a finding on a still-usable spec.
pub(super) fn build_spec(
    raw: RawSpec,
    path: &Path,
    findings: &mut Vec<Finding>,
) -> Option<Spec> {
    let RawSpec { id, area, priority, persona, tags, seed, scenarios } = raw;

    let Some(id) = id else {
        findings.push(Finding::error(path, "missing required field `id`"));
        return None;
    };

    let area = match area {
        Some(a) => a,
        None => {
            findings.push(Finding::error(path, "missing required field `area`"));
            String::new()
        }
    };

    let priority = match priority.as_deref() {
        None => {
            findings.push(Finding::error(path, "missing required field `priority`"));
            None
        }
        Some(p) => match Priority::parse(p) {
            Some(prio) => Some(prio),
            None => {
                findings.push(Finding::error(
                    path,
                    format!("priority `{p}` is not one of P0, P1, P2, P3"),
                ));
                None
            }
        },
    };

    let persona = match persona.as_deref() {
        None => None,
        Some(p) => match Persona::parse(p) {
            Some(persona) => Some(persona),
            None => {
                findings.push(Finding::warning(
                    path,
                    format!("persona `{p}` is not a known persona"),
                ));
                None
            }
        },
    };

    let tags = tags
        .as_deref()
        .map(|t| t.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let seed = match seed.as_deref() {
        None => None,
        Some(s) => match s.parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                findings.push(Finding::warning(path, format!("seed `{s}` is not an integer")));
                None
            }
        },
    };

    let scenarios = build_scenarios(scenarios, path, findings);
    if scenarios.is_empty() {
        findings.push(Finding::warning(path, "spec has no scenarios"));
    }

    Some(Spec {
        id,
        area,
        priority,
        persona,
        tags,
        seed,
        scenarios,
        path: path.to_path_buf(),
    })
}

fn build_scenarios(
    raw: Vec<RawScenario>,
    path: &Path,
    findings: &mut Vec<Finding>,
) -> Vec<Scenario> {
    let mut scenarios = Vec::with_capacity(raw.len());
    let mut seen = std::collections::BTreeSet::new();

    for (idx, s) in raw.into_iter().enumerate() {
        let number = match s.number {
            Some(n) => n,
            None => {
                findings.push(Finding::warning(
                    path,
                    format!("scenario heading `{}` has no number", s.title),
                ));
                idx as u32 + 1
            }
        };
        if !seen.insert(number) {
            findings.push(Finding::error(path, format!("duplicate scenario number {number}")));
        }
        if s.steps.is_empty() {
            findings.push(Finding::warning(path, format!("scenario {number} has no steps")));
        }
        let expected = s.expected.filter(|e| !e.trim().is_empty());
        if expected.is_none() {
            findings.push(Finding::warning(
                path,
                format!("scenario {number} has no expected outcome"),
            ));
        }
        scenarios.push(Scenario { number, title: s.title, steps: s.steps, expected });
    }

    let sequential = scenarios.iter().enumerate().all(|(i, s)| s.number == i as u32 + 1);
    if !scenarios.is_empty() && !sequential {
        findings.push(Finding::warning(path, "scenario numbering is not sequential"));
    }

    scenarios
}

/// Corpus-level duplicate id check: one finding per duplicated id, not one
/// per file.
pub(super) fn check_duplicate_ids(specs: &[Spec], findings: &mut Vec<Finding>) {
    let mut by_id: BTreeMap<&str, Vec<&Path>> = BTreeMap::new();
    for spec in specs {
        by_id.entry(&spec.id).or_default().push(&spec.path);
    }
    for (id, paths) in by_id {
        if paths.len() > 1 {
            let files = paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            findings.push(Finding::error(
                paths[0],
                format!("duplicate spec id `{id}` in {files}"),
            ));
        }
    }
}
