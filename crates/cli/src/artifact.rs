// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test artifact matching.
//!
//! Maps specs to generated test files by base name and grades scenario
//! coverage by test-name text. A spec matches an artifact when their file
//! base names (extensions and `.spec`/`.test` markers stripped) are equal.
//! Scenario matching is a confidence heuristic, not a verified mapping, so
//! the result is a tagged [`MatchConfidence`] rather than a boolean.

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use regex::Regex;
use serde::Serialize;

use crate::spec::Spec;

/// Extensions the generation harness emits.
const ARTIFACT_EXTENSIONS: &[&str] = &["ts", "js", "mjs", "cjs"];

/// A generated test file plus the test names declared inside it.
#[derive(Debug, Clone)]
pub struct TestArtifact {
    pub path: PathBuf,
    pub test_names: Vec<String>,
}

impl TestArtifact {
    /// Base name used for spec matching: extension stripped, then any
    /// trailing `.spec`/`.test` marker (`chk-01.spec.ts` matches `chk-01`).
    pub fn base_name(&self) -> &str {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        stem.strip_suffix(".spec")
            .or_else(|| stem.strip_suffix(".test"))
            .unwrap_or(stem)
    }
}

/// How confidently a scenario maps onto a declared test name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    /// A test name equals the scenario title (case-insensitive).
    Exact,
    /// A test name contains the scenario title as a substring.
    Fuzzy,
    /// No test name mentions the scenario title.
    None,
}

impl MatchConfidence {
    pub fn is_covered(self) -> bool {
        self != Self::None
    }
}

/// Per-scenario match grade.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioMatch {
    pub number: u32,
    pub confidence: MatchConfidence,
}

/// One spec's artifact match.
#[derive(Debug, Clone, Serialize)]
pub struct SpecMatch {
    pub spec_id: String,
    /// None when no artifact shares the spec's base name.
    pub artifact: Option<PathBuf>,
    pub scenarios: Vec<ScenarioMatch>,
}

impl SpecMatch {
    pub fn covered_scenarios(&self) -> usize {
        self.scenarios.iter().filter(|s| s.confidence.is_covered()).count()
    }

    pub fn uncovered_scenarios(&self) -> Vec<u32> {
        self.scenarios
            .iter()
            .filter(|s| !s.confidence.is_covered())
            .map(|s| s.number)
            .collect()
    }
}

/// Matcher output: one entry per spec plus the artifacts nothing claimed.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub specs: Vec<SpecMatch>,
    pub orphaned: Vec<PathBuf>,
}

/// Recursively collect test artifacts under `dir`.
///
/// A missing directory means no tests were generated yet, which is an
/// expected steady state, not an error.
pub fn scan_dir(dir: &Path) -> anyhow::Result<Vec<TestArtifact>> {
    let mut artifacts = Vec::new();
    collect(dir, &mut artifacts)?;
    artifacts.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(artifacts)
}

fn collect(dir: &Path, out: &mut Vec<TestArtifact>) -> anyhow::Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("reading tests directory {}", dir.display()));
        }
    };

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect(&path, out)?;
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !ARTIFACT_EXTENSIONS.contains(&ext) {
            continue;
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading test artifact {}", path.display()))?;
        out.push(TestArtifact {
            test_names: extract_test_names(&content),
            path,
        });
    }
    Ok(())
}

#[allow(clippy::unwrap_used)] // pattern is a literal
fn test_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"\b(?:test|it)\s*\(\s*['"`]([^'"`]+)['"`]"#).unwrap())
}

/// Extract declared test names from `test("...")` / `it("...")` calls.
pub fn extract_test_names(content: &str) -> Vec<String> {
    test_name_pattern()
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// Match every spec against the artifact list by base name, grading each
/// scenario, and report unclaimed artifacts as orphaned.
pub fn match_specs(specs: &[Spec], artifacts: &[TestArtifact]) -> MatchOutcome {
    let mut by_base: HashMap<&str, &TestArtifact> = HashMap::new();
    for artifact in artifacts {
        // Exactly one artifact per base name is expected; first one wins.
        if let Some(first) = by_base.insert(artifact.base_name(), artifact) {
            tracing::warn!(
                kept = %first.path.display(),
                ignored = %artifact.path.display(),
                "multiple artifacts share a base name"
            );
            by_base.insert(artifact.base_name(), first);
        }
    }

    let mut claimed: Vec<&str> = Vec::new();
    let mut matches = Vec::with_capacity(specs.len());
    for spec in specs {
        let artifact = by_base.get(spec.base_name()).copied();
        if artifact.is_some() {
            claimed.push(spec.base_name());
        }
        let scenarios = spec
            .scenarios
            .iter()
            .map(|s| ScenarioMatch {
                number: s.number,
                confidence: artifact
                    .map_or(MatchConfidence::None, |a| grade(&s.title, &a.test_names)),
            })
            .collect();
        matches.push(SpecMatch {
            spec_id: spec.id.clone(),
            artifact: artifact.map(|a| a.path.clone()),
            scenarios,
        });
    }

    let orphaned = artifacts
        .iter()
        .filter(|a| !claimed.contains(&a.base_name()))
        .map(|a| a.path.clone())
        .collect();

    MatchOutcome { specs: matches, orphaned }
}

fn grade(title: &str, test_names: &[String]) -> MatchConfidence {
    let needle = title.to_lowercase();
    let mut confidence = MatchConfidence::None;
    for name in test_names {
        let name = name.to_lowercase();
        if name == needle {
            return MatchConfidence::Exact;
        }
        if name.contains(&needle) {
            confidence = MatchConfidence::Fuzzy;
        }
    }
    confidence
}
