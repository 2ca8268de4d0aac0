// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spec document loading.
//!
//! Parses authored behavioral specs into [`Spec`] values. Parsing is a
//! two-stage pipeline: [`lexer`] classifies lines, then a section-keyed fold
//! builds the document. Two header formats coexist: front-matter metadata
//! (current) and bold-key metadata under the H1 (legacy); the loader falls
//! back to legacy when no front-matter fence opens the file.
//!
//! Validation findings are data, not errors: loading always returns whatever
//! parsed alongside the findings, so reporting can proceed on partial input.

pub mod lexer;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod unit_tests;

mod legacy;
mod parser;
mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

pub use validate::{Finding, Severity};

use self::lexer::Line;

/// One authored behavioral spec.
#[derive(Debug, Clone, Serialize)]
pub struct Spec {
    /// Unique id across the corpus (e.g. "CHK-01").
    pub id: String,
    /// Category tag grouping related specs.
    pub area: String,
    /// None when the declared value was outside the closed set.
    pub priority: Option<Priority>,
    /// None when absent or outside the closed set.
    pub persona: Option<Persona>,
    pub tags: Vec<String>,
    pub seed: Option<u64>,
    pub scenarios: Vec<Scenario>,
    /// Source file the spec was parsed from.
    pub path: PathBuf,
}

impl Spec {
    /// File base name used for artifact matching (extension stripped).
    pub fn base_name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.id)
    }
}

/// One numbered behavior case within a spec.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    /// 1-based number from the sub-heading.
    pub number: u32,
    pub title: String,
    pub steps: Vec<String>,
    /// Empty expected outcome is a quality warning, not an error.
    pub expected: Option<String>,
}

/// Closed priority set. Unknown values are an error-severity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P0" => Some(Self::P0),
            "P1" => Some(Self::P1),
            "P2" => Some(Self::P2),
            "P3" => Some(Self::P3),
            _ => None,
        }
    }
}

/// Closed persona set. Unknown values are a warning-severity finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    NewUser,
    ReturningUser,
    Admin,
    Guest,
}

impl Persona {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new-user" => Some(Self::NewUser),
            "returning-user" => Some(Self::ReturningUser),
            "admin" => Some(Self::Admin),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }
}

/// Everything the loader produced from one directory.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub specs: Vec<Spec>,
    pub findings: Vec<Finding>,
}

impl LoadOutcome {
    /// True when any finding is error severity.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }
}

/// Intermediate parse output shared by the current and legacy parsers.
///
/// All fields are raw strings; `validate` turns them into a typed [`Spec`]
/// and records findings for whatever is missing or malformed.
#[derive(Debug, Default)]
pub(crate) struct RawSpec {
    pub id: Option<String>,
    pub area: Option<String>,
    pub priority: Option<String>,
    pub persona: Option<String>,
    pub tags: Option<String>,
    pub seed: Option<String>,
    pub scenarios: Vec<RawScenario>,
}

#[derive(Debug, Default)]
pub(crate) struct RawScenario {
    pub number: Option<u32>,
    pub title: String,
    pub steps: Vec<String>,
    pub expected: Option<String>,
}

/// Load every `.md` spec in `dir`, in path order.
///
/// Filesystem errors propagate; parse and validation problems become
/// findings. Duplicate ids are reported once at the corpus level.
pub fn load_dir(dir: &Path) -> anyhow::Result<LoadOutcome> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading specs directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "md") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut outcome = LoadOutcome::default();
    for path in paths {
        tracing::debug!(path = %path.display(), "parsing spec");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading spec {}", path.display()))?;
        let raw = parse_str(&content);
        if let Some(spec) = validate::build_spec(raw, &path, &mut outcome.findings) {
            outcome.specs.push(spec);
        }
    }

    validate::check_duplicate_ids(&outcome.specs, &mut outcome.findings);
    Ok(outcome)
}

/// Parse one document, choosing the current or legacy header format.
pub(crate) fn parse_str(content: &str) -> RawSpec {
    let lines = lexer::lex_lines(content);
    let opens_with_fence = lines
        .iter()
        .find(|l| !matches!(l, Line::Blank))
        .is_some_and(|l| matches!(l, Line::Fence));
    if opens_with_fence {
        parser::parse(&lines)
    } else {
        legacy::parse(&lines)
    }
}
