// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run snapshot store.
//!
//! A snapshot is an immutable directory under the runs root named by a
//! fixed-width UTC timestamp (`YYYY-MM-DD-HHmmss`), holding a `results/`
//! subdirectory of result records and an `evidence/` subdirectory of opaque
//! artifacts. Same-second collisions get a two-digit counter suffix, which
//! keeps names fixed-width so plain lexicographic sort stays the ordering.
//!
//! The external harness writes into snapshots; this store only creates,
//! lists, and prunes them. Fewer than two snapshots is a normal empty
//! result, never an error.

#[cfg(test)]
#[path = "runs_tests.rs"]
mod tests;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::{DateTime, Utc};
use regex::Regex;

/// Subdirectory holding one result record per spec that ran.
pub const RESULTS_DIR: &str = "results";

/// Subdirectory of opaque evidence artifacts. Never read here.
pub const EVIDENCE_DIR: &str = "evidence";

const NAME_FORMAT: &str = "%Y-%m-%d-%H%M%S";

#[allow(clippy::unwrap_used)] // pattern is a literal
fn run_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-\d{6}(-\d{2})?$").unwrap())
}

/// Handle on a runs root directory.
#[derive(Debug, Clone)]
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a named snapshot.
    pub fn run_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create a snapshot directory for the current instant.
    pub fn create(&self) -> anyhow::Result<PathBuf> {
        self.create_at(Utc::now())
    }

    /// Create a snapshot directory for a given instant.
    ///
    /// On a name collision the first free `-NN` counter suffix is used.
    pub fn create_at(&self, at: DateTime<Utc>) -> anyhow::Result<PathBuf> {
        let base = at.format(NAME_FORMAT).to_string();
        let mut name = base.clone();
        let mut counter = 0u32;
        while self.root.join(&name).exists() {
            counter += 1;
            if counter > 99 {
                anyhow::bail!("more than 100 runs created within one second");
            }
            name = format!("{base}-{counter:02}");
        }

        let dir = self.root.join(&name);
        std::fs::create_dir_all(dir.join(RESULTS_DIR))
            .with_context(|| format!("creating run directory {}", dir.display()))?;
        std::fs::create_dir_all(dir.join(EVIDENCE_DIR))?;
        tracing::debug!(run = %name, "created run snapshot");
        Ok(dir)
    }

    /// Snapshot names, newest first.
    ///
    /// A missing runs root means no snapshots yet; other I/O errors
    /// propagate.
    pub fn list(&self) -> anyhow::Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(e) => e,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading runs directory {}", self.root.display()));
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if run_name_pattern().is_match(name) {
                    names.push(name.to_string());
                }
            }
        }
        // Fixed-width zero-padded names: lexicographic descending is
        // newest-first.
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Most recent snapshot, if any.
    pub fn latest(&self) -> anyhow::Result<Option<PathBuf>> {
        Ok(self.list()?.first().map(|n| self.root.join(n)))
    }

    /// Second most recent snapshot, if any.
    pub fn previous(&self) -> anyhow::Result<Option<PathBuf>> {
        Ok(self.list()?.get(1).map(|n| self.root.join(n)))
    }

    /// Delete all but the most recent `keep` snapshots, returning the
    /// names removed.
    pub fn prune(&self, keep: usize) -> anyhow::Result<Vec<String>> {
        let names = self.list()?;
        let mut removed = Vec::new();
        for name in names.into_iter().skip(keep) {
            let dir = self.root.join(&name);
            std::fs::remove_dir_all(&dir)
                .with_context(|| format!("removing run directory {}", dir.display()))?;
            tracing::debug!(run = %name, "pruned run snapshot");
            removed.push(name);
        }
        Ok(removed)
    }
}
