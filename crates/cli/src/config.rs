// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration.
//!
//! `specaudit.toml` names the four directories the audit reads and writes.
//! Relative paths resolve against the config file's directory (or the
//! working directory when no file exists), so the core only ever sees
//! absolute paths.

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Resolved tool configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory of authored spec documents.
    pub specs_dir: PathBuf,

    /// Directory of run snapshots.
    pub runs_dir: PathBuf,

    /// Directory holding the latest report and its history.
    pub reports_dir: PathBuf,

    /// Directory of generated test artifacts.
    pub tests_dir: PathBuf,

    /// Snapshots kept by `runs prune` when no --keep is given.
    #[serde(default = "Config::default_keep_runs")]
    pub keep_runs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            specs_dir: PathBuf::from("specs"),
            runs_dir: PathBuf::from("runs"),
            reports_dir: PathBuf::from("reports"),
            tests_dir: PathBuf::from("tests"),
            keep_runs: Self::default_keep_runs(),
        }
    }
}

impl Config {
    fn default_keep_runs() -> usize {
        10
    }

    /// Load from a config file, resolving paths against its directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        let base = path.parent().unwrap_or(Path::new("."));
        config.resolve(base);
        Ok(config)
    }

    /// Defaults resolved against `base` when no config file exists.
    pub fn default_at(base: &Path) -> Self {
        let mut config = Self::default();
        config.resolve(base);
        config
    }

    fn resolve(&mut self, base: &Path) {
        for dir in [
            &mut self.specs_dir,
            &mut self.runs_dir,
            &mut self.reports_dir,
            &mut self.tests_dir,
        ] {
            if dir.is_relative() {
                *dir = base.join(dir.as_path());
            }
        }
    }
}
