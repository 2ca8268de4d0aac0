//! Test helpers for behavioral specifications.
//!
//! Provides a project fixture builder and a configured Command for
//! black-box testing of the specaudit binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // helpers are shared across spec modules

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;

use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns a Command configured to run the specaudit binary.
pub fn specaudit_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("specaudit"))
}

/// A throwaway project directory with the default layout.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        for sub in ["specs", "tests", "runs", "reports"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Command rooted in this project.
    pub fn cmd(&self) -> Command {
        let mut cmd = specaudit_cmd();
        cmd.current_dir(self.path());
        cmd
    }

    pub fn write_spec(&self, name: &str, content: &str) {
        std::fs::write(self.path().join("specs").join(name), content).unwrap();
    }

    pub fn write_test(&self, name: &str, content: &str) {
        std::fs::write(self.path().join("tests").join(name), content).unwrap();
    }

    /// Create a run snapshot directory the way the harness would.
    pub fn add_run(&self, name: &str) -> PathBuf {
        let run = self.path().join("runs").join(name);
        std::fs::create_dir_all(run.join("results")).unwrap();
        std::fs::create_dir_all(run.join("evidence")).unwrap();
        run
    }

    pub fn write_result(&self, run_name: &str, file: &str, content: &str) {
        let results = self.path().join("runs").join(run_name).join("results");
        std::fs::write(results.join(file), content).unwrap();
    }

    pub fn latest_report(&self) -> String {
        std::fs::read_to_string(self.path().join("reports/latest.md")).unwrap()
    }

    pub fn history_files(&self) -> Vec<PathBuf> {
        let history = self.path().join("reports/history");
        if !history.exists() {
            return vec![];
        }
        let mut files: Vec<_> = std::fs::read_dir(history)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort();
        files
    }
}

/// A complete, passing checkout spec in the current format.
pub const CHECKOUT_SPEC: &str = "\
---
id: CHK-01
area: checkout
priority: P1
persona: new-user
---

## Overview
Checkout happy path.

## Scenarios

### 1. Guest checkout
- Add an item to the cart
- Proceed to checkout
**Expected:** Order confirmation page is shown.

### 2. Declined card
- Pay with the declined test card
**Expected:** A payment error is shown.
";

/// A generated artifact covering both checkout scenarios.
pub const CHECKOUT_TEST: &str = "\
test('guest checkout', async ({ page }) => {});
test('declined card', async ({ page }) => {});
";

/// A result record matching CHK-01 with one failure.
pub const CHECKOUT_RESULT: &str = "\
spec: CHK-01
run_date: 2026-08-27T14:03:11Z
duration: 42.7s
passed: 1
failed: 1
skipped: 0

| scenario | status | duration | notes |
|----------|--------|----------|-------|
| 1 | PASS | 3.1s | |
| 2 | FAIL | 8.0s | card declined |
";
