// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the starting directory up to the git root looking for
//! specaudit.toml. This is the only module that touches ambient filesystem
//! state; everything downstream receives resolved paths.

use std::path::{Path, PathBuf};

/// Find specaudit.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join("specaudit.toml");
        if candidate.exists() {
            return Some(candidate);
        }
        // Never look outside the repository.
        if dir.join(".git").exists() {
            return None;
        }
    }
    None
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
