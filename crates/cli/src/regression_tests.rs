// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for regression detection.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use chrono::NaiveDateTime;

use crate::runs;

use super::*;

fn store() -> (tempfile::TempDir, RunStore) {
    let tmp = tempfile::tempdir().unwrap();
    let store = RunStore::new(tmp.path().join("runs"));
    (tmp, store)
}

fn snapshot(store: &RunStore, at: &str) -> std::path::PathBuf {
    let ts = NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S")
        .unwrap()
        .and_utc();
    store.create_at(ts).unwrap()
}

fn write_record(run: &Path, spec_id: &str, rows: &[(&str, &str)]) {
    let mut content = format!("spec: {spec_id}\n\n| scenario | status | duration | notes |\n");
    for (scenario, status) in rows {
        content.push_str(&format!("| {scenario} | {status} | | |\n"));
    }
    let file = run
        .join(runs::RESULTS_DIR)
        .join(format!("{}.md", spec_id.to_lowercase()));
    std::fs::write(file, content).unwrap();
}

#[test]
fn no_snapshots_is_empty() {
    let (_tmp, store) = store();
    assert!(detect(&store).unwrap().is_empty());
}

#[test]
fn one_snapshot_is_empty() {
    let (_tmp, store) = store();
    let run = snapshot(&store, "2026-08-27 09:00:00");
    write_record(&run, "login", &[("S1", "FAIL")]);
    assert!(detect(&store).unwrap().is_empty());
}

#[test]
fn pass_to_fail_emits_one_regression() {
    let (_tmp, store) = store();
    let older = snapshot(&store, "2026-08-26 09:00:00");
    let newer = snapshot(&store, "2026-08-27 09:00:00");
    write_record(&older, "login", &[("S1", "PASS")]);
    write_record(&newer, "login", &[("S1", "FAIL")]);

    let regressions = detect(&store).unwrap();
    assert_eq!(regressions.len(), 1);
    let r = &regressions[0];
    assert_eq!(r.spec_id, "login");
    assert_eq!(r.scenario_id, "S1");
    assert_eq!(r.previous, Status::Pass);
    assert_eq!(r.current, Status::Fail);
}

#[test]
fn non_regression_transitions_emit_nothing() {
    let (_tmp, store) = store();
    let older = snapshot(&store, "2026-08-26 09:00:00");
    let newer = snapshot(&store, "2026-08-27 09:00:00");
    write_record(
        &older,
        "login",
        &[("S1", "FAIL"), ("S2", "SKIP"), ("S3", "PASS")],
    );
    write_record(
        &newer,
        "login",
        &[("S1", "FAIL"), ("S2", "FAIL"), ("S3", "SKIP"), ("S4", "FAIL")],
    );

    // FAIL->FAIL, SKIP->FAIL, PASS->SKIP, and new-scenario FAIL are all
    // excluded by the strict definition.
    assert!(detect(&store).unwrap().is_empty());
}

#[test]
fn only_the_two_most_recent_snapshots_are_compared() {
    let (_tmp, store) = store();
    let oldest = snapshot(&store, "2026-08-25 09:00:00");
    let middle = snapshot(&store, "2026-08-26 09:00:00");
    let newest = snapshot(&store, "2026-08-27 09:00:00");
    write_record(&oldest, "login", &[("S1", "PASS")]);
    write_record(&middle, "login", &[("S1", "FAIL")]);
    write_record(&newest, "login", &[("S1", "FAIL")]);

    // PASS was two runs ago; latest vs previous is FAIL->FAIL.
    assert!(detect(&store).unwrap().is_empty());
}

#[test]
fn regressions_across_multiple_specs() {
    let (_tmp, store) = store();
    let older = snapshot(&store, "2026-08-26 09:00:00");
    let newer = snapshot(&store, "2026-08-27 09:00:00");
    write_record(&older, "login", &[("S1", "PASS")]);
    write_record(&older, "checkout", &[("S1", "PASS"), ("S2", "PASS")]);
    write_record(&newer, "login", &[("S1", "FAIL")]);
    write_record(&newer, "checkout", &[("S1", "PASS"), ("S2", "FAIL")]);

    let regressions = detect(&store).unwrap();
    assert_eq!(regressions.len(), 2);
    assert!(
        regressions
            .iter()
            .any(|r| r.spec_id == "checkout" && r.scenario_id == "S2")
    );
}
