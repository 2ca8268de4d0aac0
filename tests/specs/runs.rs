//! Behavioral specs for the runs subcommands.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn runs_new_creates_snapshot_layout() {
    let project = Project::new();

    let output = project.cmd().args(["runs", "new"]).output().unwrap();
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout).unwrap();
    let run = std::path::PathBuf::from(printed.trim());
    assert!(run.join("results").is_dir());
    assert!(run.join("evidence").is_dir());
}

#[test]
fn runs_list_is_newest_first() {
    let project = Project::new();
    project.add_run("2026-08-26-090000");
    project.add_run("2026-08-27-140311");

    project
        .cmd()
        .args(["runs", "list"])
        .assert()
        .success()
        .stdout(predicates::str::diff("2026-08-27-140311\n2026-08-26-090000\n"));
}

#[test]
fn runs_list_with_no_runs_is_empty_and_ok() {
    let project = Project::new();
    project
        .cmd()
        .args(["runs", "list"])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}

#[test]
fn runs_prune_keeps_the_most_recent() {
    let project = Project::new();
    project.add_run("2026-08-25-090000");
    project.add_run("2026-08-26-090000");
    project.add_run("2026-08-27-090000");

    project
        .cmd()
        .args(["runs", "prune", "--keep", "2"])
        .assert()
        .success()
        .stdout(predicates::str::contains("removed 2026-08-25-090000"));

    assert!(!project.path().join("runs/2026-08-25-090000").exists());
    assert!(project.path().join("runs/2026-08-27-090000").exists());
}

#[test]
fn runs_prune_defaults_to_config_keep_runs() {
    let project = Project::new();
    std::fs::write(project.path().join("specaudit.toml"), "keep_runs = 1\n").unwrap();
    project.add_run("2026-08-26-090000");
    project.add_run("2026-08-27-090000");

    project.cmd().args(["runs", "prune"]).assert().success();
    assert!(!project.path().join("runs/2026-08-26-090000").exists());
    assert!(project.path().join("runs/2026-08-27-090000").exists());
}
