//! Behavioral specs for the validate command.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn clean_specs_validate_quietly() {
    let project = Project::new();
    project.write_spec("chk-01.md", CHECKOUT_SPEC);

    project
        .cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicates::str::contains("1 specs, 0 errors, 0 warnings"));
}

#[test]
fn warnings_do_not_fail_validation() {
    let project = Project::new();
    // Scenario without an expected outcome: a warning, not an error.
    project.write_spec(
        "chk-02.md",
        "---\nid: CHK-02\narea: checkout\npriority: P2\n---\n\
         ## Scenarios\n### 1. Case\n- step\n",
    );

    project
        .cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicates::str::contains("no expected outcome"))
        .stdout(predicates::str::contains("1 specs, 0 errors, 1 warnings"));
}

#[test]
fn errors_fail_validation() {
    let project = Project::new();
    project.write_spec("broken.md", "---\narea: misc\npriority: P1\n---\n");

    project
        .cmd()
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("missing required field `id`"));
}

#[test]
fn duplicate_ids_across_files_fail_once() {
    let project = Project::new();
    project.write_spec("a.md", CHECKOUT_SPEC);
    project.write_spec("b.md", CHECKOUT_SPEC);

    let output = project.cmd().arg("validate").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.matches("duplicate spec id `CHK-01`").count(),
        1,
        "reported once at corpus level"
    );
}

#[test]
fn json_output_lists_findings() {
    let project = Project::new();
    project.write_spec("broken.md", "---\narea: misc\npriority: P1\n---\n");

    let output = project
        .cmd()
        .args(["validate", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let findings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(findings[0]["severity"], "error");
    assert!(
        findings[0]["message"]
            .as_str()
            .unwrap()
            .contains("missing required field `id`")
    );
}

#[test]
fn legacy_format_specs_validate() {
    let project = Project::new();
    project.write_spec(
        "lgn-02.md",
        "# LGN-02: Login lockout\n**Area:** auth\n**Priority:** P0\n\n\
         ## Scenarios\n### 1. Lockout\n- five bad passwords\n**Expected:** account locked\n",
    );

    project
        .cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicates::str::contains("1 specs, 0 errors, 0 warnings"));
}
