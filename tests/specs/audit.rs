//! Behavioral specs for the audit command.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

fn seeded_project() -> Project {
    let project = Project::new();
    project.write_spec("chk-01.md", CHECKOUT_SPEC);
    project.write_test("chk-01.spec.ts", CHECKOUT_TEST);
    project.add_run("2026-08-27-140311");
    project.write_result("2026-08-27-140311", "chk-01.md", CHECKOUT_RESULT);
    project
}

#[test]
fn audit_writes_report_and_prints_it() {
    let project = seeded_project();

    project
        .cmd()
        .arg("audit")
        .assert()
        .success()
        .stdout(predicates::str::contains("# specaudit Report"))
        .stdout(predicates::str::contains("Latest run: 2026-08-27-140311"))
        .stdout(predicates::str::contains("## Coverage by Area"))
        .stdout(predicates::str::contains("### Area: checkout"));

    let report = project.latest_report();
    assert!(report.contains("| CHK-01 | 50.0% | 1 | 1 | 0 | Failing |"));
}

#[test]
fn audit_twice_archives_exactly_one_copy() {
    let project = seeded_project();

    project.cmd().arg("audit").assert().success();
    let first = project.latest_report();
    project.cmd().arg("audit").assert().success();

    let history = project.history_files();
    assert_eq!(history.len(), 1, "exactly one archived copy");
    let archived = std::fs::read_to_string(&history[0]).unwrap();
    assert_eq!(archived, first, "archive preserves the first write");
}

#[test]
fn audit_json_output_carries_the_aggregate() {
    let project = seeded_project();

    let output = project
        .cmd()
        .args(["audit", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["latest_run"], "2026-08-27-140311");
    assert_eq!(value["summary"]["passed"], 1);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["summary"]["areas"][0]["area"], "checkout");
}

#[test]
fn audit_reports_regressions_between_runs() {
    let project = seeded_project();
    // Previous run: both scenarios passed.
    project.add_run("2026-08-26-090000");
    project.write_result(
        "2026-08-26-090000",
        "chk-01.md",
        "spec: CHK-01\npassed: 2\nfailed: 0\nskipped: 0\n\n\
         | scenario | status | duration | notes |\n\
         | 1 | PASS | | |\n\
         | 2 | PASS | | |\n",
    );

    project
        .cmd()
        .arg("audit")
        .assert()
        .success()
        .stdout(predicates::str::contains("## Regressions"))
        .stdout(predicates::str::contains("| CHK-01 | 2 | PASS | FAIL |"));
}

#[test]
fn audit_with_single_run_has_no_regressions_section() {
    let project = seeded_project();
    project
        .cmd()
        .arg("audit")
        .assert()
        .success()
        .stdout(predicates::str::contains("## Regressions").not());
}

#[test]
fn never_tested_spec_is_listed() {
    let project = Project::new();
    project.write_spec("chk-01.md", CHECKOUT_SPEC);
    project.write_test("chk-01.spec.ts", CHECKOUT_TEST);

    project
        .cmd()
        .arg("audit")
        .assert()
        .success()
        .stdout(predicates::str::contains("Latest run: none"))
        .stdout(predicates::str::contains("## Never Tested"))
        .stdout(predicates::str::contains("- CHK-01"));
}

#[test]
fn orphaned_artifact_yields_recommendation() {
    let project = seeded_project();
    project.write_test("checkout-legacy.spec.ts", "test('old flow', () => {});");

    project
        .cmd()
        .arg("audit")
        .assert()
        .success()
        .stdout(predicates::str::contains("checkout-legacy.spec.ts"))
        .stdout(predicates::str::contains("Write specs for or remove"));
}

#[test]
fn missing_tests_yield_generate_recommendation() {
    let project = Project::new();
    project.write_spec("chk-01.md", CHECKOUT_SPEC);

    project
        .cmd()
        .arg("audit")
        .assert()
        .success()
        .stdout(predicates::str::contains("Generate tests for CHK-01"));
}

#[test]
fn spec_errors_set_exit_code_but_still_report() {
    let project = seeded_project();
    project.write_spec("broken.md", "---\nid: BRK-01\narea: misc\n---\n");

    let assert = project.cmd().arg("audit").assert().code(1);
    assert
        .stdout(predicates::str::contains("# specaudit Report"))
        .stderr(predicates::str::contains("missing required field `priority`"));
}

#[test]
fn explicit_config_flag_overrides_discovery() {
    let project = seeded_project();
    let alt = project.path().join("alt.toml");
    std::fs::write(&alt, "specs_dir = \"specs\"\nreports_dir = \"out\"\n").unwrap();

    project
        .cmd()
        .args(["audit", "-C", "alt.toml"])
        .assert()
        .success();
    assert!(project.path().join("out/latest.md").exists());
}
