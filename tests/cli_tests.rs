use assert_cmd::Command;
use predicates::prelude::*;

fn report_review() -> Command {
    Command::cargo_bin("report-review").unwrap()
}

#[test]
fn status_prints_sample_summary() {
    report_review()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total issues:   13"))
        .stdout(predicate::str::contains("Critical (open): 3"))
        .stdout(predicate::str::contains("Resolved:       0"))
        .stdout(predicate::str::contains("Citation"));
}

#[test]
fn status_applies_resolve_flags() {
    report_review()
        .args(["status", "--resolve", "c1", "--resolve", "c3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Critical (open): 1"))
        .stdout(predicate::str::contains("Resolved:       2"))
        .stdout(predicate::str::contains("Format").not());
}

#[test]
fn status_warns_on_unknown_id() {
    report_review()
        .args(["status", "-r", "nope"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No finding with id 'nope'"))
        .stdout(predicate::str::contains("Resolved:       0"));
}

#[test]
fn list_orders_resolved_last() {
    let output = report_review()
        .args(["list", "language", "-r", "c2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Language Review (1 / 3 Fixed)"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let l1 = text.find(" l1 ").unwrap();
    let l2 = text.find(" l2 ").unwrap();
    let c2 = text.find(" c2 ").unwrap();
    assert!(l1 < l2 && l2 < c2, "unexpected order:\n{}", text);
}

#[test]
fn list_rejects_overview() {
    report_review()
        .args(["list", "Overview"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn bad_file_fails_before_tui() {
    report_review()
        .args(["--file", "/nonexistent/draft.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}
