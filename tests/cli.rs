use assert_cmd::Command;
use predicates::prelude::*;

fn pollcalc_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pollcalc").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn eval_prints_result() {
    pollcalc_cmd()
        .args(["eval", "2+2"])
        .assert()
        .success()
        .stdout("4\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn eval_accepts_leading_minus() {
    pollcalc_cmd()
        .args(["eval", "-(2-5)"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn eval_failure_exits_with_status_two_and_reports_once() {
    let assert = pollcalc_cmd()
        .args(["eval", "10/0"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("Division by zero").count(), 1, "stderr was {stderr:?}");
}

#[test]
fn eval_rejects_code() {
    pollcalc_cmd()
        .args(["eval", "alert(1)"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid expression"));
}

#[test]
fn render_escapes_response() {
    pollcalc_cmd()
        .args(["render", "--response", "<b>hi</b>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You said: &lt;b&gt;hi&lt;/b&gt;"))
        .stdout(predicate::str::contains("<b>hi").not());
}
