use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("trigger-vectorization-pipeline").expect("binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--vectorizationServiceUrl"))
        .stdout(predicate::str::contains("--clientsList"));
}
