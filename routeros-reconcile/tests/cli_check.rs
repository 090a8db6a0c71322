use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures")
        .join(name)
}

fn reconcile_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("routeros-reconcile"))
}

#[test]
fn identical_exports_have_converged() {
    reconcile_cmd()
        .arg("check")
        .arg(fixture("base.rsc"))
        .arg(fixture("base.rsc"))
        .assert()
        .success()
        .stdout(predicate::str::contains("converged"));
}

#[test]
fn drift_fails_with_residual_script() {
    reconcile_cmd()
        .arg("check")
        .arg(fixture("base.rsc"))
        .arg(fixture("target.rsc"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("set servers=9.9.9.9"))
        .stderr(predicate::str::contains("did not converge"));
}

#[test]
fn missing_input_is_reported() {
    reconcile_cmd()
        .arg("check")
        .arg(fixture("absent.rsc"))
        .arg(fixture("base.rsc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}
