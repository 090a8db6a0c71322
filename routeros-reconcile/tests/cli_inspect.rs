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
fn inspect_lists_sections_with_modes() {
    reconcile_cmd()
        .arg("inspect")
        .arg(fixture("base.rsc"))
        .assert()
        .success()
        .stdout(predicate::str::contains("version=7.15.3"))
        .stdout(predicate::str::contains("filter [ordered] items=11 settings=0"))
        .stdout(predicate::str::contains("dns [unordered] items=0 settings=1"));
}

#[test]
fn inspect_json_restricted_to_section() {
    reconcile_cmd()
        .arg("inspect")
        .arg(fixture("base.rsc"))
        .arg("--section")
        .arg("/ip firewall")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"path\": \"/ip firewall filter\""))
        .stdout(predicate::str::contains("\"mode\": \"ordered\""))
        .stdout(predicate::str::contains("/ip dns").not());
}

#[test]
fn inspect_unknown_section_fails() {
    reconcile_cmd()
        .arg("inspect")
        .arg(fixture("base.rsc"))
        .arg("--section")
        .arg("/routing bgp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
