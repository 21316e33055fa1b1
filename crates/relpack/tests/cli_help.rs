//! CLI help output tests for relpack.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the relpack binary.
fn relpack() -> Command {
    Command::cargo_bin("relpack").expect("relpack binary should exist")
}

#[test]
fn help_flag_works() {
    relpack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("artifact assembler"))
        .stdout(predicate::str::contains("OUTPUT"));
}

#[test]
fn version_flag_works() {
    relpack()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relpack"));
}

#[test]
fn help_lists_verbosity_flags() {
    relpack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--quiet"));
}
