use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("buildapi")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("self-serve API"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("call"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_shows_every_operation() {
    cargo_bin_cmd!("buildapi")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("getBuildInfo"))
        .stdout(predicate::str::contains(":branch_id/build/:build_id"))
        .stdout(predicate::str::contains("rebuildBuild"))
        .stdout(predicate::str::contains("requires: build_id"))
        .stdout(predicate::str::contains("reprioritizeRequest"));
}

#[test]
fn test_list_filter() {
    cargo_bin_cmd!("buildapi")
        .args(["list", "cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelBuild"))
        .stdout(predicate::str::contains("cancelRevision"))
        .stdout(predicate::str::contains("getBuildInfo").not());
}

// ============================================================================
// call: local failures never touch the network
// ============================================================================

#[test]
fn test_call_wrong_arity_fails() {
    cargo_bin_cmd!("buildapi")
        .args(["--host", "127.0.0.1:1", "call", "getBranch"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("incorrect number of arguments"));
}

#[test]
fn test_call_missing_required_param_fails() {
    cargo_bin_cmd!("buildapi")
        .args(["--host", "127.0.0.1:1", "call", "rebuildBuild", "try"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("build_id"));
}

#[test]
fn test_call_unknown_operation_fails() {
    cargo_bin_cmd!("buildapi")
        .args(["--host", "127.0.0.1:1", "call", "frobnicate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_call_dot_segment_argument_fails() {
    cargo_bin_cmd!("buildapi")
        .args(["--host", "127.0.0.1:1", "call", "cancelBuild", "try", ".."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("dot segments are not allowed"));
}

#[test]
fn test_help_lists_exit_codes() {
    cargo_bin_cmd!("buildapi")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXIT CODES"));
}

#[test]
fn test_call_malformed_param_fails() {
    cargo_bin_cmd!("buildapi")
        .args(["call", "rebuildBuild", "try", "-p", "build_id"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}
