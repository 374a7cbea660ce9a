//! Binary smoke tests: argument parsing, exit codes, and the JSON envelope

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn extpack(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("extpack").expect("extpack binary should be built");
    cmd.current_dir(root.path())
        .env_clear()
        .env("CI", "1")
        .args(["--output", "json", "--yes"])
        .arg("--workdir")
        .arg(root.path())
        .arg("--data-dir")
        .arg(root.path().join("data"))
        .arg("--editor-home")
        .arg(root.path().join("home"));
    cmd
}

#[test]
fn version_flag_prints_package_version() {
    Command::cargo_bin("extpack")
        .expect("extpack binary should be built")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn create_then_show_reports_success_envelopes() {
    let root = TempDir::new().expect("temp dir");

    extpack(&root)
        .args(["create", "demo", "--display-name", "Demo Pack", "ms-python.python"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""success": true"#));

    assert!(root.path().join("packs/demo/package.json").is_file());

    extpack(&root)
        .args(["show", "demo"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""displayName": "Demo Pack""#)
                .and(predicate::str::contains("ms-python.python")),
        );
}

#[test]
fn unknown_pack_exits_nonzero_with_failure_envelope() {
    let root = TempDir::new().expect("temp dir");

    extpack(&root)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stdout(
            predicate::str::contains(r#""success": false"#)
                .and(predicate::str::contains("Extension pack not found: nope")),
        );
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let root = TempDir::new().expect("temp dir");

    extpack(&root)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}
