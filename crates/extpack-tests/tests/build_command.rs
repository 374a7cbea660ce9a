//! E2E tests for packaging
//!
//! A mock `npx` on a private PATH stands in for the real packaging tool.

#![cfg(unix)]

use anyhow::Result;
use extpack_lib::application::cli::Commands;
use extpack_lib::application::commands::execute_command_with_session;
use extpack_lib::application::session::{LiveFileSystemProvider, LiveProcessProvider};
use extpack_lib::extpack::{PackStore, Packager, PackagerError};
use extpack_tests::{MockBehavior, TestEnvironment};
use serde_json::json;

fn build(pack: &str) -> Commands {
    Commands::Build {
        pack: pack.to_string(),
    }
}

fn pack_fixture(env: &TestEnvironment) -> Result<()> {
    env.write_pack(
        "web",
        &json!({
            "name": "web",
            "displayName": "Web",
            "version": "1.2.0",
            "extensionPack": ["esbenp.prettier-vscode"],
        }),
    )?;
    Ok(())
}

#[tokio::test]
async fn e2e_build_produces_archive() -> Result<()> {
    let env = TestEnvironment::new()?;
    pack_fixture(&env)?;
    env.add_mock_executable("npx", MockBehavior::PackageArchive { warning: None })?;

    let result = execute_command_with_session(build("web"), &env.session()).await;
    assert!(result.is_ok(), "build failed: {:?}", result);

    assert!(env.packs_path.join("web").join("web-1.2.0.vsix").is_file());
    assert_eq!(env.get_mock_calls("npx")?, ["vsce package"]);
    Ok(())
}

#[test]
fn build_returns_warnings_and_archive_path() -> Result<()> {
    let env = TestEnvironment::new()?;
    pack_fixture(&env)?;
    env.add_mock_executable(
        "npx",
        MockBehavior::PackageArchive {
            warning: Some("WARNING: A repository field is missing".to_string()),
        },
    )?;

    let fs = LiveFileSystemProvider;
    let process = LiveProcessProvider::with_custom_path(env.bin_path.to_string_lossy().to_string());
    let pack = PackStore::new(&fs, env.packs_path.clone()).get_pack("web")?;
    let packager = Packager::new(
        &process,
        &fs,
        "npx".to_string(),
        vec!["vsce".to_string(), "package".to_string()],
    );

    let output = packager.build(&pack)?;
    assert_eq!(output.output_path, env.packs_path.join("web").join("web-1.2.0.vsix"));
    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("repository"));
    Ok(())
}

#[tokio::test]
async fn e2e_build_failure_surfaces_stderr() -> Result<()> {
    let env = TestEnvironment::new()?;
    pack_fixture(&env)?;
    env.add_mock_executable(
        "npx",
        MockBehavior::AlwaysFail {
            error: "ERROR Make sure to edit the README.md file".to_string(),
        },
    )?;

    let result = execute_command_with_session(build("web"), &env.json_session()).await;
    let err = result.expect_err("failing packager must fail the build");
    match err.downcast_ref::<PackagerError>() {
        Some(PackagerError::CommandFailed { command, stderr }) => {
            assert_eq!(command, "npx vsce package");
            assert!(stderr.contains("README.md"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn e2e_build_with_clean_exit_but_error_output_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    pack_fixture(&env)?;
    env.add_mock_executable(
        "npx",
        MockBehavior::SucceedWithOutput {
            stdout: "Executing prepublish script".to_string(),
            stderr: "npm ERR! could not determine executable to run".to_string(),
        },
    )?;

    let result = execute_command_with_session(build("web"), &env.session()).await;
    let err = result.expect_err("non-warning stderr must fail the build");
    assert!(format!("{:#}", err).contains("could not determine executable"));
    Ok(())
}

#[tokio::test]
async fn e2e_build_without_archive_is_an_error() -> Result<()> {
    let env = TestEnvironment::new()?;
    pack_fixture(&env)?;
    env.add_mock_executable("npx", MockBehavior::AlwaysSucceed)?;

    let result = execute_command_with_session(build("web"), &env.session()).await;
    let err = result.expect_err("missing archive must fail");
    assert!(matches!(
        err.downcast_ref::<PackagerError>(),
        Some(PackagerError::ArchiveMissing { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn e2e_requirements_reports_packager_presence() -> Result<()> {
    let env = TestEnvironment::new()?;

    let missing = execute_command_with_session(Commands::Requirements, &env.json_session()).await;
    assert!(missing.is_ok(), "requirements never fails: {:?}", missing);

    let npx = env.add_mock_executable("npx", MockBehavior::AlwaysSucceed)?;
    let process = LiveProcessProvider::with_custom_path(env.bin_path.to_string_lossy().to_string());
    let fs = LiveFileSystemProvider;
    let packager = Packager::new(&process, &fs, "npx".to_string(), Vec::new());
    assert_eq!(packager.check_available(), Some(npx));
    Ok(())
}
