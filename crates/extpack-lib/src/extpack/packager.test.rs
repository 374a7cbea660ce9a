use super::*;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::{MockFileSystemProvider, MockProcessProvider};
use crate::extpack::manifest::PackManifest;

const FOLDER: &str = "/test/workdir/packs/web";

fn pack() -> ExtensionPack {
    let mut manifest = PackManifest::new_pack("web", "Web", "", vec![]);
    manifest.version = Some("1.2.0".to_string());
    manifest.resolve(Path::new(FOLDER))
}

fn output(success: bool, stderr: &str) -> Result<ProcessOutput, String> {
    Ok(ProcessOutput {
        stdout: "DONE  Packaged".to_string(),
        stderr: stderr.to_string(),
        success,
    })
}

fn packager<'a>(
    process: &'a MockProcessProvider,
    fs: &'a MockFileSystemProvider,
) -> Packager<'a> {
    Packager::new(
        process,
        fs,
        "npx".to_string(),
        vec!["vsce".to_string(), "package".to_string()],
    )
}

#[test]
fn test_build_runs_in_pack_folder_and_finds_named_archive() {
    let process = MockProcessProvider::new().with_result("npx", &["vsce", "package"], output(true, ""));
    let fs = MockFileSystemProvider::new()
        .with_file(format!("{FOLDER}/package.json"), "{}")
        .with_file(format!("{FOLDER}/web-1.1.0.vsix"), "old")
        .with_file(format!("{FOLDER}/web-1.2.0.vsix"), "new")
        .with_file(format!("{FOLDER}/zzz.vsix"), "stale");

    let built = packager(&process, &fs).build(&pack()).unwrap();

    assert_eq!(built.output_path, PathBuf::from(format!("{FOLDER}/web-1.2.0.vsix")));
    assert!(built.warnings.is_empty());
    assert!(process.verify_call("npx", &["vsce", "package"], Path::new(FOLDER)));
}

#[test]
fn test_build_falls_back_to_greatest_archive() {
    let process = MockProcessProvider::new();
    let fs = MockFileSystemProvider::new()
        .with_file(format!("{FOLDER}/a.vsix"), "")
        .with_file(format!("{FOLDER}/b.VSIX"), "")
        .with_file(format!("{FOLDER}/c.zip"), "");

    let built = packager(&process, &fs).build(&pack()).unwrap();
    assert_eq!(built.output_path, PathBuf::from(format!("{FOLDER}/b.VSIX")));
}

#[test]
fn test_build_reports_missing_archive() {
    let process = MockProcessProvider::new();
    let fs = MockFileSystemProvider::new().with_file(format!("{FOLDER}/package.json"), "{}");

    let err = packager(&process, &fs).build(&pack()).unwrap_err();
    assert!(matches!(err, PackagerError::ArchiveMissing { .. }));
}

#[test]
fn test_nonzero_exit_is_command_failure() {
    let process = MockProcessProvider::new().with_result(
        "npx",
        &["vsce", "package"],
        output(false, "ERROR  Missing publisher name"),
    );
    let fs = MockFileSystemProvider::new().with_dir(FOLDER);

    match packager(&process, &fs).build(&pack()) {
        Err(PackagerError::CommandFailed { command, stderr }) => {
            assert_eq!(command, "npx vsce package");
            assert!(stderr.contains("Missing publisher name"));
        }
        other => panic!("expected command failure, got {other:?}"),
    }
}

#[test]
fn test_warning_only_stderr_is_success() {
    let process = MockProcessProvider::new().with_result(
        "npx",
        &["vsce", "package"],
        output(true, "WARNING  A 'repository' field is missing\n"),
    );
    let fs = MockFileSystemProvider::new().with_file(format!("{FOLDER}/web-1.2.0.vsix"), "");

    let built = packager(&process, &fs).build(&pack()).unwrap();
    assert_eq!(built.warnings, vec!["WARNING  A 'repository' field is missing"]);
}

#[test]
fn test_other_stderr_on_success_is_failure() {
    let process = MockProcessProvider::new().with_result(
        "npx",
        &["vsce", "package"],
        output(true, "Error: cannot read LICENSE"),
    );
    let fs = MockFileSystemProvider::new().with_file(format!("{FOLDER}/web-1.2.0.vsix"), "");

    assert!(matches!(
        packager(&process, &fs).build(&pack()),
        Err(PackagerError::CommandFailed { .. })
    ));
}

#[test]
fn test_npm_notice_beside_tool_warning_is_success() {
    let process = MockProcessProvider::new().with_result(
        "npx",
        &["vsce", "package"],
        output(
            true,
            "npm warn exec The following package was not found and will be installed: @vscode/vsce@3.2.1\n\
             WARNING  A 'repository' field is missing from the 'package.json' manifest file.\n",
        ),
    );
    let fs = MockFileSystemProvider::new().with_file(format!("{FOLDER}/web-1.2.0.vsix"), "");

    let built = packager(&process, &fs).build(&pack()).unwrap();
    assert_eq!(built.output_path, PathBuf::from(format!("{FOLDER}/web-1.2.0.vsix")));
    assert_eq!(
        built.warnings,
        vec!["WARNING  A 'repository' field is missing from the 'package.json' manifest file."]
    );
}

#[test]
fn test_whitespace_only_stderr_is_success() {
    let process = MockProcessProvider::new().with_result("npx", &["vsce", "package"], output(true, "\n  \n"));
    let fs = MockFileSystemProvider::new().with_file(format!("{FOLDER}/web-1.2.0.vsix"), "");

    assert!(packager(&process, &fs).build(&pack()).is_ok());
}

#[test]
fn test_spawn_failure_is_process_failure() {
    let process = MockProcessProvider::new().with_result(
        "npx",
        &["vsce", "package"],
        Err("No such file or directory".to_string()),
    );
    let fs = MockFileSystemProvider::new().with_dir(FOLDER);

    assert!(matches!(
        packager(&process, &fs).build(&pack()),
        Err(PackagerError::ProcessFailed { .. })
    ));
}

#[test]
fn test_missing_pack_folder_is_invalid_path() {
    let process = MockProcessProvider::new();
    let fs = MockFileSystemProvider::new();

    assert!(matches!(
        packager(&process, &fs).build(&pack()),
        Err(PackagerError::InvalidPath { .. })
    ));
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_check_available_uses_path_lookup() {
    let fs = MockFileSystemProvider::new();
    let missing = MockProcessProvider::new();
    assert_eq!(packager(&missing, &fs).check_available(), None);

    let present = MockProcessProvider::new().with_program("npx");
    assert_eq!(
        packager(&present, &fs).check_available(),
        Some(PathBuf::from("/mock/bin/npx"))
    );
}
