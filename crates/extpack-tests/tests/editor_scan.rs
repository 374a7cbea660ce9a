//! E2E tests for installed-extension discovery
//!
//! Registries and extension folders are written to a temporary home
//! directory in the same layout the editors use.

use anyhow::Result;
use extpack_lib::application::cli::{Commands, IgnoredCommand};
use extpack_lib::application::commands::execute_command_with_session;
use extpack_lib::application::session::LiveFileSystemProvider;
use extpack_lib::extpack::{EditorScanner, ScanError};
use extpack_tests::TestEnvironment;

fn extensions(editor: Option<&str>, all: bool) -> Commands {
    Commands::Extensions {
        editor: editor.map(str::to_string),
        all,
        search: None,
        include_ignored: false,
    }
}

#[test]
fn scan_reads_registry_and_extension_manifests() -> Result<()> {
    let env = TestEnvironment::new()?;
    let folder =
        env.install_extension("vscode", "rust-lang.rust-analyzer", "0.3.2000", "rust-analyzer")?;
    env.install_extension("vscode", "tamasfe.even-better-toml", "0.19.2", "Even Better TOML")?;

    let fs = LiveFileSystemProvider;
    let scanner = EditorScanner::new(&fs, env.home_path.clone());
    let found = scanner.list_primary()?;

    assert_eq!(found.len(), 2);
    let analyzer = &found[0];
    assert_eq!(analyzer.id, "rust-lang.rust-analyzer");
    assert_eq!(analyzer.name, "rust-analyzer");
    assert_eq!(analyzer.version, "0.3.2000");
    assert_eq!(analyzer.fs_path, folder);
    assert_eq!(analyzer.publisher_display_name.as_deref(), Some("rust-lang"));
    assert_eq!(analyzer.installed_timestamp, Some(1_700_000_000_000));
    assert!(!analyzer.pre_release);
    assert_eq!(found[1].name, "Even Better TOML");
    Ok(())
}

#[test]
fn scan_all_groups_by_editor_and_reports_corrupt_registries() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_extension("vscode", "ms-python.python", "2024.1.0", "Python")?;
    env.install_extension("cursor", "ms-python.python", "2024.0.0", "Python")?;
    env.install_extension("cursor", "golang.go", "0.41.0", "Go")?;
    let windsurf = env.extensions_root("windsurf");
    std::fs::create_dir_all(&windsurf)?;
    std::fs::write(windsurf.join("extensions.json"), "[{")?;

    let fs = LiveFileSystemProvider;
    let scan = EditorScanner::new(&fs, env.home_path.clone()).list_all();

    assert_eq!(scan.editors["Visual Studio Code"].len(), 1);
    assert_eq!(scan.editors["Cursor"].len(), 2);
    assert!(!scan.editors.contains_key("VSCodium"));
    assert_eq!(scan.total(), 3);
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].editor, "Windsurf");
    Ok(())
}

#[test]
fn scan_without_registry_is_empty() -> Result<()> {
    let env = TestEnvironment::new()?;
    let fs = LiveFileSystemProvider;
    let scanner = EditorScanner::new(&fs, env.home_path.clone());

    assert!(scanner.list_for_editor("positron")?.is_empty());
    assert!(matches!(
        scanner.list_for_editor("notepad"),
        Err(ScanError::UnknownEditor { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn e2e_extensions_command_honors_ignored_list() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_extension("vscode", "ms-python.python", "2024.1.0", "Python")?;
    env.install_extension("vscode", "golang.go", "0.41.0", "Go")?;
    let session = env.session();

    execute_command_with_session(
        Commands::Ignored(IgnoredCommand::Add {
            id: "golang.go".to_string(),
        }),
        &session,
    )
    .await?;

    let result = execute_command_with_session(extensions(None, false), &session).await;
    assert!(result.is_ok(), "extensions failed: {:?}", result);

    let result = execute_command_with_session(extensions(Some("cursor"), false), &session).await;
    assert!(result.is_ok(), "missing registry is not an error: {:?}", result);

    let result = execute_command_with_session(extensions(None, true), &session).await;
    assert!(result.is_ok(), "--all failed: {:?}", result);

    let result = execute_command_with_session(extensions(Some("emacs"), false), &session).await;
    let err = result.expect_err("unknown editor must fail");
    assert!(format!("{:#}", err).contains("emacs"));
    Ok(())
}
