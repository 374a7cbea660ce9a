//! E2E tests for the ignored-extensions list

use anyhow::Result;
use extpack_lib::application::cli::{Commands, IgnoredCommand};
use extpack_lib::application::commands::execute_command_with_session;
use extpack_lib::application::session::LiveFileSystemProvider;
use extpack_lib::extpack::IgnoredStore;
use extpack_tests::TestEnvironment;
use serde_json::Value;

fn ignored(command: IgnoredCommand) -> Commands {
    Commands::Ignored(command)
}

#[tokio::test]
async fn e2e_ignored_add_toggle_remove_persist() -> Result<()> {
    let env = TestEnvironment::new()?;
    let session = env.session();
    let file = env.data_path.join("ignored-extensions.json");

    execute_command_with_session(
        ignored(IgnoredCommand::Add {
            id: "ms-vscode.cpptools".to_string(),
        }),
        &session,
    )
    .await?;
    execute_command_with_session(
        ignored(IgnoredCommand::Toggle {
            id: "github.copilot".to_string(),
        }),
        &session,
    )
    .await?;

    let record: Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
    assert_eq!(
        record["ignoredExtensions"],
        serde_json::json!(["ms-vscode.cpptools", "github.copilot"])
    );
    assert!(record["lastUpdated"].as_str().is_some_and(|s| s.ends_with('Z')));

    execute_command_with_session(
        ignored(IgnoredCommand::Toggle {
            id: "ms-vscode.cpptools".to_string(),
        }),
        &session,
    )
    .await?;
    execute_command_with_session(
        ignored(IgnoredCommand::Remove {
            id: "not.there".to_string(),
        }),
        &session,
    )
    .await?;

    let fs = LiveFileSystemProvider;
    let store = IgnoredStore::new(&fs, &env.data_path);
    assert_eq!(store.list()?, ["github.copilot"]);
    assert!(store.contains("github.copilot")?);

    execute_command_with_session(ignored(IgnoredCommand::Clear), &session).await?;
    assert!(store.list()?.is_empty());
    assert!(file.exists());
    Ok(())
}

#[tokio::test]
async fn e2e_ignored_list_without_file_is_empty() -> Result<()> {
    let env = TestEnvironment::new()?;

    let result = execute_command_with_session(ignored(IgnoredCommand::List), &env.json_session())
        .await;
    assert!(result.is_ok(), "list failed: {:?}", result);
    assert!(!env.data_path.join("ignored-extensions.json").exists());
    Ok(())
}

#[tokio::test]
async fn e2e_ignored_corrupt_file_is_reported() -> Result<()> {
    let env = TestEnvironment::new()?;
    std::fs::write(env.data_path.join("ignored-extensions.json"), "not json")?;

    let result = execute_command_with_session(
        ignored(IgnoredCommand::Check {
            id: "a.b".to_string(),
        }),
        &env.session(),
    )
    .await;
    assert!(result.is_err());
    Ok(())
}
