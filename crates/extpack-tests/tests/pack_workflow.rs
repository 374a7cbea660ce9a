//! E2E tests for the pack lifecycle commands
//!
//! These run the real command handlers against a temporary packs directory
//! and inspect the manifests they leave on disk.

use anyhow::Result;
use extpack_lib::application::cli::Commands;
use extpack_lib::application::commands::execute_command_with_session;
use extpack_lib::application::session::LiveFileSystemProvider;
use extpack_lib::extpack::{PackError, PackStore};
use extpack_tests::TestEnvironment;
use predicates::prelude::*;
use serde_json::json;

fn create(name: &str, extensions: &[&str]) -> Commands {
    Commands::Create {
        name: name.to_string(),
        display_name: None,
        description: Some("Tools for the web".to_string()),
        extensions: extensions.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn e2e_create_add_remove_update_round() -> Result<()> {
    let env = TestEnvironment::new()?;
    let session = env.session();

    execute_command_with_session(create("web-dev", &["esbenp.prettier-vscode"]), &session)
        .await?;

    let manifest = env.read_manifest("web-dev")?;
    assert_eq!(manifest["name"], "web-dev");
    // Non-interactive create falls back to the folder name
    assert_eq!(manifest["displayName"], "web-dev");
    assert_eq!(manifest["version"], "0.0.1");
    assert_eq!(manifest["engines"]["vscode"], "^1.102.0");
    assert_eq!(manifest["categories"], json!(["Extension Packs"]));
    assert_eq!(manifest["extensionPack"], json!(["esbenp.prettier-vscode"]));

    let readme = std::fs::read_to_string(env.packs_path.join("web-dev").join("README.md"))?;
    assert!(predicate::str::contains("# web-dev").eval(&readme));
    assert!(predicate::str::contains("esbenp.prettier-vscode").eval(&readme));

    for _ in 0..2 {
        execute_command_with_session(
            Commands::Add {
                pack: "web-dev".to_string(),
                extension: Some("dbaeumer.vscode-eslint".to_string()),
            },
            &session,
        )
        .await?;
    }
    assert_eq!(
        env.read_manifest("web-dev")?["extensionPack"],
        json!(["esbenp.prettier-vscode", "dbaeumer.vscode-eslint"])
    );

    execute_command_with_session(
        Commands::Remove {
            pack: "web-dev".to_string(),
            extension: "esbenp.prettier-vscode".to_string(),
        },
        &session,
    )
    .await?;
    assert_eq!(
        env.read_manifest("web-dev")?["extensionPack"],
        json!(["dbaeumer.vscode-eslint"])
    );

    execute_command_with_session(
        Commands::Update {
            pack: "web-dev".to_string(),
            display_name: Some("Web Development".to_string()),
            description: None,
            extensions: None,
        },
        &session,
    )
    .await?;
    let manifest = env.read_manifest("web-dev")?;
    assert_eq!(manifest["displayName"], "Web Development");
    assert_eq!(manifest["description"], "Tools for the web");
    assert_eq!(manifest["extensionPack"], json!(["dbaeumer.vscode-eslint"]));

    Ok(())
}

#[tokio::test]
async fn e2e_update_preserves_unmanaged_keys() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_pack(
        "data",
        &json!({
            "name": "data",
            "displayName": "Data",
            "publisher": "someone",
            "repository": { "type": "git", "url": "https://example.invalid/data" },
            "extensionPack": ["ms-python.python", "ms-python.python"],
        }),
    )?;

    execute_command_with_session(
        Commands::Update {
            pack: "data".to_string(),
            display_name: None,
            description: Some(String::new()),
            extensions: Some(vec![
                " ms-toolsai.jupyter ".to_string(),
                String::new(),
                "ms-python.python".to_string(),
                "ms-toolsai.jupyter".to_string(),
            ]),
        },
        &env.session(),
    )
    .await?;

    let manifest = env.read_manifest("data")?;
    assert_eq!(manifest["publisher"], "someone");
    assert_eq!(manifest["repository"]["type"], "git");
    assert_eq!(manifest["description"], "");
    assert_eq!(
        manifest["extensionPack"],
        json!(["ms-toolsai.jupyter", "ms-python.python"])
    );

    let keys: Vec<&str> = manifest
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(
        keys,
        ["name", "displayName", "publisher", "repository", "extensionPack", "description"]
    );
    Ok(())
}

#[tokio::test]
async fn e2e_packs_lists_valid_packs_despite_broken_siblings() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_pack("good", &json!({ "name": "good", "extensionPack": [] }))?;
    std::fs::create_dir_all(env.packs_path.join("broken"))?;
    std::fs::write(env.packs_path.join("broken").join("package.json"), "{ nope")?;
    std::fs::create_dir_all(env.packs_path.join("notes"))?;

    let result = execute_command_with_session(Commands::Packs { search: None }, &env.session())
        .await;
    assert!(result.is_ok(), "packs should tolerate broken packs: {:?}", result);

    let fs = LiveFileSystemProvider;
    let scan = PackStore::new(&fs, env.packs_path.clone()).scanner().scan()?;
    let names: Vec<&str> = scan.packs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["good"]);
    let failed: Vec<_> = scan.failures.iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        failed,
        [env.packs_path.join("broken"), env.packs_path.join("notes")]
    );
    assert!(scan.failures[1].reason.contains("missing manifest"));
    Ok(())
}

#[tokio::test]
async fn e2e_show_unknown_pack_fails() -> Result<()> {
    let env = TestEnvironment::new()?;

    let result = execute_command_with_session(
        Commands::Show {
            pack: "missing".to_string(),
        },
        &env.json_session(),
    )
    .await;

    let err = result.expect_err("unknown pack must fail");
    assert!(matches!(
        err.downcast_ref::<PackError>(),
        Some(PackError::NotFound { name }) if name == "missing"
    ));
    Ok(())
}

#[tokio::test]
async fn e2e_add_without_extension_is_rejected_non_interactively() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_pack("solo", &json!({ "name": "solo", "extensionPack": [] }))?;
    env.install_extension("vscode", "rust-lang.rust-analyzer", "0.3.2000", "rust-analyzer")?;

    let result = execute_command_with_session(
        Commands::Add {
            pack: "solo".to_string(),
            extension: None,
        },
        &env.session(),
    )
    .await;

    let err = result.expect_err("no selection must fail");
    assert!(err.to_string().contains("No extension selected"));
    assert_eq!(env.read_manifest("solo")?["extensionPack"], json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_adds_keep_every_id() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_pack("busy", &json!({ "name": "busy", "extensionPack": [] }))?;

    let ids: Vec<String> = (0..8).map(|i| format!("pub.ext-{}", i)).collect();
    let fs = LiveFileSystemProvider;
    let store = PackStore::new(&fs, env.packs_path.clone());
    std::thread::scope(|scope| {
        for id in &ids {
            let store = &store;
            scope.spawn(move || {
                assert!(store.add_extension("busy", id).is_ok());
            });
        }
    });

    let manifest = env.read_manifest("busy")?;
    let mut stored: Vec<String> = serde_json::from_value(manifest["extensionPack"].clone())?;
    stored.sort();
    assert_eq!(stored, ids);
    Ok(())
}
