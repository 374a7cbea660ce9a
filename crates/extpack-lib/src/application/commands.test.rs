use super::*;
use crate::application::config::AppConfig;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::*;
use crate::display::DisplayCall;
use crate::primitives::OutputFormat;

const PACKS: &str = "/test/workdir/packs";
const VSCODE: &str = "/test/home/.vscode/extensions";
const IGNORED: &str = "/test/data/ignored-extensions.json";

fn pack_manifest(name: &str, display_name: &str, ids: &[&str]) -> String {
    serde_json::json!({
        "name": name,
        "displayName": display_name,
        "description": format!("{display_name} tools"),
        "version": "0.1.0",
        "extensionPack": ids,
    })
    .to_string()
}

fn workspace() -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file(
            format!("{PACKS}/web/package.json"),
            pack_manifest("web", "Web Dev", &["esbenp.prettier-vscode"]),
        )
        .with_file(
            format!("{PACKS}/rust/package.json"),
            pack_manifest("rust", "Rust", &[]),
        )
        .with_file(
            format!("{VSCODE}/extensions.json"),
            r#"[
                { "identifier": { "id": "esbenp.prettier-vscode" }, "version": "10.0.0" },
                { "identifier": { "id": "rust-lang.rust-analyzer" }, "version": "0.3.0" },
                { "identifier": { "id": "vscodevim.vim" }, "version": "1.27.0" }
            ]"#,
        )
        .with_file(IGNORED, r#"{ "ignoredExtensions": ["vscodevim.vim"], "lastUpdated": "" }"#)
}

fn json_config() -> AppConfig {
    AppConfig {
        output: OutputFormat::Json,
        ..mock_app_config()
    }
}

fn session() -> MockCommandSession {
    MockCommandSession::new().with_filesystem(workspace())
}

fn json_session() -> MockCommandSession {
    session().with_config(json_config())
}

/// The envelope printed by the last JSON-mode command
fn envelope(session: &MockCommandSession) -> serde_json::Value {
    let text = session
        .display_provider
        .get_calls()
        .into_iter()
        .rev()
        .find_map(|call| match call {
            DisplayCall::StatusMessage { text } => Some(text),
            _ => None,
        })
        .expect("an envelope was printed");
    serde_json::from_str(&text).unwrap()
}

fn tables(session: &MockCommandSession) -> Vec<(Vec<String>, Vec<Vec<String>>)> {
    session
        .display_provider
        .get_calls()
        .into_iter()
        .filter_map(|call| match call {
            DisplayCall::StructuredTable { headers, rows } => Some((headers, rows)),
            _ => None,
        })
        .collect()
}

fn pack_ids(session: &MockCommandSession, name: &str) -> Vec<String> {
    let text = session
        .filesystem_provider
        .file_content(format!("{PACKS}/{name}/package.json"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    serde_json::from_value(value["extensionPack"].clone()).unwrap()
}

mod version_and_requirements {
    use super::*;

    #[tokio::test]
    async fn it_displays_version_information() {
        let session = MockCommandSession::new();
        execute_command_with_session(Commands::Version, &session)
            .await
            .unwrap();

        assert!(session
            .display_provider
            .transcript()
            .contains(&format!("extpack {}", env!("CARGO_PKG_VERSION"))));
        assert_eq!(session.display_provider.count_calls("structured_properties"), 1);
    }

    #[tokio::test]
    async fn it_wraps_version_in_an_envelope() {
        let session = MockCommandSession::new().with_config(json_config());
        execute_command_with_session(Commands::Version, &session)
            .await
            .unwrap();

        let value = envelope(&session);
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(session.display_provider.get_calls().len(), 1);
    }

    #[tokio::test]
    async fn it_reports_missing_packager() {
        let session = MockCommandSession::new();
        execute_command_with_session(Commands::Requirements, &session)
            .await
            .unwrap();

        assert!(session.display_provider.has_call(&DisplayCall::StatusToolCheck {
            tool: "npx".to_string(),
            available: false,
            version: String::new(),
        }));
    }

    #[tokio::test]
    async fn it_reports_available_packager() {
        let session = MockCommandSession::new()
            .with_config(json_config())
            .with_process(MockProcessProvider::new().with_program("npx"));
        execute_command_with_session(Commands::Requirements, &session)
            .await
            .unwrap();

        let value = envelope(&session);
        assert_eq!(value["data"]["available"], true);
        assert_eq!(value["data"]["packager"], "npx vsce package");
        assert_eq!(value["data"]["path"], "/mock/bin/npx");
    }
}

mod packs {
    use super::*;

    #[tokio::test]
    async fn it_lists_packs_sorted_by_display_name() {
        let session = session();
        execute_command_with_session(Commands::Packs { search: None }, &session)
            .await
            .unwrap();

        let tables = tables(&session);
        assert_eq!(tables.len(), 1);
        let names: Vec<&str> = tables[0].1.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(names, vec!["rust", "web"]);
        assert!(session.display_provider.transcript().contains("Packs: 2 loaded"));
    }

    #[tokio::test]
    async fn it_filters_packs_by_search() {
        let session = json_session();
        execute_command_with_session(
            Commands::Packs {
                search: Some("web dev".to_string()),
            },
            &session,
        )
        .await
        .unwrap();

        let packs = envelope(&session)["data"]["packs"].clone();
        assert_eq!(packs.as_array().unwrap().len(), 1);
        assert_eq!(packs[0]["name"], "web");
    }

    #[tokio::test]
    async fn it_warns_about_broken_pack_directories() {
        let fs = workspace().with_file(format!("{PACKS}/broken/package.json"), "{}");
        let session = MockCommandSession::new().with_filesystem(fs);
        execute_command_with_session(Commands::Packs { search: None }, &session)
            .await
            .unwrap();

        assert_eq!(session.display_provider.count_calls("status_warning"), 2);
        assert!(session
            .display_provider
            .transcript()
            .contains("Packs completed with issues (2 successful, 1 failed)"));
    }

    #[tokio::test]
    async fn it_treats_a_missing_root_as_empty() {
        let session = MockCommandSession::new();
        execute_command_with_session(Commands::Packs { search: None }, &session)
            .await
            .unwrap();

        assert!(session
            .display_provider
            .has_call(&DisplayCall::StatusInfo {
                message: "Packs: nothing found".to_string()
            }));
    }

    #[tokio::test]
    async fn it_shows_one_pack() {
        let session = json_session();
        execute_command_with_session(
            Commands::Show {
                pack: "web".to_string(),
            },
            &session,
        )
        .await
        .unwrap();

        let value = envelope(&session);
        assert_eq!(value["data"]["displayName"], "Web Dev");
        assert_eq!(value["data"]["extensionPack"][0], "esbenp.prettier-vscode");
    }

    #[tokio::test]
    async fn it_reports_unknown_packs_in_the_envelope() {
        let session = json_session();
        let result = execute_command_with_session(
            Commands::Show {
                pack: "nope".to_string(),
            },
            &session,
        )
        .await;

        assert!(result.is_err());
        let value = envelope(&session);
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert!(value["error"]
            .as_str()
            .unwrap()
            .contains("Extension pack not found: nope"));
    }
}

mod create_and_update {
    use super::*;

    #[tokio::test]
    async fn it_prompts_for_a_display_name() {
        let session = session().with_interactive(MockInteractiveProvider::new().with_text_input("Python Tools"));
        execute_command_with_session(
            Commands::Create {
                name: "python".to_string(),
                display_name: None,
                description: None,
                extensions: vec!["ms-python.python".to_string()],
            },
            &session,
        )
        .await
        .unwrap();

        let calls = session.interactive_provider.get_text_input_calls();
        assert_eq!(calls, vec![("Display name".to_string(), "python".to_string())]);

        let readme = session
            .filesystem_provider
            .file_content(format!("{PACKS}/python/README.md"))
            .unwrap();
        assert!(readme.contains("# Python Tools"));
        assert_eq!(pack_ids(&session, "python"), vec!["ms-python.python"]);
    }

    #[tokio::test]
    async fn it_uses_the_given_display_name_without_prompting() {
        let session = json_session();
        execute_command_with_session(
            Commands::Create {
                name: "go".to_string(),
                display_name: Some("Go".to_string()),
                description: Some("Gophers".to_string()),
                extensions: vec![],
            },
            &session,
        )
        .await
        .unwrap();

        assert!(session.interactive_provider.get_text_input_calls().is_empty());
        let value = envelope(&session);
        assert_eq!(value["data"]["displayName"], "Go");
        assert_eq!(value["data"]["version"], "0.0.1");
    }

    #[tokio::test]
    async fn it_rejects_an_empty_update() {
        let session = session();
        let err = execute_command_with_session(
            Commands::Update {
                pack: "web".to_string(),
                display_name: None,
                description: None,
                extensions: None,
            },
            &session,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Nothing to update"));
    }

    #[tokio::test]
    async fn it_replaces_the_extension_list() {
        let session = session();
        execute_command_with_session(
            Commands::Update {
                pack: "web".to_string(),
                display_name: None,
                description: Some(String::new()),
                extensions: Some(vec![
                    "a.b".to_string(),
                    " ".to_string(),
                    "c.d".to_string(),
                    "a.b".to_string(),
                ]),
            },
            &session,
        )
        .await
        .unwrap();

        assert_eq!(pack_ids(&session, "web"), vec!["a.b", "c.d"]);
    }
}

mod add_and_remove {
    use super::*;

    #[tokio::test]
    async fn it_adds_an_explicit_extension_once() {
        let session = json_session();
        let add = || Commands::Add {
            pack: "rust".to_string(),
            extension: Some("rust-lang.rust-analyzer".to_string()),
        };

        execute_command_with_session(add(), &session).await.unwrap();
        assert_eq!(envelope(&session)["data"]["changed"], true);

        execute_command_with_session(add(), &session).await.unwrap();
        assert_eq!(envelope(&session)["data"]["changed"], false);
        assert_eq!(pack_ids(&session, "rust"), vec!["rust-lang.rust-analyzer"]);
    }

    #[tokio::test]
    async fn it_picks_from_installed_extensions_when_omitted() {
        let session = session().with_interactive(MockInteractiveProvider::new().with_fuzzy_select(0));
        execute_command_with_session(
            Commands::Add {
                pack: "web".to_string(),
                extension: None,
            },
            &session,
        )
        .await
        .unwrap();

        // already-packed and ignored extensions are not offered
        let calls = session.interactive_provider.get_fuzzy_select_calls();
        assert_eq!(
            calls[0].1,
            vec!["rust-lang.rust-analyzer (rust-lang.rust-analyzer)".to_string()]
        );
        assert_eq!(
            pack_ids(&session, "web"),
            vec!["esbenp.prettier-vscode", "rust-lang.rust-analyzer"]
        );
    }

    #[tokio::test]
    async fn it_fails_when_nothing_is_selected() {
        let session = session();
        let err = execute_command_with_session(
            Commands::Add {
                pack: "web".to_string(),
                extension: None,
            },
            &session,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("No extension selected"));
        assert_eq!(pack_ids(&session, "web"), vec!["esbenp.prettier-vscode"]);
    }

    #[tokio::test]
    async fn it_removes_extensions_idempotently() {
        let session = session();
        let remove = || Commands::Remove {
            pack: "web".to_string(),
            extension: "esbenp.prettier-vscode".to_string(),
        };

        execute_command_with_session(remove(), &session).await.unwrap();
        execute_command_with_session(remove(), &session).await.unwrap();

        assert!(pack_ids(&session, "web").is_empty());
        assert_eq!(session.display_provider.count_calls("status_success"), 1);
        assert_eq!(session.display_provider.count_calls("status_info"), 1);
    }
}

mod build {
    use super::*;

    #[tokio::test]
    async fn it_builds_in_the_pack_folder() {
        let fs = workspace().with_file(format!("{PACKS}/web/web-0.1.0.vsix"), "zip");
        let process = MockProcessProvider::new().with_result(
            "npx",
            &["vsce", "package"],
            Ok(ProcessOutput {
                stdout: "DONE".to_string(),
                stderr: String::new(),
                success: true,
            }),
        );
        let session = MockCommandSession::new()
            .with_filesystem(fs)
            .with_process(process)
            .with_config(json_config());

        execute_command_with_session(
            Commands::Build {
                pack: "web".to_string(),
            },
            &session,
        )
        .await
        .unwrap();

        assert!(session.process_provider.verify_call(
            "npx",
            &["vsce", "package"],
            std::path::Path::new("/test/workdir/packs/web"),
        ));
        assert_eq!(
            envelope(&session)["data"]["outputPath"],
            "/test/workdir/packs/web/web-0.1.0.vsix"
        );
    }

    #[tokio::test]
    async fn it_surfaces_tool_failures() {
        let process = MockProcessProvider::new().with_result(
            "npx",
            &["vsce", "package"],
            Ok(ProcessOutput {
                stdout: String::new(),
                stderr: "ERROR  Make sure to edit the README.md file".to_string(),
                success: false,
            }),
        );
        let session = session().with_process(process);

        let err = execute_command_with_session(
            Commands::Build {
                pack: "web".to_string(),
            },
            &session,
        )
        .await
        .unwrap_err();

        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to build pack 'web'"));
        assert!(chain.contains("Make sure to edit the README.md file"));
    }
}

mod extensions {
    use super::*;

    fn listed_ids(session: &MockCommandSession) -> Vec<String> {
        envelope(session)["data"]["extensions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|ext| ext["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn it_hides_ignored_extensions_by_default() {
        let session = json_session();
        execute_command_with_session(
            Commands::Extensions {
                editor: None,
                all: false,
                search: None,
                include_ignored: false,
            },
            &session,
        )
        .await
        .unwrap();

        assert_eq!(envelope(&session)["data"]["editor"], "Visual Studio Code");
        assert_eq!(
            listed_ids(&session),
            vec!["esbenp.prettier-vscode", "rust-lang.rust-analyzer"]
        );
    }

    #[tokio::test]
    async fn it_includes_ignored_and_filters_by_search() {
        let session = json_session();
        execute_command_with_session(
            Commands::Extensions {
                editor: Some("vscode".to_string()),
                all: false,
                search: Some("vim".to_string()),
                include_ignored: true,
            },
            &session,
        )
        .await
        .unwrap();

        assert_eq!(listed_ids(&session), vec!["vscodevim.vim"]);
    }

    #[tokio::test]
    async fn it_rejects_unknown_editors() {
        let session = session();
        let err = execute_command_with_session(
            Commands::Extensions {
                editor: Some("notepad".to_string()),
                all: false,
                search: None,
                include_ignored: false,
            },
            &session,
        )
        .await
        .unwrap_err();

        assert!(format!("{:#}", err).contains("Unknown editor 'notepad'"));
    }

    #[tokio::test]
    async fn it_scans_every_editor() {
        let fs = workspace()
            .with_file(
                "/test/home/.cursor/extensions/extensions.json",
                r#"[{ "identifier": { "id": "cursor.only" }, "version": "1.0.0" }]"#,
            )
            .with_file("/test/home/.windsurf/extensions/extensions.json", "oops");
        let session = MockCommandSession::new().with_filesystem(fs);

        execute_command_with_session(
            Commands::Extensions {
                editor: None,
                all: true,
                search: None,
                include_ignored: false,
            },
            &session,
        )
        .await
        .unwrap();

        let transcript = session.display_provider.transcript();
        assert!(transcript.contains("Cursor"));
        assert!(transcript.contains("cursor.only"));
        assert!(!transcript.contains("vscodevim.vim"));
        assert!(transcript.contains("Windsurf"));
        assert_eq!(session.display_provider.count_calls("status_step"), 2);
        assert!(transcript.contains("Extensions completed with issues (3 successful, 1 failed)"));
    }
}

mod ignored {
    use super::*;

    async fn run(session: &MockCommandSession, command: IgnoredCommand) -> serde_json::Value {
        execute_command_with_session(Commands::Ignored(command), session)
            .await
            .unwrap();
        envelope(session)["data"].clone()
    }

    #[tokio::test]
    async fn it_manages_the_ignored_set() {
        let session = json_session();

        assert_eq!(run(&session, IgnoredCommand::List).await, serde_json::json!(["vscodevim.vim"]));

        let added = run(&session, IgnoredCommand::Add { id: "a.b".into() }).await;
        assert_eq!(added["changed"], true);

        let toggled = run(&session, IgnoredCommand::Toggle { id: "a.b".into() }).await;
        assert_eq!(toggled["ignored"], false);

        let checked = run(&session, IgnoredCommand::Check { id: "vscodevim.vim".into() }).await;
        assert_eq!(checked["ignored"], true);

        let removed = run(&session, IgnoredCommand::Remove { id: "nope".into() }).await;
        assert_eq!(removed["changed"], false);

        run(&session, IgnoredCommand::Clear).await;
        assert_eq!(run(&session, IgnoredCommand::List).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn it_fails_on_a_corrupt_file() {
        let fs = MockFileSystemProvider::new().with_file(IGNORED, "[oops");
        let session = MockCommandSession::new().with_filesystem(fs);

        let err = execute_command_with_session(Commands::Ignored(IgnoredCommand::List), &session)
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("corrupt"));
    }
}
