use super::*;
use crate::application::session::LiveFileSystemProvider;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::testing::TempDirFixture;

const ROOT: &str = "/test/workdir/packs";

fn root() -> PathBuf {
    PathBuf::from(ROOT)
}

fn manifest(name: &str, display_name: &str, ids: &[&str]) -> String {
    serde_json::json!({
        "name": name,
        "displayName": display_name,
        "version": "1.0.0",
        "extensionPack": ids,
    })
    .to_string()
}

fn fs_with_pack(name: &str, ids: &[&str]) -> MockFileSystemProvider {
    MockFileSystemProvider::new().with_file(
        format!("{ROOT}/{name}/package.json"),
        manifest(name, name, ids),
    )
}

fn ids_on_disk(fs: &MockFileSystemProvider, name: &str) -> Vec<String> {
    let text = fs
        .file_content(format!("{ROOT}/{name}/package.json"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    serde_json::from_value(value["extensionPack"].clone()).unwrap()
}

mod scanner {
    use super::*;

    #[test]
    fn it_reports_missing_root() {
        let fs = MockFileSystemProvider::new();
        let err = PackScanner::new(&fs, root()).scan().unwrap_err();
        assert!(matches!(err, PackError::RootMissing { path } if path == root()));
    }

    #[test]
    fn it_isolates_invalid_directories() {
        let fs = fs_with_pack("good", &["a.b"])
            .with_file(format!("{ROOT}/bad/package.json"), r#"{ "name": "bad" }"#)
            .with_file(format!("{ROOT}/notes.txt"), "not a pack");

        let scan = PackScanner::new(&fs, root()).scan().unwrap();

        assert_eq!(scan.packs.len(), 1);
        assert_eq!(scan.packs[0].name, "good");
        assert_eq!(scan.failures.len(), 1);
        assert_eq!(scan.failures[0].path, root().join("bad"));
        assert!(scan.failures[0].reason.contains("extensionPack"));
    }

    #[test]
    fn it_reports_directories_without_manifest() {
        let fs = fs_with_pack("good", &[]).with_dir(format!("{ROOT}/empty"));

        let scan = PackScanner::new(&fs, root()).scan().unwrap();

        assert_eq!(scan.packs.len(), 1);
        assert!(scan.failures[0].reason.contains("missing manifest"));
    }

    #[test]
    fn it_sorts_case_insensitively_by_display_name() {
        let fs = MockFileSystemProvider::new()
            .with_file(format!("{ROOT}/a/package.json"), manifest("a", "zebra", &[]))
            .with_file(format!("{ROOT}/b/package.json"), manifest("b", "Apple", &[]))
            .with_file(format!("{ROOT}/c/package.json"), manifest("c", "mango", &[]))
            .with_file(format!("{ROOT}/d/package.json"), manifest("d", "apple", &[]));

        let packs = PackScanner::new(&fs, root()).list_packs().unwrap();
        let names: Vec<&str> = packs.iter().map(|p| p.display_name.as_str()).collect();

        assert_eq!(names, vec!["Apple", "apple", "mango", "zebra"]);
    }

    #[test]
    fn it_converts_failures_into_aggregate() {
        let fs = fs_with_pack("good", &[])
            .with_file(format!("{ROOT}/broken/package.json"), "{ nope");

        let scan = PackScanner::new(&fs, root()).scan().unwrap();
        match scan.into_result() {
            Err(PackError::Aggregate { failures }) => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].reason.contains("Malformed JSON"));
            }
            other => panic!("expected aggregate error, got {other:?}"),
        }
    }

    #[test]
    fn it_finds_packs_by_manifest_name() {
        let fs = MockFileSystemProvider::new().with_file(
            format!("{ROOT}/folder-name/package.json"),
            manifest("manifest-name", "Pack", &[]),
        );
        let scanner = PackScanner::new(&fs, root());

        assert_eq!(
            scanner.find("manifest-name").unwrap().folder_path,
            root().join("folder-name")
        );
        assert!(matches!(
            scanner.find("folder-name"),
            Err(PackError::NotFound { .. })
        ));
    }

    #[test]
    fn it_treats_missing_root_as_not_found_for_lookups() {
        let fs = MockFileSystemProvider::new();
        let err = PackScanner::new(&fs, root()).find("web").unwrap_err();
        assert!(matches!(err, PackError::NotFound { name } if name == "web"));
    }
}

mod store {
    use super::*;

    #[test]
    fn it_creates_pack_files() {
        let fs = MockFileSystemProvider::new();
        let store = PackStore::new(&fs, root());

        let pack = store
            .create_pack("web", "Web Dev", "For the web", vec!["a.b".into(), "a.b".into()])
            .unwrap();

        assert_eq!(pack.name, "web");
        assert_eq!(pack.version, "0.0.1");
        assert_eq!(pack.extension_pack, vec!["a.b"]);
        assert_eq!(pack.folder_path, root().join("web"));
        assert_eq!(ids_on_disk(&fs, "web"), vec!["a.b"]);

        let readme = fs.file_content(format!("{ROOT}/web/README.md")).unwrap();
        assert!(readme.contains("# Web Dev"));
        assert!(readme.contains("- a.b"));

        assert_eq!(store.get_pack("web").unwrap(), pack);
    }

    #[test]
    fn it_rejects_unsafe_names() {
        let fs = MockFileSystemProvider::new();
        let store = PackStore::new(&fs, root());

        for name in ["", "  ", ".", "..", "a/b", "a\\b", "nul\0"] {
            let err = store.create_pack(name, "x", "", vec![]).unwrap_err();
            assert!(matches!(err, PackError::Validation { .. }), "{name:?}");
        }
    }

    #[test]
    fn it_overwrites_existing_pack_on_create() {
        let fs = fs_with_pack("web", &["old.ext"]);
        let store = PackStore::new(&fs, root());

        store.create_pack("web", "Web", "", vec![]).unwrap();
        assert!(ids_on_disk(&fs, "web").is_empty());
    }

    #[test]
    fn it_adds_and_removes_extensions_idempotently() {
        let fs = fs_with_pack("my-pack", &["pub.ext1"]);
        let store = PackStore::new(&fs, root());

        assert_eq!(store.add_extension("my-pack", "pub.ext2").unwrap(), Mutation::Applied);
        assert_eq!(ids_on_disk(&fs, "my-pack"), vec!["pub.ext1", "pub.ext2"]);

        assert_eq!(store.add_extension("my-pack", "pub.ext1").unwrap(), Mutation::Unchanged);
        assert_eq!(ids_on_disk(&fs, "my-pack"), vec!["pub.ext1", "pub.ext2"]);

        assert_eq!(store.remove_extension("my-pack", "pub.ext2").unwrap(), Mutation::Applied);
        assert_eq!(store.remove_extension("my-pack", "pub.ext2").unwrap(), Mutation::Unchanged);
        assert_eq!(ids_on_disk(&fs, "my-pack"), vec!["pub.ext1"]);
    }

    #[test]
    fn it_skips_the_write_when_nothing_changes() {
        let fs = fs_with_pack("web", &["a.b"]).with_read_only(format!("{ROOT}/web/package.json"));
        let store = PackStore::new(&fs, root());

        assert_eq!(store.add_extension("web", "a.b").unwrap(), Mutation::Unchanged);
        assert_eq!(store.remove_extension("web", "x.y").unwrap(), Mutation::Unchanged);
        assert!(matches!(
            store.add_extension("web", "x.y"),
            Err(PackError::Io { .. })
        ));
    }

    #[test]
    fn it_reports_unknown_packs() {
        let fs = fs_with_pack("web", &[]);
        let store = PackStore::new(&fs, root());

        assert!(matches!(store.add_extension("nope", "a.b"), Err(PackError::NotFound { .. })));
        assert!(matches!(store.remove_extension("nope", "a.b"), Err(PackError::NotFound { .. })));
        assert!(matches!(
            store.update_pack("nope", PackUpdate::default()),
            Err(PackError::NotFound { .. })
        ));
    }

    #[test]
    fn it_merges_only_provided_fields() {
        let fs = MockFileSystemProvider::new().with_file(
            format!("{ROOT}/web/package.json"),
            r#"{ "name": "web", "displayName": "Web", "description": "old", "publisher": "me", "extensionPack": ["a.b"] }"#,
        );
        let store = PackStore::new(&fs, root());

        let pack = store
            .update_pack(
                "web",
                PackUpdate {
                    display_name: Some(String::new()),
                    description: Some(String::new()),
                    extension_pack: None,
                },
            )
            .unwrap();

        assert_eq!(pack.display_name, "Web");
        assert_eq!(pack.description, "");
        assert_eq!(pack.extension_pack, vec!["a.b"]);

        let value: serde_json::Value =
            serde_json::from_str(&fs.file_content(format!("{ROOT}/web/package.json")).unwrap())
                .unwrap();
        assert_eq!(value["publisher"], "me");
        assert_eq!(value["description"], "");
    }

    #[test]
    fn it_deduplicates_replacement_lists() {
        let fs = fs_with_pack("web", &[]);
        let store = PackStore::new(&fs, root());

        let pack = store
            .update_pack(
                "web",
                PackUpdate {
                    display_name: Some("Renamed".into()),
                    extension_pack: Some(vec!["x.y".into(), "a.b".into(), "x.y".into()]),
                    ..PackUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(pack.display_name, "Renamed");
        assert_eq!(pack.extension_pack, vec!["x.y", "a.b"]);
    }

    #[test]
    fn it_applies_concurrent_adds_without_losing_any() {
        let fixture = TempDirFixture::new().unwrap();
        fixture
            .write_file("packs/shared/package.json", &manifest("shared", "Shared", &[]))
            .unwrap();
        let root = fixture.path().join("packs");
        let fs = LiveFileSystemProvider;

        std::thread::scope(|scope| {
            for thread in 0..8 {
                let root = root.clone();
                let fs = &fs;
                scope.spawn(move || {
                    let store = PackStore::new(fs, root);
                    for i in 0..5 {
                        store
                            .add_extension("shared", &format!("pub.ext-{thread}-{i}"))
                            .unwrap();
                    }
                });
            }
        });

        let pack = PackStore::new(&fs, root).get_pack("shared").unwrap();
        assert_eq!(pack.extension_pack.len(), 40);
    }
}
