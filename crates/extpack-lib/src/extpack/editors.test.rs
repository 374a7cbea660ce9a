use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

const HOME: &str = "/home/dev";

fn scanner(fs: &MockFileSystemProvider) -> EditorScanner<'_> {
    EditorScanner::new(fs, PathBuf::from(HOME))
}

fn registry(scheme: &str) -> String {
    format!("{HOME}/.{scheme}/extensions/extensions.json")
}

#[test]
fn test_extensions_root_uses_scheme_folder() {
    let fs = MockFileSystemProvider::new();
    let variant = EditorVariant::find("cursor").unwrap();
    assert_eq!(
        scanner(&fs).extensions_root(&variant),
        PathBuf::from("/home/dev/.cursor/extensions")
    );
}

#[test]
fn test_missing_registry_is_empty() {
    let fs = MockFileSystemProvider::new();
    assert!(scanner(&fs).list_primary().unwrap().is_empty());
    assert!(scanner(&fs).list_for_editor("Windsurf").unwrap().is_empty());
}

#[test]
fn test_unknown_editor_is_an_error() {
    let fs = MockFileSystemProvider::new();
    let err = scanner(&fs).list_for_editor("emacs").unwrap_err();
    assert!(matches!(err, ScanError::UnknownEditor { .. }));
    assert!(err.to_string().contains("vscode-oss"));
}

#[test]
fn test_corrupt_registry_is_an_error() {
    let fs = MockFileSystemProvider::new().with_file(registry("vscode"), "[{");
    assert!(matches!(
        scanner(&fs).list_primary(),
        Err(ScanError::Registry { .. })
    ));
}

#[test]
fn test_entry_without_manifest_uses_id_and_no_icon() {
    let fs = MockFileSystemProvider::new().with_file(
        registry("vscode"),
        r#"[{
            "identifier": { "id": "pub.ext", "uuid": "u-1" },
            "version": "1.2.3",
            "location": "pub.ext-1.2.3",
            "metadata": {
                "publisherId": "p-1",
                "publisherDisplayName": "Publisher",
                "updated": true,
                "preRelease": true,
                "installedTimestamp": 1700000000000,
                "targetPlatform": "undefined"
            }
        }]"#,
    );

    let extensions = scanner(&fs).list_primary().unwrap();

    assert_eq!(extensions.len(), 1);
    let ext = &extensions[0];
    assert_eq!(ext.id, "pub.ext");
    assert_eq!(ext.name, "pub.ext");
    assert_eq!(ext.version, "1.2.3");
    assert_eq!(ext.icon, None);
    assert!(ext.updated);
    assert!(ext.pre_release);
    assert!(!ext.preview);
    assert_eq!(ext.publisher_display_name.as_deref(), Some("Publisher"));
    assert_eq!(ext.installed_timestamp, Some(1_700_000_000_000));
    assert_eq!(
        ext.fs_path,
        PathBuf::from("/home/dev/.vscode/extensions/pub.ext-1.2.3")
    );
}

#[test]
fn test_location_descriptor_prefers_fs_path() {
    let fs = MockFileSystemProvider::new()
        .with_file(
            registry("vscode"),
            r#"[
                { "identifier": { "id": "a.one" }, "version": "1.0.0",
                  "location": { "$mid": 1, "fsPath": "/opt/ext/a", "path": "/ignored", "scheme": "file" } },
                { "identifier": { "id": "b.two" }, "version": "2.0.0",
                  "location": { "path": "/opt/ext/b", "scheme": "file" } },
                { "identifier": { "id": "c.three" }, "version": "3.0.0" }
            ]"#,
        )
        .with_file("/opt/ext/a/package.json", r#"{ "displayName": "Alpha" }"#);

    let extensions = scanner(&fs).list_primary().unwrap();
    let paths: Vec<_> = extensions.iter().map(|e| e.fs_path.clone()).collect();

    assert_eq!(
        paths,
        vec![
            PathBuf::from("/opt/ext/a"),
            PathBuf::from("/opt/ext/b"),
            PathBuf::from("/home/dev/.vscode/extensions/c.three-3.0.0"),
        ]
    );
    assert_eq!(extensions[0].name, "Alpha");
    assert_eq!(extensions[1].name, "b.two");
}

#[test]
fn test_entries_without_id_are_skipped() {
    let fs = MockFileSystemProvider::new().with_file(
        registry("vscode"),
        r#"[
            { "identifier": { "id": "ok.ext" }, "version": "1.0.0" },
            { "version": "1.0.0" },
            { "identifier": { "id": 7 } },
            42
        ]"#,
    );

    let extensions = scanner(&fs).list_primary().unwrap();
    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].id, "ok.ext");
}

#[test]
fn test_wrongly_typed_fields_only_reduce_metadata() {
    let fs = MockFileSystemProvider::new().with_file(
        registry("vscode"),
        r#"[
            { "identifier": { "id": "pub.good" }, "version": "1.0.0",
              "metadata": { "installedTimestamp": 1700000000000 } },
            { "identifier": { "id": "pub.stamp" }, "version": "2.0.0",
              "metadata": { "installedTimestamp": 1700000000000.5, "updated": "yes",
                            "publisherDisplayName": "Pub" } },
            { "identifier": { "id": "pub.loc" }, "version": "3.0.0", "location": 42,
              "metadata": "nope" },
            { "identifier": { "id": "pub.ver" }, "version": 4,
              "location": { "fsPath": 5, "path": "/opt/ext/pub.ver" } }
        ]"#,
    );

    let extensions = scanner(&fs).list_primary().unwrap();
    let ids: Vec<&str> = extensions.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["pub.good", "pub.stamp", "pub.loc", "pub.ver"]);

    assert_eq!(extensions[0].installed_timestamp, Some(1_700_000_000_000));

    let stamp = &extensions[1];
    assert_eq!(stamp.installed_timestamp, None);
    assert!(!stamp.updated);
    assert_eq!(stamp.publisher_display_name.as_deref(), Some("Pub"));

    let loc = &extensions[2];
    assert_eq!(
        loc.fs_path,
        PathBuf::from("/home/dev/.vscode/extensions/pub.loc-3.0.0")
    );
    assert_eq!(loc.name, "pub.loc");
    assert_eq!(loc.publisher_display_name, None);

    let ver = &extensions[3];
    assert_eq!(ver.version, "");
    assert_eq!(ver.fs_path, PathBuf::from("/opt/ext/pub.ver"));
}

#[test]
fn test_list_all_omits_empty_and_keeps_going() {
    let fs = MockFileSystemProvider::new()
        .with_file(
            registry("vscode"),
            r#"[{ "identifier": { "id": "a.b" }, "version": "1.0.0" }]"#,
        )
        .with_file(registry("cursor"), "not json")
        .with_file(registry("windsurf"), "[]")
        .with_file(
            registry("vscode-oss"),
            r#"[{ "identifier": { "id": "c.d" }, "version": "1.0.0" }]"#,
        );

    let scan = scanner(&fs).list_all();

    let editors: Vec<&str> = scan.editors.keys().map(String::as_str).collect();
    assert_eq!(editors, vec!["VSCodium", "Visual Studio Code"]);
    assert_eq!(scan.total(), 2);
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].editor, "Cursor");
}

#[test]
fn test_installed_extension_serializes_camel_case() {
    let fs = MockFileSystemProvider::new().with_file(
        registry("vscode"),
        r#"[{ "identifier": { "id": "a.b" }, "version": "1.0.0" }]"#,
    );
    let extensions = scanner(&fs).list_primary().unwrap();
    let value = serde_json::to_value(&extensions[0]).unwrap();

    assert_eq!(value["preRelease"], false);
    assert!(value.get("fsPath").is_some());
    assert!(value.get("icon").is_none());
}
