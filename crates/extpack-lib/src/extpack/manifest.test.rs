use super::*;

fn folder() -> PathBuf {
    PathBuf::from("/packs/web-dev")
}

#[test]
fn test_resolve_falls_back_to_folder_name() {
    let manifest = PackManifest::parse(r#"{ "extensionPack": [] }"#, Path::new("x")).unwrap();
    let pack = manifest.resolve(&folder());

    assert_eq!(pack.name, "web-dev");
    assert_eq!(pack.display_name, "web-dev");
    assert_eq!(pack.description, "");
    assert_eq!(pack.version, "0.0.0");
    assert!(pack.categories.is_empty());
    assert!(pack.engines.is_none());
    assert_eq!(pack.folder_path, folder());
}

#[test]
fn test_display_name_prefers_name_over_folder() {
    let manifest = PackManifest::parse(
        r#"{ "name": "webdev", "displayName": "", "extensionPack": ["a.b"] }"#,
        Path::new("x"),
    )
    .unwrap();
    let pack = manifest.resolve(&folder());

    assert_eq!(pack.name, "webdev");
    assert_eq!(pack.display_name, "webdev");
    assert_eq!(pack.extension_pack, vec!["a.b"]);
}

#[test]
fn test_missing_extension_pack_is_validation_error() {
    let err = PackManifest::parse(r#"{ "name": "x" }"#, Path::new("p.json")).unwrap_err();
    assert!(matches!(err, PackError::Validation { .. }));
    assert!(err.to_string().contains("missing extensionPack"));

    let err = PackManifest::parse(r#"{ "extensionPack": "a.b" }"#, Path::new("p.json")).unwrap_err();
    assert!(err.to_string().contains("must be a list"));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = PackManifest::parse("{ not json", Path::new("p.json")).unwrap_err();
    assert!(matches!(err, PackError::Parse { .. }));
}

#[test]
fn test_non_string_ids_are_rejected() {
    let err = PackManifest::parse(r#"{ "extensionPack": [1, 2] }"#, Path::new("p.json")).unwrap_err();
    assert!(matches!(err, PackError::Validation { .. }));
}

#[test]
fn test_unknown_keys_survive_rewrite() {
    let text = r#"{
        "name": "web",
        "publisher": "me",
        "repository": { "url": "https://example.invalid/web" },
        "extensionPack": []
    }"#;
    let manifest = PackManifest::parse(text, Path::new("p.json")).unwrap();
    let written = manifest.to_json(Path::new("p.json")).unwrap();

    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["publisher"], "me");
    assert_eq!(value["repository"]["url"], "https://example.invalid/web");
    assert!(value.get("displayName").is_none());
    assert!(written.ends_with("}\n"));
    assert!(written.contains("\n  \"name\": \"web\""));
}

#[test]
fn test_rewrite_keeps_file_key_order() {
    let text = r#"{
        "publisher": "me",
        "extensionPack": ["a.b"],
        "zeta": 1,
        "name": "web",
        "alpha": { "z": 1, "a": 2 },
        "engines": { "vscode": "^1.90.0", "node": ">=18" }
    }"#;
    let mut manifest = PackManifest::parse(text, Path::new("p.json")).unwrap();
    manifest.extension_pack.push("c.d".to_string());
    manifest.description = Some("added".to_string());
    let written = manifest.to_json(Path::new("p.json")).unwrap();

    let value: Value = serde_json::from_str(&written).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["publisher", "extensionPack", "zeta", "name", "alpha", "engines", "description"]
    );
    let nested: Vec<&str> = value["alpha"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(nested, vec!["z", "a"]);
    let engines: Vec<&str> = value["engines"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(engines, vec!["vscode", "node"]);
}

#[test]
fn test_non_string_engine_ranges_are_kept_but_not_resolved() {
    let manifest = PackManifest::parse(
        r#"{ "engines": { "vscode": "^1.90.0", "custom": 3 }, "extensionPack": [] }"#,
        Path::new("p.json"),
    )
    .unwrap();

    let engines = manifest.resolve(&folder()).engines.unwrap();
    assert_eq!(engines.len(), 1);
    assert_eq!(engines["vscode"], "^1.90.0");

    let written = manifest.to_json(Path::new("p.json")).unwrap();
    assert!(written.contains("\"custom\": 3"));
}

#[test]
fn test_new_pack_defaults() {
    let manifest = PackManifest::new_pack(
        "web",
        "Web",
        "",
        vec!["a.b".into(), "c.d".into(), "a.b".into()],
    );

    assert_eq!(manifest.version.as_deref(), Some("0.0.1"));
    assert_eq!(manifest.categories, Some(vec!["Extension Packs".to_string()]));
    assert_eq!(
        manifest.engines.as_ref().and_then(|e| e.get("vscode")).and_then(Value::as_str),
        Some("^1.102.0")
    );
    assert_eq!(manifest.extension_pack, vec!["a.b", "c.d"]);
}

#[test]
fn test_dedup_ids_keeps_first_occurrence() {
    let ids = dedup_ids(vec!["b".into(), "a".into(), "b".into(), "c".into(), "a".into()]);
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn test_extension_pack_serializes_camel_case() {
    let pack = PackManifest::new_pack("web", "Web", "d", vec![]).resolve(&folder());
    let value = serde_json::to_value(&pack).unwrap();
    assert_eq!(value["displayName"], "Web");
    assert_eq!(value["folderPath"], "/packs/web-dev");
    assert_eq!(value["extensionPack"], serde_json::json!([]));
}
