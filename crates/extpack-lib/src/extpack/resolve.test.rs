use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

const DIR: &str = "/home/.vscode/extensions/pub.ext-1.0.0";

#[test]
fn test_fallback_first_success_wins() {
    let value = Fallback::new()
        .then(|| None)
        .then(|| Some("second"))
        .then(|| Some("third"))
        .resolve();
    assert_eq!(value, Some("second"));
    assert_eq!(Fallback::<&str>::new().then(|| None).resolve_or("default"), "default");
}

#[test]
fn test_nls_token_extraction() {
    assert_eq!(nls_token("%displayName%"), Some("displayName"));
    assert_eq!(nls_token("prefix %a.b% suffix"), Some("a.b"));
    assert_eq!(nls_token("%%"), None);
    assert_eq!(nls_token("%only"), None);
    assert_eq!(nls_token("Plain Name"), None);
}

#[test]
fn test_icon_mime_types() {
    assert_eq!(icon_mime(Path::new("i.PNG")), "image/png");
    assert_eq!(icon_mime(Path::new("i.jpeg")), "image/jpeg");
    assert_eq!(icon_mime(Path::new("i.jpg")), "image/jpeg");
    assert_eq!(icon_mime(Path::new("i.svg")), "image/svg+xml");
    assert_eq!(icon_mime(Path::new("i.gif")), "image/gif");
    assert_eq!(icon_mime(Path::new("i.webp")), "image/webp");
    assert_eq!(icon_mime(Path::new("i.bmp")), "image/png");
    assert_eq!(icon_mime(Path::new("icon")), "image/png");
}

#[test]
fn test_localized_display_name_and_icon() {
    let fs = MockFileSystemProvider::new()
        .with_file(
            format!("{DIR}/package.json"),
            r#"{ "displayName": "%ext.name%", "icon": "media/icon.png", "preview": true }"#,
        )
        .with_file(format!("{DIR}/package.nls.json"), r#"{ "ext.name": "Localized" }"#)
        .with_bytes(format!("{DIR}/media/icon.png"), b"hi".to_vec());

    let meta = read_extension_metadata(&fs, Path::new(DIR));

    assert_eq!(meta.display_name.as_deref(), Some("Localized"));
    assert_eq!(meta.icon.as_deref(), Some("data:image/png;base64,aGk="));
    assert!(meta.preview);
}

#[test]
fn test_missing_nls_entry_keeps_placeholder() {
    let fs = MockFileSystemProvider::new()
        .with_file(format!("{DIR}/package.json"), r#"{ "displayName": "%ext.name%" }"#)
        .with_file(format!("{DIR}/package.nls.json"), r#"{ "ext.name": "" }"#);

    let meta = read_extension_metadata(&fs, Path::new(DIR));
    assert_eq!(meta.display_name.as_deref(), Some("%ext.name%"));
}

#[test]
fn test_unreadable_icon_is_dropped() {
    let fs = MockFileSystemProvider::new()
        .with_file(format!("{DIR}/package.json"), r#"{ "displayName": "X", "icon": "gone.svg" }"#);

    let meta = read_extension_metadata(&fs, Path::new(DIR));
    assert_eq!(meta.display_name.as_deref(), Some("X"));
    assert_eq!(meta.icon, None);
    assert!(!meta.preview);
}

#[test]
fn test_missing_or_malformed_manifest_yields_empty_metadata() {
    let fs = MockFileSystemProvider::new().with_file("/other/package.json", "{ broken");
    assert_eq!(
        read_extension_metadata(&fs, Path::new(DIR)),
        ExtensionMetadata::default()
    );
    assert_eq!(
        read_extension_metadata(&fs, Path::new("/other")),
        ExtensionMetadata::default()
    );
}
