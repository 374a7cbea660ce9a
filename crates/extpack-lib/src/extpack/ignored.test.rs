use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

const DATA: &str = "/test/data";
const FILE: &str = "/test/data/ignored-extensions.json";

fn read_record(fs: &MockFileSystemProvider) -> IgnoredExtensionsRecord {
    serde_json::from_str(&fs.file_content(FILE).unwrap()).unwrap()
}

#[test]
fn test_fresh_profile_is_empty() {
    let fs = MockFileSystemProvider::new();
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    assert!(store.list().unwrap().is_empty());
    assert!(!store.contains("a.b").unwrap());
    assert!(!fs.exists(Path::new(FILE)));
}

#[test]
fn test_add_creates_file_lazily() {
    let fs = MockFileSystemProvider::new();
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    assert!(store.add("a.b").unwrap());
    assert!(!store.add("a.b").unwrap());

    let record = read_record(&fs);
    assert_eq!(record.ignored_extensions, vec!["a.b"]);
    assert!(chrono::DateTime::parse_from_rfc3339(&record.last_updated).is_ok());
}

#[test]
fn test_remove_absent_skips_write() {
    let fs = MockFileSystemProvider::new();
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    assert!(!store.remove("a.b").unwrap());
    assert!(!fs.exists(Path::new(FILE)));

    store.add("a.b").unwrap();
    assert!(store.remove("a.b").unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_toggle_twice_flips_back() {
    let fs = MockFileSystemProvider::new();
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    assert!(store.toggle("a.b").unwrap());
    assert_eq!(store.list().unwrap(), vec!["a.b"]);
    assert!(!store.toggle("a.b").unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_clear_writes_empty_set() {
    let fs = MockFileSystemProvider::new();
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    store.add("a.b").unwrap();
    store.add("c.d").unwrap();
    store.clear().unwrap();

    assert!(store.list().unwrap().is_empty());
    assert!(read_record(&fs).ignored_extensions.is_empty());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let fs = MockFileSystemProvider::new().with_file(FILE, "{ nope");
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    assert!(matches!(store.list(), Err(IgnoredError::Corrupt { .. })));
    assert!(matches!(store.add("a.b"), Err(IgnoredError::Corrupt { .. })));
}

#[test]
fn test_identifiers_alias_and_duplicate_collapse() {
    let fs = MockFileSystemProvider::new().with_file(
        FILE,
        r#"{ "identifiers": ["a.b", "c.d", "a.b"], "lastUpdated": "2024-01-01T00:00:00Z" }"#,
    );
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    assert_eq!(store.list().unwrap(), vec!["a.b", "c.d"]);

    store.add("e.f").unwrap();
    let record = read_record(&fs);
    assert_eq!(record.ignored_extensions, vec!["a.b", "c.d", "e.f"]);
    assert_ne!(record.last_updated, "2024-01-01T00:00:00Z");

    let raw = fs.file_content(FILE).unwrap();
    assert!(raw.contains("\"ignoredExtensions\""));
    assert!(!raw.contains("\"identifiers\""));
}

#[test]
fn test_write_failures_surface_as_io() {
    let fs = MockFileSystemProvider::new()
        .with_dir(DATA)
        .with_read_only(FILE);
    let store = IgnoredStore::new(&fs, Path::new(DATA));

    assert!(matches!(store.add("a.b"), Err(IgnoredError::Io { .. })));
}
