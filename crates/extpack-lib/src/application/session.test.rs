use super::*;
use crate::testing::TempDirFixture;

#[test]
fn test_live_filesystem_round_trip() {
    let fixture = TempDirFixture::new().unwrap();
    let fs = LiveFileSystemProvider;
    let dir = fixture.path().join("a").join("b");

    fs.create_dir_all(&dir).unwrap();
    assert!(fs.is_directory(&dir));

    let file = dir.join("x.json");
    fs.write_file(&file, "{}").unwrap();
    assert!(fs.exists(&file));
    assert_eq!(fs.read_to_string(&file).unwrap(), "{}");
    assert_eq!(fs.read_bytes(&file).unwrap(), b"{}");
}

#[test]
fn test_live_list_dir_is_sorted() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("b.txt", "").unwrap();
    fixture.write_file("a.txt", "").unwrap();
    fixture.create_dir("c").unwrap();

    let names: Vec<String> = LiveFileSystemProvider
        .list_dir(fixture.path())
        .unwrap()
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
}

#[test]
fn test_live_list_dir_missing_is_error() {
    let fixture = TempDirFixture::new().unwrap();
    let err = LiveFileSystemProvider
        .list_dir(&fixture.path().join("nope"))
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[cfg(unix)]
#[test]
fn test_find_program_honors_custom_path() {
    let fixture = TempDirFixture::new().unwrap();
    let script = fixture.write_executable("fake-tool", "#!/bin/sh\necho hi\n").unwrap();

    let provider =
        LiveProcessProvider::with_custom_path(fixture.path().to_string_lossy().into_owned());
    assert_eq!(provider.find_program("fake-tool"), Some(script));
    assert_eq!(provider.find_program("definitely-not-installed-xyz"), None);
}

#[cfg(unix)]
#[test]
fn test_execute_captures_output_and_status() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_executable("noisy", "#!/bin/sh\necho out\necho err >&2\nexit 3\n")
        .unwrap();

    let provider =
        LiveProcessProvider::with_custom_path(fixture.path().to_string_lossy().into_owned());
    let output = provider.execute("noisy", &[], fixture.path()).unwrap();

    assert_eq!(output.stdout.trim(), "out");
    assert_eq!(output.stderr.trim(), "err");
    assert!(!output.success);
}

#[test]
fn test_non_interactive_provider_returns_defaults() {
    let provider = LiveInteractiveProvider::new(true);
    assert_eq!(
        provider.text_input("Name", "web".to_string()).unwrap(),
        "web"
    );
    assert_eq!(
        provider
            .fuzzy_select("Pick", &["a".to_string(), "b".to_string()])
            .unwrap(),
        None
    );
}
