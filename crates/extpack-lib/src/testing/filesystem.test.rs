use super::*;

#[test]
fn test_fixture_writes_nested_files() {
    let fixture = TempDirFixture::new().unwrap();
    let path = fixture.write_file("packs/web/package.json", "{}").unwrap();

    assert!(path.ends_with("packs/web/package.json"));
    assert!(fixture.file_exists("packs/web/package.json"));
    assert_eq!(fixture.read_file("packs/web/package.json").unwrap(), "{}");
}

#[test]
fn test_fixture_cleans_up_on_drop() {
    let root = {
        let fixture = TempDirFixture::new().unwrap();
        fixture.create_dir("x").unwrap();
        fixture.path().to_path_buf()
    };
    assert!(!root.exists());
}

#[cfg(unix)]
#[test]
fn test_write_executable_sets_mode() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = TempDirFixture::new().unwrap();
    let path = fixture.write_executable("bin/tool", "#!/bin/sh\n").unwrap();
    let mode = fs::metadata(path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}
