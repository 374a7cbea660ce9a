//! Temporary-directory fixtures with automatic cleanup

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Temporary directory fixture, removed on drop
pub struct TempDirFixture {
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    pub fn new() -> FixtureResult<Self> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a subdirectory (and its parents) inside the fixture
    pub fn create_dir(&self, subdir: &str) -> FixtureResult<PathBuf> {
        let dir_path = self.path().join(subdir);
        fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    /// Write a file relative to the fixture root, creating parents
    pub fn write_file(&self, file_path: &str, content: &str) -> FixtureResult<PathBuf> {
        let full_path = self.path().join(file_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    pub fn read_file(&self, file_path: &str) -> FixtureResult<String> {
        Ok(fs::read_to_string(self.path().join(file_path))?)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }

    /// Write a script and mark it executable (0o755)
    #[cfg(unix)]
    pub fn write_executable(&self, file_path: &str, script: &str) -> FixtureResult<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let full_path = self.write_file(file_path, script)?;
        let mut perms = fs::metadata(&full_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&full_path, perms)?;
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
