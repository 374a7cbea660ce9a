//! Mock implementations of session providers for testing
//!
//! These mocks let command handlers and domain stores run without touching
//! the real filesystem, spawning processes, or prompting.

use crate::application::config::AppConfig;
use crate::application::session::*;
use crate::display::{DisplayProvider, MockDisplayProvider};
use anyhow::Result;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("No such file or directory: {}", path.display()),
    )
}

/// In-memory filesystem: files map to bytes, directories are tracked explicitly
#[derive(Clone)]
pub struct MockFileSystemProvider {
    pub current_dir: PathBuf,
    pub files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    pub directories: Arc<Mutex<HashSet<PathBuf>>>,
    /// Writes to these paths fail with PermissionDenied
    pub read_only: Arc<Mutex<HashSet<PathBuf>>>,
}

impl Default for MockFileSystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystemProvider {
    pub fn new() -> Self {
        let provider = Self {
            current_dir: PathBuf::from("/test/workdir"),
            files: Arc::new(Mutex::new(HashMap::new())),
            directories: Arc::new(Mutex::new(HashSet::new())),
            read_only: Arc::new(Mutex::new(HashSet::new())),
        };
        provider.insert_dir(Path::new("/test/workdir"));
        provider
    }

    fn insert_dir(&self, path: &Path) {
        let mut directories = self.directories.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            directories.insert(ancestor.to_path_buf());
        }
    }

    pub fn with_dir(self, dir: impl AsRef<Path>) -> Self {
        self.insert_dir(dir.as_ref());
        self
    }

    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.with_bytes(path, content.into().into_bytes())
    }

    pub fn with_bytes(self, path: impl AsRef<Path>, content: Vec<u8>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.insert_dir(parent);
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content);
        self
    }

    pub fn with_read_only(self, path: impl AsRef<Path>) -> Self {
        self.read_only
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Current content of a file, for assertions
    pub fn file_content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl FileSystemProvider for MockFileSystemProvider {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.read_only.lock().unwrap().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only: {}", path.display()),
            ));
        }
        let parent_exists = path
            .parent()
            .is_none_or(|parent| self.directories.lock().unwrap().contains(parent));
        if !parent_exists {
            return Err(not_found(path));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_directory(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.directories.lock().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.insert_dir(path);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_directory(path) {
            return Err(not_found(path));
        }

        let mut children = BTreeSet::new();
        for file in self.files.lock().unwrap().keys() {
            if file.parent() == Some(path) {
                children.insert(file.clone());
            }
        }
        for dir in self.directories.lock().unwrap().iter() {
            if dir.parent() == Some(path) {
                children.insert(dir.clone());
            }
        }
        Ok(children.into_iter().collect())
    }
}

/// Recorded subprocess invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

type ScriptedResult = std::result::Result<ProcessOutput, String>;

/// Scripted process results keyed by (command, args); unknown calls succeed silently
#[derive(Default)]
pub struct MockProcessProvider {
    results: HashMap<(String, Vec<String>), ScriptedResult>,
    programs: HashMap<String, PathBuf>,
    calls: Mutex<Vec<ProcessCall>>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, command: &str, args: &[&str], result: ScriptedResult) -> Self {
        self.results.insert(
            (
                command.to_string(),
                args.iter().map(|s| s.to_string()).collect(),
            ),
            result,
        );
        self
    }

    /// Make `program` resolvable through `find_program`
    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.insert(
            program.to_string(),
            PathBuf::from("/mock/bin").join(program),
        );
        self
    }

    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn verify_call(&self, command: &str, args: &[&str], working_dir: &Path) -> bool {
        let expected = ProcessCall {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
        };
        self.calls.lock().unwrap().contains(&expected)
    }
}

impl ProcessProvider for MockProcessProvider {
    fn execute(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
    ) -> io::Result<ProcessOutput> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.calls.lock().unwrap().push(ProcessCall {
            command: command.to_string(),
            args: args.clone(),
            working_dir: working_dir.to_path_buf(),
        });

        match self.results.get(&(command.to_string(), args)) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(io::Error::other(message.clone())),
            None => Ok(ProcessOutput {
                stdout: String::new(),
                stderr: String::new(),
                success: true,
            }),
        }
    }

    fn find_program(&self, program: &str) -> Option<PathBuf> {
        self.programs.get(program).cloned()
    }
}

pub struct MockConfigProvider {
    pub app_config: AppConfig,
}

impl MockConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Canned answers for prompts; records every prompt shown
#[derive(Default)]
pub struct MockInteractiveProvider {
    text_input_response: Option<String>,
    fuzzy_select_response: Option<usize>,
    pub text_input_calls: Mutex<Vec<(String, String)>>,
    pub fuzzy_select_calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockInteractiveProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_input(mut self, response: &str) -> Self {
        self.text_input_response = Some(response.to_string());
        self
    }

    pub fn with_fuzzy_select(mut self, response: usize) -> Self {
        self.fuzzy_select_response = Some(response);
        self
    }

    pub fn get_text_input_calls(&self) -> Vec<(String, String)> {
        self.text_input_calls.lock().unwrap().clone()
    }

    pub fn get_fuzzy_select_calls(&self) -> Vec<(String, Vec<String>)> {
        self.fuzzy_select_calls.lock().unwrap().clone()
    }
}

impl InteractiveProvider for MockInteractiveProvider {
    fn text_input(&self, prompt: &str, default: String) -> Result<String> {
        self.text_input_calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), default.clone()));
        Ok(self.text_input_response.clone().unwrap_or(default))
    }

    fn fuzzy_select(&self, prompt: &str, options: &[String]) -> Result<Option<usize>> {
        self.fuzzy_select_calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.to_vec()));
        Ok(self.fuzzy_select_response)
    }
}

/// Config rooted under `/test` with every derived path resolved
pub fn mock_app_config() -> AppConfig {
    AppConfig {
        workdir: Some(PathBuf::from("/test/workdir")),
        packs_dir: Some(PathBuf::from("/test/workdir/packs")),
        data_dir: Some(PathBuf::from("/test/data")),
        editor_home: Some(PathBuf::from("/test/home")),
        ..AppConfig::default()
    }
}

/// Mock command session for testing
pub struct MockCommandSession {
    pub display_provider: MockDisplayProvider,
    pub filesystem_provider: MockFileSystemProvider,
    pub process_provider: MockProcessProvider,
    pub config_provider: MockConfigProvider,
    pub interactive_provider: MockInteractiveProvider,
}

impl Default for MockCommandSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCommandSession {
    pub fn new() -> Self {
        Self {
            display_provider: MockDisplayProvider::new(),
            filesystem_provider: MockFileSystemProvider::new(),
            process_provider: MockProcessProvider::new(),
            config_provider: MockConfigProvider::new(mock_app_config()),
            interactive_provider: MockInteractiveProvider::new(),
        }
    }

    pub fn with_filesystem(mut self, filesystem: MockFileSystemProvider) -> Self {
        self.filesystem_provider = filesystem;
        self
    }

    pub fn with_process(mut self, process: MockProcessProvider) -> Self {
        self.process_provider = process;
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config_provider = MockConfigProvider::new(config);
        self
    }

    pub fn with_interactive(mut self, interactive: MockInteractiveProvider) -> Self {
        self.interactive_provider = interactive;
        self
    }
}

impl Session for MockCommandSession {
    fn display(&self) -> &dyn DisplayProvider {
        &self.display_provider
    }

    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }

    fn interactive(&self) -> &dyn InteractiveProvider {
        &self.interactive_provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem_tracks_parents() {
        let fs = MockFileSystemProvider::new().with_file("/a/b/c.json", "{}");
        assert!(fs.is_directory(Path::new("/a/b")));
        assert!(fs.is_directory(Path::new("/a")));
        assert_eq!(
            fs.list_dir(Path::new("/a")).unwrap(),
            vec![PathBuf::from("/a/b")]
        );
    }

    #[test]
    fn test_mock_filesystem_write_requires_parent() {
        let fs = MockFileSystemProvider::new();
        let err = fs.write_file(Path::new("/nope/x.json"), "{}").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        fs.create_dir_all(Path::new("/nope")).unwrap();
        fs.write_file(Path::new("/nope/x.json"), "{}").unwrap();
        assert_eq!(fs.file_content("/nope/x.json").as_deref(), Some("{}"));
    }

    #[test]
    fn test_mock_filesystem_read_only_paths() {
        let fs = MockFileSystemProvider::new()
            .with_dir("/d")
            .with_read_only("/d/locked.json");
        let err = fs.write_file(Path::new("/d/locked.json"), "{}").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_mock_process_provider() {
        let dir = PathBuf::from("/test/workdir");
        let provider = MockProcessProvider::new()
            .with_program("npx")
            .with_result("npx", &["fail"], Err("boom".to_string()));

        assert!(provider.execute("npx", &["ok"], &dir).unwrap().success);
        assert!(provider.execute("npx", &["fail"], &dir).is_err());
        assert!(provider.verify_call("npx", &["ok"], &dir));
        assert_eq!(provider.get_calls().len(), 2);
        assert_eq!(
            provider.find_program("npx"),
            Some(PathBuf::from("/mock/bin/npx"))
        );
        assert_eq!(provider.find_program("vsce"), None);
    }

    #[test]
    fn test_mock_interactive_records_prompts() {
        let interactive = MockInteractiveProvider::new().with_text_input("Web Dev");
        assert_eq!(
            interactive.text_input("Display name", "web".into()).unwrap(),
            "Web Dev"
        );
        assert_eq!(interactive.fuzzy_select("Pick", &[]).unwrap(), None);
        assert_eq!(interactive.get_text_input_calls().len(), 1);
        assert_eq!(interactive.get_fuzzy_select_calls().len(), 1);
    }
}
