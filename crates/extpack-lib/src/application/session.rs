//! Session-scoped dependency injection
//!
//! A `Session` owns every provider a command needs for one execution.
//! Handlers only see `&dyn Session`, so tests swap in the mocks from
//! `session_mocks` without touching the disk, the terminal, or `PATH`.

use crate::application::config::AppConfig;
use crate::display::{DisplayProvider, LiveDisplayProvider};
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem operations used by the stores and scanners
pub trait FileSystemProvider: Send + Sync {
    fn current_dir(&self) -> io::Result<PathBuf>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write a whole file, replacing any previous content
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_directory(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Immediate children of `path`, sorted
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Captured result of a finished subprocess
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Process execution
pub trait ProcessProvider {
    /// Run `command args...` in `working_dir` and wait for it to exit
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path)
    -> io::Result<ProcessOutput>;

    /// Resolve a program name against `PATH`
    fn find_program(&self, program: &str) -> Option<PathBuf>;
}

pub trait ConfigProvider {
    fn app_config(&self) -> &AppConfig;
}

/// User prompts; non-interactive implementations answer with defaults
pub trait InteractiveProvider {
    fn text_input(&self, prompt: &str, default: String) -> Result<String>;

    /// Pick one option by fuzzy search. `None` when cancelled or when no
    /// prompt can be shown.
    fn fuzzy_select(&self, prompt: &str, options: &[String]) -> Result<Option<usize>>;
}

pub trait Session {
    fn display(&self) -> &dyn DisplayProvider;
    fn filesystem(&self) -> &dyn FileSystemProvider;
    fn process(&self) -> &dyn ProcessProvider;
    fn config(&self) -> &dyn ConfigProvider;
    fn interactive(&self) -> &dyn InteractiveProvider;
}

/// Live implementation of FileSystemProvider over `std::fs`
#[derive(Debug, Default)]
pub struct LiveFileSystemProvider;

impl FileSystemProvider for LiveFileSystemProvider {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }
}

/// Live implementation of ProcessProvider over `std::process::Command`
#[derive(Debug, Default)]
pub struct LiveProcessProvider {
    /// PATH override for hermetic testing
    custom_path: Option<String>,
}

impl LiveProcessProvider {
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    pub fn with_custom_path(path: String) -> Self {
        Self {
            custom_path: Some(path),
        }
    }

    fn path_env(&self) -> Option<std::ffi::OsString> {
        match &self.custom_path {
            Some(path) => Some(path.into()),
            None => std::env::var_os("PATH"),
        }
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn execute(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
    ) -> io::Result<ProcessOutput> {
        // Resolve against the custom PATH ourselves; Command::new uses the parent's PATH
        let program = self
            .find_program(command)
            .unwrap_or_else(|| PathBuf::from(command));

        let mut cmd = std::process::Command::new(program);
        cmd.args(args).current_dir(working_dir);
        if let Some(custom_path) = &self.custom_path {
            cmd.env("PATH", custom_path);
        }

        tracing::debug!(command, ?args, dir = %working_dir.display(), "spawning process");
        let output = cmd.output()?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }

    fn find_program(&self, program: &str) -> Option<PathBuf> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            return candidate.is_file().then(|| candidate.to_path_buf());
        }

        let path = self.path_env()?;
        std::env::split_paths(&path).find_map(|dir| {
            let full = dir.join(program);
            if full.is_file() {
                return Some(full);
            }
            #[cfg(windows)]
            for ext in ["cmd", "exe", "bat"] {
                let with_ext = full.with_extension(ext);
                if with_ext.is_file() {
                    return Some(with_ext);
                }
            }
            None
        })
    }
}

pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Live implementation of InteractiveProvider using dialoguer
pub struct LiveInteractiveProvider {
    yes_mode: bool,
}

impl LiveInteractiveProvider {
    pub fn new(yes_mode: bool) -> Self {
        Self { yes_mode }
    }

    /// Whether stdin and stdout are both attached to a terminal
    fn is_tty() -> bool {
        use std::io::IsTerminal;
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }

    fn can_prompt(&self) -> bool {
        !self.yes_mode && Self::is_tty()
    }
}

impl InteractiveProvider for LiveInteractiveProvider {
    fn text_input(&self, prompt: &str, default: String) -> Result<String> {
        if !self.can_prompt() {
            return Ok(default);
        }

        dialoguer::Input::new()
            .with_prompt(prompt)
            .default(default)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read text input")
    }

    fn fuzzy_select(&self, prompt: &str, options: &[String]) -> Result<Option<usize>> {
        if !self.can_prompt() || options.is_empty() {
            return Ok(None);
        }

        dialoguer::FuzzySelect::new()
            .with_prompt(prompt)
            .items(options)
            .max_length(10)
            .interact_opt()
            .context("Failed to read fuzzy selection")
    }
}

/// CommandSession owns all ephemeral state for a single command execution
pub struct CommandSession<F, P, C, I>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    I: InteractiveProvider,
{
    display_provider: LiveDisplayProvider,
    filesystem_provider: F,
    process_provider: P,
    config_provider: C,
    interactive_provider: I,
}

impl
    CommandSession<
        LiveFileSystemProvider,
        LiveProcessProvider,
        LiveConfigProvider,
        LiveInteractiveProvider,
    >
{
    /// Production composition; initializes the global display and logger
    pub fn new(app_config: AppConfig) -> Self {
        match crate::terminal::TerminalCapabilities::detect_from_config(&app_config) {
            Ok(terminal_caps) => {
                let _ = crate::display::Display::init(terminal_caps.clone());
                let logger_config = app_config.to_logger_config(&terminal_caps);
                if let Err(e) = crate::logger::Logger::init(logger_config) {
                    eprintln!("extpack: logging disabled: {}", e);
                }
            }
            Err(e) => eprintln!("extpack: terminal detection failed: {}", e),
        }

        let yes = app_config.yes;
        Self::new_with_providers(
            LiveFileSystemProvider,
            LiveProcessProvider::new(),
            LiveConfigProvider::new(app_config),
            LiveInteractiveProvider::new(yes),
        )
    }
}

impl<F, P, C, I> CommandSession<F, P, C, I>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    I: InteractiveProvider,
{
    /// Compose a session from explicit providers (end-to-end tests use this
    /// with a PATH-restricted `LiveProcessProvider`)
    pub fn new_with_providers(
        filesystem_provider: F,
        process_provider: P,
        config_provider: C,
        interactive_provider: I,
    ) -> Self {
        Self {
            display_provider: LiveDisplayProvider::new(),
            filesystem_provider,
            process_provider,
            config_provider,
            interactive_provider,
        }
    }
}

impl<F, P, C, I> Session for CommandSession<F, P, C, I>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    I: InteractiveProvider,
{
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
    include!("session.test.rs");
}
