//! Hermetic test environment for end-to-end tests
//!
//! Every environment owns a temporary directory laid out like a real
//! install: a home directory holding editor registries, a work directory
//! holding `packs/`, a data directory for the ignored list, and a private
//! `bin/` that replaces PATH for spawned processes.

use anyhow::{Context, Result};
use extpack_lib::application::config::AppConfig;
use extpack_lib::application::session::{
    CommandSession, LiveConfigProvider, LiveFileSystemProvider, LiveInteractiveProvider,
    LiveProcessProvider,
};
use extpack_lib::primitives::OutputFormat;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type LiveSession = CommandSession<
    LiveFileSystemProvider,
    LiveProcessProvider,
    LiveConfigProvider,
    LiveInteractiveProvider,
>;

/// Isolated filesystem layout for one test
pub struct TestEnvironment {
    /// Dropped last; removes everything below
    _temp_dir: TempDir,
    pub root_path: PathBuf,
    pub home_path: PathBuf,
    pub work_path: PathBuf,
    pub packs_path: PathBuf,
    pub data_path: PathBuf,
    pub bin_path: PathBuf,
}

/// How a mock executable behaves when invoked
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Exit 0 without output
    AlwaysSucceed,
    /// Print `error` to stderr and exit 1
    AlwaysFail { error: String },
    /// Print to the given streams and exit 0
    SucceedWithOutput { stdout: String, stderr: String },
    /// Write `<name>-<version>.vsix` from the `package.json` in the working
    /// directory, printing `warning` to stderr first when set
    PackageArchive { warning: Option<String> },
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let root_path = temp_dir.path().to_path_buf();
        let home_path = root_path.join("home");
        let work_path = root_path.join("work");
        let packs_path = work_path.join("packs");
        let data_path = root_path.join("data");
        let bin_path = root_path.join("bin");

        for dir in [&home_path, &packs_path, &data_path, &bin_path] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        Ok(Self {
            _temp_dir: temp_dir,
            root_path,
            home_path,
            work_path,
            packs_path,
            data_path,
            bin_path,
        })
    }

    /// Configuration pointing every root into this environment
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            workdir: Some(self.work_path.clone()),
            packs_dir: Some(self.packs_path.clone()),
            data_dir: Some(self.data_path.clone()),
            editor_home: Some(self.home_path.clone()),
            yes: true,
            ..AppConfig::default()
        }
    }

    /// Live session whose processes only see `bin/` on PATH
    pub fn session(&self) -> LiveSession {
        self.session_with(self.app_config())
    }

    pub fn json_session(&self) -> LiveSession {
        self.session_with(AppConfig {
            output: OutputFormat::Json,
            ..self.app_config()
        })
    }

    pub fn session_with(&self, config: AppConfig) -> LiveSession {
        CommandSession::new_with_providers(
            LiveFileSystemProvider,
            LiveProcessProvider::with_custom_path(self.bin_path.to_string_lossy().to_string()),
            LiveConfigProvider::new(config),
            LiveInteractiveProvider::new(true),
        )
    }

    /// Install a mock executable into `bin/`
    #[cfg(unix)]
    pub fn add_mock_executable(&self, name: &str, behavior: MockBehavior) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_path.join(name);
        let log_path = self.root_path.join(format!("{}.log", name));
        fs::write(&path, generate_mock_script(name, &behavior, &log_path))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    /// Calls recorded by a mock executable, one argument string per line
    pub fn get_mock_calls(&self, name: &str) -> Result<Vec<String>> {
        let log_path = self.root_path.join(format!("{}.log", name));
        if !log_path.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(log_path)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Write a pack folder with a hand-written manifest
    pub fn write_pack(&self, name: &str, manifest: &Value) -> Result<PathBuf> {
        let folder = self.packs_path.join(name);
        fs::create_dir_all(&folder)?;
        fs::write(
            folder.join("package.json"),
            serde_json::to_string_pretty(manifest)?,
        )?;
        Ok(folder)
    }

    pub fn read_manifest(&self, name: &str) -> Result<Value> {
        let path = self.packs_path.join(name).join("package.json");
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Install an extension under `~/.<scheme>/extensions` and list it in
    /// the registry using the default `<id>-<version>` folder
    pub fn install_extension(
        &self,
        scheme: &str,
        id: &str,
        version: &str,
        display_name: &str,
    ) -> Result<PathBuf> {
        let root = self.extensions_root(scheme);
        let folder = root.join(format!("{}-{}", id, version));
        fs::create_dir_all(&folder)?;
        fs::write(
            folder.join("package.json"),
            serde_json::to_string_pretty(&json!({
                "name": id.rsplit('.').next().unwrap_or(id),
                "displayName": display_name,
                "version": version,
            }))?,
        )?;

        let registry = root.join("extensions.json");
        let mut entries: Vec<Value> = if registry.exists() {
            serde_json::from_str(&fs::read_to_string(&registry)?)?
        } else {
            Vec::new()
        };
        entries.push(json!({
            "identifier": { "id": id },
            "version": version,
            "metadata": {
                "publisherDisplayName": id.split('.').next().unwrap_or(id),
                "installedTimestamp": 1_700_000_000_000_i64,
            },
        }));
        fs::write(&registry, serde_json::to_string(&entries)?)?;
        Ok(folder)
    }

    pub fn extensions_root(&self, scheme: &str) -> PathBuf {
        self.home_path.join(format!(".{}", scheme)).join("extensions")
    }
}

fn generate_mock_script(name: &str, behavior: &MockBehavior, log_path: &Path) -> String {
    let behavior_code = match behavior {
        MockBehavior::AlwaysSucceed => "exit 0".to_string(),
        MockBehavior::AlwaysFail { error } => format!("echo '{}' >&2\nexit 1", error),
        MockBehavior::SucceedWithOutput { stdout, stderr } => {
            let mut code = String::new();
            if !stdout.is_empty() {
                code.push_str(&format!("echo '{}'\n", stdout));
            }
            if !stderr.is_empty() {
                code.push_str(&format!("echo '{}' >&2\n", stderr));
            }
            code.push_str("exit 0");
            code
        }
        MockBehavior::PackageArchive { warning } => {
            let mut code = String::new();
            if let Some(warning) = warning {
                code.push_str(&format!("echo '{}' >&2\n", warning));
            }
            code.push_str(
                r#"name=$(sed -n 's/^  "name": *"\([^"]*\)".*/\1/p' package.json | head -n 1)
version=$(sed -n 's/^  "version": *"\([^"]*\)".*/\1/p' package.json | head -n 1)
printf 'PK' > "${name}-${version}.vsix"
echo "Packaged: ${name}-${version}.vsix"
exit 0"#,
            );
            code
        }
    };

    format!(
        r#"#!/bin/sh
# Mock executable: {name}
PATH="/usr/bin:/bin:$PATH"
echo "$*" >> "{log}"
{behavior_code}
"#,
        name = name,
        log = log_path.display(),
        behavior_code = behavior_code,
    )
}
