//! Packaging invoker: runs the packaging CLI inside a pack folder
//!
//! The tool writes `<name>-<version>.vsix` next to the manifest. There is
//! no timeout; the command runs until it exits.

use super::manifest::ExtensionPack;
use crate::application::session::{FileSystemProvider, ProcessProvider, Session};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ARCHIVE_EXTENSION: &str = "vsix";

/// Errors from packaging operations
#[derive(Debug, Error)]
pub enum PackagerError {
    #[error("Command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("No .vsix file found in {} after build", folder.display())]
    ArchiveMissing { folder: PathBuf },

    #[error("Process execution failed: {source}")]
    ProcessFailed {
        #[from]
        source: std::io::Error,
    },

    #[error("Invalid path: {reason}")]
    InvalidPath { reason: String },

    #[error("No packaging command configured")]
    NotConfigured,
}

/// Successful build
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    pub output_path: PathBuf,
    /// Warning lines the tool printed on stderr
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Output on stderr after a clean exit only counts as failure when the tool
/// printed no `WARNING` at all; npm notices ride along with vsce warnings.
fn stderr_is_fatal(stderr: &str) -> bool {
    !stderr.trim().is_empty() && !stderr.contains("WARNING")
}

fn warning_lines(stderr: &str) -> Vec<String> {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| line.to_ascii_uppercase().contains("WARNING"))
        .map(str::to_string)
        .collect()
}

pub struct Packager<'a> {
    process: &'a dyn ProcessProvider,
    fs: &'a dyn FileSystemProvider,
    program: String,
    args: Vec<String>,
}

impl<'a> Packager<'a> {
    pub fn new(
        process: &'a dyn ProcessProvider,
        fs: &'a dyn FileSystemProvider,
        program: String,
        args: Vec<String>,
    ) -> Self {
        Self {
            process,
            fs,
            program,
            args,
        }
    }

    /// Packager running the session's configured command
    pub fn from_session(session: &'a dyn Session) -> Result<Self, PackagerError> {
        let (program, args) = session
            .config()
            .app_config()
            .packager_command()
            .ok_or(PackagerError::NotConfigured)?;
        Ok(Self::new(
            session.process(),
            session.filesystem(),
            program,
            args,
        ))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Where the packaging program resolves on `PATH`, if anywhere
    pub fn check_available(&self) -> Option<PathBuf> {
        self.process.find_program(&self.program)
    }

    /// Package `pack` and locate the produced archive
    pub fn build(&self, pack: &ExtensionPack) -> Result<BuildOutput, PackagerError> {
        let folder = &pack.folder_path;
        if !self.fs.is_directory(folder) {
            return Err(PackagerError::InvalidPath {
                reason: format!("pack folder {} does not exist", folder.display()),
            });
        }

        let command = self.command_line();
        tracing::info!(pack = %pack.name, command = %command, "building pack");

        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        let output = self.process.execute(&self.program, &args, folder)?;

        if !output.success {
            let stderr = if output.stderr.trim().is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            return Err(PackagerError::CommandFailed { command, stderr });
        }

        if stderr_is_fatal(&output.stderr) {
            return Err(PackagerError::CommandFailed {
                command,
                stderr: output.stderr,
            });
        }

        let output_path = self.find_archive(pack)?;
        tracing::info!(pack = %pack.name, path = %output_path.display(), "built pack");

        Ok(BuildOutput {
            output_path,
            warnings: warning_lines(&output.stderr),
        })
    }

    /// `<name>-<version>.vsix` when present, else the greatest `*.vsix`
    fn find_archive(&self, pack: &ExtensionPack) -> Result<PathBuf, PackagerError> {
        let folder = &pack.folder_path;
        let archives: Vec<PathBuf> = self
            .fs
            .list_dir(folder)?
            .into_iter()
            .filter(|path| is_archive(path) && !self.fs.is_directory(path))
            .collect();

        let expected = folder.join(format!(
            "{}-{}.{}",
            pack.name, pack.version, ARCHIVE_EXTENSION
        ));
        if archives.contains(&expected) {
            return Ok(expected);
        }

        archives
            .into_iter()
            .max()
            .ok_or_else(|| PackagerError::ArchiveMissing {
                folder: folder.clone(),
            })
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

#[cfg(test)]
mod tests {
    include!("packager.test.rs");
}
