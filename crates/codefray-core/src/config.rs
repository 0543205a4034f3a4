//! Installer configuration.
//!
//! Built once at startup and passed to every operation that needs the target
//! directory or the upstream location.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Upstream repository installed by default.
pub const DEFAULT_REMOTE_URL: &str = "https://github.com/lg198/CodeFrayAPI.git";

/// Branch pulled by default.
pub const DEFAULT_BRANCH: &str = "master";

/// Name of the remote registered in the target repository.
pub const REMOTE_NAME: &str = "origin";

/// Subdirectory of the upstream tree that holds the payload.
pub const PAYLOAD_DIR: &str = "src";

/// Packaging files removed from the target root after a fresh install.
pub const PACKAGING_FILES: [&str; 2] = ["LICENSE", "README.md"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    target_dir: PathBuf,
    executable_name: Option<OsString>,
    remote_url: String,
    branch: String,
}

impl InstallerConfig {
    /// Create a config for `target_dir` with the default upstream.
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            executable_name: None,
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Resolve the config for the running process.
    ///
    /// The target is `target_arg` made absolute, or the directory holding the
    /// running executable when no argument was given.
    pub fn resolve(target_arg: Option<&Path>) -> std::io::Result<Self> {
        let exe = std::path::absolute(std::env::current_exe()?)?;
        let target_dir = match target_arg {
            Some(arg) => std::path::absolute(arg)?,
            None => exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| std::io::Error::other("executable path has no parent"))?,
        };

        let mut config = Self::new(target_dir);
        config.executable_name = exe.file_name().map(OsStr::to_os_string);
        Ok(config)
    }

    /// Set the file name ignored when deciding whether the target is clean.
    pub fn with_executable_name(mut self, name: impl Into<OsString>) -> Self {
        self.executable_name = Some(name.into());
        self
    }

    /// Set the upstream repository URL.
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }

    /// Set the branch to pull.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn executable_name(&self) -> Option<&OsStr> {
        self.executable_name.as_deref()
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn payload_dir(&self) -> PathBuf {
        self.target_dir.join(PAYLOAD_DIR)
    }
}
