//! Install command implementation.
//!
//! Scans the target directory and either performs a first-time install
//! (repository setup followed by restructuring) or pulls the latest changes
//! into an existing install. Every run finishes in a single pass.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::config::{InstallerConfig, REMOTE_NAME};
use crate::error::Result;
use crate::git::{GitRepo, setup_repository};
use crate::restructure::{RestructureReport, restructure};
use crate::scan::{Mode, scan_target};

/// Phase announced to the observer before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scanning,
    Updating,
    SettingUp,
    Restructuring,
}

impl Phase {
    /// Progress line shown to the user.
    pub fn description(self) -> &'static str {
        match self {
            Phase::Scanning => "Scanning src folder...",
            Phase::Updating => "Pulling changes...",
            Phase::SettingUp => "Setting up repository...",
            Phase::Restructuring => "Restructuring directory...",
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub mode: Mode,
    #[serde(serialize_with = "serialize_lossy_path")]
    pub target_dir: PathBuf,
    /// Packaging files removed (install only)
    pub removed_packaging: Vec<String>,
    /// Payload entries promoted to the target root (install only)
    pub promoted_entries: Vec<String>,
}

impl InstallReport {
    fn new(mode: Mode, config: &InstallerConfig, restructured: RestructureReport) -> Self {
        Self {
            mode,
            target_dir: config.target_dir().to_path_buf(),
            removed_packaging: restructured.removed_packaging,
            promoted_entries: restructured.promoted_entries,
        }
    }
}

/// Paths that are not valid UTF-8 serialize lossily instead of failing.
fn serialize_lossy_path<S: Serializer>(
    path: &Path,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&path.display())
}

/// Install or update the target directory described by a config.
#[derive(Debug, Clone)]
pub struct InstallCommand {
    config: InstallerConfig,
}

impl InstallCommand {
    pub fn new(config: InstallerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// Run without progress reporting.
    pub fn execute(&self) -> Result<InstallReport> {
        self.execute_with(|_| {})
    }

    /// Run, calling `observer` as each phase begins.
    pub fn execute_with(&self, mut observer: impl FnMut(Phase)) -> Result<InstallReport> {
        observer(Phase::Scanning);
        let mode = scan_target(&self.config)?;
        tracing::info!(mode = mode.as_str(), target = %self.config.target_dir().display(), "target scanned");

        match mode {
            Mode::Update => {
                observer(Phase::Updating);
                self.update()?;
                Ok(InstallReport::new(mode, &self.config, RestructureReport::default()))
            }
            Mode::Install => {
                observer(Phase::SettingUp);
                setup_repository(&self.config)?;
                observer(Phase::Restructuring);
                let restructured = restructure(&self.config)?;
                Ok(InstallReport::new(mode, &self.config, restructured))
            }
        }
    }

    /// Finish the restructure phase of an install whose repository is
    /// already set up. Does not touch git.
    pub fn resume(&self) -> Result<InstallReport> {
        self.resume_with(|_| {})
    }

    /// Like [`resume`](Self::resume), calling `observer` as the phase begins.
    pub fn resume_with(&self, mut observer: impl FnMut(Phase)) -> Result<InstallReport> {
        observer(Phase::Restructuring);
        let restructured = restructure(&self.config)?;
        Ok(InstallReport::new(Mode::Install, &self.config, restructured))
    }

    fn update(&self) -> Result<()> {
        GitRepo::new(self.config.target_dir()).pull(REMOTE_NAME, self.config.branch())
    }
}
