//! Subprocess wrapper around the repository in the target directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::config::{InstallerConfig, REMOTE_NAME};
use crate::error::{Error, GitStep, Result};

const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

/// Build a `git` command that ignores repository-location overrides
/// inherited from the environment.
pub fn git_command() -> Command {
    let mut cmd = Command::new("git");
    for key in GIT_ENV_OVERRIDES {
        cmd.env_remove(key);
    }
    cmd
}

/// Repository rooted at the target directory.
#[derive(Debug, Clone)]
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Initialize an empty repository.
    pub fn init(&self) -> Result<()> {
        self.run(GitStep::Init, &["init"])
    }

    /// Register a remote.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.run(GitStep::RemoteAdd, &["remote", "add", name, url])
    }

    /// Fetch `branch` from `remote` and merge it into the current branch.
    pub fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(GitStep::Pull, &["pull", remote, branch])
    }

    fn run(&self, step: GitStep, args: &[&str]) -> Result<()> {
        tracing::debug!(dir = %self.dir.display(), ?args, "running git");
        let output = git_command()
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|source| Error::GitSpawn { step, source })?;

        if !output.status.success() {
            return Err(Error::Git {
                step,
                status: output.status.to_string(),
                output: combined_output(&output),
            });
        }
        Ok(())
    }
}

/// Initialize the target repository, register the upstream as `origin`
/// and pull the configured branch. Stops at the first failing step.
pub fn setup_repository(config: &InstallerConfig) -> Result<()> {
    let repo = GitRepo::new(config.target_dir());
    repo.init()?;
    repo.add_remote(REMOTE_NAME, config.remote_url())?;
    repo.pull(REMOTE_NAME, config.branch())?;
    Ok(())
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !text.is_empty() && !stderr.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&stderr);
    text
}
