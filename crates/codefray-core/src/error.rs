//! Error types for install and update runs.

use std::fmt;
use std::path::PathBuf;

/// Result alias used throughout the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// External git operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    Init,
    RemoteAdd,
    Pull,
}

impl GitStep {
    pub fn as_str(self) -> &'static str {
        match self {
            GitStep::Init => "git init",
            GitStep::RemoteAdd => "git remote",
            GitStep::Pull => "git pull",
        }
    }
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end an install or update run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target directory could not be opened or listed.
    #[error("unable to scan target directory {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A git subprocess could not be spawned.
    #[error("{step} could not be started: {source}")]
    GitSpawn {
        step: GitStep,
        #[source]
        source: std::io::Error,
    },

    /// A git subprocess exited unsuccessfully.
    #[error("{step} exited with {status}")]
    Git {
        step: GitStep,
        status: String,
        /// Combined stdout and stderr of the subprocess.
        output: String,
    },

    /// Copying an entry of the payload failed.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload directory could not be listed before promotion.
    #[error("failed to list payload directory {}: {source}", path.display())]
    ListPayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload directory could not be removed after promotion.
    #[error("failed to remove payload directory {}: {source}", path.display())]
    RemovePayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Soft failures happen before anything on disk was touched.
    pub fn is_soft(&self) -> bool {
        matches!(self, Error::Scan { .. })
    }

    /// Short name of the operation that failed, as shown to the user.
    pub fn operation(&self) -> &'static str {
        match self {
            Error::Scan { .. } => "Scanning target directory",
            Error::GitSpawn { step, .. } | Error::Git { step, .. } => step.as_str(),
            Error::ListPayload { .. } => "Listing src folder",
            Error::Copy { .. } => "Copying directory contents",
            Error::RemovePayload { .. } => "Removing src folder",
        }
    }

    /// Captured subprocess output, if the failure came from git.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Error::Git { output, .. } if !output.trim().is_empty() => Some(output.as_str()),
            _ => None,
        }
    }

    /// Recovery advice printed alongside the error.
    pub fn guidance(&self) -> &'static str {
        if self.is_soft() {
            "If you are trying to update the API, delete your src folder, re-create it, and start over. \
             If you are installing in a clean src folder, this should not affect your installation."
        } else {
            "Please delete the src folder and recreate it."
        }
    }
}
