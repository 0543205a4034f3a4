//! Target directory inspection.

use serde::Serialize;
use std::fs;

use crate::config::InstallerConfig;
use crate::error::{Error, Result};

/// What a run does with the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Clean target: set up the repository and promote the payload.
    Install,
    /// Unclean target: pull the latest changes only.
    Update,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Install => "install",
            Mode::Update => "update",
        }
    }
}

/// Decide between install and update by listing the target directory.
///
/// Any entry other than the running executable marks the directory unclean.
pub fn scan_target(config: &InstallerConfig) -> Result<Mode> {
    let dir = config.target_dir();
    let scan_err = |source| Error::Scan {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let name = entry.file_name();
        if config.executable_name() == Some(name.as_os_str()) {
            continue;
        }
        tracing::debug!(entry = %name.to_string_lossy(), "found existing entry in target directory");
        return Ok(Mode::Update);
    }

    Ok(Mode::Install)
}
