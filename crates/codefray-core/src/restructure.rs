//! Flattening of a freshly fetched tree.
//!
//! After the first pull the target holds the upstream layout: a `src`
//! payload directory plus packaging files. Restructuring drops the packaging
//! files and promotes the payload to the target root.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::config::{InstallerConfig, PACKAGING_FILES, PAYLOAD_DIR};
use crate::error::{Error, Result};
use crate::fs::copy_dir_contents;

/// What a restructure pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestructureReport {
    /// Packaging files removed from the target root.
    pub removed_packaging: Vec<String>,
    /// Top-level payload entries now present at the target root.
    pub promoted_entries: Vec<String>,
}

/// Remove `LICENSE` and `README.md` from the target root.
///
/// Failures are logged and ignored. Returns the names that were removed.
pub fn remove_packaging_files(target: &Path) -> Vec<String> {
    let mut removed = Vec::new();
    for name in PACKAGING_FILES {
        let path = target.join(name);
        match fs::remove_file(&path) {
            Ok(()) => removed.push(name.to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not remove packaging file");
            }
        }
    }
    removed
}

/// Copy the contents of `<target>/src` into `target`, then delete `src`.
///
/// A target without `src` has already been promoted and is left untouched,
/// so repeating the call after an interrupted run converges.
pub fn promote_payload(target: &Path) -> Result<Vec<String>> {
    let payload = target.join(PAYLOAD_DIR);
    if !payload.is_dir() {
        tracing::info!(target = %target.display(), "no payload directory, nothing to promote");
        return Ok(Vec::new());
    }

    let mut promoted = top_level_names(&payload)?;
    promoted.sort();

    copy_dir_contents(&payload, target)?;

    fs::remove_dir_all(&payload).map_err(|source| Error::RemovePayload {
        path: payload.clone(),
        source,
    })?;

    tracing::info!(count = promoted.len(), "payload promoted to target root");
    Ok(promoted)
}

/// Remove packaging files and promote the payload.
pub fn restructure(config: &InstallerConfig) -> Result<RestructureReport> {
    let target = config.target_dir();
    let removed_packaging = remove_packaging_files(target);
    let promoted_entries = promote_payload(target)?;
    Ok(RestructureReport {
        removed_packaging,
        promoted_entries,
    })
}

fn top_level_names(dir: &Path) -> Result<Vec<String>> {
    let list_err = |source| Error::ListPayload {
        path: dir.to_path_buf(),
        source,
    };
    fs::read_dir(dir)
        .map_err(list_err)?
        .map(|entry| {
            entry
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .map_err(list_err)
        })
        .collect()
}
