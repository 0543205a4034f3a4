//! Recursive copy that merges into existing destinations.
//!
//! Both traversals stop at the first entry that fails to copy. Entries copied
//! before the failure stay in place. A failure is logged where it occurs and
//! passed up unchanged through the enclosing directories.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Copy the bytes of `src` into `dst`, then give `dst` the permissions of `src`.
///
/// `dst` is created or truncated.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let copy_err = |source| copy_failed(src, dst, source);

    let mut reader = File::open(src).map_err(copy_err)?;
    let mut writer = File::create(dst).map_err(copy_err)?;
    io::copy(&mut reader, &mut writer).map_err(copy_err)?;

    let permissions = reader.metadata().map_err(copy_err)?.permissions();
    fs::set_permissions(dst, permissions).map_err(copy_err)?;
    Ok(())
}

/// Copy every entry of `src` into the existing directory `dst`.
///
/// Subdirectories are merged into same-named directories of `dst` and files
/// overwrite same-named files.
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    let list_err = |source| copy_failed(src, dst, source);

    for entry in fs::read_dir(src).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        // Symlinks are followed, matching what a plain read of the entry sees.
        if from.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            tracing::debug!(from = %from.display(), to = %to.display(), "copying file");
            copy_file(&from, &to)?;
        }
    }
    Ok(())
}

/// Copy the directory `src` to `dst`, creating `dst` and its parents first.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    let create_err = |source| copy_failed(src, dst, source);

    let meta = fs::metadata(src).map_err(create_err)?;
    create_dir_all_like(dst, &meta).map_err(create_err)?;
    copy_dir_contents(src, dst)
}

/// Build the error for a failure that starts at `src`, logging it once here.
fn copy_failed(src: &Path, dst: &Path, source: io::Error) -> Error {
    tracing::warn!(from = %src.display(), to = %dst.display(), error = %source, "copy aborted");
    Error::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    }
}

#[cfg(unix)]
fn create_dir_all_like(dst: &Path, src_meta: &fs::Metadata) -> io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new()
        .recursive(true)
        .mode(src_meta.permissions().mode())
        .create(dst)
}

#[cfg(not(unix))]
fn create_dir_all_like(dst: &Path, _src_meta: &fs::Metadata) -> io::Result<()> {
    fs::create_dir_all(dst)
}
