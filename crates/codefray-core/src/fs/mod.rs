//! Filesystem primitives used to promote the payload.

pub mod copy;

pub use copy::{copy_dir, copy_dir_contents, copy_file};
