//! Git operations for setting up and updating the target repository.
//!
//! Git itself is never linked in: every operation runs the `git` binary as a
//! blocking subprocess inside the target directory.

mod repo;

pub use repo::{GitRepo, git_command, setup_repository};
