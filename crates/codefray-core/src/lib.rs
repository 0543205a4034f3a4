//! CodeFray Installer Core Library
//!
//! Installs the CodeFray API into a target directory by fetching the upstream
//! repository and promoting its `src` subtree to the directory root, or pulls
//! the latest changes when the directory already holds an install.

pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod git;
pub mod restructure;
pub mod scan;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::commands::{InstallCommand, InstallReport, Phase};
    pub use crate::config::InstallerConfig;
    pub use crate::error::{Error, GitStep, Result};
    pub use crate::restructure::RestructureReport;
    pub use crate::scan::Mode;
}
