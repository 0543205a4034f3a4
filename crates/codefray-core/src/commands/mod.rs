//! High-level commands for installer runs.
//!
//! Frontends build an [`InstallerConfig`](crate::config::InstallerConfig)
//! once and hand it to these commands.

pub mod install;

pub use install::{InstallCommand, InstallReport, Phase};
