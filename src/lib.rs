//! Parse, order and look up Gentoo ebuild versions
//!
//! # Modules
//!
//! - [`version`]: version parsing and ordering (`VersionString`, `VersionSet`)
//! - [`portage`]: package lookup across the main tree and overlays
//! - [`commands`]: output of the command-line subcommands
//! - [`config`]: repository configuration
//! - [`logging`]: tracing subscriber setup

pub mod commands;
pub mod config;
pub mod logging;
pub mod portage;
pub mod version;
