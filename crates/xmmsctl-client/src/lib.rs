//! CLI, configuration, playlist export and equalizer commands
//!
//! This crate provides the `xmmsctl` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
