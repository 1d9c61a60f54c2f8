//! Taskbind Core - shared foundations for Taskbind
//!
//! This crate provides the error types and the configuration system used by
//! the resource binding engine and the CLI.

pub mod config;
pub mod error;

pub use config::{ApplyConfig, Config, WorkspaceConfig};
pub use error::{ConfigError, DocumentError, Result, TaskbindError};
