//! CLI errors and their process exit codes

use clox_config::ConfigError;
use clox_core::{CompileError, RuntimeError};
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes, following the BSD sysexits convention
pub mod exit_code {
    pub const USAGE: i32 = 64;
    pub const DATA_ERR: i32 = 65;
    pub const SOFTWARE: i32 = 70;
    pub const OS_ERR: i32 = 71;
    pub const IO_ERR: i32 = 74;
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("cannot write output: {0}")]
    Stdout(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("cannot install log subscriber: {0}")]
    Logging(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io { .. } | CliError::Stdin(_) | CliError::Stdout(_) => exit_code::IO_ERR,
            CliError::Config(ConfigError::Io { .. }) => exit_code::IO_ERR,
            CliError::Config(ConfigError::Parse(_)) => exit_code::DATA_ERR,
            CliError::Compile(_) => exit_code::DATA_ERR,
            CliError::Runtime(_) => exit_code::SOFTWARE,
            CliError::Logging(_) => exit_code::OS_ERR,
        }
    }

    /// Source line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            CliError::Compile(e) => e.line(),
            CliError::Runtime(e) => e.line,
            _ => None,
        }
    }
}
