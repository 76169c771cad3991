//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use stockroom_config::ConfigError;
use stockroom_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const INVALID: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(stockroom::not_found),
        help("Run: stockroom show {list_target} to see what is loaded")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_target: String,
    },

    #[error("Consolidated row {index} does not exist (view has {len} rows)")]
    #[diagnostic(
        code(stockroom::index_out_of_range),
        help("Run: stockroom show consolidated to list row indexes")
    )]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Could not read {path}: {reason}")]
    #[diagnostic(
        code(stockroom::invalid_input),
        help("The file must contain a JSON array of records")
    )]
    InvalidInput { path: String, reason: String },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(stockroom::validation))]
    Validation { field: String, reason: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(code(stockroom::config_exists), help("Pass --force to overwrite it"))]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(stockroom::config))]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    #[diagnostic(code(stockroom::storage))]
    Storage(String),

    #[error(transparent)]
    #[diagnostic(code(stockroom::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::IndexOutOfRange { .. } | Self::Validation { .. } | Self::InvalidInput { .. } => {
                exit_code::INVALID
            }
            Self::ConfigExists { .. } => exit_code::USAGE,
            Self::Config(ConfigError::Validation { .. }) => exit_code::INVALID,
            Self::Config(_) | Self::Storage(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            CoreError::Storage(e) => Self::Storage(e.to_string()),
        }
    }
}
