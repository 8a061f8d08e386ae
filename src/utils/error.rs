//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the monitoring endpoint
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Procedure {procedure} failed with status {status}: {message}")]
    ProcedureFailed {
        procedure: String,
        status: i64,
        message: String,
    },
}

/// Errors that can occur while decoding statistics tables
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid statistics format: {0}")]
    InvalidFormat(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value in column {column} for procedure {procedure}: {reason}")]
    InvalidValue {
        column: String,
        procedure: String,
        reason: String,
    },
}

/// Errors raised by a statistics source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Renderer was not initialized")]
    NotInitialized,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading the TOML config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
