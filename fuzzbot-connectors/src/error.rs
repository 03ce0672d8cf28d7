//! Connector errors

use std::io;
use std::path::PathBuf;

use fuzzbot_core::ControlError;
use thiserror::Error;

/// Errors from reading traces, loading configuration or writing records
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Trace line {line}: {source}")]
    Trace {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Trace contains no frames")]
    EmptyTrace,

    #[error("Config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Control(#[from] ControlError),
}

/// Result alias for connector operations
pub type ConnectorResult<T> = Result<T, ConnectorError>;
