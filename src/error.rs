//! Error types for the Octopus consumption sync tool.
//!
//! This module defines typed errors for different components of the application,
//! providing better error categorization and enabling specific error handling strategies.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Octopus API communication and decoding errors
    #[error("API error")]
    Api(#[from] ApiError),

    /// Reading store errors
    #[error("store error")]
    Store(#[from] StoreError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Octopus API communication and decoding errors.
///
/// No variant here is retried anywhere in this crate: the only throttle is
/// the fixed inter-request spacing in the paginating reader, and failures
/// surface to the caller unchanged.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure (DNS, connection reset, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server responded with a non-2xx status
    #[error("server error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Response body did not have the expected page shape
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// A reading in the response failed validation
    #[error("invalid reading")]
    Validation(#[from] ValidationError),
}

/// Reading validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Consumption must be a non-negative number
    #[error("consumption must be non-negative, got {value}")]
    NegativeConsumption { value: f64 },

    /// A page element could not be decoded into a reading
    #[error("reading at index {index}: invalid field '{field}': {message}")]
    Element {
        index: usize,
        field: &'static str,
        message: String,
    },
}

/// Reading store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem-level failure
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted store file exists but cannot be decoded
    #[error("corrupt store file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Store contents could not be serialized
    #[error("failed to encode store: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

impl ApiError {
    /// Creates an upstream error from an HTTP status and response body.
    pub fn upstream(status: reqwest::StatusCode, body: String) -> Self {
        Self::Upstream {
            status: status.as_u16(),
            body,
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl std::fmt::Display) -> Self {
        Self::MalformedResponse(message.to_string())
    }
}

impl ValidationError {
    /// Creates a per-element validation error.
    pub fn element(index: usize, field: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Element {
            index,
            field,
            message: message.to_string(),
        }
    }
}

impl StoreError {
    /// Creates a corrupt store error for the given path.
    pub fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }
}
