//! Error types and handling for the recipe search core

use serde::Serialize;
use std::fmt;

use crate::recipes::LoadError;

/// Application error types
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AppError {
    InvalidInput(String),
    NotFound(String),
    DataError(String),
    ConfigError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DataError(msg) => write!(f, "Recipe data error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Get the error code for protocol responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::DataError(_) => "data_error",
            AppError::ConfigError(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code used by the command line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::NotFound(_) => 3,
            _ => 5,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => app,
            Err(other) => AppError::Internal(other.to_string()),
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Convert std::io::Error to AppError
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::DataError(err.to_string())
    }
}
