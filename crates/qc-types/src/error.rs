//! Error types for qc-checker

use thiserror::Error;

use crate::InspectionType;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Key-value store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error for '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Serialization error for '{key}': {message}")]
    Serialization { key: String, message: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Record kind mismatch: record is {found}, submission is {expected}")]
    KindMismatch {
        expected: InspectionType,
        found: InspectionType,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported photo format: {0}")]
    InvalidPhotoFormat(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("CSV export error: {0}")]
    Csv(String),

    #[error("Legacy import error: {0}")]
    LegacyImport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
