//! Error types for the Glossa library.
//!
//! All fallible Glossa operations return [`Result`], whose error type is the
//! [`GlossaError`] enum. No error in this crate is fatal to a request: a
//! failed translation leaves the affected clause unexpanded, and malformed
//! filter configuration is treated as "no filters supplied".

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Glossa operations.
#[derive(Error, Debug)]
pub enum GlossaError {
    /// Translation service errors: transport, deserialization, or a
    /// non-success response. One kind for every failure mode of the
    /// remote translator.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Analysis-related errors (tokenization, normalization, stemming).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query tree errors (construction, invalid shapes).
    #[error("Query error: {0}")]
    Query(String),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with GlossaError.
pub type Result<T> = std::result::Result<T, GlossaError>;

impl GlossaError {
    /// Create a new translation error.
    pub fn translation<S: Into<String>>(msg: S) -> Self {
        GlossaError::Translation(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        GlossaError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        GlossaError::Query(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        GlossaError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GlossaError::Other(msg.into())
    }
}
