//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur while converting a document
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Root is not a node-shaped value (not an object, or no type tag)
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// A subtree could not be deserialized into nodes
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error while producing the target representation
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Option or operation not supported by a format
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
