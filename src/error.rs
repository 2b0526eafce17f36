//! Structured error types for the crate.
//!
//! Rendering itself never fails: a valid record always produces pages, asset
//! failures are absorbed, and pagination overflow is resolved by adding
//! pages. Errors only exist at the edges: parsing input, caller-side
//! validation, and the persistence collaborator.

use thiserror::Error;

/// The unified error type returned by the public API.
#[derive(Debug, Error)]
pub enum MinutaError {
    /// JSON input failed to parse as a document record.
    #[error("failed to parse document record: {0}")]
    Parse(#[from] serde_json::Error),

    /// A mandatory field was missing or empty (caller-side precondition,
    /// checked before the renderer is invoked).
    #[error("mandatory field missing or empty: {0}")]
    MissingField(&'static str),

    /// A persistence operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    /// Quote-to-contract conversion was asked to convert something that is
    /// not a quote.
    #[error("document {0} is not a quote")]
    NotAQuote(String),
}
