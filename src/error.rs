//! Error types for the card renderer
//!
//! This module defines custom error types for the card renderer,
//! providing clear error messages and proper error propagation.

use thiserror::Error;

/// Custom error type for card renderer operations
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Invalid card text: {0}")]
    InvalidCard(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type alias for renderer operations
pub type RendererResult<T> = Result<T, RendererError>;
