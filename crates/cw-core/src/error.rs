//! Core error type.
//!
//! Sub-crates define their own error enums; `CwError` covers configuration
//! validation and time-of-day parsing.

use thiserror::Error;

/// Errors raised while validating or parsing run configuration.
#[derive(Debug, Error)]
pub enum CwError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `cw-*` crates.
pub type CwResult<T> = Result<T, CwError>;
