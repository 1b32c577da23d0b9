//! Custom error types for changelog-lint.
//!
//! These cover the fatal failures only. Validation findings are collected as
//! [`Problem`](crate::changelog::Problem) values and never surface here.

use thiserror::Error;

use crate::config::LinterConfigBuilderError;

/// Main error type for changelog-lint operations.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Changelog not found: {0}")]
    ChangelogNotFound(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid vocabulary pattern: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Release \"{0}\" has no version to compare against")]
    Unversioned(String),

    // Output errors
    #[error(
        "Refusing to write the corrected changelog over its input: {0}"
    )]
    InPlaceRewrite(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias using LintError
pub type Result<T> = std::result::Result<T, LintError>;

impl LintError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a changelog not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::ChangelogNotFound(path.into())
    }
}

impl From<LinterConfigBuilderError> for LintError {
    fn from(err: LinterConfigBuilderError) -> Self {
        Self::InvalidConfig(format!("Builder error: {}", err))
    }
}
