//! Result type for the binary-facing layer of changelog-lint.
//!
//! The command layer reports through `color-eyre`, which adds colored
//! output and error context on top of the library's [`LintError`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//! use crate::result::Result;
//!
//! fn load(path: &Path) -> Result<String> {
//!     let content = std::fs::read_to_string(path)
//!         .wrap_err("Failed to read changelog")?;
//!     Ok(content)
//! }
//! ```
//!
//! [`LintError`]: crate::error::LintError

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used by the command layer.
///
/// Library errors convert into it through `?`, and `.wrap_err()` adds
/// context as they propagate to `main`.
pub type Result<T> = EyreResult<T>;
