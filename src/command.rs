//! Command execution for changelog-lint.

/// Lint a changelog, report its problems and optionally write the corrected
/// document.
pub mod lint;
