pub mod changelog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod report;
pub mod result;
pub mod vocabulary;

pub use changelog::{Changelog, Linter, Problem};
pub use cli::{Args, OutputFormat};
pub use config::{Config, LinterConfig};
pub use error::LintError;
pub use report::Report;

#[cfg(test)]
pub mod test_helpers;
