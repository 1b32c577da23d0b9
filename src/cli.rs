//! CLI argument parsing.
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Output format for the lint results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `PATH:LINE: MESSAGE` line per problem.
    #[default]
    Human,
    /// Parsed releases and problems as JSON.
    Json,
}

/// Lint a markdown changelog and report every problem in one pass.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the changelog to lint.
    pub changelog: PathBuf,

    #[arg(long)]
    /// Repository root used to discover module, precompile and outpost
    /// categories. Defaults to the changelog's directory.
    pub repo_root: Option<PathBuf>,

    #[arg(long)]
    /// Configuration file. Defaults to `.changelog-lint.toml` in the
    /// repository root when present.
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    /// Output format.
    pub format: OutputFormat,

    #[arg(long)]
    /// Write the corrected changelog to this file ("-" for stdout).
    pub fixed_output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    pub fn repo_root(&self) -> PathBuf {
        if let Some(root) = &self.repo_root {
            return root.clone();
        }

        match self.changelog.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
