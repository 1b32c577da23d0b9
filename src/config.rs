//! Configuration loading and resolution for `.changelog-lint.toml` files.
//!
//! The raw [`Config`] mirrors the TOML file; every field falls back to the
//! built-in tables in [`defaults`]. [`LinterConfig`] is the resolved,
//! read-only form shared by every parser: compiled vocabularies and the
//! filesystem-derived category set.
use derive_builder::Builder;
use log::*;
use serde::Deserialize;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{LintError, Result},
    vocabulary::Vocabulary,
};

pub mod categories;
pub mod defaults;

use defaults::*;

/// Directories scanned for allowed entry categories, relative to the
/// repository root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CategorySources {
    /// Each subdirectory is a module category, e.g. `x/evm` -> `evm`.
    pub module_dir: String,
    /// Each subdirectory yields `<name>-precompile`.
    pub precompile_dir: String,
    /// Each subdirectory yields `<name>-outpost`.
    pub outpost_dir: String,
}

impl Default for CategorySources {
    fn default() -> Self {
        Self {
            module_dir: DEFAULT_MODULE_DIR.into(),
            precompile_dir: DEFAULT_PRECOMPILE_DIR.into(),
            outpost_dir: DEFAULT_OUTPOST_DIR.into(),
        }
    }
}

/// A canonical label and the case-insensitive pattern that recognizes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularyTerm {
    pub label: String,
    pub pattern: String,
}

fn terms_from(table: &[(&str, &str)]) -> Vec<VocabularyTerm> {
    table
        .iter()
        .map(|(label, pattern)| VocabularyTerm {
            label: label.to_string(),
            pattern: pattern.to_string(),
        })
        .collect()
}

/// Root configuration structure for `.changelog-lint.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct Config {
    /// Base URL every PR link must start with.
    pub pr_base_url: String,
    /// Base URL every release link must start with.
    pub release_base_url: String,
    /// Major version at or below which releases are grandfathered.
    pub legacy_version: u64,
    /// PR numbers allowed to appear more than once.
    pub allowed_duplicates: Vec<u64>,
    /// Entry line prefixes that bypass entry validation.
    pub known_exceptions: Vec<String>,
    /// Categories added to the built-in seed list.
    pub extra_categories: Vec<String>,
    pub category_sources: CategorySources,
    /// Allowed change types, in priority order.
    pub change_types: Vec<VocabularyTerm>,
    /// Preferred spellings for entry descriptions, in priority order.
    pub spellings: Vec<VocabularyTerm>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pr_base_url: DEFAULT_PR_BASE_URL.into(),
            release_base_url: DEFAULT_RELEASE_BASE_URL.into(),
            legacy_version: DEFAULT_LEGACY_VERSION,
            allowed_duplicates: vec![],
            known_exceptions: vec![],
            extra_categories: vec![],
            category_sources: CategorySources::default(),
            change_types: terms_from(DEFAULT_CHANGE_TYPES),
            spellings: terms_from(DEFAULT_SPELLINGS),
        }
    }
}

impl Config {
    /// Parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the explicit config file if given, otherwise the default file in
    /// the repository root if it exists, otherwise the built-in defaults.
    pub fn discover(repo_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(LintError::invalid_config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            info!("loading config from {}", path.display());
            return Self::load(path);
        }

        let default_path: PathBuf = repo_root.join(DEFAULT_CONFIG_FILE);

        if default_path.is_file() {
            info!("loading config from {}", default_path.display());
            return Self::load(&default_path);
        }

        debug!("no config file found, using built-in defaults");

        Ok(Self::default())
    }
}

/// Fully resolved linter configuration. Built once, then read-only.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct LinterConfig {
    /// PR link prefix, without trailing slash.
    pub pr_base_url: String,
    /// Release link prefix, without trailing slash.
    pub release_base_url: String,
    #[builder(default = "DEFAULT_LEGACY_VERSION")]
    pub legacy_version: u64,
    #[builder(default)]
    pub allowed_duplicates: BTreeSet<u64>,
    #[builder(default)]
    pub known_exceptions: Vec<String>,
    pub allowed_categories: BTreeSet<String>,
    pub change_types: Vocabulary,
    pub spellings: Vocabulary,
}

impl LinterConfig {
    /// Compile vocabularies and scan `repo_root` for categories.
    pub fn resolve(config: &Config, repo_root: &Path) -> Result<Self> {
        if config.change_types.is_empty() {
            return Err(LintError::invalid_config(
                "at least one change type must be configured",
            ));
        }

        let mut seeds: Vec<String> =
            SEED_CATEGORIES.iter().map(|c| c.to_string()).collect();
        seeds.extend(config.extra_categories.iter().cloned());

        let allowed_categories = categories::discover_categories(
            repo_root,
            &config.category_sources,
            &seeds,
        )?;

        let resolved = LinterConfigBuilder::default()
            .pr_base_url(config.pr_base_url.trim_end_matches('/'))
            .release_base_url(config.release_base_url.trim_end_matches('/'))
            .legacy_version(config.legacy_version)
            .allowed_duplicates(
                config
                    .allowed_duplicates
                    .iter()
                    .copied()
                    .collect::<BTreeSet<u64>>(),
            )
            .known_exceptions(config.known_exceptions.clone())
            .allowed_categories(allowed_categories)
            .change_types(compile(&config.change_types)?)
            .spellings(compile(&config.spellings)?)
            .build()?;

        Ok(resolved)
    }

    pub fn is_allowed_category(&self, category: &str) -> bool {
        self.allowed_categories.contains(category)
    }

    pub fn is_allowed_duplicate(&self, pr_number: u64) -> bool {
        self.allowed_duplicates.contains(&pr_number)
    }

    /// The known exception, if any, that the entry line starts with.
    pub fn known_exception(&self, line: &str) -> Option<&str> {
        self.known_exceptions
            .iter()
            .find(|exception| line.starts_with(exception.as_str()))
            .map(|exception| exception.as_str())
    }
}

fn compile(terms: &[VocabularyTerm]) -> Result<Vocabulary> {
    let pairs: Vec<(&str, &str)> = terms
        .iter()
        .map(|term| (term.label.as_str(), term.pattern.as_str()))
        .collect();

    Vocabulary::from_pairs(&pairs)
}
