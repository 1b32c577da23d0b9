//! Common test helper functions shared across test modules.
use std::collections::BTreeSet;

use crate::{
    config::{
        LinterConfig, LinterConfigBuilder,
        defaults::{
            DEFAULT_CHANGE_TYPES, DEFAULT_LEGACY_VERSION, DEFAULT_PR_BASE_URL,
            DEFAULT_RELEASE_BASE_URL, DEFAULT_SPELLINGS, SEED_CATEGORIES,
        },
    },
    vocabulary::Vocabulary,
};

const TEST_MODULES: &[&str] =
    &["epochs", "erc20", "evm", "feemarket", "inflation", "vesting"];

const TEST_PRECOMPILES: &[&str] = &[
    "bank",
    "distribution",
    "erc20",
    "ics20",
    "p256",
    "staking",
    "vesting",
];

const TEST_OUTPOSTS: &[&str] = &["osmosis", "stride"];

/// Categories as they would be discovered in a typical checkout, without
/// touching the filesystem.
pub fn create_test_categories() -> BTreeSet<String> {
    SEED_CATEGORIES
        .iter()
        .chain(TEST_MODULES)
        .map(|c| c.to_string())
        .chain(TEST_PRECOMPILES.iter().map(|p| format!("{p}-precompile")))
        .chain(TEST_OUTPOSTS.iter().map(|o| format!("{o}-outpost")))
        .collect()
}

/// Creates a LinterConfig with the built-in defaults and test categories.
///
/// # Example
/// ```ignore
/// let config = create_test_linter_config();
/// ```
pub fn create_test_linter_config() -> LinterConfig {
    LinterConfigBuilder::default()
        .pr_base_url(DEFAULT_PR_BASE_URL)
        .release_base_url(DEFAULT_RELEASE_BASE_URL)
        .legacy_version(DEFAULT_LEGACY_VERSION)
        .allowed_categories(create_test_categories())
        .change_types(Vocabulary::from_pairs(DEFAULT_CHANGE_TYPES).unwrap())
        .spellings(Vocabulary::from_pairs(DEFAULT_SPELLINGS).unwrap())
        .build()
        .unwrap()
}
