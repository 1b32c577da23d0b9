//! Built-in tables used when no configuration file overrides them.

/// Default configuration filename, looked up in the repository root.
pub const DEFAULT_CONFIG_FILE: &str = ".changelog-lint.toml";

pub const DEFAULT_PR_BASE_URL: &str = "https://github.com/evmos/evmos/pull";

pub const DEFAULT_RELEASE_BASE_URL: &str =
    "https://github.com/evmos/evmos/releases/tag";

/// Releases with a major version at or below this are not validated.
pub const DEFAULT_LEGACY_VERSION: u64 = 12;

pub const DEFAULT_MODULE_DIR: &str = "x";
pub const DEFAULT_PRECOMPILE_DIR: &str = "precompiles";
pub const DEFAULT_OUTPOST_DIR: &str = "precompiles/outposts";

/// Allowed change types: canonical label and case-insensitive pattern.
pub const DEFAULT_CHANGE_TYPES: &[(&str, &str)] = &[
    ("API Breaking", r"api[\s-]*breaking"),
    ("Bug Fixes", r"bug[\s-]*fixes"),
    ("Features", r"features"),
    ("Improvements", r"improvements"),
    ("State Machine Breaking", r"state[\s-]*machine[\s-]*breaking"),
];

/// Preferred spellings for terms that show up in entry descriptions.
pub const DEFAULT_SPELLINGS: &[(&str, &str)] = &[
    ("ABI", r"abi"),
    ("API", r"api"),
    ("CI", r"ci"),
    ("Cosmos-SDK", r"cosmos[\s-]*sdk"),
    ("CLI", r"cli"),
    ("EIP-712", r"eip[\s-]*712"),
    ("ERC-20", r"erc[\s-]*20"),
    ("EVM", r"evm"),
    ("IBC", r"ibc"),
    ("ICS", r"ics"),
    ("ICS-20", r"ics[\s-]*20"),
    ("outpost", r"outpost"),
    ("Osmosis", r"osmosis"),
    ("PR", r"pr"),
    ("precompile", r"precompile"),
    ("SDK", r"sdk"),
    ("Stride", r"stride"),
    ("WERC-20", r"werc[\s-]*20"),
];

/// Categories accepted regardless of the repository layout. Retired module
/// names stay here so historical entries keep validating.
pub const SEED_CATEGORIES: &[&str] = &[
    "all",
    "ante",
    "api",
    "app",
    "ci",
    "cli",
    "db",
    "deps",
    "docs",
    "docker",
    "make",
    "proto",
    "outposts",
    "release",
    "rpc",
    "swagger",
    "testnet",
    "tests",
    "types",
    "utils",
    "upgrade",
    // third party modules
    "distribution",
    "staking",
    "ics20",
    "bank",
    // retired modules
    "claims",
    "consensus",
    "recovery",
    "incentives",
];
