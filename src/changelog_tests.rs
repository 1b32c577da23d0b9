use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::{config::LinterConfig, test_helpers::create_test_linter_config};

use super::*;

const CHANGELOG_OK: &str = include_str!("changelog/testdata/changelog_ok.md");
const CHANGELOG_FAIL: &str =
    include_str!("changelog/testdata/changelog_fail.md");

const EXPECTED_FAIL_PROBLEMS: &[&str] = &[
    r#"PR link is not matching PR number 1948: "https://github.com/evmos/evmos/pull/1949""#,
    "There should be no backslash in front of the # in the PR link",
    r#""ABI" should be used instead of "ABi""#,
    r#""outpost" should be used instead of "Outpost""#,
    r#"PR description should end with a dot: "Fixed the problem `gas_used` is 0""#,
    r#""Invalid Category" is not a valid change type"#,
    r#"Change type "Bug Fixes" is duplicated in Unreleased"#,
    "PR #1801 is duplicated in the changelog",
    r#"Release "v15.0.0" is duplicated in the changelog"#,
    r#"Change type "API Breaking" is duplicated in v15.0.0"#,
    "PR #1862 is duplicated in the changelog",
    r#"Malformed entry: "- malformed entry in changelog""#,
];

fn lint(content: &str) -> Changelog {
    let config = create_test_linter_config();
    Linter::new(&config).lint(content)
}

fn lint_with(config: &LinterConfig, content: &str) -> Changelog {
    Linter::new(config).lint(content)
}

fn entry_line(category: &str, pr_number: u64, description: &str) -> String {
    format!(
        "- ({category}) [#{pr_number}](https://github.com/evmos/evmos/pull/{pr_number}) {description}"
    )
}

#[test]
fn test_pass() {
    let changelog = lint(CHANGELOG_OK);

    assert!(changelog.is_valid(), "{:?}", changelog.messages());

    let ids: Vec<String> = changelog.releases.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["Unreleased", "v15.0.0", "v2.0.0"]);

    let json = changelog.to_json();
    let unreleased = &json["releases"]["Unreleased"];

    let change_types: Vec<&String> =
        unreleased.as_object().unwrap().keys().collect();
    assert_eq!(
        change_types,
        vec![
            "State Machine Breaking",
            "API Breaking",
            "Improvements",
            "Bug Fixes"
        ]
    );
    assert_eq!(
        unreleased["State Machine Breaking"]["1949"]["description"],
        "Add `ClaimRewards` custom transaction."
    );
    assert_eq!(
        unreleased["Improvements"]["1912"]["description"],
        "Add Stride outpost interface and ABI."
    );
    assert_eq!(
        json["releases"]["v15.0.0"]["API Breaking"]["555"]["description"],
        "`v4.0.0` upgrade logic."
    );
    assert_eq!(json["releases"]["v2.0.0"], serde_json::json!({}));
    assert_eq!(json["problems"], serde_json::json!([]));
}

#[test]
fn test_pass_fixed_is_identical() {
    let changelog = lint(CHANGELOG_OK);
    assert_eq!(changelog.fixed(), CHANGELOG_OK);
}

#[test_log::test]
fn test_fail() {
    let changelog = lint(CHANGELOG_FAIL);

    assert!(!changelog.is_valid());
    assert_eq!(changelog.messages(), EXPECTED_FAIL_PROBLEMS);

    let lines: Vec<usize> = changelog.problems.iter().map(|p| p.line).collect();
    assert_eq!(lines, vec![7, 8, 12, 12, 16, 18, 22, 24, 32, 34, 36, 37]);
}

#[test]
fn test_fix_then_relint() {
    let changelog = lint(CHANGELOG_FAIL);
    let fixed = changelog.fixed();

    assert!(fixed.contains(
        "- (distribution-precompile) [#1948](https://github.com/evmos/evmos/pull/1948) Add ClaimRewards custom transaction."
    ));
    assert!(fixed.contains(
        "- (evm) [#1851](https://github.com/evmos/evmos/pull/1851) Enable EIP 3855 opcode during upgrade."
    ));
    assert!(fixed.contains("Add Stride outpost interface and ABI."));
    assert!(fixed.contains("- anything goes here"));

    let relinted = lint(&fixed);
    assert_eq!(relinted.messages(), &EXPECTED_FAIL_PROBLEMS[5..]);
    assert_eq!(relinted.fixed(), fixed);
}

#[test]
fn test_empty_file() {
    let changelog = lint("");

    assert!(changelog.is_valid());
    assert!(changelog.releases.is_empty());
    assert_eq!(changelog.fixed(), "");
}

#[test]
fn test_only_unreleased() {
    let changelog = lint("# Changelog\n\n## Unreleased\n");

    assert!(changelog.is_valid());
    assert_eq!(changelog.releases.len(), 1);
    assert_eq!(changelog.fixed(), "# Changelog\n\n## Unreleased\n");
}

#[test]
fn test_duplicate_pr_within_change_type() {
    let content = [
        "## Unreleased",
        "### Features",
        entry_line("distribution-precompile", 1949, "Add ClaimRewards.")
            .as_str(),
        entry_line("evm", 1949, "Something else.").as_str(),
    ]
    .join("\n");

    let changelog = lint(&content);

    assert_eq!(
        changelog.problems,
        vec![Problem::new(4, "PR #1949 is duplicated in the changelog")]
    );
    let features = &changelog.releases[0].change_types[0];
    assert_eq!(features.entries.len(), 1);
    assert_eq!(features.entries[0].category, "distribution-precompile");
}

#[test]
fn test_allowed_duplicates_are_accepted() {
    let config = LinterConfig {
        allowed_duplicates: [1949].into_iter().collect(),
        ..create_test_linter_config()
    };
    let content = [
        "## Unreleased",
        "### Features",
        entry_line("evm", 1949, "Add it.").as_str(),
        entry_line("evm", 1949, "Add it again.").as_str(),
    ]
    .join("\n");

    let changelog = lint_with(&config, &content);

    assert!(changelog.is_valid(), "{:?}", changelog.messages());
}

#[test]
fn test_same_pr_in_different_change_types_is_fine() {
    let content = [
        "## Unreleased",
        "### Features",
        entry_line("evm", 10, "Add it.").as_str(),
        "### Bug Fixes",
        entry_line("evm", 10, "Fix it.").as_str(),
    ]
    .join("\n");

    assert!(lint(&content).is_valid());
}

#[test]
fn test_entry_outside_of_sections() {
    let entry = entry_line("evm", 10, "Add it.");
    let content = [entry.as_str(), "## Unreleased", entry.as_str()].join("\n");

    let changelog = lint(&content);

    let expected = format!(
        r#"Entry found before any release and change type: "{entry}""#
    );
    assert_eq!(
        changelog.problems,
        vec![
            Problem::new(1, expected.clone()),
            Problem::new(3, expected)
        ]
    );
}

#[test]
fn test_change_type_before_release() {
    let changelog = lint("### Features\n");

    assert_eq!(
        changelog.messages(),
        vec![r####"Change type found before any release: "### Features""####]
    );
}

#[test]
fn test_malformed_release_resets_state() {
    let content = [
        "## Unreleased",
        "### Features",
        "## Release 3",
        entry_line("evm", 10, "Add it.").as_str(),
    ]
    .join("\n");

    let changelog = lint(&content);

    assert_eq!(changelog.problems.len(), 2);
    assert_eq!(
        changelog.problems[0].message,
        r###"Malformed release header: "## Release 3""###
    );
    assert!(
        changelog.problems[1]
            .message
            .starts_with("Entry found before any release")
    );
}

#[test]
fn test_legacy_cutoff_grandfathers_the_rest() {
    let content = [
        "## [v12.1.0](https://github.com/evmos/evmos/releases/tag/v12.1.0) - 2023-06-01",
        "### Whatever",
        "- not an entry",
        "## not a release",
    ]
    .join("\n");

    let changelog = lint(&content);

    assert!(changelog.is_valid(), "{:?}", changelog.messages());
    assert_eq!(changelog.releases.len(), 1);
    assert_eq!(changelog.fixed(), content);

    let config = LinterConfig {
        legacy_version: 11,
        ..create_test_linter_config()
    };
    let changelog = lint_with(&config, &content);
    assert_eq!(changelog.problems.len(), 3);
}

#[test]
fn test_legacy_release_header_is_still_checked() {
    let changelog =
        lint("## [v2.0.0](https://example.com/v2.0.0) - 2021-10-10\n- junk\n");

    assert_eq!(
        changelog.messages(),
        vec![
            r#"Release link should point to an official release: "https://example.com/v2.0.0""#
        ]
    );
}

#[test]
fn test_known_exceptions_bypass_entry_parser() {
    let exception = "- (evm) [#123](https://example.com) legacy entry";
    let config = LinterConfig {
        known_exceptions: vec!["- (evm) [#123]".into()],
        ..create_test_linter_config()
    };
    let content = ["## Unreleased", "### Features", exception].join("\n");

    let changelog = lint_with(&config, &content);

    assert!(changelog.is_valid(), "{:?}", changelog.messages());
    assert_eq!(changelog.fixed(), content);
    assert!(changelog.releases[0].change_types[0].entries.is_empty());
}

#[test]
fn test_state_display_names() {
    assert_eq!(LintState::Initial.to_string(), "INITIAL");
    assert_eq!(LintState::InRelease { release: 0 }.to_string(), "IN_RELEASE");
    assert_eq!(
        LintState::InChangeType {
            release: 0,
            change_type: 0
        }
        .to_string(),
        "IN_CHANGE_TYPE"
    );
    assert_eq!(LintState::Legacy.to_string(), "LEGACY");
}

#[test]
fn test_lint_file() {
    let config = create_test_linter_config();
    let linter = Linter::new(&config);
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("CHANGELOG.md");

    let result = linter.lint_file(&path);
    assert!(matches!(result, Err(LintError::ChangelogNotFound(_))));

    fs::write(&path, CHANGELOG_FAIL).unwrap();
    let changelog = linter.lint_file(&path).unwrap();
    assert_eq!(changelog.messages(), EXPECTED_FAIL_PROBLEMS);
}

proptest! {
    #[test]
    fn lint_is_deterministic(lines in prop::collection::vec(
        prop_oneof![
            Just("## Unreleased".to_string()),
            Just("### Bug Fixes".to_string()),
            Just("### bug fixes".to_string()),
            "## .{0,20}",
            "### .{0,20}",
            "- .{0,40}",
            ".{0,20}",
        ],
        0..30,
    )) {
        let content = lines.join("\n");
        let first = lint(&content);
        let second = lint(&content);

        prop_assert_eq!(&first.problems, &second.problems);
        prop_assert_eq!(first.fixed(), second.fixed());
    }

    #[test]
    fn duplicates_reported_once_per_repeat(
        pr_numbers in prop::collection::vec(1u64..20, 1..15)
    ) {
        let mut lines =
            vec!["## Unreleased".to_string(), "### Features".to_string()];
        lines.extend(
            pr_numbers.iter().map(|n| entry_line("evm", *n, "Add it.")),
        );

        let changelog = lint(&lines.join("\n"));

        let unique: std::collections::BTreeSet<u64> =
            pr_numbers.iter().copied().collect();
        let entries = &changelog.releases[0].change_types[0].entries;

        prop_assert_eq!(entries.len(), unique.len());
        prop_assert_eq!(
            changelog.problems.len(),
            pr_numbers.len() - unique.len()
        );
    }
}
