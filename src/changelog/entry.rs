//! Changelog entries describing the change made in one pull request.
//!
//! The expected shape is `- (category) [#PR](link) Description.`. Parsing
//! never fails: every violated rule adds a message to `problems`, and
//! `fixed` holds the canonical re-emission with every automatic correction
//! applied.
use regex::Regex;
use std::sync::LazyLock;

use crate::{config::LinterConfig, vocabulary::capitalize_first};

static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^-(?P<ws1>\s*)\((?P<category>[a-zA-Z0-9\-]+)\)",
        r"(?P<ws2>\s*)\[(?P<backslash>\\?)#(?P<pr>\d+)\]",
        r"(?P<inner>\s*)\((?P<link>[^)]*)\)",
        r"(?P<ws3>\s*)(?P<desc>.*?\S)(?P<trailing>\s*)$",
    ))
    .unwrap()
});

/// The three gaps between the tokens of an entry line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitespaces {
    pub dash_category: String,
    pub category_link: String,
    pub link_description: String,
}

/// A single changelog entry.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub line: String,
    pub pr_number: u64,
    pub category: String,
    pub link: String,
    pub description: String,
    pub whitespaces: Whitespaces,
    pub problems: Vec<String>,
    pub fixed: String,
}

impl Entry {
    pub fn parse(line: &str, config: &LinterConfig) -> Self {
        let mut entry = Self {
            line: line.to_string(),
            fixed: line.to_string(),
            ..Default::default()
        };

        let Some(captures) = ENTRY_REGEX.captures(line) else {
            entry.problems.push(malformed(line));
            return entry;
        };

        let Ok(pr_number) = captures["pr"].parse::<u64>() else {
            entry.problems.push(malformed(line));
            return entry;
        };

        entry.pr_number = pr_number;
        entry.category = captures["category"].to_string();
        entry.link = captures["link"].to_string();
        entry.description = captures["desc"].to_string();
        entry.whitespaces = Whitespaces {
            dash_category: captures["ws1"].to_string(),
            category_link: captures["ws2"].to_string(),
            link_description: captures["ws3"].to_string(),
        };

        let mut problems = check_whitespace(&entry.whitespaces);

        let inner_whitespace = !captures["inner"].is_empty()
            || entry.link.chars().any(char::is_whitespace);
        if inner_whitespace {
            problems.push(
                "There should be no whitespace inside of the markdown link"
                    .to_string(),
            );
        }

        if !captures["trailing"].is_empty() {
            problems.push(
                "There should be no trailing whitespace after the description"
                    .to_string(),
            );
        }

        if !captures["backslash"].is_empty() {
            problems.push(
                "There should be no backslash in front of the # in the PR link"
                    .to_string(),
            );
        }

        if pr_number == 0 {
            problems.push(format!(
                r#"PR number should be a positive integer: "{line}""#
            ));
        } else if captures["pr"] != pr_number.to_string() {
            problems.push(format!(
                r##"PR number should not have leading zeros: "#{}""##,
                &captures["pr"]
            ));
        }

        let (fixed_category, category_problems) =
            check_category(&entry.category, config);
        problems.extend(category_problems);

        let (fixed_link, link_problems) =
            check_link(&entry.link, pr_number, &config.pr_base_url);
        problems.extend(link_problems);

        let (fixed_description, description_problems) =
            check_description(&entry.description, config);
        problems.extend(description_problems);

        entry.fixed = format!(
            "- ({fixed_category}) [#{pr_number}]({fixed_link}) {fixed_description}"
        );
        entry.problems = problems;

        entry
    }

    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

fn malformed(line: &str) -> String {
    format!(r#"Malformed entry: "{line}""#)
}

fn check_whitespace(whitespaces: &Whitespaces) -> Vec<String> {
    let mut problems = vec![];

    if whitespaces.dash_category != " " {
        problems.push(
            "There should be exactly one space between the leading dash and the category"
                .to_string(),
        );
    }

    if whitespaces.category_link != " " {
        problems.push(
            "There should be exactly one space between the category and PR link"
                .to_string(),
        );
    }

    if whitespaces.link_description != " " {
        problems.push(
            "There should be exactly one space between the PR link and the description"
                .to_string(),
        );
    }

    problems
}

fn check_category(
    category: &str,
    config: &LinterConfig,
) -> (String, Vec<String>) {
    let mut problems = vec![];
    let lowercase = category.to_lowercase();

    if category != lowercase {
        problems
            .push(format!(r#"Category should be lowercase: "({category})""#));
    }

    if !config.is_allowed_category(&lowercase) {
        problems.push(format!(r#"Invalid change category: "({category})""#));
    }

    (lowercase, problems)
}

fn check_link(
    link: &str,
    pr_number: u64,
    base_url: &str,
) -> (String, Vec<String>) {
    let mut problems = vec![];
    let canonical = format!("{base_url}/{pr_number}");
    let compact: String = link.split_whitespace().collect();
    let mut fixed = compact.clone();

    if !compact.starts_with(&format!("{base_url}/")) {
        problems.push(format!(
            r#"PR link should point to "{base_url}": "{link}""#
        ));
        fixed = canonical.clone();
    }

    let link_number = compact.rsplit('/').next().unwrap_or_default();
    if link_number != pr_number.to_string() {
        problems.push(format!(
            r#"PR link is not matching PR number {pr_number}: "{link}""#
        ));
        fixed = canonical;
    }

    (fixed, problems)
}

fn check_description(
    description: &str,
    config: &LinterConfig,
) -> (String, Vec<String>) {
    let mut problems = vec![];
    let mut fixed = description.to_string();

    // only a lowercase first letter can be fixed; code spans, links and
    // digits keep their form
    if description.chars().next().is_some_and(char::is_lowercase) {
        problems.push(format!(
            r#"PR description should start with capital letter: "{description}""#
        ));
        fixed = capitalize_first(&fixed);
    }

    if !description.ends_with('.') {
        problems.push(format!(
            r#"PR description should end with a dot: "{description}""#
        ));
        fixed.push('.');
    }

    let spelling = config.spellings.check(&fixed);
    problems.extend(spelling.problems);

    (spelling.fixed, problems)
}

#[cfg(test)]
#[path = "./entry_tests.rs"]
mod tests;
