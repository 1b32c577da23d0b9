//! Change type headers: `### LABEL`.
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    changelog::entry::Entry, config::LinterConfig, vocabulary::check_spelling,
};

static CHANGE_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^### (?P<label>.*\S.*)$").unwrap());

/// A change type section inside a release.
#[derive(Debug, Clone)]
pub struct ChangeType {
    pub line: String,
    /// Label as written.
    pub raw: String,
    /// Label after normalization; equals `raw` when it is not recognized.
    pub canonical: String,
    pub problems: Vec<String>,
    pub fixed: String,
    pub entries: Vec<Entry>,
}

impl ChangeType {
    pub fn parse(line: &str, config: &LinterConfig) -> Self {
        let mut change_type = Self {
            line: line.to_string(),
            raw: String::new(),
            canonical: String::new(),
            problems: vec![],
            fixed: line.to_string(),
            entries: vec![],
        };

        let Some(captures) = CHANGE_TYPE_REGEX.captures(line) else {
            change_type
                .problems
                .push(format!(r#"Malformed change type: "{line}""#));
            return change_type;
        };

        let raw = captures["label"].to_string();
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        change_type.raw = raw.clone();
        change_type.canonical = raw.clone();

        let Some(term) = config.change_types.resolve(&collapsed) else {
            change_type
                .problems
                .push(format!(r#""{raw}" is not a valid change type"#));
            return change_type;
        };

        let canonical = term.preferred().to_string();

        if raw != canonical {
            let spelling = check_spelling(&raw, std::slice::from_ref(term));
            if spelling.problems.is_empty() {
                change_type.problems.push(format!(
                    r#""{canonical}" should be used instead of "{raw}""#
                ));
            } else {
                change_type.problems.extend(spelling.problems);
            }
        }

        change_type.fixed = format!("### {canonical}");
        change_type.canonical = canonical;

        change_type
    }

    /// True when the header carried no label at all. Unknown labels still
    /// open a section so their entries are checked.
    pub fn is_malformed(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn entry(&self, pr_number: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.pr_number == pr_number)
    }
}
