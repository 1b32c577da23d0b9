//! Single-pass changelog validation.
//!
//! The [`Linter`] walks the document line by line. Only lines starting with
//! `## `, `### ` or `- ` are recognized; everything else is carried over
//! verbatim. Each recognized line goes through its parser, the findings are
//! collected as [`Problem`]s in document order and the parsed entities are
//! registered in the [`Changelog`] model together with the corrected line.
use log::*;
use serde_json::{Map, Value, json};
use std::{fs, path::Path};
use strum::Display;

use crate::{
    config::LinterConfig,
    error::{LintError, Result},
};

pub mod change_type;
pub mod entry;
pub mod problem;
pub mod release;

pub use change_type::ChangeType;
pub use entry::Entry;
pub use problem::Problem;
pub use release::{Release, ReleaseVersion};

/// Position of the walker inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LintState {
    Initial,
    InRelease { release: usize },
    InChangeType { release: usize, change_type: usize },
    Legacy,
}

/// The parsed document, its problems and its corrected form.
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    pub releases: Vec<Release>,
    pub problems: Vec<Problem>,
    fixed_lines: Vec<String>,
    trailing_newline: bool,
}

impl Changelog {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    /// Problem messages without line numbers, in document order.
    pub fn messages(&self) -> Vec<&str> {
        self.problems.iter().map(|p| p.message.as_str()).collect()
    }

    /// The corrected document.
    pub fn fixed(&self) -> String {
        let mut fixed = self.fixed_lines.join("\n");
        if self.trailing_newline {
            fixed.push('\n');
        }
        fixed
    }

    /// Nested `release -> change type -> PR -> description` view.
    pub fn to_json(&self) -> Value {
        let mut releases = Map::new();

        for release in &self.releases {
            let mut change_types = Map::new();

            for change_type in &release.change_types {
                let mut entries = Map::new();

                for entry in &change_type.entries {
                    entries.insert(
                        entry.pr_number.to_string(),
                        json!({ "description": entry.description }),
                    );
                }

                change_types.insert(
                    change_type.canonical.clone(),
                    Value::Object(entries),
                );
            }

            releases.insert(release.id(), Value::Object(change_types));
        }

        json!({
            "releases": releases,
            "problems": self.problems,
        })
    }
}

/// Drives the parsers over a document.
pub struct Linter<'c> {
    config: &'c LinterConfig,
}

impl<'c> Linter<'c> {
    pub fn new(config: &'c LinterConfig) -> Self {
        Self { config }
    }

    /// Read and lint a changelog file.
    pub fn lint_file(&self, path: &Path) -> Result<Changelog> {
        if !path.is_file() {
            return Err(LintError::not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        info!("linting changelog: {}", path.display());

        Ok(self.lint(&content))
    }

    pub fn lint(&self, content: &str) -> Changelog {
        let mut changelog = Changelog {
            trailing_newline: content.ends_with('\n'),
            ..Default::default()
        };
        let mut state = LintState::Initial;

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;

            state = if state == LintState::Legacy {
                changelog.fixed_lines.push(line.to_string());
                state
            } else if line.starts_with("## ") {
                self.handle_release(&mut changelog, line_number, line)
            } else if line.starts_with("### ") {
                self.handle_change_type(
                    &mut changelog,
                    state,
                    line_number,
                    line,
                )
            } else if line.starts_with("- ") {
                self.handle_entry(&mut changelog, state, line_number, line);
                state
            } else {
                changelog.fixed_lines.push(line.to_string());
                state
            };

            trace!("line {line_number}: {state}");
        }

        debug!(
            "parsed {} releases with {} problems",
            changelog.releases.len(),
            changelog.problems.len()
        );

        changelog
    }

    fn handle_release(
        &self,
        changelog: &mut Changelog,
        line_number: usize,
        line: &str,
    ) -> LintState {
        let release = Release::parse(line, self.config);

        push_problems(changelog, line_number, &release.problems);
        changelog.fixed_lines.push(release.fixed.clone());

        if release.version.is_none() {
            return LintState::Initial;
        }

        let legacy = release.is_at_or_below(self.config.legacy_version);
        let id = release.id();

        let index = match changelog.releases.iter().position(|r| r.id() == id) {
            Some(existing) => {
                changelog.problems.push(Problem::new(
                    line_number,
                    format!(r#"Release "{id}" is duplicated in the changelog"#),
                ));
                existing
            }
            None => {
                changelog.releases.push(release);
                changelog.releases.len() - 1
            }
        };

        if legacy {
            info!(
                "release {id} is at or below legacy version {}, skipping the rest of the changelog",
                self.config.legacy_version
            );
            return LintState::Legacy;
        }

        LintState::InRelease { release: index }
    }

    fn handle_change_type(
        &self,
        changelog: &mut Changelog,
        state: LintState,
        line_number: usize,
        line: &str,
    ) -> LintState {
        let change_type = ChangeType::parse(line, self.config);

        push_problems(changelog, line_number, &change_type.problems);
        changelog.fixed_lines.push(change_type.fixed.clone());

        let release_index = match state {
            LintState::InRelease { release }
            | LintState::InChangeType { release, .. } => release,
            _ => {
                changelog.problems.push(Problem::new(
                    line_number,
                    format!(
                        r#"Change type found before any release: "{line}""#
                    ),
                ));
                return state;
            }
        };

        if change_type.is_malformed() {
            return LintState::InRelease {
                release: release_index,
            };
        }

        let release = &mut changelog.releases[release_index];
        let release_id = release.id();

        let index = match release.change_type(&change_type.canonical) {
            Some(existing) => {
                changelog.problems.push(Problem::new(
                    line_number,
                    format!(
                        r#"Change type "{}" is duplicated in {release_id}"#,
                        change_type.canonical
                    ),
                ));
                existing
            }
            None => {
                release.change_types.push(change_type);
                release.change_types.len() - 1
            }
        };

        LintState::InChangeType {
            release: release_index,
            change_type: index,
        }
    }

    fn handle_entry(
        &self,
        changelog: &mut Changelog,
        state: LintState,
        line_number: usize,
        line: &str,
    ) {
        if let Some(exception) = self.config.known_exception(line) {
            debug!("line {line_number} matches known exception: {exception}");
            changelog.fixed_lines.push(line.to_string());
            return;
        }

        let entry = Entry::parse(line, self.config);

        push_problems(changelog, line_number, &entry.problems);
        changelog.fixed_lines.push(entry.fixed.clone());

        let LintState::InChangeType {
            release,
            change_type,
        } = state
        else {
            changelog.problems.push(Problem::new(
                line_number,
                format!(
                    r#"Entry found before any release and change type: "{line}""#
                ),
            ));
            return;
        };

        // malformed entries carry no PR number to register
        if entry.pr_number == 0 {
            return;
        }

        let pr_number = entry.pr_number;
        let section =
            &mut changelog.releases[release].change_types[change_type];

        if section.entry(pr_number).is_none() {
            section.entries.push(entry);
            return;
        }

        if !self.config.is_allowed_duplicate(pr_number) {
            changelog.problems.push(Problem::new(
                line_number,
                format!("PR #{pr_number} is duplicated in the changelog"),
            ));
        }
    }
}

fn push_problems(
    changelog: &mut Changelog,
    line_number: usize,
    messages: &[String],
) {
    changelog.problems.extend(
        messages
            .iter()
            .map(|message| Problem::new(line_number, message.clone())),
    );
}

#[cfg(test)]
#[path = "./changelog_tests.rs"]
mod tests;
