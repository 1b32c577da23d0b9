//! Release header parsing: `## Unreleased` or
//! `## [vX.Y.Z(-rcN)](LINK) - YYYY-MM-DD`.
use chrono::NaiveDate;
use regex::Regex;
use semver::Version as SemVer;
use std::{fmt, sync::LazyLock};

use crate::{
    changelog::change_type::ChangeType,
    config::LinterConfig,
    error::{LintError, Result},
};

pub const UNRELEASED: &str = "Unreleased";

static RELEASE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^## \[(?P<version>[^\]]*)\](?:\((?P<link>[^)]*)\))? - (?P<date>\d{4}-\d{2}-\d{2})$",
    )
    .unwrap()
});

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+\.\d+\.\d+(-rc\d+)?$").unwrap());

/// Identifier of a release section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseVersion {
    Unreleased,
    Tagged { tag: String, semver: SemVer },
}

impl ReleaseVersion {
    /// Parse a `vMAJOR.MINOR.PATCH(-rcN)` tag.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        if !VERSION_REGEX.is_match(tag) {
            return None;
        }

        let semver = SemVer::parse(tag.trim_start_matches('v')).ok()?;

        Some(Self::Tagged {
            tag: tag.to_string(),
            semver,
        })
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseVersion::Unreleased => write!(f, "{UNRELEASED}"),
            ReleaseVersion::Tagged { tag, .. } => write!(f, "{tag}"),
        }
    }
}

/// A parsed release header and the change types registered under it.
#[derive(Debug, Clone)]
pub struct Release {
    pub line: String,
    /// None when the header could not be recognized.
    pub version: Option<ReleaseVersion>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub problems: Vec<String>,
    pub fixed: String,
    pub change_types: Vec<ChangeType>,
}

impl Release {
    fn empty(line: &str) -> Self {
        Self {
            line: line.to_string(),
            version: None,
            date: None,
            link: None,
            problems: vec![],
            fixed: line.to_string(),
            change_types: vec![],
        }
    }

    /// Parse a release header line. Never fails; findings land in
    /// `problems`.
    pub fn parse(line: &str, config: &LinterConfig) -> Self {
        let mut release = Self::empty(line);

        if line == format!("## {UNRELEASED}") {
            release.version = Some(ReleaseVersion::Unreleased);
            return release;
        }

        let Some(captures) = RELEASE_HEADER_REGEX.captures(line) else {
            release
                .problems
                .push(format!(r#"Malformed release header: "{line}""#));
            return release;
        };

        let tag = &captures["version"];
        let date = &captures["date"];
        let link = captures.name("link").map(|m| m.as_str().to_string());

        let Some(version) = ReleaseVersion::parse_tag(tag) else {
            release
                .problems
                .push(format!(r#"Malformed release header: "{line}""#));
            return release;
        };

        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            release
                .problems
                .push(format!(r#"Invalid release date "{date}""#));
        }

        release.problems.extend(check_link(
            tag,
            link.as_deref(),
            &config.release_base_url,
        ));

        release.fixed = format!(
            "## [{tag}]({}/{tag}) - {date}",
            config.release_base_url
        );
        release.version = Some(version);
        release.date = Some(date.to_string());
        release.link = link;

        release
    }

    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    /// Identifier used for duplicate detection and reporting.
    pub fn id(&self) -> String {
        self.version
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| self.line.clone())
    }

    /// Major version of a tagged release.
    pub fn major(&self) -> Result<u64> {
        match &self.version {
            Some(ReleaseVersion::Tagged { semver, .. }) => Ok(semver.major),
            _ => Err(LintError::Unversioned(self.id())),
        }
    }

    /// Whether the release's major version is at most `major`.
    /// "Unreleased" never is.
    pub fn is_at_or_below(&self, major: u64) -> bool {
        self.major().is_ok_and(|m| m <= major)
    }

    pub fn change_type(&self, canonical: &str) -> Option<usize> {
        self.change_types
            .iter()
            .position(|ct| ct.canonical == canonical)
    }
}

fn check_link(tag: &str, link: Option<&str>, base_url: &str) -> Vec<String> {
    let Some(link) = link else {
        return vec![format!("Release link is missing for {tag}")];
    };

    let mut problems = vec![];

    if !link.starts_with(&format!("{base_url}/")) {
        problems.push(format!(
            r#"Release link should point to an official release: "{link}""#
        ));
    }

    let link_version = link.rsplit('/').next().unwrap_or_default();
    if link_version != tag {
        problems.push(format!(
            r#"Release header version "{tag}" does not match version in link "{link}""#
        ));
    }

    problems
}
