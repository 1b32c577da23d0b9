//! Preferred-spelling engine shared by the change type and entry parsers.
//!
//! A [`Vocabulary`] is an ordered list of [`Term`]s, each pairing the
//! preferred spelling with a case-insensitive pattern. Checking a text finds
//! every isolated occurrence of each pattern and rewrites it to the
//! preferred spelling. Occurrences inside inline code spans, inside the URL
//! part of a markdown link, or glued to a larger identifier are ignored.
use regex::{Regex, RegexBuilder};
use std::{ops::Range, sync::LazyLock};

use crate::error::Result;

static CODE_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());

static LINK_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\([^)]*\)").unwrap());

/// A preferred spelling and the pattern that recognizes its variants.
#[derive(Debug, Clone)]
pub struct Term {
    preferred: String,
    pattern: Regex,
    exact: Regex,
}

impl Term {
    /// Compile a term. The pattern is always matched case-insensitively.
    pub fn new(preferred: impl Into<String>, pattern: &str) -> Result<Self> {
        let pattern_regex =
            RegexBuilder::new(pattern).case_insensitive(true).build()?;
        let exact = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            preferred: preferred.into(),
            pattern: pattern_regex,
            exact,
        })
    }

    pub fn preferred(&self) -> &str {
        &self.preferred
    }

    /// True when the whole text is a spelling of this term.
    pub fn matches_exactly(&self, text: &str) -> bool {
        self.exact.is_match(text)
    }
}

/// Outcome of a spelling check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellCheck {
    /// Whether any term matched anywhere in the text.
    pub found: bool,
    /// The text with every counted match replaced by its preferred spelling.
    pub fixed: String,
    /// One message per distinct misspelling.
    pub problems: Vec<String>,
}

/// Ordered collection of preferred spellings.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<Term>,
}

impl Vocabulary {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Compile a vocabulary from `(preferred, pattern)` pairs.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, S)]) -> Result<Self> {
        let terms = pairs
            .iter()
            .map(|(preferred, pattern)| {
                Term::new(preferred.as_ref(), pattern.as_ref())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(terms))
    }

    /// Find the first term whose pattern covers the whole text.
    pub fn resolve(&self, text: &str) -> Option<&Term> {
        self.terms.iter().find(|term| term.matches_exactly(text))
    }

    pub fn check(&self, text: &str) -> SpellCheck {
        check_spelling(text, &self.terms)
    }
}

/// Check the text against every term and collect the corrections.
///
/// All terms are matched against the text as written. Where matches of
/// different terms overlap, the longest one is kept, ties going to the
/// earlier term. Problems are listed in term order.
///
/// A match at the very start of the text is compared against the preferred
/// spelling with its first letter capitalized, so sentence-initial words
/// such as "Outpost" are accepted and never fight the capitalization rule.
pub fn check_spelling(text: &str, terms: &[Term]) -> SpellCheck {
    let mut candidates: Vec<(usize, Range<usize>)> = terms
        .iter()
        .enumerate()
        .flat_map(|(index, term)| {
            isolated_matches(&term.pattern, text)
                .into_iter()
                .map(move |range| (index, range))
        })
        .collect();

    candidates.sort_by(|(a_term, a), (b_term, b)| {
        b.len()
            .cmp(&a.len())
            .then(a_term.cmp(b_term))
            .then(a.start.cmp(&b.start))
    });

    let mut accepted: Vec<(usize, Range<usize>)> = vec![];
    for (index, range) in candidates {
        let overlaps = accepted
            .iter()
            .any(|(_, kept)| range.start < kept.end && kept.start < range.end);
        if !overlaps {
            accepted.push((index, range));
        }
    }

    let expected_for = |index: usize, range: &Range<usize>| {
        let preferred = terms[index].preferred();
        if range.start == 0 {
            capitalize_first(preferred)
        } else {
            preferred.to_string()
        }
    };

    accepted.sort_by(|(a_term, a), (b_term, b)| {
        a_term.cmp(b_term).then(a.start.cmp(&b.start))
    });

    let mut problems: Vec<String> = vec![];
    for (index, range) in &accepted {
        let actual = &text[range.clone()];
        let expected = expected_for(*index, range);

        if actual != expected {
            let message = format!(
                r#""{expected}" should be used instead of "{actual}""#
            );
            if !problems.contains(&message) {
                problems.push(message);
            }
        }
    }

    accepted.sort_by_key(|(_, range)| range.start);

    let mut fixed = String::with_capacity(text.len());
    let mut last = 0;
    for (index, range) in &accepted {
        fixed.push_str(&text[last..range.start]);
        fixed.push_str(&expected_for(*index, range));
        last = range.end;
    }
    fixed.push_str(&text[last..]);

    SpellCheck {
        found: !accepted.is_empty(),
        fixed,
        problems,
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn isolated_matches(pattern: &Regex, text: &str) -> Vec<Range<usize>> {
    let excluded = excluded_ranges(text);

    pattern
        .find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| m.range())
        .filter(|range| {
            !excluded
                .iter()
                .any(|ex| range.start < ex.end && ex.start < range.end)
        })
        .filter(|range| is_isolated(text, range))
        .collect()
}

fn excluded_ranges(text: &str) -> Vec<Range<usize>> {
    CODE_SPAN_REGEX
        .find_iter(text)
        .chain(LINK_URL_REGEX.find_iter(text))
        .map(|m| m.range())
        .collect()
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '/')
}

fn is_isolated(text: &str, range: &Range<usize>) -> bool {
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();

    let clean_before =
        before.is_none_or(|c| !is_identifier_char(c) && c != '.');
    let clean_after = after.is_none_or(|c| !is_identifier_char(c));

    clean_before && clean_after
}
