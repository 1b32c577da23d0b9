//! Problem reporting and exit status.
use std::path::Path;

use crate::changelog::Problem;

/// Deterministic rendering of the problems found in one changelog.
pub struct Report<'a> {
    source: &'a Path,
    problems: &'a [Problem],
}

impl<'a> Report<'a> {
    pub fn new(source: &'a Path, problems: &'a [Problem]) -> Self {
        Self { source, problems }
    }

    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// 0 when no problems were found, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() { 0 } else { 1 }
    }

    /// A header line followed by one `PATH:LINE: MESSAGE` line per problem,
    /// in document order. Empty when there is nothing to report.
    pub fn render(&self) -> String {
        if self.is_clean() {
            return String::new();
        }

        let mut output = format!("{} problems\n", self.problems.len());

        for problem in self.problems {
            output.push_str(&format!(
                "{}:{}: {}\n",
                self.source.display(),
                problem.line,
                problem.message
            ));
        }

        output
    }
}
