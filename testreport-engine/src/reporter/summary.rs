// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-line package summaries in the style of `go test`.

use super::duration::DisplaySummaryDuration;
use crate::{
    result::{PackageResult, TestResult},
    status::Outcome,
};
use owo_colors::{OwoColorize, Style};
use std::fmt;

/// Styles for package summaries. Plain by default.
#[derive(Clone, Debug, Default)]
pub struct SummaryStyles {
    is_colorized: bool,
    pass: Style,
    fail: Style,
    skip: Style,
    unknown: Style,
}

impl SummaryStyles {
    /// Colorizes output.
    pub fn colorize(&mut self) {
        self.is_colorized = true;
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
        self.skip = Style::new().yellow().bold();
        self.unknown = Style::new().magenta().bold();
    }

    /// Returns true if [`colorize`](Self::colorize) was called.
    pub fn is_colorized(&self) -> bool {
        self.is_colorized
    }
}

impl PackageResult {
    /// Returns a value that displays a `go test`-like summary of this package.
    pub fn display_summary<'a>(&'a self, styles: &'a SummaryStyles) -> DisplayPackageSummary<'a> {
        DisplayPackageSummary {
            package: self,
            styles,
        }
    }
}

/// Displays a summary of a package, as returned by [`PackageResult::display_summary`].
///
/// Failing packages are preceded by the raw output of their failed tests. The summary does not
/// end with a newline.
pub struct DisplayPackageSummary<'a> {
    package: &'a PackageResult,
    styles: &'a SummaryStyles,
}

/// The width of the status column, matching `go test`.
const STATUS_WIDTH: usize = 8;

impl DisplayPackageSummary<'_> {
    fn write_status(&self, f: &mut fmt::Formatter<'_>, status: &str, style: Style) -> fmt::Result {
        // Pad outside the styled span so escape codes don't count towards the width.
        write!(
            f,
            "{}{:pad$}{}",
            status.style(style),
            "",
            self.package.name,
            pad = STATUS_WIDTH.saturating_sub(status.len()),
        )
    }

    fn write_failed_output(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut failed: Vec<&TestResult> = self
            .package
            .tests
            .values()
            .filter(|test| test.outcome == Outcome::Fail)
            .collect();
        failed.sort_by(|a, b| a.rank().cmp(&b.rank()).then_with(|| a.name.cmp(&b.name)));

        let mut ends_with_newline = true;
        for line in failed.into_iter().flat_map(|test| &test.output) {
            if line.text.is_empty() {
                continue;
            }
            f.write_str(&line.text)?;
            ends_with_newline = line.text.ends_with('\n');
        }
        if !ends_with_newline {
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for DisplayPackageSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styles = self.styles;
        let duration = DisplaySummaryDuration(self.package.duration);
        match self.package.outcome {
            Outcome::Skip => {
                self.write_status(f, "?", styles.skip)?;
                write!(f, " [no test files]")
            }
            Outcome::Pass => {
                self.write_status(f, "ok", styles.pass)?;
                write!(f, " {duration}")
            }
            Outcome::Fail => {
                self.write_failed_output(f)?;
                self.write_status(f, "FAIL", styles.fail)?;
                write!(f, " {duration}")
            }
            Outcome::Unknown => {
                self.write_status(f, "?", styles.unknown)?;
                write!(f, " [incomplete]")
            }
        }
    }
}
