// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The data passed to report templates.
//!
//! A [`ReportContext`] is a sorted, display-ready view of a finished [`RunResult`]. Templates see
//! the following fields:
//!
//! | Field | Description |
//! |-------|-------------|
//! | `tests`, `passed`, `skipped`, `failed` | counts of finished tests |
//! | `duration` | total duration, e.g. `1.50s` |
//! | `packages` | packages that were not skipped, most interesting first |
//! | `vars` | variables passed in by the caller |
//!
//! Each package has `name`, `path`, `leaf`, `outcome`, `icon`, `succeeded`, `total`, `ratio`,
//! `duration`, `tests` and `output`. Each test has `name`, `outcome`, `icon`, `duration` and
//! `output`. Each output line has `time` (absent if the event carried no timestamp) and `text`,
//! which is raw and must be escaped by the template.

use super::{
    duration::{DisplayDurationSecs, DisplayLineTime},
    escape::NBSP,
};
use crate::{
    result::{OutputLine, PackageResult, RunResult, TestResult},
    status::{DURATION_ICON, Outcome, RankKey},
    vars::TemplateVars,
};
use serde::Serialize;
use swrite::{SWrite, swrite};

/// A display-ready view of a [`RunResult`].
#[derive(Clone, Debug, Serialize)]
pub struct ReportContext<'a> {
    /// The total number of finished tests.
    pub tests: usize,
    /// The number of tests that passed.
    pub passed: usize,
    /// The number of tests that were skipped.
    pub skipped: usize,
    /// The number of tests that failed.
    pub failed: usize,
    /// The total duration.
    pub duration: String,
    /// The icon shown next to the total duration.
    pub duration_icon: &'static str,
    /// Packages to itemize, in report order.
    pub packages: Vec<PackageContext<'a>>,
    /// Caller-supplied variables.
    pub vars: &'a TemplateVars,
}

impl<'a> ReportContext<'a> {
    /// Builds the context for a finished result.
    ///
    /// Skipped packages are counted in the header but not itemized, and empty output lines are
    /// dropped.
    pub fn new(result: &'a RunResult) -> Self {
        let mut packages: Vec<&PackageResult> = result
            .packages
            .values()
            .filter(|package| package.outcome != Outcome::Skip)
            .collect();
        packages.sort_by(|a, b| by_rank(a.rank(), &a.name, b.rank(), &b.name));

        let ratio_width = packages
            .iter()
            .flat_map(|package| [package.succeeded(), package.tests.len()])
            .map(digits)
            .max()
            .unwrap_or(1);

        Self {
            tests: result.tests(),
            passed: result.counts.passed,
            skipped: result.counts.skipped,
            failed: result.counts.failed,
            duration: DisplayDurationSecs(result.duration).to_string(),
            duration_icon: DURATION_ICON,
            packages: packages
                .into_iter()
                .map(|package| PackageContext::new(package, ratio_width))
                .collect(),
            vars: &result.vars,
        }
    }
}

/// A display-ready view of a [`PackageResult`].
#[derive(Clone, Debug, Serialize)]
pub struct PackageContext<'a> {
    /// The full package name.
    pub name: &'a str,
    /// The part of the name up to and including the last `/`.
    pub path: &'a str,
    /// The part of the name after the last `/`.
    pub leaf: &'a str,
    /// The outcome of the package.
    pub outcome: Outcome,
    /// The icon for the outcome.
    pub icon: &'static str,
    /// The number of tests that passed or were skipped.
    pub succeeded: usize,
    /// The number of tests in the package.
    pub total: usize,
    /// `succeeded/total`, padded with `&nbsp;` so that ratios line up across packages.
    pub ratio: String,
    /// The duration of the package.
    pub duration: String,
    /// Tests in report order.
    pub tests: Vec<TestContext<'a>>,
    /// Non-empty package-level output lines.
    pub output: Vec<LineContext<'a>>,
}

impl<'a> PackageContext<'a> {
    fn new(package: &'a PackageResult, ratio_width: usize) -> Self {
        let succeeded = package.succeeded();
        let total = package.tests.len();

        let mut tests: Vec<&TestResult> = package.tests.values().collect();
        tests.sort_by(|a, b| by_rank(a.rank(), &a.name, b.rank(), &b.name));

        Self {
            name: &package.name,
            path: package.path(),
            leaf: package.leaf(),
            outcome: package.outcome,
            icon: package.outcome.icon(),
            succeeded,
            total,
            ratio: padded_ratio(succeeded, total, ratio_width),
            duration: DisplayDurationSecs(package.duration).to_string(),
            tests: tests.into_iter().map(TestContext::new).collect(),
            output: lines(&package.output),
        }
    }
}

/// A display-ready view of a [`TestResult`].
#[derive(Clone, Debug, Serialize)]
pub struct TestContext<'a> {
    /// The test name.
    pub name: &'a str,
    /// The outcome of the test.
    pub outcome: Outcome,
    /// The icon for the outcome.
    pub icon: &'static str,
    /// The duration of the test.
    pub duration: String,
    /// Non-empty output lines, in arrival order.
    pub output: Vec<LineContext<'a>>,
}

impl<'a> TestContext<'a> {
    fn new(test: &'a TestResult) -> Self {
        Self {
            name: &test.name,
            outcome: test.outcome,
            icon: test.outcome.icon(),
            duration: DisplayDurationSecs(test.duration).to_string(),
            output: lines(&test.output),
        }
    }
}

/// A display-ready view of an [`OutputLine`].
#[derive(Clone, Debug, Serialize)]
pub struct LineContext<'a> {
    /// The time of day, e.g. `20:45:01.563`.
    pub time: Option<String>,
    /// The raw text.
    pub text: &'a str,
}

fn lines(output: &[OutputLine]) -> Vec<LineContext<'_>> {
    output
        .iter()
        .filter(|line| !line.text.is_empty())
        .map(|line| LineContext {
            time: line
                .time
                .as_ref()
                .map(|time| DisplayLineTime(time).to_string()),
            text: &line.text,
        })
        .collect()
}

fn by_rank(a: RankKey, a_name: &str, b: RankKey, b_name: &str) -> std::cmp::Ordering {
    a.cmp(&b).then_with(|| a_name.cmp(b_name))
}

fn padded_ratio(succeeded: usize, total: usize, width: usize) -> String {
    let mut ratio = NBSP.repeat(width.saturating_sub(digits(succeeded)));
    swrite!(ratio, "{succeeded}/{total}");
    ratio.push_str(&NBSP.repeat(width.saturating_sub(digits(total))));
    ratio
}

/// Returns the number of decimal digits in `n`.
fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate_events;
    use indoc::indoc;
    use test_case::test_case;

    #[test_case(0, 1)]
    #[test_case(9, 1)]
    #[test_case(10, 2)]
    #[test_case(999, 3)]
    #[test_case(1000, 4)]
    fn digit_count(n: usize, expected: usize) {
        assert_eq!(digits(n), expected);
    }

    #[test_case(1, 2, 1, "1/2" ; "no padding")]
    #[test_case(3, 12, 2, "&nbsp;3/12" ; "pad succeeded")]
    #[test_case(3, 4, 2, "&nbsp;3/4&nbsp;" ; "pad both")]
    #[test_case(10, 10, 3, "&nbsp;10/10&nbsp;" ; "wide")]
    fn ratio(succeeded: usize, total: usize, width: usize, expected: &str) {
        assert_eq!(padded_ratio(succeeded, total, width), expected);
    }

    #[test]
    fn sorting_and_filtering() {
        let result = aggregate_events(
            indoc! {r#"
                {"Package":"example.com/skipped","Action":"skip"}
                {"Package":"example.com/b","Test":"TestFast","Action":"pass","Elapsed":0.1}
                {"Package":"example.com/b","Test":"TestSlow","Action":"pass","Elapsed":0.5}
                {"Package":"example.com/b","Test":"TestBroken","Action":"fail","Elapsed":0.01}
                {"Package":"example.com/b","Test":"TestBroken","Action":"output","Output":"boom\n"}
                {"Package":"example.com/b","Test":"TestHung","Action":"run"}
                {"Package":"example.com/b","Test":"TestSkipped","Action":"skip","Elapsed":0.9}
                {"Package":"example.com/b","Test":"TestAlsoFast","Action":"pass","Elapsed":0.1}
                {"Package":"example.com/b","Action":"fail","Elapsed":1}
                {"Package":"example.com/a","Action":"pass","Elapsed":2}
                {"Package":"example.com/c","Action":"pass","Elapsed":2}
                {"Package":"example.com/d","Action":"run"}
            "#}
            .as_bytes(),
        )
        .expect("input is valid");
        let context = ReportContext::new(&result);

        let names: Vec<_> = context.packages.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            [
                "example.com/b",
                "example.com/d",
                "example.com/a",
                "example.com/c",
            ]
        );

        let b = &context.packages[0];
        let tests: Vec<_> = b.tests.iter().map(|t| t.name).collect();
        assert_eq!(
            tests,
            [
                "TestBroken",
                "TestHung",
                "TestSlow",
                "TestAlsoFast",
                "TestFast",
                "TestSkipped",
            ]
        );
        assert_eq!(b.succeeded, 4);
        assert_eq!(b.total, 6);
        assert_eq!(b.ratio, "4/6");
        assert_eq!(b.path, "example.com/");
        assert_eq!(b.leaf, "b");
        assert_eq!(b.icon, "❌");
        assert_eq!(b.duration, "1.00s");

        // The empty lines from the terminal events are dropped.
        let broken = &b.tests[0];
        assert_eq!(broken.output.len(), 1);
        assert_eq!(broken.output[0].text, "boom\n");
        assert_eq!(broken.output[0].time, None);

        assert_eq!(context.packages[1].icon, "❔");
        assert_eq!(context.tests, 5);
        assert_eq!(context.duration, "5.00s");
    }
}
