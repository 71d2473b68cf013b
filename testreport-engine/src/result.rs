// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The result tree produced by aggregating a stream of test events.
//!
//! A [`RunResult`] owns a map of [`PackageResult`]s, each of which owns a map of
//! [`TestResult`]s. Maps are keyed by name and preserve arrival order, but nothing downstream
//! relies on that order: reports are always re-sorted with [`RankKey`].

use crate::{
    status::{Outcome, RankKey},
    vars::TemplateVars,
};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use std::time::Duration;

/// The aggregated result of a test run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunResult {
    /// Counts of finished tests.
    pub counts: RunCounts,

    /// The sum of the durations of all terminal package events.
    pub duration: Duration,

    /// Results for each package, keyed by package name.
    pub packages: IndexMap<String, PackageResult>,

    /// Variables supplied by the caller, exposed to report templates.
    pub vars: TemplateVars,
}

impl RunResult {
    /// Returns the total number of finished tests.
    pub fn tests(&self) -> usize {
        self.counts.total()
    }

    /// Returns true if any package failed.
    ///
    /// This is what callers should use to decide on a failing exit status.
    pub fn has_failures(&self) -> bool {
        self.packages
            .values()
            .any(|package| package.outcome == Outcome::Fail)
    }

    /// Attaches caller-supplied template variables to this result.
    pub fn set_vars(&mut self, vars: TemplateVars) -> &mut Self {
        self.vars = vars;
        self
    }
}

/// Counts of terminal test events, by outcome.
///
/// Every terminal event is counted, so a test that finishes more than once (as with
/// `go test -count=2`) contributes once per run. Tests that never received a terminal event are
/// not counted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunCounts {
    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that were skipped.
    pub skipped: usize,
}

impl RunCounts {
    /// Returns the total number of finished tests.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        if let Some(counter) = self.counter_mut(outcome) {
            *counter += 1;
        }
    }

    fn counter_mut(&mut self, outcome: Outcome) -> Option<&mut usize> {
        match outcome {
            Outcome::Pass => Some(&mut self.passed),
            Outcome::Fail => Some(&mut self.failed),
            Outcome::Skip => Some(&mut self.skipped),
            Outcome::Unknown => None,
        }
    }
}

/// The result of a single package.
#[derive(Clone, Debug, PartialEq)]
pub struct PackageResult {
    /// The import path of the package.
    pub name: String,

    /// The outcome of the package as a whole.
    pub outcome: Outcome,

    /// The time taken by the package, as reported by its terminal event.
    pub duration: Duration,

    /// Results for each test in this package, keyed by test name.
    pub tests: IndexMap<String, TestResult>,

    /// Lines from events that concern the package as a whole.
    pub output: Vec<OutputLine>,
}

impl PackageResult {
    /// Creates a new, unfinished `PackageResult`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Unknown,
            duration: Duration::ZERO,
            tests: IndexMap::new(),
            output: Vec::new(),
        }
    }

    /// Returns the part of the name up to and including the last `/`.
    pub fn path(&self) -> &str {
        split_package_name(&self.name).0
    }

    /// Returns the part of the name after the last `/`.
    pub fn leaf(&self) -> &str {
        split_package_name(&self.name).1
    }

    /// Returns the number of tests in this package that passed or were skipped.
    pub fn succeeded(&self) -> usize {
        self.tests
            .values()
            .filter(|test| test.outcome.is_success())
            .count()
    }

    /// Returns the key this package is sorted by.
    pub fn rank(&self) -> RankKey {
        RankKey::new(self.outcome, self.duration)
    }
}

/// The result of a single test.
#[derive(Clone, Debug, PartialEq)]
pub struct TestResult {
    /// The name of the test, unique within its package.
    pub name: String,

    /// The outcome of the test.
    pub outcome: Outcome,

    /// The time taken by the test, as reported by its terminal event.
    pub duration: Duration,

    /// Every line recorded for this test, in arrival order.
    ///
    /// Lines with empty text are kept here and only dropped at render time.
    pub output: Vec<OutputLine>,
}

impl TestResult {
    /// Creates a new, unfinished `TestResult`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Unknown,
            duration: Duration::ZERO,
            output: Vec::new(),
        }
    }

    /// Returns the key this test is sorted by.
    pub fn rank(&self) -> RankKey {
        RankKey::new(self.outcome, self.duration)
    }
}

/// A single line of output, along with the time it was recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputLine {
    /// The time of the event that carried this line, if known.
    pub time: Option<DateTime<FixedOffset>>,

    /// The text, which may be empty.
    pub text: String,
}

impl OutputLine {
    /// Creates a new `OutputLine`.
    pub fn new(time: Option<DateTime<FixedOffset>>, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// Splits a package name into the part up to and including the last `/`, and the rest.
pub fn split_package_name(name: &str) -> (&str, &str) {
    match name.rfind('/') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    }
}
