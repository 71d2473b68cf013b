// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The outcome of a test or package, and the order in which outcomes are reported.
//!
//! Both packages and tests are sorted with [`RankKey`]:
//!
//! 1. by outcome, in the order given by [`Outcome::PRIORITY_ORDER`]: failures first, then
//!    tests that never finished, then passes, then skips;
//! 2. within the same outcome, slower before faster;
//! 3. callers break remaining ties by name, ascending.

use serde::Serialize;
use std::{cmp::Ordering, fmt, time::Duration};
use testreport_metadata::TestAction;

/// The final status of a test or package.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// No terminal event has been seen yet.
    ///
    /// This is the state of every test or package until a `pass`, `fail` or `skip` event arrives.
    #[default]
    Unknown,

    /// The test or package passed.
    Pass,

    /// The test or package failed.
    Fail,

    /// The test was skipped, or the package contained no tests.
    Skip,
}

impl Outcome {
    /// The order in which outcomes are reported, most interesting first.
    pub const PRIORITY_ORDER: [Outcome; 4] =
        [Outcome::Fail, Outcome::Unknown, Outcome::Pass, Outcome::Skip];

    /// Returns the outcome corresponding to a terminal action, or `None` if the action does not
    /// finalize a test or package.
    pub fn from_action(action: TestAction) -> Option<Self> {
        match action {
            TestAction::Pass => Some(Self::Pass),
            TestAction::Fail => Some(Self::Fail),
            TestAction::Skip => Some(Self::Skip),
            TestAction::Start
            | TestAction::Run
            | TestAction::Pause
            | TestAction::Cont
            | TestAction::Bench
            | TestAction::Output
            | TestAction::Unknown => None,
        }
    }

    /// Returns true if a terminal event has set this outcome.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns true if this outcome counts towards a package's succeeded tests.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Pass | Self::Skip)
    }

    /// Returns the position of this outcome in [`Self::PRIORITY_ORDER`].
    pub fn priority(self) -> u8 {
        match self {
            Self::Fail => 0,
            Self::Unknown => 1,
            Self::Pass => 2,
            Self::Skip => 3,
        }
    }

    /// Returns the icon used for this outcome in reports.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pass => "✔️",
            Self::Fail => "❌",
            Self::Skip => "⏩",
            Self::Unknown => "❔",
        }
    }

    /// Returns a short lowercase label for this outcome.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The icon shown next to the total duration in report headers.
pub const DURATION_ICON: &str = "⏱️";

/// A sort key combining an outcome and a duration.
///
/// `RankKey` values compare less when they should be reported earlier. See the
/// [module-level documentation](self) for the order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RankKey {
    /// The outcome.
    pub outcome: Outcome,

    /// The time taken.
    pub duration: Duration,
}

impl RankKey {
    /// Creates a new `RankKey`.
    pub fn new(outcome: Outcome, duration: Duration) -> Self {
        Self { outcome, duration }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.outcome
            .priority()
            .cmp(&other.outcome.priority())
            // Reversed: slower entries come first.
            .then_with(|| other.duration.cmp(&self.duration))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
