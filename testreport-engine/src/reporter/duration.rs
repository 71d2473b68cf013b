// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display helpers for durations and timestamps.

use chrono::{DateTime, FixedOffset};
use std::{fmt, time::Duration};

/// Displays a duration in seconds with two decimals, e.g. `1.50s`.
///
/// This is the format used for every duration in rendered reports.
#[derive(Copy, Clone, Debug)]
pub struct DisplayDurationSecs(pub Duration);

impl fmt::Display for DisplayDurationSecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}s", self.0.as_secs_f64())
    }
}

/// Displays a duration the way `go test` prints package times, e.g. `0.015s`.
pub(super) struct DisplaySummaryDuration(pub(super) Duration);

impl fmt::Display for DisplaySummaryDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0.as_secs_f64())
    }
}

/// Displays the time of day of an output line, e.g. `20:45:01.563`.
///
/// The time is shown in the offset it was recorded with.
pub(super) struct DisplayLineTime<'a>(pub(super) &'a DateTime<FixedOffset>);

impl fmt::Display for DisplayLineTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.3f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Duration::ZERO, "0.00s")]
    #[test_case(Duration::from_millis(1500), "1.50s")]
    #[test_case(Duration::from_millis(10), "0.01s")]
    #[test_case(Duration::from_secs(130), "130.00s")]
    fn duration_secs(duration: Duration, expected: &str) {
        assert_eq!(DisplayDurationSecs(duration).to_string(), expected);
    }

    #[test]
    fn summary_duration() {
        assert_eq!(
            DisplaySummaryDuration(Duration::from_millis(15)).to_string(),
            "0.015s"
        );
    }

    #[test_case("2022-12-27T20:45:01.5635437+01:00", "20:45:01.563" ; "offset kept")]
    #[test_case("2023-02-01T19:55:05Z", "19:55:05.000" ; "whole seconds")]
    fn line_time(input: &str, expected: &str) {
        let time = DateTime::parse_from_rfc3339(input).expect("valid timestamp");
        assert_eq!(DisplayLineTime(&time).to_string(), expected);
    }
}
