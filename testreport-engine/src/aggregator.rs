// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folds a stream of test events into a [`RunResult`].
//!
//! Events from concurrently running packages and tests arrive interleaved. Every event is
//! attributed by name, so interleaving has no effect on the final result. The only order that
//! matters is the order of events for the same test or package:
//!
//! * output lines are kept in arrival order;
//! * the last terminal event (`pass`, `fail` or `skip`) sets the outcome and duration of a test or
//!   package.
//!
//! The run's counters and total duration accumulate over every terminal event. With
//! `go test -count=N`, each test and package finishes `N` times and is counted `N` times.

use crate::{
    errors::ParseEventsError,
    result::{OutputLine, PackageResult, RunResult, TestResult},
    status::Outcome,
};
use std::{io::BufRead, time::Duration};
use testreport_metadata::TestEvent;

/// Reads newline-delimited test events from `reader` and aggregates them.
///
/// Lines that are empty or only contain whitespace are skipped. The first line that cannot be read
/// or decoded aborts aggregation.
pub fn aggregate_events(reader: impl BufRead) -> Result<RunResult, ParseEventsError> {
    let mut aggregator = EventAggregator::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.map_err(|error| ParseEventsError::Read { line_number, error })?;
        if line.trim().is_empty() {
            continue;
        }
        let event = TestEvent::parse_line(&line)
            .map_err(|error| ParseEventsError::Decode { line_number, error })?;
        aggregator.add_event(event);
    }

    Ok(aggregator.finish())
}

/// The state machine that builds a [`RunResult`] one event at a time.
#[derive(Debug, Default)]
pub struct EventAggregator {
    result: RunResult,
}

impl EventAggregator {
    /// Creates a new aggregator with an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the result aggregated so far.
    pub fn result(&self) -> &RunResult {
        &self.result
    }

    /// Folds a single event into the result.
    ///
    /// Events without a package name cannot be attributed to anything and are ignored.
    pub fn add_event(&mut self, event: TestEvent) {
        if event.package.is_empty() {
            return;
        }

        let TestEvent {
            time,
            action,
            package,
            test,
            elapsed,
            output,
        } = event;
        let terminal = Outcome::from_action(action);
        let line = OutputLine::new(time, output);

        let package = self
            .result
            .packages
            .entry(package)
            .or_insert_with_key(|name| PackageResult::new(name.as_str()));

        if test.is_empty() {
            package.output.push(line);
            if let Some(outcome) = terminal {
                let duration = elapsed_duration(elapsed);
                package.outcome = outcome;
                package.duration = duration;
                self.result.duration += duration;
            }
        } else {
            let test = package
                .tests
                .entry(test)
                .or_insert_with_key(|name| TestResult::new(name.as_str()));
            test.output.push(line);
            if let Some(outcome) = terminal {
                self.result.counts.record(outcome);
                test.outcome = outcome;
                test.duration = elapsed_duration(elapsed);
            }
        }
    }

    /// Consumes the aggregator, returning the finished result.
    pub fn finish(self) -> RunResult {
        self.result
    }
}

impl Extend<TestEvent> for EventAggregator {
    fn extend<I: IntoIterator<Item = TestEvent>>(&mut self, iter: I) {
        for event in iter {
            self.add_event(event);
        }
    }
}

/// Converts an elapsed time in seconds into a duration.
///
/// Missing, negative, NaN and overflowing values all become zero.
fn elapsed_duration(elapsed: Option<f64>) -> Duration {
    elapsed
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or_default()
}
