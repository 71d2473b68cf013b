// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::DecodeError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A single line of `go test -json` output.
///
/// Every field is optional on the wire, and absent or `null` fields take their zero value. Field
/// names are accepted both in the capitalized form that `test2json` emits (`"Package"`) and in
/// lower case (`"package"`). Serialization always uses the capitalized form and omits zero-valued
/// fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TestEvent {
    /// The time at which the event was generated.
    #[serde(
        rename = "Time",
        alias = "time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<DateTime<FixedOffset>>,

    /// The transition this event describes.
    #[serde(
        rename = "Action",
        alias = "action",
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "TestAction::is_unknown"
    )]
    pub action: TestAction,

    /// The import path of the package this event concerns.
    #[serde(
        rename = "Package",
        alias = "package",
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub package: String,

    /// The test this event concerns.
    ///
    /// Empty if the event concerns the package as a whole.
    #[serde(
        rename = "Test",
        alias = "test",
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub test: String,

    /// Elapsed time in seconds. Only set for terminal actions.
    #[serde(
        rename = "Elapsed",
        alias = "elapsed",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub elapsed: Option<f64>,

    /// Output text. Only set for [`TestAction::Output`], and usually newline-terminated.
    #[serde(
        rename = "Output",
        alias = "output",
        default,
        deserialize_with = "deserialize_null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub output: String,
}

impl TestEvent {
    /// Decodes a single line of `go test -json` output.
    ///
    /// Unrecognized actions decode to [`TestAction::Unknown`]. Only input that is not a JSON object
    /// of the right shape produces an error.
    pub fn parse_line(line: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Encodes this event as a single line of JSON, without a trailing newline.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).expect("serializing a test event is infallible")
    }

    /// Returns true if this event concerns a package as a whole, rather than a single test.
    pub fn is_package_scoped(&self) -> bool {
        self.test.is_empty()
    }
}

/// Deserializes `null` the same way as an absent field.
fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl FromStr for TestEvent {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

/// The action described by a [`TestEvent`].
///
/// Action tokens are case-sensitive. Any token not listed here, as well as a missing action,
/// becomes [`Unknown`](Self::Unknown).
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum TestAction {
    /// The test binary is about to be executed.
    Start,

    /// The test has started running.
    Run,

    /// The test has been paused.
    Pause,

    /// The test has continued running.
    Cont,

    /// The test passed.
    Pass,

    /// The benchmark printed log output but did not fail.
    Bench,

    /// The test or benchmark failed.
    Fail,

    /// The test printed output.
    Output,

    /// The test was skipped or the package contained no tests.
    Skip,

    /// The action was missing or not recognized.
    #[default]
    #[serde(other)]
    Unknown,
}

impl TestAction {
    /// Returns the wire token for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Run => "run",
            Self::Pause => "pause",
            Self::Cont => "cont",
            Self::Pass => "pass",
            Self::Bench => "bench",
            Self::Fail => "fail",
            Self::Output => "output",
            Self::Skip => "skip",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true if this is [`TestAction::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for TestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
