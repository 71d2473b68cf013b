// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// An error that occurs while decoding a single line of `go test -json` output.
///
/// Returned by [`TestEvent::parse_line`](crate::TestEvent::parse_line).
#[derive(Debug, Error)]
#[error("line is not a valid test event")]
pub struct DecodeError {
    #[from]
    err: serde_json::Error,
}

impl DecodeError {
    /// Returns the column at which decoding failed, as reported by the JSON parser.
    pub fn column(&self) -> usize {
        self.err.column()
    }
}
