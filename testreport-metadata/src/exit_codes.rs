// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `testreport` failures.
///
/// `testreport` may fail for a variety of reasons. This structure documents the exit codes that may
/// occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum TestReportExitCode {}

impl TestReportExitCode {
    /// No errors occurred and `testreport` exited normally.
    pub const OK: i32 = 0;

    /// One or more packages in the report failed, and the exit policy asked for a failing exit
    /// code.
    ///
    /// This matches the exit code of `go test` itself.
    pub const TEST_RUN_FAILED: i32 = 1;

    /// A user issue happened while setting up a `testreport` invocation: for example, the
    /// variables string was malformed or an input or output file could not be opened.
    pub const SETUP_ERROR: i32 = 96;

    /// The input stream could not be read or contained a line that is not a test event.
    pub const INPUT_PARSE_FAILED: i32 = 104;

    /// The report template could not be loaded, parsed or rendered.
    pub const TEMPLATE_FAILED: i32 = 105;

    /// Writing data to the output or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
