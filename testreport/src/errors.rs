// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::error::Error;
use testreport_engine::errors::{
    ParseEventsError, TemplateError, VariablesParseError, WriteReportError,
};
use testreport_metadata::TestReportExitCode;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected failure of a testreport invocation.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("failed to parse variables")]
    VariablesParseError {
        #[from]
        err: VariablesParseError,
    },
    #[error("failed to load template")]
    TemplateLoadError {
        #[from]
        err: TemplateError,
    },
    #[error("failed to open input file")]
    InputOpenError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to parse input")]
    ParseEventsError {
        input: String,
        #[source]
        err: ParseEventsError,
    },
    #[error("failed to open output file")]
    OutputOpenError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to write report")]
    WriteReportError {
        output: String,
        #[source]
        err: WriteReportError,
    },
    #[error("failed to write package summaries")]
    WriteSummaryError {
        #[source]
        err: std::io::Error,
    },
    #[error("test run failed")]
    TestRunFailed { failed_packages: usize },
}

impl ExpectedError {
    pub(crate) fn input_open_error(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::InputOpenError {
            path: path.into(),
            err,
        }
    }

    pub(crate) fn parse_events_error(input: impl Into<String>, err: ParseEventsError) -> Self {
        Self::ParseEventsError {
            input: input.into(),
            err,
        }
    }

    pub(crate) fn output_open_error(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::OutputOpenError {
            path: path.into(),
            err,
        }
    }

    pub(crate) fn write_report_error(output: impl Into<String>, err: WriteReportError) -> Self {
        Self::WriteReportError {
            output: output.into(),
            err,
        }
    }

    pub(crate) fn test_run_failed(failed_packages: usize) -> Self {
        Self::TestRunFailed { failed_packages }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::VariablesParseError { .. }
            | Self::InputOpenError { .. }
            | Self::OutputOpenError { .. } => TestReportExitCode::SETUP_ERROR,
            Self::TemplateLoadError { .. } => TestReportExitCode::TEMPLATE_FAILED,
            Self::ParseEventsError { .. } => TestReportExitCode::INPUT_PARSE_FAILED,
            Self::WriteReportError { err, .. } => match err {
                WriteReportError::Render(_) => TestReportExitCode::TEMPLATE_FAILED,
                WriteReportError::Io(_) => TestReportExitCode::WRITE_OUTPUT_ERROR,
            },
            Self::WriteSummaryError { .. } => TestReportExitCode::WRITE_OUTPUT_ERROR,
            Self::TestRunFailed { .. } => TestReportExitCode::TEST_RUN_FAILED,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::VariablesParseError { err } => {
                // The parse error already describes the expected format.
                error!("{err}");
                None
            }
            Self::TemplateLoadError { err } => {
                error!("{err}");
                err.source()
            }
            Self::InputOpenError { path, err } => {
                error!("failed to open input file `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::ParseEventsError { input, err } => {
                error!("failed to parse test events from {}", input.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::OutputOpenError { path, err } => {
                error!("failed to open output file `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::WriteReportError { output, err } => {
                error!("failed to write report to {}", output.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::WriteSummaryError { err } => {
                error!("failed to write package summaries to stderr");
                Some(err as &dyn Error)
            }
            Self::TestRunFailed { failed_packages } => {
                let packages_str = if *failed_packages == 1 {
                    "package"
                } else {
                    "packages"
                };
                error!(
                    "test run failed: {} {packages_str} failed",
                    failed_packages.style(styles.bold)
                );
                None
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
