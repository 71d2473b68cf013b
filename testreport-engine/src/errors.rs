// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by testreport.

use camino::Utf8PathBuf;
use std::{fmt, io};
use testreport_metadata::DecodeError;
use thiserror::Error;

/// An error that occurred while reading a stream of test events.
///
/// Aggregation stops at the first error, and no partial result is returned.
#[derive(Debug, Error)]
pub enum ParseEventsError {
    /// The input stream could not be read.
    #[error("failed to read line {line_number} of the input")]
    Read {
        /// The 1-based number of the line that could not be read.
        line_number: usize,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// A line could not be decoded into a test event.
    #[error("failed to decode line {line_number} of the input")]
    Decode {
        /// The 1-based number of the line that failed to decode.
        line_number: usize,

        /// The underlying error.
        #[source]
        error: DecodeError,
    },
}

impl ParseEventsError {
    /// Returns the 1-based line number at which the error occurred.
    pub fn line_number(&self) -> usize {
        match self {
            Self::Read { line_number, .. } | Self::Decode { line_number, .. } => *line_number,
        }
    }
}

/// An error that occurs while parsing [`TemplateVars`](crate::vars::TemplateVars) from a string.
#[derive(Clone, Debug, Error)]
pub struct VariablesParseError {
    item: String,
    kind: VariablesParseErrorKind,
}

impl VariablesParseError {
    pub(crate) fn new(item: impl Into<String>, kind: VariablesParseErrorKind) -> Self {
        Self {
            item: item.into(),
            kind,
        }
    }

    /// Returns the comma-separated item that failed to parse.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Returns the reason the item failed to parse.
    pub fn kind(&self) -> &VariablesParseErrorKind {
        &self.kind
    }
}

impl fmt::Display for VariablesParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "variables must be in the format \"key:value,key=value\":\n\
             item `{}`: {}",
            self.item, self.kind
        )
    }
}

/// The reason a [`VariablesParseError`] occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum VariablesParseErrorKind {
    /// The item did not contain exactly one `:` or `=`.
    ExpectedOneSeparator,

    /// The key was empty.
    EmptyKey,

    /// The key was already specified by an earlier item.
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}

impl fmt::Display for VariablesParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ExpectedOneSeparator => write!(f, "expected exactly one `:` or `=`"),
            Self::EmptyKey => write!(f, "key must not be empty"),
            Self::DuplicateKey { key } => write!(f, "key `{key}` specified more than once"),
        }
    }
}

/// An error that occurred while loading or rendering a report template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read template at `{path}`")]
    Read {
        /// The path to the template.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The template source could not be parsed.
    #[error("failed to parse template `{name}`")]
    Parse {
        /// The name of the template.
        name: String,

        /// The underlying error.
        #[source]
        error: minijinja::Error,
    },

    /// The template could not be rendered.
    ///
    /// This includes references to fields or variables that do not exist.
    #[error("failed to render template `{name}`")]
    Render {
        /// The name of the template.
        name: String,

        /// The underlying error.
        #[source]
        error: minijinja::Error,
    },
}

/// An error that occurred while writing a report.
#[derive(Debug, Error)]
pub enum WriteReportError {
    /// The report could not be rendered.
    #[error("failed to render report")]
    Render(#[source] TemplateError),

    /// The rendered report could not be written out.
    #[error("failed to write report")]
    Io(#[source] io::Error),
}
