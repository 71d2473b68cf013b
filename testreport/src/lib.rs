// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generate Markdown and HTML reports from `go test -json` output.
//!
//! Pipe the output of `go test -json` into `testreport`:
//!
//! ```sh
//! go test -json ./... | testreport --output report.md
//! ```
//!
//! The report is appended to the output file, or written to stdout if `--output` is not given.
//! A `go test`-style summary of each package is printed to stderr.
//!
//! The core logic lives in [testreport-engine](https://docs.rs/testreport-engine); this crate
//! only handles the command line.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
