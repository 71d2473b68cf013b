// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the machine-readable output of `go test -json`.
//!
//! `go test -json` (and the underlying `go tool test2json`) writes one JSON object per line, each
//! describing a state transition for a package or a single test. This crate contains the data
//! structures for those lines, along with the documented exit codes of the `testreport` binary.
//!
//! The format is described at <https://pkg.go.dev/cmd/test2json>.

mod errors;
mod event;
mod exit_codes;

pub use errors::*;
pub use event::*;
pub use exit_codes::*;
