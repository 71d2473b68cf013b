// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [testreport](https://crates.io/crates/testreport): aggregating `go test
//! -json` output into a tree of package and test results, and rendering that tree as a report.
//!
//! The basic flow is:
//!
//! 1. [`aggregate_events`](aggregator::aggregate_events) reads newline-delimited
//!    [`TestEvent`](testreport_metadata::TestEvent)s and folds them into a
//!    [`RunResult`](result::RunResult).
//! 2. Optionally, [`TemplateVars`](vars::TemplateVars) are attached to the result.
//! 3. A [`ReportTemplate`](reporter::ReportTemplate) renders the result.

pub mod aggregator;
pub mod errors;
pub mod reporter;
pub mod result;
pub mod status;
pub mod vars;
