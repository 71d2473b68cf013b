// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders a finished [`RunResult`](crate::result::RunResult) into a report.
//!
//! The main type here is [`ReportTemplate`], which renders a [`ReportContext`] built from the
//! result. Rendering never changes the result, so the same result can be rendered any number of
//! times, with any template.

mod context;
mod duration;
mod escape;
mod summary;
mod template;

pub use context::*;
pub use duration::DisplayDurationSecs;
pub use escape::{NBSP, escape_html, escape_markdown};
pub use summary::*;
pub use template::*;
