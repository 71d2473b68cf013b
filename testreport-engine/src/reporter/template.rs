// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    context::ReportContext,
    escape::{escape_html, escape_markdown},
};
use crate::{
    errors::{TemplateError, WriteReportError},
    result::RunResult,
};
use camino::Utf8Path;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::{fmt, io::Write};

const MARKDOWN_NAME: &str = "markdown.md.j2";
const MARKDOWN_SOURCE: &str = include_str!("../../templates/markdown.md.j2");
const HTML_NAME: &str = "report.html.j2";
const HTML_SOURCE: &str = include_str!("../../templates/report.html.j2");

/// The built-in report formats.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReportFormat {
    /// A Markdown document with collapsible HTML sections, suitable for job summaries and pull
    /// request comments.
    #[default]
    Markdown,

    /// A standalone HTML page.
    Html,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// A compiled report template.
///
/// Templates use [Jinja2 syntax](https://docs.rs/minijinja) and are rendered against a
/// [`ReportContext`]. All templates, built-in or not, are set up the same way:
///
/// * `escape_markdown` and `escape_html` are available both as filters and as functions;
/// * output is never escaped automatically;
/// * referencing an undefined field or variable is an error;
/// * the first newline after a block tag is removed, as is whitespace before it on the same line.
pub struct ReportTemplate {
    env: Environment<'static>,
    name: String,
}

impl ReportTemplate {
    /// Returns the built-in Markdown template.
    pub fn markdown() -> Self {
        Self::from_source(MARKDOWN_NAME, MARKDOWN_SOURCE)
            .expect("built-in markdown template is valid")
    }

    /// Returns the built-in HTML template.
    pub fn html() -> Self {
        Self::from_source(HTML_NAME, HTML_SOURCE).expect("built-in html template is valid")
    }

    /// Returns the built-in template for the given format.
    pub fn builtin(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Markdown => Self::markdown(),
            ReportFormat::Html => Self::html(),
        }
    }

    /// Reads and compiles a template from a file.
    ///
    /// The template is named after the file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|error| TemplateError::Read {
            path: path.to_owned(),
            error,
        })?;
        let name = path.file_name().unwrap_or(path.as_str());
        Self::from_source(name, source)
    }

    /// Compiles a template from source.
    pub fn from_source(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        let mut env = new_environment();
        env.add_template_owned(name.clone(), source.into())
            .map_err(|error| TemplateError::Parse {
                name: name.clone(),
                error,
            })?;
        Ok(Self { env, name })
    }

    /// Returns the name of this template.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders a report for a finished result.
    pub fn render(&self, result: &RunResult) -> Result<String, TemplateError> {
        let render_err = |error| TemplateError::Render {
            name: self.name.clone(),
            error,
        };
        let template = self.env.get_template(&self.name).map_err(render_err)?;
        template
            .render(ReportContext::new(result))
            .map_err(render_err)
    }

    /// Renders a report for a finished result and writes it out.
    ///
    /// Nothing is written if rendering fails.
    pub fn render_to(
        &self,
        result: &RunResult,
        mut writer: impl Write,
    ) -> Result<(), WriteReportError> {
        let report = self.render(result).map_err(WriteReportError::Render)?;
        writer
            .write_all(report.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(WriteReportError::Io)
    }
}

impl fmt::Debug for ReportTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn new_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    env.add_filter("escape_markdown", escape_markdown_value);
    env.add_function("escape_markdown", escape_markdown_value);
    env.add_filter("escape_html", escape_html_value);
    env.add_function("escape_html", escape_html_value);
    env
}

fn escape_markdown_value(value: &str) -> String {
    escape_markdown(value).into_owned()
}

fn escape_html_value(value: &str) -> String {
    escape_html(value).into_owned()
}
