// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{
    Args, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use owo_colors::{OwoColorize, Style, style};
use std::{fmt, io::Write};
use swrite::{SWrite, swrite};
use testreport_engine::reporter::SummaryStyles;
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    level_filters::LevelFilter,
};
use tracing_subscriber::{
    Layer,
    filter::Targets,
    fmt::{FmtContext, FormatEvent, FormatFields, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Styles for `--help` and usage errors.
pub(crate) const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default())
    .error(AnsiColor::Red.on_default().effects(Effects::BOLD));

/// Log lines with this target continue the previous line and get no `error:` heading.
pub(crate) const NO_HEADING_TARGET: &str = "testreport::no_heading";

const LOG_ENV: &str = "TESTREPORT_LOG";

#[derive(Copy, Clone, Debug, Args)]
#[command(next_help_heading = "Output options")]
#[must_use]
pub(crate) struct OutputOpts {
    /// Log debug messages
    #[arg(long, short, global = true, env = "TESTREPORT_VERBOSE")]
    pub(crate) verbose: bool,

    /// Don't print package summaries to stderr
    #[arg(long, short, global = true)]
    pub(crate) quiet: bool,

    /// Produce color output: auto, always, never
    #[arg(
        long,
        value_enum,
        default_value_t,
        hide_possible_values = true,
        global = true,
        value_name = "WHEN",
        env = "TESTREPORT_COLOR"
    )]
    pub(crate) color: Color,
}

impl OutputOpts {
    pub(crate) fn init(self) -> OutputContext {
        init_logger(self.color, self.verbose);
        OutputContext {
            quiet: self.quiet,
            color: self.color,
        }
    }
}

/// Output settings resolved from the command line.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct OutputContext {
    pub(crate) quiet: bool,
    pub(crate) color: Color,
}

impl OutputContext {
    /// Returns styles for error messages.
    pub fn stderr_styles(&self) -> StderrStyles {
        let mut styles = StderrStyles::default();
        if self.color.colorize_stderr() {
            styles.bold = style().bold();
        }
        styles
    }

    /// Returns styles for package summaries, which are printed to stderr.
    pub(crate) fn summary_styles(&self) -> SummaryStyles {
        let mut styles = SummaryStyles::default();
        if self.color.colorize_stderr() {
            styles.colorize();
        }
        styles
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
#[must_use]
pub enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

impl Color {
    fn colorize_stderr(self) -> bool {
        match self {
            Color::Auto => supports_color::on_cached(supports_color::Stream::Stderr).is_some(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

static INIT_LOGGER: std::sync::Once = std::sync::Once::new();

/// Sets up logging to stderr.
///
/// `TESTREPORT_LOG` takes `tracing` target directives, for example `debug` or
/// `testreport=trace`. If it's unset, the level is INFO, or DEBUG with `--verbose`.
fn init_logger(color: Color, verbose: bool) {
    let headings = if color.colorize_stderr() {
        LevelHeadings::colorized()
    } else {
        LevelHeadings::default()
    };

    INIT_LOGGER.call_once(|| {
        let directives = std::env::var(LOG_ENV).unwrap_or_default();
        let targets = if directives.is_empty() {
            let level = if verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            };
            Targets::new().with_default(level)
        } else {
            directives
                .parse()
                .unwrap_or_else(|err| panic!("unable to parse {LOG_ENV}: {err}"))
        };

        let layer = tracing_subscriber::fmt::layer()
            .event_format(HeadingFormatter { headings })
            .with_writer(std::io::stderr)
            .with_filter(targets);
        tracing_subscriber::registry().with(layer).init();
    });
}

/// Formats log events as `{level}: {message}`, with nothing else.
struct HeadingFormatter {
    headings: LevelHeadings,
}

impl<S, N> FormatEvent<S, N> for HeadingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        if metadata.target() != NO_HEADING_TARGET {
            let (heading, style) = self.headings.for_level(*metadata.level());
            write!(writer, "{}: ", heading.style(style))?;
        }

        let mut message = MessageVisitor::default();
        event.record(&mut message);
        writeln!(writer, "{}", message.text)
    }
}

#[derive(Default)]
struct MessageVisitor {
    text: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        // Other fields are never set by this crate.
        if field.name() == "message" {
            swrite!(self.text, "{value:?}");
        }
    }
}

#[derive(Debug, Default)]
struct LevelHeadings {
    error: Style,
    warn: Style,
    other: Style,
}

impl LevelHeadings {
    fn colorized() -> Self {
        Self {
            error: style().red().bold(),
            warn: style().yellow().bold(),
            other: style().bold(),
        }
    }

    fn for_level(&self, level: Level) -> (&'static str, Style) {
        match level {
            Level::ERROR => ("error", self.error),
            Level::WARN => ("warning", self.warn),
            Level::INFO => ("info", self.other),
            Level::DEBUG => ("debug", self.other),
            Level::TRACE => ("trace", self.other),
        }
    }
}

/// Styles for error messages.
#[derive(Debug, Default)]
pub struct StderrStyles {
    pub(crate) bold: Style,
}

/// Where the report and package summaries go.
///
/// The capturing variant only exists in unit tests.
#[derive(Default)]
pub enum OutputWriter {
    /// The process's stdout and stderr.
    #[default]
    Normal,
    /// In-memory buffers.
    #[cfg(test)]
    Test {
        /// Everything written to stdout.
        stdout: Vec<u8>,
        /// Everything written to stderr.
        stderr: Vec<u8>,
    },
}

impl OutputWriter {
    pub(crate) fn stdout_writer(&mut self) -> Box<dyn Write + '_> {
        match self {
            Self::Normal => Box::new(std::io::stdout().lock()),
            #[cfg(test)]
            Self::Test { stdout, .. } => Box::new(stdout),
        }
    }

    pub(crate) fn stderr_writer(&mut self) -> Box<dyn Write + '_> {
        match self {
            Self::Normal => Box::new(std::io::stderr().lock()),
            #[cfg(test)]
            Self::Test { stderr, .. } => Box::new(stderr),
        }
    }
}
