use super::formatter::LineFormatter;
use super::level::Level;
use super::record::Record;
use crate::cli::output::ConsoleOutput;
use crate::domain::error::{BaseCmdError, BaseCmdResult};
use std::fmt::{self, Write as _};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Event, Metadata, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self as tracing_fmt, FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::{Context, Filter, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{reload, Registry};

/// Layer type every handler is boxed into
pub type HandlerLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Moves a handler's minimum severity while the logger is live
pub type LevelHandle = reload::Handle<SeverityFilter, Registry>;

/// Per-handler filter on record severity
#[derive(Debug, Clone, Copy)]
pub struct SeverityFilter {
    threshold: Level,
}

impl SeverityFilter {
    pub fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Level) {
        self.threshold = threshold;
    }

    fn accepts(&self, metadata: &Metadata<'_>) -> bool {
        Level::from_target(metadata.target()).is_some_and(|level| level >= self.threshold)
    }
}

impl<S> Filter<S> for SeverityFilter {
    fn enabled(&self, metadata: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.accepts(metadata)
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(LevelFilter::from_level(self.threshold.tracing_level()))
    }
}

/// Renders each event as one line of a [`LineFormatter`]
pub struct LineEventFormat {
    formatter: Box<dyn LineFormatter>,
}

impl LineEventFormat {
    pub fn new(formatter: Box<dyn LineFormatter>) -> Self {
        Self { formatter }
    }
}

impl<S, N> FormatEvent<S, N> for LineEventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, _ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let Some(record) = Record::from_event(event) else {
            return Ok(());
        };

        let line = self.formatter.format(&record);
        writer.write_str(&line)?;
        if !line.ends_with('\n') {
            writer.write_char('\n')?;
        }
        Ok(())
    }
}

/// Where a handler writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerTarget {
    Console,
    File(PathBuf),
}

/// One output of a command logger: a formatting layer plus the handle that
/// moves its severity threshold
pub struct Handler {
    target: HandlerTarget,
    layer: HandlerLayer,
    level: LevelHandle,
}

impl Handler {
    /// Writes formatted lines to a console stream
    pub fn console(output: ConsoleOutput, level: Level, formatter: Box<dyn LineFormatter>) -> Self {
        Self::build(HandlerTarget::Console, output, level, formatter)
    }

    /// Appends formatted lines to `path`, creating the file and its directory if needed
    pub fn file(path: &Path, level: Level, formatter: Box<dyn LineFormatter>) -> BaseCmdResult<Self> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| BaseCmdError::InvalidInput(format!("Not a log file path: {}", path.display())))?;
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(filename)
            .build(dir)
            .map_err(|e| BaseCmdError::FileSystem {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, e),
            })?;

        tracing::debug!(path = %path.display(), "log file opened");

        Ok(Self::build(HandlerTarget::File(path.to_path_buf()), appender, level, formatter))
    }

    fn build<W>(target: HandlerTarget, writer: W, level: Level, formatter: Box<dyn LineFormatter>) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let (filter, level) = reload::Layer::new(SeverityFilter::new(level));
        let layer = tracing_fmt::layer()
            .with_ansi(false)
            .event_format(LineEventFormat::new(formatter))
            .with_writer(writer)
            .with_filter(filter)
            .boxed();

        Self { target, layer, level }
    }

    pub fn target(&self) -> &HandlerTarget {
        &self.target
    }

    pub(crate) fn into_parts(self) -> (HandlerTarget, HandlerLayer, LevelHandle) {
        (self.target, self.layer, self.level)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("target", &self.target).finish()
    }
}
