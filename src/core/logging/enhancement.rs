use super::formatter::LineFormat;
use super::handler::Handler;
use super::level::Level;
use super::logger::Logger;
use crate::cli::output::ConsoleOutput;
use crate::domain::config::LoggingConfig;
use crate::domain::error::{BaseCmdError, BaseCmdResult};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Base name used when a command does not report its source file
pub const FALLBACK_LOG_BASENAME: &str = "console";

/// Whether logging settings may still change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    Configurable,
    Locked,
}

/// Per-command logging settings, frozen once the logger exists
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    log_to_console: bool,
    log_to_file: bool,
    log_filename: Option<String>,
    default_log_file_extension: String,
    console_line_format: LineFormat,
    file_line_format: LineFormat,
    log_level: Level,
    state: ConfigState,
}

impl RuntimeConfig {
    /// Build from configured defaults. An unknown level name falls back to DEBUG.
    pub fn from_defaults(defaults: &LoggingConfig) -> Self {
        let log_level = defaults.log_level.parse().unwrap_or_else(|_| {
            tracing::warn!(level = %defaults.log_level, "unknown log level in config, using DEBUG");
            Level::Debug
        });

        Self {
            log_to_console: defaults.log_to_console,
            log_to_file: defaults.log_to_file,
            log_filename: None,
            default_log_file_extension: defaults.file_extension.clone(),
            console_line_format: LineFormat::from_config(&defaults.console_line_format),
            file_line_format: LineFormat::from_config(&defaults.file_line_format),
            log_level,
            state: ConfigState::Configurable,
        }
    }

    pub fn state(&self) -> ConfigState {
        self.state
    }

    fn ensure_configurable(&self, setting: &'static str) -> BaseCmdResult<()> {
        match self.state {
            ConfigState::Configurable => Ok(()),
            ConfigState::Locked => Err(BaseCmdError::LockedConfiguration { setting }),
        }
    }

    fn lock(&mut self) {
        self.state = ConfigState::Locked;
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_defaults(&LoggingConfig::default())
    }
}

/// Gives a command its own logger with console and file output.
///
/// Settings are changed during `configure`. The logger is built once in
/// [`LoggingEnhancement::initialize`], and from then on every setter fails with
/// [`BaseCmdError::LockedConfiguration`]. The log level is the exception: it
/// can still be changed at runtime, and the change is itself logged.
#[derive(Debug)]
pub struct LoggingEnhancement {
    channel: String,
    source_file: Option<&'static str>,
    log_dir: PathBuf,
    config: RuntimeConfig,
    logger: Option<Arc<Logger>>,
}

impl LoggingEnhancement {
    pub fn new(
        channel: impl Into<String>,
        source_file: Option<&'static str>,
        log_dir: impl Into<PathBuf>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            channel: channel.into(),
            source_file,
            log_dir: log_dir.into(),
            config,
            logger: None,
        }
    }

    /// The command's logger. Fails until [`initialize`](Self::initialize) has run.
    pub fn get_logger(&self) -> BaseCmdResult<Arc<Logger>> {
        self.logger.clone().ok_or(BaseCmdError::UninitializedLogger)
    }

    pub fn is_locked(&self) -> bool {
        self.config.state() == ConfigState::Locked
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn set_log_to_console(&mut self, enabled: bool) -> BaseCmdResult<()> {
        self.config.ensure_configurable("log to console")?;
        self.config.log_to_console = enabled;
        Ok(())
    }

    pub fn is_log_to_console(&self) -> bool {
        self.config.log_to_console
    }

    pub fn set_log_to_file(&mut self, enabled: bool) -> BaseCmdResult<()> {
        self.config.ensure_configurable("log to file")?;
        self.config.log_to_file = enabled;
        Ok(())
    }

    pub fn is_log_to_file(&self) -> bool {
        self.config.log_to_file
    }

    /// Use `filename` inside the log directory instead of the derived name.
    /// Only a bare file name is accepted, never a path.
    pub fn set_log_filename(&mut self, filename: impl Into<String>) -> BaseCmdResult<()> {
        self.config.ensure_configurable("log filename")?;
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(BaseCmdError::InvalidInput("Log filename cannot be empty".to_string()));
        }
        if Path::new(&filename).file_name() != Some(OsStr::new(&filename)) {
            return Err(BaseCmdError::InvalidInput(format!(
                "Log filename must be a plain file name: {}",
                filename
            )));
        }
        self.config.log_filename = Some(filename);
        Ok(())
    }

    /// Explicit filename, or one derived from the command's source file.
    /// With `full_path` the name is joined onto the log directory.
    pub fn get_log_filename(&self, full_path: bool) -> PathBuf {
        let filename = match &self.config.log_filename {
            Some(name) => name.clone(),
            None => self.derived_log_filename(),
        };

        if full_path {
            self.log_dir.join(filename)
        } else {
            PathBuf::from(filename)
        }
    }

    fn derived_log_filename(&self) -> String {
        let base = self
            .source_file
            .and_then(|file| Path::new(file).file_name())
            .and_then(|name| name.to_str())
            .unwrap_or(FALLBACK_LOG_BASENAME);

        format!("{}{}", base, self.config.default_log_file_extension)
    }

    pub fn set_default_log_file_extension(&mut self, extension: impl Into<String>) -> BaseCmdResult<()> {
        self.config.ensure_configurable("default log file extension")?;
        self.config.default_log_file_extension = extension.into();
        Ok(())
    }

    pub fn get_default_log_file_extension(&self) -> &str {
        &self.config.default_log_file_extension
    }

    /// `None` selects the library's default line format
    pub fn set_console_log_line_format(&mut self, format: Option<&str>) -> BaseCmdResult<()> {
        self.config.ensure_configurable("console log line format")?;
        self.config.console_line_format = LineFormat::from_option(format);
        Ok(())
    }

    pub fn console_log_line_format(&self) -> &LineFormat {
        &self.config.console_line_format
    }

    /// `None` selects the library's default line format
    pub fn set_file_log_line_format(&mut self, format: Option<&str>) -> BaseCmdResult<()> {
        self.config.ensure_configurable("file log line format")?;
        self.config.file_line_format = LineFormat::from_option(format);
        Ok(())
    }

    pub fn file_log_line_format(&self) -> &LineFormat {
        &self.config.file_line_format
    }

    pub fn log_level(&self) -> Level {
        self.config.log_level
    }

    /// Change the minimum severity of every handler.
    ///
    /// After initialisation the change is applied to the live logger and
    /// recorded as `LOG LEVEL CHANGED: OLD -> NEW`, at a severity the new level
    /// still lets through.
    pub fn set_log_level(&mut self, level: Level) -> BaseCmdResult<()> {
        let previous = self.config.log_level;

        if let Some(logger) = &self.logger {
            logger.set_level(level)?;
            self.config.log_level = level;
            tracing::debug!(channel = %self.channel, from = %previous, to = %level, "log level changed");
            logger.log(
                level.max(Level::Info),
                format!("LOG LEVEL CHANGED: {} -> {}", previous, level),
            );
        } else {
            self.config.log_level = level;
        }
        Ok(())
    }

    /// Build the logger and lock the configuration
    pub fn initialize(&mut self, output: &ConsoleOutput) -> BaseCmdResult<()> {
        if self.is_locked() {
            return Err(BaseCmdError::AlreadyInitialised);
        }

        let mut handlers = Vec::with_capacity(2);

        if self.config.log_to_console {
            handlers.push(Handler::console(
                output.clone(),
                self.config.log_level,
                self.config.console_line_format.formatter(),
            ));
        }

        if self.config.log_to_file {
            let path = self.get_log_filename(true);
            handlers.push(Handler::file(
                &path,
                self.config.log_level,
                self.config.file_line_format.formatter(),
            )?);
        }

        let logger = Logger::with_handlers(self.channel.as_str(), handlers);

        tracing::debug!(
            channel = %self.channel,
            handlers = logger.handler_count(),
            level = %self.config.log_level,
            "command logger initialised"
        );

        self.logger = Some(Arc::new(logger));
        self.config.lock();
        Ok(())
    }
}
