use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Line format a command gets when it never configures one
pub const DEFAULT_LINE_FORMAT: &str = "%datetime% [%level_name%]: %message%\n";

/// Extension appended to derived log filenames
pub const DEFAULT_LOG_FILE_EXTENSION: &str = ".log.txt";

/// BaseCmd configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseCmdConfig {
    /// Host settings
    #[serde(default)]
    pub kernel: KernelConfig,
    /// Logging defaults applied to every command
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Host (kernel) settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Directory log files are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

/// Logging defaults
///
/// An empty line format string selects the library's canonical line format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_true")]
    pub log_to_file: bool,
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
    #[serde(default = "default_line_format")]
    pub console_line_format: String,
    #[serde(default = "default_line_format")]
    pub file_line_format: String,
    /// Minimum severity name, e.g. "debug" or "WARNING"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_to_console: default_true(),
            log_to_file: default_true(),
            file_extension: default_file_extension(),
            console_line_format: default_line_format(),
            file_line_format: default_line_format(),
            log_level: default_log_level(),
        }
    }
}

/// Project-level configuration layered over the global one
///
/// Only keys present in the project file replace global values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub kernel: KernelConfig,
    #[serde(default)]
    pub logging: LoggingOverrides,
}

/// Logging keys a project config may set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingOverrides {
    pub log_to_console: Option<bool>,
    pub log_to_file: Option<bool>,
    pub file_extension: Option<String>,
    pub console_line_format: Option<String>,
    pub file_line_format: Option<String>,
    pub log_level: Option<String>,
}

impl LoggingConfig {
    /// Replace the fields `overrides` sets, keep the rest
    pub fn merge(&mut self, overrides: LoggingOverrides) {
        if let Some(value) = overrides.log_to_console {
            self.log_to_console = value;
        }
        if let Some(value) = overrides.log_to_file {
            self.log_to_file = value;
        }
        if let Some(value) = overrides.file_extension {
            self.file_extension = value;
        }
        if let Some(value) = overrides.console_line_format {
            self.console_line_format = value;
        }
        if let Some(value) = overrides.file_line_format {
            self.file_line_format = value;
        }
        if let Some(value) = overrides.log_level {
            self.log_level = value;
        }
    }
}

impl BaseCmdConfig {
    /// Layer a project config over this one
    pub fn merge(&mut self, project: ProjectConfig) {
        if project.kernel.log_dir.is_some() {
            self.kernel.log_dir = project.kernel.log_dir;
        }
        self.logging.merge(project.logging);
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_file_extension() -> String {
    DEFAULT_LOG_FILE_EXTENSION.to_string()
}

fn default_line_format() -> String {
    DEFAULT_LINE_FORMAT.to_string()
}

fn default_log_level() -> String {
    "debug".to_string()
}
