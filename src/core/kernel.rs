use crate::domain::config::{BaseCmdConfig, LoggingConfig};
use crate::domain::error::{BaseCmdError, BaseCmdResult};
use std::path::{Path, PathBuf};

/// Host environment shared by all commands: where logs go and which logging
/// defaults new commands start from.
#[derive(Debug, Clone)]
pub struct Kernel {
    log_dir: PathBuf,
    logging: LoggingConfig,
}

impl Kernel {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            logging: LoggingConfig::default(),
        }
    }

    /// Use the configured log directory, or `var/logs` under the working directory
    pub fn from_config(config: &BaseCmdConfig) -> BaseCmdResult<Self> {
        let log_dir = match &config.kernel.log_dir {
            Some(dir) => dir.clone(),
            None => Self::default_log_dir()?,
        };

        Ok(Self {
            log_dir,
            logging: config.logging.clone(),
        })
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn logging_defaults(&self) -> &LoggingConfig {
        &self.logging
    }

    fn default_log_dir() -> BaseCmdResult<PathBuf> {
        let cwd = std::env::current_dir().map_err(|e| BaseCmdError::Config {
            message: format!("Could not determine working directory: {}", e),
        })?;
        Ok(cwd.join("var").join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_log_dir() {
        let mut config = BaseCmdConfig::default();
        config.kernel.log_dir = Some(PathBuf::from("/tmp/basecmd-logs"));
        config.logging.log_to_console = false;

        let kernel = Kernel::from_config(&config).unwrap();
        assert_eq!(kernel.log_dir(), Path::new("/tmp/basecmd-logs"));
        assert!(!kernel.logging_defaults().log_to_console);
    }

    #[test]
    fn test_default_log_dir() {
        let kernel = Kernel::from_config(&BaseCmdConfig::default()).unwrap();
        assert!(kernel.log_dir().ends_with("var/logs"));
    }

    #[test]
    fn test_with_logging_overrides_defaults() {
        let logging = LoggingConfig {
            log_to_file: false,
            ..LoggingConfig::default()
        };
        let kernel = Kernel::new("/tmp/logs").with_logging(logging);

        assert!(!kernel.logging_defaults().log_to_file);
        assert_eq!(kernel.log_dir(), Path::new("/tmp/logs"));
    }
}
