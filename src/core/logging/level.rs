use crate::domain::error::BaseCmdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// Numeric severity code (100 for DEBUG up to 600 for EMERGENCY)
    pub fn code(self) -> u16 {
        match self {
            Level::Debug => 100,
            Level::Info => 200,
            Level::Notice => 250,
            Level::Warning => 300,
            Level::Error => 400,
            Level::Critical => 500,
            Level::Alert => 550,
            Level::Emergency => 600,
        }
    }

    /// Upper-case name as it appears in log lines
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Alert => "ALERT",
            Level::Emergency => "EMERGENCY",
        }
    }

    /// `tracing` target command loggers emit records of this severity under
    pub const fn target(self) -> &'static str {
        match self {
            Level::Debug => "basecmd::record::debug",
            Level::Info => "basecmd::record::info",
            Level::Notice => "basecmd::record::notice",
            Level::Warning => "basecmd::record::warning",
            Level::Error => "basecmd::record::error",
            Level::Critical => "basecmd::record::critical",
            Level::Alert => "basecmd::record::alert",
            Level::Emergency => "basecmd::record::emergency",
        }
    }

    pub fn from_target(target: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.target() == target)
    }

    /// Closest `tracing` level; NOTICE and everything above ERROR share one
    pub const fn tracing_level(self) -> tracing::Level {
        match self {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info | Level::Notice => tracing::Level::INFO,
            Level::Warning => tracing::Level::WARN,
            Level::Error | Level::Critical | Level::Alert | Level::Emergency => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = BaseCmdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BaseCmdError::InvalidInput(format!("Unknown log level: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warning < Level::Error);
        assert_eq!(Level::ALL.iter().max(), Some(&Level::Emergency));
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("EMERGENCY".parse::<Level>().unwrap(), Level::Emergency);
        assert_eq!(" Notice ".parse::<Level>().unwrap(), Level::Notice);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_codes() {
        assert_eq!(Level::Debug.code(), 100);
        assert_eq!(Level::Warning.code(), 300);
        assert_eq!(Level::Emergency.code(), 600);
        assert_eq!(Level::Warning.to_string(), "WARNING");
    }

    #[test]
    fn test_level_targets() {
        for level in Level::ALL {
            assert_eq!(Level::from_target(level.target()), Some(level));
        }
        assert_eq!(Level::from_target("basecmd::core::kernel"), None);
        assert_eq!(Level::Notice.tracing_level(), tracing::Level::INFO);
        assert_eq!(Level::Alert.tracing_level(), tracing::Level::ERROR);
    }
}
