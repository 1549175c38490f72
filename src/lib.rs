//! BaseCmd Library
//!
//! Console command toolkit giving every command its own logger with console
//! and file output, configurable line formats and a configuration lock once
//! the command starts executing.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::command::{Command, CommandRunner, ExecutionContext};
pub use crate::core::kernel::Kernel;
pub use crate::core::logging::{Level, LineFormat, Logger, LoggingEnhancement};
pub use cli::output::ConsoleOutput;
pub use domain::config::BaseCmdConfig;
pub use domain::error::{BaseCmdError, BaseCmdResult};
