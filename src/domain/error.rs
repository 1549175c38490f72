use std::path::PathBuf;
use thiserror::Error;

/// BaseCmd unified error type
#[derive(Error, Debug)]
pub enum BaseCmdError {
    #[error("Cannot access logger. It is not yet initialised.")]
    UninitializedLogger,

    #[error("Cannot change {setting}. The logger has already been initialised.")]
    LockedConfiguration { setting: &'static str },

    #[error("Logger already initialised for this command")]
    AlreadyInitialised,

    #[error("Log file error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    Execution(String),
}

pub type BaseCmdResult<T> = Result<T, BaseCmdError>;
