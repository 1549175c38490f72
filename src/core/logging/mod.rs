// Logging module - Per-command loggers built on tracing layers, and line formatters
pub mod enhancement;
pub mod formatter;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;

pub use enhancement::{ConfigState, LoggingEnhancement, RuntimeConfig};
pub use formatter::{DefaultFormatter, LineFormat, LineFormatter, TemplateFormatter};
pub use handler::{Handler, HandlerTarget, LineEventFormat, SeverityFilter};
pub use level::Level;
pub use logger::Logger;
pub use record::Record;
