use super::handler::{Handler, HandlerTarget, LevelHandle};
use super::level::Level;
use super::record::{map_field, Record};
use crate::domain::error::{BaseCmdError, BaseCmdResult};
use serde_json::{Map, Value};
use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::layer::SubscriberExt as _;

// Target and level must be constant per callsite, so every severity gets its own event site
macro_rules! emit_record {
    ($severity:expr, $record:ident, $datetime:ident, $context:ident, $extra:ident) => {
        tracing::event!(
            target: $severity.target(),
            $severity.tracing_level(),
            channel = $record.channel.as_str(),
            datetime = %$datetime,
            context = %$context,
            extra = %$extra,
            "{}",
            $record.message
        )
    };
}

/// Named logging channel dispatching to its own set of handlers
///
/// Each logger owns a private `tracing` dispatcher, so records never reach the
/// process-wide subscriber. A logger without handlers accepts records and drops them.
pub struct Logger {
    name: String,
    dispatch: Dispatch,
    targets: Vec<HandlerTarget>,
    levels: Vec<LevelHandle>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_handlers(name, Vec::new())
    }

    pub fn with_handlers(name: impl Into<String>, handlers: Vec<Handler>) -> Self {
        let mut targets = Vec::with_capacity(handlers.len());
        let mut layers = Vec::with_capacity(handlers.len());
        let mut levels = Vec::with_capacity(handlers.len());

        for handler in handlers {
            let (target, layer, level) = handler.into_parts();
            targets.push(target);
            layers.push(layer);
            levels.push(level);
        }

        Self {
            name: name.into(),
            dispatch: Dispatch::new(tracing_subscriber::registry().with(layers)),
            targets,
            levels,
        }
    }

    /// Channel name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler_count(&self) -> usize {
        self.targets.len()
    }

    pub fn handler_targets(&self) -> &[HandlerTarget] {
        &self.targets
    }

    /// Apply a new minimum severity to every handler
    pub fn set_level(&self, level: Level) -> BaseCmdResult<()> {
        for handle in &self.levels {
            handle.modify(|filter| filter.set_threshold(level)).map_err(|e| {
                BaseCmdError::Execution(format!("Cannot change level of logger '{}': {}", self.name, e))
            })?;
        }
        Ok(())
    }

    /// Pass a record to every handler accepting its level
    pub fn add_record(&self, record: &Record) {
        let datetime = record.datetime.to_rfc3339();
        let context = map_field(&record.context);
        let extra = map_field(&record.extra);

        dispatcher::with_default(&self.dispatch, || match record.level {
            Level::Debug => emit_record!(Level::Debug, record, datetime, context, extra),
            Level::Info => emit_record!(Level::Info, record, datetime, context, extra),
            Level::Notice => emit_record!(Level::Notice, record, datetime, context, extra),
            Level::Warning => emit_record!(Level::Warning, record, datetime, context, extra),
            Level::Error => emit_record!(Level::Error, record, datetime, context, extra),
            Level::Critical => emit_record!(Level::Critical, record, datetime, context, extra),
            Level::Alert => emit_record!(Level::Alert, record, datetime, context, extra),
            Level::Emergency => emit_record!(Level::Emergency, record, datetime, context, extra),
        });
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.add_record(&Record::new(self.name.as_str(), level, message));
    }

    pub fn log_with_context(&self, level: Level, message: impl Into<String>, context: Map<String, Value>) {
        self.add_record(&Record::new(self.name.as_str(), level, message).with_context(context));
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message)
    }

    pub fn notice(&self, message: impl Into<String>) {
        self.log(Level::Notice, message)
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message)
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message)
    }

    pub fn alert(&self, message: impl Into<String>) {
        self.log(Level::Alert, message)
    }

    pub fn emergency(&self, message: impl Into<String>) {
        self.log(Level::Emergency, message)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("handlers", &self.targets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::ConsoleOutput;
    use crate::core::logging::formatter::TemplateFormatter;
    use chrono::{Local, TimeZone};
    use serde_json::json;

    fn buffered_logger(level: Level, template: &str) -> (Logger, ConsoleOutput) {
        let output = ConsoleOutput::buffer();
        let logger = Logger::with_handlers(
            "test:channel",
            vec![Handler::console(
                output.clone(),
                level,
                Box::new(TemplateFormatter::new(template)),
            )],
        );
        (logger, output)
    }

    #[test]
    fn test_logger_without_handlers_drops_records() {
        let logger = Logger::new("silent");
        assert_eq!(logger.handler_count(), 0);
        logger.emergency("nobody hears this");
        assert!(logger.set_level(Level::Error).is_ok());
    }

    #[test]
    fn test_logger_writes_channel_and_level() {
        let (logger, output) = buffered_logger(Level::Debug, "%channel% %level_name% %message% %context%");
        logger.warning("careful");
        assert_eq!(output.contents(), "test:channel WARNING careful []\n");
        assert_eq!(logger.handler_targets(), &[HandlerTarget::Console]);
    }

    #[test]
    fn test_every_severity_reaches_handlers() {
        let (logger, output) = buffered_logger(Level::Debug, "%level%");
        for level in Level::ALL {
            logger.log(level, "x");
        }
        assert_eq!(output.contents(), "100\n200\n250\n300\n400\n500\n550\n600\n");
    }

    #[test]
    fn test_logger_level_change_applies_to_handlers() {
        let (logger, output) = buffered_logger(Level::Debug, "%channel% %level_name% %message% %context%");
        logger.set_level(Level::Error).unwrap();

        logger.info("dropped");
        logger.critical("kept");

        assert_eq!(output.contents(), "test:channel CRITICAL kept []\n");
    }

    #[test]
    fn test_logger_context() {
        let (logger, output) = buffered_logger(Level::Debug, "%channel% %level_name% %message% %context%");
        let mut context = Map::new();
        context.insert("id".to_string(), json!(7));

        logger.log_with_context(Level::Notice, "with context", context);

        assert_eq!(output.contents(), "test:channel NOTICE with context {\"id\":7}\n");
    }

    #[test]
    fn test_record_fields_survive_dispatch() {
        let (logger, output) = buffered_logger(Level::Debug, "%datetime% %extra.pid% %message%");
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let record = Record::new("test:channel", Level::Info, "braces {} stay")
            .with_datetime(at)
            .with_extra("pid", 42);

        logger.add_record(&record);

        assert_eq!(output.contents(), "2024-03-09 07:05:01 42 braces {} stay\n");
    }
}
