use basecmd::{BaseCmdResult, Command, ExecutionContext};

pub const FOX: &str = "The quick brown fox jumps over the lazy dog";

/// Logs a WARNING record and an EMERGENCY record
pub struct LoggingCommand;

impl Command for LoggingCommand {
    fn name(&self) -> &str {
        "test:logging"
    }

    fn source_file(&self) -> Option<&'static str> {
        Some(file!())
    }

    fn execute(&mut self, ctx: &mut ExecutionContext<'_>) -> BaseCmdResult<()> {
        let logger = ctx.logger();
        logger.warning("WARNING");
        logger.emergency(FOX);
        Ok(())
    }
}
