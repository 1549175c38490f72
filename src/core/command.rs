use crate::cli::output::ConsoleOutput;
use crate::core::kernel::Kernel;
use crate::core::logging::{Logger, LoggingEnhancement, RuntimeConfig};
use crate::domain::error::BaseCmdResult;
use std::sync::Arc;

/// A console command with logging support.
///
/// `configure` runs while the logging settings are still open. `execute` runs
/// after the logger has been built.
pub trait Command {
    /// Command name, also used as the log channel
    fn name(&self) -> &str;

    /// Source file defining the command, normally `Some(file!())`.
    ///
    /// The derived log filename is built from its base name.
    fn source_file(&self) -> Option<&'static str> {
        None
    }

    fn configure(&mut self, _logging: &mut LoggingEnhancement) -> BaseCmdResult<()> {
        Ok(())
    }

    fn execute(&mut self, ctx: &mut ExecutionContext<'_>) -> BaseCmdResult<()>;
}

/// What a command sees while executing
pub struct ExecutionContext<'a> {
    logger: Arc<Logger>,
    output: &'a mut ConsoleOutput,
    logging: &'a mut LoggingEnhancement,
}

impl ExecutionContext<'_> {
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn output(&mut self) -> &mut ConsoleOutput {
        self.output
    }

    /// Logging settings; setters fail here except `set_log_level`
    pub fn logging(&mut self) -> &mut LoggingEnhancement {
        self.logging
    }
}

/// Drives a command through configure, initialize and execute
pub struct CommandRunner<C: Command> {
    command: C,
    logging: LoggingEnhancement,
    output: ConsoleOutput,
}

impl<C: Command> CommandRunner<C> {
    /// Create the runner and run the command's `configure` hook
    pub fn new(mut command: C, kernel: &Kernel) -> BaseCmdResult<Self> {
        let mut logging = LoggingEnhancement::new(
            command.name(),
            command.source_file(),
            kernel.log_dir(),
            RuntimeConfig::from_defaults(kernel.logging_defaults()),
        );
        command.configure(&mut logging)?;

        Ok(Self {
            command,
            logging,
            output: ConsoleOutput::default(),
        })
    }

    /// Replace the console stream, e.g. with [`ConsoleOutput::buffer`]
    pub fn with_output(mut self, output: ConsoleOutput) -> Self {
        self.output = output;
        self
    }

    pub fn command(&self) -> &C {
        &self.command
    }

    pub fn logging(&self) -> &LoggingEnhancement {
        &self.logging
    }

    pub fn logging_mut(&mut self) -> &mut LoggingEnhancement {
        &mut self.logging
    }

    pub fn get_logger(&self) -> BaseCmdResult<Arc<Logger>> {
        self.logging.get_logger()
    }

    pub fn output(&self) -> &ConsoleOutput {
        &self.output
    }

    /// Captured console display (buffered output only)
    pub fn display(&self) -> String {
        self.output.contents()
    }

    /// Build the logger, lock the configuration and execute the command
    pub fn run(&mut self) -> BaseCmdResult<()> {
        let _span = tracing::debug_span!("command", name = %self.command.name()).entered();

        self.logging.initialize(&self.output)?;
        let logger = self.logging.get_logger()?;

        let mut ctx = ExecutionContext {
            logger,
            output: &mut self.output,
            logging: &mut self.logging,
        };
        self.command.execute(&mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::BaseCmdError;
    use tempfile::TempDir;

    struct EchoCommand {
        configured: bool,
    }

    impl Command for EchoCommand {
        fn name(&self) -> &str {
            "test:echo"
        }

        fn source_file(&self) -> Option<&'static str> {
            Some(file!())
        }

        fn configure(&mut self, logging: &mut LoggingEnhancement) -> BaseCmdResult<()> {
            self.configured = true;
            logging.set_console_log_line_format(Some("echo: %message%"))
        }

        fn execute(&mut self, ctx: &mut ExecutionContext<'_>) -> BaseCmdResult<()> {
            ctx.output().write_line("plain output")?;
            ctx.logger().notice("logged output");
            Ok(())
        }
    }

    #[test]
    fn test_runner_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let kernel = Kernel::new(temp_dir.path());
        let mut runner = CommandRunner::new(EchoCommand { configured: false }, &kernel)
            .unwrap()
            .with_output(ConsoleOutput::buffer());

        assert!(runner.command().configured);
        assert!(matches!(runner.get_logger(), Err(BaseCmdError::UninitializedLogger)));

        runner.run().unwrap();

        assert_eq!(runner.display(), "plain output\necho: logged output\n");
        assert!(runner.logging().is_locked());
        assert_eq!(
            runner.logging().get_log_filename(false).to_str(),
            Some("command.rs.log.txt")
        );
        assert!(temp_dir.path().join("command.rs.log.txt").exists());
    }

    #[test]
    fn test_runner_cannot_run_twice() {
        let temp_dir = TempDir::new().unwrap();
        let kernel = Kernel::new(temp_dir.path());
        let mut runner = CommandRunner::new(EchoCommand { configured: false }, &kernel)
            .unwrap()
            .with_output(ConsoleOutput::buffer());

        runner.run().unwrap();
        assert!(matches!(runner.run(), Err(BaseCmdError::AlreadyInitialised)));
    }
}
