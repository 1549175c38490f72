use crate::cli::args::{Args, Command as CliCommand, ConfigCommand, LoggingArgs};
use crate::cli::output::{ConsoleOutput, ConsoleWriter, OutputWriter};
use crate::core::command::{Command, CommandRunner, ExecutionContext};
use crate::core::kernel::Kernel;
use crate::core::logging::{Level, LoggingEnhancement};
use crate::domain::config::BaseCmdConfig;
use crate::domain::error::{BaseCmdError, BaseCmdResult};
use crate::infrastructure::config::ConfigManager;
use std::path::PathBuf;

/// Greets someone on the console and in the log
pub struct HelloCommand {
    name: String,
}

impl HelloCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Command for HelloCommand {
    fn name(&self) -> &str {
        "hello"
    }

    fn source_file(&self) -> Option<&'static str> {
        Some(file!())
    }

    fn execute(&mut self, ctx: &mut ExecutionContext<'_>) -> BaseCmdResult<()> {
        ctx.output().write_line(&format!("Hello {}", self.name))?;
        ctx.logger().info(format!("Greeted {}", self.name));
        Ok(())
    }
}

/// Logs one message at the requested severity
pub struct LogCommand {
    message: String,
    level: Level,
}

impl LogCommand {
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

impl Command for LogCommand {
    fn name(&self) -> &str {
        "log"
    }

    fn source_file(&self) -> Option<&'static str> {
        Some(file!())
    }

    fn execute(&mut self, ctx: &mut ExecutionContext<'_>) -> BaseCmdResult<()> {
        ctx.logger().log(self.level, self.message.as_str());
        Ok(())
    }
}

/// Execute CLI command
pub fn execute_command(args: Args) -> BaseCmdResult<()> {
    let writer = ConsoleWriter::new(args.output, ConsoleOutput::Stdout);

    let config_manager = ConfigManager::new()?;
    let mut config = match &args.config {
        Some(config_path) => config_manager.load_config_from_path(config_path.as_ref())?,
        None => config_manager.load_config()?,
    };
    if let Some(log_dir) = &args.logging.log_dir {
        config.kernel.log_dir = Some(log_dir.clone());
    }

    match args.command {
        CliCommand::Hello { name } => {
            let kernel = Kernel::from_config(&config)?;
            run_command(HelloCommand::new(name), &kernel, &args.logging)
        }
        CliCommand::Log { message, level } => {
            let kernel = Kernel::from_config(&config)?;
            run_command(LogCommand::new(message, level.parse()?), &kernel, &args.logging)
        }
        CliCommand::Config(config_args) => {
            execute_config_command(config_args.command, &writer, &config, &config_manager)
        }
        CliCommand::Version => {
            writer.write_message(&format!("basecmd {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

/// Run a command with the per-run logging overrides applied before initialisation
pub fn run_command<C: Command>(command: C, kernel: &Kernel, overrides: &LoggingArgs) -> BaseCmdResult<()> {
    let mut runner = CommandRunner::new(command, kernel)?;
    apply_overrides(runner.logging_mut(), overrides)?;
    runner.run()
}

fn apply_overrides(logging: &mut LoggingEnhancement, overrides: &LoggingArgs) -> BaseCmdResult<()> {
    if overrides.no_console_log {
        logging.set_log_to_console(false)?;
    }
    if overrides.no_file_log {
        logging.set_log_to_file(false)?;
    }
    if let Some(filename) = &overrides.log_file {
        logging.set_log_filename(filename.as_str())?;
    }
    if let Some(extension) = &overrides.log_extension {
        logging.set_default_log_file_extension(extension.as_str())?;
    }
    if let Some(level) = &overrides.log_level {
        logging.set_log_level(level.parse()?)?;
    }
    if let Some(format) = &overrides.console_format {
        logging.set_console_log_line_format(format_override(format))?;
    }
    if let Some(format) = &overrides.file_format {
        logging.set_file_log_line_format(format_override(format))?;
    }
    Ok(())
}

fn format_override(format: &str) -> Option<&str> {
    if format.eq_ignore_ascii_case("default") {
        None
    } else {
        Some(format)
    }
}

fn execute_config_command(
    command: ConfigCommand,
    writer: &ConsoleWriter,
    config: &BaseCmdConfig,
    config_manager: &ConfigManager,
) -> BaseCmdResult<()> {
    match command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            let result = match &file {
                Some(config_path) => config_manager.load_config_from_path(config_path.as_ref()),
                None => config_manager.load_config(),
            };
            result?;
            writer.write_message(&format!(
                "Configuration {} is valid",
                file.as_deref().unwrap_or("(current)")
            ))?;
            Ok(())
        }
        ConfigCommand::Init { dir, global } => {
            if global {
                let global_path = config_manager.get_global_config_path_ref();
                if global_path.exists() {
                    return Err(BaseCmdError::Config {
                        message: format!("Global configuration already exists at '{}'", global_path.display()),
                    });
                }
                config_manager.save_config_to_path(global_path, &BaseCmdConfig::default())?;
                writer.write_message(&format!("Global configuration initialized at '{}'", global_path.display()))?;
            } else {
                let target: PathBuf = match dir {
                    Some(dir) => dir.into(),
                    None => std::env::current_dir().map_err(|e| BaseCmdError::Config {
                        message: format!("Failed to get current directory: {}", e),
                    })?,
                };
                let config_file = config_manager.init_project_config(&target)?;
                writer.write_message(&format!("Project configuration initialized at '{}'", config_file.display()))?;
            }
            Ok(())
        }
        ConfigCommand::Path => {
            writer.write_message(&format!(
                "Global: {}",
                config_manager.get_global_config_path_ref().display()
            ))?;
            match config_manager.get_project_config_path() {
                Some(path) => writer.write_message(&format!("Project: {}", path.display()))?,
                None => writer.write_message("Project: (none)")?,
            }
            Ok(())
        }
    }
}
