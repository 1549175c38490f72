//! Test fixtures shared by the integration tests
#![allow(dead_code)]

use basecmd::core::logging::Level;
use basecmd::{BaseCmdError, BaseCmdResult, Command, CommandRunner, ConsoleOutput, ExecutionContext, Kernel};
use chrono::NaiveDateTime;
use std::path::Path;

mod logging_command;

pub use logging_command::{LoggingCommand, FOX};

/// Prints a greeting without logging anything
pub struct HelloWorldCommand;

impl Command for HelloWorldCommand {
    fn name(&self) -> &str {
        "test:hello-world"
    }

    fn source_file(&self) -> Option<&'static str> {
        Some(file!())
    }

    fn execute(&mut self, ctx: &mut ExecutionContext<'_>) -> BaseCmdResult<()> {
        ctx.output().write_line("Hello World")?;
        Ok(())
    }
}

/// Changes settings while executing
#[derive(Default)]
pub struct ConfigDuringExecuteCommand {
    pub late_setter_error: Option<String>,
}

impl Command for ConfigDuringExecuteCommand {
    fn name(&self) -> &str {
        "test:config-during-execute"
    }

    fn execute(&mut self, ctx: &mut ExecutionContext<'_>) -> BaseCmdResult<()> {
        match ctx.logging().set_log_to_file(true) {
            Err(e @ BaseCmdError::LockedConfiguration { .. }) => {
                self.late_setter_error = Some(e.to_string());
            }
            other => other?,
        }

        ctx.logging().set_log_level(Level::Warning)?;
        ctx.logger().info("hidden after the level change");
        ctx.logger().warning("still visible");
        Ok(())
    }
}

/// Runner with a captured console, logging into `log_dir`
pub fn runner<C: Command>(command: C, log_dir: &Path) -> CommandRunner<C> {
    CommandRunner::new(command, &Kernel::new(log_dir))
        .expect("configure failed")
        .with_output(ConsoleOutput::buffer())
}

pub fn logfile_contents(log_dir: &Path, filename: &str) -> String {
    std::fs::read_to_string(log_dir.join(filename)).unwrap_or_default()
}

/// True if some line reads `YYYY-MM-DD HH:MM:SS [LEVEL]: message`
pub fn has_default_line(text: &str, level: &str, message: &str) -> bool {
    let suffix = format!(" [{}]: {}", level, message);
    text.lines().any(|line| {
        line.len() > 19
            && line.is_char_boundary(19)
            && NaiveDateTime::parse_from_str(&line[..19], "%Y-%m-%d %H:%M:%S").is_ok()
            && &line[19..] == suffix
    })
}
