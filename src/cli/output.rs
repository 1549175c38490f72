use crate::cli::args::OutputFormat;
use crate::domain::config::BaseCmdConfig;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Console stream a command writes to
///
/// `Buffer` captures everything in memory so the display can be inspected
/// after a run.
#[derive(Debug, Clone, Default)]
pub enum ConsoleOutput {
    #[default]
    Stdout,
    Stderr,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl ConsoleOutput {
    pub fn buffer() -> Self {
        ConsoleOutput::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    /// Captured display; always empty for the process streams
    pub fn contents(&self) -> String {
        match self {
            ConsoleOutput::Buffer(buffer) => buffer
                .lock()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_all(line.as_bytes())?;
        self.write_all(b"\n")?;
        self.flush()
    }
}

impl Write for ConsoleOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ConsoleOutput::Stdout => io::stdout().write(buf),
            ConsoleOutput::Stderr => io::stderr().write(buf),
            ConsoleOutput::Buffer(buffer) => {
                let mut bytes = buffer
                    .lock()
                    .map_err(|_| io::Error::new(io::ErrorKind::Other, "console buffer poisoned"))?;
                bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ConsoleOutput::Stdout => io::stdout().flush(),
            ConsoleOutput::Stderr => io::stderr().flush(),
            ConsoleOutput::Buffer(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleOutput {
    type Writer = ConsoleOutput;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_config(&self, config: &BaseCmdConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("TOML serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::BaseCmdError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::IoError(e) => Self::Output(e),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

/// Console output writer for the demo binary
pub struct ConsoleWriter {
    format: OutputFormat,
    out: ConsoleOutput,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat, out: ConsoleOutput) -> Self {
        Self { format, out }
    }

    fn line(&self, line: &str) -> Result<(), OutputError> {
        self.out.clone().write_line(line)?;
        Ok(())
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_config(&self, config: &BaseCmdConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                let logging = &config.logging;
                self.line("Configuration:")?;
                match &config.kernel.log_dir {
                    Some(dir) => self.line(&format!("  Log directory: {}", dir.display()))?,
                    None => self.line("  Log directory: (default)")?,
                }
                self.line(&format!("  Log to console: {}", logging.log_to_console))?;
                self.line(&format!("  Log to file: {}", logging.log_to_file))?;
                self.line(&format!("  File extension: {}", logging.file_extension))?;
                self.line(&format!("  Log level: {}", logging.log_level))?;
                self.line(&format!("  Console line format: {:?}", logging.console_line_format))?;
                self.line(&format!("  File line format: {:?}", logging.file_line_format))?;
            }
            OutputFormat::Json => {
                self.line(&serde_json::to_string_pretty(config)?)?;
            }
            OutputFormat::Toml => {
                self.line(toml::to_string_pretty(config)?.trim_end())?;
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "message": message });
                self.line(&output.to_string())
            }
            _ => self.line(message),
        }
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        let mut err = ConsoleOutput::Stderr;
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "error": error });
                err.write_line(&output.to_string())?;
            }
            _ => err.write_line(&format!("Error: {}", error))?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_lines() {
        let mut output = ConsoleOutput::buffer();
        output.write_line("first").unwrap();
        output.write_line("second").unwrap();
        assert_eq!(output.contents(), "first\nsecond\n");
    }

    #[test]
    fn test_buffer_clones_share_storage() {
        let output = ConsoleOutput::buffer();
        let mut writer = output.clone();
        writer.write_line("shared").unwrap();
        assert_eq!(output.contents(), "shared\n");
    }

    #[test]
    fn test_make_writer_shares_buffer() {
        let output = ConsoleOutput::buffer();
        output.make_writer().write_all(b"via make_writer\n").unwrap();
        assert_eq!(output.contents(), "via make_writer\n");
    }

    #[test]
    fn test_process_streams_have_no_contents() {
        assert!(ConsoleOutput::Stdout.contents().is_empty());
        assert!(ConsoleOutput::default().contents().is_empty());
    }

    #[test]
    fn test_console_writer_json_message() {
        let output = ConsoleOutput::buffer();
        let writer = ConsoleWriter::new(OutputFormat::Json, output.clone());
        writer.write_message("done").unwrap();
        assert_eq!(output.contents(), "{\"message\":\"done\"}\n");
    }

    #[test]
    fn test_console_writer_text_config() {
        let output = ConsoleOutput::buffer();
        let writer = ConsoleWriter::new(OutputFormat::Text, output.clone());
        writer.write_config(&BaseCmdConfig::default()).unwrap();

        let display = output.contents();
        assert!(display.contains("Log to file: true"));
        assert!(display.contains("File extension: .log.txt"));
    }
}
