mod common;

use basecmd::core::logging::Level;
use basecmd::infrastructure::config::ConfigManager;
use basecmd::{BaseCmdConfig, CommandRunner, ConsoleOutput, Kernel};
use common::*;
use std::fs;
use tempfile::TempDir;

/// End-to-end tests from configuration file to log output
#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = BaseCmdConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize config");
        let deserialized: BaseCmdConfig = toml::from_str(&toml_str).expect("Failed to deserialize config");

        assert_eq!(config.logging.file_extension, deserialized.logging.file_extension);
        assert_eq!(config.logging.console_line_format, deserialized.logging.console_line_format);
    }

    #[test]
    fn test_config_file_drives_command_logging() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            format!(
                "[kernel]\nlog_dir = {:?}\n\n[logging]\nlog_to_console = false\nfile_extension = \".log\"\nfile_line_format = \"\"\nlog_level = \"warning\"\n",
                log_dir.to_str().unwrap()
            ),
        )
        .unwrap();

        let manager = ConfigManager::with_paths(config_path, None);
        let config = manager.load_config().unwrap();
        let kernel = Kernel::from_config(&config).unwrap();
        assert_eq!(kernel.log_dir(), log_dir.as_path());

        let mut command = CommandRunner::new(LoggingCommand, &kernel)
            .unwrap()
            .with_output(ConsoleOutput::buffer());
        assert_eq!(command.logging().log_level(), Level::Warning);
        command.run().unwrap();

        assert!(command.display().is_empty());
        let contents = logfile_contents(&log_dir, "logging_command.rs.log");
        assert!(contents.contains(&format!("test:logging.EMERGENCY: {} [] []", FOX)));
        assert!(contents.contains("test:logging.WARNING: WARNING [] []"));
    }

    #[test]
    fn test_commands_in_one_process_are_independent() {
        let temp_dir = TempDir::new().unwrap();

        let mut first = runner(LoggingCommand, temp_dir.path());
        first.logging_mut().set_log_filename("first.log").unwrap();
        let mut second = runner(LoggingCommand, temp_dir.path());
        second.logging_mut().set_log_filename("second.log").unwrap();
        second.logging_mut().set_console_log_line_format(Some("second: %message%")).unwrap();

        first.run().unwrap();
        second.run().unwrap();

        assert!(has_default_line(&first.display(), "EMERGENCY", FOX));
        assert!(second.display().contains(&format!("second: {}", FOX)));
        assert!(!first.display().contains("second:"));
        assert!(logfile_contents(temp_dir.path(), "first.log").contains(FOX));
        assert!(logfile_contents(temp_dir.path(), "second.log").contains(FOX));
    }

    #[test]
    fn test_log_file_is_appended_across_runs() {
        let temp_dir = TempDir::new().unwrap();

        for _ in 0..2 {
            let mut command = runner(LoggingCommand, temp_dir.path());
            command.logging_mut().set_log_to_console(false).unwrap();
            command.run().unwrap();
        }

        let contents = logfile_contents(temp_dir.path(), "logging_command.rs.log.txt");
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn test_kernel_defaults_reach_new_commands() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = BaseCmdConfig::default();
        config.kernel.log_dir = Some(temp_dir.path().to_path_buf());
        config.logging.log_to_file = false;
        config.logging.console_line_format = "%channel%: %message%".to_string();

        let kernel = Kernel::from_config(&config).unwrap();
        let mut command = CommandRunner::new(HelloWorldCommand, &kernel)
            .unwrap()
            .with_output(ConsoleOutput::buffer());
        command.run().unwrap();
        command.get_logger().unwrap().info("after run");

        assert_eq!(command.display(), "Hello World\ntest:hello-world: after run\n");
        assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
    }
}
