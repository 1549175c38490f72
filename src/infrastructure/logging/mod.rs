// Logging module - Diagnostics for the basecmd process itself
use crate::domain::error::{BaseCmdError, BaseCmdResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the diagnostics subscriber.
///
/// Diagnostics go to stderr so they never mix with command log lines on
/// stdout. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) -> BaseCmdResult<()> {
    let default_filter = if verbose { "basecmd=debug" } else { "basecmd=warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| BaseCmdError::Config {
            message: format!("Failed to initialize diagnostics logging: {}", e),
        })?;

    tracing::debug!("basecmd diagnostics initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_init_once() {
        assert!(init_logging(false).is_ok());
        // A second global subscriber is refused
        assert!(init_logging(true).is_err());
    }
}
