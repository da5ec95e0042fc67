//! Logging setup for tools embedding the restorer

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogSettings;
use crate::error::{RestoreError, Result};

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level)
        .map_err(|_| RestoreError::Config(format!("Invalid log level: {}", level)))
}

/// Install a global `tracing` subscriber. `RUST_LOG` directives are
/// honoured on top of the configured level.
pub fn setup_logging(settings: &LogSettings) -> Result<()> {
    let level = parse_log_level(&settings.level)?;
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(settings.file_info)
        .with_line_number(settings.file_info);

    let installed = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| RestoreError::Config(format!("Logging setup failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert!(matches!(parse_log_level("loud"), Err(RestoreError::Config(_))));
    }
}
