use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggerConfig};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("cannot open log sink {path}: {source}")]
    Sink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl Sink {
    pub fn parse(value: &str) -> Self {
        match value {
            "stdout" => Sink::Stdout,
            "stderr" => Sink::Stderr,
            path => Sink::File(PathBuf::from(path)),
        }
    }

    fn make_writer(&self) -> Result<BoxMakeWriter, LoggerError> {
        match self {
            Sink::Stdout => Ok(BoxMakeWriter::new(std::io::stdout)),
            Sink::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
            Sink::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LoggerError::Sink {
                        path: path.display().to_string(),
                        source,
                    })?;
                Ok(BoxMakeWriter::new(Arc::new(file)))
            }
        }
    }
}

/// Validate the configured level, returning it lowercased
pub fn parse_level(level: &str) -> Result<String, LoggerError> {
    Level::from_str(level.trim())
        .map(|l| l.to_string().to_ascii_lowercase())
        .map_err(|_| LoggerError::InvalidLevel(level.to_string()))
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggerConfig) -> Result<(), LoggerError> {
    let level = parse_level(&config.level)?;
    let sink = Sink::parse(&config.sink);
    let writer = sink.make_writer()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    let ansi = !matches!(sink, Sink::File(_));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| LoggerError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_standard_sinks() {
        assert_eq!(Sink::parse("stdout"), Sink::Stdout);
        assert_eq!(Sink::parse("stderr"), Sink::Stderr);
        assert_eq!(
            Sink::parse("/var/log/filmoteka.log"),
            Sink::File(PathBuf::from("/var/log/filmoteka.log"))
        );
    }

    #[test]
    fn accepts_levels_in_any_case() {
        assert_eq!(parse_level("INFO").unwrap(), "info");
        assert_eq!(parse_level("warn").unwrap(), "warn");
        assert_eq!(parse_level(" debug ").unwrap(), "debug");
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(parse_level("loud"), Err(LoggerError::InvalidLevel(_))));
    }

    #[test]
    fn unwritable_sink_is_an_error() {
        let sink = Sink::parse("/nonexistent-dir/filmoteka.log");
        assert!(matches!(sink.make_writer(), Err(LoggerError::Sink { .. })));
    }
}
