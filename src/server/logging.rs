//! Tracing subscriber setup for the server binary.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use super::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global tracing subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    let (writer, is_terminal) = make_writer(&config.output)?;
    let ansi = config.color && is_terminal;

    let layer: BoxedLayer = match (config.format, config.timestamps) {
        (LogFormat::Text, true) => fmt::layer()
            .with_ansi(ansi)
            .with_target(config.target)
            .with_writer(writer)
            .boxed(),
        (LogFormat::Text, false) => fmt::layer()
            .with_ansi(ansi)
            .with_target(config.target)
            .without_time()
            .with_writer(writer)
            .boxed(),
        (LogFormat::Json, true) => fmt::layer()
            .json()
            .with_target(config.target)
            .with_writer(writer)
            .boxed(),
        (LogFormat::Json, false) => fmt::layer()
            .json()
            .with_target(config.target)
            .without_time()
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Resolve `output` to a writer and whether it is an interactive terminal.
fn make_writer(output: &str) -> Result<(BoxMakeWriter, bool), LoggingError> {
    match output {
        "stdout" => Ok((BoxMakeWriter::new(io::stdout), io::stdout().is_terminal())),
        "stderr" => Ok((BoxMakeWriter::new(io::stderr), io::stderr().is_terminal())),
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::FileOpen(path.to_string(), e))?;
            Ok((BoxMakeWriter::new(Mutex::new(file)), false))
        }
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to open log file '{0}': {1}")]
    FileOpen(String, #[source] io::Error),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}
