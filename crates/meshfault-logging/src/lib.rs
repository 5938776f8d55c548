//! Structured logging for meshfault
//!
//! Installs a global `tracing` subscriber configured from a [`LogConfig`]:
//! human-readable or JSONL console output on stderr, plus optional JSONL
//! file output. Console output stays on stderr so simulation results
//! printed on stdout remain clean.
//!
//! # Quick Start
//!
//! ```ignore
//! use meshfault_logging::{MeshSubscriberBuilder, LogConfig};
//!
//! // Pretty console output with defaults
//! let _guard = MeshSubscriberBuilder::new().init()?;
//!
//! // JSONL for log aggregation
//! let _guard = MeshSubscriberBuilder::new()
//!     .with_config(LogConfig::default())
//!     .with_json(true)
//!     .init()?;
//! ```
//!
//! # Run Correlation
//!
//! Every simulation run opens a [`spans::SIMULATION_RUN`] span carrying its
//! run id; JSONL output includes the span list on each event.

pub mod config;
pub mod context;

pub use config::{ConsoleConfig, FileConfig, JsonlConfig, LogConfig, RotationStrategy};
pub use context::spans;

use std::fs::{self, File};
use std::io;

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter {directives:?}: {source}")]
    InvalidFilter {
        directives: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to prepare log file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to install tracing subscriber: {0}")]
    InstallFailed(#[from] tracing_subscriber::util::TryInitError),
}

/// Builder for configuring and initializing the meshfault subscriber
pub struct MeshSubscriberBuilder {
    config: LogConfig,
}

impl MeshSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
        }
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Switch console output between JSONL and pretty
    pub fn with_json(mut self, json: bool) -> Self {
        self.config.console.pretty = !json;
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Configure file output
    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    /// Build the level filter; `RUST_LOG` wins over the configuration
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let directives = self.config.directives();
        EnvFilter::try_new(&directives)
            .map_err(|source| LoggingError::InvalidFilter { directives, source })
    }

    /// Initialize the subscriber globally
    ///
    /// Returns a guard when file output is enabled; keep it alive for the
    /// duration of the program so buffered lines get flushed.
    pub fn init(self) -> Result<Option<WorkerGuard>, LoggingError> {
        let env_filter = self.env_filter()?;
        let registry = Registry::default().with(env_filter);
        let jsonl = &self.config.jsonl;

        match (
            self.config.console.enabled,
            self.config.console.pretty,
            self.config.file.as_ref(),
        ) {
            // Pretty console + file
            (true, true, Some(file_config)) => {
                let (writer, guard) = file_writer(file_config)?;
                let console_layer = tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(self.config.console.ansi)
                    .with_target(true);
                let file_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(jsonl.include_spans)
                    .flatten_event(jsonl.flatten_events)
                    .with_file(jsonl.include_location)
                    .with_line_number(jsonl.include_location)
                    .with_writer(writer);
                registry.with(console_layer).with(file_layer).try_init()?;
                Ok(Some(guard))
            }

            // JSONL console + file
            (true, false, Some(file_config)) => {
                let (writer, guard) = file_writer(file_config)?;
                let console_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(jsonl.include_spans)
                    .flatten_event(jsonl.flatten_events)
                    .with_file(jsonl.include_location)
                    .with_line_number(jsonl.include_location)
                    .with_writer(io::stderr);
                let file_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(jsonl.include_spans)
                    .flatten_event(jsonl.flatten_events)
                    .with_file(jsonl.include_location)
                    .with_line_number(jsonl.include_location)
                    .with_writer(writer);
                registry.with(console_layer).with(file_layer).try_init()?;
                Ok(Some(guard))
            }

            // Pretty console only (DEFAULT)
            (true, true, None) => {
                let console_layer = tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(self.config.console.ansi)
                    .with_target(true);
                registry.with(console_layer).try_init()?;
                Ok(None)
            }

            // JSONL console only
            (true, false, None) => {
                let console_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(jsonl.include_spans)
                    .flatten_event(jsonl.flatten_events)
                    .with_file(jsonl.include_location)
                    .with_line_number(jsonl.include_location)
                    .with_writer(io::stderr);
                registry.with(console_layer).try_init()?;
                Ok(None)
            }

            // File only
            (false, _, Some(file_config)) => {
                let (writer, guard) = file_writer(file_config)?;
                let file_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(jsonl.include_spans)
                    .flatten_event(jsonl.flatten_events)
                    .with_file(jsonl.include_location)
                    .with_line_number(jsonl.include_location)
                    .with_writer(writer);
                registry.with(file_layer).try_init()?;
                Ok(Some(guard))
            }

            // Nothing to output
            (false, _, None) => Ok(None),
        }
    }
}

impl Default for MeshSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blocking writer for file output; truncates for `Never`, appends otherwise
fn file_writer(file_config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    fs::create_dir_all(&file_config.directory)?;
    let pair = match file_config.rotation {
        RotationStrategy::Never => {
            let file_path = file_config
                .directory
                .join(format!("{}.log", file_config.prefix));
            tracing_appender::non_blocking(File::create(file_path)?)
        }
        RotationStrategy::Daily => tracing_appender::non_blocking(RollingFileAppender::new(
            Rotation::DAILY,
            &file_config.directory,
            &file_config.prefix,
        )),
        RotationStrategy::Hourly => tracing_appender::non_blocking(RollingFileAppender::new(
            Rotation::HOURLY,
            &file_config.directory,
            &file_config.prefix,
        )),
    };
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let builder = MeshSubscriberBuilder::new()
            .with_level("trace")
            .with_json(true)
            .with_console(false);
        assert_eq!(builder.config.default_level, "trace");
        assert!(!builder.config.console.pretty);
        assert!(!builder.config.console.enabled);
    }

    #[test]
    fn test_invalid_level_is_reported() {
        // Only meaningful when RUST_LOG does not override the configuration
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let builder = MeshSubscriberBuilder::new().with_level("meshfault=notalevel");
        assert!(matches!(
            builder.env_filter(),
            Err(LoggingError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_file_writer_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig {
            directory: dir.path().join("nested"),
            prefix: "run".to_string(),
            rotation: RotationStrategy::Never,
        };
        let (_writer, _guard) = file_writer(&config).unwrap();
        assert!(dir.path().join("nested").join("run.log").exists());
    }

    #[test]
    fn test_disabled_output_installs_nothing() {
        let guard = MeshSubscriberBuilder::new()
            .with_console(false)
            .init()
            .unwrap();
        assert!(guard.is_none());
    }
}
