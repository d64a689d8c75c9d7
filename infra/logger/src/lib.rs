//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for EventHub binaries: a compact console
//! layer on stderr, an optional daily-rolling file layer (plain or JSON) written through a
//! non-blocking worker, and an [`EnvFilter`] seeded from the configured level.
//!
//! `RUST_LOG` still wins over the configured level unless an explicit filter is supplied.
//! With the `profiling` feature and `--cfg tokio_unstable` a `tokio-console` layer is added.
//!
//! ## Example
//!
//! ```rust
//! use evhub_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("evhub").level(LevelFilter::DEBUG).init().unwrap();
//! tracing::debug!("ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use evhub_domain::config::LoggingConfig;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Configures and installs the global subscriber.
#[must_use = "The builder does nothing until `init` is called."]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl LoggerBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }

    /// Applies the `[logging]` section of the application config.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] when `level` is not a tracing level name.
    pub fn config(mut self, config: &LoggingConfig) -> Result<Self, LoggerError> {
        self.level = LevelFilter::from_str(&config.level).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("unknown level '{}': {e}", config.level).into(),
                context: None,
            }
        })?;
        self.json = config.json;
        self.directory.clone_from(&config.directory);
        self.env_filter.clone_from(&config.env_filter);
        Ok(self)
    }

    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives (`evhub_plans=debug,reqwest=warn`). Overrides `RUST_LOG`.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Writes rolling log files into `directory`, created on init if missing.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Formats the file layer as JSON lines. Console output stays compact.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Installs the subscriber.
    ///
    /// The returned [`Logger`] owns the file worker guard; keep it alive until shutdown so
    /// buffered lines are flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, a bad
    ///   filter, or when no layer would be installed;
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable;
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();

        #[cfg(all(feature = "profiling", tokio_unstable))]
        if self.console {
            layers.push(console_subscriber::spawn().boxed());
        }

        if self.console {
            let console = layer().compact().with_writer(std::io::stderr).with_target(true);
            layers.push(console.with_ansi(true).boxed());
        }

        let guard = match &self.directory {
            Some(directory) => {
                fs::create_dir_all(directory)
                    .context(format!("creating {}", directory.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(self.rotation.clone())
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.max_files)
                    .build(directory)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no output enabled, turn on the console or set a directory".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("invalid env filter '{filter}': {e}").into(),
                context: None,
            }),
        }
    }
}

/// Handle to the installed subscriber. Dropping it flushes and stops the file worker.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling files (`evhub.2026-10-18.log`).
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name.into())
    }

    /// Whether a file layer (and its worker) is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}
