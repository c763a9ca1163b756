//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events (targets `brains_xai::atom`
//! and `brains_xai::http`). Hosts that do not install their own subscriber can
//! call [`init_subscriber`] once at startup.
//!
//! ```rust,ignore
//! use brains_xai::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let _guard = init_subscriber(
//!     SubscriberConfig::builder()
//!         .log_level(tracing::Level::DEBUG)
//!         .output_format(OutputFormat::Json)
//!         .build(),
//! )?;
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::AtomError;

pub const LOG_LEVEL_ENV: &str = "BRAINS_XAI_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "BRAINS_XAI_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "BRAINS_XAI_LOG_FILE";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per event, with thread ids and names.
    Json,
    /// JSON with event fields flattened into the top-level object.
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(AtomError::ConfigurationError(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write to stderr.
    pub enable_console: bool,
    /// Daily-rolling log file; the date is appended to the file name.
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// Warnings and errors only, JSON, file output, no console.
    pub fn production(log_file: PathBuf) -> Self {
        Self {
            log_level: tracing::Level::WARN,
            output_format: OutputFormat::Json,
            enable_console: false,
            log_file: Some(log_file),
        }
    }

    /// Default directives when `RUST_LOG` is unset.
    fn directives(&self) -> String {
        let level = self.log_level.as_str().to_lowercase();
        format!("brains_xai={level}")
    }
}

#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Parse `trace`, `debug`, `info`, `warn` or `error`.
    pub fn log_level_str(mut self, level: &str) -> Result<Self, AtomError> {
        let parsed = level.parse::<tracing::Level>().map_err(|_| {
            AtomError::ConfigurationError(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        self.log_level = Some(parsed);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer<W>(format: OutputFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(ansi);

    match format {
        OutputFormat::Text => layer.boxed(),
        OutputFormat::Json => layer
            .json()
            .with_thread_ids(true)
            .with_thread_names(true)
            .boxed(),
        OutputFormat::JsonCompact => layer.json().flatten_event(true).boxed(),
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String), AtomError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            AtomError::ConfigurationError(format!("Invalid log file path: {}", path.display()))
        })?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

/// Install a global subscriber.
///
/// Returns the file writer's guard when `log_file` is set; keep it alive for
/// the life of the program or buffered lines are lost. Calling this when a
/// global subscriber already exists is not an error.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>, AtomError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directives()));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.enable_console {
        layers.push(fmt_layer(config.output_format, std::io::stderr, true));
    }

    let mut guard = None;
    if let Some(path) = &config.log_file {
        let (dir, file_name) = split_log_path(path)?;
        let appender = tracing_appender::rolling::daily(dir, file_name);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt_layer(config.output_format, writer, false));
        guard = Some(worker_guard);
    }

    match tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        Ok(()) => Ok(guard),
        Err(e) if e.to_string().contains("already") => Ok(None),
        Err(e) => Err(AtomError::ConfigurationError(format!(
            "Failed to initialize tracing: {e}"
        ))),
    }
}

pub fn init_default() -> Result<Option<WorkerGuard>, AtomError> {
    init_subscriber(SubscriberConfig::default())
}

/// Read `BRAINS_XAI_LOG_LEVEL`, `BRAINS_XAI_LOG_FORMAT` and
/// `BRAINS_XAI_LOG_FILE`, falling back to defaults for any that are unset.
pub fn init_from_env() -> Result<Option<WorkerGuard>, AtomError> {
    let mut builder = SubscriberConfig::builder();

    if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
        builder = builder.log_level_str(&level)?;
    }
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        builder = builder.output_format(format.parse()?);
    }
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        builder = builder.log_file(PathBuf::from(path));
    }

    init_subscriber(builder.build())
}
