//! Logging initialization.
//!
//! Logs always go to stdout. When `LOG_DIR` is set they are also written to
//! daily-rotated files there. Writes happen on background workers; keep the
//! returned guards alive until shutdown so buffered lines are flushed.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::ServiceConfig;

/// Rotated files are named `urlshort.<date>.log`.
const LOG_FILE_PREFIX: &str = "urlshort";

/// Number of rotated files kept on disk.
const MAX_LOG_FILES: usize = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log directory could not be prepared.
    #[error("failed to create log appender: {0}")]
    Appender(#[from] rolling::InitError),

    /// A global subscriber was already installed.
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Install the global tracing subscriber described by `config`.
///
/// # Errors
///
/// Fails if the log directory cannot be used or logging was already
/// initialized.
pub fn init_logging(config: &ServiceConfig) -> Result<Vec<WorkerGuard>, LoggingError> {
    let (layers, guards) = output_layers(config)?;

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(&config.log_level))
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))?;

    Ok(guards)
}

/// One formatting layer per output: stdout, plus the rotated file when
/// `LOG_DIR` is set.
fn output_layers(
    config: &ServiceConfig,
) -> Result<(Vec<BoxedLayer>, Vec<WorkerGuard>), LoggingError> {
    let json = config.json_logs();

    let (stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let mut layers = vec![fmt_layer(stdout, json, true)];
    let mut guards = vec![stdout_guard];

    if let Some(dir) = &config.log_dir {
        let (file, file_guard) = tracing_appender::non_blocking(file_appender(dir)?);
        layers.push(fmt_layer(file, json, false));
        guards.push(file_guard);
    }

    Ok((layers, guards))
}

fn file_appender(dir: &str) -> Result<RollingFileAppender, rolling::InitError> {
    rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
}

fn fmt_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_level(true)
        .with_ansi(ansi);

    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// The filter directive for a configured level. Database driver chatter is
/// capped at `warn` regardless of the level.
fn filter_directive(level: &str) -> String {
    format!("{},sqlx=warn", level.trim().to_lowercase())
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directive(level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directive("info")))
}
