//! Logging for Faultline
//!
//! Installs a `tracing-subscriber` registry writing text or JSON lines
//! through a non-blocking writer, so log output never holds up a response.

use faultline_config::{LogFormat, TelemetryConfig};
use tracing_appender::non_blocking::WorkerGuard;

/// Guard that flushes buffered log lines on drop
///
/// Must be held for the lifetime of the application.
pub struct TelemetryGuard {
    _writer: WorkerGuard,
}

/// Initialize logging from configuration
///
/// `default_filter` applies when the configuration sets no filter. An
/// invalid filter falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let defaults = TelemetryConfig::default();
    let config = config.unwrap_or(&defaults);

    let directives = config.filter.as_deref().unwrap_or(default_filter);
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    // Lines are dropped rather than blocking when the buffer is full
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let text_layer = (config.format == LogFormat::Text).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer.clone())
            .with_ansi(config.ansi)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    });

    let json_layer = (config.format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_current_span(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::debug!(filter = directives, format = ?config.format, "logging initialized");

    Ok(TelemetryGuard { _writer: guard })
}
