use serde::Deserialize;

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives, e.g. `info,faultline_server=debug`
    #[serde(default)]
    pub filter: Option<String>,
    /// Output format of log lines
    #[serde(default)]
    pub format: LogFormat,
    /// Colorize text output
    #[serde(default)]
    pub ansi: bool,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
