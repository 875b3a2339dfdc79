use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{EnvFilter, Layer, fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of console logs, from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "pretty" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Filter from `RUST_LOG`, or `LOG_LEVEL` applied to the permatrix crates.
fn env_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            [
                "permatrix",
                "permatrix_core",
                "permatrix_search",
                "permatrix_config",
                "permatrix_cli",
            ]
            .iter()
            .map(|target| format!("{}={}", target, log_level))
            .collect::<Vec<_>>()
            .join(","),
        )
    })
}

/// Initialize console logging.
///
/// # Configuration
///
/// - **Log Level**: `LOG_LEVEL` (default: "info"), overridden entirely by `RUST_LOG`
/// - **Format**: `LOG_FORMAT` = `compact` (default) or `json`
/// - **Output**: stderr, so command output on stdout stays machine-readable
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init_tracing() {
    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();

    let console_layer = match format {
        LogFormat::Json => tracing_fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(env_filter())
            .boxed(),
        LogFormat::Compact => tracing_fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter())
            .boxed(),
    };

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
