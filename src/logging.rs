use crate::error::{Result, ScrapeError};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

/// Accepts the level names the CLI has always taken (`WARNING`, `CRITICAL`)
/// alongside the usual tracing ones.
pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.to_uppercase().as_str() {
        "TRACE" => Ok("trace"),
        "DEBUG" => Ok("debug"),
        "INFO" => Ok("info"),
        "WARN" | "WARNING" => Ok("warn"),
        "ERROR" | "CRITICAL" => Ok("error"),
        other => Err(ScrapeError::Config(format!("unknown log level {}", other))),
    }
}

/// Installs the global subscriber. With a log file the output goes there
/// (truncated, no colours) so it does not fight the progress bars.
pub fn setup_logger(level: &str, log_file: Option<&Path>) -> Result<()> {
    let level = normalize_level(level)?;
    let directive = format!("{}={}", env!("CARGO_CRATE_NAME"), level)
        .parse::<Directive>()
        .map_err(|e| ScrapeError::Config(format!("invalid log directive: {}", e)))?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy()
        .add_directive(directive);

    let formatter = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .event_format(formatter)
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .event_format(formatter)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| ScrapeError::Config(format!("could not install logger: {}", e)))
}
