use std::io;
use std::path::Path;

use anyhow::anyhow;
use configs::{LogFormat, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output on stdout.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize logging from the `[logging]` config section.
///
/// With `file` set, events go through a non-blocking appender; the returned
/// guard must be held until shutdown or buffered lines are lost.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let Some(path) = cfg.file.as_deref() else {
        match cfg.format {
            LogFormat::Compact => init_logging_default(),
            LogFormat::Json => init_logging_json(),
        }
        return Ok(None);
    };

    let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
    let builder = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer);
    let _ = match cfg.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    Ok(Some(guard))
}

fn file_appender(path: &Path) -> anyhow::Result<tracing_appender::rolling::RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path {} has no file name", path.display()))?;
    std::fs::create_dir_all(dir)
        .map_err(|e| anyhow!("cannot create log directory {}: {e}", dir.display()))?;
    Ok(tracing_appender::rolling::never(dir, name))
}
