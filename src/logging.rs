//! Tracing setup
//!
//! The terminal belongs to the UI, so log lines go to a file through a
//! non-blocking writer. The returned guard flushes it on drop and must be held
//! until the program exits.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Logging;

/// Maps a configured level name to an `EnvFilter` directive
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" => "error",
        "off" => "off",
        _ => "warn",
    }
}

/// Installs the global subscriber writing to `path`
///
/// `RUST_LOG` takes precedence over the configured level. Returns `Ok(None)`
/// without installing anything when there is nowhere to write.
pub fn init(logging: &Logging, path: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(directory) = directory {
        fs::create_dir_all(directory)?;
    }
    let file_name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new("roamy.log"));
    let appender =
        tracing_appender::rolling::never(directory.unwrap_or_else(|| Path::new(".")), file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(&logging.level)));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(Some(guard))
}
