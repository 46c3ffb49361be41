use mdwrangle_core::config::LoggingConfig;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);

/// Install the stderr logger and, when configured, a file logger.
///
/// `RUST_LOG` directives override the configured levels.
pub fn init(cfg: &LoggingConfig) {
    let stderr_level = parse_level(&cfg.level).unwrap_or(LevelFilter::INFO);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter(stderr_level));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let Some(path) = cfg.file.as_deref() else {
        let _ = registry.try_init();
        return;
    };

    let file = match open_log_file(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    let file_level = cfg
        .file_level
        .as_deref()
        .and_then(parse_level)
        .or_else(|| parse_level(&cfg.level))
        .unwrap_or(LevelFilter::DEBUG);

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    if let Ok(mut g) = LOG_GUARD.lock() {
        *g = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter(file_level));

    let _ = registry.with(file_layer).try_init();
}

/// Flush the file logger. Called once a command has finished.
pub fn shutdown() {
    if let Ok(mut g) = LOG_GUARD.lock() {
        g.take();
    }
}

fn filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

/// Open `path` for appending, creating missing parent folders.
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
