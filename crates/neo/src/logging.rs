//! File logging. The terminal belongs to the renderer, so nothing is
//! written to stdout or stderr while running.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use neo_config::{LogConfig, LogLevel};
use tracing::level_filters::LevelFilter;

/// Install the global subscriber writing to the configured log file.
/// Does nothing when no log location can be determined.
pub fn init(config: &LogConfig) -> color_eyre::Result<()> {
    let Some(path) = config.path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level_filter(config.level))
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
