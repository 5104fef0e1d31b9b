use std::sync::OnceLock;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

/// Minimal stderr logger behind the `log` facade. Listing output goes to
/// stdout, so diagnostics must never share that stream.
pub struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%:z");
            eprintln!(
                "{} {} [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Info)
}

/// Install the process-wide logger. `debug` (the -v flag) forces the debug
/// level; otherwise the level comes from the environment, defaulting to info.
pub fn init(debug: bool) -> Result<(), SetLoggerError> {
    let level = if debug { Level::Debug } else { level_from_env() };
    install(level)
}

fn install(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // log::set_logger only succeeds once; repeated installs must not
    // re-run set_max_level with a level the stored logger never saw.
    let first_install = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| Logger { level });

    if first_install {
        log::set_logger(logger)?;
        log::set_max_level(level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
