//! File-backed logging.
//!
//! The terminal runs in raw mode, so stdout/stderr are off limits for
//! diagnostics. When the `FORGE_LOG` environment variable is set to a level
//! name, log records go to `forge.log` in the working directory; otherwise
//! logging stays disabled.

use log::{Level, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

/// Environment variable controlling the log level.
pub const LOG_ENV_VAR: &str = "FORGE_LOG";

/// Default log file name.
pub const LOG_FILE: &str = "forge.log";

struct FileLogger {
    file: Mutex<File>,
    level: Level,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{:<5}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger if `FORGE_LOG` is set.
///
/// Returns `false` when logging stays disabled (variable unset, unparsable
/// level, or the log file cannot be opened). Never fails the session.
pub fn init() -> bool {
    let Ok(value) = std::env::var(LOG_ENV_VAR) else {
        return false;
    };
    let level = match value.to_ascii_lowercase().as_str() {
        "error" => Level::Error,
        "warn" => Level::Warn,
        "info" => Level::Info,
        "debug" => Level::Debug,
        "trace" => Level::Trace,
        _ => return false,
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) else {
        return false;
    };
    let logger = FileLogger {
        file: Mutex::new(file),
        level,
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level.to_level_filter());
        true
    } else {
        false
    }
}
