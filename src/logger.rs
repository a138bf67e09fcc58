// A tiny logger for the `log` facade. Records go to stderr as
// `timestamp|LEVEL|file:line: message`. Filtering is left entirely to
// `log::set_max_level`.

use std::{
    path::{Path, PathBuf},
    sync::{LazyLock, Mutex},
};

use {jiff::tz::TimeZone, log::Log};

use crate::style::Theme;

/// Logs every record it is given to stderr.
#[derive(Debug)]
pub struct Logger {
    /// The time zone used for timestamps. Until it is set, timestamps are
    /// printed in UTC.
    tz: Mutex<Option<TimeZone>>,
}

impl Logger {
    /// Creates a logger and installs it as the global logger.
    pub fn init() -> Result<&'static Logger, log::SetLoggerError> {
        let logger = Box::leak(Box::new(Logger { tz: Mutex::new(None) }));
        log::set_logger(logger)?;
        Ok(logger)
    }

    pub fn set_time_zone(&self, tz: TimeZone) {
        *self.tz.lock().unwrap() = Some(tz);
    }

    /// Renders the current time for a log record.
    ///
    /// This deliberately avoids `Zoned::now()`, which may consult the system
    /// time zone database and log while doing so. From inside the logger,
    /// that would recurse.
    fn stamp(&self) -> String {
        let ts = jiff::Timestamp::now();
        match self.tz.lock().unwrap().clone() {
            Some(tz) => ts.to_zoned(tz).to_string(),
            None => ts.to_string(),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let stamp = Theme::stderr().highlight(self.stamp());
        let level = record.level();
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                let file = relative(file);
                eprintln!("{stamp}|{level}|{file}:{line}: {}", record.args());
            }
            (Some(file), None) => {
                let file = relative(file);
                eprintln!("{stamp}|{level}|{file}: {}", record.args());
            }
            _ => eprintln!("{stamp}|{level}: {}", record.args()),
        }
    }

    fn flush(&self) {}
}

/// Strips the current directory from a source path, if possible.
fn relative(path: &str) -> &str {
    static CWD: LazyLock<Option<PathBuf>> =
        LazyLock::new(|| std::env::current_dir().ok());

    let Some(cwd) = CWD.as_deref() else { return path };
    Path::new(path)
        .strip_prefix(cwd)
        .ok()
        .and_then(|relative| relative.to_str())
        .unwrap_or(path)
}
