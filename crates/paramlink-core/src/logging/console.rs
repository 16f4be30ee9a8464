//! Console logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that writes to the console
///
/// Warnings and errors go to stderr, everything else to stdout. Entries below
/// the configured level are dropped.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default prefix, logging `Info` and above
    pub fn new() -> Self {
        Self {
            prefix: "[paramlink]".to_string(),
            level: LogLevel::Info,
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::new()
        }
    }

    /// Set the minimum level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn format(&self, level: LogLevel, correlation_id: Option<&str>, message: &str) -> String {
        match correlation_id {
            Some(cid) => format!("{} {} [{}] {}", self.prefix, level, cid, message),
            None => format!("{} {} {}", self.prefix, level, message),
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, correlation_id: Option<&str>, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let line = self.format(level, correlation_id, message);
        if level >= LogLevel::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }
}
