//! Logger trait definition

use std::fmt;
use std::sync::Arc;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Parse a level name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Logger abstraction, injected into resolvers
///
/// Every entry carries the optional correlation id of the call that produced it.
///
/// Implementations:
/// - `NoOpLogger`: Silent logger (the default)
/// - `ConsoleLogger`: Logs to stdout/stderr
/// - `TracingLogger`: Forwards to the `tracing` crate
pub trait Logger: Send + Sync {
    /// Write one entry
    fn log(&self, level: LogLevel, correlation_id: Option<&str>, message: &str);

    /// Whether entries at `level` would be written
    fn is_enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn trace(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Trace, correlation_id, message);
    }

    fn debug(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Debug, correlation_id, message);
    }

    fn info(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Info, correlation_id, message);
    }

    fn warn(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Warn, correlation_id, message);
    }

    fn error(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Error, correlation_id, message);
    }
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Extension trait for logging with format arguments
///
/// Nothing is formatted when the logger does not accept the level.
pub trait LoggerExt: Logger {
    /// Log a debug message with format arguments
    fn debug_fmt(&self, correlation_id: Option<&str>, args: fmt::Arguments<'_>) {
        if self.is_enabled(LogLevel::Debug) {
            self.debug(correlation_id, &args.to_string());
        }
    }

    /// Log an info message with format arguments
    fn info_fmt(&self, correlation_id: Option<&str>, args: fmt::Arguments<'_>) {
        if self.is_enabled(LogLevel::Info) {
            self.info(correlation_id, &args.to_string());
        }
    }

    /// Log a warning message with format arguments
    fn warn_fmt(&self, correlation_id: Option<&str>, args: fmt::Arguments<'_>) {
        if self.is_enabled(LogLevel::Warn) {
            self.warn(correlation_id, &args.to_string());
        }
    }

    /// Log an error message with format arguments
    fn error_fmt(&self, correlation_id: Option<&str>, args: fmt::Arguments<'_>) {
        if self.is_enabled(LogLevel::Error) {
            self.error(correlation_id, &args.to_string());
        }
    }
}

// Implement LoggerExt for all Logger implementations
impl<T: Logger + ?Sized> LoggerExt for T {}

/// Convenience macros for logging with format arguments, via `LoggerExt`
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $cid:expr, $($arg:tt)*) => {{
        use $crate::logging::LoggerExt as _;
        $logger.debug_fmt($cid, format_args!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $cid:expr, $($arg:tt)*) => {{
        use $crate::logging::LoggerExt as _;
        $logger.info_fmt($cid, format_args!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $cid:expr, $($arg:tt)*) => {{
        use $crate::logging::LoggerExt as _;
        $logger.warn_fmt($cid, format_args!($($arg)*))
    }};
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $cid:expr, $($arg:tt)*) => {{
        use $crate::logging::LoggerExt as _;
        $logger.error_fmt($cid, format_args!($($arg)*))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert!(LogLevel::Debug > LogLevel::Trace);
        assert!(LogLevel::Info > LogLevel::Debug);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Error > LogLevel::Warn);
    }

    #[derive(Default)]
    struct Collecting {
        entries: parking_lot::Mutex<Vec<(LogLevel, Option<String>, String)>>,
    }

    impl Logger for Collecting {
        fn log(&self, level: LogLevel, correlation_id: Option<&str>, message: &str) {
            self.entries
                .lock()
                .push((level, correlation_id.map(str::to_string), message.to_string()));
        }

        fn is_enabled(&self, level: LogLevel) -> bool {
            level >= LogLevel::Info
        }
    }

    #[test]
    fn test_logger_ext_formats_enabled_levels() {
        let collecting = Arc::new(Collecting::default());
        let logger: SharedLogger = collecting.clone();

        logger.info_fmt(Some("123"), format_args!("resolved {} via {}", "k1", "memory"));
        logger.debug_fmt(Some("123"), format_args!("skipped"));
        crate::log_warn!(logger, None, "missing {}", "*:discovery:*:*:*");
        crate::log_debug!(logger, None, "also skipped");

        assert_eq!(
            collecting.entries.lock().as_slice(),
            &[
                (LogLevel::Info, Some("123".to_string()), "resolved k1 via memory".to_string()),
                (LogLevel::Warn, None, "missing *:discovery:*:*:*".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warning "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
    }
}
