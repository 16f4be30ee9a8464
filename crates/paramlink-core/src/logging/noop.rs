//! No-op logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that does nothing
///
/// Default logger for resolvers that were not given one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _correlation_id: Option<&str>, _message: &str) {}

    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger() {
        let logger = NoOpLogger::new();
        assert!(!logger.is_enabled(LogLevel::Error));

        // These should all do nothing without panicking
        logger.debug(Some("123"), "debug message");
        logger.info(None, "info message");
        logger.warn(None, "warn message");
        logger.error(Some("123"), "error message");
    }
}
