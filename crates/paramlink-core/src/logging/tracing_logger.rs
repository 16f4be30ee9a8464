//! Logger that forwards to the `tracing` crate

use super::traits::{LogLevel, Logger};

/// Forwards entries to `tracing` events under the `paramlink` target
///
/// The correlation id is attached as a `correlation_id` field, so any
/// `tracing-subscriber` layer the host installs can filter or index on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, correlation_id: Option<&str>, message: &str) {
        let cid = correlation_id.unwrap_or("");
        match level {
            LogLevel::Trace => tracing::trace!(target: "paramlink", correlation_id = cid, "{}", message),
            LogLevel::Debug => tracing::debug!(target: "paramlink", correlation_id = cid, "{}", message),
            LogLevel::Info => tracing::info!(target: "paramlink", correlation_id = cid, "{}", message),
            LogLevel::Warn => tracing::warn!(target: "paramlink", correlation_id = cid, "{}", message),
            LogLevel::Error => tracing::error!(target: "paramlink", correlation_id = cid, "{}", message),
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(target: "paramlink", tracing::Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: "paramlink", tracing::Level::DEBUG),
            LogLevel::Info => tracing::enabled!(target: "paramlink", tracing::Level::INFO),
            LogLevel::Warn => tracing::enabled!(target: "paramlink", tracing::Level::WARN),
            LogLevel::Error => tracing::enabled!(target: "paramlink", tracing::Level::ERROR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: events are discarded without panicking
        let logger = TracingLogger::new();
        logger.debug(Some("123"), "debug message");
        logger.error(None, "error message");
    }
}
