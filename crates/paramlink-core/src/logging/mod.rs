//! Logging abstractions for backend-agnostic logging

mod traits;
mod noop;
mod console;
mod tracing_logger;

pub use traits::{Logger, LoggerExt, LogLevel, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use tracing_logger::TracingLogger;
