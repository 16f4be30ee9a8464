//! Configuration parameters
//!
//! Supports multiple configuration sources:
//! - `ConfigParams::from_tuples` / `from_string`: programmatic setup
//! - `ConfigParams::from_value`: any `serde_json::Value` tree
//! - `FileConfigReader`: YAML or JSON files

mod error;
mod params;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use params::ConfigParams;
pub use file::{FileConfigReader, ConfigFormat};
