//! File-based configuration reader (YAML or JSON)

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::error::{ConfigError, ConfigResult};
use super::params::ConfigParams;

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::Other(format!(
                "Unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Json => "json",
        }
    }
}

/// Reads `ConfigParams` from a YAML or JSON file
///
/// The parsed file is cached after the first read; call `reload` to pick up
/// changes on disk. A missing file reads as empty parameters.
///
/// # Example
///
/// ```no_run
/// use paramlink_core::config::FileConfigReader;
///
/// let reader = FileConfigReader::new("/etc/myapp/config.yaml").unwrap();
/// let config = reader.read().unwrap();
/// ```
pub struct FileConfigReader {
    path: PathBuf,
    format: ConfigFormat,
    cache: RwLock<Option<ConfigParams>>,
}

impl FileConfigReader {
    /// Create a reader, detecting the format from the extension
    pub fn new(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let format = ConfigFormat::from_path(&path)?;
        Ok(Self::with_format(path, format))
    }

    /// Create a reader with an explicit format
    pub fn with_format(path: impl Into<PathBuf>, format: ConfigFormat) -> Self {
        Self {
            path: path.into(),
            format,
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> ConfigResult<ConfigParams> {
        if !self.path.exists() {
            return Ok(ConfigParams::new());
        }

        let content = fs::read_to_string(&self.path)?;
        match self.format {
            ConfigFormat::Yaml => ConfigParams::from_yaml_str(&content),
            ConfigFormat::Json => ConfigParams::from_json_str(&content),
        }
    }

    /// Get cached or load config
    pub fn read(&self) -> ConfigResult<ConfigParams> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }
        self.reload()
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<ConfigParams> {
        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }
}

impl std::fmt::Debug for FileConfigReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigReader")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("exists", &self.exists())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "credential:\n  user: jdoe\n  pass: pass123\n").unwrap();

        let reader = FileConfigReader::new(&path).unwrap();
        assert_eq!(reader.format(), ConfigFormat::Yaml);

        let config = reader.read().unwrap();
        assert_eq!(config.get("credential.user"), Some("jdoe"));
        assert_eq!(config.get("credential.pass"), Some("pass123"));
    }

    #[test]
    fn test_read_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"connections": [{"host": "db1", "port": 5432}]}"#).unwrap();

        let config = FileConfigReader::new(&path).unwrap().read().unwrap();
        assert_eq!(config.get("connections.0.host"), Some("db1"));
        assert_eq!(config.get("connections.0.port"), Some("5432"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let reader = FileConfigReader::new(dir.path().join("absent.yml")).unwrap();
        assert!(!reader.exists());
        assert!(reader.read().unwrap().is_empty());
    }

    #[test]
    fn test_cache_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "connection:\n  host: db1\n").unwrap();

        let reader = FileConfigReader::new(&path).unwrap();
        assert_eq!(reader.read().unwrap().get("connection.host"), Some("db1"));

        fs::write(&path, "connection:\n  host: db2\n").unwrap();
        // Cached until reloaded
        assert_eq!(reader.read().unwrap().get("connection.host"), Some("db1"));
        assert_eq!(reader.reload().unwrap().get("connection.host"), Some("db2"));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            FileConfigReader::new("/tmp/config.toml"),
            Err(ConfigError::Other(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "connection: [unclosed").unwrap();

        let reader = FileConfigReader::new(&path).unwrap();
        assert!(matches!(reader.read(), Err(ConfigError::Yaml(_))));
    }
}
