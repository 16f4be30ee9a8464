//! Flat, dotted-path configuration parameters

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ConfigError, ConfigResult};

/// Insertion-ordered map of dotted configuration paths to string values
///
/// Nested trees are flattened on the way in: `{"credential": {"user": "jdoe"}}`
/// becomes `credential.user = jdoe`, and array elements get numeric segments
/// (`credentials.0.user`). Sections are addressed by their first path segment.
///
/// # Example
///
/// ```
/// use paramlink_core::config::ConfigParams;
///
/// let config = ConfigParams::from_tuples([
///     ("credential.user", "jdoe"),
///     ("credential.pass", "pass123"),
/// ]);
///
/// let section = config.get_section("credential");
/// assert_eq!(section.get("user"), Some("jdoe"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigParams {
    values: IndexMap<String, String>,
}

impl ConfigParams {
    /// Create empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters from key/value pairs
    pub fn from_tuples<I, K, V>(tuples: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in tuples {
            params.set(key, value);
        }
        params
    }

    /// Parse a `key1=value1;key2=value2` string
    ///
    /// Empty segments are skipped and a segment without `=` maps to an empty value.
    pub fn from_string(line: &str) -> Self {
        let mut params = Self::new();
        for segment in line.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((key, value)) => params.set(key.trim(), value.trim()),
                None => params.set(segment, ""),
            }
        }
        params
    }

    /// Flatten a JSON value tree into dotted paths
    ///
    /// Nulls are dropped; numbers and booleans keep their JSON text form.
    /// Object keys keep their document order.
    pub fn from_value(value: &Value) -> Self {
        let mut params = Self::new();
        flatten_into(&mut params.values, None, value);
        params
    }

    /// Parse JSON text
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_tree(&value)
    }

    /// Parse YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_tree(&value)
    }

    fn from_tree(value: &Value) -> ConfigResult<Self> {
        match value {
            Value::Object(_) | Value::Null => Ok(Self::from_value(value)),
            other => Err(ConfigError::Other(format!(
                "Configuration root must be a map, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// Get a value by its full dotted path
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Set a value, keeping the original position if the key already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Names of all top-level sections, in order of first appearance
    ///
    /// A key without a dot counts as a section of its own.
    pub fn get_section_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for key in self.values.keys() {
            let name = key.split_once('.').map(|(head, _)| head).unwrap_or(key.as_str());
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Everything under `name.`, with the prefix stripped
    pub fn get_section(&self, name: &str) -> ConfigParams {
        let prefix = format!("{}.", name);
        let mut section = Self::new();
        for (key, value) in &self.values {
            if let Some(rest) = key.strip_prefix(&prefix) {
                section.set(rest, value.clone());
            }
        }
        section
    }

    /// Insert all entries of `section` under `name.`
    pub fn add_section(&mut self, name: &str, section: &ConfigParams) {
        for (key, value) in section.iter() {
            self.set(format!("{}.{}", name, key), value);
        }
    }
}

/// Same format `from_string` reads, but values are not escaped: a value
/// containing `;` or `=` does not survive the trip.
impl fmt::Display for ConfigParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.values {
            if !first {
                f.write_str(";")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_tuples(iter)
    }
}

fn flatten_into(out: &mut IndexMap<String, String>, prefix: Option<&str>, value: &Value) {
    let join = |segment: &str| match prefix {
        Some(p) => format!("{}.{}", p, segment),
        None => segment.to_string(),
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(out, Some(&join(key.as_str())), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(out, Some(&join(index.to_string().as_str())), child);
            }
        }
        Value::Null => {}
        Value::String(s) => {
            if let Some(p) = prefix {
                out.insert(p.to_string(), s.clone());
            }
        }
        other => {
            if let Some(p) = prefix {
                out.insert(p.to_string(), other.to_string());
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}
