//! Capability descriptors for locating components

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ReferenceError;

/// A `group:type:kind:name:version` tag identifying a component
///
/// Any segment may be the wildcard `*`. Two descriptors match when every
/// segment is equal (ignoring ASCII case) or a wildcard on either side.
///
/// # Example
///
/// ```
/// use paramlink_core::refer::Descriptor;
///
/// let store: Descriptor = "acme:credential_store:memory:default:1.0".parse().unwrap();
/// let pattern = Descriptor::new("*", "credential_store", "*", "*", "*");
/// assert!(store.matches(&pattern));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    group: Option<String>,
    type_name: Option<String>,
    kind: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

fn segment(value: &str) -> Option<String> {
    match value {
        "*" => None,
        other => Some(other.to_string()),
    }
}

fn segment_matches(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => true,
    }
}

fn segment_equals(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    }
}

impl Descriptor {
    /// Create a descriptor; `"*"` in a segment means wildcard
    pub fn new(group: &str, type_name: &str, kind: &str, name: &str, version: &str) -> Self {
        Self {
            group: segment(group),
            type_name: segment(type_name),
            kind: segment(kind),
            name: segment(name),
            version: segment(version),
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn segments(&self) -> [&Option<String>; 5] {
        [&self.group, &self.type_name, &self.kind, &self.name, &self.version]
    }

    /// Match with wildcards on either side
    pub fn matches(&self, other: &Descriptor) -> bool {
        self.segments()
            .iter()
            .zip(other.segments().iter())
            .all(|(a, b)| segment_matches(a, b))
    }

    /// Segment-by-segment equality, where a wildcard only equals a wildcard
    pub fn exact_match(&self, other: &Descriptor) -> bool {
        self.segments()
            .iter()
            .zip(other.segments().iter())
            .all(|(a, b)| segment_equals(a, b))
    }

    /// Whether no segment is a wildcard
    pub fn is_complete(&self) -> bool {
        self.segments().iter().all(|s| s.is_some())
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self
            .segments()
            .iter()
            .map(|s| s.as_deref().unwrap_or("*"))
            .collect();
        f.write_str(&parts.join(":"))
    }
}

impl FromStr for Descriptor {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [group, type_name, kind, name, version] => {
                Ok(Descriptor::new(group, type_name, kind, name, version))
            }
            _ => Err(ReferenceError::InvalidDescriptor(s.to_string())),
        }
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
