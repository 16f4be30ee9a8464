//! Parameter bundles: one candidate set of connection or credential parameters

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::{ConfigParams, ConfigResult};
use super::kind::ParamKind;

/// An ordered set of connection or credential parameters
///
/// A bundle is either self-contained (its values are used as-is) or indirect:
/// it carries the kind's reference key (`discovery_key` / `store_key`) and the
/// real parameters must be fetched from a backend under that key.
///
/// # Example
///
/// ```
/// use paramlink_core::params::{ParamBundle, ParamKind};
///
/// let literal = ParamBundle::from_tuples(ParamKind::Credential, [("user", "jdoe")]);
/// assert!(!literal.uses_backend());
///
/// let indirect = ParamBundle::from_tuples(ParamKind::Credential, [("store_key", "secret1")]);
/// assert_eq!(indirect.backend_key(), Some("secret1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamBundle {
    kind: ParamKind,
    values: ConfigParams,
}

impl ParamBundle {
    /// Create an empty bundle
    pub fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            values: ConfigParams::new(),
        }
    }

    /// Create a connection bundle from key/value pairs
    pub fn connection<I, K, V>(tuples: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_tuples(ParamKind::Connection, tuples)
    }

    /// Create a credential bundle from key/value pairs
    pub fn credential<I, K, V>(tuples: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_tuples(ParamKind::Credential, tuples)
    }

    pub fn from_tuples<I, K, V>(kind: ParamKind, tuples: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_values(kind, ConfigParams::from_tuples(tuples))
    }

    /// Wrap already-flattened values
    pub fn with_values(kind: ParamKind, values: ConfigParams) -> Self {
        Self { kind, values }
    }

    /// Read a bundle back from a JSON object, as written by `Serialize`
    ///
    /// Nested objects are flattened into dotted keys like any other config.
    pub fn from_json(kind: ParamKind, content: &str) -> ConfigResult<Self> {
        Ok(Self::with_values(kind, ConfigParams::from_json_str(content)?))
    }

    /// Build every bundle of `kind` declared in `config`
    ///
    /// The pluralized section (`credentials.0.*`, `credentials.1.*`, ...) wins
    /// over the singular one (`credential.*`). When neither is present and
    /// `config_as_default` is set, the whole config becomes a single bundle.
    pub fn many_from_config(
        kind: ParamKind,
        config: &ConfigParams,
        config_as_default: bool,
    ) -> Vec<ParamBundle> {
        let many = config.get_section(kind.many_section());
        if !many.is_empty() {
            return many
                .get_section_names()
                .iter()
                .map(|name| many.get_section(name))
                .filter(|section| !section.is_empty())
                .map(|section| Self::with_values(kind, section))
                .collect();
        }

        let single = config.get_section(kind.section());
        if !single.is_empty() {
            return vec![Self::with_values(kind, single)];
        }

        if config_as_default && !config.is_empty() {
            return vec![Self::with_values(kind, config.clone())];
        }

        Vec::new()
    }

    /// First bundle of `kind` declared in `config`, if any
    pub fn from_config(
        kind: ParamKind,
        config: &ConfigParams,
        config_as_default: bool,
    ) -> Option<ParamBundle> {
        Self::many_from_config(kind, config, config_as_default)
            .into_iter()
            .next()
    }

    /// Add a value (builder style, before the bundle is handed off)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.set(key, value);
        self
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The same values tagged with another kind
    pub fn into_kind(self, kind: ParamKind) -> Self {
        Self { kind, ..self }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter()
    }

    /// The raw values
    pub fn values(&self) -> &ConfigParams {
        &self.values
    }

    /// Whether resolution requires a backend lookup
    pub fn uses_backend(&self) -> bool {
        self.values.contains_key(self.kind.reference_key())
    }

    /// The key to look up in a backend, for indirect bundles
    pub fn backend_key(&self) -> Option<&str> {
        self.values.get(self.kind.reference_key())
    }

    fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.values.get(key))
    }

    // ========== CONNECTION PARAMETERS ==========

    pub fn protocol(&self) -> Option<&str> {
        self.values.get("protocol")
    }

    pub fn host(&self) -> Option<&str> {
        self.first_of(&["host", "ip"])
    }

    /// Port number, `None` when absent or not a valid port
    pub fn port(&self) -> Option<u16> {
        self.values.get("port").and_then(|p| p.trim().parse().ok())
    }

    pub fn uri(&self) -> Option<&str> {
        self.values.get("uri")
    }

    // ========== CREDENTIAL PARAMETERS ==========

    pub fn username(&self) -> Option<&str> {
        self.first_of(&["username", "user"])
    }

    pub fn password(&self) -> Option<&str> {
        self.first_of(&["password", "pass"])
    }

    pub fn access_id(&self) -> Option<&str> {
        self.first_of(&["access_id", "client_id"])
    }

    pub fn access_key(&self) -> Option<&str> {
        self.first_of(&["access_key", "client_key", "secret_key"])
    }
}

/// Serializes as a flat JSON object of the bundle's values
impl Serialize for ParamBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// `key=value;key=value`, for logs and diagnostics
///
/// Values are written unescaped, so this is not a lossless format: use the
/// JSON form to store a bundle.
impl fmt::Display for ParamBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.values, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_contained_and_indirect() {
        let literal = ParamBundle::credential([("user", "jdoe"), ("pass", "pass123")]);
        assert!(!literal.uses_backend());
        assert_eq!(literal.backend_key(), None);

        let indirect = ParamBundle::credential([("store_key", "secret1")]);
        assert!(indirect.uses_backend());
        assert_eq!(indirect.backend_key(), Some("secret1"));

        // The reference key depends on the kind
        let connection = ParamBundle::connection([("store_key", "secret1")]);
        assert!(!connection.uses_backend());
        let discovered = ParamBundle::connection([("discovery_key", "primary")]);
        assert_eq!(discovered.backend_key(), Some("primary"));
    }

    #[test]
    fn test_many_from_pluralized_section() {
        let config = ConfigParams::from_tuples([
            ("credentials.0.user", "jdoe"),
            ("credentials.0.pass", "pass123"),
            ("credentials.1.store_key", "secret1"),
            ("credential.user", "ignored"),
        ]);

        let bundles = ParamBundle::many_from_config(ParamKind::Credential, &config, true);
        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[0].username(), Some("jdoe"));
        assert_eq!(bundles[0].password(), Some("pass123"));
        assert_eq!(bundles[1].backend_key(), Some("secret1"));
    }

    #[test]
    fn test_many_from_single_section() {
        let config = ConfigParams::from_tuples([
            ("connection.host", "db1"),
            ("connection.port", "5432"),
            ("other.setting", "x"),
        ]);

        let bundles = ParamBundle::many_from_config(ParamKind::Connection, &config, true);
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].host(), Some("db1"));
        assert_eq!(bundles[0].port(), Some(5432));
        assert!(!bundles[0].contains_key("other.setting"));
    }

    #[test]
    fn test_config_as_default() {
        let config = ConfigParams::from_tuples([("host", "db1"), ("port", "5432")]);

        let bundles = ParamBundle::many_from_config(ParamKind::Connection, &config, true);
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].host(), Some("db1"));

        assert!(ParamBundle::many_from_config(ParamKind::Connection, &config, false).is_empty());
        assert!(ParamBundle::many_from_config(ParamKind::Connection, &ConfigParams::new(), true).is_empty());
    }

    #[test]
    fn test_from_config_takes_first() {
        let config = ConfigParams::from_tuples([
            ("connections.0.host", "db1"),
            ("connections.1.host", "db2"),
        ]);
        let bundle = ParamBundle::from_config(ParamKind::Connection, &config, false).unwrap();
        assert_eq!(bundle.host(), Some("db1"));
    }

    #[test]
    fn test_typed_accessors_fall_back_to_aliases() {
        let bundle = ParamBundle::credential([
            ("username", "primary"),
            ("user", "alias"),
            ("client_id", "id-1"),
            ("secret_key", "k-1"),
        ]);
        assert_eq!(bundle.username(), Some("primary"));
        assert_eq!(bundle.access_id(), Some("id-1"));
        assert_eq!(bundle.access_key(), Some("k-1"));

        let connection = ParamBundle::connection([("ip", "10.0.0.1"), ("port", "not-a-port")]);
        assert_eq!(connection.host(), Some("10.0.0.1"));
        assert_eq!(connection.port(), None);
    }

    #[test]
    fn test_serialize_and_display() {
        let bundle = ParamBundle::connection([("host", "db1")]).with("port", "5432");
        assert_eq!(bundle.to_string(), "host=db1;port=5432");

        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json, serde_json::json!({ "host": "db1", "port": "5432" }));
    }

    #[test]
    fn test_json_round_trip_keeps_separators() {
        let bundle = ParamBundle::credential([("user", "jdoe"), ("pass", "a;b=c")]);

        let json = serde_json::to_string(&bundle).unwrap();
        let back = ParamBundle::from_json(ParamKind::Credential, &json).unwrap();
        assert_eq!(back, bundle);
        assert_eq!(back.password(), Some("a;b=c"));
        assert_eq!(back.values().keys().collect::<Vec<_>>(), vec!["user", "pass"]);

        assert!(ParamBundle::from_json(ParamKind::Credential, "[\"user\"]").is_err());
    }

    #[test]
    fn test_into_kind() {
        let bundle = ParamBundle::connection([("store_key", "secret1")]);
        assert!(!bundle.uses_backend());

        let credential = bundle.into_kind(ParamKind::Credential);
        assert_eq!(credential.kind(), ParamKind::Credential);
        assert_eq!(credential.backend_key(), Some("secret1"));
    }
}
