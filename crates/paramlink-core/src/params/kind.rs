//! Parameter flavors: connections and credentials

use std::fmt;

use crate::refer::Descriptor;

/// Which kind of parameters a bundle (and its resolver) carries
///
/// The kind fixes the configuration section names, the key that marks a
/// bundle as indirect, and the descriptor type of the backends able to
/// resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Connection endpoints, resolved through discovery services
    Connection,
    /// Access credentials, resolved through credential stores
    Credential,
}

impl ParamKind {
    /// Singular configuration section (`connection`, `credential`)
    pub fn section(&self) -> &'static str {
        match self {
            ParamKind::Connection => "connection",
            ParamKind::Credential => "credential",
        }
    }

    /// Pluralized configuration section (`connections`, `credentials`)
    pub fn many_section(&self) -> &'static str {
        match self {
            ParamKind::Connection => "connections",
            ParamKind::Credential => "credentials",
        }
    }

    /// Key whose presence makes a bundle indirect
    pub fn reference_key(&self) -> &'static str {
        match self {
            ParamKind::Connection => "discovery_key",
            ParamKind::Credential => "store_key",
        }
    }

    /// Descriptor type segment of the backends for this kind
    pub fn backend_type(&self) -> &'static str {
        match self {
            ParamKind::Connection => "discovery",
            ParamKind::Credential => "credential_store",
        }
    }

    /// Query pattern matching every backend for this kind: `*:<type>:*:*:*`
    pub fn backend_descriptor(&self) -> Descriptor {
        Descriptor::new("*", self.backend_type(), "*", "*", "*")
    }

    pub fn as_str(&self) -> &'static str {
        self.section()
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ParamKind::Connection.many_section(), "connections");
        assert_eq!(ParamKind::Credential.reference_key(), "store_key");
        assert_eq!(ParamKind::Connection.reference_key(), "discovery_key");
    }

    #[test]
    fn test_backend_descriptor() {
        assert_eq!(
            ParamKind::Credential.backend_descriptor().to_string(),
            "*:credential_store:*:*:*"
        );
        assert_eq!(
            ParamKind::Connection.backend_descriptor().to_string(),
            "*:discovery:*:*:*"
        );
    }
}
