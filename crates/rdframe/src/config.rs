//! Conversion settings

use crate::error::Result;
use rdframe_core::PrefixMap;
use serde::{Deserialize, Serialize};

/// What the flattener does when a cell cannot be converted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the whole conversion on the first failing cell
    #[default]
    FailFast,
    /// Skip the cell, log a warning and keep going
    SkipCell,
}

/// Table -> graph options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    pub error_policy: ErrorPolicy,
}

impl FlattenOptions {
    pub fn lenient() -> Self {
        Self {
            error_policy: ErrorPolicy::SkipCell,
        }
    }
}

/// Top-level settings for both conversion directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// User prefix bindings
    pub prefixes: PrefixMap,
    /// Also bind `rdf`, `rdfs`, `xsd`, `owl` and `xml`
    pub standard_prefixes: bool,
    pub flatten: FlattenOptions,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            prefixes: PrefixMap::new(),
            standard_prefixes: true,
            flatten: FlattenOptions::default(),
        }
    }
}

impl ConversionConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Effective prefix map; user bindings override standard ones
    pub fn prefix_map(&self) -> PrefixMap {
        let mut map = if self.standard_prefixes {
            PrefixMap::with_standard_prefixes()
        } else {
            PrefixMap::new()
        };
        map.extend(&self.prefixes);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;

    #[test]
    fn test_default_config() {
        let config = ConversionConfig::default();
        assert!(config.standard_prefixes);
        assert_eq!(config.flatten.error_policy, ErrorPolicy::FailFast);
        assert_eq!(config.prefix_map().lookup_prefix("xsd"), Some(rdframe_core::vocab::XSD));
    }

    #[test]
    fn test_from_json() {
        let config = ConversionConfig::from_json(
            r#"{
                "prefixes": {"ex": "http://example.org/", "xsd": "http://example.org/xsd#"},
                "flatten": {"error_policy": "skip_cell"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.flatten, FlattenOptions::lenient());
        let prefixes = config.prefix_map();
        assert_eq!(prefixes.lookup_prefix("ex"), Some("http://example.org/"));
        // user binding overrides the standard one
        assert_eq!(prefixes.lookup_prefix("xsd"), Some("http://example.org/xsd#"));
        assert_eq!(prefixes.lookup_prefix("rdf"), Some(rdframe_core::vocab::RDF));
    }

    #[test]
    fn test_without_standard_prefixes() {
        let config = ConversionConfig::from_json(r#"{"standard_prefixes": false}"#).unwrap();
        assert!(config.prefix_map().is_empty());
    }

    #[test]
    fn test_invalid_json_is_settings_error() {
        let err = ConversionConfig::from_json(r#"{"flatten": {"error_policy": "explode"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConversionError::Settings(_)));
    }
}
