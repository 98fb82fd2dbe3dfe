//! Prefix map for CURIE expansion and URI normalization

use crate::model::Iri;
use crate::vocab;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

lazy_static! {
    static ref ABSOLUTE_URI: Regex = Regex::new(r"^https?://").unwrap();
    static ref CURIE: Regex = Regex::new(r"^(\w+):(\w+)$").unwrap();
    static ref LOCAL_NAME: Regex = Regex::new(r"^\w+$").unwrap();
}

/// True if the value looks like an absolute http(s) URI
pub fn is_absolute_uri(value: &str) -> bool {
    ABSOLUTE_URI.is_match(value)
}

/// True if the value has the `prefix:local` shape with both sides non-empty
pub fn is_curie(value: &str) -> bool {
    CURIE.is_match(value)
}

/// Split a CURIE into `(prefix, local)`
pub fn split_curie(value: &str) -> Option<(&str, &str)> {
    let captures = CURIE.captures(value)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Prefix -> namespace bindings.
///
/// The map is built up front and then only read during a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixMap {
    namespaces: BTreeMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with `rdf`, `rdfs`, `xsd`, `owl` and `xml` bound
    pub fn with_standard_prefixes() -> Self {
        let mut map = Self::new();
        for (prefix, namespace) in vocab::STANDARD_PREFIXES {
            map.bind(*prefix, *namespace);
        }
        map
    }

    /// Bind a prefix, replacing any earlier binding for it
    pub fn bind<P: Into<String>, N: Into<String>>(&mut self, prefix: P, namespace: N) -> &mut Self {
        self.namespaces.insert(prefix.into(), namespace.into());
        self
    }

    /// Builder-style variant of [`PrefixMap::bind`]
    pub fn with<P: Into<String>, N: Into<String>>(mut self, prefix: P, namespace: N) -> Self {
        self.bind(prefix, namespace);
        self
    }

    pub fn lookup_prefix(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Merge another map in; bindings from `other` win
    pub fn extend(&mut self, other: &PrefixMap) {
        for (prefix, namespace) in other.iter() {
            self.bind(prefix, namespace);
        }
    }

    /// Expand a CURIE whose prefix is bound. Returns `None` for anything else.
    pub fn expand(&self, curie: &str) -> Option<Iri> {
        let (prefix, local) = split_curie(curie)?;
        let namespace = self.lookup_prefix(prefix)?;
        Some(Iri::new(format!("{}{}", namespace, local)))
    }

    /// Shortest known string form of a URI.
    ///
    /// Picks the longest bound namespace the URI starts with, provided the
    /// remainder is a valid local name, so the result expands back to the
    /// same URI. Falls back to the URI text unchanged.
    pub fn normalize(&self, uri: &Iri) -> String {
        let text = uri.as_str();
        self.namespaces
            .iter()
            .filter(|(prefix, _)| LOCAL_NAME.is_match(prefix))
            .filter_map(|(prefix, namespace)| {
                let local = text.strip_prefix(namespace.as_str())?;
                LOCAL_NAME.is_match(local).then_some((prefix, namespace, local))
            })
            .max_by_key(|(_, namespace, _)| namespace.len())
            .map(|(prefix, _, local)| format!("{}:{}", prefix, local))
            .unwrap_or_else(|| text.to_string())
    }
}

impl<P: Into<String>, N: Into<String>> FromIterator<(P, N)> for PrefixMap {
    fn from_iter<I: IntoIterator<Item = (P, N)>>(iter: I) -> Self {
        let mut map = PrefixMap::new();
        for (prefix, namespace) in iter {
            map.bind(prefix, namespace);
        }
        map
    }
}
