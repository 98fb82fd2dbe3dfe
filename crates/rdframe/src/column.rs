//! Column name grammar: `PREDICATE{KIND}[INDEX](DATATYPE)@LANGUAGE`
//!
//! Every part after the predicate is optional, but when present the parts
//! appear in that order. The predicate cannot contain `(){}[]@`: an IRI such
//! as `http://ex/p(x)` still encodes, but decodes with `x` as its datatype.
//! See [`is_encodable_predicate`].
//!
//! Decoding is lenient: a group that does not match is treated as absent,
//! so hand-written headers such as `ex:name` or `ex:name@en` are accepted.
//! Encoding always produces the canonical form, which decodes back to the
//! same descriptor.

use lazy_static::lazy_static;
use rdframe_core::{IdentifierKind, UnknownKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const PREDICATE_DELIMITERS: &[char] = &['(', ')', '{', '}', '[', ']', '@'];

lazy_static! {
    static ref COLUMN_NAME: Regex = Regex::new(concat!(
        r"^(?P<predicate>[^(){}\[\]@]*)",
        r"(?:\{(?P<kind>\w*)\})?",
        r"(?:\[(?P<index>\d*)\])?",
        r"(?:\((?P<datatype>[^()]*)\))?",
        r"(?:@(?P<language>[\w\-]*))?",
    ))
    .unwrap();
}

/// Structured form of a column name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub predicate: String,
    /// Raw kind token; interpreted when a cell is resolved
    pub kind: Option<String>,
    pub index: Option<usize>,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl ColumnDescriptor {
    pub fn new<S: Into<String>>(predicate: S) -> Self {
        Self {
            predicate: predicate.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: IdentifierKind) -> Self {
        self.kind = Some(kind.wire_name().to_string());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_datatype<S: Into<String>>(mut self, datatype: S) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Parse a column name. Never fails.
    pub fn decode(name: &str) -> Self {
        let Some(captures) = COLUMN_NAME.captures(name) else {
            return Self::new(name);
        };
        let group = |key: &str| {
            captures
                .name(key)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            predicate: group("predicate").unwrap_or_default(),
            kind: group("kind"),
            index: group("index").and_then(|s| s.parse().ok()),
            datatype: group("datatype"),
            language: group("language"),
        }
    }

    /// Canonical column name for a bucket needing `multiplicity` columns.
    ///
    /// The index is only rendered when the bucket spans more than one column.
    pub fn encode(&self, multiplicity: usize) -> String {
        let mut name = self.predicate.clone();
        if let Some(kind) = &self.kind {
            name.push('{');
            name.push_str(kind);
            name.push('}');
        }
        if let Some(index) = self.index.filter(|_| multiplicity > 1) {
            name.push_str(&format!("[{}]", index));
        }
        if let Some(datatype) = &self.datatype {
            name.push('(');
            name.push_str(datatype);
            name.push(')');
        }
        if let Some(language) = &self.language {
            name.push('@');
            name.push_str(language);
        }
        name
    }

    /// Interpret the kind token, if any
    pub fn identifier_kind(&self) -> Result<Option<IdentifierKind>, UnknownKind> {
        self.kind.as_deref().map(str::parse::<IdentifierKind>).transpose()
    }
}

impl fmt::Display for ColumnDescriptor {
    /// Renders every present part, index included
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(usize::MAX))
    }
}

/// Whether `predicate` survives an encode/decode round trip
pub fn is_encodable_predicate(predicate: &str) -> bool {
    !predicate.contains(PREDICATE_DELIMITERS)
}

/// Shorthand for [`ColumnDescriptor::decode`]
pub fn decode(name: &str) -> ColumnDescriptor {
    ColumnDescriptor::decode(name)
}

/// Shorthand for [`ColumnDescriptor::encode`]
pub fn encode(descriptor: &ColumnDescriptor, multiplicity: usize) -> String {
    descriptor.encode(multiplicity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_bare_predicate() {
        assert_eq!(decode("ex:p"), ColumnDescriptor::new("ex:p"));
        assert_eq!(
            decode("http://example.org/rdframe/uri"),
            ColumnDescriptor::new("http://example.org/rdframe/uri")
        );
    }

    #[test]
    fn test_decode_kind_and_datatype() {
        let descriptor = decode("ex:p{Literal}(xsd:string)");
        assert_eq!(descriptor.predicate, "ex:p");
        assert_eq!(descriptor.kind.as_deref(), Some("Literal"));
        assert_eq!(descriptor.index, None);
        assert_eq!(descriptor.datatype.as_deref(), Some("xsd:string"));
        assert_eq!(descriptor.language, None);
    }

    #[test]
    fn test_decode_all_parts() {
        let descriptor =
            decode("http://ex/string{Literal}[1](http://www.w3.org/2001/XMLSchema#string)@en-GB");
        assert_eq!(
            descriptor,
            ColumnDescriptor::new("http://ex/string")
                .with_kind(IdentifierKind::Literal)
                .with_index(1)
                .with_datatype("http://www.w3.org/2001/XMLSchema#string")
                .with_language("en-GB")
        );
    }

    #[test]
    fn test_decode_subsets() {
        assert_eq!(decode("ex:p@ne"), ColumnDescriptor::new("ex:p").with_language("ne"));
        assert_eq!(decode("ex:p[3]"), ColumnDescriptor::new("ex:p").with_index(3));
        assert_eq!(decode("ex:p(xsd:int)"), ColumnDescriptor::new("ex:p").with_datatype("xsd:int"));
        assert_eq!(
            decode("ex:p{Literal}[0]@en"),
            ColumnDescriptor::new("ex:p")
                .with_kind(IdentifierKind::Literal)
                .with_index(0)
                .with_language("en")
        );
    }

    #[test]
    fn test_decode_is_lenient() {
        // unterminated group: everything after the predicate is dropped
        assert_eq!(decode("ex:p{Lit"), ColumnDescriptor::new("ex:p"));
        // empty groups count as absent
        assert_eq!(decode("ex:p{}[]()@"), ColumnDescriptor::new("ex:p"));
        // out of order: the language comes first so the rest is ignored
        assert_eq!(decode("ex:p@en{Literal}"), ColumnDescriptor::new("ex:p").with_language("en"));
        // index too large for usize
        assert_eq!(decode("ex:p[99999999999999999999999]").index, None);
        assert_eq!(decode(""), ColumnDescriptor::default());
    }

    #[test]
    fn test_decode_keeps_unknown_kind_token() {
        let descriptor = decode("ex:p{Variable}");
        assert_eq!(descriptor.kind.as_deref(), Some("Variable"));
        assert!(descriptor.identifier_kind().is_err());
    }

    #[test]
    fn test_encode_drops_index_for_single_column() {
        let descriptor = ColumnDescriptor::new("ex:p")
            .with_kind(IdentifierKind::Literal)
            .with_index(0)
            .with_language("ru");
        assert_eq!(descriptor.encode(1), "ex:p{Literal}@ru");
        assert_eq!(descriptor.encode(2), "ex:p{Literal}[0]@ru");
    }

    #[test]
    fn test_encode_canonical_order() {
        let descriptor = ColumnDescriptor::new("http://ex/string")
            .with_kind(IdentifierKind::Literal)
            .with_index(1)
            .with_datatype("xsd:string");
        assert_eq!(descriptor.encode(2), "http://ex/string{Literal}[1](xsd:string)");
        assert_eq!(descriptor.to_string(), "http://ex/string{Literal}[1](xsd:string)");

        let uri = ColumnDescriptor::new("ex:link").with_kind(IdentifierKind::Uri);
        assert_eq!(uri.encode(1), "ex:link{URIRef}");
        let blank = ColumnDescriptor::new("ex:node").with_kind(IdentifierKind::BlankNode);
        assert_eq!(blank.encode(1), "ex:node{BNode}");
    }

    #[test]
    fn test_encode_shorthand() {
        let descriptor = ColumnDescriptor::new("ex:p")
            .with_kind(IdentifierKind::Literal)
            .with_index(1);
        assert_eq!(encode(&descriptor, 2), "ex:p{Literal}[1]");
        assert_eq!(encode(&descriptor, 1), "ex:p{Literal}");
    }

    #[test]
    fn test_predicate_delimiters_break_round_trip() {
        assert!(is_encodable_predicate("http://ex/p"));
        assert!(is_encodable_predicate("ex:p"));
        assert!(!is_encodable_predicate("http://ex/p(x)"));
        assert!(!is_encodable_predicate("mailto:a@b"));

        let descriptor =
            ColumnDescriptor::new("http://ex/p(x)").with_kind(IdentifierKind::Literal);
        let decoded = decode(&descriptor.encode(1));
        assert_eq!(decoded.predicate, "http://ex/p");
        assert_eq!(decoded.datatype.as_deref(), Some("x"));
    }

    #[test]
    fn test_identifier_kind_aliases() {
        assert_eq!(decode("p{URIRef}").identifier_kind(), Ok(Some(IdentifierKind::Uri)));
        assert_eq!(decode("p{Uri}").identifier_kind(), Ok(Some(IdentifierKind::Uri)));
        assert_eq!(decode("p{BlankNode}").identifier_kind(), Ok(Some(IdentifierKind::BlankNode)));
        assert_eq!(decode("p").identifier_kind(), Ok(None));
    }

    fn kind_strategy() -> impl Strategy<Value = Option<IdentifierKind>> {
        prop_oneof![
            Just(None),
            Just(Some(IdentifierKind::Uri)),
            Just(Some(IdentifierKind::BlankNode)),
            Just(Some(IdentifierKind::Literal)),
        ]
    }

    proptest! {
        #[test]
        fn prop_decode_never_panics(name in ".*") {
            let _ = decode(&name);
        }

        #[test]
        fn prop_decode_inverts_encode(
            predicate in "[a-zA-Z0-9:/#._~-]{0,24}",
            kind in kind_strategy(),
            index in proptest::option::of(0usize..64),
            datatype in proptest::option::of("[a-zA-Z0-9:/#._]{1,24}"),
            language in proptest::option::of("[a-z]{2}(-[A-Z]{2})?"),
        ) {
            let descriptor = ColumnDescriptor {
                predicate,
                kind: kind.map(|k| k.wire_name().to_string()),
                index,
                datatype,
                language,
            };
            prop_assert_eq!(decode(&descriptor.encode(2)), descriptor.clone());

            let single = ColumnDescriptor { index: None, ..descriptor };
            prop_assert_eq!(decode(&single.encode(1)), single);
        }
    }
}
