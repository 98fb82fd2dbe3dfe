//! RDF data model shared by the tabular codec

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fully qualified (or passed-through) resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Iri(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Iri(s)
    }
}

/// RDF literal.
///
/// A literal carries at most one of datatype or language. The constructors
/// drop the datatype whenever a language is given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    value: String,
    datatype: Option<Iri>,
    language: Option<String>,
}

impl Literal {
    /// Untyped literal
    pub fn simple<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed<S: Into<String>>(value: S, datatype: Iri) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype),
            language: None,
        }
    }

    pub fn language_tagged<S: Into<String>, L: Into<String>>(value: S, language: L) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// Build a literal from optional metadata; the language wins over the datatype
    pub fn new<S: Into<String>>(value: S, datatype: Option<Iri>, language: Option<String>) -> Self {
        match (language, datatype) {
            (Some(language), _) => Self::language_tagged(value, language),
            (None, Some(datatype)) => Self::typed(value, datatype),
            (None, None) => Self::simple(value),
        }
    }

    /// Lexical form
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// The three identifier classes a triple object can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentifierKind {
    Uri,
    BlankNode,
    Literal,
}

impl IdentifierKind {
    /// Name used inside `{...}` in column names
    pub fn wire_name(self) -> &'static str {
        match self {
            IdentifierKind::Uri => "URIRef",
            IdentifierKind::BlankNode => "BNode",
            IdentifierKind::Literal => "Literal",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Raised when a kind token names none of the known identifier classes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown identifier kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for IdentifierKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "URIRef" | "Uri" | "URI" | "IRI" => Ok(IdentifierKind::Uri),
            "BNode" | "BlankNode" => Ok(IdentifierKind::BlankNode),
            "Literal" => Ok(IdentifierKind::Literal),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Identifier {
    Uri(Iri),
    BlankNode(String),
    Literal(Literal),
}

impl Identifier {
    pub fn uri<S: Into<String>>(s: S) -> Self {
        Identifier::Uri(Iri::new(s))
    }

    pub fn blank_node<S: Into<String>>(label: S) -> Self {
        Identifier::BlankNode(label.into())
    }

    pub fn kind(&self) -> IdentifierKind {
        match self {
            Identifier::Uri(_) => IdentifierKind::Uri,
            Identifier::BlankNode(_) => IdentifierKind::BlankNode,
            Identifier::Literal(_) => IdentifierKind::Literal,
        }
    }

    /// Bare string form: IRI text, blank node label or literal lexical form
    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Uri(iri) => iri.as_str(),
            Identifier::BlankNode(label) => label,
            Identifier::Literal(literal) => literal.value(),
        }
    }
}

impl From<Iri> for Identifier {
    fn from(iri: Iri) -> Self {
        Identifier::Uri(iri)
    }
}

impl From<Literal> for Identifier {
    fn from(literal: Literal) -> Self {
        Identifier::Literal(literal)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Uri(iri) => write!(f, "<{}>", iri),
            Identifier::BlankNode(label) => write!(f, "_:{}", label),
            Identifier::Literal(literal) => {
                write!(f, "\"{}\"", literal.value())?;
                if let Some(language) = literal.language() {
                    write!(f, "@{}", language)
                } else if let Some(datatype) = literal.datatype() {
                    write!(f, "^^<{}>", datatype)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// RDF triple; subject and predicate are IRIs by construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Identifier,
}

impl Triple {
    pub fn new<S, P, O>(subject: S, predicate: P, object: O) -> Self
    where
        S: Into<Iri>,
        P: Into<Iri>,
        O: Into<Identifier>,
    {
        Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}
