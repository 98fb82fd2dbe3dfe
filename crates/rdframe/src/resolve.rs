//! Turn raw table strings into typed identifiers

use crate::column::ColumnDescriptor;
use crate::error::{ConversionError, Result};
use rdframe_core::prefix::{is_absolute_uri, is_curie};
use rdframe_core::{Cell, Identifier, IdentifierKind, Iri, Literal, PrefixMap};

/// Resolves row labels, column predicates and cell values against a prefix map
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    prefixes: &'a PrefixMap,
}

impl<'a> Resolver<'a> {
    pub fn new(prefixes: &'a PrefixMap) -> Self {
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &'a PrefixMap {
        self.prefixes
    }

    /// Absolute URI as is, CURIE expanded (or passed through when its prefix
    /// is unbound). `None` for anything else.
    fn resolve_uri(&self, raw: &str) -> Option<Iri> {
        if is_absolute_uri(raw) {
            Some(Iri::new(raw))
        } else if is_curie(raw) {
            Some(self.prefixes.expand(raw).unwrap_or_else(|| Iri::new(raw)))
        } else {
            None
        }
    }

    /// Subjects and predicates are always IRIs; unrecognised strings pass
    /// through unchanged.
    pub fn resolve_subject_or_predicate(&self, raw: &str) -> Iri {
        self.resolve_uri(raw).unwrap_or_else(|| Iri::new(raw))
    }

    pub fn resolve_datatype(&self, raw: &str) -> Result<Iri> {
        self.resolve_uri(raw)
            .ok_or_else(|| ConversionError::Configuration(raw.to_string()))
    }

    fn literal(
        &self,
        raw: &str,
        datatype: Option<&str>,
        language: Option<&str>,
    ) -> Result<Identifier> {
        let literal = match (language, datatype) {
            (Some(language), _) => Literal::language_tagged(raw, language),
            (None, Some(datatype)) => Literal::typed(raw, self.resolve_datatype(datatype)?),
            (None, None) => Literal::simple(raw),
        };
        Ok(Identifier::Literal(literal))
    }

    /// Resolve an object value given the column's kind, datatype and language
    pub fn resolve_object(
        &self,
        raw: &str,
        kind: Option<IdentifierKind>,
        datatype: Option<&str>,
        language: Option<&str>,
    ) -> Result<Identifier> {
        match kind {
            None => {
                if language.is_some() || datatype.is_some() {
                    self.literal(raw, datatype, language)
                } else if let Some(iri) = self.resolve_uri(raw) {
                    Ok(Identifier::Uri(iri))
                } else {
                    Ok(Identifier::Literal(Literal::simple(raw)))
                }
            }
            Some(IdentifierKind::Literal) => self.literal(raw, datatype, language),
            Some(IdentifierKind::Uri) => self
                .resolve_uri(raw)
                .map(Identifier::Uri)
                .ok_or_else(|| ConversionError::InvalidUri(raw.to_string())),
            Some(IdentifierKind::BlankNode) => Ok(Identifier::BlankNode(raw.to_string())),
        }
    }

    /// Resolve a table cell under a column descriptor.
    ///
    /// Byte cells are decoded as UTF-8 first. Typed cells contribute their
    /// XSD datatype unless the column already fixes a datatype or language,
    /// or forces a non-literal kind.
    pub fn resolve_cell(&self, cell: &Cell, descriptor: &ColumnDescriptor) -> Result<Identifier> {
        let lexical = cell.lexical_form()?;
        let kind = descriptor.identifier_kind()?;

        let implied = match kind {
            None | Some(IdentifierKind::Literal) if descriptor.language.is_none() => {
                cell.implied_datatype()
            }
            _ => None,
        };
        let datatype = descriptor.datatype.as_deref().or(implied);

        self.resolve_object(&lexical, kind, datatype, descriptor.language.as_deref())
    }
}
