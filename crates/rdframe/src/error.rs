//! Conversion errors

use rdframe_core::UnknownKind;
use thiserror::Error;

/// Errors raised while turning a table into triples.
///
/// Building a table from a graph has no error path.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Cell value is not valid UTF-8: {0}")]
    Format(#[from] std::str::Utf8Error),

    #[error("Not a valid URI: {0}")]
    InvalidUri(String),

    #[error("Can only create Literal, URIRef or BNode but was {0}")]
    UnknownIdentifierKind(String),

    #[error("Not a valid URI for datatype: {0}")]
    Configuration(String),

    #[error("Invalid conversion settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Row {row:?}, column {column:?}: {source}")]
    Cell {
        row: String,
        column: String,
        #[source]
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    /// Attach row/column context to a cell-level error
    pub fn at_cell(self, row: &str, column: &str) -> Self {
        ConversionError::Cell {
            row: row.to_string(),
            column: column.to_string(),
            source: Box::new(self),
        }
    }

    /// The underlying error with any cell context stripped
    pub fn root(&self) -> &ConversionError {
        match self {
            ConversionError::Cell { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<UnknownKind> for ConversionError {
    fn from(err: UnknownKind) -> Self {
        ConversionError::UnknownIdentifierKind(err.0)
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
