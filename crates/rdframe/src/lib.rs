//! # rdframe
//!
//! Converts between tables and RDF graphs. Column names carry everything a
//! cell needs to become a triple object:
//!
//! ```text
//! PREDICATE{KIND}[INDEX](DATATYPE)@LANGUAGE
//! ```
//!
//! - [`flatten`] / [`to_graph`]: every present cell at (row, column) becomes
//!   `(row, predicate, object)`
//! - [`build`] / [`to_frame`]: every subject becomes a row, with one column per
//!   predicate, object shape and position
//!
//! ```
//! use rdframe::{build, flatten, DataFrame, GraphStore, PrefixMap};
//!
//! let prefixes = PrefixMap::new().with("ex", "http://example.org/");
//! let frame = DataFrame::new()
//!     .with_cell("ex:one", "ex:name{Literal}@en", "One")
//!     .with_cell("ex:one", "ex:next{URIRef}", "ex:two");
//!
//! let triples = flatten(&frame, &prefixes).unwrap();
//! assert_eq!(triples.len(), 2);
//!
//! let graph: GraphStore = triples.into_iter().collect();
//! let rebuilt = build(&graph, &prefixes);
//! assert!(rebuilt.equivalent(&frame));
//! ```

pub mod build;
pub mod column;
pub mod config;
pub mod error;
pub mod flatten;
pub mod resolve;

pub use build::{build, to_frame, Bucket, FrameBuilder};
pub use column::ColumnDescriptor;
pub use config::{ConversionConfig, ErrorPolicy, FlattenOptions};
pub use error::{ConversionError, Result};
pub use flatten::{flatten, to_graph, CellError, FlattenReport, Flattener};
pub use resolve::Resolver;

pub use rdframe_core::{
    vocab, Cell, DataFrame, GraphStore, Identifier, IdentifierKind, Iri, Literal, PrefixMap,
    Tabular, TabularMut, Triple, TripleSink, TripleSource,
};
