//! # rdframe core
//!
//! Data model shared by the table <-> graph codec: identifiers, triples,
//! prefix maps, and the narrow store/table seams the conversion consumes.

pub mod model;
pub mod prefix;
pub mod store;
pub mod table;
pub mod vocab;

pub use model::*;
pub use prefix::PrefixMap;
pub use store::*;
pub use table::*;
