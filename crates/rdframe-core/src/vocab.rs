//! Well-known namespaces and datatype IRIs

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// Prefixes bound by default when standard prefixes are requested
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("owl", OWL),
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xml", XML),
    ("xsd", XSD),
];
