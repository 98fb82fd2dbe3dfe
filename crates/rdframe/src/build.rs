//! Triples -> table
//!
//! Column width is global while value counts are per entity, so the frame is
//! built from the whole graph in three steps:
//!
//! 1. discovery: per subject, group objects of each predicate by bucket
//!    (kind, datatype, language) and sort each group;
//! 2. sizing: per (predicate, bucket), the multiplicity is the largest group
//!    seen for any subject;
//! 3. placement: the i-th sorted object of a group goes in column i of its
//!    bucket. Shorter groups leave the trailing columns absent.
//!
//! Traversal is subject-major, so a subject's positions never interleave
//! with another subject's.

use crate::column::{is_encodable_predicate, ColumnDescriptor};
use rdframe_core::prefix::{is_absolute_uri, is_curie};
use rdframe_core::{
    Cell, DataFrame, Identifier, IdentifierKind, Iri, PrefixMap, TabularMut, TripleSource,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Shape of an object value: what the column name encodes besides the predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket {
    pub kind: IdentifierKind,
    pub datatype: Option<Iri>,
    pub language: Option<String>,
}

impl Bucket {
    pub fn of(object: &Identifier) -> Self {
        match object {
            Identifier::Uri(_) => Self::bare(IdentifierKind::Uri),
            Identifier::BlankNode(_) => Self::bare(IdentifierKind::BlankNode),
            Identifier::Literal(literal) => Self {
                kind: IdentifierKind::Literal,
                datatype: literal.datatype().cloned(),
                language: literal.language().map(str::to_string),
            },
        }
    }

    fn bare(kind: IdentifierKind) -> Self {
        Self {
            kind,
            datatype: None,
            language: None,
        }
    }
}

type GroupKey = (Iri, Bucket);

/// One subject's objects, grouped and sorted
struct SubjectGroups {
    subject: Iri,
    groups: BTreeMap<GroupKey, Vec<Identifier>>,
}

/// Builds a frame from a graph, normalizing URIs through a prefix map
#[derive(Debug, Clone, Copy)]
pub struct FrameBuilder<'a> {
    prefixes: &'a PrefixMap,
}

impl<'a> FrameBuilder<'a> {
    pub fn new(prefixes: &'a PrefixMap) -> Self {
        Self { prefixes }
    }

    fn discover<G: TripleSource + ?Sized>(&self, graph: &G) -> Vec<SubjectGroups> {
        graph
            .subjects()
            .into_iter()
            .map(|subject| {
                let mut groups: BTreeMap<GroupKey, Vec<Identifier>> = BTreeMap::new();
                for (predicate, object) in graph.predicate_objects(&subject) {
                    let bucket = Bucket::of(&object);
                    groups.entry((predicate, bucket)).or_default().push(object);
                }
                for objects in groups.values_mut() {
                    objects.sort();
                    objects.dedup();
                }
                SubjectGroups { subject, groups }
            })
            .collect()
    }

    fn size(discovered: &[SubjectGroups]) -> BTreeMap<GroupKey, usize> {
        let mut multiplicity: BTreeMap<GroupKey, usize> = BTreeMap::new();
        for entry in discovered {
            for (key, objects) in &entry.groups {
                let max = multiplicity.entry(key.clone()).or_insert(0);
                *max = (*max).max(objects.len());
            }
        }
        multiplicity
    }

    /// Descriptor for one (predicate, bucket), with IRIs shortened through
    /// the prefix map or left in full
    fn descriptor(&self, (predicate, bucket): &GroupKey, shorten: bool) -> ColumnDescriptor {
        let render = |iri: &Iri| {
            if shorten {
                self.prefixes.normalize(iri)
            } else {
                iri.to_string()
            }
        };
        let mut descriptor = ColumnDescriptor::new(render(predicate)).with_kind(bucket.kind);
        descriptor.datatype = bucket.datatype.as_ref().map(render);
        descriptor.language = bucket.language.clone();
        descriptor
    }

    /// Cell text for an object; datatype and language live in the column name
    fn project(&self, object: &Identifier) -> String {
        match object {
            Identifier::Uri(iri) => {
                let text = self.prefixes.normalize(iri);
                if !is_absolute_uri(&text) && !is_curie(&text) {
                    warn!(uri = %iri, "URI object will not flatten back to a URI");
                }
                text
            }
            Identifier::BlankNode(label) => label.clone(),
            Identifier::Literal(literal) => literal.value().to_string(),
        }
    }

    /// Write the graph into `table`.
    ///
    /// Only `http(s)://` URIs and CURIEs flatten back to URIs, so URI objects
    /// such as `urn:` or `mailto:` produce cells that [`crate::flatten`]
    /// rejects. They are logged as warnings.
    pub fn build_into<G, T>(&self, graph: &G, table: &mut T)
    where
        G: TripleSource + ?Sized,
        T: TabularMut + ?Sized,
    {
        let discovered = self.discover(graph);
        let multiplicity = Self::size(&discovered);

        let keys: Vec<(&GroupKey, usize)> = multiplicity.iter().map(|(k, &m)| (k, m)).collect();
        let bases: Vec<(String, String)> = keys
            .iter()
            .map(|(key, _)| {
                let short = self.descriptor(key, true).encode(1);
                (short, self.descriptor(key, false).encode(1))
            })
            .collect();
        let shorten = keep_short(&bases, "Column");

        let mut seen = HashSet::new();
        let mut columns: BTreeMap<&GroupKey, Vec<String>> = BTreeMap::new();
        for ((key, m), shorten) in keys.into_iter().zip(shorten) {
            let descriptor = self.descriptor(key, shorten);
            if !is_encodable_predicate(&descriptor.predicate) {
                warn!(predicate = %key.0, "Predicate contains column name delimiters");
            }
            if m > 1 {
                trace!(
                    predicate = %key.0,
                    kind = %key.1.kind,
                    multiplicity = m,
                    "Indexed columns"
                );
            }
            let names: Vec<String> = (0..m)
                .map(|index| descriptor.clone().with_index(index).encode(m))
                .collect();
            for name in &names {
                if !seen.insert(name.clone()) {
                    warn!(column = %name, predicate = %key.0, "Column name already in use");
                }
                table.insert_column(name);
            }
            columns.insert(key, names);
        }

        let rows: Vec<String> = {
            let candidates: Vec<(String, String)> = discovered
                .iter()
                .map(|entry| {
                    let short = self.prefixes.normalize(&entry.subject);
                    (short, entry.subject.to_string())
                })
                .collect();
            let shorten = keep_short(&candidates, "Row");
            candidates
                .into_iter()
                .zip(shorten)
                .map(|((short, full), shorten)| if shorten { short } else { full })
                .collect()
        };

        let mut cells = 0usize;
        for (entry, row) in discovered.iter().zip(&rows) {
            for (key, objects) in &entry.groups {
                let Some(names) = columns.get(key) else {
                    continue;
                };
                for (name, object) in names.iter().zip(objects) {
                    table.set_cell(row, name, Cell::Text(self.project(object)));
                    cells += 1;
                }
            }
        }

        debug!(
            subjects = discovered.len(),
            columns = columns.values().map(Vec::len).sum::<usize>(),
            cells,
            "Built frame"
        );
    }

    pub fn build<G: TripleSource + ?Sized>(&self, graph: &G) -> DataFrame {
        let mut frame = DataFrame::new();
        self.build_into(graph, &mut frame);
        frame
    }
}

/// Prefix shortening can map two IRIs to one label when a graph mixes a full
/// IRI with a CURIE-shaped one. Every label in such a clash that was actually
/// shortened falls back to its full form. Takes `(short, full)` pairs and
/// returns, per pair, whether the short form is kept.
fn keep_short(candidates: &[(String, String)], what: &str) -> Vec<bool> {
    let mut claims: HashMap<&str, Vec<&str>> = HashMap::new();
    for (short, full) in candidates {
        claims.entry(short.as_str()).or_default().push(full.as_str());
    }
    for (label, iris) in &claims {
        if iris.len() > 1 {
            warn!(label = %label, iris = ?iris, "{} labels collide, keeping full IRIs", what);
        }
    }
    candidates
        .iter()
        .map(|(short, full)| short == full || claims[short.as_str()].len() == 1)
        .collect()
}

/// Graph -> frame conversion
pub fn build<G: TripleSource + ?Sized>(graph: &G, prefixes: &PrefixMap) -> DataFrame {
    FrameBuilder::new(prefixes).build(graph)
}

/// Alias of [`build`] named after the reverse of [`crate::to_graph`]
pub fn to_frame<G: TripleSource + ?Sized>(graph: &G, prefixes: &PrefixMap) -> DataFrame {
    build(graph, prefixes)
}
