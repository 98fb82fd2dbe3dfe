//! Triple storage seams and the in-memory graph store

use crate::model::{Identifier, Iri, Triple};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Anything triples can be emitted into
pub trait TripleSink {
    fn add(&mut self, triple: Triple);
}

/// Read access the frame builder needs from a graph
pub trait TripleSource {
    /// Distinct subjects, sorted
    fn subjects(&self) -> Vec<Iri>;

    /// All `(predicate, object)` pairs asserted for a subject
    fn predicate_objects(&self, subject: &Iri) -> Vec<(Iri, Identifier)>;
}

impl TripleSink for Vec<Triple> {
    fn add(&mut self, triple: Triple) {
        self.push(triple);
    }
}

/// In-memory graph with set semantics and a subject index
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Triples in insertion order
    triples: Vec<Triple>,
    /// Membership set used to drop duplicates
    members: HashSet<Triple>,
    /// Subject index: subject -> positions in `triples`
    subject_index: HashMap<Iri, SmallVec<[usize; 8]>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.members.contains(&triple) {
            return false;
        }

        let index = self.triples.len();
        self.subject_index
            .entry(triple.subject.clone())
            .or_insert_with(SmallVec::new)
            .push(index);
        self.members.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.members.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples asserted for a subject, in insertion order
    pub fn triples_for_subject(&self, subject: &Iri) -> Vec<&Triple> {
        self.subject_index
            .get(subject)
            .map(|indices| indices.iter().filter_map(|&i| self.triples.get(i)).collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.triples.clear();
        self.members.clear();
        self.subject_index.clear();
    }
}

impl TripleSink for GraphStore {
    fn add(&mut self, triple: Triple) {
        self.insert(triple);
    }
}

impl TripleSource for GraphStore {
    fn subjects(&self) -> Vec<Iri> {
        let mut subjects: Vec<Iri> = self.subject_index.keys().cloned().collect();
        subjects.sort();
        subjects
    }

    fn predicate_objects(&self, subject: &Iri) -> Vec<(Iri, Identifier)> {
        self.triples_for_subject(subject)
            .into_iter()
            .map(|t| (t.predicate.clone(), t.object.clone()))
            .collect()
    }
}

impl FromIterator<Triple> for GraphStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut store = GraphStore::new();
        for triple in iter {
            store.insert(triple);
        }
        store
    }
}

impl Extend<Triple> for GraphStore {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

/// Two stores hold the same set of triples, regardless of insertion order
impl PartialEq for GraphStore {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for GraphStore {}
