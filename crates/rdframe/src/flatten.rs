//! Table -> triples

use crate::column::ColumnDescriptor;
use crate::config::{ErrorPolicy, FlattenOptions};
use crate::error::{ConversionError, Result};
use crate::resolve::Resolver;
use rdframe_core::{GraphStore, Iri, PrefixMap, Tabular, Triple, TripleSink};
use tracing::{debug, warn};

/// A cell skipped in lenient mode
#[derive(Debug)]
pub struct CellError {
    pub row: String,
    pub column: String,
    pub error: ConversionError,
}

/// Outcome of a flattening run
#[derive(Debug, Default)]
pub struct FlattenReport {
    /// Triples handed to the sink
    pub emitted: usize,
    /// Cells that could not be converted (lenient mode only)
    pub skipped: Vec<CellError>,
}

/// Column header decoded once, reused for every row
struct ColumnPlan<'t> {
    label: &'t str,
    descriptor: ColumnDescriptor,
    predicate: Iri,
}

/// Walks a table row by row and emits one triple per present cell
#[derive(Debug, Clone)]
pub struct Flattener<'a> {
    resolver: Resolver<'a>,
    options: FlattenOptions,
}

impl<'a> Flattener<'a> {
    pub fn new(prefixes: &'a PrefixMap, options: FlattenOptions) -> Self {
        Self {
            resolver: Resolver::new(prefixes),
            options,
        }
    }

    /// Convert `table` and push the triples into `sink`.
    ///
    /// With [`ErrorPolicy::FailFast`] nothing reaches the sink unless every
    /// cell converts.
    pub fn flatten_into<T, S>(&self, table: &T, sink: &mut S) -> Result<FlattenReport>
    where
        T: Tabular + ?Sized,
        S: TripleSink + ?Sized,
    {
        let plans: Vec<ColumnPlan<'_>> = table
            .column_labels()
            .iter()
            .map(|label| {
                let descriptor = ColumnDescriptor::decode(label);
                let predicate = self.resolver.resolve_subject_or_predicate(&descriptor.predicate);
                ColumnPlan {
                    label,
                    descriptor,
                    predicate,
                }
            })
            .collect();

        let mut triples = Vec::new();
        let mut skipped = Vec::new();

        for row in table.row_labels() {
            let subject = self.resolver.resolve_subject_or_predicate(row);
            for plan in &plans {
                let Some(cell) = table.get_cell(row, plan.label) else {
                    continue;
                };
                match self.resolver.resolve_cell(cell, &plan.descriptor) {
                    Ok(object) => triples.push(Triple {
                        subject: subject.clone(),
                        predicate: plan.predicate.clone(),
                        object,
                    }),
                    Err(error) => match self.options.error_policy {
                        ErrorPolicy::FailFast => return Err(error.at_cell(row, plan.label)),
                        ErrorPolicy::SkipCell => {
                            warn!(row = %row, column = %plan.label, "Skipping cell: {}", error);
                            skipped.push(CellError {
                                row: row.clone(),
                                column: plan.label.to_string(),
                                error,
                            });
                        }
                    },
                }
            }
        }

        debug!(
            rows = table.row_labels().len(),
            columns = plans.len(),
            triples = triples.len(),
            skipped = skipped.len(),
            "Flattened table"
        );

        let emitted = triples.len();
        for triple in triples {
            sink.add(triple);
        }

        Ok(FlattenReport { emitted, skipped })
    }

    /// Convert `table` into a vector of triples, in row-major order
    pub fn flatten<T: Tabular + ?Sized>(&self, table: &T) -> Result<Vec<Triple>> {
        let mut triples = Vec::new();
        self.flatten_into(table, &mut triples)?;
        Ok(triples)
    }
}

/// Fail-fast table -> triples conversion
pub fn flatten<T: Tabular + ?Sized>(table: &T, prefixes: &PrefixMap) -> Result<Vec<Triple>> {
    Flattener::new(prefixes, FlattenOptions::default()).flatten(table)
}

/// Fail-fast table -> graph conversion
pub fn to_graph<T: Tabular + ?Sized>(table: &T, prefixes: &PrefixMap) -> Result<GraphStore> {
    let mut graph = GraphStore::new();
    Flattener::new(prefixes, FlattenOptions::default()).flatten_into(table, &mut graph)?;
    Ok(graph)
}
