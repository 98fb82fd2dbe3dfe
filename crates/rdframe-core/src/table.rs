//! Tabular seams and the in-memory data frame

use crate::vocab;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::str::Utf8Error;

/// A present cell value. Absent cells are represented by `None` at the
/// [`Tabular`] interface, never by an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Double(f64),
    Boolean(bool),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    /// String projection of the value. Byte cells must hold UTF-8.
    pub fn lexical_form(&self) -> Result<Cow<'_, str>, Utf8Error> {
        match self {
            Cell::Text(text) => Ok(Cow::Borrowed(text)),
            Cell::Bytes(bytes) => std::str::from_utf8(bytes).map(Cow::Borrowed),
            Cell::Integer(n) => Ok(Cow::Owned(n.to_string())),
            Cell::Double(x) => Ok(Cow::Owned(double_lexical(*x))),
            Cell::Boolean(b) => Ok(Cow::Owned(b.to_string())),
        }
    }

    /// XSD datatype a typed cell carries on its own
    pub fn implied_datatype(&self) -> Option<&'static str> {
        match self {
            Cell::Text(_) | Cell::Bytes(_) => None,
            Cell::Integer(_) => Some(vocab::XSD_INTEGER),
            Cell::Double(_) => Some(vocab::XSD_DOUBLE),
            Cell::Boolean(_) => Some(vocab::XSD_BOOLEAN),
        }
    }
}

fn double_lexical(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x == f64::INFINITY {
        "INF".to_string()
    } else if x == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format!("{:?}", x)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<Vec<u8>> for Cell {
    fn from(bytes: Vec<u8>) -> Self {
        Cell::Bytes(bytes)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Integer(n)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Double(x)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Boolean(b)
    }
}

/// Read access the flattener needs from a table
pub trait Tabular {
    /// Ordered, unique row labels
    fn row_labels(&self) -> &[String];

    /// Ordered, unique column labels
    fn column_labels(&self) -> &[String];

    fn get_cell(&self, row: &str, column: &str) -> Option<&Cell>;
}

/// Write access the frame builder needs
pub trait TabularMut: Tabular {
    /// Declare a column up front so layout order does not depend on which
    /// cells get written first
    fn insert_column(&mut self, column: &str);

    fn set_cell(&mut self, row: &str, column: &str, cell: Cell);
}

/// Sparse row x column table keyed by labels
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    rows: Vec<String>,
    columns: Vec<String>,
    row_index: HashMap<String, usize>,
    column_index: HashMap<String, usize>,
    cells: HashMap<(usize, usize), Cell>,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent form of [`TabularMut::set_cell`]
    pub fn with_cell<C: Into<Cell>>(mut self, row: &str, column: &str, cell: C) -> Self {
        self.set_cell(row, column, cell.into());
        self
    }

    /// Append a row label if it is new; returns its position
    pub fn insert_row(&mut self, row: &str) -> usize {
        if let Some(&index) = self.row_index.get(row) {
            return index;
        }
        let index = self.rows.len();
        self.rows.push(row.to_string());
        self.row_index.insert(row.to_string(), index);
        index
    }

    fn column_position(&mut self, column: &str) -> usize {
        if let Some(&index) = self.column_index.get(column) {
            return index;
        }
        let index = self.columns.len();
        self.columns.push(column.to_string());
        self.column_index.insert(column.to_string(), index);
        index
    }

    /// Make a cell absent again
    pub fn remove_cell(&mut self, row: &str, column: &str) -> Option<Cell> {
        let r = *self.row_index.get(row)?;
        let c = *self.column_index.get(column)?;
        self.cells.remove(&(r, c))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of present cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Present cells of one column, in row order
    pub fn column(&self, column: &str) -> Vec<(&str, &Cell)> {
        let Some(&c) = self.column_index.get(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(r, label)| self.cells.get(&(r, c)).map(|cell| (label.as_str(), cell)))
            .collect()
    }

    /// Same labels and same cells, ignoring row and column order
    pub fn equivalent(&self, other: &DataFrame) -> bool {
        let rows: BTreeSet<&String> = self.rows.iter().collect();
        let other_rows: BTreeSet<&String> = other.rows.iter().collect();
        let columns: BTreeSet<&String> = self.columns.iter().collect();
        let other_columns: BTreeSet<&String> = other.columns.iter().collect();

        rows == other_rows
            && columns == other_columns
            && self.cells.len() == other.cells.len()
            && self.rows.iter().all(|row| {
                self.columns
                    .iter()
                    .all(|column| self.get_cell(row, column) == other.get_cell(row, column))
            })
    }
}

impl Tabular for DataFrame {
    fn row_labels(&self) -> &[String] {
        &self.rows
    }

    fn column_labels(&self) -> &[String] {
        &self.columns
    }

    fn get_cell(&self, row: &str, column: &str) -> Option<&Cell> {
        let r = self.row_index.get(row)?;
        let c = self.column_index.get(column)?;
        self.cells.get(&(*r, *c))
    }
}

impl TabularMut for DataFrame {
    fn insert_column(&mut self, column: &str) {
        self.column_position(column);
    }

    fn set_cell(&mut self, row: &str, column: &str, cell: Cell) {
        let r = self.insert_row(row);
        let c = self.column_position(column);
        self.cells.insert((r, c), cell);
    }
}
