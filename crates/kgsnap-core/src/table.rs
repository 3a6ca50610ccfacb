//! Flat tabular dataset model.
//!
//! Every extracted dataset is a denormalized projection of graph
//! relationships into rows. Consumers depend on exact column names, so the
//! column list is part of the dataset contract, not an implementation detail.

use std::fmt;
use std::path::Path;

use crate::error::{KgError, KgResult};

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The cell as rendered in delimited output.
    pub fn render(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Int(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
        }
    }
}

/// How cells in a column are decoded from the graph result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Int,
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Int,
        }
    }
}

/// An ordered, named table of rows.
///
/// Invariants: every row has exactly `columns.len()` cells, and rows keep
/// the order in which they were pushed (query result order).
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Like `column_index`, but a missing column is an error naming the table.
    pub fn require_column(&self, name: &str) -> KgResult<usize> {
        self.column_index(name).ok_or_else(|| KgError::MissingColumn {
            dataset: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Append a row, rejecting arity mismatches.
    pub fn push_row(&mut self, row: Vec<Value>) -> KgResult<()> {
        if row.len() != self.columns.len() {
            return Err(KgError::ColumnArity {
                table: self.name.clone(),
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Write the table as a CSV file, overwriting any existing file.
    ///
    /// Output is deterministic for identical input: header row first, then
    /// data rows in insertion order, RFC 4180 quoting only where needed.
    pub fn write_csv(&self, path: &Path) -> KgResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(self.columns.iter().map(|c| c.name.as_str()))?;
        for row in &self.rows {
            writer.write_record(row.iter().map(Value::render))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a CSV file back into a table.
    ///
    /// All cells come back as text; typed decoding only happens on the
    /// extraction path, where the graph result carries the types.
    pub fn read_csv(name: impl Into<String>, path: &Path) -> KgResult<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns = reader
            .headers()?
            .iter()
            .map(Column::text)
            .collect::<Vec<_>>();

        let mut table = Self::new(name, columns);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Value::text).collect())?;
        }
        Ok(table)
    }
}
