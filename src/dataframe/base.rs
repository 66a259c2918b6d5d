//! Labeled table: named `Cell` columns sharing one row-label index.

use std::collections::HashMap;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::index::{GroupKey, Index, Label};
use crate::series::Series;

/// A labeled table.
///
/// Rows are addressed by the labels of the shared index; columns are named
/// and hold `Cell` values. Every column has exactly as many cells as the
/// index has labels, with missing values stored as explicit `Cell::Na`.
#[derive(Debug, Clone)]
pub struct DataFrame<K = usize>
where
    K: Label,
{
    /// Column names, in insertion order
    names: Vec<String>,

    /// Column name to column position
    map: HashMap<String, usize>,

    /// Column data, parallel to `names`
    columns: Vec<Vec<Cell>>,

    /// Row labels
    index: Index<K>,
}

/// One row of a table: its label plus the named cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<K>
where
    K: Label,
{
    label: K,
    columns: Vec<String>,
    cells: Vec<Cell>,
}

impl<K> Row<K>
where
    K: Label,
{
    /// Build a row from parallel column/cell lists
    pub fn new(label: K, columns: Vec<String>, cells: Vec<Cell>) -> Result<Self> {
        if columns.len() != cells.len() {
            return Err(Error::LengthMismatch {
                expected: columns.len(),
                actual: cells.len(),
            });
        }
        Ok(Row {
            label,
            columns,
            cells,
        })
    }

    /// Row label
    pub fn label(&self) -> &K {
        &self.label
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Cells, parallel to `columns`
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell under the given column name
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| &self.cells[i])
    }

    /// Copy of the row without the named columns
    pub fn drop_columns(&self, names: &[&str]) -> Row<K> {
        let mut columns = Vec::new();
        let mut cells = Vec::new();
        for (c, v) in self.columns.iter().zip(self.cells.iter()) {
            if !names.contains(&c.as_str()) {
                columns.push(c.clone());
                cells.push(v.clone());
            }
        }
        Row {
            label: self.label.clone(),
            columns,
            cells,
        }
    }
}

impl DataFrame<usize> {
    /// Create an empty table with a positional index
    pub fn new() -> Self {
        DataFrame {
            names: Vec::new(),
            map: HashMap::new(),
            columns: Vec::new(),
            index: Index::<usize>::from_range(0..0),
        }
    }

    /// Build a positionally indexed table from named columns
    pub fn from_columns(columns: Vec<(String, Vec<Cell>)>) -> Result<Self> {
        let rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut df = DataFrame {
            names: Vec::new(),
            map: HashMap::new(),
            columns: Vec::new(),
            index: Index::<usize>::from_range(0..rows),
        };
        for (name, values) in columns {
            df.add_column(name, values)?;
        }
        Ok(df)
    }
}

impl Default for DataFrame<usize> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DataFrame<K>
where
    K: Label,
{
    /// Create an empty table over the given row labels
    pub fn with_index(index: Index<K>) -> Self {
        DataFrame {
            names: Vec::new(),
            map: HashMap::new(),
            columns: Vec::new(),
            index,
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// Column names, in insertion order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Whether the table has a column of the given name
    pub fn contains_column(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Row labels
    pub fn index(&self) -> &Index<K> {
        &self.index
    }

    /// Add a column, or replace the column of the same name.
    ///
    /// The value count must equal the row count.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<Cell>) -> Result<()> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(Error::LengthMismatch {
                expected: self.index.len(),
                actual: values.len(),
            });
        }

        match self.map.get(&name) {
            Some(&pos) => {
                self.columns[pos] = values;
            }
            None => {
                self.map.insert(name.clone(), self.columns.len());
                self.names.push(name);
                self.columns.push(values);
            }
        }
        Ok(())
    }

    /// Copy of the table with a column added or replaced
    pub fn with_column(&self, name: impl Into<String>, values: Vec<Cell>) -> Result<DataFrame<K>> {
        let mut df = self.clone();
        df.add_column(name, values)?;
        Ok(df)
    }

    /// Cells of a column, in row order
    pub fn column_values(&self, name: &str) -> Result<&[Cell]> {
        match self.map.get(name) {
            Some(&pos) => Ok(&self.columns[pos]),
            None => Err(Error::ColumnNotFound(name.to_string())),
        }
    }

    /// A column as a labeled series sharing this table's index
    pub fn column(&self, name: &str) -> Result<Series<Cell, K>> {
        let values = self.column_values(name)?.to_vec();
        Series::with_index(values, self.index.clone(), Some(name.to_string()))
    }

    /// Sub-table of the rows at the given positions
    pub fn take(&self, positions: &[usize]) -> Result<DataFrame<K>> {
        for &pos in positions {
            if pos >= self.index.len() {
                return Err(Error::IndexOutOfBounds {
                    index: pos,
                    size: self.index.len(),
                });
            }
        }

        let labels: Vec<K> = positions
            .iter()
            .map(|&i| self.index.values()[i].clone())
            .collect();
        let mut df = DataFrame::with_index(Index::with_name(labels, self.index.name().cloned()));
        for (name, column) in self.names.iter().zip(self.columns.iter()) {
            let values: Vec<Cell> = positions.iter().map(|&i| column[i].clone()).collect();
            df.add_column(name.clone(), values)?;
        }
        Ok(df)
    }

    /// Sub-table of the rows whose label matches any requested label.
    ///
    /// Row order follows this table, not the query order. Duplicated labels
    /// contribute all their rows; an absent label is a `KeyNotFound` error.
    pub fn loc(&self, keys: &[K]) -> Result<DataFrame<K>> {
        let mut positions = Vec::new();
        for key in keys {
            let locs = self
                .index
                .get_locs(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
            positions.extend_from_slice(locs);
        }
        positions.sort_unstable();
        positions.dedup();
        self.take(&positions)
    }

    /// Row at the given position
    pub fn row(&self, pos: usize) -> Result<Row<K>> {
        let label = self
            .index
            .get_value(pos)
            .ok_or(Error::IndexOutOfBounds {
                index: pos,
                size: self.index.len(),
            })?
            .clone();
        let cells: Vec<Cell> = self.columns.iter().map(|col| col[pos].clone()).collect();
        Row::new(label, self.names.clone(), cells)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Result<DataFrame<K>> {
        let take_n = n.min(self.index.len());
        let positions: Vec<usize> = (0..take_n).collect();
        self.take(&positions)
    }

    /// Copy of the table with rows reordered by ascending label, stable for ties
    pub fn sort_by_label(&self) -> Result<DataFrame<K>> {
        self.take(&self.index.argsort())
    }

    /// Replace all row labels, leaving row content and order untouched.
    ///
    /// Lookup afterwards resolves only against the new labels.
    pub fn set_index<K2>(&self, labels: Vec<K2>) -> Result<DataFrame<K2>>
    where
        K2: Label,
    {
        if labels.len() != self.index.len() {
            return Err(Error::LengthMismatch {
                expected: self.index.len(),
                actual: labels.len(),
            });
        }

        let mut df = DataFrame::with_index(Index::new(labels));
        for (name, column) in self.names.iter().zip(self.columns.iter()) {
            df.add_column(name.clone(), column.clone())?;
        }
        Ok(df)
    }
}

impl DataFrame<GroupKey> {
    /// Turn the key levels of a grouped result into leading columns.
    ///
    /// `names` supplies one column name per key level; the result is
    /// positionally indexed.
    pub fn reset_index(&self, names: &[&str]) -> Result<DataFrame<usize>> {
        for key in self.index.values() {
            if key.arity() != names.len() {
                return Err(Error::Consistency(format!(
                    "index key {} has {} levels but {} names were given",
                    key,
                    key.arity(),
                    names.len()
                )));
            }
        }
        for name in names {
            if self.contains_column(name) {
                return Err(Error::Consistency(format!(
                    "cannot reset index: column '{}' already exists",
                    name
                )));
            }
        }

        let mut df = DataFrame {
            names: Vec::new(),
            map: HashMap::new(),
            columns: Vec::new(),
            index: Index::<usize>::from_range(0..self.row_count()),
        };
        for (level, name) in names.iter().enumerate() {
            let values: Vec<Cell> = self
                .index
                .values()
                .iter()
                .map(|key| key.level(level).cloned().unwrap_or(Cell::Na))
                .collect();
            df.add_column(name.to_string(), values)?;
        }
        for (name, column) in self.names.iter().zip(self.columns.iter()) {
            df.add_column(name.clone(), column.clone())?;
        }
        Ok(df)
    }
}
