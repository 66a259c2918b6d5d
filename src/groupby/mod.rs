//! Group-by engine: partition a DataFrame by key and reduce or apply per group.
//!
//! A `GroupBy` borrows its source table and maps each `GroupKey` to the row
//! positions belonging to that group. Groups iterate in ascending key order;
//! every reduction and apply emits its result in that same order.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::cell::Cell;
use crate::dataframe::base::{DataFrame, Row};
use crate::error::{Error, Result};
use crate::index::{GroupKey, Index, Label};
use crate::series::Series;

/// Per-group result of a caller-supplied apply function.
///
/// A closed set of shapes keeps recombination an exhaustive case analysis:
/// scalars and rows concatenate into one row per group, tables stack.
#[derive(Debug, Clone)]
pub enum Applied<K>
where
    K: Label,
{
    /// A single value for the group
    Scalar(Cell),
    /// A single row for the group
    Row(Row<K>),
    /// A whole table for the group
    Table(DataFrame<K>),
}

/// The partition of a table into keyed groups.
pub struct GroupBy<'a, K>
where
    K: Label,
{
    /// The table being grouped; never mutated
    source: &'a DataFrame<K>,

    /// Names of the key levels
    key_names: Vec<String>,

    /// Key columns to leave out of reduction output (they become the index)
    exclude: Vec<String>,

    /// Group key to member row positions, ascending key order
    groups: BTreeMap<GroupKey, Vec<usize>>,
}

/// Extension trait adding grouping to `DataFrame`.
pub trait GroupByExt<K>
where
    K: Label,
{
    /// Group by the values of one or more columns.
    ///
    /// The key is the tuple of the named columns' cells per row, compared
    /// structurally. The key columns are excluded from reduction output.
    fn groupby(&self, by: &[&str]) -> Result<GroupBy<'_, K>>;

    /// Group by an arbitrary function of row label and row content.
    fn groupby_with<F>(&self, key_names: Vec<String>, key_fn: F) -> Result<GroupBy<'_, K>>
    where
        F: Fn(&K, &Row<K>) -> GroupKey;
}

impl<K> GroupByExt<K> for DataFrame<K>
where
    K: Label,
{
    fn groupby(&self, by: &[&str]) -> Result<GroupBy<'_, K>> {
        if by.is_empty() {
            return Err(Error::Consistency(
                "groupby requires at least one key column".to_string(),
            ));
        }

        let mut key_columns = Vec::with_capacity(by.len());
        for col in by {
            key_columns.push(self.column_values(col)?);
        }

        let mut groups: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        for row_idx in 0..self.row_count() {
            let key = GroupKey::new(key_columns.iter().map(|col| col[row_idx].clone()).collect());
            groups.entry(key).or_default().push(row_idx);
        }

        log::debug!(
            "grouped {} rows into {} groups by columns {:?}",
            self.row_count(),
            groups.len(),
            by
        );

        Ok(GroupBy {
            source: self,
            key_names: by.iter().map(|s| s.to_string()).collect(),
            exclude: by.iter().map(|s| s.to_string()).collect(),
            groups,
        })
    }

    fn groupby_with<F>(&self, key_names: Vec<String>, key_fn: F) -> Result<GroupBy<'_, K>>
    where
        F: Fn(&K, &Row<K>) -> GroupKey,
    {
        let mut groups: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        let mut arity: Option<usize> = None;

        for row_idx in 0..self.row_count() {
            let row = self.row(row_idx)?;
            let key = key_fn(row.label(), &row);

            match arity {
                None => arity = Some(key.arity()),
                Some(n) if n != key.arity() => {
                    return Err(Error::Consistency(format!(
                        "key function returned keys of differing arity: {} vs {}",
                        n,
                        key.arity()
                    )))
                }
                Some(_) => {}
            }
            groups.entry(key).or_default().push(row_idx);
        }

        log::debug!(
            "grouped {} rows into {} groups by key function",
            self.row_count(),
            groups.len()
        );

        Ok(GroupBy {
            source: self,
            key_names,
            exclude: Vec::new(),
            groups,
        })
    }
}

/// Iterator over `(GroupKey, member labels)` pairs in ascending key order.
///
/// Finite and restartable: call `GroupBy::keys` again for a fresh pass.
#[derive(Clone)]
pub struct GroupKeys<'a, K>
where
    K: Label,
{
    inner: std::collections::btree_map::Iter<'a, GroupKey, Vec<usize>>,
    index: &'a Index<K>,
}

impl<'a, K> Iterator for GroupKeys<'a, K>
where
    K: Label,
{
    type Item = (&'a GroupKey, Vec<K>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, positions) = self.inner.next()?;
        let labels = positions
            .iter()
            .map(|&i| self.index.values()[i].clone())
            .collect();
        Some((key, labels))
    }
}

impl<'a, K> GroupBy<'a, K>
where
    K: Label,
{
    /// Number of groups
    pub fn ngroups(&self) -> usize {
        self.groups.len()
    }

    /// Names of the key levels
    pub fn key_names(&self) -> &[String] {
        &self.key_names
    }

    /// Iterate over `(GroupKey, member labels)` pairs, ascending key order
    pub fn keys(&self) -> GroupKeys<'_, K> {
        GroupKeys {
            inner: self.groups.iter(),
            index: self.source.index(),
        }
    }

    /// Sub-table holding one group's rows, in source order
    pub fn get_group(&self, key: &GroupKey) -> Result<DataFrame<K>> {
        let positions = self
            .groups
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        self.source.take(positions)
    }

    /// Rows per group
    pub fn size(&self) -> Result<Series<usize, GroupKey>> {
        let keys: Vec<GroupKey> = self.groups.keys().cloned().collect();
        let sizes: Vec<usize> = self.groups.values().map(|p| p.len()).collect();
        Series::with_index(sizes, self.key_index(keys), Some("size".to_string()))
    }

    /// Non-Na cells per group for each non-key column.
    ///
    /// Equals `size` for every column when the data holds no Na.
    pub fn count(&self) -> Result<DataFrame<GroupKey>> {
        let columns = self.output_columns();
        let mut result = self.empty_result();

        for name in &columns {
            let cells = self.source.column_values(name)?;
            let counts: Vec<Cell> = self
                .groups
                .values()
                .map(|positions| {
                    let n = positions.iter().filter(|&&i| !cells[i].is_na()).count();
                    Cell::Int(n as i64)
                })
                .collect();
            result.add_column(name.clone(), counts)?;
        }
        Ok(result)
    }

    /// Per group, the row with the minimum label after a stable sort
    pub fn first(&self) -> Result<DataFrame<GroupKey>> {
        self.edge_rows(true)
    }

    /// Per group, the row with the maximum label after a stable sort
    pub fn last(&self) -> Result<DataFrame<GroupKey>> {
        self.edge_rows(false)
    }

    /// Per-group sum of each numeric non-key column, Na skipped
    pub fn sum(&self) -> Result<DataFrame<GroupKey>> {
        self.aggregate_numeric(|values| Some(values.iter().sum()))
    }

    /// Per-group mean of each numeric non-key column, Na skipped
    pub fn mean(&self) -> Result<DataFrame<GroupKey>> {
        self.aggregate_numeric(|values| {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        })
    }

    /// Apply a function to each group and recombine the results.
    ///
    /// Scalars and single rows concatenate into one result row per group,
    /// indexed by group key. Whole tables stack, each row retagged with its
    /// owning key extended by the original row label. Mixing tables with
    /// scalar or row results is an `InvalidResultShape` error, and any error
    /// returned by the function aborts the call unchanged.
    pub fn apply<F>(&self, f: F) -> Result<DataFrame<GroupKey>>
    where
        F: Fn(DataFrame<K>) -> Result<Applied<K>>,
        K: Into<Cell>,
    {
        let mut results = Vec::with_capacity(self.groups.len());
        for (key, positions) in &self.groups {
            let group = self.source.take(positions)?;
            results.push((key.clone(), f(group)?));
        }
        self.recombine(results)
    }

    /// `apply` with groups evaluated in parallel.
    ///
    /// Results recombine in ascending key order regardless of which group
    /// finished first, so output is identical to the serial `apply`.
    pub fn par_apply<F>(&self, f: F) -> Result<DataFrame<GroupKey>>
    where
        F: Fn(DataFrame<K>) -> Result<Applied<K>> + Send + Sync,
        K: Into<Cell> + Send + Sync,
    {
        let entries: Vec<(&GroupKey, &Vec<usize>)> = self.groups.iter().collect();
        let results: Vec<(GroupKey, Applied<K>)> = entries
            .into_par_iter()
            .map(|(key, positions)| {
                let group = self.source.take(positions)?;
                Ok((key.clone(), f(group)?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.recombine(results)
    }

    // Index over the group keys; named after the key column when single-level
    fn key_index(&self, keys: Vec<GroupKey>) -> Index<GroupKey> {
        let name = if self.key_names.len() == 1 {
            Some(self.key_names[0].clone())
        } else {
            None
        };
        Index::with_name(keys, name)
    }

    // Source columns that belong in reduction output
    fn output_columns(&self) -> Vec<String> {
        self.source
            .column_names()
            .iter()
            .filter(|name| !self.exclude.contains(*name))
            .cloned()
            .collect()
    }

    // Keyed result frame with no columns yet
    fn empty_result(&self) -> DataFrame<GroupKey> {
        let keys: Vec<GroupKey> = self.groups.keys().cloned().collect();
        DataFrame::with_index(self.key_index(keys))
    }

    fn edge_rows(&self, first: bool) -> Result<DataFrame<GroupKey>> {
        let columns = self.output_columns();
        let mut result = self.empty_result();

        // Stable sort by label keeps source order among equal labels
        let mut picked = Vec::with_capacity(self.groups.len());
        let labels = self.source.index().values();
        for positions in self.groups.values() {
            let mut ordered = positions.clone();
            ordered.sort_by(|&a, &b| labels[a].cmp(&labels[b]));
            let pos = if first {
                ordered.first().copied()
            } else {
                ordered.last().copied()
            };
            picked.push(pos.ok_or_else(|| {
                Error::Consistency("group unexpectedly has no members".to_string())
            })?);
        }

        for name in &columns {
            let cells = self.source.column_values(name)?;
            let values: Vec<Cell> = picked.iter().map(|&i| cells[i].clone()).collect();
            result.add_column(name.clone(), values)?;
        }
        Ok(result)
    }

    fn aggregate_numeric<F>(&self, agg: F) -> Result<DataFrame<GroupKey>>
    where
        F: Fn(&[f64]) -> Option<f64>,
    {
        let numeric_columns: Vec<String> = self
            .output_columns()
            .into_iter()
            .filter(|name| match self.source.column_values(name) {
                Ok(cells) => {
                    cells.iter().any(|c| c.as_f64().is_some())
                        && cells.iter().all(|c| c.is_na() || c.as_f64().is_some())
                }
                Err(_) => false,
            })
            .collect();

        let mut result = self.empty_result();
        for name in &numeric_columns {
            let cells = self.source.column_values(name)?;
            let values: Vec<Cell> = self
                .groups
                .values()
                .map(|positions| {
                    let group_values: Vec<f64> =
                        positions.iter().filter_map(|&i| cells[i].as_f64()).collect();
                    match agg(&group_values) {
                        Some(v) => Cell::Float(v),
                        None => Cell::Na,
                    }
                })
                .collect();
            result.add_column(name.clone(), values)?;
        }
        Ok(result)
    }

    fn recombine(&self, results: Vec<(GroupKey, Applied<K>)>) -> Result<DataFrame<GroupKey>>
    where
        K: Into<Cell>,
    {
        if results.is_empty() {
            // Empty partition: empty result with the source's non-key columns
            let mut result = DataFrame::with_index(self.key_index(Vec::new()));
            for name in self.output_columns() {
                result.add_column(name, Vec::new())?;
            }
            return Ok(result);
        }

        let any_table = results.iter().any(|(_, r)| matches!(r, Applied::Table(_)));
        let all_table = results.iter().all(|(_, r)| matches!(r, Applied::Table(_)));
        if any_table && !all_table {
            return Err(Error::InvalidResultShape(
                "cannot mix table results with scalar or row results".to_string(),
            ));
        }

        log::debug!(
            "recombining {} group results ({})",
            results.len(),
            if all_table { "stacked" } else { "reduced" }
        );

        if all_table {
            self.recombine_tables(results)
        } else {
            self.recombine_rows(results)
        }
    }

    // One result row per group, indexed by group key
    fn recombine_rows(&self, results: Vec<(GroupKey, Applied<K>)>) -> Result<DataFrame<GroupKey>> {
        let mut keys = Vec::with_capacity(results.len());
        let mut rows: Vec<(Vec<String>, Vec<Cell>)> = Vec::with_capacity(results.len());

        for (key, applied) in results {
            let (columns, cells) = match applied {
                Applied::Scalar(cell) => (vec!["value".to_string()], vec![cell]),
                Applied::Row(row) => (row.columns().to_vec(), row.cells().to_vec()),
                Applied::Table(_) => unreachable!("table results are recombined separately"),
            };
            keys.push(key);
            rows.push((columns, cells));
        }

        let columns = rows[0].0.clone();
        for (row_columns, _) in &rows {
            if *row_columns != columns {
                return Err(Error::InvalidResultShape(format!(
                    "row results declare differing columns: {:?} vs {:?}",
                    columns, row_columns
                )));
            }
        }

        let mut result = DataFrame::with_index(self.key_index(keys));
        for (col_idx, name) in columns.iter().enumerate() {
            let values: Vec<Cell> = rows.iter().map(|(_, cells)| cells[col_idx].clone()).collect();
            result.add_column(name.clone(), values)?;
        }
        Ok(result)
    }

    // Stack per-group tables, retagging each row with key + original label
    fn recombine_tables(&self, results: Vec<(GroupKey, Applied<K>)>) -> Result<DataFrame<GroupKey>>
    where
        K: Into<Cell>,
    {
        let tables: Vec<(GroupKey, DataFrame<K>)> = results
            .into_iter()
            .map(|(key, applied)| match applied {
                Applied::Table(table) => (key, table),
                _ => unreachable!("checked by recombine"),
            })
            .collect();

        let columns = tables[0].1.column_names().to_vec();
        for (_, table) in &tables {
            if table.column_names() != columns {
                return Err(Error::InvalidResultShape(format!(
                    "table results declare differing columns: {:?} vs {:?}",
                    columns,
                    table.column_names()
                )));
            }
        }

        let mut tags: Vec<GroupKey> = Vec::new();
        for (key, table) in &tables {
            for label in table.index().values() {
                tags.push(key.extended(label.clone()));
            }
        }

        let mut result = DataFrame::with_index(Index::new(tags));
        for name in &columns {
            let mut values: Vec<Cell> = Vec::new();
            for (_, table) in &tables {
                values.extend_from_slice(table.column_values(name)?);
            }
            result.add_column(name.clone(), values)?;
        }
        Ok(result)
    }
}
