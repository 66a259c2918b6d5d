//! Axis-wise function application for DataFrames.

use std::fmt::Debug;

use crate::cell::Cell;
use crate::dataframe::base::{DataFrame, Row};
use crate::error::Result;
use crate::index::{Index, Label};
use crate::series::Series;

/// Apply functionality for DataFrames.
///
/// Per-column and per-row application return differently indexed series
/// (column names versus row labels), so the two axes are separate methods.
pub trait ApplyExt<K>
where
    K: Label,
{
    /// Apply a function to each column, yielding a series indexed by column name
    fn apply_columns<F, R>(&self, f: F, result_name: Option<String>) -> Result<Series<R, String>>
    where
        F: Fn(&Series<Cell, K>) -> R,
        R: Debug + Clone;

    /// Apply a function to each row, yielding a series indexed by row label
    fn apply_rows<F, R>(&self, f: F, result_name: Option<String>) -> Result<Series<R, K>>
    where
        F: Fn(&Row<K>) -> R,
        R: Debug + Clone;
}

impl<K> ApplyExt<K> for DataFrame<K>
where
    K: Label,
{
    fn apply_columns<F, R>(&self, f: F, result_name: Option<String>) -> Result<Series<R, String>>
    where
        F: Fn(&Series<Cell, K>) -> R,
        R: Debug + Clone,
    {
        let mut results = Vec::with_capacity(self.column_names().len());
        for name in self.column_names() {
            let column = self.column(name)?;
            results.push(f(&column));
        }
        let index = Index::new(self.column_names().to_vec());
        Series::with_index(results, index, result_name)
    }

    fn apply_rows<F, R>(&self, f: F, result_name: Option<String>) -> Result<Series<R, K>>
    where
        F: Fn(&Row<K>) -> R,
        R: Debug + Clone,
    {
        let mut results = Vec::with_capacity(self.row_count());
        for pos in 0..self.row_count() {
            let row = self.row(pos)?;
            results.push(f(&row));
        }
        Series::with_index(results, self.index().clone(), result_name)
    }
}
