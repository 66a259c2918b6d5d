//! Row-wise concatenation of DataFrames.

use crate::cell::Cell;
use crate::dataframe::base::DataFrame;
use crate::error::{Error, Result};
use crate::index::{Index, Label};

/// Stack the rows of several tables into one.
///
/// Every table must declare the same columns in the same order. Labels are
/// carried over as-is; the result may therefore hold duplicate labels.
pub fn concat<K>(frames: &[&DataFrame<K>]) -> Result<DataFrame<K>>
where
    K: Label,
{
    let first = frames
        .first()
        .ok_or_else(|| Error::Empty("concat needs at least one frame".to_string()))?;

    for frame in &frames[1..] {
        if frame.column_names() != first.column_names() {
            return Err(Error::Consistency(format!(
                "cannot concat frames with differing columns: {:?} vs {:?}",
                first.column_names(),
                frame.column_names()
            )));
        }
    }

    let mut labels: Vec<K> = Vec::new();
    for frame in frames {
        labels.extend_from_slice(frame.index().values());
    }

    let mut result = DataFrame::with_index(Index::with_name(labels, first.index().name().cloned()));
    for name in first.column_names() {
        let mut values: Vec<Cell> = Vec::new();
        for frame in frames {
            values.extend_from_slice(frame.column_values(name)?);
        }
        result.add_column(name.clone(), values)?;
    }
    Ok(result)
}
