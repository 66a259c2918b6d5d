use num_traits::NumCast;
use std::cmp::PartialOrd;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Range, Sub};

use crate::error::{Error, Result};
use crate::index::{Index, Label};

/// One-dimensional labeled array.
///
/// Values sit in insertion order; the index maps row labels to positions.
/// Labels may repeat, in which case label lookup returns every match.
#[derive(Debug, Clone)]
pub struct Series<T, K = usize>
where
    T: Debug + Clone,
    K: Label,
{
    /// Data values
    values: Vec<T>,

    /// Row labels
    index: Index<K>,

    /// Name (optional)
    name: Option<String>,
}

impl<T> Series<T, usize>
where
    T: Debug + Clone,
{
    /// Create a new series with a positional `0..len` index
    pub fn new(values: Vec<T>, name: Option<String>) -> Self {
        let index = Index::<usize>::from_range(0..values.len());

        Series {
            values,
            index,
            name,
        }
    }
}

impl<T, K> Series<T, K>
where
    T: Debug + Clone,
    K: Label,
{
    /// Create a series with a custom label index
    pub fn with_index(values: Vec<T>, index: Index<K>, name: Option<String>) -> Result<Self> {
        if values.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: values.len(),
                actual: index.len(),
            });
        }

        Ok(Series {
            values,
            index,
            name,
        })
    }

    /// Series length
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the given position
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// Underlying data array
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Series name
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Row labels
    pub fn index(&self) -> &Index<K> {
        &self.index
    }

    /// Set the name
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Every value stored under the given label, in row order.
    ///
    /// A duplicated label yields all its values; an absent label is an error.
    pub fn get_label(&self, key: &K) -> Result<Vec<&T>> {
        let locs = self
            .index
            .get_locs(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        Ok(locs.iter().map(|&i| &self.values[i]).collect())
    }

    /// Sub-series holding the rows whose label matches any requested label.
    ///
    /// Row order follows this series, not the query order. Fails with
    /// `KeyNotFound` if any requested label is absent.
    pub fn select(&self, keys: &[K]) -> Result<Series<T, K>> {
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

        let values: Vec<T> = positions.iter().map(|&i| self.values[i].clone()).collect();
        let labels: Vec<K> = positions
            .iter()
            .map(|&i| self.index.values()[i].clone())
            .collect();
        let index = Index::with_name(labels, self.index.name().cloned());

        Series::with_index(values, index, self.name.clone())
    }

    /// Positional slice, clamped to the series bounds
    pub fn slice(&self, range: Range<usize>) -> Series<T, K> {
        let start = range.start.min(self.values.len());
        let end = range.end.min(self.values.len()).max(start);

        let values = self.values[start..end].to_vec();
        let labels = self.index.values()[start..end].to_vec();
        let index = Index::with_name(labels, self.index.name().cloned());

        Series {
            values,
            index,
            name: self.name.clone(),
        }
    }

    /// First `n` values
    pub fn head(&self, n: usize) -> Series<T, K> {
        self.slice(0..n)
    }

    /// Replace all row labels, leaving values and their order untouched.
    ///
    /// Lookup afterwards resolves only against the new labels.
    pub fn set_index<K2>(self, labels: Vec<K2>) -> Result<Series<T, K2>>
    where
        K2: Label,
    {
        if labels.len() != self.values.len() {
            return Err(Error::LengthMismatch {
                expected: self.values.len(),
                actual: labels.len(),
            });
        }

        Ok(Series {
            values: self.values,
            index: Index::new(labels),
            name: self.name,
        })
    }
}

// Specialized implementation for numeric series
impl<T, K> Series<T, K>
where
    T: Debug
        + Clone
        + Copy
        + Sum<T>
        + PartialOrd
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + NumCast
        + Default,
    K: Label,
{
    /// Sum of values
    pub fn sum(&self) -> T {
        if self.values.is_empty() {
            T::default()
        } else {
            self.values.iter().copied().sum()
        }
    }

    /// Mean of values
    pub fn mean(&self) -> Result<T> {
        if self.values.is_empty() {
            return Err(Error::Empty(
                "cannot compute the mean of an empty series".to_string(),
            ));
        }

        let sum = self.sum();
        let count = match num_traits::cast(self.len()) {
            Some(n) => n,
            None => {
                return Err(Error::Cast(
                    "cannot cast series length to the value type".to_string(),
                ))
            }
        };

        Ok(sum / count)
    }

    /// Minimum value
    pub fn min(&self) -> Result<T> {
        self.values
            .iter()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
            .ok_or_else(|| Error::Empty("cannot compute the minimum of an empty series".to_string()))
    }

    /// Maximum value
    pub fn max(&self) -> Result<T> {
        self.values
            .iter()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .copied()
            .ok_or_else(|| Error::Empty("cannot compute the maximum of an empty series".to_string()))
    }
}
