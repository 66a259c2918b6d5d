mod key;

pub use key::GroupKey;

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::Range;

/// Bound alias for row label types.
///
/// Labels are opaque comparable keys: a timestamp, an integer, a string.
/// `Ord` backs label-order sorting, `Hash`/`Eq` back label lookup.
pub trait Label: Debug + Clone + Eq + Hash + Ord + Display {}

impl<T> Label for T where T: Debug + Clone + Eq + Hash + Ord + Display {}

/// Row label index for `Series` and `DataFrame`.
///
/// Labels are kept in row order. Duplicate labels are legal; lookup by a
/// duplicated label yields every matching position.
#[derive(Debug, Clone)]
pub struct Index<K>
where
    K: Label,
{
    /// Label values, in row order
    values: Vec<K>,

    /// Label to positions mapping (a label may occur at several positions)
    map: HashMap<K, Vec<usize>>,

    /// Index name (optional)
    name: Option<String>,
}

impl<K> Index<K>
where
    K: Label,
{
    /// Create a new index
    pub fn new(values: Vec<K>) -> Self {
        Self::with_name(values, None)
    }

    /// Create a new index with a name
    pub fn with_name(values: Vec<K>, name: Option<String>) -> Self {
        let mut map: HashMap<K, Vec<usize>> = HashMap::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            map.entry(value.clone()).or_default().push(i);
        }

        Index { values, map, name }
    }

    /// Create an integer index from a range
    pub fn from_range(range: Range<usize>) -> Index<usize> {
        Index::new(range.collect())
    }

    /// Index length
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Positions holding the given label, in row order
    pub fn get_locs(&self, key: &K) -> Option<&[usize]> {
        self.map.get(key).map(|v| v.as_slice())
    }

    /// Whether the label exists in the index
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Whether any label occurs more than once
    pub fn has_duplicates(&self) -> bool {
        self.map.len() != self.values.len()
    }

    /// Label at the given position
    pub fn get_value(&self, pos: usize) -> Option<&K> {
        self.values.get(pos)
    }

    /// All labels
    pub fn values(&self) -> &[K] {
        &self.values
    }

    /// Index name
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Set the index name
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Copy the index under a new name
    pub fn rename(&self, name: Option<String>) -> Self {
        let mut new_index = self.clone();
        new_index.name = name;
        new_index
    }

    /// Positions that would sort the labels ascending, stable for ties
    pub fn argsort(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| self.values[a].cmp(&self.values[b]));
        order
    }
}

/// Common behavior of index types
pub trait IndexTrait {
    /// Index length
    fn len(&self) -> usize;

    /// Whether the index is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> IndexTrait for Index<K>
where
    K: Label,
{
    fn len(&self) -> usize {
        self.len()
    }
}

/// Integer index alias
pub type RangeIndex = Index<usize>;

/// String index alias
pub type StringIndex = Index<String>;
