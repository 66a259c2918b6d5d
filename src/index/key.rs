use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// Group key: the tuple of cell values a row was bucketed by.
///
/// Equality is structural over the cell tuple; no coercion across cell
/// variants and no numeric tolerance. Keys order lexicographically over
/// their levels, which fixes the iteration order of grouped results.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey(Vec<Cell>);

impl GroupKey {
    /// Key from a tuple of cells
    pub fn new(cells: Vec<Cell>) -> Self {
        GroupKey(cells)
    }

    /// Single-level key
    pub fn single(cell: impl Into<Cell>) -> Self {
        GroupKey(vec![cell.into()])
    }

    /// Two-level key
    pub fn pair(first: impl Into<Cell>, second: impl Into<Cell>) -> Self {
        GroupKey(vec![first.into(), second.into()])
    }

    /// Number of levels
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Cell at the given level
    pub fn level(&self, level: usize) -> Option<&Cell> {
        self.0.get(level)
    }

    /// All levels
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// Copy of the key with one more trailing level.
    ///
    /// Used when stacked apply results retag each row with its owning group
    /// key plus the original row label.
    pub fn extended(&self, cell: impl Into<Cell>) -> Self {
        let mut cells = self.0.clone();
        cells.push(cell.into());
        GroupKey(cells)
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            return write!(f, "{}", self.0[0]);
        }
        write!(f, "(")?;
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, ")")
    }
}

impl From<Cell> for GroupKey {
    fn from(cell: Cell) -> Self {
        GroupKey(vec![cell])
    }
}

impl From<Vec<Cell>> for GroupKey {
    fn from(cells: Vec<Cell>) -> Self {
        GroupKey(cells)
    }
}
