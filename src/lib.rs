#![allow(clippy::needless_return)]
#![allow(clippy::let_and_return)]

pub mod cell;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod index;
pub mod series;

// Re-export commonly used types
pub use cell::Cell;
pub use dataframe::{concat, ApplyExt, DataFrame, Row};
pub use error::{Error, Result};
pub use groupby::{Applied, GroupBy, GroupByExt, GroupKeys};
pub use index::{GroupKey, Index, Label};
pub use series::Series;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
