// DataFrame implementations module
pub mod apply;
pub mod base;
pub mod concat;

// Re-exports for convenience
pub use apply::ApplyExt;
pub use base::{DataFrame, Row};
pub use concat::concat;
