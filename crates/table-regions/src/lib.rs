//! Table region geometry
//!
//! Static mapping from table identifiers to rectangular regions of
//! interest (ROIs) in image coordinates:
//! - Axis-aligned rectangle math (overlap, area)
//! - Region configuration validation
//! - "Which tables does this detection box touch?" lookup

pub mod index;
pub mod rect;

pub use index::{RegionIndex, TableRegion};
pub use rect::Rect;

use thiserror::Error;

/// Region configuration error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegionConfigError {
    #[error("No table regions configured")]
    NoTables,

    #[error("Duplicate table id: {0}")]
    DuplicateTable(String),

    #[error("Invalid region for table {table_id}: {reason}")]
    InvalidRegion { table_id: String, reason: String },
}
