//! Table region lookup

use crate::rect::Rect;
use crate::RegionConfigError;
use serde::{Deserialize, Serialize};

/// One configured table ROI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRegion {
    /// Unique table identifier
    pub table_id: String,
    /// ROI in image pixel coordinates
    pub rect: Rect,
}

impl TableRegion {
    pub fn new(table_id: impl Into<String>, rect: Rect) -> Self {
        Self {
            table_id: table_id.into(),
            rect,
        }
    }
}

/// Static table id -> ROI mapping with overlap queries.
///
/// Immutable after construction. Regions are kept sorted by table id so
/// iteration order (and therefore per-frame evaluation order downstream)
/// is deterministic.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    regions: Vec<TableRegion>,
}

impl RegionIndex {
    /// Build an index from table regions.
    ///
    /// Fails if no regions are supplied, a table id appears twice, or a
    /// region has a non-finite coordinate or non-positive area.
    pub fn new(
        regions: impl IntoIterator<Item = TableRegion>,
    ) -> Result<Self, RegionConfigError> {
        let mut regions: Vec<TableRegion> = regions.into_iter().collect();
        if regions.is_empty() {
            return Err(RegionConfigError::NoTables);
        }

        for region in &regions {
            if !region.rect.is_finite() {
                return Err(RegionConfigError::InvalidRegion {
                    table_id: region.table_id.clone(),
                    reason: "non-finite coordinate".into(),
                });
            }
            if !region.rect.is_valid() {
                return Err(RegionConfigError::InvalidRegion {
                    table_id: region.table_id.clone(),
                    reason: "non-positive area".into(),
                });
            }
        }

        regions.sort_by(|a, b| a.table_id.cmp(&b.table_id));
        if let Some(dup) = regions.windows(2).find(|w| w[0].table_id == w[1].table_id) {
            return Err(RegionConfigError::DuplicateTable(dup[0].table_id.clone()));
        }

        Ok(Self { regions })
    }

    /// Build an index from `(table_id, rect)` pairs
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, RegionConfigError>
    where
        I: IntoIterator<Item = (S, Rect)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, rect)| TableRegion::new(id, rect)),
        )
    }

    /// Every table whose ROI strictly intersects the given box.
    ///
    /// Pure lookup; a box may match zero, one, or several tables (a person
    /// standing between two tables is seen by both).
    pub fn overlapping_tables(&self, rect: &Rect) -> Vec<&str> {
        self.regions
            .iter()
            .filter(|r| r.rect.intersects(rect))
            .map(|r| r.table_id.as_str())
            .collect()
    }

    /// Configured regions in table-id order
    pub fn tables(&self) -> impl Iterator<Item = &TableRegion> {
        self.regions.iter()
    }

    /// Number of configured tables
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether a table id is configured
    pub fn contains(&self, table_id: &str) -> bool {
        self.regions
            .binary_search_by(|r| r.table_id.as_str().cmp(table_id))
            .is_ok()
    }
}
