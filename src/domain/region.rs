//! Checkout regions offered on the cart page

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub code: String,
    pub name: String,
    pub is_current: bool,
}

/// Regions listed by the page, or an explicit marker when the page carries
/// no current-region indicator at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionListResult {
    NoRegionData,
    Available {
        current_code: String,
        entries: Vec<RegionEntry>,
    },
}

impl RegionListResult {
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    pub fn entries(&self) -> &[RegionEntry] {
        match self {
            Self::NoRegionData => &[],
            Self::Available { entries, .. } => entries,
        }
    }

    pub fn current(&self) -> Option<&RegionEntry> {
        self.entries().iter().find(|entry| entry.is_current)
    }
}
