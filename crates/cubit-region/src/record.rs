use serde::{Deserialize, Serialize};

use crate::error::RegionError;
use crate::region::Region;

/// Flat key/value form of a region: `space, x1, y1, z1, x2, y2, z2`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(alias = "worldName", alias = "world")]
    pub space: String,
    pub x1: i32,
    pub y1: i32,
    pub z1: i32,
    pub x2: i32,
    pub y2: i32,
    pub z2: i32,
}

impl From<Region> for RegionRecord {
    fn from(value: Region) -> Self {
        value.to_record()
    }
}

impl TryFrom<RegionRecord> for Region {
    type Error = RegionError;

    fn try_from(value: RegionRecord) -> Result<Self, Self::Error> {
        Region::from_record(&value)
    }
}
