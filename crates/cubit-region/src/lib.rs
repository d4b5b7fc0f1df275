//! Axis-aligned cuboid regions over the voxel grid.
#![forbid(unsafe_code)]

mod cells;
mod error;
mod query;
mod record;
mod region;
mod selection;

pub use cells::Cells;
pub use error::RegionError;
pub use query::Materials;
pub use record::RegionRecord;
pub use region::{ChunkColumn, Region};
pub use selection::SelectionBuilder;
