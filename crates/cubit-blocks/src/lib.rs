//! Material identities, the material catalog, and grid read access.
#![forbid(unsafe_code)]

pub mod grid;
pub mod material;
pub mod source;

pub use grid::MemoryGrid;
pub use material::{
    CatalogError, Material, MaterialCatalog, MaterialEntry, MaterialId, MaterialsConfig,
};
pub use source::{BlockSource, FnSource};
