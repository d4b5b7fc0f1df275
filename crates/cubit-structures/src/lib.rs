//! Multi-layer block structures and the matcher that finds them in the grid.
#![forbid(unsafe_code)]

mod builder;
mod def;
mod error;
mod layer;
mod registry;
mod structure;

pub use builder::StructureBuilder;
pub use def::{StructureDef, StructuresConfig};
pub use error::StructureError;
pub use layer::Layer;
pub use registry::{Completion, CompletionHook, StructureRegistry};
pub use structure::Structure;
