//! TOML scene files: a material catalog, block placements and structure
//! definitions loaded into an in-memory grid.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use cubit_blocks::{CatalogError, MaterialCatalog, MaterialEntry, MaterialsConfig, MemoryGrid};
use cubit_geom::{BlockPos, Space};
use cubit_region::{Region, RegionError, RegionRecord};
use cubit_structures::{StructureDef, StructureError, StructureRegistry, StructuresConfig};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SPACE: &str = "world";

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error("{what} refers to unknown material '{material}'")]
    UnknownMaterial { what: String, material: String },
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    space: Option<String>,
    #[serde(default)]
    materials: HashMap<String, MaterialEntry>,
    #[serde(default)]
    fills: Vec<FillDef>,
    #[serde(default)]
    blocks: Vec<BlockDef>,
    #[serde(default)]
    structures: Vec<StructureDef>,
}

#[derive(Debug, Deserialize)]
struct BlockDef {
    at: [i32; 3],
    material: String,
    space: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FillDef {
    region: RegionRecord,
    material: String,
}

/// A loaded scene. Fills are applied in file order, then single blocks.
#[derive(Debug)]
pub struct Scene {
    pub space: Space,
    pub catalog: MaterialCatalog,
    pub grid: MemoryGrid,
    pub structures: StructureRegistry,
}

impl Scene {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, SceneError> {
        let file: SceneFile = toml::from_str(toml_str)?;
        let space = Space::new(file.space.as_deref().unwrap_or(DEFAULT_SPACE));
        let catalog = MaterialCatalog::from_config(MaterialsConfig {
            materials: file.materials,
        })?;
        let lookup = |what: String, material: &str| {
            catalog
                .get_id(material)
                .ok_or_else(|| SceneError::UnknownMaterial {
                    what,
                    material: material.to_string(),
                })
        };

        let mut grid = MemoryGrid::new();
        for (i, fill) in file.fills.iter().enumerate() {
            let m = lookup(format!("fill {i}"), &fill.material)?;
            let region = Region::from_record(&fill.region)?;
            let n = grid.fill(region.space(), region.min(), region.max(), m);
            log::debug!("fill {i}: {n} cells of {} in {region}", fill.material);
        }
        for block in &file.blocks {
            let pos = BlockPos::from((block.at[0], block.at[1], block.at[2]));
            let m = lookup(format!("block at {pos}"), &block.material)?;
            let target = block.space.as_deref().map(Space::new).unwrap_or_else(|| space.clone());
            let prev = grid.set(&target, pos, m);
            if !prev.is_air() && prev != m {
                log::warn!(
                    "block at {pos} in {target} replaces {} with {}",
                    catalog.name(prev).unwrap_or("?"),
                    block.material
                );
            }
        }

        let structures = StructureRegistry::from_config(
            &StructuresConfig {
                structures: file.structures,
            },
            &catalog,
        )?;
        if structures.is_empty() {
            log::warn!("scene defines no structures");
        }
        log::info!(
            "scene loaded: {} materials, {} blocks, {} structures",
            catalog.len(),
            grid.len(),
            structures.len()
        );
        Ok(Self {
            space,
            catalog,
            grid,
            structures,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubit_blocks::MaterialId;

    const SCENE: &str = r#"
space = "overworld"

[materials]
stone = 1
glass = { tag = "clear" }

[[fills]]
material = "stone"
region = { worldName = "overworld", x1 = 0, y1 = 0, z1 = 0, x2 = 2, y2 = 0, z2 = 2 }

[[blocks]]
at = [1, 1, 1]
material = "glass"

[[blocks]]
at = [5, 5, 5]
material = "stone"
space = "nether"

[[structures]]
name = "lamp"
key = { s = "stone", g = "glass" }
layers = [["s"], ["g"]]
"#;

    #[test]
    fn loads_fills_blocks_and_structures() {
        let scene = Scene::from_toml_str(SCENE).unwrap();
        let glass = scene.catalog.get_id("glass").unwrap();
        assert_eq!(scene.space.as_str(), "overworld");
        assert_eq!(scene.grid.get(&scene.space, BlockPos::new(2, 0, 2)), MaterialId(1));
        assert_eq!(scene.grid.get(&scene.space, BlockPos::new(1, 1, 1)), glass);
        assert_eq!(
            scene.grid.get(&Space::new("nether"), BlockPos::new(5, 5, 5)),
            MaterialId(1)
        );
        assert_eq!(scene.grid.len(), 11);

        let done = scene
            .structures
            .observe(&scene.grid, &scene.space, BlockPos::new(1, 1, 1), glass);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].origin, BlockPos::new(1, 0, 1));
    }

    #[test]
    fn space_defaults_to_world() {
        let scene = Scene::from_toml_str("").unwrap();
        assert_eq!(scene.space.as_str(), DEFAULT_SPACE);
        assert!(scene.grid.is_empty());
        assert!(scene.structures.is_empty());
    }

    #[test]
    fn unknown_block_material_is_an_error() {
        let err = Scene::from_toml_str("[[blocks]]\nat = [0, 0, 0]\nmaterial = \"lava\"\n")
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::UnknownMaterial { ref material, .. } if material == "lava"
        ));
    }

    #[test]
    fn blank_fill_space_is_rejected() {
        let toml = r#"
[materials]
stone = 1

[[fills]]
material = "stone"
region = { space = "", x1 = 0, y1 = 0, z1 = 0, x2 = 1, y2 = 1, z2 = 1 }
"#;
        assert!(matches!(
            Scene::from_toml_str(toml),
            Err(SceneError::Region(RegionError::InvalidRecord(_)))
        ));
    }
}
