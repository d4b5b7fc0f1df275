use std::collections::BTreeMap;

use cubit_blocks::MaterialCatalog;
use serde::Deserialize;

use crate::builder::StructureBuilder;
use crate::error::StructureError;
use crate::structure::Structure;

/// `[[structures]]` tables from a TOML file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StructuresConfig {
    #[serde(default)]
    pub structures: Vec<StructureDef>,
}

impl StructuresConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, StructureError> {
        Ok(toml::from_str(toml_str)?)
    }
}

/// A structure written as data:
///
/// ```toml
/// [[structures]]
/// name = "pillar"
/// key = { s = "stone", g = "glass" }
/// layers = [["s"], ["g"], ["s"]]
/// ```
///
/// `layers` run bottom to top and material names resolve through a
/// [`MaterialCatalog`].
#[derive(Clone, Debug, Deserialize)]
pub struct StructureDef {
    pub name: String,
    #[serde(default)]
    pub key: BTreeMap<String, String>,
    pub layers: Vec<Vec<String>>,
}

impl StructureDef {
    pub fn compile(&self, catalog: &MaterialCatalog) -> Result<Structure, StructureError> {
        let mut builder = StructureBuilder::new();
        for (key, material) in &self.key {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(StructureError::BadKey {
                    structure: self.name.clone(),
                    key: key.clone(),
                });
            };
            let id = catalog
                .get_id(material)
                .ok_or_else(|| StructureError::UnknownMaterial {
                    structure: self.name.clone(),
                    material: material.clone(),
                })?;
            builder = builder.material(c, id);
        }
        for rows in &self.layers {
            builder = builder.layer_above(rows);
        }
        builder.build().map_err(|e| StructureError::Definition {
            structure: self.name.clone(),
            source: Box::new(e),
        })
    }
}
