use std::collections::VecDeque;

use cubit_blocks::MaterialId;
use hashbrown::HashMap;

use crate::error::StructureError;
use crate::layer::Layer;
use crate::structure::Structure;

/// Recipe-style structure builder.
///
/// Each layer is a list of equal-width rows; every character maps to a
/// material through [`StructureBuilder::material`], except space which
/// accepts any block. Map a character to air to require an empty cell.
///
/// ```
/// use cubit_blocks::MaterialId;
/// use cubit_structures::StructureBuilder;
///
/// let obsidian = MaterialId(49);
/// let fire = MaterialId(51);
/// let portal = StructureBuilder::new()
///     .material('o', obsidian)
///     .material('f', fire)
///     .layer_above(&["oooo"])
///     .layer_above(&["offo"])
///     .layer_above(&["o  o"])
///     .layer_above(&["oooo"])
///     .build()
///     .unwrap();
/// assert_eq!(portal.height(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StructureBuilder {
    key: HashMap<char, MaterialId>,
    layers: VecDeque<Vec<String>>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn material(mut self, key: char, material: MaterialId) -> Self {
        self.key.insert(key, material);
        self
    }

    /// Stacks a layer on top of the current highest one.
    pub fn layer_above<S: AsRef<str>>(mut self, rows: &[S]) -> Self {
        self.layers
            .push_back(rows.iter().map(|r| r.as_ref().to_string()).collect());
        self
    }

    /// Slides a layer under the current lowest one.
    pub fn layer_below<S: AsRef<str>>(mut self, rows: &[S]) -> Self {
        self.layers
            .push_front(rows.iter().map(|r| r.as_ref().to_string()).collect());
        self
    }

    fn compile_layer(&self, rows: &[String]) -> Result<Layer, StructureError> {
        let mut cells = Vec::with_capacity(rows.len());
        let width = rows.first().map(|r| r.chars().count());
        for (row, text) in rows.iter().enumerate() {
            let found = text.chars().count();
            if let Some(expected) = width.filter(|&w| w != found) {
                return Err(StructureError::RaggedRow {
                    layer: 0,
                    row,
                    expected,
                    found,
                });
            }
            let mut line = Vec::with_capacity(found);
            for (col, key) in text.chars().enumerate() {
                if key == ' ' {
                    line.push(None);
                    continue;
                }
                match self.key.get(&key) {
                    Some(&m) => line.push(Some(m)),
                    None => {
                        return Err(StructureError::UnmappedKey {
                            layer: 0,
                            row,
                            col,
                            key,
                        });
                    }
                }
            }
            cells.push(line);
        }
        Layer::from_rows(cells)
    }

    /// Validates every layer and produces the structure.
    pub fn build(self) -> Result<Structure, StructureError> {
        if self.key.contains_key(&' ') {
            return Err(StructureError::ReservedKey);
        }
        if i32::try_from(self.layers.len()).is_err() {
            return Err(StructureError::TooManyLayers {
                count: self.layers.len(),
            });
        }
        let mut structure = Structure::new();
        for (i, rows) in self.layers.iter().enumerate() {
            let layer = self.compile_layer(rows).map_err(|e| e.at_layer(i))?;
            structure.add_layer_above(layer);
        }
        log::debug!(
            "built structure: {} layers, {} required cells, {} trigger materials",
            structure.height(),
            structure.filled_count(),
            structure.trigger_materials().len()
        );
        Ok(structure)
    }
}
