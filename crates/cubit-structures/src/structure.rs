use core::fmt;

use cubit_blocks::{BlockSource, MaterialCatalog, MaterialId};
use cubit_geom::{BlockPos, Space};
use hashbrown::HashSet;

use crate::error::StructureError;
use crate::layer::Layer;

/// A stack of layers, bottom first, plus the set of materials it contains.
///
/// Cell `(row, col)` of layer `i` sits at `origin + (col, i, row)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Structure {
    layers: Vec<Layer>,
    triggers: HashSet<MaterialId>,
    // (offset from origin, required material) in layer, row, col order.
    required: Vec<(BlockPos, MaterialId)>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> Self {
        let mut s = Self::new();
        for layer in layers {
            s.add_layer_above(layer);
        }
        s
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Every material required somewhere in the structure.
    #[inline]
    pub fn trigger_materials(&self) -> &HashSet<MaterialId> {
        &self.triggers
    }

    #[inline]
    pub fn is_trigger(&self, material: MaterialId) -> bool {
        self.triggers.contains(&material)
    }

    /// Number of cells with a material requirement.
    #[inline]
    pub fn filled_count(&self) -> usize {
        self.required.len()
    }

    /// Required cells as `(offset from origin, material)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (BlockPos, MaterialId)> + '_ {
        self.required.iter().copied()
    }

    pub fn add_layer_above(&mut self, layer: Layer) {
        self.triggers.extend(layer.filled().map(|(_, _, m)| m));
        self.layers.push(layer);
        self.rebuild_required();
    }

    pub fn add_layer_below(&mut self, layer: Layer) {
        self.triggers.extend(layer.filled().map(|(_, _, m)| m));
        self.layers.insert(0, layer);
        self.rebuild_required();
    }

    /// Replaces layer `index`; the trigger set is recomputed from scratch.
    pub fn set_layer(&mut self, index: usize, layer: Layer) -> Result<Layer, StructureError> {
        let len = self.layers.len();
        let Some(slot) = self.layers.get_mut(index) else {
            return Err(StructureError::LayerOutOfRange { index, len });
        };
        let old = std::mem::replace(slot, layer);
        self.triggers = self
            .layers
            .iter()
            .flat_map(|l| l.filled().map(|(_, _, m)| m))
            .collect();
        self.rebuild_required();
        Ok(old)
    }

    fn rebuild_required(&mut self) {
        self.required.clear();
        for (y, layer) in self.layers.iter().enumerate() {
            let Ok(y) = i32::try_from(y) else {
                log::warn!("structure taller than the coordinate range, upper layers ignored");
                break;
            };
            // Layer dimensions are bounded by i32::MAX at construction.
            for (row, col, m) in layer.filled() {
                self.required
                    .push((BlockPos::new(col as i32, y, row as i32), m));
            }
        }
    }

    /// True when every required cell around `origin` holds its material.
    /// A placement running off the edge of the coordinate range never matches.
    pub fn matches_at<S: BlockSource + ?Sized>(
        &self,
        source: &S,
        space: &Space,
        origin: BlockPos,
    ) -> bool {
        self.required.iter().all(|&(off, m)| {
            origin
                .checked_add(off)
                .is_some_and(|p| source.material_at(space, p) == m)
        })
    }

    /// Looks for a placement of the structure that includes the block of
    /// `material` observed at `pos`.
    ///
    /// Every required cell is tried as the one the observed block occupies,
    /// in layer, row, column order; the first origin whose whole template
    /// matches is returned.
    pub fn find_origin<S: BlockSource + ?Sized>(
        &self,
        source: &S,
        space: &Space,
        pos: BlockPos,
        material: MaterialId,
    ) -> Option<BlockPos> {
        if !self.is_trigger(material) {
            return None;
        }
        for &(off, _) in &self.required {
            let Some(origin) = pos.checked_sub(off) else {
                continue;
            };
            log::trace!("structure candidate origin {origin} for {pos}");
            if self.matches_at(source, space, origin) {
                log::debug!("structure matched in {space} at origin {origin} (observed {pos})");
                return Some(origin);
            }
        }
        None
    }

    pub fn matches<S: BlockSource + ?Sized>(
        &self,
        source: &S,
        space: &Space,
        pos: BlockPos,
        material: MaterialId,
    ) -> bool {
        self.find_origin(source, space, pos, material).is_some()
    }

    /// Like [`Structure::find_origin`], reading the observed material from `source`.
    pub fn find_origin_at<S: BlockSource + ?Sized>(
        &self,
        source: &S,
        space: &Space,
        pos: BlockPos,
    ) -> Option<BlockPos> {
        let material = source.material_at(space, pos);
        self.find_origin(source, space, pos, material)
    }

    /// Layer dump using catalog names instead of ids.
    pub fn describe(&self, catalog: &MaterialCatalog) -> String {
        self.render(|m| match catalog.name(m) {
            Some(name) => name.to_string(),
            None => m.to_string(),
        })
    }

    fn render(&self, name: impl Fn(MaterialId) -> String) -> String {
        let mut out = String::new();
        for (i, layer) in self.layers.iter().enumerate() {
            out.push_str(&format!("-------- Layer {} --------\n", i + 1));
            for row in 0..layer.rows() {
                let cells: Vec<String> = (0..layer.cols())
                    .map(|col| layer.get(row, col).map(&name).unwrap_or_else(|| "_".into()))
                    .collect();
                out.push_str(&cells.join(" "));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|m| m.to_string()))
    }
}
