//! Sparse in-memory block storage.

use cubit_geom::{BlockPos, Space};
use hashbrown::HashMap;

use crate::material::MaterialId;
use crate::source::BlockSource;

/// Per-space sparse map of non-air cells. Unset cells read as air.
#[derive(Clone, Debug, Default)]
pub struct MemoryGrid {
    spaces: HashMap<Space, HashMap<BlockPos, MaterialId>>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self {
            spaces: HashMap::new(),
        }
    }

    pub fn get(&self, space: &Space, pos: BlockPos) -> MaterialId {
        self.spaces
            .get(space)
            .and_then(|m| m.get(&pos).copied())
            .unwrap_or(MaterialId::AIR)
    }

    /// Writes one cell; writing air removes the entry. Returns the previous material.
    pub fn set(&mut self, space: &Space, pos: BlockPos, material: MaterialId) -> MaterialId {
        if material.is_air() {
            let Some(cells) = self.spaces.get_mut(space) else {
                return MaterialId::AIR;
            };
            let prev = cells.remove(&pos).unwrap_or(MaterialId::AIR);
            if cells.is_empty() {
                self.spaces.remove(space);
            }
            return prev;
        }
        self.spaces
            .entry(space.clone())
            .or_default()
            .insert(pos, material)
            .unwrap_or(MaterialId::AIR)
    }

    /// Fills the inclusive box spanned by `a` and `b`. Returns the number of cells written.
    pub fn fill(&mut self, space: &Space, a: BlockPos, b: BlockPos, material: MaterialId) -> usize {
        let lo = a.min(b);
        let hi = a.max(b);
        let mut n = 0;
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                for x in lo.x..=hi.x {
                    self.set(space, BlockPos::new(x, y, z), material);
                    n += 1;
                }
            }
        }
        n
    }

    /// Number of non-air cells across all spaces.
    pub fn len(&self) -> usize {
        self.spaces.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn clear(&mut self) {
        self.spaces.clear();
    }

    /// Snapshot of all non-air cells in one space.
    pub fn snapshot(&self, space: &Space) -> Vec<(BlockPos, MaterialId)> {
        self.spaces
            .get(space)
            .map(|m| m.iter().map(|(k, v)| (*k, *v)).collect())
            .unwrap_or_default()
    }
}

impl BlockSource for MemoryGrid {
    #[inline]
    fn material_at(&self, space: &Space, pos: BlockPos) -> MaterialId {
        self.get(space, pos)
    }
}
