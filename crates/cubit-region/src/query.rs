//! Region queries that read the live grid.

use cubit_blocks::{BlockSource, MaterialId};
use cubit_geom::{BlockPos, Direction, Space};

use crate::cells::Cells;
use crate::region::Region;

/// `(cell, material)` pairs for every cell of a region, in [`Cells`] order.
pub struct Materials<'a, S: ?Sized> {
    source: &'a S,
    space: &'a Space,
    cells: Cells,
}

impl<S: BlockSource + ?Sized> Iterator for Materials<'_, S> {
    type Item = (BlockPos, MaterialId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.cells.next()?;
        Some((p, self.source.material_at(self.space, p)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl Region {
    pub fn materials<'a, S: BlockSource + ?Sized>(&'a self, source: &'a S) -> Materials<'a, S> {
        Materials {
            source,
            space: self.space(),
            cells: self.cells(),
        }
    }

    /// Every cell currently holding `material`.
    pub fn cells_of<S: BlockSource + ?Sized>(
        &self,
        source: &S,
        material: MaterialId,
    ) -> Vec<BlockPos> {
        self.materials(source)
            .filter(|&(_, m)| m == material)
            .map(|(p, _)| p)
            .collect()
    }

    /// True when every cell holds `material`. Vacuously true for degenerate regions.
    pub fn contains_only<S: BlockSource + ?Sized>(&self, source: &S, material: MaterialId) -> bool {
        self.materials(source).all(|(_, m)| m == material)
    }

    /// Pulls the face opposite `dir` toward `dir` past every all-empty slice.
    ///
    /// `Down` lowers the top face, `Up` raises the bottom face, and so on.
    /// The face stops at the first slice holding a non-empty cell or at the
    /// last slice of the region, so the result is never inverted.
    pub fn contract_toward<S: BlockSource + ?Sized>(&self, source: &S, dir: Direction) -> Region {
        let empty = source.empty_material();
        let axis = dir.axis();
        let mut face = self.face(dir.opposite());
        if dir.is_positive() {
            while face.max().get(axis) < self.max().get(axis) && face.contains_only(source, empty) {
                face = face.shift(dir, 1);
            }
            let lo = self.min().with(axis, face.min().get(axis));
            Region::raw(self.space().clone(), lo, self.max())
        } else {
            while face.min().get(axis) > self.min().get(axis) && face.contains_only(source, empty) {
                face = face.shift(dir, 1);
            }
            let hi = self.max().with(axis, face.max().get(axis));
            Region::raw(self.space().clone(), self.min(), hi)
        }
    }

    /// Tightest region around every non-empty cell, or `None` if there is none.
    pub fn contract<S: BlockSource + ?Sized>(&self, source: &S) -> Option<Region> {
        let empty = source.empty_material();
        if self.contains_only(source, empty) {
            log::debug!("contract {self}: no non-empty cells");
            return None;
        }
        let out = Direction::ALL
            .iter()
            .fold(self.clone(), |r, &d| r.contract_toward(source, d));
        log::debug!("contract {self} -> {out}");
        Some(out)
    }
}
