//! Read access to the live voxel grid.

use std::sync::Arc;

use cubit_geom::{BlockPos, Space};

use crate::material::MaterialId;

/// Reads the material at any integer coordinate of a named space.
///
/// Implementations are expected to answer in O(1) and to return a sensible
/// default (usually air) for cells they have no data for. Matching and
/// contraction call this from `&self` only, so a `Sync` source can be shared
/// between threads without locking.
pub trait BlockSource {
    fn material_at(&self, space: &Space, pos: BlockPos) -> MaterialId;

    /// Material treated as "nothing here" by region contraction.
    fn empty_material(&self) -> MaterialId {
        MaterialId::AIR
    }
}

impl<T: BlockSource + ?Sized> BlockSource for &T {
    #[inline]
    fn material_at(&self, space: &Space, pos: BlockPos) -> MaterialId {
        (**self).material_at(space, pos)
    }

    #[inline]
    fn empty_material(&self) -> MaterialId {
        (**self).empty_material()
    }
}

impl<T: BlockSource + ?Sized> BlockSource for Arc<T> {
    #[inline]
    fn material_at(&self, space: &Space, pos: BlockPos) -> MaterialId {
        (**self).material_at(space, pos)
    }

    #[inline]
    fn empty_material(&self) -> MaterialId {
        (**self).empty_material()
    }
}

/// Adapts a closure into a [`BlockSource`].
pub struct FnSource<F>(pub F);

impl<F> BlockSource for FnSource<F>
where
    F: Fn(&Space, BlockPos) -> MaterialId,
{
    #[inline]
    fn material_at(&self, space: &Space, pos: BlockPos) -> MaterialId {
        (self.0)(space, pos)
    }
}
