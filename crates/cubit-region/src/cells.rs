use core::iter::FusedIterator;

use cubit_geom::BlockPos;

/// Iterator over every cell of a region, X fastest, then Y, then Z.
///
/// Holds only the bounds, so it can be dropped at any point; asking the
/// region for a fresh one restarts from the minimum corner.
#[derive(Clone, Debug)]
pub struct Cells {
    min: BlockPos,
    max: BlockPos,
    next: Option<BlockPos>,
}

impl Cells {
    pub(crate) fn new(min: BlockPos, max: BlockPos) -> Self {
        let empty = min.x > max.x || min.y > max.y || min.z > max.z;
        Self {
            min,
            max,
            next: if empty { None } else { Some(min) },
        }
    }

    fn remaining(&self) -> u128 {
        let Some(p) = self.next else {
            return 0;
        };
        let sx = (i64::from(self.max.x) - i64::from(self.min.x) + 1) as u128;
        let sy = (i64::from(self.max.y) - i64::from(self.min.y) + 1) as u128;
        let sz = (i64::from(self.max.z) - i64::from(self.min.z) + 1) as u128;
        let dx = (i64::from(p.x) - i64::from(self.min.x)) as u128;
        let dy = (i64::from(p.y) - i64::from(self.min.y)) as u128;
        let dz = (i64::from(p.z) - i64::from(self.min.z)) as u128;
        let done = (dz * sy + dy) * sx + dx;
        sx * sy * sz - done
    }
}

impl Iterator for Cells {
    type Item = BlockPos;

    fn next(&mut self) -> Option<BlockPos> {
        let cur = self.next?;
        self.next = if cur.x < self.max.x {
            Some(BlockPos::new(cur.x + 1, cur.y, cur.z))
        } else if cur.y < self.max.y {
            Some(BlockPos::new(self.min.x, cur.y + 1, cur.z))
        } else if cur.z < self.max.z {
            Some(BlockPos::new(self.min.x, self.min.y, cur.z + 1))
        } else {
            None
        };
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        match usize::try_from(n) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Cells {}
