use core::fmt;

use cubit_geom::{Axis, BlockPos, Direction, FaceGroup, Location, Space, Vec3};
use serde::{Deserialize, Serialize};

use crate::cells::Cells;
use crate::error::RegionError;
use crate::record::RegionRecord;

/// Immutable axis-aligned box of grid cells inside one named space.
///
/// Both corners are inclusive. Constructors normalize the corners so that
/// `min <= max` on every axis; every transform returns a new value.
/// [`Region::expand`] (and everything built on it) skips normalization, so
/// pulling a face past its opposite face yields a degenerate region whose
/// `min` exceeds `max` on that axis. Degenerate regions contain no cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RegionRecord", try_from = "RegionRecord")]
pub struct Region {
    space: Space,
    min: BlockPos,
    max: BlockPos,
}

/// A chunk column touched by a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkColumn {
    pub cx: i32,
    pub cz: i32,
}

impl Region {
    /// Region spanned by two corners, in any order.
    pub fn new(space: impl Into<Space>, a: BlockPos, b: BlockPos) -> Self {
        Self {
            space: space.into(),
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Region from a space and six scalars.
    pub fn from_coords(
        space: impl Into<Space>,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
    ) -> Self {
        Self::new(space, BlockPos::new(x1, y1, z1), BlockPos::new(x2, y2, z2))
    }

    /// Region spanned by the cells containing two locations.
    pub fn from_locations(a: &Location, b: &Location) -> Result<Self, RegionError> {
        if a.space != b.space {
            return Err(RegionError::SpaceMismatch {
                left: a.space.clone(),
                right: b.space.clone(),
            });
        }
        Ok(Self::new(a.space.clone(), a.block(), b.block()))
    }

    /// One-cell region at the cell containing `at`.
    pub fn single(at: &Location) -> Self {
        let p = at.block();
        Self::new(at.space.clone(), p, p)
    }

    #[inline]
    pub(crate) fn raw(space: Space, min: BlockPos, max: BlockPos) -> Self {
        Self { space, min, max }
    }

    #[inline]
    pub fn space(&self) -> &Space {
        &self.space
    }

    #[inline]
    pub fn min(&self) -> BlockPos {
        self.min
    }

    #[inline]
    pub fn max(&self) -> BlockPos {
        self.max
    }

    /// Component-wise midpoint of the two corners.
    pub fn center(&self) -> Vec3 {
        (self.min.as_vec3() + self.max.as_vec3()) / 2.0
    }

    /// Inclusive cell count along `axis`. Zero or negative only for degenerate regions.
    #[inline]
    pub fn size(&self, axis: Axis) -> i64 {
        i64::from(self.max.get(axis)) - i64::from(self.min.get(axis)) + 1
    }

    #[inline]
    pub fn size_x(&self) -> i64 {
        self.size(Axis::X)
    }

    #[inline]
    pub fn size_y(&self) -> i64 {
        self.size(Axis::Y)
    }

    #[inline]
    pub fn size_z(&self) -> i64 {
        self.size(Axis::Z)
    }

    /// True when some axis has `min > max`.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        Axis::ALL.iter().any(|&a| self.min.get(a) > self.max.get(a))
    }

    /// Number of cells; `0` for degenerate regions.
    ///
    /// A box spanning the whole `i32` range holds 2^96 cells, hence `u128`.
    pub fn volume(&self) -> u128 {
        if self.is_degenerate() {
            return 0;
        }
        Axis::ALL
            .iter()
            .map(|&a| self.size(a).unsigned_abs() as u128)
            .product()
    }

    /// Lazily walks every cell: X fastest, then Y, then Z.
    #[inline]
    pub fn cells(&self) -> Cells {
        Cells::new(self.min, self.max)
    }

    #[inline]
    pub fn contains_pos(&self, pos: BlockPos) -> bool {
        Axis::ALL
            .iter()
            .all(|&a| pos.get(a) >= self.min.get(a) && pos.get(a) <= self.max.get(a))
    }

    #[inline]
    pub fn contains_block(&self, space: &Space, pos: BlockPos) -> bool {
        self.space == *space && self.contains_pos(pos)
    }

    /// True when the cell containing `at` lies inside this region.
    #[inline]
    pub fn contains(&self, at: &Location) -> bool {
        self.contains_block(&at.space, at.block())
    }

    /// True when `other` is non-degenerate and lies entirely inside this region.
    pub fn contains_region(&self, other: &Region) -> bool {
        self.space == other.space
            && !other.is_degenerate()
            && self.contains_pos(other.min)
            && self.contains_pos(other.max)
    }

    /// True when the two regions share at least one cell.
    pub fn intersects(&self, other: &Region) -> bool {
        self.space == other.space
            && !self.is_degenerate()
            && !other.is_degenerate()
            && Axis::ALL.iter().all(|&a| {
                self.min.get(a) <= other.max.get(a) && other.min.get(a) <= self.max.get(a)
            })
    }

    /// The eight corner cells.
    pub fn corners(&self) -> [BlockPos; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            BlockPos::new(lo.x, lo.y, lo.z),
            BlockPos::new(lo.x, lo.y, hi.z),
            BlockPos::new(lo.x, hi.y, lo.z),
            BlockPos::new(lo.x, hi.y, hi.z),
            BlockPos::new(hi.x, lo.y, lo.z),
            BlockPos::new(hi.x, lo.y, hi.z),
            BlockPos::new(hi.x, hi.y, lo.z),
            BlockPos::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Minimum corner.
    pub fn lower_ne(&self) -> BlockPos {
        self.min
    }

    /// Maximum corner.
    pub fn upper_sw(&self) -> BlockPos {
        self.max
    }

    pub fn lower_sw(&self) -> BlockPos {
        BlockPos::new(self.max.x, self.min.y, self.max.z)
    }

    pub fn lower_se(&self) -> BlockPos {
        BlockPos::new(self.min.x, self.min.y, self.max.z)
    }

    pub fn upper_se(&self) -> BlockPos {
        BlockPos::new(self.min.x, self.max.y, self.max.z)
    }

    pub fn lower_nw(&self) -> BlockPos {
        BlockPos::new(self.max.x, self.min.y, self.min.z)
    }

    pub fn upper_nw(&self) -> BlockPos {
        BlockPos::new(self.max.x, self.max.y, self.min.z)
    }

    pub fn upper_ne(&self) -> BlockPos {
        BlockPos::new(self.min.x, self.max.y, self.min.z)
    }

    /// Cell at an offset from the minimum corner.
    #[inline]
    pub fn relative(&self, dx: i32, dy: i32, dz: i32) -> BlockPos {
        self.min.offset(dx, dy, dz)
    }

    /// The one-cell-thick slice of this region on face `dir`.
    pub fn face(&self, dir: Direction) -> Region {
        let axis = dir.axis();
        if dir.is_positive() {
            let v = self.max.get(axis);
            Self::raw(self.space.clone(), self.min.with(axis, v), self.max)
        } else {
            let v = self.min.get(axis);
            Self::raw(self.space.clone(), self.min, self.max.with(axis, v))
        }
    }

    /// Moves face `dir` outward by `amount` (inward when negative).
    ///
    /// The face saturates at the `i32` bounds instead of wrapping.
    pub fn expand(&self, dir: Direction, amount: i32) -> Region {
        let axis = dir.axis();
        if dir.is_positive() {
            let v = self.max.get(axis).saturating_add(amount);
            Self::raw(self.space.clone(), self.min, self.max.with(axis, v))
        } else {
            let v = self.min.get(axis).saturating_sub(amount);
            Self::raw(self.space.clone(), self.min.with(axis, v), self.max)
        }
    }

    /// Translates the region `amount` cells toward `dir` without resizing it.
    ///
    /// The move is cut short where either face would leave the `i32` range,
    /// so the size is always kept.
    pub fn shift(&self, dir: Direction, amount: i32) -> Region {
        let axis = dir.axis();
        let (a, b) = (i64::from(self.min.get(axis)), i64::from(self.max.get(axis)));
        let lo = i64::from(i32::MIN) - a.min(b);
        let hi = i64::from(i32::MAX) - a.max(b);
        let step = if dir.is_positive() {
            i64::from(amount)
        } else {
            -i64::from(amount)
        };
        // Both faces land in [i32::MIN, i32::MAX] after the clamp.
        let step = step.clamp(lo, hi);
        Self::raw(
            self.space.clone(),
            self.min.with(axis, (a + step) as i32),
            self.max.with(axis, (b + step) as i32),
        )
    }

    /// Expands every face in `group` by `amount`.
    pub fn outset(&self, group: FaceGroup, amount: i32) -> Region {
        group
            .faces()
            .iter()
            .fold(self.clone(), |r, &d| r.expand(d, amount))
    }

    /// Shrinks every face in `group` by `amount`.
    pub fn inset(&self, group: FaceGroup, amount: i32) -> Region {
        self.outset(group, -amount)
    }

    /// Smallest region holding both this region and `other`.
    pub fn bounding_union(&self, other: Option<&Region>) -> Result<Region, RegionError> {
        let Some(other) = other else {
            return Ok(self.clone());
        };
        self.same_space(&other.space)?;
        Ok(Self::raw(
            self.space.clone(),
            self.min.min(other.min),
            self.max.max(other.max),
        ))
    }

    /// Squared distance from `at` to the nearest face, `0` inside.
    /// `None` when `at` is in another space.
    pub fn nearest_surface_distance_squared(&self, at: &Location) -> Option<f64> {
        if at.space != self.space {
            return None;
        }
        let d = Axis::ALL.iter().fold(0.0, |acc, &a| {
            let p = at.pos.get(a);
            let lo = f64::from(self.min.get(a));
            let hi = f64::from(self.max.get(a));
            let delta = if p < lo {
                lo - p
            } else if p > hi {
                p - hi
            } else {
                0.0
            };
            acc + delta * delta
        });
        Some(d)
    }

    pub fn nearest_surface_distance(&self, at: &Location) -> Option<f64> {
        self.nearest_surface_distance_squared(at).map(f64::sqrt)
    }

    /// True when `at` is within `range` of the nearest face. Always false across spaces.
    pub fn is_within_range(&self, at: &Location, range: f64) -> bool {
        self.nearest_surface_distance_squared(at)
            .is_some_and(|d| d <= range * range)
    }

    /// Chunk columns of width `chunk_width` overlapped by this region, X-major.
    ///
    /// Lazy: a huge region with a narrow chunk width yields columns on demand.
    pub fn chunk_columns(&self, chunk_width: u32) -> impl Iterator<Item = ChunkColumn> + use<> {
        let bounds = (!self.is_degenerate() && chunk_width > 0).then(|| {
            let w = i64::from(chunk_width);
            let to_chunk = |v: i32| i64::from(v).div_euclid(w) as i32;
            (
                to_chunk(self.min.x),
                to_chunk(self.max.x),
                to_chunk(self.min.z),
                to_chunk(self.max.z),
            )
        });
        bounds.into_iter().flat_map(|(cx0, cx1, cz0, cz1)| {
            (cx0..=cx1).flat_map(move |cx| (cz0..=cz1).map(move |cz| ChunkColumn { cx, cz }))
        })
    }

    pub fn to_record(&self) -> RegionRecord {
        RegionRecord {
            space: self.space.to_string(),
            x1: self.min.x,
            y1: self.min.y,
            z1: self.min.z,
            x2: self.max.x,
            y2: self.max.y,
            z2: self.max.z,
        }
    }

    pub fn from_record(record: &RegionRecord) -> Result<Self, RegionError> {
        if record.space.trim().is_empty() {
            return Err(RegionError::InvalidRecord("space name is empty".into()));
        }
        Ok(Self::from_coords(
            record.space.as_str(),
            record.x1,
            record.y1,
            record.z1,
            record.x2,
            record.y2,
            record.z2,
        ))
    }

    pub(crate) fn same_space(&self, other: &Space) -> Result<(), RegionError> {
        if self.space == *other {
            Ok(())
        } else {
            Err(RegionError::SpaceMismatch {
                left: self.space.clone(),
                right: other.clone(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = BlockPos;
    type IntoIter = Cells;

    fn into_iter(self) -> Cells {
        self.cells()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region[{}: {} .. {}]", self.space, self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x1: i32, y1: i32, z1: i32, x2: i32, y2: i32, z2: i32) -> Region {
        Region::from_coords("world", x1, y1, z1, x2, y2, z2)
    }

    #[test]
    fn expand_moves_only_one_face() {
        let base = r(0, 0, 0, 3, 3, 3);
        assert_eq!(base.expand(Direction::North, 2), r(-2, 0, 0, 3, 3, 3));
        assert_eq!(base.expand(Direction::South, 2), r(0, 0, 0, 5, 3, 3));
        assert_eq!(base.expand(Direction::East, 1), r(0, 0, -1, 3, 3, 3));
        assert_eq!(base.expand(Direction::West, 1), r(0, 0, 0, 3, 3, 4));
        assert_eq!(base.expand(Direction::Down, 3), r(0, -3, 0, 3, 3, 3));
        assert_eq!(base.expand(Direction::Up, -1), r(0, 0, 0, 3, 2, 3));
    }

    #[test]
    fn shrinking_past_opposite_face_is_degenerate_not_swapped() {
        let base = r(0, 0, 0, 3, 3, 3);
        let squashed = base.expand(Direction::Up, -6);
        assert_eq!(squashed.min(), BlockPos::new(0, 0, 0));
        assert_eq!(squashed.max(), BlockPos::new(3, -3, 3));
        assert!(squashed.is_degenerate());
        assert_eq!(squashed.volume(), 0);
        assert_eq!(squashed.cells().count(), 0);
        assert!(!squashed.contains_pos(BlockPos::new(0, 0, 0)));
    }

    #[test]
    fn face_is_one_cell_thick() {
        let base = r(-2, 5, 1, 4, 9, 3);
        for d in Direction::ALL {
            let f = base.face(d);
            assert_eq!(f.size(d.axis()), 1, "{d}");
            for other in Axis::ALL.into_iter().filter(|&a| a != d.axis()) {
                assert_eq!(f.size(other), base.size(other));
            }
            assert!(base.contains_region(&f));
        }
        assert_eq!(base.face(Direction::Up).min().y, 9);
        assert_eq!(base.face(Direction::Down).max().y, 5);
    }

    #[test]
    fn outset_and_inset_groups() {
        let base = r(0, 0, 0, 4, 4, 4);
        assert_eq!(base.outset(FaceGroup::Horizontal, 1), r(-1, 0, -1, 5, 4, 5));
        assert_eq!(base.outset(FaceGroup::Vertical, 2), r(0, -2, 0, 4, 6, 4));
        assert_eq!(base.outset(FaceGroup::Both, 1), r(-1, -1, -1, 5, 5, 5));
        assert_eq!(base.outset(FaceGroup::Axis(Axis::Z), 3), r(0, 0, -3, 4, 4, 7));
        assert_eq!(base.inset(FaceGroup::Both, 1), r(1, 1, 1, 3, 3, 3));
        assert_eq!(base.inset(FaceGroup::Horizontal, 2).volume(), 5);
    }

    #[test]
    fn named_corners_follow_direction_mapping() {
        let base = r(0, 10, 20, 1, 11, 21);
        assert_eq!(base.lower_ne(), BlockPos::new(0, 10, 20));
        assert_eq!(base.upper_sw(), BlockPos::new(1, 11, 21));
        assert_eq!(base.lower_sw(), BlockPos::new(1, 10, 21));
        assert_eq!(base.lower_se(), BlockPos::new(0, 10, 21));
        assert_eq!(base.upper_se(), BlockPos::new(0, 11, 21));
        assert_eq!(base.lower_nw(), BlockPos::new(1, 10, 20));
        assert_eq!(base.upper_nw(), BlockPos::new(1, 11, 20));
        assert_eq!(base.upper_ne(), BlockPos::new(0, 11, 20));
        let mut corners = base.corners().to_vec();
        corners.sort();
        corners.dedup();
        assert_eq!(corners.len(), 8);
    }

    #[test]
    fn chunk_columns_use_floor_division() {
        let base = r(-1, 0, 0, 16, 0, 15);
        let cols: Vec<_> = base.chunk_columns(16).collect();
        assert_eq!(
            cols,
            vec![
                ChunkColumn { cx: -1, cz: 0 },
                ChunkColumn { cx: 0, cz: 0 },
                ChunkColumn { cx: 1, cz: 0 },
            ]
        );
        assert_eq!(base.chunk_columns(0).count(), 0);
    }

    #[test]
    fn chunk_columns_are_lazy_for_huge_regions() {
        let huge = r(i32::MIN, 0, i32::MIN, i32::MAX, 0, i32::MAX);
        let first: Vec<_> = huge.chunk_columns(1).take(2).collect();
        let lo = i32::MIN;
        assert_eq!(
            first,
            vec![ChunkColumn { cx: lo, cz: lo }, ChunkColumn { cx: lo, cz: lo + 1 }]
        );
        let mut wide = huge.chunk_columns(1 << 31);
        assert_eq!(wide.next(), Some(ChunkColumn { cx: -1, cz: -1 }));
        assert_eq!(wide.count(), 3);
    }

    #[test]
    fn volume_of_full_coordinate_range() {
        let all = r(i32::MIN, i32::MIN, i32::MIN, i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(all.volume(), 1u128 << 96);
        assert_eq!(all.cells().size_hint(), (usize::MAX, None));
    }

    #[test]
    fn expand_saturates_at_coordinate_limits() {
        let base = r(0, 0, 0, 10, 10, 10);
        assert_eq!(base.expand(Direction::Up, i32::MAX).max().y, i32::MAX);
        assert_eq!(base.expand(Direction::Down, i32::MAX).min().y, -i32::MAX);
        assert_eq!(base.expand(Direction::Down, i32::MIN).min().y, i32::MAX);
        let edge = r(i32::MIN, 0, 0, 0, 0, 0);
        assert_eq!(edge.expand(Direction::North, 5).min().x, i32::MIN);
        assert_eq!(
            edge.outset(FaceGroup::Both, i32::MAX).max(),
            BlockPos::new(i32::MAX, i32::MAX, i32::MAX)
        );
    }

    #[test]
    fn shift_stops_at_coordinate_limits_and_keeps_size() {
        let edge = r(0, 0, 0, i32::MAX, 0, 0);
        let moved = edge.shift(Direction::South, 1);
        assert_eq!(moved, edge);

        let near = r(i32::MAX - 10, 0, 0, i32::MAX - 5, 0, 0);
        let moved = near.shift(Direction::South, 100);
        assert_eq!(moved, r(i32::MAX - 5, 0, 0, i32::MAX, 0, 0));
        assert_eq!(moved.volume(), near.volume());

        let high = r(0, 0, 0, 1, 1, 1);
        assert_eq!(
            high.shift(Direction::South, i32::MIN),
            high.expand(Direction::South, i32::MIN)
                .expand(Direction::North, i32::MAX)
                .expand(Direction::North, 1)
        );

        let low = r(i32::MIN + 3, 5, 5, i32::MIN + 4, 6, 6);
        let floor = r(i32::MIN, 5, 5, i32::MIN + 1, 6, 6);
        assert_eq!(low.shift(Direction::North, i32::MAX), floor);
        assert_eq!(low.shift(Direction::South, i32::MIN), floor);
        assert_eq!(
            low.shift(Direction::Up, -10),
            r(i32::MIN + 3, -5, 5, i32::MIN + 4, -4, 6)
        );
    }
}
