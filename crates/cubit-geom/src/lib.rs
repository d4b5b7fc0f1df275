//! Grid coordinates, named spaces, and face directions shared by the cubit crates.
#![forbid(unsafe_code)]

pub mod direction;

pub use direction::{Axis, Direction, FaceGroup};

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::sync::Arc;

/// Name of an independent voxel coordinate system (a "world").
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Space(Arc<str>);

impl Space {
    #[inline]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Space {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Space {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for Space {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Integer grid cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Steps `amount` cells out of the face `dir`.
    #[inline]
    pub fn step(self, dir: Direction, amount: i32) -> Self {
        let (dx, dy, dz) = dir.delta();
        self.offset(dx * amount, dy * amount, dz * amount)
    }

    #[inline]
    pub fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    #[inline]
    pub fn with(self, axis: Axis, v: i32) -> Self {
        match axis {
            Axis::X => Self { x: v, ..self },
            Axis::Y => Self { y: v, ..self },
            Axis::Z => Self { z: v, ..self },
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, o: BlockPos) -> Self {
        Self::new(self.x.min(o.x), self.y.min(o.y), self.z.min(o.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, o: BlockPos) -> Self {
        Self::new(self.x.max(o.x), self.y.max(o.y), self.z.max(o.z))
    }

    /// Squared euclidean distance; `u128` holds it even between opposite corners of the grid.
    #[inline]
    pub fn distance_sq(self, other: BlockPos) -> u128 {
        let d = |a: i32, b: i32| u128::from((i64::from(a) - i64::from(b)).unsigned_abs());
        let (dx, dy, dz) = (d(self.x, other.x), d(self.y, other.y), d(self.z, other.z));
        dx * dx + dy * dy + dz * dz
    }

    /// Component-wise sum, `None` if any axis leaves the `i32` range.
    #[inline]
    pub fn checked_add(self, o: BlockPos) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(o.x)?,
            self.y.checked_add(o.y)?,
            self.z.checked_add(o.z)?,
        ))
    }

    /// Component-wise difference, `None` if any axis leaves the `i32` range.
    #[inline]
    pub fn checked_sub(self, o: BlockPos) -> Option<Self> {
        Some(Self::new(
            self.x.checked_sub(o.x)?,
            self.y.checked_sub(o.y)?,
            self.z.checked_sub(o.z)?,
        ))
    }

    #[inline]
    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }
}

impl Add for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn add(self, rhs: BlockPos) -> BlockPos {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

impl Sub for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn sub(self, rhs: BlockPos) -> BlockPos {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<BlockPos> for (i32, i32, i32) {
    fn from(value: BlockPos) -> Self {
        (value.x, value.y, value.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Fractional point, used for centers and distance queries.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// The grid cell containing this point.
    #[inline]
    pub fn floor(self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<BlockPos> for Vec3 {
    fn from(value: BlockPos) -> Self {
        value.as_vec3()
    }
}

/// A fractional point inside a named space.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub space: Space,
    pub pos: Vec3,
}

impl Location {
    #[inline]
    pub fn new(space: impl Into<Space>, x: f64, y: f64, z: f64) -> Self {
        Self {
            space: space.into(),
            pos: Vec3::new(x, y, z),
        }
    }

    /// Location at the minimum corner of a grid cell.
    #[inline]
    pub fn at_block(space: impl Into<Space>, pos: BlockPos) -> Self {
        Self {
            space: space.into(),
            pos: pos.as_vec3(),
        }
    }

    #[inline]
    pub fn block(&self) -> BlockPos {
        self.pos.floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tuple_roundtrip(p: BlockPos) {
            let t: (i32, i32, i32) = p.into();
            prop_assert_eq!(BlockPos::from(t), p);
        }

        #[test]
        fn min_max_bracket(a: BlockPos, b: BlockPos) {
            let lo = a.min(b);
            let hi = a.max(b);
            for axis in Axis::ALL {
                prop_assert!(lo.get(axis) <= hi.get(axis));
                prop_assert!(lo.get(axis) == a.get(axis) || lo.get(axis) == b.get(axis));
            }
        }
    }

    #[test]
    fn floor_handles_negative_fractions() {
        assert_eq!(Vec3::new(-0.5, 0.5, -1.0).floor(), BlockPos::new(-1, 0, -1));
        assert_eq!(Vec3::new(2.999, -2.001, 0.0).floor(), BlockPos::new(2, -3, 0));
    }

    #[test]
    fn space_compares_by_name() {
        let a = Space::new("world");
        let b = Space::from(String::from("world"));
        assert_eq!(a, b);
        assert_ne!(a, Space::from("nether"));
        assert_eq!(a.to_string(), "world");
    }
}
