//! Axes, face directions, and face groups.

use core::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The face on the minimum side of this axis.
    #[inline]
    pub fn negative(self) -> Direction {
        match self {
            Axis::X => Direction::North,
            Axis::Y => Direction::Down,
            Axis::Z => Direction::East,
        }
    }

    /// The face on the maximum side of this axis.
    #[inline]
    pub fn positive(self) -> Direction {
        self.negative().opposite()
    }
}

/// One of the six face directions of a cuboid.
///
/// North/South run along X (North is the minimum side), East/West run along
/// Z (East is the minimum side), Down/Up run along Y.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
    Up = 4,
    Down = 5,
}

impl Direction {
    /// All six directions in the order used for whole-region contraction.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::South,
        Direction::East,
        Direction::Up,
        Direction::North,
        Direction::West,
    ];

    /// Returns the `[0..6)` index of this direction.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
            Direction::East | Direction::West => Axis::Z,
        }
    }

    /// True when this face sits on the maximum side of its axis.
    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::South | Direction::West | Direction::Up)
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::North => (-1, 0, 0),
            Direction::South => (1, 0, 0),
            Direction::East => (0, 0, -1),
            Direction::West => (0, 0, 1),
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
        }
    }

    pub fn parse(s: &str) -> Option<Direction> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Some(Direction::North),
            "east" => Some(Direction::East),
            "south" => Some(Direction::South),
            "west" => Some(Direction::West),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(s)
    }
}

/// Several faces moved together by outset/inset.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceGroup {
    /// Both faces of one axis.
    Axis(Axis),
    /// The four side faces (X and Z).
    Horizontal,
    /// Top and bottom.
    Vertical,
    /// All six faces.
    Both,
}

impl FaceGroup {
    pub fn faces(self) -> &'static [Direction] {
        const X: [Direction; 2] = [Direction::North, Direction::South];
        const Y: [Direction; 2] = [Direction::Down, Direction::Up];
        const Z: [Direction; 2] = [Direction::East, Direction::West];
        const HORIZONTAL: [Direction; 4] = [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ];
        const BOTH: [Direction; 6] = [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Down,
            Direction::Up,
        ];
        match self {
            FaceGroup::Axis(Axis::X) => &X,
            FaceGroup::Axis(Axis::Y) | FaceGroup::Vertical => &Y,
            FaceGroup::Axis(Axis::Z) => &Z,
            FaceGroup::Horizontal => &HORIZONTAL,
            FaceGroup::Both => &BOTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution_and_flips_sign() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.opposite().axis(), d.axis());
            assert_ne!(d.opposite().is_positive(), d.is_positive());
            let (dx, dy, dz) = d.delta();
            let (ox, oy, oz) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy, dz + oz), (0, 0, 0));
        }
    }

    #[test]
    fn axis_faces_round_trip() {
        for axis in Axis::ALL {
            assert_eq!(axis.negative().axis(), axis);
            assert!(!axis.negative().is_positive());
            assert!(axis.positive().is_positive());
        }
    }

    #[test]
    fn groups_cover_expected_faces() {
        assert_eq!(FaceGroup::Horizontal.faces().len(), 4);
        assert_eq!(FaceGroup::Vertical.faces().len(), 2);
        assert_eq!(FaceGroup::Both.faces().len(), 6);
        assert!(
            FaceGroup::Horizontal
                .faces()
                .iter()
                .all(|d| d.axis() != Axis::Y)
        );
        for axis in Axis::ALL {
            assert!(FaceGroup::Axis(axis).faces().iter().all(|d| d.axis() == axis));
        }
    }

    #[test]
    fn parse_matches_display() {
        for d in Direction::ALL {
            assert_eq!(Direction::parse(&d.to_string()), Some(d));
        }
        assert_eq!(Direction::parse("UP"), Some(Direction::Up));
        assert_eq!(Direction::parse("sideways"), None);
    }
}
