// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: points, quadrants, regions, and quadrant masks.

/// A 2D point.
///
/// Trees store `Point<i32>` (the default). Geometry helpers that rotate or offset
/// points produce `Point<i64>` so that no `i32` input can overflow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point<T = i32> {
    /// Horizontal coordinate (grows east).
    pub x: T,
    /// Vertical coordinate (grows north).
    pub y: T,
}

impl<T> Point<T> {
    /// Create a new point.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point<i32> {
    /// Widen to `i64` coordinates.
    #[inline]
    pub fn widen(self) -> Point<i64> {
        Point::new(i64::from(self.x), i64::from(self.y))
    }
}

impl<T> From<(T, T)> for Point<T> {
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

/// One of the four quadrants around a reference point.
///
/// The discriminant is the direction code used throughout the crate; it doubles
/// as the number of counter-clockwise quarter turns that carry the quadrant onto
/// [`Quadrant::NorthEast`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x >= ref.x && y >= ref.y`
    NorthEast = 0,
    /// `x >= ref.x && y < ref.y`
    SouthEast = 1,
    /// `x < ref.x && y < ref.y`
    SouthWest = 2,
    /// `x < ref.x && y >= ref.y`
    NorthWest = 3,
}

impl Quadrant {
    /// All quadrants in direction-code order.
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// The direction code (0..=3).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The quadrant for a direction code, taken modulo 4.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The next quadrant clockwise (`code + 1`).
    #[inline]
    pub const fn clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The diametrically opposite quadrant (`code + 2`).
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The next quadrant counter-clockwise (`code + 3`).
    #[inline]
    pub const fn counter_clockwise(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The single-bit mask for this quadrant.
    #[inline]
    pub const fn mask(self) -> QuadrantMask {
        match self {
            Self::NorthEast => QuadrantMask::NORTH_EAST,
            Self::SouthEast => QuadrantMask::SOUTH_EAST,
            Self::SouthWest => QuadrantMask::SOUTH_WEST,
            Self::NorthWest => QuadrantMask::NORTH_WEST,
        }
    }
}

bitflags::bitflags! {
    /// Set of child quadrants that still warrant a visit during range search.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct QuadrantMask: u8 {
        /// North-east child.
        const NORTH_EAST = 0b0000_0001;
        /// South-east child.
        const SOUTH_EAST = 0b0000_0010;
        /// South-west child.
        const SOUTH_WEST = 0b0000_0100;
        /// North-west child.
        const NORTH_WEST = 0b0000_1000;
    }
}

impl Default for QuadrantMask {
    fn default() -> Self {
        Self::all()
    }
}

impl QuadrantMask {
    /// Whether the child in `quadrant` should be visited.
    #[inline]
    pub fn includes(self, quadrant: Quadrant) -> bool {
        self.contains(quadrant.mask())
    }
}

/// Where a normalized (north-east) point lies relative to a search circle.
///
/// Numbered 1 through 5 from the innermost to the outermost band.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Strictly inside the circle. The point is a match.
    Inside = 1,
    /// Inside the circle's bounding square but not inside the circle.
    BoundingSquare = 2,
    /// Above the square, left of (or on) the right tangent line.
    RightBand = 3,
    /// Right of the square, below (or on) the top tangent line.
    TopBand = 4,
    /// Beyond both tangent lines.
    Outside = 5,
}

impl Region {
    /// The region number (1..=5).
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }
}
