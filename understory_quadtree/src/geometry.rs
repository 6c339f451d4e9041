// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant classification, rotation normalization, region bands, and pruning masks.
//!
//! Range search only ever reasons about a node that lies north-east of the search
//! center. A node in any other quadrant is first rotated about the center by a
//! whole number of quarter turns until it lands in the north-east quadrant; the
//! region test and the mask derived from it are then mapped back through the
//! same direction code.
//!
//! All offsets are computed in `i64` and squared distances in `i128`, so every
//! `i32` input is handled without overflow.

use crate::types::{Point, Quadrant, QuadrantMask, Region};

/// The quadrant `p` occupies relative to `origin`.
///
/// Ties on either axis fall toward the east/north half, so a point equal to
/// `origin` is [`Quadrant::NorthEast`].
#[inline]
pub fn classify(p: Point, origin: Point) -> Quadrant {
    match (p.x < origin.x, p.y < origin.y) {
        (true, true) => Quadrant::SouthWest,
        (true, false) => Quadrant::NorthWest,
        (false, true) => Quadrant::SouthEast,
        (false, false) => Quadrant::NorthEast,
    }
}

/// Rotate `point` counter-clockwise about `center` by `turns` quarter turns.
///
/// The rotation is exact; `turns` is reduced modulo 4.
pub fn rotate_ccw(point: Point, center: Point, turns: usize) -> Point<i64> {
    let center = center.widen();
    let mut p = point.widen();
    for _ in 0..turns % 4 {
        p = Point::new(center.y - p.y + center.x, p.x - center.x + center.y);
    }
    p
}

/// Rotate `point` (which lies in `quadrant` relative to `center`) into the
/// north-east quadrant.
#[inline]
pub fn normalize(point: Point, center: Point, quadrant: Quadrant) -> Point<i64> {
    rotate_ccw(point, center, quadrant.index())
}

/// Classify a normalized point against the circle of `radius` around `center`.
///
/// `normalized` is expected to lie north-east of `center`. A non-positive radius
/// never yields [`Region::Inside`].
pub fn classify_region(center: Point, normalized: Point<i64>, radius: i32) -> Region {
    let c = center.widen();
    let r = i64::from(radius);
    let dx = i128::from((normalized.x - c.x).abs());
    let dy = i128::from((normalized.y - c.y).abs());
    if r > 0 && dx * dx + dy * dy < i128::from(r) * i128::from(r) {
        return Region::Inside;
    }

    let within_right = normalized.x <= c.x + r;
    let within_top = normalized.y <= c.y + r;
    match (within_right, within_top) {
        (true, true) => Region::BoundingSquare,
        (true, false) => Region::RightBand,
        (false, true) => Region::TopBand,
        (false, false) => Region::Outside,
    }
}

/// Children of a node in `quadrant` (relative to the search center) that can
/// still hold matches, given the node's `region`.
pub fn pruning_mask(quadrant: Quadrant, region: Region) -> QuadrantMask {
    let own = quadrant.mask();
    match region {
        Region::Inside => QuadrantMask::all(),
        Region::BoundingSquare => QuadrantMask::all() - own,
        Region::RightBand => QuadrantMask::all() - own - quadrant.counter_clockwise().mask(),
        Region::TopBand => QuadrantMask::all() - own - quadrant.clockwise().mask(),
        Region::Outside => quadrant.opposite().mask(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_quadrants_and_ties() {
        let o = Point::new(0, 0);
        assert_eq!(classify(Point::new(1, 1), o), Quadrant::NorthEast);
        assert_eq!(classify(Point::new(1, -1), o), Quadrant::SouthEast);
        assert_eq!(classify(Point::new(-1, -1), o), Quadrant::SouthWest);
        assert_eq!(classify(Point::new(-1, 1), o), Quadrant::NorthWest);

        // Ties go east/north.
        assert_eq!(classify(o, o), Quadrant::NorthEast);
        assert_eq!(classify(Point::new(0, -1), o), Quadrant::SouthEast);
        assert_eq!(classify(Point::new(-1, 0), o), Quadrant::NorthWest);
    }

    #[test]
    fn normalize_lands_in_north_east() {
        let c = Point::new(3, -2);
        for p in [
            Point::new(10, 7),
            Point::new(10, -9),
            Point::new(-4, -9),
            Point::new(-4, 7),
            Point::new(3, -9),
            Point::new(-4, -2),
        ] {
            let n = normalize(p, c, classify(p, c));
            assert!(n.x >= 3 && n.y >= -2, "{p:?} normalized to {n:?}");
        }
    }

    #[test]
    fn single_turn_matches_formula() {
        let c = Point::new(1, 2);
        let p = Point::new(4, 3);
        // x' = cy - y + cx, y' = x - cx + cy
        assert_eq!(rotate_ccw(p, c, 1), Point::new(0, 5));
    }

    #[test]
    fn four_turns_is_identity() {
        for (p, c) in [
            (Point::new(5, -7), Point::new(0, 0)),
            (Point::new(-3, 12), Point::new(40, -40)),
            (Point::new(i32::MAX, i32::MIN), Point::new(i32::MIN, i32::MAX)),
        ] {
            assert_eq!(rotate_ccw(p, c, 4), p.widen());
            assert_eq!(rotate_ccw(p, c, 8), p.widen());
            assert_eq!(rotate_ccw(p, c, 5), rotate_ccw(p, c, 1));
        }
    }

    #[test]
    fn rotation_preserves_distance() {
        let c = Point::new(-6, 11);
        let p = Point::new(9, 2);
        let d = |q: Point<i64>| (q.x + 6).pow(2) + (q.y - 11).pow(2);
        for turns in 0..4 {
            assert_eq!(d(rotate_ccw(p, c, turns)), d(p.widen()));
        }
    }

    #[test]
    fn regions_around_origin() {
        let c = Point::new(0, 0);
        let region = |x: i64, y: i64| classify_region(c, Point::new(x, y), 10);
        assert_eq!(region(0, 0), Region::Inside);
        assert_eq!(region(6, 7), Region::Inside);
        // On the circle is not inside.
        assert_eq!(region(6, 8), Region::BoundingSquare);
        assert_eq!(region(10, 10), Region::BoundingSquare);
        assert_eq!(region(10, 11), Region::RightBand);
        assert_eq!(region(11, 10), Region::TopBand);
        assert_eq!(region(11, 11), Region::Outside);
    }

    #[test]
    fn non_positive_radius_never_inside() {
        let c = Point::new(2, 2);
        assert_eq!(
            classify_region(c, c.widen(), 0),
            Region::BoundingSquare,
            "zero radius excludes the center itself"
        );
        assert_ne!(classify_region(c, c.widen(), -5), Region::Inside);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let c = Point::new(i32::MIN, i32::MIN);
        let p = Point::new(i32::MAX, i32::MAX);
        let n = normalize(p, c, classify(p, c));
        assert_eq!(classify_region(c, n, i32::MAX), Region::Outside);
        assert_eq!(classify_region(c, c.widen(), i32::MAX), Region::Inside);
    }

    #[test]
    fn growing_radius_only_moves_inward() {
        let c = Point::new(0, 0);
        for x in 0..30 {
            for y in 0..30 {
                let n = Point::new(x, y);
                let mut prev = classify_region(c, n, 0);
                for r in 1..40 {
                    let next = classify_region(c, n, r);
                    assert!(next <= prev, "({x}, {y}) went from {prev:?} to {next:?} at r={r}");
                    if prev == Region::RightBand {
                        assert_ne!(next, Region::TopBand, "bands are not interchangeable");
                    }
                    if prev == Region::TopBand {
                        assert_ne!(next, Region::RightBand, "bands are not interchangeable");
                    }
                    prev = next;
                }
            }
        }
    }

    #[test]
    fn pruning_masks() {
        use Quadrant::*;
        assert_eq!(pruning_mask(SouthWest, Region::Inside), QuadrantMask::all());
        assert_eq!(
            pruning_mask(NorthEast, Region::BoundingSquare),
            QuadrantMask::SOUTH_EAST | QuadrantMask::SOUTH_WEST | QuadrantMask::NORTH_WEST
        );
        assert_eq!(
            pruning_mask(NorthEast, Region::RightBand),
            QuadrantMask::SOUTH_EAST | QuadrantMask::SOUTH_WEST
        );
        assert_eq!(
            pruning_mask(NorthEast, Region::TopBand),
            QuadrantMask::SOUTH_WEST | QuadrantMask::NORTH_WEST
        );
        assert_eq!(pruning_mask(NorthEast, Region::Outside), QuadrantMask::SOUTH_WEST);

        // Wraparound on the last quadrant.
        assert_eq!(
            pruning_mask(NorthWest, Region::TopBand),
            QuadrantMask::SOUTH_EAST | QuadrantMask::SOUTH_WEST
        );
        assert_eq!(
            pruning_mask(NorthWest, Region::RightBand),
            QuadrantMask::NORTH_EAST | QuadrantMask::SOUTH_EAST
        );
        assert_eq!(pruning_mask(SouthEast, Region::Outside), QuadrantMask::NORTH_WEST);
    }
}
