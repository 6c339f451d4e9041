// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a small city map and list the cities near a few query points.

use understory_quadtree::{ChildRouting, Point, QuadTree};

fn main() {
    let cities = [
        (Point::new(100, 100), "Chicago"),
        (Point::new(25, 125), "Mobile"),
        (Point::new(50, 120), "Toronto"),
        (Point::new(80, 65), "Buffalo"),
        (Point::new(5, 45), "Denver"),
        (Point::new(60, 75), "Omaha"),
        (Point::new(85, 15), "Atlanta"),
        (Point::new(90, 5), "Miami"),
    ];

    let tree: QuadTree<&str> = cities.into_iter().collect();
    println!("{tree:?}");
    println!("pre-order dump:\n{tree}");

    for (center, radius) in [
        (Point::new(83, 10), 8),
        (Point::new(60, 80), 25),
        (Point::new(0, 0), 1),
    ] {
        let mut hits: Vec<_> = tree.search_area(center, radius).into_iter().collect();
        hits.sort();
        println!("within {radius} of ({}, {}): {hits:?}", center.x, center.y);
    }

    // The compatibility layout files north-west points under the south-west
    // child, where a pruned search no longer reaches them.
    let center = Point::new(0, 0);
    let points = [(Point::new(2, -10), "Quito"), (Point::new(0, 0), "Lima")];
    let independent: QuadTree<&str> = points.into_iter().collect();
    let mut legacy = QuadTree::with_routing(ChildRouting::NorthWestIntoSouthWest);
    legacy.extend(points);
    println!(
        "within 5 of (0, 0): independent layout {:?}, legacy layout {:?}",
        independent.search_area(center, 5),
        legacy.search_area(center, 5)
    );
}
