// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a point quadtree over integer coordinates.
//!
//! Understory Quadtree is a small building block for coarse spatial lookup such as
//! "everything within `r` of this point".
//!
//! - Insert points with user payloads; duplicates are kept as separate nodes.
//! - Query a circular area with [`QuadTree::search_area`] (collects a map) or
//!   [`QuadTree::visit_area`] (calls back, no result allocation).
//! - Look up an exact coordinate with [`QuadTree::get`].
//!
//! The tree never rebalances and has no removal. Its shape is a function of
//! insertion order, and all traversals use an explicit stack.
//!
//! ## How range search prunes
//!
//! At every node the search works out which quadrant the node occupies relative
//! to the search center, rotates the node by quarter turns into the north-east
//! quadrant ([`geometry::normalize`]), and places it in one of five [`Region`]s
//! around the search circle ([`geometry::classify_region`]). The region and the
//! original quadrant then decide which of the node's four children can still hold
//! a match ([`geometry::pruning_mask`]). One geometric test thus serves all four
//! quadrants.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Point, QuadTree};
//!
//! let mut tree = QuadTree::new();
//! tree.insert_xy(0, 0, "A");
//! tree.insert_xy(5, 5, "B");
//! tree.insert_xy(-5, -5, "C");
//! tree.insert_xy(5, -5, "D");
//!
//! // Only the center itself lies strictly within radius 1.
//! let hits = tree.search_area(Point::new(0, 0), 1);
//! assert_eq!(hits.len(), 1);
//!
//! // All four lie within radius 8 (the corners are ~7.07 away).
//! let hits = tree.search_area(Point::new(0, 0), 8);
//! assert_eq!(hits.len(), 4);
//! assert_eq!(hits[&Point::new(5, -5)], &"D");
//! ```
//!
//! ## Child routing
//!
//! [`ChildRouting::Independent`] (the default) gives every quadrant its own child
//! slot. [`ChildRouting::NorthWestIntoSouthWest`] files north-west points under
//! the south-west child instead, matching an older layout; range search on such a
//! tree can miss points, so it exists for compatibility and comparison only.
//!
//! ## Features
//!
//! - `tracing`: emits spans for range searches, an event per search with the
//!   number of nodes visited and matched, and an event per insertion with the
//!   depth reached, through the `tracing` crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geometry;
mod tree;
mod types;

pub use tree::{ChildRouting, Iter, QuadTree};
pub use types::{Point, Quadrant, QuadrantMask, Region};
