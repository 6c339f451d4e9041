// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node arena, insertion, lookup, and range search.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::geometry::{classify, classify_region, normalize, pruning_mask};
use crate::types::{Point, Quadrant, Region};

/// Traversal stack; spills to the heap only for unusually deep trees.
type Stack = SmallVec<[usize; 32]>;

/// Counters for one area search.
#[cfg_attr(
    not(feature = "tracing"),
    allow(dead_code, reason = "Only read by the search trace event.")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct AreaStats {
    /// Nodes popped from the traversal stack.
    visited: usize,
    /// Nodes reported to the visitor.
    matched: usize,
}

/// Where a new node attaches: parent index, parent slot, and the new node's depth.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Attachment {
    parent: usize,
    slot: Quadrant,
    depth: usize,
}

/// How insertion (and exact lookup) maps a point's quadrant onto a child slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChildRouting {
    /// Every quadrant has its own child slot.
    #[default]
    Independent,
    /// Points classified [`Quadrant::NorthWest`] are stored in the south-west
    /// slot, leaving the north-west slot permanently empty.
    ///
    /// Kept for compatibility with an older layout. Range search still prunes
    /// with the full four-quadrant mask, so it can miss north-west points that
    /// were filed under a pruned south-west child.
    NorthWestIntoSouthWest,
}

impl ChildRouting {
    /// The child slot a point in `quadrant` descends into.
    #[inline]
    pub fn slot(self, quadrant: Quadrant) -> Quadrant {
        match (self, quadrant) {
            (Self::NorthWestIntoSouthWest, Quadrant::NorthWest) => Quadrant::SouthWest,
            (_, q) => q,
        }
    }
}

#[derive(Clone, Debug)]
struct Node<D> {
    point: Point,
    data: D,
    /// Arena indices, indexed by [`Quadrant::index`].
    children: [Option<usize>; 4],
}

impl<D> Node<D> {
    fn new(point: Point, data: D) -> Self {
        Self {
            point,
            data,
            children: [None; 4],
        }
    }
}

/// A point quadtree mapping integer coordinates to payloads.
///
/// Nodes live in a flat arena; the root is the first inserted point. The tree
/// never rebalances and never shrinks, so its shape depends on insertion order.
/// Traversals use an explicit stack, so degenerate (list-shaped) trees do not
/// risk exhausting the call stack.
///
/// ## Example
///
/// ```rust
/// use understory_quadtree::{Point, QuadTree};
///
/// let mut tree = QuadTree::new();
/// tree.insert_xy(0, 0, "A");
/// tree.insert_xy(5, 5, "B");
/// tree.insert(Point::new(-5, -5), "C");
///
/// let near = tree.search_area(Point::new(0, 0), 1);
/// assert_eq!(near.len(), 1);
/// assert_eq!(near[&Point::new(0, 0)], &"A");
///
/// let all = tree.search_area(Point::new(0, 0), 8);
/// assert_eq!(all.len(), 3);
/// ```
#[derive(Clone)]
pub struct QuadTree<D> {
    nodes: Vec<Node<D>>,
    routing: ChildRouting,
}

impl<D> fmt::Debug for QuadTree<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("len", &self.nodes.len())
            .field("routing", &self.routing)
            .finish_non_exhaustive()
    }
}

impl<D> Default for QuadTree<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> QuadTree<D> {
    /// Create an empty tree with [`ChildRouting::Independent`].
    pub fn new() -> Self {
        Self::with_routing(ChildRouting::default())
    }

    /// Create an empty tree with an explicit child routing policy.
    pub fn with_routing(routing: ChildRouting) -> Self {
        Self {
            nodes: Vec::new(),
            routing,
        }
    }

    /// The routing policy used by [`insert`][Self::insert] and [`get`][Self::get].
    pub fn routing(&self) -> ChildRouting {
        self.routing
    }

    /// Number of stored points, duplicates included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a point with its payload.
    ///
    /// Always adds exactly one node. A point equal to an existing one is stored
    /// as a separate node in that node's north-east subtree.
    pub fn insert(&mut self, point: Point, data: D) {
        let idx = self.nodes.len();
        let depth = match self.vacant_slot(point) {
            Some(at) => {
                self.nodes[at.parent].children[at.slot.index()] = Some(idx);
                at.depth
            }
            None => 0,
        };
        self.nodes.push(Node::new(point, data));
        #[cfg(feature = "tracing")]
        tracing::trace!(x = point.x, y = point.y, depth, "quadtree insert");
        #[cfg(not(feature = "tracing"))]
        let _ = depth;
    }

    /// Insert a point given by its coordinates.
    #[inline]
    pub fn insert_xy(&mut self, x: i32, y: i32, data: D) {
        self.insert(Point::new(x, y), data);
    }

    /// Payload of the first node on `point`'s routing path stored at `point`.
    pub fn get(&self, point: Point) -> Option<&D> {
        self.find(point).map(|i| &self.nodes[i].data)
    }

    /// Mutable variant of [`get`][Self::get].
    pub fn get_mut(&mut self, point: Point) -> Option<&mut D> {
        let i = self.find(point)?;
        Some(&mut self.nodes[i].data)
    }

    /// Whether some node is stored at exactly `point`.
    pub fn contains(&self, point: Point) -> bool {
        self.find(point).is_some()
    }

    /// Collect every point strictly within `radius` of `center`.
    ///
    /// When several nodes share a coordinate, the one visited last in pre-order
    /// wins. A non-positive radius matches nothing.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "quadtree::search_area", fields(radius = radius))
    )]
    pub fn search_area(&self, center: Point, radius: i32) -> HashMap<Point, &D> {
        let mut found = HashMap::new();
        self.visit_area(center, radius, |p, d| {
            found.insert(p, d);
        });
        found
    }

    /// Visit every node strictly within `radius` of `center` (does not allocate result storage).
    ///
    /// Calls `f(point, payload)` once per matching node, duplicates included, in
    /// pre-order. Children are pruned per node using the rotation-normalized
    /// region of that node relative to `center`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "quadtree::visit_area", fields(radius = radius))
    )]
    pub fn visit_area<'a, F: FnMut(Point, &'a D)>(&'a self, center: Point, radius: i32, f: F) {
        let stats = self.walk_area(center, radius, f);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            visited = stats.visited,
            matched = stats.matched,
            "quadtree area search"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = stats;
    }

    fn walk_area<'a, F: FnMut(Point, &'a D)>(
        &'a self,
        center: Point,
        radius: i32,
        mut f: F,
    ) -> AreaStats {
        let mut stats = AreaStats::default();
        let mut stack = self.root_stack();
        while let Some(i) = stack.pop() {
            stats.visited += 1;
            let node = &self.nodes[i];
            let quadrant = classify(node.point, center);
            let region = classify_region(center, normalize(node.point, center, quadrant), radius);
            if region == Region::Inside {
                stats.matched += 1;
                f(node.point, &node.data);
            }
            let mask = pruning_mask(quadrant, region);
            // Pushed in reverse so the north-east child is popped first.
            for q in Quadrant::ALL.into_iter().rev() {
                if mask.includes(q)
                    && let Some(child) = node.children[q.index()]
                {
                    stack.push(child);
                }
            }
        }
        stats
    }

    /// Pre-order iterator over `(point, payload)`: node, then NE, SE, SW, NW subtrees.
    pub fn iter(&self) -> Iter<'_, D> {
        Iter {
            tree: self,
            stack: self.root_stack(),
        }
    }

    fn root_stack(&self) -> Stack {
        let mut stack = Stack::new();
        if !self.nodes.is_empty() {
            stack.push(0);
        }
        stack
    }

    /// Where a new node at `point` attaches, or `None` for an empty tree.
    fn vacant_slot(&self, point: Point) -> Option<Attachment> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut cur = 0;
        let mut depth = 1;
        loop {
            let node = &self.nodes[cur];
            let slot = self.routing.slot(classify(point, node.point));
            match node.children[slot.index()] {
                Some(next) => {
                    cur = next;
                    depth += 1;
                }
                None => {
                    return Some(Attachment {
                        parent: cur,
                        slot,
                        depth,
                    });
                }
            }
        }
    }

    fn find(&self, point: Point) -> Option<usize> {
        let mut cur = if self.nodes.is_empty() { None } else { Some(0) };
        while let Some(i) = cur {
            let node = &self.nodes[i];
            if node.point == point {
                return Some(i);
            }
            cur = node.children[self.routing.slot(classify(point, node.point)).index()];
        }
        None
    }
}

/// Pre-order iterator returned by [`QuadTree::iter`].
#[derive(Debug)]
pub struct Iter<'a, D> {
    tree: &'a QuadTree<D>,
    stack: Stack,
}

impl<'a, D> Iterator for Iter<'a, D> {
    type Item = (Point, &'a D);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.tree.nodes[self.stack.pop()?];
        self.stack
            .extend(node.children.iter().rev().filter_map(|c| *c));
        Some((node.point, &node.data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.tree.nodes.len()))
    }
}

impl<'a, D> IntoIterator for &'a QuadTree<D> {
    type Item = (Point, &'a D);
    type IntoIter = Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<D> Extend<(Point, D)> for QuadTree<D> {
    fn extend<I: IntoIterator<Item = (Point, D)>>(&mut self, iter: I) {
        for (point, data) in iter {
            self.insert(point, data);
        }
    }
}

impl<D> FromIterator<(Point, D)> for QuadTree<D> {
    fn from_iter<I: IntoIterator<Item = (Point, D)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Diagnostic dump: one payload per line, in pre-order.
impl<D: fmt::Display> fmt::Display for QuadTree<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, data) in self {
            writeln!(f, "{data}")?;
        }
        Ok(())
    }
}
