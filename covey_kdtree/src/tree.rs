// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree structure, range search, and membership access.

use core::cell::RefCell;
use core::fmt::Debug;
use core::num::NonZeroU32;

use kurbo::Point;

use covey_geom::{Axis, GeoCoord, Projection, axis_value};

/// One stored annotation: its payload identity plus both coordinate forms.
///
/// The planar point is computed once at build time from the geographic
/// coordinate, so queries never re-project.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KdEntry<P> {
    pub(crate) payload: P,
    pub(crate) point: Point,
    pub(crate) coord: GeoCoord,
}

impl<P: Copy> KdEntry<P> {
    /// The host-supplied identity of this annotation.
    #[inline(always)]
    pub fn payload(&self) -> P {
        self.payload
    }

    /// The projected planar point.
    #[inline(always)]
    pub fn point(&self) -> Point {
        self.point
    }

    /// The original geographic coordinate.
    #[inline(always)]
    pub fn coord(&self) -> GeoCoord {
        self.coord
    }
}

/// Arena node. Node 0 is always the root, so a child link can never be 0
/// and `Option<NonZeroU32>` stays a single word.
pub(crate) struct Node<P> {
    pub(crate) entry: KdEntry<P>,
    pub(crate) left: Option<NonZeroU32>,
    pub(crate) right: Option<NonZeroU32>,
}

/// A static 2-D k-d tree over projected annotation points.
///
/// Built once with [`KdTree::build`]; immutable afterwards. The splitting
/// axis alternates by depth (`x` on even levels), and for every node with
/// split value `v` the left subtree holds only strictly smaller values on
/// that axis while the right subtree holds values `>= v`.
pub struct KdTree<P> {
    pub(crate) nodes: Vec<Node<P>>,
    /// Reusable query stack; see the crate docs on thread safety.
    search_stack: RefCell<Vec<(u32, Axis)>>,
}

impl<P> Debug for KdTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl<P> Default for KdTree<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P> KdTree<P> {
    /// A valid tree with no members; every search returns nothing.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            search_stack: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn from_nodes(nodes: Vec<Node<P>>) -> Self {
        let capacity = nodes.len();
        Self {
            nodes,
            search_stack: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of stored annotations.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no annotations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every stored entry, in arena (depth-first) order.
    pub fn members(&self) -> impl Iterator<Item = &KdEntry<P>> {
        self.nodes.iter().map(|n| &n.entry)
    }
}

impl<P: Copy + PartialEq> KdTree<P> {
    /// Build a tree from `(payload, coordinate)` pairs.
    ///
    /// Coordinates are projected exactly once through `projection`.
    /// Duplicate coordinates are permitted; payloads are identities and
    /// must be pairwise distinct. An empty input yields an empty tree.
    pub fn build<I, Pr>(items: I, projection: &Pr) -> Self
    where
        I: IntoIterator<Item = (P, GeoCoord)>,
        Pr: Projection + ?Sized,
    {
        crate::build::build(items, projection)
    }

    /// Visit every entry whose point lies in the inclusive rectangle
    /// `[min.x, max.x] x [min.y, max.y]`.
    ///
    /// Visit order is unspecified but deterministic for a fixed tree and
    /// query. The callback must not start another search on this tree.
    pub fn visit_range<F: FnMut(&KdEntry<P>)>(&self, min: Point, max: Point, mut f: F) {
        if self.nodes.is_empty() {
            return;
        }

        let mut stack = self.search_stack.borrow_mut();
        stack.clear();
        stack.push((0, Axis::X));

        while let Some((idx, axis)) = stack.pop() {
            let node = &self.nodes[idx as usize];
            let p = node.entry.point;

            if min.x <= p.x && min.y <= p.y && p.x <= max.x && p.y <= max.y {
                f(&node.entry);
            }

            let value = axis_value(p, axis);
            let complement = axis.complement();

            if axis_value(max, axis) < value {
                // The whole query lies strictly left of the split.
                if let Some(left) = node.left {
                    stack.push((left.get(), complement));
                }
            } else if axis_value(min, axis) >= value {
                // The whole query lies at or right of the split.
                if let Some(right) = node.right {
                    stack.push((right.get(), complement));
                }
            } else {
                if let Some(right) = node.right {
                    stack.push((right.get(), complement));
                }
                if let Some(left) = node.left {
                    stack.push((left.get(), complement));
                }
            }
        }
    }

    /// Collect every entry whose point lies in the inclusive rectangle.
    pub fn search_range(&self, min: Point, max: Point) -> Vec<KdEntry<P>> {
        let mut out = Vec::new();
        self.visit_range(min, max, |e| out.push(*e));
        out
    }
}
