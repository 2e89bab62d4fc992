// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cluster cell grid and the quadrant tables driving neighbor pruning.

use bitflags::bitflags;
use kurbo::{Point, Rect};

bitflags! {
    /// The quadrant of a cell in which a cluster's projected centroid sits,
    /// relative to the cell's geometric center. `y` grows south, so `Q1`
    /// (north-east) means `x >= center.x && y < center.y`.
    ///
    /// ```text
    ///  --------
    /// | Q2  Q1 |
    /// |        |
    /// | Q3  Q4 |
    ///  --------
    /// ```
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct Quadrant: u8 {
        /// North-east.
        const Q1 = 1 << 0;
        /// North-west.
        const Q2 = 1 << 1;
        /// South-west.
        const Q3 = 1 << 2;
        /// South-east.
        const Q4 = 1 << 3;
    }
}

impl Default for Quadrant {
    fn default() -> Self {
        Self::empty()
    }
}

impl Quadrant {
    /// 0..4 for Q1..Q4. Valid only for single-quadrant values.
    #[inline]
    pub(crate) fn index(self) -> usize {
        debug_assert_eq!(self.bits().count_ones(), 1, "index needs a single quadrant");
        self.bits().trailing_zeros() as usize
    }
}

/// Classify a point inside `rect` by the quadrant of the rect it occupies.
/// Points on the center lines go east/south, matching the `>=` splits of
/// the range search.
#[inline]
pub(crate) fn quadrant_for_point(rect: Rect, point: Point) -> Quadrant {
    let center = rect.center();
    if point.x >= center.x {
        if point.y >= center.y { Quadrant::Q4 } else { Quadrant::Q1 }
    } else if point.y >= center.y {
        Quadrant::Q3
    } else {
        Quadrant::Q2
    }
}

/// `(dcol, drow)` offsets of the eight neighbor positions, indexed
/// counterclockwise from east: E, NE, N, NW, W, SW, S, SE.
pub(crate) const NEIGHBOR_DELTAS: [(i64, i64); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// For each neighbor position, the quadrants of *that* cell from which a
/// cluster could possibly reach the current cell. A neighbor in any other
/// quadrant is provably out of range (clusters sit inside their own cells
/// and cells are uniform), so it is skipped without invoking the overlap
/// predicate.
pub(crate) const CONFORMITY: [Quadrant; 8] = [
    Quadrant::Q2.union(Quadrant::Q3), // E
    Quadrant::Q3,                     // NE
    Quadrant::Q3.union(Quadrant::Q4), // N
    Quadrant::Q4,                     // NW
    Quadrant::Q1.union(Quadrant::Q4), // W
    Quadrant::Q1,                     // SW
    Quadrant::Q1.union(Quadrant::Q2), // S
    Quadrant::Q2,                     // SE
];

/// The three neighbor positions worth inspecting for a cluster in each
/// quadrant of its own cell, indexed by [`Quadrant::index`]. A cluster in
/// the north-east quadrant can only overlap the east, north-east, and
/// north neighbors, and so on around the compass.
pub(crate) const ADJACENT_BY_QUADRANT: [[usize; 3]; 4] = [
    [0, 1, 2], // Q1: E, NE, N
    [2, 3, 4], // Q2: N, NW, W
    [4, 5, 6], // Q3: W, SW, S
    [6, 7, 0], // Q4: S, SE, E
];

/// Lifecycle of a grid cell: populated in pass 1, possibly absorbed in
/// pass 2, never revived.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum CellState {
    /// No annotations landed in this cell (or it is part of the border).
    #[default]
    Empty,
    /// The cell holds a live cluster.
    HasData,
    /// The cell's cluster was absorbed by a neighbor. Terminal.
    Merged,
}

/// One grid cell.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct CellSlot {
    pub(crate) state: CellState,
    /// Bounding rect of the cluster's member points, in the map plane.
    pub(crate) rect: Rect,
    /// Index into the pass-local cluster list.
    pub(crate) cluster: u32,
    pub(crate) quadrant: Quadrant,
}

/// A dense `width x height` grid of cluster slots, allocated as
/// `(width + 2) x (height + 2)` with the outer ring permanently [`Empty`].
/// The border lets the merge pass read all neighbor offsets `±1`
/// unconditionally; it is the hot loop, and this keeps it branch-light.
///
/// [`Empty`]: CellState::Empty
pub(crate) struct ClusterGrid {
    width: usize,
    height: usize,
    slots: Vec<CellSlot>,
}

impl ClusterGrid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![CellSlot::default(); (width + 2) * (height + 2)],
        }
    }

    #[inline(always)]
    #[allow(
        clippy::cast_sign_loss,
        reason = "the +1 border shift makes both components nonnegative"
    )]
    fn index(&self, col: i64, row: i64) -> usize {
        debug_assert!(
            (-1..=self.width as i64).contains(&col) && (-1..=self.height as i64).contains(&row),
            "cell position out of the bordered grid"
        );
        (row + 1) as usize * (self.width + 2) + (col + 1) as usize
    }

    /// Read a cell, border included. `col`/`row` may be `-1` or
    /// `width`/`height`.
    #[inline(always)]
    pub(crate) fn cell(&self, col: i64, row: i64) -> CellSlot {
        self.slots[self.index(col, row)]
    }

    /// Mutable access to an interior cell.
    #[inline(always)]
    pub(crate) fn cell_mut(&mut self, col: i64, row: i64) -> &mut CellSlot {
        debug_assert!(
            (0..self.width as i64).contains(&col) && (0..self.height as i64).contains(&row),
            "only interior cells may be written"
        );
        let idx = self.index(col, row);
        &mut self.slots[idx]
    }

    /// Assert the sentinel ring is still untouched. Cheap enough to run
    /// after every merge pass under `debug_assertions`.
    pub(crate) fn debug_validate_border(&self) {
        for col in -1..=self.width as i64 {
            assert_eq!(self.cell(col, -1).state, CellState::Empty, "top border written");
            assert_eq!(
                self.cell(col, self.height as i64).state,
                CellState::Empty,
                "bottom border written"
            );
        }
        for row in -1..=self.height as i64 {
            assert_eq!(self.cell(-1, row).state, CellState::Empty, "left border written");
            assert_eq!(
                self.cell(self.width as i64, row).state,
                CellState::Empty,
                "right border written"
            );
        }
    }
}

impl core::fmt::Debug for ClusterGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let populated = self
            .slots
            .iter()
            .filter(|s| s.state == CellState::HasData)
            .count();
        f.debug_struct("ClusterGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("populated", &populated)
            .finish_non_exhaustive()
    }
}
