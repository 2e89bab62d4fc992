// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid clustering algorithm: populate, merge, emit.

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use covey_geom::{Projection, normalize_rect_to_cells};
use covey_kdtree::KdTree;

use crate::annotation::Cluster;
use crate::error::ClusterError;
use crate::grid::{
    ADJACENT_BY_QUADRANT, CONFORMITY, CellSlot, CellState, ClusterGrid, NEIGHBOR_DELTAS,
    quadrant_for_point,
};

/// Decides whether two clusters' rendered footprints intersect.
///
/// This is a capability of the caller: the reference implementation
/// projects each centroid into view space and intersects fixed-size
/// rectangles around them, but any predicate (circular hit regions, label
/// bounds, ...) is equally valid. The merge pass invokes it only for
/// neighbor pairs the quadrant tables could not rule out.
pub trait ClusterIntersects<P> {
    /// Whether the rendered footprints of `a` and `b` intersect.
    fn intersects(&self, a: &Cluster<P>, b: &Cluster<P>) -> bool;
}

/// A closure wrapped as an overlap predicate; see [`overlap_fn`].
#[derive(Copy, Clone, Debug)]
pub struct OverlapFn<F>(F);

impl<P, F: Fn(&Cluster<P>, &Cluster<P>) -> bool> ClusterIntersects<P> for OverlapFn<F> {
    fn intersects(&self, a: &Cluster<P>, b: &Cluster<P>) -> bool {
        (self.0)(a, b)
    }
}

/// Wrap a plain closure as a [`ClusterIntersects`] predicate.
pub fn overlap_fn<P, F>(f: F) -> OverlapFn<F>
where
    F: Fn(&Cluster<P>, &Cluster<P>) -> bool,
{
    OverlapFn(f)
}

/// A viewport clustering strategy.
///
/// [`GridClustering`] is the stock implementation; alternative strategies
/// (hierarchical, density-based, ...) slot in behind this trait.
pub trait ClusteringAlgorithm<P> {
    /// Cluster the annotations of `tree` that fall inside `rect`.
    ///
    /// `cell` is the clustering granularity in map units. Returns the
    /// clusters in a deterministic order for identical inputs.
    fn cluster_in_rect<Pr, O>(
        &self,
        tree: &KdTree<P>,
        rect: Rect,
        cell: Size,
        projection: &Pr,
        overlap: &O,
    ) -> Result<Vec<Cluster<P>>, ClusterError>
    where
        Pr: Projection + ?Sized,
        O: ClusterIntersects<P> + ?Sized;
}

/// Grid-based clustering with quadrant-pruned neighbor merging.
///
/// The pass works in three stages over a cell grid snapped around the
/// query rectangle:
///
/// 1. Every cell is filled by an inclusive tree range query, restricted to
///    half-open cell membership so annotations on shared cell borders land
///    in exactly one cell. Each non-empty cell becomes one cluster.
/// 2. A single row-major sweep merges clusters in adjacent cells whose
///    footprints overlap. The cluster's distribution quadrant selects the
///    only three neighbor cells it could possibly reach, and the
///    conformity table drops neighbors sitting in an unreachable quadrant
///    of their own cell. When two clusters merge, the one whose cell has
///    the lexicographically smaller `(row, col)` survives; the other cell
///    is tombstoned. Survivors are not re-binned, so overlap chains longer
///    than one neighbor hop are resolved on the next refresh.
/// 3. Surviving clusters are emitted in creation order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GridClustering;

impl<P: Copy + Ord> ClusteringAlgorithm<P> for GridClustering {
    fn cluster_in_rect<Pr, O>(
        &self,
        tree: &KdTree<P>,
        rect: Rect,
        cell: Size,
        projection: &Pr,
        overlap: &O,
    ) -> Result<Vec<Cluster<P>>, ClusterError>
    where
        Pr: Projection + ?Sized,
        O: ClusterIntersects<P> + ?Sized,
    {
        if !(cell.width.is_finite() && cell.height.is_finite())
            || cell.width <= 0.0
            || cell.height <= 0.0
        {
            return Err(ClusterError::InvalidCellSize);
        }
        if rect.width() < 0.0 || rect.height() < 0.0 {
            return Err(ClusterError::InvalidRect);
        }
        if tree.is_empty() {
            return Ok(Vec::new());
        }

        let normalized = normalize_rect_to_cells(rect, cell);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "the normalized rect is a small whole number of cells"
        )]
        let (grid_width, grid_height) = (
            (normalized.width() / cell.width).round() as i64,
            (normalized.height() / cell.height).round() as i64,
        );

        #[allow(
            clippy::cast_sign_loss,
            reason = "grid dimensions are nonnegative by construction"
        )]
        let mut grid = ClusterGrid::new(grid_width as usize, grid_height as usize);
        let mut clusters: Vec<Option<Cluster<P>>> = Vec::new();

        self.populate(
            tree,
            normalized,
            cell,
            grid_width,
            grid_height,
            projection,
            &mut grid,
            &mut clusters,
        );
        log::trace!(
            "populated {grid_width}x{grid_height} grid with {} clusters",
            clusters.len()
        );

        self.merge_overlapping(&mut grid, &mut clusters, grid_width, grid_height, overlap);

        #[cfg(debug_assertions)]
        grid.debug_validate_border();

        Ok(clusters.into_iter().flatten().collect())
    }
}

impl GridClustering {
    /// Pass 1: fill each cell from a tree range query and wrap non-empty
    /// cells into clusters.
    fn populate<P, Pr>(
        &self,
        tree: &KdTree<P>,
        normalized: Rect,
        cell: Size,
        grid_width: i64,
        grid_height: i64,
        projection: &Pr,
        grid: &mut ClusterGrid,
        clusters: &mut Vec<Option<Cluster<P>>>,
    ) where
        P: Copy + Ord,
        Pr: Projection + ?Sized,
    {
        for row in 0..grid_height {
            for col in 0..grid_width {
                let cell_rect = Rect::from_origin_size(
                    (
                        normalized.x0 + col as f64 * cell.width,
                        normalized.y0 + row as f64 * cell.height,
                    ),
                    cell,
                );

                let mut members: SmallVec<[(P, covey_geom::GeoCoord); 8]> = SmallVec::new();
                let mut bounds: Option<Rect> = None;
                tree.visit_range(
                    cell_rect.origin(),
                    Point::new(cell_rect.x1, cell_rect.y1),
                    |entry| {
                        let p = entry.point();
                        // Half-open membership: far edges belong to the
                        // next cell over, so border points are counted
                        // exactly once.
                        if p.x >= cell_rect.x1 || p.y >= cell_rect.y1 {
                            return;
                        }
                        members.push((entry.payload(), entry.coord()));
                        bounds = Some(match bounds {
                            Some(b) => b.union_pt(p),
                            None => Rect::new(p.x, p.y, p.x, p.y),
                        });
                    },
                );

                if members.is_empty() {
                    continue;
                }

                let cluster = Cluster::from_members(members.into_vec());
                let centroid_point = projection.project(cluster.coordinate());
                debug_assert!(
                    cell_rect.contains(centroid_point),
                    "a cluster's centroid stays inside its own cell"
                );

                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "cluster counts are bounded by the cell count of one viewport"
                )]
                let cluster_index = clusters.len() as u32;
                clusters.push(Some(cluster));

                *grid.cell_mut(col, row) = CellSlot {
                    state: CellState::HasData,
                    rect: bounds.expect("non-empty cell has bounds"),
                    cluster: cluster_index,
                    quadrant: quadrant_for_point(cell_rect, centroid_point),
                };
            }
        }
    }

    /// Pass 2: one row-major sweep merging overlapping neighbor clusters.
    fn merge_overlapping<P, O>(
        &self,
        grid: &mut ClusterGrid,
        clusters: &mut [Option<Cluster<P>>],
        grid_width: i64,
        grid_height: i64,
        overlap: &O,
    ) where
        P: Copy + Ord,
        O: ClusterIntersects<P> + ?Sized,
    {
        for row in 0..grid_height {
            for col in 0..grid_width {
                let current = grid.cell(col, row);
                if current.state != CellState::HasData {
                    continue;
                }

                for &position in &ADJACENT_BY_QUADRANT[current.quadrant.index()] {
                    let (dcol, drow) = NEIGHBOR_DELTAS[position];
                    let (ncol, nrow) = (col + dcol, row + drow);

                    // The sentinel border guarantees this read is in
                    // bounds even on the outermost cells.
                    let neighbor = grid.cell(ncol, nrow);
                    if neighbor.state != CellState::HasData {
                        continue;
                    }
                    if !CONFORMITY[position].intersects(neighbor.quadrant) {
                        continue;
                    }

                    let current_idx = grid.cell(col, row).cluster as usize;
                    let neighbor_idx = neighbor.cluster as usize;
                    {
                        let a = clusters[current_idx].as_ref().expect("live cell cluster");
                        let b = clusters[neighbor_idx].as_ref().expect("live cell cluster");
                        if !overlap.intersects(a, b) {
                            continue;
                        }
                    }

                    // The cell with the smaller (row, col) survives; this
                    // fixes the winner independent of which side initiated
                    // the merge.
                    if (nrow, ncol) < (row, col) {
                        let absorbed = clusters[current_idx].take().expect("live cell cluster");
                        let absorbed_rect = grid.cell(col, row).rect;
                        clusters[neighbor_idx]
                            .as_mut()
                            .expect("live cell cluster")
                            .absorb(absorbed);

                        let survivor = grid.cell_mut(ncol, nrow);
                        survivor.rect = survivor.rect.union(absorbed_rect);
                        grid.cell_mut(col, row).state = CellState::Merged;

                        // The current cell is gone; move on to the next.
                        break;
                    }

                    let absorbed = clusters[neighbor_idx].take().expect("live cell cluster");
                    let absorbed_rect = neighbor.rect;
                    clusters[current_idx]
                        .as_mut()
                        .expect("live cell cluster")
                        .absorb(absorbed);

                    let survivor = grid.cell_mut(col, row);
                    survivor.rect = survivor.rect.union(absorbed_rect);
                    grid.cell_mut(ncol, nrow).state = CellState::Merged;
                }
            }
        }
    }
}
