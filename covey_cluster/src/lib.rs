// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covey Cluster: viewport clustering of map annotations.
//!
//! Given a [`covey_kdtree::KdTree`] over an annotation set and a viewport
//! rectangle, [`GridClustering`] produces a much smaller set of
//! [`Cluster`] annotations suitable for rendering: the viewport is snapped
//! to a uniform cell grid, each cell is populated by a tree range query,
//! and clusters in adjacent cells whose rendered footprints overlap are
//! merged in a single deterministic sweep.
//!
//! The merge pass inspects at most three of the eight surrounding cells
//! per cluster: a cluster sitting in, say, the north-east quadrant of its
//! cell can only reach clusters in the three north-east-adjacent cells,
//! and among those only ones sitting in a compatible quadrant of *their*
//! cell. The grid carries a one-cell sentinel border so the neighbor reads
//! need no bounds checks.
//!
//! Whether two clusters "overlap" is a capability supplied by the caller
//! through [`ClusterIntersects`] — typically a rectangle test around each
//! rendered annotation, but any predicate works. Alternative clustering
//! strategies can replace the grid entirely behind
//! [`ClusteringAlgorithm`].

mod algorithm;
mod annotation;
mod error;
mod grid;

pub use algorithm::{ClusterIntersects, ClusteringAlgorithm, GridClustering, OverlapFn, overlap_fn};
pub use annotation::Cluster;
pub use error::ClusterError;
