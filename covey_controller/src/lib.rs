// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covey Controller: drives viewport clustering against a host map view.
//!
//! [`ClusteringController`] owns the k-d tree over the full annotation set
//! and, on every [`refresh`], asks a clustering algorithm for the clusters
//! appropriate to the current viewport, then reconciles them against what
//! the view already shows: unchanged clusters are left alone, new ones are
//! added, stale ones are removed, and removals that fold into a surviving
//! cluster get a will/did animation event pair around the update.
//!
//! The host supplies two capabilities:
//!
//! - [`MapView`], the view being annotated: viewport rectangle, zoom, the
//!   map-plane-to-view transform, and the add/remove/animate operations.
//! - [`ControllerDelegate`], optional policy hooks (all defaulted): whether
//!   to cluster at all, per-cluster display configuration, and animation
//!   lifecycle notifications. `()` is the no-op delegate.
//!
//! A refresh takes `&mut self`, so overlapping refreshes on one controller
//! are rejected by the borrow checker rather than at runtime. Within one
//! refresh, cell iteration order is part of the clustering contract, so two
//! refreshes over identical state produce identical visible sets.
//!
//! [`refresh`]: ClusteringController::refresh

mod config;
mod controller;
mod delegate;
mod error;
mod view;

pub use config::{AnimationOptions, Config, RefreshFlags};
pub use controller::{ClusteringController, RefreshOutcome};
pub use delegate::ControllerDelegate;
pub use error::ControllerError;
pub use view::{MapView, RectFootprintOverlap};

// The building blocks hosts need alongside the controller.
pub use covey_cluster::{
    Cluster, ClusterError, ClusterIntersects, ClusteringAlgorithm, GridClustering, OverlapFn,
    overlap_fn,
};
pub use covey_geom::{GeoCoord, Projection, WebMercator};
pub use covey_kdtree::KdTree;
