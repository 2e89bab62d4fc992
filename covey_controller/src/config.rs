// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use bitflags::bitflags;
use kurbo::{Size, Vec2};

bitflags! {
    /// How a [`refresh`] should behave.
    ///
    /// [`refresh`]: crate::ClusteringController::refresh
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct RefreshFlags: u8 {
        /// Emit animation events for annotations folding into survivors.
        const ANIMATED = 1 << 0;
        /// Skip the visibility and zoom-hysteresis short-circuits.
        const FORCE = 1 << 1;
    }
}

bitflags! {
    /// Animation options carried opaquely to the host's animate callback.
    ///
    /// The controller never interprets these; they exist so hosts can
    /// thread their own animation-curve choices through the configuration.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct AnimationOptions: u32 {
        /// Ease in and out.
        const CURVE_EASE_IN_OUT = 1 << 0;
        /// Ease in.
        const CURVE_EASE_IN = 1 << 1;
        /// Ease out.
        const CURVE_EASE_OUT = 1 << 2;
        /// Constant speed.
        const CURVE_LINEAR = 1 << 3;
    }
}

/// Tunables for clustering and reconciliation.
///
/// Sizes and offsets are in view space (points), not map units; the
/// controller rescales them against the current viewport every refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Clustering granularity: the on-screen size of one grid cell.
    /// Smaller cells mean denser, more numerous clusters.
    pub grid_cell_size: Size,
    /// On-screen footprint of one rendered annotation, used by the default
    /// overlap predicate.
    pub annotation_size: Size,
    /// Offset from an annotation's view point to its footprint center.
    pub annotation_center_offset: Vec2,
    /// Duration handed to the host's animate callback, in seconds.
    pub animation_duration: f64,
    /// Options handed to the host's animate callback, uninterpreted.
    pub animation_options: AnimationOptions,
    /// When false, refreshes place every in-viewport annotation as its own
    /// unmerged singleton cluster.
    pub clustering_enabled: bool,
    /// Minimum zoom-level change for an un-forced refresh to recompute.
    pub minimal_zoom_change: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // One cell is about twice the annotation footprint.
            grid_cell_size: Size::new(60.0, 60.0),
            annotation_size: Size::new(30.0, 30.0),
            annotation_center_offset: Vec2::ZERO,
            animation_duration: 0.5,
            animation_options: AnimationOptions::CURVE_EASE_IN_OUT,
            clustering_enabled: true,
            minimal_zoom_change: 0.3,
        }
    }
}
