// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host map view contract and the default overlap predicate.

use core::marker::PhantomData;

use kurbo::{Point, Rect, Size, Vec2};

use covey_cluster::{Cluster, ClusterIntersects};
use covey_geom::GeoCoord;

use crate::config::AnimationOptions;

/// The host map view the controller annotates.
///
/// All geometry flows one way: the view reports its viewport in map-plane
/// units and converts geographic coordinates into view space; the
/// controller hands back finished cluster lists. The animate callback is
/// optional and may complete synchronously or kick off a host-side
/// animation; the controller treats it as opaque.
pub trait MapView<P> {
    /// Whether the view is on screen. Invisible views skip un-forced
    /// refreshes.
    fn is_visible(&self) -> bool {
        true
    }

    /// The currently visible rectangle, in map-plane units.
    fn visible_map_rect(&self) -> Rect;

    /// The view's own size, in view points.
    fn view_size(&self) -> Size;

    /// The current zoom level.
    fn zoom_level(&self) -> f64;

    /// Convert a geographic coordinate to a point in view space.
    fn view_point_for_coordinate(&self, coord: GeoCoord) -> Point;

    /// Show the given cluster annotations.
    fn add_annotations(&mut self, clusters: &[Cluster<P>]);

    /// Hide the given cluster annotations.
    fn remove_annotations(&mut self, clusters: &[Cluster<P>]);

    /// Animate `annotation` from the position of `from` to the position of
    /// `to`. Default: no animation.
    fn animate_annotation(
        &mut self,
        _annotation: &Cluster<P>,
        _from: &Cluster<P>,
        _to: &Cluster<P>,
        _duration: f64,
        _options: AnimationOptions,
    ) {
    }
}

/// The reference overlap predicate: fixed-size rectangles in view space.
///
/// Each cluster's footprint is a rectangle of the configured annotation
/// size centered on its view-space point (plus the configured offset); two
/// clusters overlap when the rectangles intersect, edges included. Hosts
/// with non-rectangular hit regions implement [`ClusterIntersects`]
/// themselves and drive the clustering algorithm with that instead.
#[derive(Debug)]
pub struct RectFootprintOverlap<'a, P, V: ?Sized> {
    view: &'a V,
    size: Size,
    offset: Vec2,
    _payload: PhantomData<fn() -> P>,
}

impl<'a, P, V: MapView<P> + ?Sized> RectFootprintOverlap<'a, P, V> {
    /// Build the predicate for one clustering pass over `view`.
    pub fn new(view: &'a V, size: Size, offset: Vec2) -> Self {
        Self {
            view,
            size,
            offset,
            _payload: PhantomData,
        }
    }

    fn footprint(&self, cluster: &Cluster<P>) -> Rect
    where
        P: Copy,
    {
        let center = self.view.view_point_for_coordinate(cluster.coordinate()) + self.offset;
        Rect::from_center_size(center, self.size)
    }
}

impl<P: Copy, V: MapView<P> + ?Sized> ClusterIntersects<P> for RectFootprintOverlap<'_, P, V> {
    fn intersects(&self, a: &Cluster<P>, b: &Cluster<P>) -> bool {
        let ra = self.footprint(a);
        let rb = self.footprint(b);
        ra.x0 <= rb.x1 && ra.x1 >= rb.x0 && ra.y0 <= rb.y1 && ra.y1 >= rb.y0
    }
}
