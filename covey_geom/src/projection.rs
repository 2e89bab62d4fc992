// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projections between geographic coordinates and the map plane.

use kurbo::{Point, Rect};

use crate::GeoCoord;

/// A pure mapping between geographic coordinates and the planar map space.
///
/// Implementations must be deterministic: the clustering engine projects
/// each annotation exactly once at tree-build time and assumes the result
/// never changes. `y` grows south in the plane.
pub trait Projection {
    /// Project a geographic coordinate into the map plane.
    fn project(&self, coord: GeoCoord) -> Point;

    /// Map a planar point back to a geographic coordinate.
    fn unproject(&self, point: Point) -> GeoCoord;

    /// The finite rectangle the whole projected world occupies.
    fn world_rect(&self) -> Rect;
}

/// Spherical Web-Mercator projection onto a square world.
///
/// The world spans `2^28 x 2^28` map units (the resolution used by Apple's
/// MapKit map points), with `(0, 0)` at the north-west corner and latitude
/// clamped to the usual ±85.051128779° Mercator limit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WebMercator;

/// Side length of the projected world, in map units.
const WORLD_SIZE: f64 = 268_435_456.0;

/// Mercator latitude limit, in degrees.
const MAX_LATITUDE: f64 = 85.051_128_779;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

impl Projection for WebMercator {
    fn project(&self, coord: GeoCoord) -> Point {
        let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = (coord.lon + 180.0) / 360.0 * WORLD_SIZE;

        let s = (lat * DEG_TO_RAD).sin();
        let y = (0.5 - ((1.0 + s) / (1.0 - s)).ln() / (4.0 * core::f64::consts::PI)) * WORLD_SIZE;

        Point::new(x, y)
    }

    fn unproject(&self, point: Point) -> GeoCoord {
        let lon = point.x / WORLD_SIZE * 360.0 - 180.0;

        let n = core::f64::consts::PI * (1.0 - 2.0 * point.y / WORLD_SIZE);
        let lat = n.sinh().atan() * RAD_TO_DEG;

        GeoCoord::new(lat, lon)
    }

    fn world_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, WORLD_SIZE, WORLD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_world_center() {
        let p = WebMercator.project(GeoCoord::new(0.0, 0.0));
        assert!((p.x - WORLD_SIZE / 2.0).abs() < 1e-6);
        assert!((p.y - WORLD_SIZE / 2.0).abs() < 1e-6);
    }

    #[test]
    fn north_is_up_in_map_plane() {
        // y grows south: a northern latitude lands above (smaller y than)
        // the equator.
        let north = WebMercator.project(GeoCoord::new(40.0, 0.0));
        let equator = WebMercator.project(GeoCoord::new(0.0, 0.0));
        assert!(north.y < equator.y);
    }

    #[test]
    fn roundtrip_within_tolerance() {
        let coords = [
            GeoCoord::new(0.0, 0.0),
            GeoCoord::new(40.77, -73.98),
            GeoCoord::new(37.85, -122.68),
            GeoCoord::new(-33.86, 151.21),
            GeoCoord::new(78.22, 15.65),
        ];
        for c in coords {
            let back = WebMercator.unproject(WebMercator.project(c));
            assert!((back.lat - c.lat).abs() < 1e-9, "lat for {c:?}: {back:?}");
            assert!((back.lon - c.lon).abs() < 1e-9, "lon for {c:?}: {back:?}");
        }
    }

    #[test]
    fn latitude_is_clamped() {
        let pole = WebMercator.project(GeoCoord::new(90.0, 0.0));
        let limit = WebMercator.project(GeoCoord::new(MAX_LATITUDE, 0.0));
        assert_eq!(pole, limit);
        assert!(pole.y.abs() < 1.0);
    }

    #[test]
    fn world_rect_contains_all_projections() {
        let world = WebMercator.world_rect();
        for lat in [-80.0, -45.0, 0.0, 45.0, 80.0] {
            for lon in [-179.9, -90.0, 0.0, 90.0, 179.9] {
                let p = WebMercator.project(GeoCoord::new(lat, lon));
                assert!(world.contains(p), "({lat}, {lon}) -> {p:?}");
            }
        }
    }
}
