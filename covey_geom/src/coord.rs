// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic coordinates and distances.

/// Mean Earth radius used for distance computation, in meters.
const EARTH_RADIUS_M: f64 = 6_372_797.560856;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;

/// A geographic coordinate in degrees.
///
/// Latitude grows north, longitude grows east. No wrapping or clamping is
/// performed here; projections decide how to treat out-of-range values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GeoCoord {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl GeoCoord {
    /// Create a coordinate from latitude and longitude in degrees.
    #[inline(always)]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Approximate great-circle distance between two coordinates, in meters.
///
/// Uses the equirectangular approximation
/// `d = R * sqrt(dtheta^2 + cos^2(mean_lat) * dlambda^2)`, which trades
/// strict geodesic accuracy for speed. The error stays below 0.5% for
/// distances under roughly 1000 km, which is ample for comparing cluster
/// radii on screen.
#[inline]
pub fn haversine_meters(a: GeoCoord, b: GeoCoord) -> f64 {
    let d_lat = (b.lat - a.lat) * DEG_TO_RAD;
    let d_lon = (b.lon - a.lon) * DEG_TO_RAD;
    let mean_lat = (a.lat + b.lat) * 0.5 * DEG_TO_RAD;
    let cos_mean = mean_lat.cos();

    EARTH_RADIUS_M * (d_lat * d_lat + cos_mean * cos_mean * d_lon * d_lon).sqrt()
}
