// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared dataset generation for the Covey benchmarks.
//!
//! Benchmarks default to deterministic synthetic data so results are
//! comparable across runs and machines; see the individual benches for an
//! environment variable that substitutes a real dataset.

use covey_geom::GeoCoord;

/// Deterministic pseudo-random doubles in `[0, 1)` (64-bit LCG).
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
    /// A generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// The next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 11) as f64) / ((1_u64 << 53) as f64)
    }
}

/// `count` annotations split between jittered clumps around New York and
/// San Francisco, the classic two-city clustering workload.
pub fn two_city_mixture(count: usize, seed: u64) -> Vec<(u32, GeoCoord)> {
    let ny = GeoCoord::new(40.77, -73.98);
    let sf = GeoCoord::new(37.85, -122.68);
    let mut rng = Lcg::new(seed);

    (0..count)
        .map(|i| {
            let base = if i % 2 == 0 { ny } else { sf };
            let lat = base.lat + rng.next_f64() * 0.1;
            let lon = base.lon + rng.next_f64() * 0.1;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "bench dataset sizes fit in u32"
            )]
            let id = i as u32;
            (id, GeoCoord::new(lat, lon))
        })
        .collect()
}

/// `count` annotations spread uniformly over the mid-latitudes, for
/// queries that should touch many tree branches.
pub fn uniform_spread(count: usize, seed: u64) -> Vec<(u32, GeoCoord)> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|i| {
            let lat = rng.next_f64() * 120.0 - 60.0;
            let lon = rng.next_f64() * 360.0 - 180.0;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "bench dataset sizes fit in u32"
            )]
            let id = i as u32;
            (id, GeoCoord::new(lat, lon))
        })
        .collect()
}
