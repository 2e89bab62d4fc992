// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for k-d tree construction and range search.
//!
//! Uses deterministic synthetic annotation sets by default. To benchmark a
//! real dataset, set `COVEY_DATASET_JSON` to the path of a JSON array of
//! `{"lat": .., "lon": ..}` objects.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use serde::Deserialize;
use std::fs;

use covey_benches::{Lcg, two_city_mixture, uniform_spread};
use covey_geom::{GeoCoord, Projection, WebMercator};
use covey_kdtree::KdTree;

const ENV_JSON_PATH: &str = "COVEY_DATASET_JSON";

#[derive(Copy, Clone, Debug, Deserialize)]
struct DumpCoord {
    lat: f64,
    lon: f64,
}

/// The dataset under benchmark: the JSON dump when configured, synthetic
/// otherwise.
fn dataset(count: usize) -> Vec<(u32, GeoCoord)> {
    if let Ok(path) = std::env::var(ENV_JSON_PATH) {
        let raw = fs::read_to_string(&path).expect("readable dataset JSON");
        let coords: Vec<DumpCoord> = serde_json::from_str(&raw).expect("well-formed dataset JSON");
        return coords
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(i, c)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "bench dataset sizes fit in u32"
                )]
                let id = i as u32;
                (id, GeoCoord::new(c.lat, c.lon))
            })
            .collect();
    }
    two_city_mixture(count, 0x5eed)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_build");
    for count in [1_000, 10_000, 100_000] {
        let items = dataset(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter_batched(
                || items.clone(),
                |items| KdTree::build(items, &WebMercator),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_search");
    let tree = KdTree::build(uniform_spread(100_000, 0xfeed), &WebMercator);
    let world = WebMercator.world_rect();

    for fraction in [0.01, 0.1, 0.5] {
        let span = world.width() * fraction;
        let mut rng = Lcg::new(0xabcd);
        group.bench_with_input(
            BenchmarkId::from_parameter(fraction),
            &span,
            |b, &span| {
                b.iter(|| {
                    let x0 = rng.next_f64() * (world.width() - span);
                    let y0 = rng.next_f64() * (world.height() - span);
                    let mut hits = 0_usize;
                    tree.visit_range(
                        Point::new(x0, y0),
                        Point::new(x0 + span, y0 + span),
                        |_| hits += 1,
                    );
                    black_box(hits)
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
