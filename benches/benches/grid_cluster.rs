// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmark of the full clustering pass: populate, merge, emit.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};

use covey_benches::two_city_mixture;
use covey_cluster::{Cluster, ClusteringAlgorithm, GridClustering, overlap_fn};
use covey_geom::{GeoCoord, Projection, WebMercator};
use covey_kdtree::KdTree;

/// A map-plane footprint predicate, standing in for a host view transform.
fn footprints_touch(a: &Cluster<u32>, b: &Cluster<u32>) -> bool {
    const HALF: f64 = 150_000.0;
    let pa = WebMercator.project(a.coordinate());
    let pb = WebMercator.project(b.coordinate());
    (pa.x - pb.x).abs() <= 2.0 * HALF && (pa.y - pb.y).abs() <= 2.0 * HALF
}

fn continental_viewport() -> Rect {
    let min = WebMercator.project(GeoCoord::new(50.0, -130.0));
    let max = WebMercator.project(GeoCoord::new(30.0, -60.0));
    Rect::new(min.x.floor(), min.y.floor(), max.x.ceil(), max.y.ceil())
}

fn bench_cluster_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_cluster");
    let viewport = continental_viewport();

    for count in [10_000, 100_000] {
        let tree = KdTree::build(two_city_mixture(count, 0x5eed), &WebMercator);
        for cell in [500_000.0, 2_000_000.0] {
            group.bench_with_input(
                BenchmarkId::new(format!("n{count}"), cell),
                &cell,
                |b, &cell| {
                    b.iter(|| {
                        let clusters = GridClustering
                            .cluster_in_rect(
                                &tree,
                                viewport,
                                Size::new(cell, cell),
                                &WebMercator,
                                &overlap_fn(footprints_touch),
                            )
                            .expect("valid clustering inputs");
                        black_box(clusters.len())
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_cluster_pass);
criterion_main!(benches);
