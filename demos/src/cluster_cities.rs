// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end demo: cluster two cities' worth of annotations against a
//! stdout "map view", then zoom in and watch the clusters split.
//!
//! Run with `RUST_LOG=debug cargo run --bin cluster_cities` to also see
//! the controller's internal logging.

use kurbo::{Point, Rect, Size};

use covey_controller::{
    Cluster, ClusteringController, ControllerDelegate, GeoCoord, MapView, Projection,
    RefreshFlags, WebMercator,
};

/// A fake map view that prints what a real one would render.
struct StdoutView {
    map_rect: Rect,
    zoom: f64,
    shown: usize,
}

impl MapView<u32> for StdoutView {
    fn visible_map_rect(&self) -> Rect {
        self.map_rect
    }

    fn view_size(&self) -> Size {
        Size::new(800.0, 600.0)
    }

    fn zoom_level(&self) -> f64 {
        self.zoom
    }

    fn view_point_for_coordinate(&self, coord: GeoCoord) -> Point {
        let p = WebMercator.project(coord);
        Point::new(
            (p.x - self.map_rect.x0) * 800.0 / self.map_rect.width(),
            (p.y - self.map_rect.y0) * 600.0 / self.map_rect.height(),
        )
    }

    fn add_annotations(&mut self, clusters: &[Cluster<u32>]) {
        self.shown += clusters.len();
        for cluster in clusters {
            let c = cluster.coordinate();
            println!(
                "  + {} at ({:.3}, {:.3}) radius {:.0} m",
                cluster.title().unwrap_or("1 annotation"),
                c.lat,
                c.lon,
                cluster.radius_meters(),
            );
        }
    }

    fn remove_annotations(&mut self, clusters: &[Cluster<u32>]) {
        self.shown -= clusters.len();
        for cluster in clusters {
            println!("  - {}", cluster.title().unwrap_or("1 annotation"));
        }
    }
}

/// Announces animation transitions as a UI host would schedule them.
struct AnnouncingDelegate;

impl ControllerDelegate<u32> for AnnouncingDelegate {
    fn will_animate(&mut self, _annotation: &Cluster<u32>, from: &Cluster<u32>, to: &Cluster<u32>) {
        println!(
            "  ~ animating {} member(s) from ({:.3}, {:.3}) into ({:.3}, {:.3})",
            from.len(),
            from.coordinate().lat,
            from.coordinate().lon,
            to.coordinate().lat,
            to.coordinate().lon,
        );
    }
}

fn viewport(center: GeoCoord, width: f64, height: f64) -> Rect {
    let p = WebMercator.project(center);
    Rect::new(
        (p.x - width / 2.0).floor(),
        (p.y - height / 2.0).floor(),
        (p.x + width / 2.0).floor(),
        (p.y + height / 2.0).floor(),
    )
}

fn main() {
    env_logger::init();

    // Two jittered clumps, New York and San Francisco.
    let ny = GeoCoord::new(40.77, -73.98);
    let sf = GeoCoord::new(37.85, -122.68);
    let mut seed = 0x5eed_u64;
    let mut next = move || {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((seed >> 11) as f64) / ((1_u64 << 53) as f64)
    };
    let mut annotations = Vec::new();
    for i in 0..2_000_u32 {
        let base = if i % 2 == 0 { ny } else { sf };
        annotations.push((
            i,
            GeoCoord::new(base.lat + next() * 0.1, base.lon + next() * 0.1),
        ));
    }

    let mut controller = ClusteringController::<u32>::new(WebMercator);
    controller.set_annotations(annotations);
    log::info!("controller ready: {controller:?}");

    let mid = GeoCoord::new(39.3, -98.3);
    let mut view = StdoutView {
        map_rect: viewport(mid, 60_000_000.0, 45_000_000.0),
        zoom: 4.0,
        shown: 0,
    };

    println!("continental view:");
    controller
        .refresh(&mut view, &mut AnnouncingDelegate, RefreshFlags::empty())
        .expect("refresh over a valid viewport");
    println!("  = {} annotation(s) on screen", view.shown);

    println!("zooming into New York:");
    view.map_rect = viewport(ny, 800_000.0, 600_000.0);
    view.zoom = 11.0;
    controller
        .refresh(&mut view, &mut AnnouncingDelegate, RefreshFlags::ANIMATED)
        .expect("refresh over a valid viewport");
    println!("  = {} annotation(s) on screen", view.shown);
}
