// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use isotile_grid::{OccupancyIndex, Occupant, Tile};
use isotile_scene::route::route;
use isotile_scene::{
    AnchorRef, Connector, ConnectorAnchor, Model, ModelItem, Projection, Scene, SceneConfig, View,
    ViewId, ViewItem,
};
use kurbo::{Point, Vec2};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn next_i32(&mut self, span: i32) -> i32 {
        (self.next_u64() % (2 * span as u64 + 1)) as i32 - span
    }
}

/// A view with an `n`×`n` block of items packed edge to edge and a connector
/// between each item and its right-hand neighbour.
fn dense_model(n: i32) -> Model {
    let mut model = Model::default();
    let mut view = View::new("v", "Dense");
    for y in 0..n {
        for x in 0..n {
            let id = format!("i{x}_{y}");
            model.items.push(ModelItem::new(id.as_str(), id.as_str()));
            view.items.push(ViewItem::new(id.as_str(), Tile::new(x, y)));
            if x > 0 {
                let left = format!("i{}_{y}", x - 1);
                view.connectors.push(Connector::new(
                    format!("c{x}_{y}"),
                    vec![
                        ConnectorAnchor::new(format!("a{x}_{y}"), AnchorRef::Item(left.into())),
                        ConnectorAnchor::new(format!("b{x}_{y}"), AnchorRef::Item(id.into())),
                    ],
                ));
            }
        }
    }
    model.views.push(view);
    model
}

fn bench_screen_to_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let projection = Projection::new(1.7, Vec2::new(640.0, 360.0));
    let mut rng = Rng::new(0x1507);
    let points: Vec<Point> = (0..1024)
        .map(|_| Point::new(rng.next_f64() * 2560.0 - 640.0, rng.next_f64() * 1440.0 - 360.0))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("screen_to_tile_1024", |b| {
        b.iter(|| {
            for p in &points {
                black_box(projection.screen_to_tile(*p));
            }
        })
    });
    group.bench_function("tile_to_screen_1024", |b| {
        b.iter(|| {
            for p in &points {
                black_box(projection.tile_to_screen(Tile::new(p.x as i32, p.y as i32)));
            }
        })
    });
    group.finish();
}

fn bench_nearest_unoccupied(c: &mut Criterion) {
    let mut group = c.benchmark_group("occupancy");
    for &n in &[8i32, 16, 20] {
        let mut index = OccupancyIndex::new();
        for y in -n..=n {
            for x in -n..=n {
                index.insert_tile(Tile::new(x, y), Occupant::ITEM, (x, y));
            }
        }
        // Everything within radius `n` is taken, so the search walks n + 1 rings.
        group.bench_function(format!("nearest_unoccupied_solid_r{n}"), |b| {
            b.iter(|| black_box(index.find_nearest_unoccupied(Tile::ORIGIN, 32)))
        });
    }

    let mut rng = Rng::new(42);
    let mut sparse = OccupancyIndex::new();
    for i in 0..2000_u32 {
        let tile = Tile::new(rng.next_i32(40), rng.next_i32(40));
        sparse.insert_tile(tile, Occupant::ITEM, i);
    }
    let targets: Vec<Tile> = (0..16).map(|_| Tile::new(rng.next_i32(20), rng.next_i32(20))).collect();
    group.throughput(Throughput::Elements(targets.len() as u64));
    group.bench_function("nearest_unoccupied_group_16", |b| {
        b.iter(|| black_box(sparse.find_nearest_unoccupied_group(&targets, 10, |_| false)))
    });
    group.finish();
}

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    group.bench_function("route_100x100", |b| {
        b.iter(|| black_box(route(Tile::new(-50, -50), black_box(Tile::new(50, 50)))))
    });

    let config = SceneConfig::default();
    for &n in &[8i32, 24] {
        let model = dense_model(n);
        let connectors = (n * (n - 1)) as u64;
        group.throughput(Throughput::Elements(connectors));
        group.bench_function(format!("scene_connector_paths_n{n}"), |b| {
            b.iter(|| {
                let scene = Scene::new(&model, &ViewId::new("v"), Projection::default(), &config)
                    .expect("view exists");
                black_box(scene.connector_paths().len())
            })
        });
    }
    group.finish();
}

fn bench_lasso(c: &mut Criterion) {
    let mut group = c.benchmark_group("lasso");
    let model = dense_model(24);
    let config = SceneConfig::default();
    let scene = Scene::new(&model, &ViewId::new("v"), Projection::default(), &config)
        .expect("view exists");
    let samples: Vec<Point> = (0..64)
        .map(|i| {
            let angle = i as f64 / 64.0 * core::f64::consts::TAU;
            let tile = Point::new(12.0 + 8.0 * angle.cos(), 12.0 + 8.0 * angle.sin());
            scene.projection().transform() * tile
        })
        .collect();
    group.bench_function("select_in_rect_24", |b| {
        b.iter(|| black_box(scene.select_in_rect(Tile::new(4, 4), Tile::new(18, 18)).len()))
    });
    group.bench_function("select_in_freehand_24", |b| {
        b.iter(|| black_box(scene.select_in_freehand(&samples).len()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_screen_to_tile,
    bench_nearest_unoccupied,
    bench_routing,
    bench_lasso,
);
criterion_main!(benches);
