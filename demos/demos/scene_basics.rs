// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Load a diagram document, route its connectors, place their labels, and
//! print the SVG path data a renderer would draw.
//!
//! Run:
//! - `cargo run -p isotile_demos --example scene_basics`

use isotile_grid::Tile;
use isotile_scene::{Model, Projection, Scene, SceneConfig, SceneRef, ViewId};
use kurbo::{Point, Vec2};

const DOCUMENT: &str = r#"{
    "title": "Three tiers",
    "items": [
        { "id": "lb", "name": "Load balancer" },
        { "id": "app", "name": "App server" },
        { "id": "db", "name": "Database" }
    ],
    "views": [{
        "id": "prod",
        "name": "Production",
        "items": [
            { "id": "lb", "tile": { "x": 0, "y": 0 } },
            { "id": "app", "tile": { "x": 4, "y": 0 } },
            { "id": "db", "tile": { "x": 4, "y": 5 } }
        ],
        "connectors": [
            {
                "id": "lb-app",
                "startLabel": "443",
                "anchors": [
                    { "id": "a1", "ref": { "item": "lb" } },
                    { "id": "a2", "ref": { "item": "app", "anchor": "left" } }
                ]
            },
            {
                "id": "app-db",
                "lineType": "DOUBLE",
                "style": "DASHED",
                "labels": [{ "id": "sql", "text": "SQL", "position": 50, "line": "2" }],
                "anchors": [
                    { "id": "b1", "ref": { "item": "app" } },
                    { "id": "b2", "ref": { "item": "db" } }
                ]
            },
            {
                "id": "dangling",
                "anchors": [
                    { "id": "d1", "ref": { "item": "db" } },
                    { "id": "d2", "ref": { "item": "cache" } }
                ]
            }
        ],
        "rectangles": [{ "id": "dmz", "from": { "x": -1, "y": -1 }, "to": { "x": 1, "y": 1 } }]
    }]
}"#;

fn main() {
    let model: Model = serde_json::from_str(DOCUMENT).expect("document parses");
    let model = model.validated().expect("document is valid");
    let config = SceneConfig::default();
    let projection = Projection::new(1.0, Vec2::new(400.0, 300.0));
    let scene = Scene::new(&model, &ViewId::new("prod"), projection, &config).expect("view exists");

    for (connector, path) in scene.connector_paths() {
        println!(
            "== {} == {} tiles, complete: {}",
            connector.id,
            path.len(),
            path.is_complete()
        );
        let Some(geometry) = scene.connector_geometry(&connector.id) else {
            println!("  not drawn: {:?}", path.completeness);
            continue;
        };
        println!(
            "  origin {} size {:?} dash {:?}",
            geometry.origin,
            geometry.size,
            geometry.dash.dash_array()
        );
        println!("  d=\"{}\"", geometry.to_bez_path().to_svg());
        for placed in scene.label_placements(&connector.id) {
            println!(
                "  label {} at tile {} ({:.1}, {:.1})",
                placed.label, placed.tile, placed.position.x, placed.position.y
            );
        }
    }

    let dangling = scene.connector_path(&"dangling".into()).expect("connector exists");
    assert!(!dangling.is_complete());
    assert!(scene.connector_geometry(&"dangling".into()).is_none());

    // Pointer lookups go through the same projection.
    let pointer = scene.tile_to_screen(Tile::new(4, 0)) + Vec2::new(12.0, -5.0);
    let under = scene.item_at_tile(scene.screen_to_tile(pointer));
    println!("under {pointer:?}: {under:?}");
    assert_eq!(under, Some(SceneRef::Item("app".into())));

    let bounds = scene
        .screen_bounds(&SceneRef::Rectangle("dmz".into()))
        .expect("rectangle exists");
    println!("dmz screen bounds: {bounds:?}");
    assert!(bounds.contains(scene.tile_to_screen(Tile::ORIGIN)));
    assert!(!bounds.contains(Point::new(-1000.0, -1000.0)));
}
