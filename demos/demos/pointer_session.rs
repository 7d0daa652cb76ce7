// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A pointer session.
//!
//! Drive an interaction through a short editing session: drag an item,
//! draw a connector, lasso a selection, and zoom. After each event the
//! returned mutations are applied and a fresh scene is built, the way an
//! editor's event loop would.
//!
//! Run:
//! - `cargo run -p isotile_demos --example pointer_session`

use isotile_grid::Tile;
use isotile_interaction::{Interaction, InteractionConfig, Mode};
use isotile_scene::{Model, ModelItem, Scene, SceneConfig, View, ViewId, ViewItem};
use kurbo::Point;

#[derive(Copy, Clone, Debug)]
enum Event {
    Down(Tile),
    Move(Tile),
    Up(Tile),
}

struct Editor {
    model: Model,
    view: ViewId,
    scene_config: SceneConfig,
    interaction: Interaction,
}

impl Editor {
    fn scene(&self) -> Scene<'_> {
        Scene::new(
            &self.model,
            &self.view,
            self.interaction.projection(),
            &self.scene_config,
        )
        .expect("view exists")
    }

    fn screen(&self, tile: Tile) -> Point {
        self.scene().tile_to_screen(tile)
    }

    fn handle(&mut self, event: Event) {
        let (mutations, hover) = {
            let scene = Scene::new(
                &self.model,
                &self.view,
                self.interaction.projection(),
                &self.scene_config,
            )
            .expect("view exists");
            let mutations = match event {
                Event::Down(tile) => {
                    let p = scene.tile_to_screen(tile);
                    self.interaction.pointer_down(&scene, p)
                }
                Event::Move(tile) => {
                    let p = scene.tile_to_screen(tile);
                    self.interaction.pointer_move(&scene, p)
                }
                Event::Up(tile) => {
                    let p = scene.tile_to_screen(tile);
                    self.interaction.pointer_up(&scene, p)
                }
            };
            (mutations, self.interaction.take_hover_events())
        };
        println!("{event:?} [{:?}]", self.interaction.mode());
        for transition in hover {
            println!("  hover {transition:?}");
        }
        for mutation in &mutations {
            println!("  apply {mutation:?}");
        }
        self.model.apply_all(mutations).expect("mutations validate");
    }
}

fn main() {
    let mut model = Model::default();
    let mut view = View::new("main", "Main");
    let placements = [
        ("api", Tile::new(0, 0)),
        ("queue", Tile::new(3, 0)),
        ("worker", Tile::new(3, 3)),
    ];
    for (id, tile) in placements {
        model.create_item(ModelItem::new(id, id)).expect("fresh id");
        view.items.push(ViewItem::new(id, tile));
    }
    model.create_view(view).expect("valid view");

    let mut editor = Editor {
        model,
        view: ViewId::new("main"),
        scene_config: SceneConfig::default(),
        interaction: Interaction::new(&InteractionConfig::default()),
    };

    println!("== Drag `worker` onto `queue` ==");
    editor.handle(Event::Down(Tile::new(3, 3)));
    editor.handle(Event::Move(Tile::new(3, 0)));
    editor.handle(Event::Up(Tile::new(3, 0)));
    let worker = editor.model.views[0].item(&"worker".into()).expect("placed").tile;
    println!("worker landed on {worker}");
    assert_eq!(worker.chebyshev_distance(Tile::new(3, 0)), 1);

    println!("== Connect `api` to `queue` ==");
    editor.interaction.set_mode(Mode::Connector);
    editor.handle(Event::Down(Tile::new(0, 0)));
    editor.handle(Event::Move(Tile::new(2, 0)));
    editor.handle(Event::Move(Tile::new(3, 0)));
    editor.handle(Event::Up(Tile::new(3, 0)));
    {
        let scene = editor.scene();
        let paths = scene.connector_paths();
        let (connector, path) = &paths[0];
        println!("{} routes through {:?}", connector.id, path.tiles);
        assert!(path.is_complete());
    }

    println!("== Lasso everything near the origin ==");
    editor.interaction.set_mode(Mode::Lasso);
    editor.handle(Event::Down(Tile::new(-1, -1)));
    editor.handle(Event::Move(Tile::new(4, 1)));
    let dropped = editor.interaction.set_mode(Mode::Lasso);
    println!("switching modes dropped {dropped:?}");
    editor.handle(Event::Down(Tile::new(-1, -1)));
    editor.handle(Event::Up(Tile::new(4, 1)));
    let selection = editor.interaction.selection().expect("something selected");
    println!("selected {:?}", selection.entities);

    println!("== Zoom in around `api` ==");
    let cursor = editor.screen(Tile::new(0, 0));
    editor.interaction.wheel(-1.0, cursor);
    editor.interaction.wheel(-1.0, cursor);
    let scene = editor.scene();
    println!(
        "zoom {:.1}, tile under the cursor: {}",
        scene.projection().zoom,
        scene.screen_to_tile(cursor)
    );
    assert_eq!(scene.screen_to_tile(cursor), Tile::new(0, 0));
}
