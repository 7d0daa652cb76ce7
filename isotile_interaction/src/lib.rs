// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isotile Interaction: pointer modes over an isometric diagram scene.
//!
//! An [`Interaction`] holds the current [`Mode`], the gesture in progress, the
//! [`Viewport`], the selection, and hover state. Feed it pointer events
//! together with the current [`Scene`](isotile_scene::Scene); it answers with
//! [`Mutation`](isotile_scene::Mutation)s for the caller to apply.
//!
//! - [`mode`]: modes, gesture previews, and selections.
//! - [`viewport`]: stepped zoom within bounds, zoom-to-cursor, and panning.
//! - [`hover`]: enter/leave transitions over the entity stack under the pointer.
//! - [`ids`]: identifiers for entities a gesture creates.
//!
//! Previews are transient. Switching modes with [`Interaction::set_mode`]
//! returns the preview it discarded and nothing is written to the model.
//!
//! # Example
//!
//! ```rust
//! use isotile_grid::Tile;
//! use isotile_interaction::{Interaction, InteractionConfig, Mode};
//! use isotile_scene::{Model, ModelItem, Mutation, Scene, SceneConfig, View, ViewId, ViewItem};
//!
//! let mut model = Model::default();
//! model.create_item(ModelItem::new("web", "Web")).unwrap();
//! let mut view = View::new("main", "Main");
//! view.items.push(ViewItem::new("web", Tile::new(0, 0)));
//! model.create_view(view).unwrap();
//!
//! let scene_config = SceneConfig::default();
//! let mut interaction = Interaction::new(&InteractionConfig::default());
//! interaction.set_mode(Mode::Connector);
//!
//! let mutations = {
//!     let scene = Scene::new(&model, &ViewId::new("main"), interaction.projection(), &scene_config)
//!         .unwrap();
//!     interaction.pointer_down(&scene, scene.tile_to_screen(Tile::new(0, 0)));
//!     interaction.pointer_move(&scene, scene.tile_to_screen(Tile::new(2, 1)));
//!     interaction.pointer_up(&scene, scene.tile_to_screen(Tile::new(2, 1)))
//! };
//! assert!(matches!(mutations.as_slice(), [Mutation::CreateConnector { .. }]));
//! model.apply_all(mutations).unwrap();
//! assert_eq!(model.views[0].connectors.len(), 1);
//! ```

pub mod config;
pub mod hover;
pub mod ids;
pub mod interaction;
pub mod mode;
pub mod viewport;

pub use config::InteractionConfig;
pub use hover::{HoverEvent, HoverState};
pub use ids::{IdSource, SequentialIds};
pub use interaction::{Interaction, Pointer};
pub use mode::{ConnectorPreview, Mode, Preview, Selection, SelectionRegion};
pub use viewport::{PanDirection, Viewport};
