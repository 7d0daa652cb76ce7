// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isotile Scene: geometry and spatial queries over an isometric diagram.
//!
//! This crate sits on top of [`isotile_grid`] and adds the persisted document,
//! the pixel-space projection, and every query a presentation layer needs:
//!
//! - [`model`]: the model/view document, with serde wire names; [`schema`]
//!   validates it at the boundary and [`store`] applies keyed mutations.
//! - [`projection`]: tile ↔ screen ↔ path space, with zoom and scroll.
//! - [`anchor`]: resolving connector endpoints to tiles, or to [`Dangling`].
//! - [`route`]: deterministic L-shaped connector paths.
//! - [`geometry`]: connector polylines, double lines, dashes, arrows, and the
//!   smoothed freehand lasso outline.
//! - [`labels`]: legacy label migration and percentage placement.
//! - [`lasso`]: rectangular and freehand selection.
//! - [`scene`]: the [`Scene`] facade tying the above to one snapshot.
//!
//! Nothing here caches across a mutation. Build a [`Scene`] from the current
//! model, query it, mutate the model, and build a new one.
//!
//! # Example
//!
//! ```rust
//! use isotile_grid::Tile;
//! use isotile_scene::{
//!     AnchorRef, Connector, ConnectorAnchor, Model, ModelItem, Projection, Scene, SceneConfig,
//!     View, ViewId, ViewItem,
//! };
//!
//! let mut model = Model::default();
//! model.create_item(ModelItem::new("web", "Web")).unwrap();
//! model.create_item(ModelItem::new("db", "Database")).unwrap();
//!
//! let mut view = View::new("main", "Main");
//! view.items.push(ViewItem::new("web", Tile::new(0, 0)));
//! view.items.push(ViewItem::new("db", Tile::new(3, 2)));
//! view.connectors.push(Connector::new(
//!     "web-db",
//!     vec![
//!         ConnectorAnchor::new("a", AnchorRef::Item("web".into())),
//!         ConnectorAnchor::new("b", AnchorRef::Item("db".into())),
//!     ],
//! ));
//! model.create_view(view).unwrap();
//!
//! let config = SceneConfig::default();
//! let scene = Scene::new(&model, &ViewId::new("main"), Projection::default(), &config).unwrap();
//!
//! let path = scene.connector_path(&"web-db".into()).unwrap();
//! assert!(path.is_complete());
//! assert_eq!(path.tiles.len(), 6);
//!
//! let here = scene.tile_to_screen(Tile::new(3, 2));
//! assert_eq!(scene.screen_to_tile(here), Tile::new(3, 2));
//! ```

pub mod anchor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod labels;
pub mod lasso;
pub mod model;
pub mod projection;
pub mod route;
pub mod scene;
pub mod schema;
pub mod store;

pub use anchor::SubAnchor;
pub use config::{BlockingKinds, SceneConfig};
pub use error::{Dangling, SchemaError, StoreError};
pub use geometry::{ConnectorGeometry, DashPattern};
pub use ids::{
    AnchorId, ColorId, ConnectorId, IconId, ItemId, LabelId, RectangleId, TextBoxId, ViewId,
};
pub use labels::{LabelPlacement, placement_index};
pub use lasso::SceneRef;
pub use model::{
    AnchorRef, Color, Connector, ConnectorAnchor, ConnectorLabel, ConnectorStyle, Icon,
    LabelLine, LineType, Model, ModelItem, Rectangle, TextBox, TextOrientation, View, ViewItem,
};
pub use projection::{Projection, TileMetrics};
pub use route::{Completeness, ConnectorPath};
pub use scene::{ApproxTextMeasure, Scene, TextMeasure};
pub use store::Mutation;
