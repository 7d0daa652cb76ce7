// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read surface over one model/view snapshot.
//!
//! A [`Scene`] borrows the model, picks a view, and builds the occupancy index
//! once. Every query then reads that same snapshot, so all geometry derived in
//! one interaction event is consistent. After a mutation, build a new scene.

use core::fmt;

use isotile_grid::{OccupancyIndex, Occupant, Tile, TileRect};
use kurbo::{Point, Rect};
use log::trace;

use crate::anchor;
use crate::config::SceneConfig;
use crate::error::{Dangling, StoreError};
use crate::geometry::ConnectorGeometry;
use crate::ids::{ConnectorId, ItemId, ViewId};
use crate::labels::{LabelPlacement, place_labels};
use crate::lasso::{self, SceneRef};
use crate::model::{AnchorRef, Connector, Model, ModelItem, TextBox, TextOrientation, View};
use crate::projection::{Projection, TileMetrics};
use crate::route::{ConnectorPath, route_connector};

/// Measures text to size text boxes.
pub trait TextMeasure {
    /// Length of `content` at `font_size`, in tiles along the text's axis.
    fn measure(&self, content: &str, font_size: f64) -> f64;
}

/// Character count × font size × a per-character width factor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ApproxTextMeasure {
    /// Width of one character as a multiple of the font size.
    pub char_width: f64,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self { char_width: 0.6 }
    }
}

impl TextMeasure for ApproxTextMeasure {
    #[allow(
        clippy::cast_precision_loss,
        reason = "character counts of text boxes are far below 2^52"
    )]
    fn measure(&self, content: &str, font_size: f64) -> f64 {
        content.chars().count() as f64 * font_size * self.char_width
    }
}

/// One consistent snapshot of a view, with derived spatial structures.
pub struct Scene<'a> {
    model: &'a Model,
    view: &'a View,
    projection: Projection,
    config: &'a SceneConfig,
    measure: Box<dyn TextMeasure + 'a>,
    occupancy: OccupancyIndex<SceneRef>,
}

impl fmt::Debug for Scene<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("view", &self.view.id)
            .field("projection", &self.projection)
            .field("occupancy", &self.occupancy)
            .finish_non_exhaustive()
    }
}

impl<'a> Scene<'a> {
    /// A scene over `view_id` with the default text measure.
    pub fn new(
        model: &'a Model,
        view_id: &ViewId,
        projection: Projection,
        config: &'a SceneConfig,
    ) -> Result<Self, StoreError> {
        let measure = ApproxTextMeasure {
            char_width: config.text_char_width,
        };
        Self::with_measure(model, view_id, projection, config, Box::new(measure))
    }

    /// A scene with a custom text measure.
    pub fn with_measure(
        model: &'a Model,
        view_id: &ViewId,
        projection: Projection,
        config: &'a SceneConfig,
        measure: Box<dyn TextMeasure + 'a>,
    ) -> Result<Self, StoreError> {
        let view = model
            .view(view_id)
            .ok_or_else(|| StoreError::UnknownView(view_id.clone()))?;
        let projection = projection.with_metrics(TileMetrics::from_config(config));
        let occupancy = build_occupancy(view, config, measure.as_ref());
        Ok(Self {
            model,
            view,
            projection,
            config,
            measure,
            occupancy,
        })
    }

    /// The whole model.
    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// The view this scene shows.
    pub fn view(&self) -> &'a View {
        self.view
    }

    /// Zoom and scroll in effect.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Configuration in effect.
    pub fn config(&self) -> &'a SceneConfig {
        self.config
    }

    /// The occupancy index.
    pub fn occupancy(&self) -> &OccupancyIndex<SceneRef> {
        &self.occupancy
    }

    /// The model item behind a placed item.
    pub fn model_item(&self, id: &ItemId) -> Option<&'a ModelItem> {
        self.model.item(id)
    }

    /// Resolve an anchor reference in this view.
    pub fn resolve_anchor(&self, reference: &AnchorRef) -> Result<Tile, Dangling> {
        anchor::resolve(reference, self.view)
    }

    /// Route one connector.
    pub fn connector_path(&self, id: &ConnectorId) -> Option<ConnectorPath> {
        self.view
            .connector(id)
            .map(|connector| route_connector(connector, self.view))
    }

    /// Route every connector, in view order.
    pub fn connector_paths(&self) -> Vec<(&'a Connector, ConnectorPath)> {
        self.view
            .connectors
            .iter()
            .map(|connector| (connector, route_connector(connector, self.view)))
            .collect()
    }

    /// Render geometry of a connector; `None` for unknown or incomplete ones.
    pub fn connector_geometry(&self, id: &ConnectorId) -> Option<ConnectorGeometry> {
        let connector = self.view.connector(id)?;
        let path = route_connector(connector, self.view);
        ConnectorGeometry::build(connector, &path, self.config.tile_size)
    }

    /// Where each label of a connector lands; empty for incomplete connectors.
    pub fn label_placements(&self, id: &ConnectorId) -> Vec<LabelPlacement> {
        let Some(connector) = self.view.connector(id) else {
            return Vec::new();
        };
        let path = route_connector(connector, self.view);
        match ConnectorGeometry::build(connector, &path, self.config.tile_size) {
            Some(geometry) => place_labels(connector, &path, &geometry),
            None => Vec::new(),
        }
    }

    /// Whether a blocking entity sits on `tile`.
    pub fn is_occupied(&self, tile: Tile) -> bool {
        self.occupancy.is_occupied(tile)
    }

    /// Nearest free tile to `origin` within the configured radius.
    pub fn find_nearest_unoccupied(&self, origin: Tile) -> Option<Tile> {
        self.occupancy
            .find_nearest_unoccupied(origin, self.config.max_search_radius)
    }

    /// Free tiles for several entities moved at once.
    ///
    /// Entities in `moving` do not block, so a selection can be dropped onto
    /// the tiles it is leaving.
    pub fn find_nearest_unoccupied_group(
        &self,
        targets: &[Tile],
        moving: &[SceneRef],
    ) -> Option<Vec<Tile>> {
        self.occupancy.find_nearest_unoccupied_group(
            targets,
            self.config.max_search_radius,
            |key| moving.contains(key),
        )
    }

    /// The topmost entity at a tile: item, then text box, then rectangle.
    pub fn item_at_tile(&self, tile: Tile) -> Option<SceneRef> {
        self.occupancy
            .occupants_at(tile)
            .first()
            .map(|(_, key)| (*key).clone())
    }

    /// Every entity at a tile, topmost first.
    pub fn occupants_at(&self, tile: Tile) -> Vec<SceneRef> {
        self.occupancy
            .occupants_at(tile)
            .into_iter()
            .map(|(_, key)| key.clone())
            .collect()
    }

    /// Entities inside a rectangular lasso.
    pub fn select_in_rect(&self, from: Tile, to: Tile) -> Vec<SceneRef> {
        lasso::select_in_rect(self.view, from, to)
    }

    /// Entities inside a freehand lasso given as screen samples.
    pub fn select_in_freehand(&self, samples: &[Point]) -> Vec<SceneRef> {
        lasso::select_in_freehand(self.view, &self.projection, samples)
    }

    /// Tiles a text box covers, from its anchor along its orientation.
    ///
    /// Always at least the anchor tile.
    pub fn text_box_bounds(&self, text_box: &TextBox) -> TileRect {
        text_box_extent(text_box, self.measure.as_ref())
    }

    /// Screen position of a tile center.
    pub fn tile_to_screen(&self, tile: Tile) -> Point {
        self.projection.tile_to_screen(tile)
    }

    /// Tile under a screen point.
    pub fn screen_to_tile(&self, point: Point) -> Tile {
        self.projection.screen_to_tile(point)
    }

    /// Screen-space bounds of an entity, for hit boxes and culling.
    pub fn screen_bounds(&self, entity: &SceneRef) -> Option<Rect> {
        let rect = match entity {
            SceneRef::Item(id) => TileRect::single(self.view.item(id)?.tile),
            SceneRef::TextBox(id) => self.text_box_bounds(self.view.text_box(id)?),
            SceneRef::Rectangle(id) => self.view.rectangle(id)?.bounds(),
        };
        Some(self.projection.tile_rect_to_screen(&rect))
    }
}

fn build_occupancy(
    view: &View,
    config: &SceneConfig,
    measure: &dyn TextMeasure,
) -> OccupancyIndex<SceneRef> {
    let mut index = OccupancyIndex::with_blocking(config.blocking.mask());
    for item in &view.items {
        index.insert_tile(item.tile, Occupant::ITEM, SceneRef::Item(item.id.clone()));
    }
    for text_box in &view.text_boxes {
        index.insert_region(
            text_box_extent(text_box, measure),
            Occupant::TEXT_BOX,
            SceneRef::TextBox(text_box.id.clone()),
        );
    }
    for rectangle in &view.rectangles {
        index.insert_region(
            rectangle.bounds(),
            Occupant::RECTANGLE,
            SceneRef::Rectangle(rectangle.id.clone()),
        );
    }
    trace!(
        "occupancy for view `{}` built from {} entities",
        view.id,
        index.len()
    );
    index
}

fn text_box_extent(text_box: &TextBox, measure: &dyn TextMeasure) -> TileRect {
    let length = measure.measure(&text_box.content, text_box.font_size());
    let extra = tiles_beyond_anchor(length);
    let far = match text_box.orientation() {
        TextOrientation::X => text_box.tile.offset(extra, 0),
        TextOrientation::Y => text_box.tile.offset(0, extra),
    };
    TileRect::from_corners(text_box.tile, far)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is clamped into i32 range before the cast"
)]
fn tiles_beyond_anchor(length: f64) -> i32 {
    if !length.is_finite() || length <= 1.0 {
        return 0;
    }
    (length.ceil() - 1.0).min(f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConnectorAnchor, ConnectorLabel, Rectangle, ViewItem};

    fn model() -> Model {
        let mut model = Model::default();
        for id in ["a", "b", "c"] {
            model.create_item(ModelItem::new(id, id)).unwrap();
        }
        let mut view = View::new("v", "Main");
        view.items.push(ViewItem::new("a", Tile::new(0, 0)));
        view.items.push(ViewItem::new("b", Tile::new(4, 2)));
        view.rectangles
            .push(Rectangle::new("zone", Tile::new(-2, -2), Tile::new(2, 2)));
        view.text_boxes
            .push(TextBox::new("note", Tile::new(0, 5), "hello world"));
        let mut connector = Connector::new(
            "ab",
            vec![
                ConnectorAnchor::new("ab-1", AnchorRef::Item("a".into())),
                ConnectorAnchor::new("ab-2", AnchorRef::Item("b".into())),
            ],
        );
        connector.description = Some("link".into());
        view.connectors.push(connector);
        view.connectors.push(Connector::new(
            "broken",
            vec![
                ConnectorAnchor::new("br-1", AnchorRef::Item("a".into())),
                ConnectorAnchor::new("br-2", AnchorRef::Item("c".into())),
            ],
        ));
        model.views.push(view);
        model
    }

    fn scene<'a>(model: &'a Model, config: &'a SceneConfig) -> Scene<'a> {
        Scene::new(model, &ViewId::new("v"), Projection::default(), config).unwrap()
    }

    #[test]
    fn unknown_view_is_an_error() {
        let m = model();
        let config = SceneConfig::default();
        let err = Scene::new(&m, &ViewId::new("nope"), Projection::default(), &config);
        assert!(matches!(err, Err(StoreError::UnknownView(_))));
    }

    #[test]
    fn occupancy_follows_blocking_kinds() {
        let m = model();
        let config = SceneConfig::default();
        let s = scene(&m, &config);
        assert!(s.is_occupied(Tile::new(0, 0)));
        // Inside the rectangle but not on an item.
        assert!(!s.is_occupied(Tile::new(1, 1)));
        // Text box extent: 11 chars * 0.6 * 0.6 = 3.96 tiles -> 4 tiles.
        assert!(s.is_occupied(Tile::new(3, 5)));
        assert!(!s.is_occupied(Tile::new(4, 5)));
    }

    #[test]
    fn nearest_free_tile_is_on_ring_one() {
        let m = model();
        let config = SceneConfig::default();
        let s = scene(&m, &config);
        let free = s.find_nearest_unoccupied(Tile::new(0, 0)).unwrap();
        assert_eq!(free.chebyshev_distance(Tile::new(0, 0)), 1);
        assert_eq!(s.find_nearest_unoccupied(Tile::new(0, 0)), Some(free));
    }

    #[test]
    fn group_placement_ignores_moving_entities() {
        let m = model();
        let config = SceneConfig::default();
        let s = scene(&m, &config);
        let moving = [SceneRef::Item("a".into())];
        let placed = s
            .find_nearest_unoccupied_group(&[Tile::new(0, 0)], &moving)
            .unwrap();
        assert_eq!(placed, [Tile::new(0, 0)]);
    }

    #[test]
    fn item_at_tile_prefers_items() {
        let m = model();
        let config = SceneConfig::default();
        let s = scene(&m, &config);
        assert_eq!(s.item_at_tile(Tile::new(0, 0)), Some(SceneRef::Item("a".into())));
        assert_eq!(
            s.item_at_tile(Tile::new(1, 0)),
            Some(SceneRef::Rectangle("zone".into()))
        );
        assert_eq!(s.occupants_at(Tile::new(0, 0)).len(), 2);
        assert_eq!(s.item_at_tile(Tile::new(20, 20)), None);
    }

    #[test]
    fn connectors_route_and_report_dangling() {
        let m = model();
        let config = SceneConfig::default();
        let s = scene(&m, &config);
        let paths = s.connector_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].1.is_renderable());
        assert!(!paths[1].1.is_complete());
        assert!(s.connector_geometry(&"broken".into()).is_none());
        assert!(s.label_placements(&"broken".into()).is_empty());

        let placed = s.label_placements(&"ab".into());
        assert_eq!(placed.len(), 1);
        // Seven tiles from (0,0) to (4,2); 50% is index 3.
        assert_eq!(placed[0].index, 3);
        assert_eq!(placed[0].tile, Tile::new(3, 0));
    }

    #[test]
    fn labels_follow_a_moved_item() {
        let mut m = model();
        let config = SceneConfig::default();
        {
            let s = scene(&m, &config);
            assert_eq!(s.connector_path(&"ab".into()).unwrap().len(), 7);
        }
        m.update_view_item(&ViewId::new("v"), &"b".into(), |placed| {
            placed.tile = Tile::new(10, 0);
        })
        .unwrap();
        m.update_connector(&ViewId::new("v"), &"ab".into(), |c| {
            c.labels = vec![ConnectorLabel::new("l", "x", 100.0)];
        })
        .unwrap();
        let s = scene(&m, &config);
        let placed = s.label_placements(&"ab".into());
        assert_eq!(placed[0].tile, Tile::new(10, 0));
    }

    #[test]
    fn rect_lasso_through_the_facade() {
        let m = model();
        let config = SceneConfig::default();
        let s = scene(&m, &config);
        let got = s.select_in_rect(Tile::new(-3, -3), Tile::new(5, 5));
        assert!(got.contains(&SceneRef::Item("a".into())));
        assert!(got.contains(&SceneRef::Item("b".into())));
        assert!(got.contains(&SceneRef::Rectangle("zone".into())));
        assert!(got.contains(&SceneRef::TextBox("note".into())));
    }

    #[test]
    fn custom_text_measure() {
        struct Fixed;
        impl TextMeasure for Fixed {
            fn measure(&self, _: &str, _: f64) -> f64 {
                2.0
            }
        }
        let m = model();
        let config = SceneConfig::default();
        let s = Scene::with_measure(
            &m,
            &ViewId::new("v"),
            Projection::default(),
            &config,
            Box::new(Fixed),
        )
        .unwrap();
        let note = &s.view().text_boxes[0];
        assert_eq!(
            s.text_box_bounds(note),
            TileRect::from_corners(Tile::new(0, 5), Tile::new(1, 5))
        );
    }

    #[test]
    fn screen_round_trip_through_the_facade() {
        let m = model();
        let config = SceneConfig::default();
        let s = Scene::new(
            &m,
            &ViewId::new("v"),
            Projection::new(2.0, kurbo::Vec2::new(300.0, 200.0)),
            &config,
        )
        .unwrap();
        let t = Tile::new(-3, 7);
        assert_eq!(s.screen_to_tile(s.tile_to_screen(t)), t);
        let bounds = s.screen_bounds(&SceneRef::Item("a".into())).unwrap();
        assert!(bounds.contains(s.tile_to_screen(Tile::new(0, 0))));
    }
}
