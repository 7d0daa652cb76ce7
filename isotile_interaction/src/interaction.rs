// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pointer state machine.

use core::{fmt, mem};

use isotile_grid::Tile;
use isotile_scene::route::route;
use isotile_scene::{
    AnchorId, AnchorRef, Connector, ConnectorAnchor, ConnectorId, Mutation, Projection, Rectangle,
    Scene, SceneRef, TextBox,
};
use kurbo::Point;
use log::{debug, trace};

use crate::config::InteractionConfig;
use crate::hover::{HoverEvent, HoverState, hover_path};
use crate::ids::{IdSource, SequentialIds};
use crate::mode::{ConnectorPreview, Mode, Preview, Selection, SelectionRegion};
use crate::viewport::Viewport;

/// Last known pointer position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer {
    /// Screen pixels.
    pub screen: Point,
    /// Tile under `screen`.
    pub tile: Tile,
}

#[derive(Clone, Debug, Default)]
enum Gesture {
    #[default]
    Idle,
    Panning {
        last: Point,
    },
    Pressed {
        at: Point,
        tile: Tile,
        target: Option<SceneRef>,
        grab: Option<Vec<SceneRef>>,
    },
    Dragging {
        entities: Vec<SceneRef>,
        last_tile: Tile,
    },
    Drawing(Preview),
}

/// Turns pointer events over a [`Scene`] into viewport changes, selection
/// changes, and [`Mutation`]s.
///
/// The interaction never writes to the model. Each event takes the current
/// scene snapshot and returns mutations for the caller to apply, after which
/// the caller builds a new scene with [`Interaction::projection`].
pub struct Interaction<I = SequentialIds> {
    config: InteractionConfig,
    viewport: Viewport,
    mode: Mode,
    gesture: Gesture,
    selection: Option<Selection>,
    hover: HoverState<SceneRef>,
    hover_events: Vec<HoverEvent<SceneRef>>,
    pointer: Option<Pointer>,
    ids: I,
}

impl<I> fmt::Debug for Interaction<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("mode", &self.mode)
            .field("gesture", &self.gesture)
            .field("viewport", &self.viewport)
            .field("selection", &self.selection)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

impl Interaction<SequentialIds> {
    /// An idle interaction in cursor mode with sequential ids.
    pub fn new(config: &InteractionConfig) -> Self {
        Self::with_ids(config, SequentialIds::default())
    }
}

impl<I: IdSource> Interaction<I> {
    /// An idle interaction drawing ids from `ids`.
    pub fn with_ids(config: &InteractionConfig, ids: I) -> Self {
        Self {
            config: config.clone(),
            viewport: Viewport::new(config),
            mode: Mode::Cursor,
            gesture: Gesture::Idle,
            selection: None,
            hover: HoverState::new(),
            hover_events: Vec::new(),
            pointer: None,
            ids,
        }
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes, discarding any gesture in progress.
    ///
    /// Returns the preview that was dropped, if there was one.
    pub fn set_mode(&mut self, mode: Mode) -> Option<Preview> {
        let discarded = self.cancel();
        trace!("mode {:?} -> {mode:?}", self.mode);
        self.mode = mode;
        discarded
    }

    /// Abandon the gesture in progress without changing modes.
    ///
    /// An unfinished lasso takes its live selection with it.
    pub fn cancel(&mut self) -> Option<Preview> {
        match mem::take(&mut self.gesture) {
            Gesture::Drawing(preview) => {
                debug!("discarding {} preview", preview_kind(&preview));
                if !matches!(preview, Preview::Connector(_)) {
                    self.selection = None;
                }
                Some(preview)
            }
            _ => None,
        }
    }

    /// The preview of the gesture in progress.
    pub fn preview(&self) -> Option<&Preview> {
        match &self.gesture {
            Gesture::Drawing(preview) => Some(preview),
            _ => None,
        }
    }

    /// The current selection.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Replace the selection.
    pub fn select(&mut self, selection: Option<Selection>) {
        self.selection = selection.filter(|s| !s.is_empty());
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Last known pointer position, if the pointer is over the canvas.
    pub fn pointer(&self) -> Option<Pointer> {
        self.pointer
    }

    /// The viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The viewport, for zoom buttons and keyboard panning.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The projection to build the next scene with.
    pub fn projection(&self) -> Projection {
        self.viewport.projection()
    }

    /// Configuration in effect.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The hover stack under the pointer.
    pub fn hover(&self) -> &HoverState<SceneRef> {
        &self.hover
    }

    /// Hover transitions since the last call.
    pub fn take_hover_events(&mut self) -> Vec<HoverEvent<SceneRef>> {
        mem::take(&mut self.hover_events)
    }

    /// Wheel input over the canvas. Returns whether the zoom changed.
    pub fn wheel(&mut self, delta_y: f64, cursor: Point) -> bool {
        self.viewport.wheel(delta_y, cursor)
    }

    /// The pointer left the canvas.
    pub fn pointer_leave(&mut self) {
        self.pointer = None;
        let events = self.hover.clear();
        self.hover_events.extend(events);
    }

    /// Primary button pressed at `point`.
    pub fn pointer_down(&mut self, scene: &Scene<'_>, point: Point) -> Vec<Mutation> {
        let tile = self.track(scene, point);
        self.gesture = match self.mode {
            Mode::Pan => Gesture::Panning { last: point },
            Mode::Cursor => {
                let target = scene.item_at_tile(tile);
                let grab = target.as_ref().map(|target| match &self.selection {
                    Some(selection) if selection.entities.contains(target) => {
                        selection.entities.clone()
                    }
                    _ => vec![target.clone()],
                });
                Gesture::Pressed {
                    at: point,
                    tile,
                    target,
                    grab,
                }
            }
            Mode::DragItems => match &self.selection {
                Some(selection) => Gesture::Dragging {
                    entities: selection.entities.clone(),
                    last_tile: tile,
                },
                None => Gesture::Idle,
            },
            Mode::Connector => {
                let start = endpoint(scene, tile);
                Gesture::Drawing(Preview::Connector(ConnectorPreview {
                    end: start.clone(),
                    start,
                    start_tile: tile,
                    end_tile: tile,
                    tiles: vec![tile],
                }))
            }
            Mode::Lasso | Mode::FreehandLasso => {
                let under = scene.item_at_tile(tile);
                match &self.selection {
                    Some(selection) if selection.grabs(tile, under.as_ref()) => Gesture::Pressed {
                        at: point,
                        tile,
                        target: None,
                        grab: Some(selection.entities.clone()),
                    },
                    _ => {
                        self.selection = None;
                        Gesture::Drawing(if self.mode == Mode::Lasso {
                            Preview::Lasso {
                                from: tile,
                                to: tile,
                            }
                        } else {
                            Preview::Freehand {
                                samples: vec![point],
                            }
                        })
                    }
                }
            }
        };
        Vec::new()
    }

    /// Pointer moved to `point`, pressed or not.
    pub fn pointer_move(&mut self, scene: &Scene<'_>, point: Point) -> Vec<Mutation> {
        let tile = self.track(scene, point);
        match mem::take(&mut self.gesture) {
            Gesture::Idle => Vec::new(),
            Gesture::Panning { last } => {
                self.viewport.pan_by(point - last);
                self.gesture = Gesture::Panning { last: point };
                Vec::new()
            }
            Gesture::Pressed {
                at,
                tile: pressed,
                target,
                grab,
            } => {
                if tile == pressed {
                    self.gesture = Gesture::Pressed {
                        at,
                        tile: pressed,
                        target,
                        grab,
                    };
                    return Vec::new();
                }
                match grab {
                    Some(entities) => {
                        trace!("dragging {} entities", entities.len());
                        self.mode = Mode::DragItems;
                        self.gesture = Gesture::Dragging {
                            entities,
                            last_tile: pressed,
                        };
                        self.drag_to(scene, tile)
                    }
                    None => {
                        self.viewport.pan_by(point - at);
                        self.gesture = Gesture::Panning { last: point };
                        Vec::new()
                    }
                }
            }
            gesture @ Gesture::Dragging { .. } => {
                self.gesture = gesture;
                self.drag_to(scene, tile)
            }
            Gesture::Drawing(mut preview) => {
                match &mut preview {
                    Preview::Connector(connector) => {
                        if connector.end_tile != tile {
                            connector.end = endpoint(scene, tile);
                            connector.end_tile = tile;
                            connector.tiles = route(connector.start_tile, tile);
                        }
                    }
                    Preview::Lasso { from, to } => {
                        *to = tile;
                        self.selection = rect_selection(scene, *from, tile);
                    }
                    Preview::Freehand { samples } => {
                        let throttle = self.config.freehand_throttle;
                        let keep = samples.last().is_none_or(|last| {
                            (point.x - last.x).abs() > throttle
                                || (point.y - last.y).abs() > throttle
                        });
                        if keep {
                            samples.push(point);
                        }
                    }
                }
                self.gesture = Gesture::Drawing(preview);
                Vec::new()
            }
        }
    }

    /// Primary button released at `point`.
    pub fn pointer_up(&mut self, scene: &Scene<'_>, point: Point) -> Vec<Mutation> {
        let tile = self.track(scene, point);
        match mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => Vec::new(),
            Gesture::Pressed { target, .. } => {
                if self.mode == Mode::Cursor {
                    self.selection = target.map(Selection::single);
                }
                Vec::new()
            }
            gesture @ Gesture::Dragging { .. } => {
                self.gesture = gesture;
                let mutations = self.drag_to(scene, tile);
                self.gesture = Gesture::Idle;
                self.mode = Mode::Cursor;
                mutations
            }
            Gesture::Drawing(Preview::Connector(preview)) => {
                self.finish_connector(scene, preview, tile)
            }
            Gesture::Drawing(Preview::Lasso { from, .. }) => {
                self.selection = rect_selection(scene, from, tile);
                Vec::new()
            }
            Gesture::Drawing(Preview::Freehand { mut samples }) => {
                if samples.last() != Some(&point) {
                    samples.push(point);
                }
                let polygon = scene.projection().screen_path_to_tiles(&samples);
                let entities = scene.select_in_freehand(&samples);
                self.select(Some(Selection {
                    region: SelectionRegion::Polygon(polygon),
                    entities,
                }));
                Vec::new()
            }
        }
    }

    fn track(&mut self, scene: &Scene<'_>, point: Point) -> Tile {
        let tile = scene.screen_to_tile(point);
        self.pointer = Some(Pointer {
            screen: point,
            tile,
        });
        let events = self.hover.update_path(&hover_path(scene, tile));
        self.hover_events.extend(events);
        tile
    }

    fn drag_to(&mut self, scene: &Scene<'_>, tile: Tile) -> Vec<Mutation> {
        let Gesture::Dragging {
            entities,
            last_tile,
        } = &mut self.gesture
        else {
            return Vec::new();
        };
        if *last_tile == tile {
            return Vec::new();
        }
        let dx = tile.x.saturating_sub(last_tile.x);
        let dy = tile.y.saturating_sub(last_tile.y);
        *last_tile = tile;
        drag_mutations(scene, entities, dx, dy)
    }

    fn finish_connector(
        &mut self,
        scene: &Scene<'_>,
        preview: ConnectorPreview,
        tile: Tile,
    ) -> Vec<Mutation> {
        if tile == preview.start_tile {
            debug!("connector released on its start tile; discarded");
            return Vec::new();
        }
        let end = endpoint(scene, tile);
        let id = ConnectorId::new(self.ids.next_id("connector"));
        let anchors = vec![
            ConnectorAnchor::new(AnchorId::new(self.ids.next_id("anchor")), preview.start),
            ConnectorAnchor::new(AnchorId::new(self.ids.next_id("anchor")), end),
        ];
        let mut connector = Connector::new(id, anchors);
        connector.color = scene.model().colors.first().map(|color| color.id.clone());
        vec![Mutation::CreateConnector {
            view: scene.view().id.clone(),
            connector,
        }]
    }
}

/// The anchor a connector gets at `tile`: the item there, else the tile.
fn endpoint(scene: &Scene<'_>, tile: Tile) -> AnchorRef {
    match scene.item_at_tile(tile) {
        Some(SceneRef::Item(id)) => AnchorRef::Item(id),
        _ => AnchorRef::Tile(tile),
    }
}

fn rect_selection(scene: &Scene<'_>, from: Tile, to: Tile) -> Option<Selection> {
    let entities = scene.select_in_rect(from, to);
    (!entities.is_empty()).then_some(Selection {
        region: SelectionRegion::Rect { from, to },
        entities,
    })
}

/// Mutations moving `entities` by `(dx, dy)` tiles.
///
/// Items land on the nearest free tiles as a group, ignoring each other.
/// Rectangles move only when no item is dragged with them.
fn drag_mutations(scene: &Scene<'_>, entities: &[SceneRef], dx: i32, dy: i32) -> Vec<Mutation> {
    let view = scene.view();
    let items: Vec<_> = entities
        .iter()
        .filter_map(|entity| match entity {
            SceneRef::Item(id) => view.item(id).map(|placed| (id, placed.tile.offset(dx, dy))),
            _ => None,
        })
        .collect();

    let mut out = Vec::new();
    if !items.is_empty() {
        let targets: Vec<Tile> = items.iter().map(|(_, tile)| *tile).collect();
        match scene.find_nearest_unoccupied_group(&targets, entities) {
            Some(tiles) => out.extend(items.iter().zip(tiles).map(|((id, _), tile)| {
                Mutation::MoveItem {
                    view: view.id.clone(),
                    item: (*id).clone(),
                    tile,
                }
            })),
            None => debug!("no free tiles for {} dragged items", items.len()),
        }
    }

    for entity in entities {
        match entity {
            SceneRef::Rectangle(id) if items.is_empty() => {
                if let Some(rectangle) = view.rectangle(id) {
                    out.push(Mutation::UpdateRectangle {
                        view: view.id.clone(),
                        rectangle: Rectangle {
                            from: rectangle.from.offset(dx, dy),
                            to: rectangle.to.offset(dx, dy),
                            ..rectangle.clone()
                        },
                    });
                }
            }
            SceneRef::TextBox(id) => {
                if let Some(text_box) = view.text_box(id) {
                    out.push(Mutation::UpdateTextBox {
                        view: view.id.clone(),
                        text_box: TextBox {
                            tile: text_box.tile.offset(dx, dy),
                            ..text_box.clone()
                        },
                    });
                }
            }
            _ => {}
        }
    }
    out
}

fn preview_kind(preview: &Preview) -> &'static str {
    match preview {
        Preview::Connector(_) => "connector",
        Preview::Lasso { .. } => "lasso",
        Preview::Freehand { .. } => "freehand lasso",
    }
}
