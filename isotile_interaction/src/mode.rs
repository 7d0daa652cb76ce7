// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modes, previews, and selections.

use isotile_grid::{Tile, TileRect, region};
use isotile_scene::geometry::smooth_closed_path;
use isotile_scene::{AnchorRef, Projection, SceneRef};
use kurbo::{BezPath, Point};

/// What pointer input does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Click selects, drag on an entity moves it, drag on empty space pans.
    #[default]
    Cursor,
    /// Drag scrolls the canvas.
    Pan,
    /// Drag draws a new connector.
    Connector,
    /// Drag spans a rectangular selection.
    Lasso,
    /// Drag draws a freehand selection outline.
    FreehandLasso,
    /// Drag moves the current selection.
    DragItems,
}

/// An in-progress connector.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorPreview {
    /// Where the connector starts.
    pub start: AnchorRef,
    /// Tile of `start`.
    pub start_tile: Tile,
    /// Where the connector would end if released now.
    pub end: AnchorRef,
    /// Tile of `end`.
    pub end_tile: Tile,
    /// Routed path from `start_tile` to `end_tile`.
    pub tiles: Vec<Tile>,
}

/// Transient geometry drawn while a gesture is in progress.
///
/// A preview is never persisted. Switching modes discards it.
#[derive(Clone, Debug, PartialEq)]
pub enum Preview {
    /// A connector being drawn.
    Connector(ConnectorPreview),
    /// A rectangular lasso between two tiles.
    Lasso {
        /// Tile the drag started on.
        from: Tile,
        /// Tile under the pointer.
        to: Tile,
    },
    /// A freehand lasso, as throttled screen samples.
    Freehand {
        /// Samples in screen pixels.
        samples: Vec<Point>,
    },
}

impl Preview {
    /// Screen-space outline of a lasso preview; `None` for connectors.
    pub fn outline(&self, projection: &Projection) -> Option<BezPath> {
        match self {
            Self::Connector(_) => None,
            Self::Lasso { from, to } => {
                let corners = TileRect::from_corners(*from, *to)
                    .corners()
                    .map(|tile| projection.tile_to_screen(tile));
                let mut path = BezPath::new();
                path.move_to(corners[0]);
                for corner in &corners[1..] {
                    path.line_to(*corner);
                }
                path.close_path();
                Some(path)
            }
            Self::Freehand { samples } => Some(smooth_closed_path(samples)),
        }
    }
}

/// The area a lasso selection was made with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionRegion {
    /// No area; the selection came from a click.
    Click,
    /// A rectangle between two tiles.
    Rect {
        /// One corner.
        from: Tile,
        /// The opposite corner.
        to: Tile,
    },
    /// A tile polygon from a freehand lasso.
    Polygon(Vec<Tile>),
}

/// Selected entities and the region that selected them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// The lasso region, if any.
    pub region: SelectionRegion,
    /// Selected entities in selection order.
    pub entities: Vec<SceneRef>,
}

impl Selection {
    /// A selection made by clicking one entity.
    pub fn single(entity: SceneRef) -> Self {
        Self {
            region: SelectionRegion::Click,
            entities: vec![entity],
        }
    }

    /// Whether pressing on `tile` grabs this selection.
    ///
    /// True inside the lasso region, or on a tile holding a selected entity.
    pub fn grabs(&self, tile: Tile, under_pointer: Option<&SceneRef>) -> bool {
        let in_region = match &self.region {
            SelectionRegion::Click => false,
            SelectionRegion::Rect { from, to } => region::rect_contains(*from, *to, tile),
            SelectionRegion::Polygon(polygon) => region::contains_point(polygon, tile),
        };
        in_region || under_pointer.is_some_and(|entity| self.entities.contains(entity))
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
