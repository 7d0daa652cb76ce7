// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lasso selection over a view.
//!
//! Items and text boxes are selected by their anchor tile. Rectangles are
//! selected only when all four corners are inside the lasso. Connectors are
//! never lasso-selected.

use isotile_grid::{Tile, TileRect, region};
use kurbo::Point;

use crate::ids::{ItemId, RectangleId, TextBoxId};
use crate::model::View;
use crate::projection::Projection;

/// A selectable entity in a view.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneRef {
    /// A placed item.
    Item(ItemId),
    /// A text box.
    TextBox(TextBoxId),
    /// A rectangle.
    Rectangle(RectangleId),
}

/// Entities inside the rectangle spanned by two tiles, in any order.
///
/// Results come in view order: items, then rectangles, then text boxes.
pub fn select_in_rect(view: &View, from: Tile, to: Tile) -> Vec<SceneRef> {
    select(
        view,
        |tile| region::rect_contains(from, to, tile),
        |rect| region::rect_inside_rect(rect, from, to),
    )
}

/// Entities inside a tile polygon.
///
/// A polygon with fewer than three vertices selects nothing.
pub fn select_in_polygon(view: &View, polygon: &[Tile]) -> Vec<SceneRef> {
    if polygon.len() < 3 {
        return Vec::new();
    }
    select(
        view,
        |tile| region::contains_point(polygon, tile),
        |rect| region::rect_inside_polygon(rect, polygon),
    )
}

/// Entities inside a freehand lasso drawn in screen space.
///
/// Samples are converted to tiles through `projection`. Fewer than two samples
/// is an empty selection.
pub fn select_in_freehand(view: &View, projection: &Projection, samples: &[Point]) -> Vec<SceneRef> {
    if samples.len() < 2 {
        return Vec::new();
    }
    let polygon = projection.screen_path_to_tiles(samples);
    select_in_polygon(view, &polygon)
}

fn select(
    view: &View,
    tile_inside: impl Fn(Tile) -> bool,
    rect_inside: impl Fn(&TileRect) -> bool,
) -> Vec<SceneRef> {
    let items = view
        .items
        .iter()
        .filter(|item| tile_inside(item.tile))
        .map(|item| SceneRef::Item(item.id.clone()));
    let rectangles = view
        .rectangles
        .iter()
        .filter(|r| rect_inside(&r.bounds()))
        .map(|r| SceneRef::Rectangle(r.id.clone()));
    let text_boxes = view
        .text_boxes
        .iter()
        .filter(|t| tile_inside(t.tile))
        .map(|t| SceneRef::TextBox(t.id.clone()));
    items.chain(rectangles).chain(text_boxes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rectangle, TextBox, ViewItem};

    fn view() -> View {
        let mut view = View::new("v", "Main");
        view.items.push(ViewItem::new("in", Tile::new(1, 1)));
        view.items.push(ViewItem::new("out", Tile::new(8, 8)));
        view.rectangles
            .push(Rectangle::new("small", Tile::new(0, 0), Tile::new(2, 2)));
        view.rectangles
            .push(Rectangle::new("big", Tile::new(-1, -1), Tile::new(6, 6)));
        view.text_boxes
            .push(TextBox::new("note", Tile::new(3, 0), "hello"));
        view
    }

    #[test]
    fn rect_lasso_takes_whole_rectangles_only() {
        let got = select_in_rect(&view(), Tile::new(4, 4), Tile::new(0, 0));
        assert_eq!(
            got,
            [
                SceneRef::Item("in".into()),
                SceneRef::Rectangle("small".into()),
                SceneRef::TextBox("note".into()),
            ]
        );
    }

    #[test]
    fn polygon_lasso() {
        let triangle = [Tile::new(-2, -2), Tile::new(10, -2), Tile::new(-2, 10)];
        let got = select_in_polygon(&view(), &triangle);
        assert!(got.contains(&SceneRef::Item("in".into())));
        assert!(!got.contains(&SceneRef::Item("out".into())));
        assert!(got.contains(&SceneRef::TextBox("note".into())));
    }

    #[test]
    fn degenerate_lassos_select_nothing() {
        let v = view();
        assert!(select_in_polygon(&v, &[Tile::new(0, 0), Tile::new(5, 5)]).is_empty());
        let p = Projection::default();
        assert!(select_in_freehand(&v, &p, &[]).is_empty());
        assert!(select_in_freehand(&v, &p, &[Point::new(3.0, 3.0)]).is_empty());
    }

    #[test]
    fn freehand_lasso_goes_through_the_projection() {
        let v = view();
        let p = Projection::default();
        let corners = [
            Tile::new(-1, -1),
            Tile::new(4, -1),
            Tile::new(4, 4),
            Tile::new(-1, 4),
        ];
        let samples: Vec<Point> = corners.iter().map(|t| p.tile_to_screen(*t)).collect();
        let got = select_in_freehand(&v, &p, &samples);
        assert!(got.contains(&SceneRef::Item("in".into())));
        assert!(!got.contains(&SceneRef::Item("out".into())));
    }
}
