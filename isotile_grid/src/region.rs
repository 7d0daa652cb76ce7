// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containment tests for rectangular and freehand lasso regions.
//!
//! All tests work on tile coordinates. Degenerate input is an empty region:
//! a polygon with fewer than three vertices contains nothing.

use crate::types::{Tile, TileRect};

/// Whether `point` lies inside the polygon, by ray casting (odd-crossing rule).
///
/// The polygon is closed implicitly from the last vertex back to the first.
/// Fewer than three vertices always yields `false`.
///
/// ```
/// use isotile_grid::{Tile, region::contains_point};
///
/// let square = [Tile::new(0, 0), Tile::new(4, 0), Tile::new(4, 4), Tile::new(0, 4)];
/// assert!(contains_point(&square, Tile::new(2, 2)));
/// assert!(!contains_point(&square, Tile::new(5, 5)));
/// ```
pub fn contains_point(polygon: &[Tile], point: Tile) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let x = f64::from(point.x);
    let y = f64::from(point.y);
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = (f64::from(polygon[i].x), f64::from(polygon[i].y));
        let (xj, yj) = (f64::from(polygon[j].x), f64::from(polygon[j].y));
        // The straddle check guarantees yj != yi before dividing.
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether `point` lies inside the region spanned by two corners, in any order.
pub fn rect_contains(from: Tile, to: Tile, point: Tile) -> bool {
    TileRect::from_corners(from, to).contains(point)
}

/// Whether all four corners of `rect` lie inside the polygon.
pub fn rect_inside_polygon(rect: &TileRect, polygon: &[Tile]) -> bool {
    rect.corners()
        .into_iter()
        .all(|corner| contains_point(polygon, corner))
}

/// Whether `inner` lies entirely inside the region spanned by `from` and `to`.
pub fn rect_inside_rect(inner: &TileRect, from: Tile, to: Tile) -> bool {
    TileRect::from_corners(from, to).contains_rect(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> [Tile; 4] {
        [
            Tile::new(0, 0),
            Tile::new(4, 0),
            Tile::new(4, 4),
            Tile::new(0, 4),
        ]
    }

    #[test]
    fn square_contains_center_not_outside() {
        assert!(contains_point(&square(), Tile::new(2, 2)));
        assert!(!contains_point(&square(), Tile::new(5, 5)));
        assert!(!contains_point(&square(), Tile::new(-1, 2)));
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        assert!(!contains_point(&[], Tile::ORIGIN));
        assert!(!contains_point(&[Tile::ORIGIN], Tile::ORIGIN));
        assert!(!contains_point(
            &[Tile::new(0, 0), Tile::new(4, 4)],
            Tile::new(2, 2)
        ));
    }

    #[test]
    fn concave_polygon() {
        // A "U" opening upwards; the notch between the arms is outside.
        let u = [
            Tile::new(0, 0),
            Tile::new(6, 0),
            Tile::new(6, 6),
            Tile::new(4, 6),
            Tile::new(4, 2),
            Tile::new(2, 2),
            Tile::new(2, 6),
            Tile::new(0, 6),
        ];
        assert!(contains_point(&u, Tile::new(1, 4)));
        assert!(contains_point(&u, Tile::new(5, 4)));
        assert!(!contains_point(&u, Tile::new(3, 4)));
    }

    #[test]
    fn rect_contains_unordered_corners() {
        assert!(rect_contains(Tile::new(0, 0), Tile::new(2, 2), Tile::new(1, 1)));
        assert!(rect_contains(Tile::new(2, 2), Tile::new(0, 0), Tile::new(1, 1)));
        assert!(rect_contains(Tile::new(2, 0), Tile::new(0, 2), Tile::new(2, 2)));
        assert!(!rect_contains(Tile::new(2, 2), Tile::new(0, 0), Tile::new(3, 1)));
    }

    #[test]
    fn zero_area_rect_contains_its_tile() {
        assert!(rect_contains(Tile::new(3, 3), Tile::new(3, 3), Tile::new(3, 3)));
        assert!(!rect_contains(Tile::new(3, 3), Tile::new(3, 3), Tile::new(3, 4)));
    }

    #[test]
    fn rect_inside_polygon_needs_every_corner() {
        let big = [
            Tile::new(-10, -10),
            Tile::new(10, -10),
            Tile::new(10, 10),
            Tile::new(-10, 10),
        ];
        let inner = TileRect::from_corners(Tile::new(-2, -2), Tile::new(3, 3));
        let straddling = TileRect::from_corners(Tile::new(5, 5), Tile::new(12, 6));
        assert!(rect_inside_polygon(&inner, &big));
        assert!(!rect_inside_polygon(&straddling, &big));
        assert!(rect_inside_rect(&inner, Tile::new(4, 4), Tile::new(-4, -4)));
        assert!(!rect_inside_rect(&straddling, Tile::new(4, 4), Tile::new(-4, -4)));
    }

    proptest! {
        #[test]
        fn rect_contains_ignores_corner_order(
            ax in -50..50_i32, ay in -50..50_i32,
            bx in -50..50_i32, by in -50..50_i32,
            px in -60..60_i32, py in -60..60_i32,
        ) {
            let a = Tile::new(ax, ay);
            let b = Tile::new(bx, by);
            let p = Tile::new(px, py);
            prop_assert_eq!(rect_contains(a, b, p), rect_contains(b, a, p));
            prop_assert_eq!(
                rect_contains(a, b, p),
                rect_contains(Tile::new(ax, by), Tile::new(bx, ay), p)
            );
        }
    }
}
