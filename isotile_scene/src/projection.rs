// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile space, screen space, and path space.
//!
//! - Tile space: integer `(x, y)` grid cells.
//! - Screen space: pixels after the isometric projection, the zoom, and the
//!   scroll translation, in that order. Screen y grows downward.
//! - Path space: unprojected square pixels relative to a connector's bounding
//!   tile, used to lay out connector polylines before the renderer skews them.
//!
//! Tile axis X projects to `(+w/2, -h/2)` and tile axis Y to `(-w/2, -h/2)`,
//! where `w`/`h` are the projected tile width/height. The mapping is a single
//! [`Affine`], so the inverse is exact up to floating point.

use isotile_grid::{Tile, TileRect};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::config::SceneConfig;

/// Tile dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileMetrics {
    /// Side of a tile before projection.
    pub tile_size: f64,
    /// Projected tile width.
    pub width: f64,
    /// Projected tile height.
    pub height: f64,
}

impl TileMetrics {
    /// 100 px tiles projected to 141.5 × 81.9 px.
    pub const DEFAULT: Self = Self {
        tile_size: 100.0,
        width: 141.5,
        height: 81.9,
    };

    /// Metrics described by a configuration.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            tile_size: config.tile_size,
            width: config.tile_size * config.projected_width_factor,
            height: config.tile_size * config.projected_height_factor,
        }
    }

    /// The isometric projection from tile space to unzoomed, unscrolled pixels.
    pub fn iso(&self) -> Affine {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        Affine::new([hw, -hh, -hw, -hh, 0.0, 0.0])
    }
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Zoom and scroll state of a viewport.
///
/// Zoom must be positive; a zero zoom has no inverse and maps every point to
/// tile `(0, 0)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Uniform scale applied after projection.
    pub zoom: f64,
    /// Pixel translation applied after zoom.
    pub scroll: Vec2,
    /// Tile dimensions.
    pub metrics: TileMetrics,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(1.0, Vec2::ZERO)
    }
}

impl Projection {
    /// A projection with default tile metrics.
    pub fn new(zoom: f64, scroll: Vec2) -> Self {
        Self {
            zoom,
            scroll,
            metrics: TileMetrics::DEFAULT,
        }
    }

    /// Replace the tile metrics.
    pub fn with_metrics(mut self, metrics: TileMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The full tile-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.scroll) * Affine::scale(self.zoom) * self.metrics.iso()
    }

    /// Screen position of a tile's center.
    pub fn tile_to_screen(&self, tile: Tile) -> Point {
        self.transform() * tile_point(tile)
    }

    /// Fractional tile coordinates under a screen point.
    pub fn screen_to_tile_fractional(&self, point: Point) -> Point {
        self.transform().inverse() * point
    }

    /// The tile whose center is nearest to a screen point.
    ///
    /// Candidates are the four lattice tiles around the fractional inverse;
    /// the one with the smallest pixel distance wins, exact ties going to the
    /// smaller `(x, y)`. Does not allocate.
    pub fn screen_to_tile(&self, point: Point) -> Tile {
        let to_screen = self.transform();
        let f = to_screen.inverse() * point;
        let (x0, y0) = (saturate(f.x.floor()), saturate(f.y.floor()));
        let mut best = Tile::new(x0, y0);
        let mut best_dist = f64::INFINITY;
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let tile = Tile::new(x0.saturating_add(dx), y0.saturating_add(dy));
            let dist = (to_screen * tile_point(tile) - point).hypot2();
            if dist < best_dist || (dist == best_dist && tile < best) {
                best = tile;
                best_dist = dist;
            }
        }
        best
    }

    /// Convert pointer samples to a tile polygon, dropping repeated tiles.
    pub fn screen_path_to_tiles(&self, points: &[Point]) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = Vec::with_capacity(points.len());
        for point in points {
            let tile = self.screen_to_tile(*point);
            if tiles.last() != Some(&tile) {
                tiles.push(tile);
            }
        }
        tiles
    }

    /// Screen-space bounding box of a tile region, covering whole tiles.
    pub fn tile_rect_to_screen(&self, rect: &TileRect) -> Rect {
        let to_screen = self.transform();
        let min = Point::new(f64::from(rect.min.x) - 0.5, f64::from(rect.min.y) - 0.5);
        let max = Point::new(f64::from(rect.max.x) + 0.5, f64::from(rect.max.y) + 0.5);
        let corners = [min, Point::new(max.x, min.y), max, Point::new(min.x, max.y)];
        let first = to_screen * corners[0];
        corners[1..].iter().fold(Rect::from_points(first, first), |r, p| {
            r.union_pt(to_screen * *p)
        })
    }

    /// Position of a tile center in path space, relative to `origin`.
    pub fn tile_to_path_space(&self, tile: Tile, origin: Tile) -> Point {
        tile_to_path_space(tile, origin, self.metrics.tile_size)
    }

    /// The same view at a new zoom, keeping the pixel under `cursor` fixed.
    pub fn zoom_at(&self, zoom: f64, cursor: Point) -> Self {
        let anchor = (cursor.to_vec2() - self.scroll) / self.zoom;
        Self {
            zoom,
            scroll: cursor.to_vec2() - anchor * zoom,
            metrics: self.metrics,
        }
    }

    /// The same view scrolled by `delta` pixels.
    pub fn pan_by(&self, delta: Vec2) -> Self {
        Self {
            scroll: self.scroll + delta,
            ..*self
        }
    }
}

/// Screen position of a tile with default metrics.
pub fn tile_to_screen(tile: Tile, zoom: f64, scroll: Vec2) -> Point {
    Projection::new(zoom, scroll).tile_to_screen(tile)
}

/// Nearest tile to a screen point with default metrics.
pub fn screen_to_tile(point: Point, zoom: f64, scroll: Vec2) -> Tile {
    Projection::new(zoom, scroll).screen_to_tile(point)
}

/// Position of a tile center in path space, relative to `origin`.
///
/// Path space is unprojected: each tile is a `tile_size` square and the point
/// is its center.
pub fn tile_to_path_space(tile: Tile, origin: Tile, tile_size: f64) -> Point {
    let dx = f64::from(tile.x) - f64::from(origin.x);
    let dy = f64::from(tile.y) - f64::from(origin.y);
    Point::new(
        dx * tile_size + tile_size / 2.0,
        dy * tile_size + tile_size / 2.0,
    )
}

fn tile_point(tile: Tile) -> Point {
    Point::new(f64::from(tile.x), f64::from(tile.y))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate, and the input is already floored"
)]
fn saturate(v: f64) -> i32 {
    v as i32
}
