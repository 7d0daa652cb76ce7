// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive tile-space types and helpers.

use core::fmt;

/// One cell of the isometric grid, addressed by integer coordinates.
///
/// Equality is exact integer equality. The grid is unbounded; arithmetic
/// saturates at the `i32` limits instead of wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// Position along the first isometric axis.
    pub x: i32,
    /// Position along the second isometric axis.
    pub y: i32,
}

impl Tile {
    /// The tile at `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a tile from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The tile `(dx, dy)` steps away from this one.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Ring distance: the larger of the per-axis distances.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Sum of the per-axis distances.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

impl From<(i32, i32)> for Tile {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned tile region, inclusive on both corners.
///
/// Build one with [`TileRect::from_corners`]; the corners a user drags out
/// need not be ordered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRect {
    /// Corner with the smallest coordinates.
    pub min: Tile,
    /// Corner with the largest coordinates.
    pub max: Tile,
}

impl TileRect {
    /// A single-tile region.
    pub const fn single(tile: Tile) -> Self {
        Self {
            min: tile,
            max: tile,
        }
    }

    /// Normalize two opposite corners into a region.
    pub fn from_corners(from: Tile, to: Tile) -> Self {
        Self {
            min: Tile::new(from.x.min(to.x), from.y.min(to.y)),
            max: Tile::new(from.x.max(to.x), from.y.max(to.y)),
        }
    }

    /// The smallest region covering every tile, or `None` for no tiles.
    pub fn bounding<I: IntoIterator<Item = Tile>>(tiles: I) -> Option<Self> {
        let mut it = tiles.into_iter();
        let first = it.next()?;
        Some(it.fold(Self::single(first), Self::include))
    }

    /// Whether the tile lies inside the region (edges included).
    pub fn contains(&self, tile: Tile) -> bool {
        self.min.x <= tile.x && tile.x <= self.max.x && self.min.y <= tile.y && tile.y <= self.max.y
    }

    /// Whether `other` lies entirely inside this region.
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Grow the region to cover `tile`.
    #[must_use]
    pub fn include(self, tile: Tile) -> Self {
        Self {
            min: Tile::new(self.min.x.min(tile.x), self.min.y.min(tile.y)),
            max: Tile::new(self.max.x.max(tile.x), self.max.y.max(tile.y)),
        }
    }

    /// The smallest region covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        self.include(other.min).include(other.max)
    }

    /// The four corners: min, `(max.x, min.y)`, max, `(min.x, max.y)`.
    pub fn corners(&self) -> [Tile; 4] {
        [
            self.min,
            Tile::new(self.max.x, self.min.y),
            self.max,
            Tile::new(self.min.x, self.max.y),
        ]
    }

    /// Number of tiles along x.
    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x).saturating_add(1)
    }

    /// Number of tiles along y.
    pub fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y).saturating_add(1)
    }
}
