// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic square-ring scan around a tile.

use crate::types::Tile;

const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Iterator over the tiles at exactly one ring distance from an origin.
///
/// See [`ring`].
#[derive(Clone, Debug)]
pub struct Ring {
    origin: Tile,
    side_len: i32,
    side: usize,
    step: i32,
    current: Tile,
    started: bool,
}

/// Tiles at Chebyshev distance `radius` from `origin`, in a fixed order.
///
/// Radius 0 yields `origin` alone. For larger radii the walk starts at the
/// top-left corner `(x - r, y - r)` without yielding it, then steps right along
/// the top edge, down the right edge, left along the bottom edge, and up the
/// left edge, ending on the corner. Each ring yields `8 * r` tiles.
///
/// ```
/// use isotile_grid::{Tile, ring::ring};
///
/// let r1: Vec<_> = ring(Tile::ORIGIN, 1).collect();
/// assert_eq!(r1.len(), 8);
/// assert_eq!(r1[0], Tile::new(0, -1));
/// assert_eq!(r1[7], Tile::new(-1, -1));
/// ```
pub fn ring(origin: Tile, radius: u32) -> Ring {
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    Ring {
        origin,
        side_len: r.saturating_mul(2),
        side: 0,
        step: 0,
        current: origin.offset(-r, -r),
        started: false,
    }
}

impl Iterator for Ring {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.side_len == 0 {
            if self.started {
                return None;
            }
            self.started = true;
            return Some(self.origin);
        }
        let &(dx, dy) = DIRECTIONS.get(self.side)?;
        self.current = self.current.offset(dx, dy);
        self.step += 1;
        if self.step == self.side_len {
            self.step = 0;
            self.side += 1;
        }
        Some(self.current)
    }
}
