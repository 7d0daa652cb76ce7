// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector routing.
//!
//! Paths are orthogonal staircases over tiles: between two consecutive anchors
//! the route walks along X first, then along Y. The corner choice is fixed so
//! that the same scene always produces the same tile sequence, which label
//! placement depends on.

use core::cmp::Ordering;

use isotile_grid::{Tile, TileRect};
use log::{debug, trace};

use crate::anchor::resolve;
use crate::error::Dangling;
use crate::ids::AnchorId;
use crate::model::{Connector, ConnectorAnchor, View};

/// Longest path a single connector or preview is routed over.
pub const MAX_ROUTE_TILES: usize = 1 << 16;

/// Tiles from `from` to `to`, both included, X first then Y.
///
/// A path longer than [`MAX_ROUTE_TILES`] stops at that length and does not
/// reach `to`.
///
/// ```
/// use isotile_grid::Tile;
/// use isotile_scene::route::route;
///
/// let path = route(Tile::new(0, 0), Tile::new(2, 1));
/// assert_eq!(path, [Tile::new(0, 0), Tile::new(1, 0), Tile::new(2, 0), Tile::new(2, 1)]);
/// assert_eq!(route(Tile::new(4, 4), Tile::new(4, 4)), [Tile::new(4, 4)]);
/// ```
pub fn route(from: Tile, to: Tile) -> Vec<Tile> {
    let len = (from.manhattan_distance(to) as usize)
        .saturating_add(1)
        .min(MAX_ROUTE_TILES);
    let mut out = Vec::with_capacity(len);
    out.push(from);
    extend_route(&mut out, from, to);
    out
}

/// Append the tiles after `from` up to and including `to`.
///
/// Returns false if `out` reached [`MAX_ROUTE_TILES`] first.
fn extend_route(out: &mut Vec<Tile>, from: Tile, to: Tile) -> bool {
    let mut at = from;
    let step_x = step(at.x, to.x);
    while at.x != to.x {
        if out.len() >= MAX_ROUTE_TILES {
            return false;
        }
        at = at.offset(step_x, 0);
        out.push(at);
    }
    let step_y = step(at.y, to.y);
    while at.y != to.y {
        if out.len() >= MAX_ROUTE_TILES {
            return false;
        }
        at = at.offset(0, step_y);
        out.push(at);
    }
    true
}

fn step(from: i32, to: i32) -> i32 {
    match to.cmp(&from) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

/// Whether every anchor of a connector resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completeness {
    /// Every anchor resolved; the path reaches the last one.
    Complete,
    /// Routing stopped before `anchor`.
    Incomplete {
        /// First anchor that did not resolve.
        anchor: AnchorId,
        /// Why it did not resolve.
        reason: Dangling,
    },
    /// Routing stopped at [`MAX_ROUTE_TILES`] on the way to `anchor`.
    TooLong {
        /// Anchor the path was heading for.
        anchor: AnchorId,
    },
}

/// The routed tiles of one connector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectorPath {
    /// Tiles in path order, joints not repeated.
    pub tiles: Vec<Tile>,
    /// Whether the path reaches the last anchor.
    pub completeness: Completeness,
}

impl ConnectorPath {
    /// True if every anchor resolved.
    pub fn is_complete(&self) -> bool {
        matches!(self.completeness, Completeness::Complete)
    }

    /// Whether the path should be drawn: complete and non-empty.
    pub fn is_renderable(&self) -> bool {
        self.is_complete() && !self.tiles.is_empty()
    }

    /// Number of tiles on the path.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True if no anchor resolved.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Bounding region of the path, if it has any tiles.
    pub fn bounds(&self) -> Option<TileRect> {
        TileRect::bounding(self.tiles.iter().copied())
    }
}

/// Route through a sequence of anchors.
///
/// Stops at the last anchor that resolves and marks the path incomplete; it
/// never fails. A path that outgrows [`MAX_ROUTE_TILES`] is cut there and
/// marked [`Completeness::TooLong`].
pub fn route_anchors(anchors: &[ConnectorAnchor], view: &View) -> ConnectorPath {
    let mut tiles = Vec::new();
    let mut prev: Option<Tile> = None;
    for anchor in anchors {
        let tile = match resolve(&anchor.reference, view) {
            Ok(tile) => tile,
            Err(reason) => {
                debug!("anchor `{}` is dangling: {reason}", anchor.id);
                return ConnectorPath {
                    tiles,
                    completeness: Completeness::Incomplete {
                        anchor: anchor.id.clone(),
                        reason,
                    },
                };
            }
        };
        match prev {
            None => tiles.push(tile),
            Some(prev) => {
                if !extend_route(&mut tiles, prev, tile) {
                    debug!("route to anchor `{}` exceeds {MAX_ROUTE_TILES} tiles", anchor.id);
                    return ConnectorPath {
                        tiles,
                        completeness: Completeness::TooLong {
                            anchor: anchor.id.clone(),
                        },
                    };
                }
            }
        }
        prev = Some(tile);
    }
    ConnectorPath {
        tiles,
        completeness: Completeness::Complete,
    }
}

/// Route a connector through all its anchors.
pub fn route_connector(connector: &Connector, view: &View) -> ConnectorPath {
    let path = route_anchors(&connector.anchors, view);
    trace!(
        "connector `{}` routed over {} tiles",
        connector.id,
        path.tiles.len()
    );
    path
}
