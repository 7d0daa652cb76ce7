// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor resolution.
//!
//! An anchor reference resolves to a tile by lookup into the current view.
//! Nothing is cached: resolve again after every mutation, since the item an
//! anchor points at may have moved.

use isotile_grid::Tile;
use log::trace;

use crate::error::Dangling;
use crate::ids::AnchorId;
use crate::model::{AnchorRef, Connector, View};

/// A named side of an item.
///
/// Each sub-anchor sits on the tile adjacent to the item on that side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SubAnchor {
    /// The `+y` neighbor.
    Top,
    /// The `+x` neighbor.
    Right,
    /// The `-y` neighbor.
    Bottom,
    /// The `-x` neighbor.
    Left,
}

impl SubAnchor {
    /// Every sub-anchor, clockwise from the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Parse a stored sub-anchor name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "right" => Some(Self::Right),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            _ => None,
        }
    }

    /// The name written to documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// Tile offset from the item's tile.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Top => (0, 1),
            Self::Right => (1, 0),
            Self::Bottom => (0, -1),
            Self::Left => (-1, 0),
        }
    }

    /// The sub-anchor's tile for an item at `item`.
    pub fn tile_for(self, item: Tile) -> Tile {
        let (dx, dy) = self.offset();
        item.offset(dx, dy)
    }
}

/// Resolve an anchor reference against a view.
///
/// Anchor-to-anchor references are followed until they reach an item or a
/// tile. A chain that revisits an anchor is [`Dangling::Cycle`].
///
/// ```
/// use isotile_grid::Tile;
/// use isotile_scene::anchor::resolve;
/// use isotile_scene::{AnchorRef, Dangling, ItemId, View, ViewItem};
///
/// let mut view = View::new("v", "Main");
/// view.items.push(ViewItem::new("db", Tile::new(3, 2)));
///
/// let item = AnchorRef::Item(ItemId::new("db"));
/// assert_eq!(resolve(&item, &view), Ok(Tile::new(3, 2)));
///
/// let side = AnchorRef::ItemAnchor { item: ItemId::new("db"), anchor: "right".into() };
/// assert_eq!(resolve(&side, &view), Ok(Tile::new(4, 2)));
///
/// let gone = AnchorRef::Item(ItemId::new("cache"));
/// assert!(matches!(resolve(&gone, &view), Err(Dangling::MissingItem(_))));
/// ```
pub fn resolve<'a>(reference: &'a AnchorRef, view: &'a View) -> Result<Tile, Dangling> {
    let mut visited: Vec<&'a AnchorId> = Vec::new();
    let mut current = reference;
    loop {
        match current {
            AnchorRef::Tile(tile) => return Ok(*tile),
            AnchorRef::Item(item) => {
                return view
                    .item(item)
                    .map(|placed| placed.tile)
                    .ok_or_else(|| Dangling::MissingItem(item.clone()));
            }
            AnchorRef::ItemAnchor { item, anchor } => {
                let placed = view
                    .item(item)
                    .ok_or_else(|| Dangling::MissingItem(item.clone()))?;
                let sub = SubAnchor::from_name(anchor).ok_or_else(|| {
                    Dangling::UnknownSubAnchor {
                        item: item.clone(),
                        name: anchor.clone(),
                    }
                })?;
                return Ok(sub.tile_for(placed.tile));
            }
            AnchorRef::Anchor(id) => {
                if visited.contains(&id) {
                    return Err(Dangling::Cycle(id.clone()));
                }
                visited.push(id);
                let target = view
                    .anchor(id)
                    .ok_or_else(|| Dangling::MissingAnchor(id.clone()))?;
                trace!("following anchor `{id}`");
                current = &target.reference;
            }
        }
    }
}

/// Resolve every anchor of a connector, in order.
pub fn resolve_connector<'c>(
    connector: &'c Connector,
    view: &View,
) -> impl Iterator<Item = (&'c AnchorId, Result<Tile, Dangling>)> {
    connector
        .anchors
        .iter()
        .map(move |anchor| (&anchor.id, resolve(&anchor.reference, view)))
}
