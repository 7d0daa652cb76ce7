// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile occupancy: which entities sit on which tiles, and where the nearest free tile is.
//!
//! The index is a derived snapshot. Build it from the current scene, query it,
//! and build a new one after the scene changes; it has no update operations.
//!
//! Single-tile occupants (items) live in an ordered map keyed by tile.
//! Multi-tile occupants (rectangles, text boxes) are kept as regions and tested
//! with a linear scan, which keeps large rectangles cheap to insert.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt::Debug;

use log::{debug, trace};

use crate::ring::ring;
use crate::types::{Tile, TileRect};

bitflags::bitflags! {
    /// Kinds of scene entities that can occupy a tile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Occupant: u8 {
        /// A placed node (view item).
        const ITEM      = 0b0000_0001;
        /// A text box.
        const TEXT_BOX  = 0b0000_0010;
        /// A background rectangle.
        const RECTANGLE = 0b0000_0100;
    }
}

impl Occupant {
    /// Kinds that block placement unless configured otherwise.
    pub const DEFAULT_BLOCKING: Self = Self::ITEM.union(Self::TEXT_BOX);

    /// Stacking rank; lower is drawn on top.
    fn rank(self) -> u8 {
        if self.contains(Self::ITEM) {
            0
        } else if self.contains(Self::TEXT_BOX) {
            1
        } else {
            2
        }
    }
}

impl Default for Occupant {
    fn default() -> Self {
        Self::DEFAULT_BLOCKING
    }
}

/// Mapping from tiles to the entities anchored there.
pub struct OccupancyIndex<K> {
    tiles: BTreeMap<Tile, Vec<(Occupant, K)>>,
    regions: Vec<(TileRect, Occupant, K)>,
    blocking: Occupant,
}

impl<K> Default for OccupancyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Debug for OccupancyIndex<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OccupancyIndex")
            .field("tiles", &self.tiles.len())
            .field("regions", &self.regions.len())
            .field("blocking", &self.blocking)
            .finish_non_exhaustive()
    }
}

impl<K> OccupancyIndex<K> {
    /// Create an empty index that blocks on [`Occupant::DEFAULT_BLOCKING`].
    pub fn new() -> Self {
        Self::with_blocking(Occupant::DEFAULT_BLOCKING)
    }

    /// Create an empty index that blocks on the given kinds.
    pub fn with_blocking(blocking: Occupant) -> Self {
        Self {
            tiles: BTreeMap::new(),
            regions: Vec::new(),
            blocking,
        }
    }

    /// Kinds that make a tile count as occupied for [`Self::is_occupied`].
    pub fn blocking(&self) -> Occupant {
        self.blocking
    }

    /// Record an entity sitting on a single tile.
    pub fn insert_tile(&mut self, tile: Tile, kind: Occupant, key: K) {
        self.tiles.entry(tile).or_default().push((kind, key));
    }

    /// Record an entity covering a tile region.
    pub fn insert_region(&mut self, rect: TileRect, kind: Occupant, key: K) {
        self.regions.push((rect, kind, key));
    }

    /// Remove every entry, keeping the blocking mask.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.regions.clear();
    }

    /// Total number of recorded entities.
    pub fn len(&self) -> usize {
        self.tiles.values().map(Vec::len).sum::<usize>() + self.regions.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.regions.is_empty()
    }

    /// Entities at `tile`, topmost first: items, then text boxes, then rectangles.
    ///
    /// Within one kind, entities keep their insertion order.
    pub fn occupants_at(&self, tile: Tile) -> Vec<(Occupant, &K)> {
        let mut out: Vec<(Occupant, &K)> = self
            .tiles
            .get(&tile)
            .into_iter()
            .flatten()
            .map(|(kind, key)| (*kind, key))
            .chain(
                self.regions
                    .iter()
                    .filter(|(rect, _, _)| rect.contains(tile))
                    .map(|(_, kind, key)| (*kind, key)),
            )
            .collect();
        out.sort_by_key(|(kind, _)| kind.rank());
        out
    }

    /// Union of the kinds present at `tile`.
    pub fn kinds_at(&self, tile: Tile) -> Occupant {
        let mut kinds = Occupant::empty();
        if let Some(entries) = self.tiles.get(&tile) {
            for (kind, _) in entries {
                kinds |= *kind;
            }
        }
        for (rect, kind, _) in &self.regions {
            if rect.contains(tile) {
                kinds |= *kind;
            }
        }
        kinds
    }

    /// Whether a blocking entity sits on `tile`.
    pub fn is_occupied(&self, tile: Tile) -> bool {
        self.is_occupied_by(tile, self.blocking)
    }

    /// Whether any entity of the given kinds sits on `tile`.
    pub fn is_occupied_by(&self, tile: Tile, mask: Occupant) -> bool {
        self.kinds_at(tile).intersects(mask)
    }

    /// The closest tile to `origin` that is not occupied, searching rings of
    /// growing radius.
    ///
    /// Ring 0 is `origin` itself. Within a ring, tiles are visited in the fixed
    /// clockwise order of [`ring`](crate::ring::ring), so repeated calls over the same
    /// index return the same tile. Returns `None` when every ring up to and
    /// including `max_radius` is full.
    pub fn find_nearest_unoccupied(&self, origin: Tile, max_radius: u32) -> Option<Tile> {
        for radius in 0..=max_radius {
            if let Some(tile) = ring(origin, radius).find(|t| !self.is_occupied(*t)) {
                trace!("free tile {tile} found at radius {radius} from {origin}");
                return Some(tile);
            }
        }
        debug!("no free tile within radius {max_radius} of {origin}");
        None
    }

    /// Free tiles for several entities placed at once.
    ///
    /// Targets are placed in order; each placed tile counts as occupied for the
    /// targets after it. Entities for which `excluded` returns true do not block
    /// (typically the entities being moved). Returns `None` if any target has
    /// no free tile within `max_radius`.
    pub fn find_nearest_unoccupied_group<F>(
        &self,
        targets: &[Tile],
        max_radius: u32,
        mut excluded: F,
    ) -> Option<Vec<Tile>>
    where
        F: FnMut(&K) -> bool,
    {
        let mut placed = BTreeSet::new();
        let mut out = Vec::with_capacity(targets.len());
        for &target in targets {
            let mut found = None;
            'rings: for radius in 0..=max_radius {
                for tile in ring(target, radius) {
                    if !placed.contains(&tile) && !self.blocked_excluding(tile, &mut excluded) {
                        found = Some(tile);
                        break 'rings;
                    }
                }
            }
            let Some(tile) = found else {
                debug!("group placement failed for target {target} within radius {max_radius}");
                return None;
            };
            placed.insert(tile);
            out.push(tile);
        }
        Some(out)
    }

    fn blocked_excluding<F>(&self, tile: Tile, excluded: &mut F) -> bool
    where
        F: FnMut(&K) -> bool,
    {
        let blocking = self.blocking;
        let on_tile = self
            .tiles
            .get(&tile)
            .into_iter()
            .flatten()
            .any(|(kind, key)| kind.intersects(blocking) && !excluded(key));
        on_tile
            || self.regions.iter().any(|(rect, kind, key)| {
                kind.intersects(blocking) && rect.contains(tile) && !excluded(key)
            })
    }
}
