// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isotile Grid: the integer tile space underneath an isometric scene.
//!
//! Isotile Grid is the leaf layer of the isotile workspace. It knows nothing
//! about pixels, projections, or diagram entities; everything here is integer
//! tile coordinates.
//!
//! - [`Tile`] and [`TileRect`]: grid cells and inclusive, normalized regions.
//! - [`OccupancyIndex`]: which entities sit on which tiles, with a
//!   deterministic nearest-free-tile search over growing rings.
//! - [`region`]: point-in-polygon (ray casting) and rectangle containment for
//!   lasso selection.
//!
//! Higher layers (like the scene facade) rebuild the occupancy index from
//! their current snapshot and run queries against it.
//!
//! # Example
//!
//! ```rust
//! use isotile_grid::{Occupant, OccupancyIndex, Tile, TileRect};
//!
//! let mut idx: OccupancyIndex<&str> = OccupancyIndex::new();
//! idx.insert_tile(Tile::new(0, 0), Occupant::ITEM, "server");
//! idx.insert_region(
//!     TileRect::from_corners(Tile::new(-3, -3), Tile::new(3, 3)),
//!     Occupant::RECTANGLE,
//!     "zone",
//! );
//!
//! // Items block placement, rectangles do not.
//! assert!(idx.is_occupied(Tile::new(0, 0)));
//! assert!(!idx.is_occupied(Tile::new(1, 1)));
//!
//! // The nearest free tile is on ring 1, in a fixed scan order.
//! let free = idx.find_nearest_unoccupied(Tile::new(0, 0), 10).unwrap();
//! assert_eq!(free.chebyshev_distance(Tile::new(0, 0)), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `serde` feature to
//! serialize tiles and regions.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod occupancy;
pub mod region;
pub mod ring;
pub mod types;

pub use occupancy::{OccupancyIndex, Occupant};
pub use ring::{Ring, ring};
pub use types::{Tile, TileRect};
