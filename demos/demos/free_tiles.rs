// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free tile search.
//!
//! Fill a block of tiles, then ask for the nearest free tile to a point inside
//! it, and for free tiles for a group dropped onto it.
//!
//! Run:
//! - `cargo run -p isotile_demos --example free_tiles`

use isotile_grid::{OccupancyIndex, Occupant, Tile, TileRect, ring};

fn main() {
    let mut index = OccupancyIndex::new();
    for y in -2..=2 {
        for x in -2..=2 {
            index.insert_tile(Tile::new(x, y), Occupant::ITEM, format!("item {x},{y}"));
        }
    }
    // Rectangles don't block by default.
    index.insert_region(
        TileRect::from_corners(Tile::new(3, -3), Tile::new(3, 3)),
        Occupant::RECTANGLE,
        "zone".to_string(),
    );

    println!("ring 1 around origin:");
    for tile in ring(Tile::ORIGIN, 1) {
        println!("  {tile}");
    }

    let free = index
        .find_nearest_unoccupied(Tile::ORIGIN, 10)
        .expect("room within radius 10");
    println!("nearest free tile to origin: {free}");
    assert_eq!(free.chebyshev_distance(Tile::ORIGIN), 3);
    println!("  occupied by: {:?}", index.kinds_at(free));

    let group = index
        .find_nearest_unoccupied_group(&[Tile::new(2, 2), Tile::new(2, 2)], 10, |_| false)
        .expect("room for two");
    println!("two entities dropped on (2, 2) land at {} and {}", group[0], group[1]);
    assert_ne!(group[0], group[1]);

    // Nothing free within a radius that stays inside the block.
    assert_eq!(index.find_nearest_unoccupied(Tile::ORIGIN, 2), None);
}
