// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene configuration.

use isotile_grid::Occupant;
use serde::{Deserialize, Serialize};

/// Tunables for scene geometry and queries.
///
/// Every field has a default, so partial documents deserialize.
///
/// ```
/// use isotile_scene::SceneConfig;
///
/// let config: SceneConfig = serde_json::from_str(r#"{ "maxSearchRadius": 4 }"#).unwrap();
/// assert_eq!(config.max_search_radius, 4);
/// assert_eq!(config.tile_size, 100.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    /// Side of a tile in unprojected (path space) pixels.
    pub tile_size: f64,
    /// Projected tile width as a multiple of `tile_size`.
    pub projected_width_factor: f64,
    /// Projected tile height as a multiple of `tile_size`.
    pub projected_height_factor: f64,
    /// Last ring searched for a free tile.
    pub max_search_radius: u32,
    /// Which entities block placement.
    pub blocking: BlockingKinds,
    /// Width of one character as a multiple of the font size, for text extents.
    pub text_char_width: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tile_size: 100.0,
            projected_width_factor: 1.415,
            projected_height_factor: 0.819,
            max_search_radius: 10,
            blocking: BlockingKinds::default(),
            text_char_width: 0.6,
        }
    }
}

/// Entity kinds that make a tile count as occupied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockingKinds {
    /// Placed items.
    pub items: bool,
    /// Text boxes, over their whole extent.
    pub text_boxes: bool,
    /// Rectangles, over their whole region.
    pub rectangles: bool,
}

impl Default for BlockingKinds {
    fn default() -> Self {
        Self {
            items: true,
            text_boxes: true,
            rectangles: false,
        }
    }
}

impl BlockingKinds {
    /// The occupant mask for the occupancy index.
    pub fn mask(self) -> Occupant {
        let mut mask = Occupant::empty();
        mask.set(Occupant::ITEM, self.items);
        mask.set(Occupant::TEXT_BOX, self.text_boxes);
        mask.set(Occupant::RECTANGLE, self.rectangles);
        mask
    }
}
