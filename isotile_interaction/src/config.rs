// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction configuration.

use serde::{Deserialize, Serialize};

/// Tunables for pointer and viewport handling.
///
/// Every field has a default, so partial documents deserialize.
///
/// ```
/// use isotile_interaction::InteractionConfig;
///
/// let config: InteractionConfig = serde_json::from_str(r#"{ "maxZoom": 8.0 }"#).unwrap();
/// assert_eq!(config.max_zoom, 8.0);
/// assert_eq!(config.min_zoom, 0.1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionConfig {
    /// A freehand sample is kept only when it moves further than this many
    /// pixels from the previous one on either axis.
    pub freehand_throttle: f64,
    /// Smallest zoom.
    pub min_zoom: f64,
    /// Largest zoom.
    pub max_zoom: f64,
    /// Zoom change per step.
    pub zoom_step: f64,
    /// Keep the point under the cursor fixed while zooming.
    pub zoom_to_cursor: bool,
    /// Pixels scrolled per keyboard pan.
    pub pan_speed: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            freehand_throttle: 5.0,
            min_zoom: 0.1,
            max_zoom: 4.0,
            zoom_step: 0.1,
            zoom_to_cursor: true,
            pan_speed: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: InteractionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InteractionConfig::default());
    }

    #[test]
    fn camel_case_on_the_wire() {
        let value = serde_json::to_value(InteractionConfig::default()).unwrap();
        assert_eq!(value["freehandThrottle"], 5.0);
        assert_eq!(value["zoomToCursor"], true);
        assert_eq!(value["panSpeed"], 20.0);
    }
}
