// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector labels: legacy migration and placement along a path.
//!
//! A label's position is a percentage of the path's tile count, not of its
//! length in pixels. Re-routing that changes the tile count moves labels
//! proportionally.

use std::borrow::Cow;

use isotile_grid::Tile;
use kurbo::{Point, Vec2};

use crate::geometry::ConnectorGeometry;
use crate::ids::LabelId;
use crate::model::{Connector, ConnectorLabel, LabelLine};
use crate::route::ConnectorPath;

/// Index into a path of `path_len` tiles for a percentage position.
///
/// `round(percentage / 100 * (path_len - 1))`, clamped into the path. An
/// empty path gives 0, as does a NaN percentage.
///
/// ```
/// use isotile_scene::labels::placement_index;
///
/// assert_eq!(placement_index(11, 50.0), 5);
/// assert_eq!(placement_index(11, 0.0), 0);
/// assert_eq!(placement_index(11, 100.0), 10);
/// assert_eq!(placement_index(0, 50.0), 0);
/// ```
pub fn placement_index(path_len: usize, percentage: f64) -> usize {
    if path_len == 0 || percentage.is_nan() {
        return 0;
    }
    let last = path_len - 1;
    let fraction = percentage.clamp(0.0, 100.0) / 100.0;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "the product is clamped to 0..=last before the cast"
    )]
    let index = (fraction * last as f64).round() as usize;
    index.min(last)
}

/// The three legacy labels and the percentages they migrate to.
const LEGACY: [(&str, f64); 3] = [("start", 10.0), ("center", 50.0), ("end", 90.0)];

/// Labels the legacy fields of `connector` describe, in start, center, end order.
///
/// Empty legacy strings produce no label. Ids are `<connector>-start`,
/// `<connector>-center`, `<connector>-end`, so repeated migration is stable.
pub fn legacy_labels(connector: &Connector) -> Vec<ConnectorLabel> {
    let fields = [
        (&connector.start_label, connector.start_label_height),
        (&connector.description, connector.center_label_height),
        (&connector.end_label, connector.end_label_height),
    ];
    fields
        .into_iter()
        .zip(LEGACY)
        .filter_map(|((text, height), (slot, position))| {
            let text = text.as_deref().filter(|t| !t.is_empty())?;
            Some(ConnectorLabel {
                height,
                line: Some(LabelLine::First),
                ..ConnectorLabel::new(
                    LabelId::new(format!("{}-{slot}", connector.id)),
                    text,
                    position,
                )
            })
        })
        .collect()
}

impl Connector {
    /// Labels to display: the stored list, or the migrated legacy labels when
    /// the list is empty. Does not modify the connector.
    pub fn effective_labels(&self) -> Cow<'_, [ConnectorLabel]> {
        if self.labels.is_empty() {
            Cow::Owned(legacy_labels(self))
        } else {
            Cow::Borrowed(&self.labels)
        }
    }

    /// Move legacy labels into the label list.
    ///
    /// Runs only when the label list is empty; afterwards the legacy fields
    /// are cleared. Returns whether anything changed. Running it again is a
    /// no-op.
    pub fn migrate_legacy_labels(&mut self) -> bool {
        if !self.labels.is_empty() {
            return false;
        }
        let migrated = legacy_labels(self);
        let had_legacy = self.description.is_some()
            || self.start_label.is_some()
            || self.end_label.is_some()
            || self.start_label_height.is_some()
            || self.center_label_height.is_some()
            || self.end_label_height.is_some();
        self.labels = migrated;
        self.description = None;
        self.start_label = None;
        self.end_label = None;
        self.start_label_height = None;
        self.center_label_height = None;
        self.end_label_height = None;
        had_legacy
    }
}

/// Where a label lands on a routed connector.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
    /// The label.
    pub label: LabelId,
    /// Index into the path's tiles.
    pub index: usize,
    /// Tile at that index.
    pub tile: Tile,
    /// Path-space point on the label's line.
    pub anchor: Point,
    /// Path-space point of the label itself, `height` pixels above `anchor`.
    pub position: Point,
}

/// Place every effective label of a connector on its routed path.
///
/// Returns nothing when the path has no geometry.
pub fn place_labels(
    connector: &Connector,
    path: &ConnectorPath,
    geometry: &ConnectorGeometry,
) -> Vec<LabelPlacement> {
    connector
        .effective_labels()
        .iter()
        .filter_map(|label| {
            let index = placement_index(path.tiles.len(), label.position);
            let tile = *path.tiles.get(index)?;
            let anchor = *geometry
                .line(label.line.unwrap_or_default())
                .get(index)?;
            let lift = Vec2::new(0.0, label.height.unwrap_or(0.0));
            Some(LabelPlacement {
                label: label.id.clone(),
                index,
                tile,
                anchor,
                position: anchor - lift,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineType;
    use crate::route::Completeness;
    use proptest::prelude::*;

    fn legacy() -> Connector {
        let mut c = Connector::new("c", Vec::new());
        c.start_label = Some("A".into());
        c.description = Some("B".into());
        c.end_label = Some("C".into());
        c.center_label_height = Some(12.0);
        c
    }

    #[test]
    fn legacy_triple_migrates_to_10_50_90() {
        let mut c = legacy();
        assert!(c.migrate_legacy_labels());
        let got: Vec<_> = c
            .labels
            .iter()
            .map(|l| (l.text.as_str(), l.position))
            .collect();
        assert_eq!(got, [("A", 10.0), ("B", 50.0), ("C", 90.0)]);
        assert_eq!(c.labels[1].height, Some(12.0));
        assert_eq!(c.labels[0].id, LabelId::new("c-start"));
        assert!(c.description.is_none() && c.start_label.is_none());
    }

    #[test]
    fn migration_is_idempotent() {
        let mut once = legacy();
        once.migrate_legacy_labels();
        let mut twice = once.clone();
        assert!(!twice.migrate_legacy_labels());
        assert_eq!(once, twice);
        assert_eq!(twice.labels.len(), 3);
    }

    #[test]
    fn existing_labels_win_over_legacy_fields() {
        let mut c = legacy();
        c.labels.push(ConnectorLabel::new("mine", "X", 30.0));
        assert!(!c.migrate_legacy_labels());
        assert_eq!(c.labels.len(), 1);
        assert_eq!(c.effective_labels().len(), 1);
    }

    #[test]
    fn effective_labels_migrate_without_mutating() {
        let c = legacy();
        assert_eq!(c.effective_labels().len(), 3);
        assert!(c.labels.is_empty());
        assert!(c.start_label.is_some());
    }

    #[test]
    fn empty_legacy_text_is_skipped() {
        let mut c = Connector::new("c", Vec::new());
        c.start_label = Some(String::new());
        c.end_label = Some("end".into());
        let labels = legacy_labels(&c);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].position, 90.0);
    }

    #[test]
    fn labels_land_on_their_line() {
        let mut c = Connector::new("c", Vec::new());
        c.line_type = Some(LineType::Double);
        let mut on_second = ConnectorLabel::new("l2", "two", 100.0);
        on_second.line = Some(LabelLine::Second);
        on_second.height = Some(20.0);
        c.labels = vec![ConnectorLabel::new("l1", "one", 0.0), on_second];

        let path = ConnectorPath {
            tiles: (0..5).map(|x| Tile::new(x, 0)).collect(),
            completeness: Completeness::Complete,
        };
        let geometry = ConnectorGeometry::build(&c, &path, 100.0).unwrap();
        let placed = place_labels(&c, &path, &geometry);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].tile, Tile::new(0, 0));
        assert_eq!(placed[1].index, 4);
        assert_eq!(placed[1].tile, Tile::new(4, 0));
        let [_, second] = geometry.offset_lines.as_ref().unwrap();
        assert_eq!(placed[1].anchor, second[4]);
        assert_eq!(placed[1].position.y, placed[1].anchor.y - 20.0);
    }

    proptest! {
        #[test]
        fn placement_index_bounds(n in 1..500_usize, p in -50.0..150.0_f64) {
            prop_assert_eq!(placement_index(n, 0.0), 0);
            prop_assert_eq!(placement_index(n, 100.0), n - 1);
            prop_assert!(placement_index(n, p) < n);
        }

        #[test]
        fn placement_index_is_monotonic(n in 1..500_usize, a in 0.0..100.0_f64, b in 0.0..100.0_f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(placement_index(n, lo) <= placement_index(n, hi));
        }
    }
}
