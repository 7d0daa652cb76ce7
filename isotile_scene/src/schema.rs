// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary validation of ingested documents.
//!
//! Deserialization checks field types; [`Model::validate`] checks the
//! invariants that span fields and entities. The geometry code assumes a
//! validated document.
//!
//! References from anchors to items are not checked here: an anchor pointing at
//! a missing item is a dangling anchor, reported at query time.

use core::ops::RangeInclusive;
use std::collections::BTreeSet;

use crate::error::SchemaError;
use crate::ids::ViewId;
use crate::model::{Connector, Model, View};

/// Allowed values of icon and view item scales.
pub const SCALE_RANGE: RangeInclusive<f64> = 0.1..=3.0;

/// Allowed values of label positions, in percent.
pub const POSITION_RANGE: RangeInclusive<f64> = 0.0..=100.0;

impl Model {
    /// Check every cross-field invariant of the document.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(SchemaError::DuplicateModelItem(item.id.clone()));
            }
        }
        for icon in &self.icons {
            if let Some(scale) = icon.scale
                && !SCALE_RANGE.contains(&scale)
            {
                return Err(SchemaError::IconScale {
                    icon: icon.id.clone(),
                    scale,
                });
            }
        }
        let mut views = BTreeSet::new();
        for view in &self.views {
            if !views.insert(&view.id) {
                return Err(SchemaError::DuplicateView(view.id.clone()));
            }
            validate_view(self, view)?;
        }
        Ok(())
    }

    /// Validate and pass the document through.
    pub fn validated(self) -> Result<Self, SchemaError> {
        self.validate()?;
        Ok(self)
    }
}

/// Check one view against the model it belongs to.
pub fn validate_view(model: &Model, view: &View) -> Result<(), SchemaError> {
    let mut placed = BTreeSet::new();
    for item in &view.items {
        if model.item(&item.id).is_none() {
            return Err(SchemaError::UnknownModelItem {
                view: view.id.clone(),
                item: item.id.clone(),
            });
        }
        if !placed.insert(&item.id) {
            return Err(SchemaError::DuplicatePlacement {
                view: view.id.clone(),
                item: item.id.clone(),
            });
        }
        if let Some(scale) = item.scale
            && !SCALE_RANGE.contains(&scale)
        {
            return Err(SchemaError::ItemScale {
                view: view.id.clone(),
                item: item.id.clone(),
                scale,
            });
        }
    }

    unique(&view.id, "connector", view.connectors.iter().map(|c| c.id.as_str()))?;
    unique(
        &view.id,
        "anchor",
        view.connectors
            .iter()
            .flat_map(|c| &c.anchors)
            .map(|a| a.id.as_str()),
    )?;
    unique(&view.id, "rectangle", view.rectangles.iter().map(|r| r.id.as_str()))?;
    unique(&view.id, "text box", view.text_boxes.iter().map(|t| t.id.as_str()))?;

    for connector in &view.connectors {
        validate_connector(connector)?;
    }
    for text_box in &view.text_boxes {
        if let Some(font_size) = text_box.font_size
            && !(font_size.is_finite() && font_size > 0.0)
        {
            return Err(SchemaError::FontSize {
                text_box: text_box.id.clone(),
                font_size,
            });
        }
    }
    Ok(())
}

/// Check a connector on its own: anchor count and label positions.
pub fn validate_connector(connector: &Connector) -> Result<(), SchemaError> {
    if connector.anchors.len() < 2 {
        return Err(SchemaError::TooFewAnchors {
            connector: connector.id.clone(),
            count: connector.anchors.len(),
        });
    }
    for label in &connector.labels {
        if !POSITION_RANGE.contains(&label.position) {
            return Err(SchemaError::LabelPosition {
                connector: connector.id.clone(),
                label: label.id.clone(),
                position: label.position,
            });
        }
    }
    Ok(())
}

fn unique<'a>(
    view: &ViewId,
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), SchemaError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SchemaError::DuplicateId {
                view: view.clone(),
                kind,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}
