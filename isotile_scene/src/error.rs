// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

use crate::ids::{AnchorId, ConnectorId, IconId, ItemId, LabelId, RectangleId, TextBoxId, ViewId};

/// Ingested data does not have a valid shape.
///
/// Raised at the boundary, before a document reaches the geometry code.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// An anchor reference with none of `item`, `anchor`, `tile` set.
    #[error("anchor reference sets none of `item`, `anchor`, `tile`")]
    EmptyAnchorRef,
    /// A connector with fewer than two anchors.
    #[error("connector `{connector}` has {count} anchor(s); at least 2 are required")]
    TooFewAnchors {
        /// Offending connector.
        connector: ConnectorId,
        /// Anchors it has.
        count: usize,
    },
    /// A label position outside `0..=100`.
    #[error("label `{label}` of connector `{connector}` has position {position}, outside 0..=100")]
    LabelPosition {
        /// Owning connector.
        connector: ConnectorId,
        /// Offending label.
        label: LabelId,
        /// Stored position.
        position: f64,
    },
    /// An icon scale outside the allowed range.
    #[error("icon `{icon}` has scale {scale}, outside 0.1..=3")]
    IconScale {
        /// Offending icon.
        icon: IconId,
        /// Stored scale.
        scale: f64,
    },
    /// A view item scale outside the allowed range.
    #[error("item `{item}` in view `{view}` has scale {scale}, outside 0.1..=3")]
    ItemScale {
        /// Owning view.
        view: ViewId,
        /// Offending item.
        item: ItemId,
        /// Stored scale.
        scale: f64,
    },
    /// A font size that is not a positive number.
    #[error("text box `{text_box}` has font size {font_size}; it must be positive")]
    FontSize {
        /// Offending text box.
        text_box: TextBoxId,
        /// Stored size.
        font_size: f64,
    },
    /// Two model items share an id.
    #[error("model item id `{0}` is used more than once")]
    DuplicateModelItem(ItemId),
    /// Two views share an id.
    #[error("view id `{0}` is used more than once")]
    DuplicateView(ViewId),
    /// Two entities of one kind share an id inside a view.
    #[error("{kind} id `{id}` is used more than once in view `{view}`")]
    DuplicateId {
        /// Owning view.
        view: ViewId,
        /// Entity kind, for the message.
        kind: &'static str,
        /// Repeated id.
        id: String,
    },
    /// Two view items in one view place the same model item.
    #[error("model item `{item}` is placed more than once in view `{view}`")]
    DuplicatePlacement {
        /// Owning view.
        view: ViewId,
        /// Model item placed twice.
        item: ItemId,
    },
    /// A view item placing a model item that does not exist.
    #[error("view `{view}` places unknown model item `{item}`")]
    UnknownModelItem {
        /// Owning view.
        view: ViewId,
        /// Missing model item.
        item: ItemId,
    },
}

/// A store mutation was rejected; the store is unchanged.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No view with this id.
    #[error("unknown view `{0}`")]
    UnknownView(ViewId),
    /// No model item with this id.
    #[error("unknown model item `{0}`")]
    UnknownModelItem(ItemId),
    /// The model item is not placed in the view.
    #[error("model item `{item}` is not placed in view `{view}`")]
    UnknownViewItem {
        /// View searched.
        view: ViewId,
        /// Missing placement.
        item: ItemId,
    },
    /// No connector with this id in the view.
    #[error("unknown connector `{id}` in view `{view}`")]
    UnknownConnector {
        /// View searched.
        view: ViewId,
        /// Missing connector.
        id: ConnectorId,
    },
    /// No rectangle with this id in the view.
    #[error("unknown rectangle `{id}` in view `{view}`")]
    UnknownRectangle {
        /// View searched.
        view: ViewId,
        /// Missing rectangle.
        id: RectangleId,
    },
    /// No text box with this id in the view.
    #[error("unknown text box `{id}` in view `{view}`")]
    UnknownTextBox {
        /// View searched.
        view: ViewId,
        /// Missing text box.
        id: TextBoxId,
    },
    /// The mutation would break a document invariant.
    #[error(transparent)]
    Invalid(#[from] SchemaError),
}

/// Why an anchor reference did not resolve to a tile.
///
/// This is a value, not a failure: the owning connector is reported as
/// incomplete and stays in the model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Dangling {
    /// The referenced item is not placed in the view.
    #[error("item `{0}` is not placed in this view")]
    MissingItem(ItemId),
    /// The item exists but has no sub-anchor with this name.
    #[error("item `{item}` has no sub-anchor `{name}`")]
    UnknownSubAnchor {
        /// Referenced item.
        item: ItemId,
        /// Unrecognized name.
        name: String,
    },
    /// The referenced anchor does not exist in the view.
    #[error("anchor `{0}` does not exist in this view")]
    MissingAnchor(AnchorId),
    /// Following anchor-to-anchor references came back to this anchor.
    #[error("anchor `{0}` refers back to itself")]
    Cycle(AnchorId),
}
