// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted model and its views.
//!
//! These types mirror the document shape exactly: field names are camelCase on
//! the wire, optional fields stay optional, and unknown fields are ignored on
//! read. The model owns model items; each [`View`] owns its view items,
//! connectors, rectangles, and text boxes. Cross-references are ids, resolved
//! by lookup.

use isotile_grid::{Tile, TileRect};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::ids::{
    AnchorId, ColorId, ConnectorId, IconId, ItemId, LabelId, RectangleId, TextBoxId, ViewId,
};

/// A complete diagram document: the shared model plus every view over it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Document format version, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Document title.
    #[serde(default)]
    pub title: String,
    /// Free-text description of the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Palette shared by every view.
    #[serde(default)]
    pub colors: Vec<Color>,
    /// Icon catalogue shared by every view.
    #[serde(default)]
    pub icons: Vec<Icon>,
    /// Domain entities, independent of layout.
    #[serde(default)]
    pub items: Vec<ModelItem>,
    /// Diagrams laid out over the model.
    #[serde(default)]
    pub views: Vec<View>,
}

impl Model {
    /// Look up a model item.
    pub fn item(&self, id: &ItemId) -> Option<&ModelItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Look up a view.
    pub fn view(&self, id: &ViewId) -> Option<&View> {
        self.views.iter().find(|view| view.id == *id)
    }

    /// Look up a view for mutation.
    pub fn view_mut(&mut self, id: &ViewId) -> Option<&mut View> {
        self.views.iter_mut().find(|view| view.id == *id)
    }

    /// Look up an icon.
    pub fn icon(&self, id: &IconId) -> Option<&Icon> {
        self.icons.iter().find(|icon| icon.id == *id)
    }

    /// Look up a palette color.
    pub fn color(&self, id: &ColorId) -> Option<&Color> {
        self.colors.iter().find(|color| color.id == *id)
    }
}

/// A named palette entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Palette id.
    pub id: ColorId,
    /// CSS color value.
    pub value: String,
}

/// An icon available to model items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    /// Icon id.
    pub id: IconId,
    /// Display name.
    pub name: String,
    /// Where the image lives; loading it is the renderer's business.
    pub url: String,
    /// Collection the icon came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Whether the artwork is already drawn isometrically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_isometric: Option<bool>,
    /// Render scale, within [`SCALE_RANGE`](crate::schema::SCALE_RANGE).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// A domain entity independent of any view's layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelItem {
    /// Item id, shared with the view items that place it.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon shown for the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconId>,
}

impl ModelItem {
    /// An item with a name and nothing else.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            icon: None,
        }
    }
}

/// One diagram over the shared model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// View id.
    pub id: ViewId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Placements of model items.
    pub items: Vec<ViewItem>,
    /// Connectors between items and tiles.
    #[serde(default)]
    pub connectors: Vec<Connector>,
    /// Colored tile regions.
    #[serde(default)]
    pub rectangles: Vec<Rectangle>,
    /// Free-floating text.
    #[serde(default)]
    pub text_boxes: Vec<TextBox>,
    /// Last modification time as written by the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl View {
    /// An empty view.
    pub fn new(id: impl Into<ViewId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            items: Vec::new(),
            connectors: Vec::new(),
            rectangles: Vec::new(),
            text_boxes: Vec::new(),
            last_updated: None,
        }
    }

    /// The placement of a model item in this view.
    pub fn item(&self, id: &ItemId) -> Option<&ViewItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Look up a connector.
    pub fn connector(&self, id: &ConnectorId) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == *id)
    }

    /// Look up a rectangle.
    pub fn rectangle(&self, id: &RectangleId) -> Option<&Rectangle> {
        self.rectangles.iter().find(|r| r.id == *id)
    }

    /// Look up a text box.
    pub fn text_box(&self, id: &TextBoxId) -> Option<&TextBox> {
        self.text_boxes.iter().find(|t| t.id == *id)
    }

    /// Find a connector anchor by id, across every connector in the view.
    pub fn anchor(&self, id: &AnchorId) -> Option<&ConnectorAnchor> {
        self.connectors
            .iter()
            .flat_map(|c| &c.anchors)
            .find(|a| a.id == *id)
    }
}

/// Placement of a model item in one view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewItem {
    /// The placed model item.
    pub id: ItemId,
    /// Where it sits.
    pub tile: Tile,
    /// Height of the name label above the icon, in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_height: Option<f64>,
    /// Per-view icon scale, within [`SCALE_RANGE`](crate::schema::SCALE_RANGE).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl ViewItem {
    /// Place `id` at `tile` with default presentation.
    pub fn new(id: impl Into<ItemId>, tile: Tile) -> Self {
        Self {
            id: id.into(),
            tile,
            label_height: None,
            scale: None,
        }
    }
}

/// Stroke pattern of a connector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorStyle {
    /// Continuous stroke.
    #[default]
    Solid,
    /// Round dots.
    Dotted,
    /// Dashes.
    Dashed,
}

/// How many parallel lines a connector is drawn with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineType {
    /// One line along the path.
    #[default]
    Single,
    /// Two lines offset to either side of the path.
    Double,
    /// Two lines plus circles at the path ends.
    DoubleWithCircle,
}

impl LineType {
    /// Whether the connector is drawn as two offset lines.
    pub fn is_double(self) -> bool {
        !matches!(self, Self::Single)
    }
}

/// Which line of a double connector a label sits on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelLine {
    /// The first offset line (the path itself for single lines).
    #[default]
    #[serde(rename = "1")]
    First,
    /// The second offset line.
    #[serde(rename = "2")]
    Second,
}

/// A text label positioned along a connector's path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorLabel {
    /// Label id.
    pub id: LabelId,
    /// Label text.
    pub text: String,
    /// Percentage along the path, in `0..=100`.
    pub position: f64,
    /// Vertical offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Line of a double connector the label belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LabelLine>,
    /// Whether a leader line is drawn from the label to the path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
}

impl ConnectorLabel {
    /// A label at `position` percent with default presentation.
    pub fn new(id: impl Into<LabelId>, text: impl Into<String>, position: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            position,
            height: None,
            line: None,
            show_line: None,
        }
    }
}

/// What a connector endpoint points at.
///
/// On the wire this is a partial object `{item?, anchor?, tile?}`; in memory
/// exactly one case holds. When a document sets several fields, the most
/// specific one wins: item plus anchor, then item, then anchor, then tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnchorRef", into = "RawAnchorRef")]
pub enum AnchorRef {
    /// The tile of a placed item.
    Item(ItemId),
    /// A named side of a placed item (see [`SubAnchor`](crate::anchor::SubAnchor)).
    ItemAnchor {
        /// The item.
        item: ItemId,
        /// Sub-anchor name.
        anchor: String,
    },
    /// Wherever another connector's anchor resolves to.
    Anchor(AnchorId),
    /// A bare tile, connected to empty space.
    Tile(Tile),
}

/// Wire shape of [`AnchorRef`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct RawAnchorRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tile: Option<Tile>,
}

impl TryFrom<RawAnchorRef> for AnchorRef {
    type Error = SchemaError;

    fn try_from(raw: RawAnchorRef) -> Result<Self, SchemaError> {
        match raw {
            RawAnchorRef {
                item: Some(item),
                anchor: Some(anchor),
                ..
            } => Ok(Self::ItemAnchor { item, anchor }),
            RawAnchorRef {
                item: Some(item), ..
            } => Ok(Self::Item(item)),
            RawAnchorRef {
                anchor: Some(anchor),
                ..
            } => Ok(Self::Anchor(AnchorId::new(anchor))),
            RawAnchorRef {
                tile: Some(tile), ..
            } => Ok(Self::Tile(tile)),
            RawAnchorRef { .. } => Err(SchemaError::EmptyAnchorRef),
        }
    }
}

impl From<AnchorRef> for RawAnchorRef {
    fn from(reference: AnchorRef) -> Self {
        match reference {
            AnchorRef::Item(item) => Self {
                item: Some(item),
                ..Self::default()
            },
            AnchorRef::ItemAnchor { item, anchor } => Self {
                item: Some(item),
                anchor: Some(anchor),
                tile: None,
            },
            AnchorRef::Anchor(anchor) => Self {
                anchor: Some(anchor.as_str().to_owned()),
                ..Self::default()
            },
            AnchorRef::Tile(tile) => Self {
                tile: Some(tile),
                ..Self::default()
            },
        }
    }
}

/// One endpoint (or waypoint) of a connector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorAnchor {
    /// Anchor id; other anchors may reference it.
    pub id: AnchorId,
    /// What the anchor points at.
    #[serde(rename = "ref")]
    pub reference: AnchorRef,
}

impl ConnectorAnchor {
    /// An anchor with the given reference.
    pub fn new(id: impl Into<AnchorId>, reference: AnchorRef) -> Self {
        Self {
            id: id.into(),
            reference,
        }
    }
}

/// A routed line through an ordered list of anchors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    /// Connector id.
    pub id: ConnectorId,
    /// Legacy center label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Legacy start label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_label: Option<String>,
    /// Legacy end label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_label: Option<String>,
    /// Legacy start label offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_label_height: Option<f64>,
    /// Legacy center label offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_label_height: Option<f64>,
    /// Legacy end label offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_label_height: Option<f64>,
    /// Positioned labels. An empty list counts as absent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<ConnectorLabel>,
    /// Palette color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorId>,
    /// Literal color overriding the palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    /// Stroke width, as a percentage of the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Stroke pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ConnectorStyle>,
    /// Single or double line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
    /// Whether an arrow head is drawn on the final segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_arrow: Option<bool>,
    /// Ordered anchors; at least two in a valid document.
    pub anchors: Vec<ConnectorAnchor>,
}

impl Connector {
    /// Width used when none is stored.
    pub const DEFAULT_WIDTH: f64 = 10.0;

    /// A plain connector through `anchors`.
    pub fn new(id: impl Into<ConnectorId>, anchors: Vec<ConnectorAnchor>) -> Self {
        Self {
            id: id.into(),
            description: None,
            start_label: None,
            end_label: None,
            start_label_height: None,
            center_label_height: None,
            end_label_height: None,
            labels: Vec::new(),
            color: None,
            custom_color: None,
            width: None,
            style: None,
            line_type: None,
            show_arrow: None,
            anchors,
        }
    }

    /// Stored width, or [`Self::DEFAULT_WIDTH`].
    pub fn width(&self) -> f64 {
        self.width.unwrap_or(Self::DEFAULT_WIDTH)
    }

    /// Stored style, or solid.
    pub fn style(&self) -> ConnectorStyle {
        self.style.unwrap_or_default()
    }

    /// Stored line type, or single.
    pub fn line_type(&self) -> LineType {
        self.line_type.unwrap_or_default()
    }

    /// Whether an arrow is drawn; defaults to true.
    pub fn show_arrow(&self) -> bool {
        self.show_arrow.unwrap_or(true)
    }
}

/// An axis-aligned tile region with a color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    /// Rectangle id.
    pub id: RectangleId,
    /// Palette color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorId>,
    /// Literal color overriding the palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    /// One corner.
    pub from: Tile,
    /// The opposite corner; need not be ordered with `from`.
    pub to: Tile,
}

impl Rectangle {
    /// An uncolored rectangle between two corners.
    pub fn new(id: impl Into<RectangleId>, from: Tile, to: Tile) -> Self {
        Self {
            id: id.into(),
            color: None,
            custom_color: None,
            from,
            to,
        }
    }

    /// The normalized region.
    pub fn bounds(&self) -> TileRect {
        TileRect::from_corners(self.from, self.to)
    }
}

/// Projection axis a text box is written along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextOrientation {
    /// Along tile axis X.
    #[default]
    X,
    /// Along tile axis Y.
    Y,
}

/// Free text anchored at a tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    /// Text box id.
    pub id: TextBoxId,
    /// Anchor tile; the text extends from here along its orientation.
    pub tile: Tile,
    /// Text content.
    pub content: String,
    /// Font size in tile units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Axis the text runs along.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<TextOrientation>,
}

impl TextBox {
    /// Font size used when none is stored.
    pub const DEFAULT_FONT_SIZE: f64 = 0.6;

    /// A text box with default presentation.
    pub fn new(id: impl Into<TextBoxId>, tile: Tile, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tile,
            content: content.into(),
            font_size: None,
            orientation: None,
        }
    }

    /// Stored font size, or [`Self::DEFAULT_FONT_SIZE`].
    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(Self::DEFAULT_FONT_SIZE)
    }

    /// Stored orientation, or X.
    pub fn orientation(&self) -> TextOrientation {
        self.orientation.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_ref(json: &str) -> Result<AnchorRef, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn anchor_ref_variants_from_partial_objects() {
        assert_eq!(
            anchor_ref(r#"{"item":"a"}"#).unwrap(),
            AnchorRef::Item(ItemId::new("a"))
        );
        assert_eq!(
            anchor_ref(r#"{"tile":{"x":1,"y":2}}"#).unwrap(),
            AnchorRef::Tile(Tile::new(1, 2))
        );
        assert_eq!(
            anchor_ref(r#"{"anchor":"other"}"#).unwrap(),
            AnchorRef::Anchor(AnchorId::new("other"))
        );
        assert!(anchor_ref("{}").is_err());
    }

    #[test]
    fn anchor_ref_precedence_when_several_fields_are_set() {
        let all = r#"{"item":"a","anchor":"top","tile":{"x":1,"y":2}}"#;
        assert_eq!(
            anchor_ref(all).unwrap(),
            AnchorRef::ItemAnchor {
                item: ItemId::new("a"),
                anchor: "top".into()
            }
        );
        let item_and_tile = r#"{"item":"a","tile":{"x":1,"y":2}}"#;
        assert_eq!(
            anchor_ref(item_and_tile).unwrap(),
            AnchorRef::Item(ItemId::new("a"))
        );
        let anchor_and_tile = r#"{"anchor":"b","tile":{"x":1,"y":2}}"#;
        assert_eq!(
            anchor_ref(anchor_and_tile).unwrap(),
            AnchorRef::Anchor(AnchorId::new("b"))
        );
    }

    #[test]
    fn anchor_ref_writes_only_its_fields() {
        let json = serde_json::to_string(&AnchorRef::Tile(Tile::new(3, 4))).unwrap();
        assert_eq!(json, r#"{"tile":{"x":3,"y":4}}"#);
        let json = serde_json::to_string(&AnchorRef::ItemAnchor {
            item: ItemId::new("a"),
            anchor: "left".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"item":"a","anchor":"left"}"#);
    }

    #[test]
    fn view_reads_minimal_document_and_ignores_unknown_fields() {
        let json = r#"{
            "id": "v1",
            "name": "Main",
            "items": [{ "id": "i1", "tile": { "x": 0, "y": 0 }, "future": true }],
            "somethingNew": [1, 2, 3]
        }"#;
        let view: View = serde_json::from_str(json).unwrap();
        assert_eq!(view.items.len(), 1);
        assert!(view.connectors.is_empty());
        assert!(view.text_boxes.is_empty());
    }

    #[test]
    fn connector_wire_names() {
        let json = r#"{
            "id": "c1",
            "lineType": "DOUBLE_WITH_CIRCLE",
            "style": "DASHED",
            "labels": [{ "id": "l1", "text": "hi", "position": 25, "line": "2" }],
            "anchors": [
                { "id": "a1", "ref": { "item": "i1" } },
                { "id": "a2", "ref": { "tile": { "x": 4, "y": 0 } } }
            ]
        }"#;
        let connector: Connector = serde_json::from_str(json).unwrap();
        assert_eq!(connector.line_type(), LineType::DoubleWithCircle);
        assert_eq!(connector.style(), ConnectorStyle::Dashed);
        assert_eq!(connector.labels[0].line, Some(LabelLine::Second));
        assert!(connector.show_arrow());
        assert_eq!(connector.width(), Connector::DEFAULT_WIDTH);

        let back = serde_json::to_value(&connector).unwrap();
        assert_eq!(back["lineType"], "DOUBLE_WITH_CIRCLE");
        assert_eq!(back["anchors"][0]["ref"]["item"], "i1");
        assert!(back.get("startLabel").is_none());
    }

    #[test]
    fn rectangle_bounds_normalize_corners() {
        let rect = Rectangle::new("r", Tile::new(3, -1), Tile::new(-2, 4));
        assert_eq!(rect.bounds().min, Tile::new(-2, -1));
        assert_eq!(rect.bounds().max, Tile::new(3, 4));
    }
}
