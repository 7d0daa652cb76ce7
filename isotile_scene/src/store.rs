// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed mutations of the model and its views.
//!
//! Every write goes through a draft: the entity (or view) is cloned, edited,
//! validated, and only then committed. A rejected mutation leaves the model
//! untouched. Geometry code never writes; the interaction layer produces
//! [`Mutation`] values and the owner of the model applies them.

use isotile_grid::Tile;
use log::debug;

use crate::error::{SchemaError, StoreError};
use crate::ids::{ConnectorId, ItemId, RectangleId, TextBoxId, ViewId};
use crate::model::{Connector, Model, ModelItem, Rectangle, TextBox, View, ViewItem};
use crate::schema::validate_view;

/// A write request against a [`Model`].
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// Add a model item.
    CreateItem(ModelItem),
    /// Replace a model item with the same id.
    UpdateItem(ModelItem),
    /// Delete a model item and every placement of it.
    DeleteItem(ItemId),
    /// Add a view.
    CreateView(View),
    /// Delete a view and everything it owns.
    DeleteView(ViewId),
    /// Place a model item in a view.
    PlaceItem {
        /// Target view.
        view: ViewId,
        /// The placement.
        item: ViewItem,
    },
    /// Move a placed item to a tile.
    MoveItem {
        /// Target view.
        view: ViewId,
        /// The placed item.
        item: ItemId,
        /// New tile.
        tile: Tile,
    },
    /// Remove an item's placement from a view.
    RemoveViewItem {
        /// Target view.
        view: ViewId,
        /// The placed item.
        item: ItemId,
    },
    /// Add a connector.
    CreateConnector {
        /// Target view.
        view: ViewId,
        /// The connector.
        connector: Connector,
    },
    /// Replace a connector with the same id.
    UpdateConnector {
        /// Target view.
        view: ViewId,
        /// The new connector.
        connector: Connector,
    },
    /// Delete a connector.
    DeleteConnector {
        /// Target view.
        view: ViewId,
        /// The connector.
        id: ConnectorId,
    },
    /// Add a rectangle.
    CreateRectangle {
        /// Target view.
        view: ViewId,
        /// The rectangle.
        rectangle: Rectangle,
    },
    /// Replace a rectangle with the same id.
    UpdateRectangle {
        /// Target view.
        view: ViewId,
        /// The new rectangle.
        rectangle: Rectangle,
    },
    /// Delete a rectangle.
    DeleteRectangle {
        /// Target view.
        view: ViewId,
        /// The rectangle.
        id: RectangleId,
    },
    /// Add a text box.
    CreateTextBox {
        /// Target view.
        view: ViewId,
        /// The text box.
        text_box: TextBox,
    },
    /// Replace a text box with the same id.
    UpdateTextBox {
        /// Target view.
        view: ViewId,
        /// The new text box.
        text_box: TextBox,
    },
    /// Delete a text box.
    DeleteTextBox {
        /// Target view.
        view: ViewId,
        /// The text box.
        id: TextBoxId,
    },
}

impl Model {
    /// Apply one mutation.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), StoreError> {
        let result = self.apply_inner(mutation);
        if let Err(err) = &result {
            debug!("mutation rejected: {err}");
        }
        result
    }

    /// Apply several mutations as one unit: either all commit or none do.
    pub fn apply_all(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<(), StoreError> {
        let mut draft = self.clone();
        for mutation in mutations {
            draft.apply(mutation)?;
        }
        *self = draft;
        Ok(())
    }

    fn apply_inner(&mut self, mutation: Mutation) -> Result<(), StoreError> {
        match mutation {
            Mutation::CreateItem(item) => self.create_item(item),
            Mutation::UpdateItem(item) => {
                let id = item.id.clone();
                self.update_item(&id, |slot| *slot = item)
            }
            Mutation::DeleteItem(id) => self.delete_item(&id).map(drop),
            Mutation::CreateView(view) => self.create_view(view),
            Mutation::DeleteView(id) => self.delete_view(&id).map(drop),
            Mutation::PlaceItem { view, item } => self.place_item(&view, item),
            Mutation::MoveItem { view, item, tile } => {
                self.update_view_item(&view, &item, |placed| placed.tile = tile)
            }
            Mutation::RemoveViewItem { view, item } => {
                self.remove_view_item(&view, &item).map(drop)
            }
            Mutation::CreateConnector { view, connector } => {
                self.create_connector(&view, connector)
            }
            Mutation::UpdateConnector { view, connector } => {
                let id = connector.id.clone();
                self.update_connector(&view, &id, |slot| *slot = connector)
            }
            Mutation::DeleteConnector { view, id } => self.delete_connector(&view, &id).map(drop),
            Mutation::CreateRectangle { view, rectangle } => {
                self.create_rectangle(&view, rectangle)
            }
            Mutation::UpdateRectangle { view, rectangle } => {
                let id = rectangle.id.clone();
                self.update_rectangle(&view, &id, |slot| *slot = rectangle)
            }
            Mutation::DeleteRectangle { view, id } => self.delete_rectangle(&view, &id).map(drop),
            Mutation::CreateTextBox { view, text_box } => self.create_text_box(&view, text_box),
            Mutation::UpdateTextBox { view, text_box } => {
                let id = text_box.id.clone();
                self.update_text_box(&view, &id, |slot| *slot = text_box)
            }
            Mutation::DeleteTextBox { view, id } => self.delete_text_box(&view, &id).map(drop),
        }
    }

    /// Add a model item.
    pub fn create_item(&mut self, item: ModelItem) -> Result<(), StoreError> {
        if self.item(&item.id).is_some() {
            return Err(SchemaError::DuplicateModelItem(item.id).into());
        }
        self.items.push(item);
        Ok(())
    }

    /// Edit a model item in place. Its id cannot change.
    pub fn update_item(
        &mut self,
        id: &ItemId,
        edit: impl FnOnce(&mut ModelItem),
    ) -> Result<(), StoreError> {
        let slot = self
            .items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| StoreError::UnknownModelItem(id.clone()))?;
        let mut draft = slot.clone();
        edit(&mut draft);
        draft.id = id.clone();
        *slot = draft;
        Ok(())
    }

    /// Delete a model item and its placements in every view.
    ///
    /// Connector anchors that pointed at the item stay in place and resolve
    /// as dangling until re-attached.
    pub fn delete_item(&mut self, id: &ItemId) -> Result<ModelItem, StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == *id)
            .ok_or_else(|| StoreError::UnknownModelItem(id.clone()))?;
        for view in &mut self.views {
            view.items.retain(|placed| placed.id != *id);
        }
        Ok(self.items.remove(index))
    }

    /// Add a view.
    pub fn create_view(&mut self, view: View) -> Result<(), StoreError> {
        if self.view(&view.id).is_some() {
            return Err(SchemaError::DuplicateView(view.id).into());
        }
        validate_view(self, &view)?;
        self.views.push(view);
        Ok(())
    }

    /// Rename or otherwise edit a view; the result must validate.
    pub fn update_view(
        &mut self,
        id: &ViewId,
        edit: impl FnOnce(&mut View),
    ) -> Result<(), StoreError> {
        self.edit_view(id, |view| {
            edit(view);
            view.id = id.clone();
            Ok(())
        })
    }

    /// Delete a view together with its items, connectors, rectangles, and
    /// text boxes.
    pub fn delete_view(&mut self, id: &ViewId) -> Result<View, StoreError> {
        let index = self.view_index(id)?;
        Ok(self.views.remove(index))
    }

    /// Place a model item in a view.
    pub fn place_item(&mut self, view: &ViewId, item: ViewItem) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            draft.items.push(item);
            Ok(())
        })
    }

    /// Edit a placement; the result must validate.
    pub fn update_view_item(
        &mut self,
        view: &ViewId,
        item: &ItemId,
        edit: impl FnOnce(&mut ViewItem),
    ) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            let slot = draft
                .items
                .iter_mut()
                .find(|placed| placed.id == *item)
                .ok_or_else(|| StoreError::UnknownViewItem {
                    view: view.clone(),
                    item: item.clone(),
                })?;
            edit(slot);
            slot.id = item.clone();
            Ok(())
        })
    }

    /// Remove a placement; the model item stays.
    pub fn remove_view_item(
        &mut self,
        view: &ViewId,
        item: &ItemId,
    ) -> Result<ViewItem, StoreError> {
        self.edit_view(view, |draft| {
            let index = draft
                .items
                .iter()
                .position(|placed| placed.id == *item)
                .ok_or_else(|| StoreError::UnknownViewItem {
                    view: view.clone(),
                    item: item.clone(),
                })?;
            Ok(draft.items.remove(index))
        })
    }

    /// Add a connector.
    pub fn create_connector(
        &mut self,
        view: &ViewId,
        connector: Connector,
    ) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            draft.connectors.push(connector);
            Ok(())
        })
    }

    /// Edit a connector; the result must validate.
    pub fn update_connector(
        &mut self,
        view: &ViewId,
        id: &ConnectorId,
        edit: impl FnOnce(&mut Connector),
    ) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            let slot = draft
                .connectors
                .iter_mut()
                .find(|c| c.id == *id)
                .ok_or_else(|| StoreError::UnknownConnector {
                    view: view.clone(),
                    id: id.clone(),
                })?;
            edit(slot);
            slot.id = id.clone();
            Ok(())
        })
    }

    /// Delete a connector.
    pub fn delete_connector(
        &mut self,
        view: &ViewId,
        id: &ConnectorId,
    ) -> Result<Connector, StoreError> {
        self.edit_view(view, |draft| {
            let index = draft
                .connectors
                .iter()
                .position(|c| c.id == *id)
                .ok_or_else(|| StoreError::UnknownConnector {
                    view: view.clone(),
                    id: id.clone(),
                })?;
            Ok(draft.connectors.remove(index))
        })
    }

    /// Add a rectangle.
    pub fn create_rectangle(
        &mut self,
        view: &ViewId,
        rectangle: Rectangle,
    ) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            draft.rectangles.push(rectangle);
            Ok(())
        })
    }

    /// Edit a rectangle; the result must validate.
    pub fn update_rectangle(
        &mut self,
        view: &ViewId,
        id: &RectangleId,
        edit: impl FnOnce(&mut Rectangle),
    ) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            let slot = draft
                .rectangles
                .iter_mut()
                .find(|r| r.id == *id)
                .ok_or_else(|| StoreError::UnknownRectangle {
                    view: view.clone(),
                    id: id.clone(),
                })?;
            edit(slot);
            slot.id = id.clone();
            Ok(())
        })
    }

    /// Delete a rectangle.
    pub fn delete_rectangle(
        &mut self,
        view: &ViewId,
        id: &RectangleId,
    ) -> Result<Rectangle, StoreError> {
        self.edit_view(view, |draft| {
            let index = draft
                .rectangles
                .iter()
                .position(|r| r.id == *id)
                .ok_or_else(|| StoreError::UnknownRectangle {
                    view: view.clone(),
                    id: id.clone(),
                })?;
            Ok(draft.rectangles.remove(index))
        })
    }

    /// Add a text box.
    pub fn create_text_box(&mut self, view: &ViewId, text_box: TextBox) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            draft.text_boxes.push(text_box);
            Ok(())
        })
    }

    /// Edit a text box; the result must validate.
    pub fn update_text_box(
        &mut self,
        view: &ViewId,
        id: &TextBoxId,
        edit: impl FnOnce(&mut TextBox),
    ) -> Result<(), StoreError> {
        self.edit_view(view, |draft| {
            let slot = draft
                .text_boxes
                .iter_mut()
                .find(|t| t.id == *id)
                .ok_or_else(|| StoreError::UnknownTextBox {
                    view: view.clone(),
                    id: id.clone(),
                })?;
            edit(slot);
            slot.id = id.clone();
            Ok(())
        })
    }

    /// Delete a text box.
    pub fn delete_text_box(
        &mut self,
        view: &ViewId,
        id: &TextBoxId,
    ) -> Result<TextBox, StoreError> {
        self.edit_view(view, |draft| {
            let index = draft
                .text_boxes
                .iter()
                .position(|t| t.id == *id)
                .ok_or_else(|| StoreError::UnknownTextBox {
                    view: view.clone(),
                    id: id.clone(),
                })?;
            Ok(draft.text_boxes.remove(index))
        })
    }

    fn view_index(&self, id: &ViewId) -> Result<usize, StoreError> {
        self.views
            .iter()
            .position(|view| view.id == *id)
            .ok_or_else(|| StoreError::UnknownView(id.clone()))
    }

    /// Run `edit` on a copy of the view and commit it if it still validates.
    fn edit_view<T>(
        &mut self,
        id: &ViewId,
        edit: impl FnOnce(&mut View) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let index = self.view_index(id)?;
        let mut draft = self.views[index].clone();
        let out = edit(&mut draft)?;
        validate_view(self, &draft)?;
        self.views[index] = draft;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::resolve;
    use crate::error::Dangling;
    use crate::model::{AnchorRef, ConnectorAnchor, ConnectorLabel};

    fn model() -> Model {
        let mut model = Model::default();
        model.create_item(ModelItem::new("a", "A")).unwrap();
        model.create_item(ModelItem::new("b", "B")).unwrap();
        model.create_view(View::new("v", "Main")).unwrap();
        let v = ViewId::new("v");
        model
            .place_item(&v, ViewItem::new("a", Tile::new(0, 0)))
            .unwrap();
        model
            .place_item(&v, ViewItem::new("b", Tile::new(3, 0)))
            .unwrap();
        model
            .create_connector(
                &v,
                Connector::new(
                    "c",
                    vec![
                        ConnectorAnchor::new("c-a", AnchorRef::Item("a".into())),
                        ConnectorAnchor::new("c-b", AnchorRef::Item("b".into())),
                    ],
                ),
            )
            .unwrap();
        model
    }

    #[test]
    fn deleting_an_item_leaves_dangling_anchors() {
        let mut m = model();
        m.delete_item(&ItemId::new("b")).unwrap();
        let view = m.view(&ViewId::new("v")).unwrap();
        assert!(view.item(&ItemId::new("b")).is_none());
        assert_eq!(view.connectors.len(), 1);
        let end = &view.connectors[0].anchors[1].reference;
        assert_eq!(
            resolve(end, view),
            Err(Dangling::MissingItem(ItemId::new("b")))
        );
    }

    #[test]
    fn second_placement_in_same_view_is_rejected() {
        let mut m = model();
        let before = m.clone();
        let err = m
            .place_item(&ViewId::new("v"), ViewItem::new("a", Tile::new(9, 9)))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(SchemaError::DuplicatePlacement { .. })
        ));
        assert_eq!(m, before);
    }

    #[test]
    fn placing_an_unknown_item_is_rejected() {
        let mut m = model();
        let err = m
            .place_item(&ViewId::new("v"), ViewItem::new("zzz", Tile::new(1, 1)))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(SchemaError::UnknownModelItem { .. })
        ));
    }

    #[test]
    fn invalid_update_is_not_committed() {
        let mut m = model();
        let v = ViewId::new("v");
        let err = m
            .update_connector(&v, &ConnectorId::new("c"), |c| {
                c.labels.push(ConnectorLabel::new("l", "x", 250.0));
            })
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(SchemaError::LabelPosition { .. })
        ));
        assert!(m.view(&v).unwrap().connectors[0].labels.is_empty());
    }

    #[test]
    fn deleting_a_view_drops_what_it_owns() {
        let mut m = model();
        let removed = m.delete_view(&ViewId::new("v")).unwrap();
        assert_eq!(removed.connectors.len(), 1);
        assert!(m.views.is_empty());
        assert_eq!(m.items.len(), 2);
    }

    #[test]
    fn apply_all_is_atomic() {
        let mut m = model();
        let before = m.clone();
        let v = ViewId::new("v");
        let result = m.apply_all([
            Mutation::MoveItem {
                view: v.clone(),
                item: "a".into(),
                tile: Tile::new(5, 5),
            },
            Mutation::DeleteRectangle {
                view: v,
                id: "missing".into(),
            },
        ]);
        assert!(matches!(result, Err(StoreError::UnknownRectangle { .. })));
        assert_eq!(m, before);
    }

    #[test]
    fn apply_moves_and_updates() {
        let mut m = model();
        let v = ViewId::new("v");
        m.apply(Mutation::MoveItem {
            view: v.clone(),
            item: "a".into(),
            tile: Tile::new(-2, 4),
        })
        .unwrap();
        m.apply(Mutation::CreateTextBox {
            view: v.clone(),
            text_box: TextBox::new("t", Tile::new(0, 5), "note"),
        })
        .unwrap();
        m.apply(Mutation::UpdateItem(ModelItem::new("a", "Renamed")))
            .unwrap();
        let view = m.view(&v).unwrap();
        assert_eq!(view.item(&"a".into()).unwrap().tile, Tile::new(-2, 4));
        assert_eq!(view.text_boxes.len(), 1);
        assert_eq!(m.item(&"a".into()).unwrap().name, "Renamed");
    }

    #[test]
    fn unknown_targets() {
        let mut m = model();
        assert!(matches!(
            m.delete_view(&ViewId::new("nope")),
            Err(StoreError::UnknownView(_))
        ));
        assert!(matches!(
            m.delete_item(&ItemId::new("nope")),
            Err(StoreError::UnknownModelItem(_))
        ));
        assert!(matches!(
            m.delete_connector(&ViewId::new("v"), &ConnectorId::new("nope")),
            Err(StoreError::UnknownConnector { .. })
        ));
    }
}
