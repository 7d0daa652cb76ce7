// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state: enter/leave transitions as the pointer crosses entities.
//!
//! Entities on a tile stack up: a rectangle underneath, a text box over it,
//! an item on top. [`hover_path`] gives that stack outer to inner, and
//! [`HoverState::update_path`] turns successive stacks into transitions.
//!
//! ```
//! use isotile_interaction::hover::{HoverEvent, HoverState};
//!
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update_path(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]);
//! ```

use isotile_grid::Tile;
use isotile_scene::{Scene, SceneRef};

/// Tracks the hovered stack and computes the minimal transitions to a new one.
///
/// Leave events come inner to outer, then enter events outer to inner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Clone + Eq> {
    current: Vec<K>,
}

/// A hover transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer entered this entity.
    Enter(K),
    /// The pointer left this entity.
    Leave(K),
}

impl<K: Clone + Eq> HoverState<K> {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// The hovered stack, outer to inner.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// The innermost hovered entity.
    pub fn target(&self) -> Option<&K> {
        self.current.last()
    }

    /// Leave everything, inner to outer.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.current.drain(..).rev().map(HoverEvent::Leave).collect()
    }

    /// Move to `new_path` and return the transitions.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        let shared = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(old, new)| old == new)
            .count();

        let mut out: Vec<_> = self.current[shared..]
            .iter()
            .rev()
            .cloned()
            .map(HoverEvent::Leave)
            .collect();
        out.extend(new_path[shared..].iter().cloned().map(HoverEvent::Enter));

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}

/// Entities under `tile`, outer to inner: rectangle, text box, item.
pub fn hover_path(scene: &Scene<'_>, tile: Tile) -> Vec<SceneRef> {
    let mut path = scene.occupants_at(tile);
    path.reverse();
    path
}
