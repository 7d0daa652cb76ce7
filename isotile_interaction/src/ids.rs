// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifier generation for entities created by gestures.

/// Produces fresh identifiers.
///
/// `kind` names what the id is for (`"connector"`, `"anchor"`), so an
/// implementation can namespace ids. Ids must not repeat; a duplicate makes
/// the resulting mutation fail validation.
pub trait IdSource {
    /// A new identifier.
    fn next_id(&mut self, kind: &str) -> String;
}

/// `<prefix><kind>-<n>` with a counter shared across kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("")
    }
}

impl SequentialIds {
    /// A counter starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// A counter starting at `next`, for resuming after a load.
    pub fn starting_at(prefix: impl Into<String>, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, kind: &str) -> String {
        let id = format!("{}{kind}-{}", self.prefix, self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl<F: FnMut(&str) -> String> IdSource for F {
    fn next_id(&mut self, kind: &str) -> String {
        self(kind)
    }
}
