// Copyright 2025 the Isotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String identifiers for persisted entities.
//!
//! Every entity is referenced by id and resolved by lookup; nothing holds a
//! pointer into the model. Each kind gets its own newtype so a connector id
//! cannot be passed where an item id is expected.

use core::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a model item; a view item placing it uses the same id.
    ItemId
);
string_id!(
    /// Identifier of a view.
    ViewId
);
string_id!(
    /// Identifier of a connector.
    ConnectorId
);
string_id!(
    /// Identifier of one connector endpoint.
    AnchorId
);
string_id!(
    /// Identifier of a connector label.
    LabelId
);
string_id!(
    /// Identifier of a rectangle.
    RectangleId
);
string_id!(
    /// Identifier of a text box.
    TextBoxId
);
string_id!(
    /// Identifier of a palette color.
    ColorId
);
string_id!(
    /// Identifier of an icon.
    IconId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_transparent_strings() {
        let id = ItemId::from("server-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""server-1""#);
        let back: ItemId = serde_json::from_str(r#""server-1""#).unwrap();
        assert_eq!(back, id);
        assert_eq!(id.to_string(), "server-1");
    }
}
