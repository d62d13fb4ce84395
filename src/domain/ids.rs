use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Declares an opaque UUID-backed identifier for one entity kind.
///
/// Every table in the remote store is keyed by an opaque identity string;
/// separate newtypes keep a card id from ever being passed where a column id
/// is expected.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifies a user account.
    UserId
);
entity_id!(
    /// Identifies a board.
    BoardId
);
entity_id!(
    /// Identifies a column on a board.
    ColumnId
);
entity_id!(
    /// Identifies a card in a column.
    CardId
);
entity_id!(
    /// Identifies a label owned by a board.
    LabelId
);
entity_id!(
    /// Identifies a board membership row.
    MemberId
);
entity_id!(
    /// Identifies a card-label association row.
    CardLabelId
);
