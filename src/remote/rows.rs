//! Wire-level row types for the logical tables of the remote store.
//!
//! Rows are the flat shapes the remote speaks. The assembled tree lives in
//! [`crate::domain`]; `From<…Row>` impls there map rows into tree nodes.
//! Insert payloads omit the fields the remote assigns (id, timestamps);
//! patch payloads are all-optional partial updates.

use crate::domain::ids::{BoardId, CardId, CardLabelId, ColumnId, LabelId, MemberId, UserId};
use crate::domain::member::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `boards` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRow {
    pub id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub background_color: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `columns` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub id: ColumnId,
    pub title: String,
    pub board_id: BoardId,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `cards` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRow {
    pub id: CardId,
    pub title: String,
    pub description: Option<String>,
    pub column_id: ColumnId,
    pub position: u32,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub assigned_to: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `labels` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRow {
    pub id: LabelId,
    pub name: String,
    pub color: String,
    pub board_id: BoardId,
}

/// A row of the `card_labels` association table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLabelRow {
    pub id: CardLabelId,
    pub card_id: CardId,
    pub label_id: LabelId,
}

/// A row of the `board_members` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMemberRow {
    pub id: MemberId,
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: Role,
}

/// Insert payload for `boards`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBoard {
    pub title: String,
    pub description: Option<String>,
    pub background_color: Option<String>,
    pub owner_id: UserId,
}

/// Insert payload for `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewColumn {
    pub title: String,
    pub board_id: BoardId,
    pub position: u32,
}

/// Insert payload for `cards`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub title: String,
    pub description: Option<String>,
    pub column_id: ColumnId,
    pub position: u32,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub assigned_to: Option<UserId>,
}

/// Insert payload for `labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLabel {
    pub name: String,
    pub color: String,
    pub board_id: BoardId,
}

/// Insert payload for `board_members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBoardMember {
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: Role,
}

/// Partial update for `boards`.
///
/// `None` leaves a field unchanged. For nullable columns the inner `Option`
/// is the stored value, so `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub background_color: Option<Option<String>>,
}

/// Partial update for `columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnPatch {
    pub title: Option<String>,
    pub position: Option<u32>,
}

/// Partial update for `cards`. Same `None` / `Some(None)` convention as
/// [`BoardPatch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub column_id: Option<ColumnId>,
    pub position: Option<u32>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub assigned_to: Option<Option<UserId>>,
}

impl CardPatch {
    /// Patch that re-homes a card to a column slot, leaving content untouched.
    pub fn relocate(column_id: ColumnId, position: u32) -> Self {
        Self {
            column_id: Some(column_id),
            position: Some(position),
            ..Self::default()
        }
    }

    /// Patch that only sets the position.
    pub fn at_position(position: u32) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}
