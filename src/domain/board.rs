use crate::domain::card::Card;
use crate::domain::ids::{BoardId, CardId, ColumnId, UserId};
use crate::domain::position::next_position;
use crate::remote::rows::{BoardRow, ColumnRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully assembled board aggregate: the board itself plus its ordered
/// columns, their ordered cards, and each card's label set.
///
/// The tree is always rebuilt whole from the remote store; it is never
/// patched incrementally, so two loads with no mutation in between compare
/// equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub background_color: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub columns: Vec<Column>,
}

impl Board {
    /// Looks up a column by id.
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Looks up a card anywhere on the board.
    pub fn find_card(&self, id: CardId) -> Option<&Card> {
        self.columns.iter().find_map(|column| column.card(id))
    }

    /// Position for a column appended to this board.
    pub fn next_column_position(&self) -> u32 {
        next_position(self.columns.iter().map(|column| column.position).max())
    }
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            background_color: row.background_color,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            columns: Vec::new(),
        }
    }
}

/// An ordered column on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub board_id: BoardId,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cards: Vec<Card>,
}

impl Column {
    /// Looks up a card in this column.
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Position for a card appended to this column.
    pub fn next_card_position(&self) -> u32 {
        next_position(self.cards.iter().map(|card| card.position).max())
    }
}

impl From<ColumnRow> for Column {
    fn from(row: ColumnRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            board_id: row.board_id,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
            cards: Vec::new(),
        }
    }
}
