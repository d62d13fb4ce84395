use crate::domain::ids::{BoardId, CardId, ColumnId, LabelId, UserId};
use crate::remote::rows::{CardRow, LabelRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card in a column, carrying its label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
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
    pub labels: Vec<Label>,
}

impl Card {
    /// Checks whether the card carries the given label.
    pub fn has_label(&self, id: LabelId) -> bool {
        self.labels.iter().any(|label| label.id == id)
    }

    /// Checks whether the card's due date has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            column_id: row.column_id,
            position: row.position,
            due_date: row.due_date,
            created_by: row.created_by,
            assigned_to: row.assigned_to,
            created_at: row.created_at,
            updated_at: row.updated_at,
            labels: Vec::new(),
        }
    }
}

/// A label owned by a board, attachable to any of its cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub color: String,
    pub board_id: BoardId,
}

impl From<LabelRow> for Label {
    fn from(row: LabelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            color: row.color,
            board_id: row.board_id,
        }
    }
}
