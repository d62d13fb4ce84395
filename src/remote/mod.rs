//! The remote collaborator seam.
//!
//! The hosted backend is consumed through two opaque contracts: row-level
//! CRUD over logical tables ([`RemoteStore`]) and authentication
//! ([`AuthBackend`]). The wire protocol behind them is out of scope; the
//! bundled [`memory`] implementations satisfy the same contracts in-process.

use crate::domain::ids::{BoardId, CardId, ColumnId, LabelId, UserId};
use crate::domain::member::User;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub mod memory;
pub mod rows;

pub use rows::{
    BoardMemberRow, BoardPatch, BoardRow, CardLabelRow, CardPatch, CardRow, ColumnPatch,
    ColumnRow, LabelRow, NewBoard, NewBoardMember, NewCard, NewColumn, NewLabel,
};

/// An authenticated session as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
}

/// Auth state change notification delivered by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
}

/// Row-level CRUD against the remote store's logical tables.
///
/// The remote is the source of truth for every table. Implementations own
/// the referential rules: deleting a board takes its columns, cards, and
/// memberships with it; deleting a column takes its cards; deleting a label
/// takes its card associations but never the cards.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches a single board row; `NotFound` when the id is unknown.
    async fn fetch_board(&self, id: BoardId) -> Result<BoardRow>;

    /// Fetches the board rows for the given id set. Unknown ids are skipped.
    async fn fetch_boards(&self, ids: &[BoardId]) -> Result<Vec<BoardRow>>;

    /// All memberships held by a user.
    async fn fetch_memberships_for_user(&self, user_id: UserId) -> Result<Vec<BoardMemberRow>>;

    /// All memberships of a board.
    async fn fetch_members_for_board(&self, board_id: BoardId) -> Result<Vec<BoardMemberRow>>;

    /// A board's columns, ordered by ascending position.
    async fn fetch_columns(&self, board_id: BoardId) -> Result<Vec<ColumnRow>>;

    /// A column's cards, ordered by ascending position.
    async fn fetch_cards(&self, column_id: ColumnId) -> Result<Vec<CardRow>>;

    /// The labels attached to a card.
    async fn fetch_labels_for_card(&self, card_id: CardId) -> Result<Vec<LabelRow>>;

    /// The highest card position in a column, or `None` when it is empty.
    async fn max_card_position(&self, column_id: ColumnId) -> Result<Option<u32>>;

    async fn insert_board(&self, board: NewBoard) -> Result<BoardRow>;

    async fn insert_member(&self, member: NewBoardMember) -> Result<BoardMemberRow>;

    async fn insert_column(&self, column: NewColumn) -> Result<ColumnRow>;

    async fn insert_card(&self, card: NewCard) -> Result<CardRow>;

    async fn insert_label(&self, label: NewLabel) -> Result<LabelRow>;

    /// Attaches a label to a card; attaching twice is a no-op.
    async fn attach_label(&self, card_id: CardId, label_id: LabelId) -> Result<()>;

    /// Detaches a label from a card; detaching an absent label is a no-op.
    async fn detach_label(&self, card_id: CardId, label_id: LabelId) -> Result<()>;

    async fn update_board(&self, id: BoardId, patch: BoardPatch) -> Result<()>;

    async fn update_column(&self, id: ColumnId, patch: ColumnPatch) -> Result<()>;

    async fn update_card(&self, id: CardId, patch: CardPatch) -> Result<()>;

    /// Deletes a board and everything hanging off it.
    async fn delete_board(&self, id: BoardId) -> Result<()>;

    /// Deletes a column and its cards.
    async fn delete_column(&self, id: ColumnId) -> Result<()>;

    async fn delete_card(&self, id: CardId) -> Result<()>;

    /// Deletes a label and its card associations; the cards survive.
    async fn delete_label(&self, id: LabelId) -> Result<()>;
}

/// Authentication operations exposed by the hosted backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Registers a new account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session>;

    /// Signs an existing account in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<()>;

    /// The currently signed-in user, if any.
    async fn current_user(&self) -> Result<Option<User>>;

    /// Subscribes to auth state changes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}
