//! The board aggregate manager.
//!
//! [`BoardStore`] owns the in-memory representation of the active board and
//! the cached board listing, applies mutations, and reconciles with the
//! remote store after every one of them. The remote is ground truth: local
//! tree state is never merged with remote results, it is discarded and
//! rebuilt by the full four-level fetch (board → columns → cards → labels).
//!
//! Each operation issues its remote calls strictly sequentially and returns
//! a typed [`Result`]. Multi-call sequences that fail part-way compensate by
//! undoing what they already applied, best-effort, logging when the cleanup
//! itself fails.

use crate::domain::board::{Board, Column};
use crate::domain::card::{Card, Label};
use crate::domain::ids::{BoardId, CardId, ColumnId, LabelId, UserId};
use crate::domain::member::{BoardMember, Role, User};
use crate::domain::position::next_position;
use crate::error::{Result, TavolaError};
use crate::remote::rows::{
    BoardPatch, CardPatch, ColumnPatch, NewBoard, NewBoardMember, NewCard, NewColumn, NewLabel,
};
use crate::remote::{AuthBackend, RemoteStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Columns seeded into every new board, in position order.
const DEFAULT_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Manages one caller's view of their boards.
///
/// A store assumes a single active caller: mutations take `&mut self` and no
/// client-side locking exists. Two stores pointed at the same board can race;
/// the last full reload wins.
pub struct BoardStore {
    remote: Arc<dyn RemoteStore>,
    auth: Arc<dyn AuthBackend>,
    boards: Vec<Board>,
    current: Option<Board>,
}

impl BoardStore {
    pub fn new(remote: Arc<dyn RemoteStore>, auth: Arc<dyn AuthBackend>) -> Self {
        Self {
            remote,
            auth,
            boards: Vec::new(),
            current: None,
        }
    }

    /// The cached board listing (summaries; columns are not populated).
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The fully loaded active board, if one has been loaded.
    pub fn current_board(&self) -> Option<&Board> {
        self.current.as_ref()
    }

    async fn require_user(&self) -> Result<User> {
        self.auth
            .current_user()
            .await?
            .ok_or(TavolaError::NotAuthenticated)
    }

    /// Fetches every board the user holds a membership on.
    ///
    /// A user with no memberships gets an empty listing, not an error.
    pub async fn list_boards(&mut self, user_id: UserId) -> Result<&[Board]> {
        let memberships = self.remote.fetch_memberships_for_user(user_id).await?;
        if memberships.is_empty() {
            self.boards.clear();
            return Ok(&self.boards);
        }

        let ids: Vec<BoardId> = memberships.iter().map(|member| member.board_id).collect();
        let rows = self.remote.fetch_boards(&ids).await?;
        self.boards = rows.into_iter().map(Board::from).collect();
        Ok(&self.boards)
    }

    /// Fetches the membership list of a board.
    pub async fn list_members(&self, board_id: BoardId) -> Result<Vec<BoardMember>> {
        let rows = self.remote.fetch_members_for_board(board_id).await?;
        Ok(rows.into_iter().map(BoardMember::from).collect())
    }

    /// Loads the full aggregate for a board and makes it the active board.
    ///
    /// Any stage failing aborts the whole load; no partial tree is exposed.
    pub async fn load_board(&mut self, board_id: BoardId) -> Result<&Board> {
        let board = self.fetch_board_tree(board_id).await?;
        Ok(self.current.insert(board))
    }

    /// The four-level fetch: board, columns by position, cards by position,
    /// labels per card. Issued strictly sequentially.
    async fn fetch_board_tree(&self, board_id: BoardId) -> Result<Board> {
        let row = self.remote.fetch_board(board_id).await?;
        let mut board = Board::from(row);

        let column_rows = self.remote.fetch_columns(board_id).await?;
        let mut columns: Vec<Column> = column_rows.into_iter().map(Column::from).collect();

        for column in &mut columns {
            let card_rows = self.remote.fetch_cards(column.id).await?;
            let mut cards: Vec<Card> = card_rows.into_iter().map(Card::from).collect();
            for card in &mut cards {
                let label_rows = self.remote.fetch_labels_for_card(card.id).await?;
                card.labels = label_rows.into_iter().map(Label::from).collect();
            }
            column.cards = cards;
        }

        board.columns = columns;
        Ok(board)
    }

    /// Rebuilds the active board from the remote store. No-op when no board
    /// is loaded.
    async fn refresh_current(&mut self) -> Result<()> {
        let Some(board_id) = self.current.as_ref().map(|board| board.id) else {
            return Ok(());
        };
        let board = self.fetch_board_tree(board_id).await?;
        self.current = Some(board);
        Ok(())
    }

    /// Creates a board owned by the calling identity, with its `owner`
    /// membership and the three default columns.
    ///
    /// If the membership or any default-column insert fails, the
    /// just-created board is deleted again so no half-seeded board survives,
    /// and the seeding failure is returned.
    pub async fn create_board(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        background_color: Option<String>,
    ) -> Result<BoardId> {
        let user = self.require_user().await?;
        let board = self
            .remote
            .insert_board(NewBoard {
                title: title.into(),
                description,
                background_color,
                owner_id: user.id,
            })
            .await?;
        debug!(board = %board.id, "created board, seeding membership and default columns");

        if let Err(err) = self.seed_board(board.id, user.id).await {
            if let Err(cleanup) = self.remote.delete_board(board.id).await {
                warn!(board = %board.id, error = %cleanup, "failed to delete half-seeded board");
            }
            return Err(err);
        }

        self.list_boards(user.id).await?;
        Ok(board.id)
    }

    async fn seed_board(&self, board_id: BoardId, owner: UserId) -> Result<()> {
        self.remote
            .insert_member(NewBoardMember {
                board_id,
                user_id: owner,
                role: Role::Owner,
            })
            .await?;

        for (position, title) in DEFAULT_COLUMNS.iter().enumerate() {
            self.remote
                .insert_column(NewColumn {
                    title: (*title).to_string(),
                    board_id,
                    position: position as u32,
                })
                .await?;
        }
        Ok(())
    }

    /// Deletes a board. Only its owner may; the ownership check happens
    /// before any delete call is issued. Cascading deletion of columns,
    /// cards, and memberships is the remote's referential rules.
    pub async fn delete_board(&mut self, board_id: BoardId) -> Result<()> {
        let user = self.require_user().await?;
        let board = self.remote.fetch_board(board_id).await?;
        if board.owner_id != user.id {
            return Err(TavolaError::PermissionDenied(
                "only the board owner can delete a board".to_string(),
            ));
        }

        self.remote.delete_board(board_id).await?;
        self.boards.retain(|cached| cached.id != board_id);
        if self.current.as_ref().is_some_and(|b| b.id == board_id) {
            self.current = None;
        }
        Ok(())
    }

    /// Updates board fields, then refreshes the cached listing entry and the
    /// active board.
    pub async fn update_board(&mut self, board_id: BoardId, patch: BoardPatch) -> Result<()> {
        self.remote.update_board(board_id, patch).await?;
        if self.boards.iter().any(|board| board.id == board_id) {
            let row = self.remote.fetch_board(board_id).await?;
            if let Some(entry) = self.boards.iter_mut().find(|board| board.id == board_id) {
                *entry = Board::from(row);
            }
        }
        self.refresh_current().await
    }

    /// Appends a column to a board at the next free position.
    pub async fn create_column(
        &mut self,
        board_id: BoardId,
        title: impl Into<String>,
    ) -> Result<ColumnId> {
        let columns = self.remote.fetch_columns(board_id).await?;
        let position = next_position(columns.iter().map(|column| column.position).max());
        let column = self
            .remote
            .insert_column(NewColumn {
                title: title.into(),
                board_id,
                position,
            })
            .await?;
        self.refresh_current().await?;
        Ok(column.id)
    }

    pub async fn update_column_title(
        &mut self,
        column_id: ColumnId,
        title: impl Into<String>,
    ) -> Result<()> {
        self.remote
            .update_column(
                column_id,
                ColumnPatch {
                    title: Some(title.into()),
                    position: None,
                },
            )
            .await?;
        self.refresh_current().await
    }

    /// Deletes a column and (through the remote's cascade) its cards.
    /// Sibling column positions are not renumbered; the gap stays.
    pub async fn delete_column(&mut self, column_id: ColumnId) -> Result<()> {
        self.remote.delete_column(column_id).await?;
        self.refresh_current().await
    }

    /// Creates a card at the end of a column: position is one past the
    /// column's highest, or 0 when the column is empty.
    pub async fn create_card(
        &mut self,
        column_id: ColumnId,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<CardId> {
        let user = self.require_user().await?;
        let position = next_position(self.remote.max_card_position(column_id).await?);
        let card = self
            .remote
            .insert_card(NewCard {
                title: title.into(),
                description,
                column_id,
                position,
                due_date: None,
                created_by: user.id,
                assigned_to: None,
            })
            .await?;
        self.refresh_current().await?;
        Ok(card.id)
    }

    pub async fn update_card(&mut self, card_id: CardId, patch: CardPatch) -> Result<()> {
        self.remote.update_card(card_id, patch).await?;
        self.refresh_current().await
    }

    /// Deletes a card. Surviving siblings keep their positions; the gap is
    /// tolerated until the next reorder re-packs the column.
    pub async fn delete_card(&mut self, card_id: CardId) -> Result<()> {
        self.remote.delete_card(card_id).await?;
        self.refresh_current().await
    }

    /// Moves a card to the given column and position, exactly as supplied.
    /// The caller is responsible for a position consistent with the
    /// destination column's ordering; siblings are not renumbered.
    pub async fn move_card(
        &mut self,
        card_id: CardId,
        new_column_id: ColumnId,
        new_position: u32,
    ) -> Result<()> {
        self.remote
            .update_card(card_id, CardPatch::relocate(new_column_id, new_position))
            .await?;
        self.refresh_current().await
    }

    /// Re-packs a column: `ordered[i]` gets position `i`.
    ///
    /// Applied as one update per card, in index order. If an update fails
    /// mid-sequence, the updates already applied are rolled back to the
    /// positions snapshotted before the reorder (best-effort, in reverse
    /// application order) and the original failure is returned.
    pub async fn reorder_cards(&mut self, column_id: ColumnId, ordered: &[CardId]) -> Result<()> {
        let snapshot = self.remote.fetch_cards(column_id).await?;
        debug!(column = %column_id, cards = ordered.len(), "reordering cards");

        let mut applied: Vec<(CardId, u32)> = Vec::new();
        for (index, card_id) in ordered.iter().enumerate() {
            match self
                .remote
                .update_card(*card_id, CardPatch::at_position(index as u32))
                .await
            {
                Ok(()) => {
                    // Cards not in the snapshot (moved in from elsewhere by a
                    // stale caller) have no prior position to restore.
                    if let Some(prior) = snapshot.iter().find(|card| card.id == *card_id) {
                        applied.push((*card_id, prior.position));
                    }
                }
                Err(err) => {
                    self.rollback_positions(&applied).await;
                    return Err(err);
                }
            }
        }

        self.refresh_current().await
    }

    async fn rollback_positions(&self, applied: &[(CardId, u32)]) {
        for (card_id, position) in applied.iter().rev() {
            if let Err(err) = self
                .remote
                .update_card(*card_id, CardPatch::at_position(*position))
                .await
            {
                warn!(card = %card_id, error = %err, "failed to restore card position during rollback");
            }
        }
    }

    /// Creates a label on a board.
    pub async fn create_label(
        &mut self,
        board_id: BoardId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<LabelId> {
        let label = self
            .remote
            .insert_label(NewLabel {
                name: name.into(),
                color: color.into(),
                board_id,
            })
            .await?;
        self.refresh_current().await?;
        Ok(label.id)
    }

    /// Deletes a label everywhere it is attached. Cards are never deleted by
    /// label removal.
    pub async fn delete_label(&mut self, label_id: LabelId) -> Result<()> {
        self.remote.delete_label(label_id).await?;
        self.refresh_current().await
    }

    pub async fn attach_label(&mut self, card_id: CardId, label_id: LabelId) -> Result<()> {
        self.remote.attach_label(card_id, label_id).await?;
        self.refresh_current().await
    }

    pub async fn detach_label(&mut self, card_id: CardId, label_id: LabelId) -> Result<()> {
        self.remote.detach_label(card_id, label_id).await?;
        self.refresh_current().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::{is_dense, is_strictly_increasing};
    use crate::remote::memory::{InMemoryAuth, InMemoryRemote};

    async fn signed_in_store() -> (BoardStore, Arc<InMemoryRemote>, Arc<InMemoryAuth>, User) {
        let remote = Arc::new(InMemoryRemote::new());
        let auth = Arc::new(InMemoryAuth::new());
        let session = auth.sign_up("owner@example.com", "hunter2").await.unwrap();
        let store = BoardStore::new(remote.clone(), auth.clone());
        (store, remote, auth, session.user)
    }

    /// Creates a board and loads it, returning its id and first column.
    async fn board_with_column(store: &mut BoardStore) -> (BoardId, ColumnId) {
        let board_id = store.create_board("Sprint", None, None).await.unwrap();
        let board = store.load_board(board_id).await.unwrap();
        let column_id = board.columns[0].id;
        (board_id, column_id)
    }

    #[tokio::test]
    async fn test_create_board_seeds_three_default_columns() {
        let (mut store, _remote, _auth, user) = signed_in_store().await;

        let board_id = store.create_board("Sprint", None, None).await.unwrap();
        let board = store.load_board(board_id).await.unwrap();

        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        let positions: Vec<u32> = board.columns.iter().map(|c| c.position).collect();
        assert!(is_dense(&positions));

        let members = store.list_members(board_id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].role, Role::Owner);
        assert_eq!(members[0].user_id, user.id);
        assert_eq!(members[0].board_id, board_id);
    }

    #[tokio::test]
    async fn test_create_board_requires_authentication() {
        let remote = Arc::new(InMemoryRemote::new());
        let auth = Arc::new(InMemoryAuth::new());
        let mut store = BoardStore::new(remote, auth);

        let err = store.create_board("Sprint", None, None).await.unwrap_err();
        assert!(matches!(err, TavolaError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_create_board_rolls_back_when_membership_insert_fails() {
        let (mut store, remote, _auth, _user) = signed_in_store().await;
        remote.fail_next_insert_member();

        let err = store.create_board("Sprint", None, None).await.unwrap_err();
        assert!(matches!(err, TavolaError::RemoteOperationFailed(_)));
        assert_eq!(remote.board_count(), 0);
        assert!(store.boards().is_empty());
    }

    #[tokio::test]
    async fn test_create_board_rolls_back_when_column_seed_fails() {
        let (mut store, remote, _auth, _user) = signed_in_store().await;
        remote.fail_next_insert_column();

        assert!(store.create_board("Sprint", None, None).await.is_err());
        assert_eq!(remote.board_count(), 0);
    }

    #[tokio::test]
    async fn test_create_board_refreshes_the_listing() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;

        let board_id = store.create_board("Sprint", None, None).await.unwrap();
        assert_eq!(store.boards().len(), 1);
        assert_eq!(store.boards()[0].id, board_id);
    }

    #[tokio::test]
    async fn test_list_boards_empty_for_unknown_user_is_not_an_error() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let boards = store.list_boards(UserId::new()).await.unwrap();
        assert!(boards.is_empty());
    }

    #[tokio::test]
    async fn test_load_board_unknown_id_is_not_found() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let err = store.load_board(BoardId::new()).await.unwrap_err();
        assert!(matches!(err, TavolaError::NotFound { entity: "Board", .. }));
        assert!(store.current_board().is_none());
    }

    #[tokio::test]
    async fn test_load_board_assembles_the_full_tree() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (board_id, column_id) = board_with_column(&mut store).await;

        let card_id = store
            .create_card(column_id, "Ship it", Some("v1.0".to_string()))
            .await
            .unwrap();
        let label_id = store
            .create_label(board_id, "release", "#00ff00")
            .await
            .unwrap();
        store.attach_label(card_id, label_id).await.unwrap();

        let board = store.load_board(board_id).await.unwrap();
        let card = board.find_card(card_id).unwrap();
        assert_eq!(card.title, "Ship it");
        assert_eq!(card.description.as_deref(), Some("v1.0"));
        assert_eq!(card.labels.len(), 1);
        assert_eq!(card.labels[0].name, "release");
    }

    #[tokio::test]
    async fn test_load_board_twice_yields_identical_trees() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (board_id, column_id) = board_with_column(&mut store).await;
        store.create_card(column_id, "A", None).await.unwrap();
        store.create_card(column_id, "B", None).await.unwrap();

        let first = store.load_board(board_id).await.unwrap().clone();
        let second = store.load_board(board_id).await.unwrap().clone();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_create_card_positions_append() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;

        store.create_card(column_id, "first", None).await.unwrap();
        store.create_card(column_id, "second", None).await.unwrap();
        store.create_card(column_id, "third", None).await.unwrap();

        let board = store.current_board().unwrap();
        let column = board.column(column_id).unwrap();
        let positions: Vec<u32> = column.cards.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_create_card_requires_authentication() {
        let (mut store, _remote, auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;
        auth.sign_out().await.unwrap();

        let err = store.create_card(column_id, "nope", None).await.unwrap_err();
        assert!(matches!(err, TavolaError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_delete_card_leaves_a_gap_and_create_still_appends() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;

        store.create_card(column_id, "a", None).await.unwrap();
        let middle = store.create_card(column_id, "b", None).await.unwrap();
        store.create_card(column_id, "c", None).await.unwrap();

        store.delete_card(middle).await.unwrap();

        let board = store.current_board().unwrap();
        let column = board.column(column_id).unwrap();
        let positions: Vec<u32> = column.cards.iter().map(|c| c.position).collect();
        // No renumbering after deletion.
        assert_eq!(positions, vec![0, 2]);
        assert!(is_strictly_increasing(&positions));

        store.create_card(column_id, "d", None).await.unwrap();
        let board = store.current_board().unwrap();
        let column = board.column(column_id).unwrap();
        let positions: Vec<u32> = column.cards.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 2, 3]);
    }

    #[tokio::test]
    async fn test_move_card_takes_the_callers_placement_verbatim() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (board_id, column_id) = board_with_column(&mut store).await;
        let card_id = store.create_card(column_id, "a", None).await.unwrap();

        let destination = store.current_board().unwrap().columns[1].id;
        store.move_card(card_id, destination, 7).await.unwrap();

        let board = store.load_board(board_id).await.unwrap();
        assert!(board.column(column_id).unwrap().cards.is_empty());
        let moved = board.column(destination).unwrap().card(card_id).unwrap();
        assert_eq!(moved.position, 7);
    }

    #[tokio::test]
    async fn test_reorder_cards_assigns_dense_positions_in_given_order() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;

        let c1 = store.create_card(column_id, "one", None).await.unwrap();
        let c2 = store.create_card(column_id, "two", None).await.unwrap();
        let c3 = store.create_card(column_id, "three", None).await.unwrap();

        store.reorder_cards(column_id, &[c3, c1, c2]).await.unwrap();

        let board = store.current_board().unwrap();
        let column = board.column(column_id).unwrap();
        let order: Vec<CardId> = column.cards.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![c3, c1, c2]);
        let positions: Vec<u32> = column.cards.iter().map(|c| c.position).collect();
        assert!(is_dense(&positions));
    }

    #[tokio::test]
    async fn test_reorder_cards_rolls_back_applied_updates_on_failure() {
        let (mut store, remote, _auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;

        let c1 = store.create_card(column_id, "one", None).await.unwrap();
        let c2 = store.create_card(column_id, "two", None).await.unwrap();
        let c3 = store.create_card(column_id, "three", None).await.unwrap();

        let before = remote.fetch_cards(column_id).await.unwrap();

        // First update (c3 -> 0) succeeds, second (c1 -> 1) fails.
        remote.fail_update_card_after(1);
        let err = store
            .reorder_cards(column_id, &[c3, c1, c2])
            .await
            .unwrap_err();
        assert!(matches!(err, TavolaError::RemoteOperationFailed(_)));

        let after = remote.fetch_cards(column_id).await.unwrap();
        let positions = |rows: &[crate::remote::rows::CardRow]| -> Vec<(CardId, u32)> {
            rows.iter().map(|row| (row.id, row.position)).collect()
        };
        assert_eq!(positions(&after), positions(&before));
    }

    #[tokio::test]
    async fn test_delete_board_by_non_owner_is_denied_and_deletes_nothing() {
        let (mut store, _remote, auth, _owner) = signed_in_store().await;
        let (board_id, _column_id) = board_with_column(&mut store).await;

        // A different identity signs in on the same device.
        auth.sign_up("intruder@example.com", "hunter2").await.unwrap();

        let err = store.delete_board(board_id).await.unwrap_err();
        assert!(matches!(err, TavolaError::PermissionDenied(_)));
        assert!(store.load_board(board_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_board_by_owner_clears_cached_state() {
        let (mut store, remote, _auth, _owner) = signed_in_store().await;
        let (board_id, _column_id) = board_with_column(&mut store).await;
        assert!(store.current_board().is_some());

        store.delete_board(board_id).await.unwrap();

        assert!(store.boards().is_empty());
        assert!(store.current_board().is_none());
        assert_eq!(remote.board_count(), 0);
    }

    #[tokio::test]
    async fn test_update_card_sets_and_clears_fields() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;
        let card_id = store.create_card(column_id, "a", None).await.unwrap();

        let due = chrono::Utc::now() + chrono::Duration::days(3);
        store
            .update_card(
                card_id,
                CardPatch {
                    description: Some(Some("details".to_string())),
                    due_date: Some(Some(due)),
                    ..CardPatch::default()
                },
            )
            .await
            .unwrap();

        let card = store.current_board().unwrap().find_card(card_id).unwrap();
        assert_eq!(card.description.as_deref(), Some("details"));
        assert_eq!(card.due_date, Some(due));

        store
            .update_card(
                card_id,
                CardPatch {
                    due_date: Some(None),
                    ..CardPatch::default()
                },
            )
            .await
            .unwrap();

        let card = store.current_board().unwrap().find_card(card_id).unwrap();
        assert_eq!(card.description.as_deref(), Some("details"));
        assert!(card.due_date.is_none());
    }

    #[tokio::test]
    async fn test_update_column_title() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;

        store.update_column_title(column_id, "Backlog").await.unwrap();

        let board = store.current_board().unwrap();
        assert_eq!(board.column(column_id).unwrap().title, "Backlog");
    }

    #[tokio::test]
    async fn test_delete_column_drops_its_cards_and_keeps_sibling_gaps() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (_board_id, column_id) = board_with_column(&mut store).await;
        store.create_card(column_id, "doomed", None).await.unwrap();

        store.delete_column(column_id).await.unwrap();

        let board = store.current_board().unwrap();
        assert_eq!(board.columns.len(), 2);
        assert!(board.column(column_id).is_none());
        // Siblings keep positions 1 and 2; the gap at 0 stays.
        let positions: Vec<u32> = board.columns.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert!(is_strictly_increasing(&positions));
    }

    #[tokio::test]
    async fn test_create_column_appends_after_existing() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (board_id, _column_id) = board_with_column(&mut store).await;

        let new_column = store.create_column(board_id, "Blocked").await.unwrap();

        let board = store.current_board().unwrap();
        let appended = board.column(new_column).unwrap();
        assert_eq!(appended.position, 3);
        assert_eq!(appended.title, "Blocked");
    }

    #[tokio::test]
    async fn test_label_removal_spares_cards() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (board_id, column_id) = board_with_column(&mut store).await;
        let card_a = store.create_card(column_id, "a", None).await.unwrap();
        let card_b = store.create_card(column_id, "b", None).await.unwrap();

        let label_id = store.create_label(board_id, "bug", "#ff0000").await.unwrap();
        store.attach_label(card_a, label_id).await.unwrap();
        store.attach_label(card_b, label_id).await.unwrap();

        let board = store.current_board().unwrap();
        assert!(board.find_card(card_a).unwrap().has_label(label_id));
        assert!(board.find_card(card_b).unwrap().has_label(label_id));

        store.delete_label(label_id).await.unwrap();

        let board = store.current_board().unwrap();
        let column = board.column(column_id).unwrap();
        assert_eq!(column.cards.len(), 2);
        assert!(column.cards.iter().all(|card| card.labels.is_empty()));
    }

    #[tokio::test]
    async fn test_detach_label_only_affects_one_card() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (board_id, column_id) = board_with_column(&mut store).await;
        let card_a = store.create_card(column_id, "a", None).await.unwrap();
        let card_b = store.create_card(column_id, "b", None).await.unwrap();
        let label_id = store.create_label(board_id, "bug", "#ff0000").await.unwrap();
        store.attach_label(card_a, label_id).await.unwrap();
        store.attach_label(card_b, label_id).await.unwrap();

        store.detach_label(card_a, label_id).await.unwrap();

        let board = store.current_board().unwrap();
        assert!(!board.find_card(card_a).unwrap().has_label(label_id));
        assert!(board.find_card(card_b).unwrap().has_label(label_id));
    }

    #[tokio::test]
    async fn test_update_board_refreshes_listing_and_active_board() {
        let (mut store, _remote, _auth, _user) = signed_in_store().await;
        let (board_id, _column_id) = board_with_column(&mut store).await;

        store
            .update_board(
                board_id,
                BoardPatch {
                    title: Some("Renamed".to_string()),
                    ..BoardPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(store.boards()[0].title, "Renamed");
        assert_eq!(store.current_board().unwrap().title, "Renamed");
    }
}
