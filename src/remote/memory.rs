//! In-memory implementations of the remote contracts.
//!
//! These back the test suite and local development. They enforce the same
//! referential rules the hosted backend does, assign v4 ids and fresh
//! timestamps on insert, and expose one-shot fault switches so the
//! partial-failure paths of multi-call operations can be driven from tests.

use crate::domain::ids::{BoardId, CardId, CardLabelId, ColumnId, LabelId, MemberId, UserId};
use crate::domain::member::User;
use crate::error::{Result, TavolaError};
use crate::remote::rows::{
    BoardMemberRow, BoardPatch, BoardRow, CardLabelRow, CardPatch, CardRow, ColumnPatch,
    ColumnRow, LabelRow, NewBoard, NewBoardMember, NewCard, NewColumn, NewLabel,
};
use crate::remote::{AuthBackend, AuthEvent, RemoteStore, Session};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    boards: HashMap<BoardId, BoardRow>,
    columns: HashMap<ColumnId, ColumnRow>,
    cards: HashMap<CardId, CardRow>,
    labels: HashMap<LabelId, LabelRow>,
    card_labels: Vec<CardLabelRow>,
    members: HashMap<MemberId, BoardMemberRow>,
}

/// One-shot fault switches used to drive partial-failure paths.
#[derive(Default)]
struct FaultPlan {
    insert_member: bool,
    insert_column: bool,
    update_card_after: Option<u32>,
}

/// In-memory [`RemoteStore`].
#[derive(Default)]
pub struct InMemoryRemote {
    tables: Mutex<Tables>,
    faults: Mutex<FaultPlan>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `insert_member` call fail. Test support.
    pub fn fail_next_insert_member(&self) {
        self.faults().insert_member = true;
    }

    /// Makes the next `insert_column` call fail. Test support.
    pub fn fail_next_insert_column(&self) {
        self.faults().insert_column = true;
    }

    /// Lets `count` further `update_card` calls succeed, then fails the next
    /// one. Test support.
    pub fn fail_update_card_after(&self, count: u32) {
        self.faults().update_card_after = Some(count);
    }

    /// Number of board rows currently stored. Test support.
    pub fn board_count(&self) -> usize {
        self.tables().boards.len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn faults(&self) -> MutexGuard<'_, FaultPlan> {
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn injected(op: &str) -> TavolaError {
        TavolaError::RemoteOperationFailed(format!("injected fault: {op}"))
    }

    fn take_update_card_fault(&self) -> Result<()> {
        let mut faults = self.faults();
        match faults.update_card_after {
            Some(0) => {
                faults.update_card_after = None;
                Err(Self::injected("update_card"))
            }
            Some(remaining) => {
                faults.update_card_after = Some(remaining - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemote {
    async fn fetch_board(&self, id: BoardId) -> Result<BoardRow> {
        self.tables()
            .boards
            .get(&id)
            .cloned()
            .ok_or_else(|| TavolaError::not_found("Board", id))
    }

    async fn fetch_boards(&self, ids: &[BoardId]) -> Result<Vec<BoardRow>> {
        let tables = self.tables();
        let mut rows: Vec<BoardRow> = ids
            .iter()
            .filter_map(|id| tables.boards.get(id).cloned())
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn fetch_memberships_for_user(&self, user_id: UserId) -> Result<Vec<BoardMemberRow>> {
        Ok(self
            .tables()
            .members
            .values()
            .filter(|member| member.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn fetch_members_for_board(&self, board_id: BoardId) -> Result<Vec<BoardMemberRow>> {
        Ok(self
            .tables()
            .members
            .values()
            .filter(|member| member.board_id == board_id)
            .cloned()
            .collect())
    }

    async fn fetch_columns(&self, board_id: BoardId) -> Result<Vec<ColumnRow>> {
        let tables = self.tables();
        let mut rows: Vec<ColumnRow> = tables
            .columns
            .values()
            .filter(|column| column.board_id == board_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.position, a.created_at).cmp(&(b.position, b.created_at)));
        Ok(rows)
    }

    async fn fetch_cards(&self, column_id: ColumnId) -> Result<Vec<CardRow>> {
        let tables = self.tables();
        let mut rows: Vec<CardRow> = tables
            .cards
            .values()
            .filter(|card| card.column_id == column_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.position, a.created_at).cmp(&(b.position, b.created_at)));
        Ok(rows)
    }

    async fn fetch_labels_for_card(&self, card_id: CardId) -> Result<Vec<LabelRow>> {
        let tables = self.tables();
        let mut rows: Vec<LabelRow> = tables
            .card_labels
            .iter()
            .filter(|link| link.card_id == card_id)
            .filter_map(|link| tables.labels.get(&link.label_id).cloned())
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn max_card_position(&self, column_id: ColumnId) -> Result<Option<u32>> {
        Ok(self
            .tables()
            .cards
            .values()
            .filter(|card| card.column_id == column_id)
            .map(|card| card.position)
            .max())
    }

    async fn insert_board(&self, board: NewBoard) -> Result<BoardRow> {
        let now = Utc::now();
        let row = BoardRow {
            id: BoardId::new(),
            title: board.title,
            description: board.description,
            background_color: board.background_color,
            owner_id: board.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.tables().boards.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_member(&self, member: NewBoardMember) -> Result<BoardMemberRow> {
        {
            let mut faults = self.faults();
            if faults.insert_member {
                faults.insert_member = false;
                return Err(Self::injected("insert_member"));
            }
        }
        let mut tables = self.tables();
        if !tables.boards.contains_key(&member.board_id) {
            return Err(TavolaError::not_found("Board", member.board_id));
        }
        let row = BoardMemberRow {
            id: MemberId::new(),
            board_id: member.board_id,
            user_id: member.user_id,
            role: member.role,
        };
        tables.members.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_column(&self, column: NewColumn) -> Result<ColumnRow> {
        {
            let mut faults = self.faults();
            if faults.insert_column {
                faults.insert_column = false;
                return Err(Self::injected("insert_column"));
            }
        }
        let mut tables = self.tables();
        if !tables.boards.contains_key(&column.board_id) {
            return Err(TavolaError::not_found("Board", column.board_id));
        }
        let now = Utc::now();
        let row = ColumnRow {
            id: ColumnId::new(),
            title: column.title,
            board_id: column.board_id,
            position: column.position,
            created_at: now,
            updated_at: now,
        };
        tables.columns.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_card(&self, card: NewCard) -> Result<CardRow> {
        let mut tables = self.tables();
        if !tables.columns.contains_key(&card.column_id) {
            return Err(TavolaError::not_found("Column", card.column_id));
        }
        let now = Utc::now();
        let row = CardRow {
            id: CardId::new(),
            title: card.title,
            description: card.description,
            column_id: card.column_id,
            position: card.position,
            due_date: card.due_date,
            created_by: card.created_by,
            assigned_to: card.assigned_to,
            created_at: now,
            updated_at: now,
        };
        tables.cards.insert(row.id, row.clone());
        Ok(row)
    }

    async fn insert_label(&self, label: NewLabel) -> Result<LabelRow> {
        let mut tables = self.tables();
        if !tables.boards.contains_key(&label.board_id) {
            return Err(TavolaError::not_found("Board", label.board_id));
        }
        let row = LabelRow {
            id: LabelId::new(),
            name: label.name,
            color: label.color,
            board_id: label.board_id,
        };
        tables.labels.insert(row.id, row.clone());
        Ok(row)
    }

    async fn attach_label(&self, card_id: CardId, label_id: LabelId) -> Result<()> {
        let mut tables = self.tables();
        if !tables.cards.contains_key(&card_id) {
            return Err(TavolaError::not_found("Card", card_id));
        }
        if !tables.labels.contains_key(&label_id) {
            return Err(TavolaError::not_found("Label", label_id));
        }
        let already = tables
            .card_labels
            .iter()
            .any(|link| link.card_id == card_id && link.label_id == label_id);
        if !already {
            tables.card_labels.push(CardLabelRow {
                id: CardLabelId::new(),
                card_id,
                label_id,
            });
        }
        Ok(())
    }

    async fn detach_label(&self, card_id: CardId, label_id: LabelId) -> Result<()> {
        self.tables()
            .card_labels
            .retain(|link| !(link.card_id == card_id && link.label_id == label_id));
        Ok(())
    }

    async fn update_board(&self, id: BoardId, patch: BoardPatch) -> Result<()> {
        let mut tables = self.tables();
        let board = tables
            .boards
            .get_mut(&id)
            .ok_or_else(|| TavolaError::not_found("Board", id))?;
        if let Some(title) = patch.title {
            board.title = title;
        }
        if let Some(description) = patch.description {
            board.description = description;
        }
        if let Some(background_color) = patch.background_color {
            board.background_color = background_color;
        }
        board.updated_at = Utc::now();
        Ok(())
    }

    async fn update_column(&self, id: ColumnId, patch: ColumnPatch) -> Result<()> {
        let mut tables = self.tables();
        let column = tables
            .columns
            .get_mut(&id)
            .ok_or_else(|| TavolaError::not_found("Column", id))?;
        if let Some(title) = patch.title {
            column.title = title;
        }
        if let Some(position) = patch.position {
            column.position = position;
        }
        column.updated_at = Utc::now();
        Ok(())
    }

    async fn update_card(&self, id: CardId, patch: CardPatch) -> Result<()> {
        self.take_update_card_fault()?;
        let mut tables = self.tables();
        let card = tables
            .cards
            .get_mut(&id)
            .ok_or_else(|| TavolaError::not_found("Card", id))?;
        if let Some(title) = patch.title {
            card.title = title;
        }
        if let Some(description) = patch.description {
            card.description = description;
        }
        if let Some(column_id) = patch.column_id {
            card.column_id = column_id;
        }
        if let Some(position) = patch.position {
            card.position = position;
        }
        if let Some(due_date) = patch.due_date {
            card.due_date = due_date;
        }
        if let Some(assigned_to) = patch.assigned_to {
            card.assigned_to = assigned_to;
        }
        card.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_board(&self, id: BoardId) -> Result<()> {
        let mut tables = self.tables();
        tables
            .boards
            .remove(&id)
            .ok_or_else(|| TavolaError::not_found("Board", id))?;

        let columns: Vec<ColumnId> = tables
            .columns
            .values()
            .filter(|column| column.board_id == id)
            .map(|column| column.id)
            .collect();
        let cards: Vec<CardId> = tables
            .cards
            .values()
            .filter(|card| columns.contains(&card.column_id))
            .map(|card| card.id)
            .collect();
        let labels: Vec<LabelId> = tables
            .labels
            .values()
            .filter(|label| label.board_id == id)
            .map(|label| label.id)
            .collect();

        tables.columns.retain(|column_id, _| !columns.contains(column_id));
        tables.cards.retain(|card_id, _| !cards.contains(card_id));
        tables.labels.retain(|label_id, _| !labels.contains(label_id));
        tables
            .card_labels
            .retain(|link| !cards.contains(&link.card_id) && !labels.contains(&link.label_id));
        tables.members.retain(|_, member| member.board_id != id);
        Ok(())
    }

    async fn delete_column(&self, id: ColumnId) -> Result<()> {
        let mut tables = self.tables();
        tables
            .columns
            .remove(&id)
            .ok_or_else(|| TavolaError::not_found("Column", id))?;

        let cards: Vec<CardId> = tables
            .cards
            .values()
            .filter(|card| card.column_id == id)
            .map(|card| card.id)
            .collect();
        tables.cards.retain(|card_id, _| !cards.contains(card_id));
        tables
            .card_labels
            .retain(|link| !cards.contains(&link.card_id));
        Ok(())
    }

    async fn delete_card(&self, id: CardId) -> Result<()> {
        let mut tables = self.tables();
        tables
            .cards
            .remove(&id)
            .ok_or_else(|| TavolaError::not_found("Card", id))?;
        tables.card_labels.retain(|link| link.card_id != id);
        Ok(())
    }

    async fn delete_label(&self, id: LabelId) -> Result<()> {
        let mut tables = self.tables();
        tables
            .labels
            .remove(&id)
            .ok_or_else(|| TavolaError::not_found("Label", id))?;
        tables.card_labels.retain(|link| link.label_id != id);
        Ok(())
    }
}

struct AccountRecord {
    password: String,
    user: User,
}

/// In-memory [`AuthBackend`] with password-checked local accounts.
pub struct InMemoryAuth {
    accounts: Mutex<HashMap<String, AccountRecord>>,
    current: Mutex<Option<User>>,
    events: broadcast::Sender<AuthEvent>,
}

impl InMemoryAuth {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            events,
        }
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, AccountRecord>> {
        self.accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current(&self) -> MutexGuard<'_, Option<User>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn establish(&self, user: User) -> Session {
        let session = Session {
            user: user.clone(),
            access_token: Uuid::new_v4().to_string(),
        };
        *self.current() = Some(user);
        // Nobody listening is fine.
        let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
        session
    }
}

impl Default for InMemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthBackend for InMemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let user = User::new(email);
        {
            let mut accounts = self.accounts();
            if accounts.contains_key(email) {
                return Err(TavolaError::RemoteOperationFailed(format!(
                    "account already exists: {email}"
                )));
            }
            accounts.insert(
                email.to_string(),
                AccountRecord {
                    password: password.to_string(),
                    user: user.clone(),
                },
            );
        }
        Ok(self.establish(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let user = {
            let accounts = self.accounts();
            match accounts.get(email) {
                Some(record) if record.password == password => record.user.clone(),
                _ => {
                    return Err(TavolaError::RemoteOperationFailed(
                        "invalid email or password".to_string(),
                    ))
                }
            }
        };
        Ok(self.establish(user))
    }

    async fn sign_out(&self) -> Result<()> {
        *self.current() = None;
        let _ = self.events.send(AuthEvent::SignedOut);
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>> {
        Ok(self.current().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
