use crate::domain::ids::{BoardId, MemberId, UserId};
use crate::remote::rows::BoardMemberRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership role on a board.
///
/// Every board has exactly one `Owner`, created with the board itself;
/// nothing in the mutation paths reassigns ownership afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Editor,
    Viewer,
}

impl Role {
    /// Whether the role may mutate board contents.
    pub fn can_edit(&self) -> bool {
        matches!(self, Role::Owner | Role::Editor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Editor => write!(f, "editor"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// A (board, user, role) membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMember {
    pub id: MemberId,
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: Role,
}

impl From<BoardMemberRow> for BoardMember {
    fn from(row: BoardMemberRow) -> Self {
        Self {
            id: row.id,
            board_id: row.board_id,
            user_id: row.user_id,
            role: row.role,
        }
    }
}

/// An authenticated user profile, as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl User {
    /// Creates a profile with a fresh id and no optional metadata.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            name: None,
            avatar_url: None,
        }
    }
}
