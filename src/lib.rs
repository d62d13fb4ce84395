//! # Tavola Core
//!
//! Core board aggregate logic and domain models for Tavola kanban boards.
//!
//! This crate owns the in-memory representation of a board (board → ordered
//! columns → ordered cards → label sets), the mutation operations that keep
//! the ordering invariants intact, and the reconciliation rules that treat
//! the hosted backend as the source of truth. The backend itself stays
//! opaque behind the [`remote::RemoteStore`] and [`remote::AuthBackend`]
//! seams; no UI or wire-protocol concerns live here.

pub mod domain;
pub mod error;
pub mod remote;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use domain::{
    board::{Board, Column},
    card::{Card, Label},
    ids::{BoardId, CardId, ColumnId, LabelId, MemberId, UserId},
    member::{BoardMember, Role, User},
};
pub use error::{Result, TavolaError};
pub use remote::{AuthBackend, AuthEvent, RemoteStore, Session};
pub use session::{AuthState, SessionTracker};
pub use store::BoardStore;
