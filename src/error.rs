use thiserror::Error;

pub type Result<T> = std::result::Result<T, TavolaError>;

#[derive(Debug, Error)]
pub enum TavolaError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Remote operation failed: {0}")]
    RemoteOperationFailed(String),
}

impl TavolaError {
    /// Builds the error for a single-row fetch that matched nothing.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
