use thiserror::Error;

/// Errors surfaced by the quest store (service layer).
///
/// Everything except `Storage` is an expected outcome that command handlers
/// turn into a specific user-facing message.
#[derive(Debug, Error)]
pub enum QuestError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("quest not found")]
    NotFound,

    #[error("cannot claim a quest you created")]
    SelfClaim,

    #[error("quest already claimed by this user")]
    DuplicateClaim,

    #[error("page {requested} is out of range (total pages: {total_pages})")]
    PageOutOfRange { requested: i64, total_pages: u32 },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from the suggestion path. Never fatal, always answered with an apology.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("suggestion provider not configured: {0}")]
    Configuration(String),

    #[error("suggestion provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// Errors from repository operations (used by trait definitions in graphite-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
