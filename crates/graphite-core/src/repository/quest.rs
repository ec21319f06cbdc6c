//! Quest repository trait definition.

use graphite_types::error::RepositoryError;
use graphite_types::quest::{Claim, NewClaim, NewQuest, Quest, QuestId, QuestPage};

/// Repository trait for quest and claim persistence.
///
/// Implementations live in graphite-infra (e.g., SqliteQuestRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
///
/// Cross-invocation coordination belongs here, not in callers: ids are
/// generated by the store and claim exclusivity is a storage-level
/// uniqueness constraint.
pub trait QuestRepository: Send + Sync {
    /// Insert a quest in a single statement. Returns it with the generated id.
    fn create(
        &self,
        quest: &NewQuest,
    ) -> impl std::future::Future<Output = Result<Quest, RepositoryError>> + Send;

    /// Get a quest by its id.
    fn get_by_id(
        &self,
        id: QuestId,
    ) -> impl std::future::Future<Output = Result<Option<Quest>, RepositoryError>> + Send;

    /// Fetch up to `limit` quests after skipping `offset`, newest first
    /// (`created_at` descending, later insertion first on ties), together
    /// with the total quest count.
    fn list_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> impl std::future::Future<Output = Result<QuestPage, RepositoryError>> + Send;

    /// Insert a claim.
    ///
    /// Returns `RepositoryError::Conflict` when a claim for the same
    /// (quest, user) pair already exists, and `RepositoryError::NotFound`
    /// when the quest does not exist.
    fn create_claim(
        &self,
        claim: &NewClaim,
    ) -> impl std::future::Future<Output = Result<Claim, RepositoryError>> + Send;
}
