//! Quest store service.
//!
//! Validates input, stamps timestamps, and maps repository failures onto the
//! `QuestError` taxonomy. Holds no state of its own: everything that must be
//! coordinated across concurrent invocations (id assignment, claim
//! exclusivity) is delegated to the repository's storage constraints.

use graphite_types::error::{QuestError, RepositoryError};
use graphite_types::quest::{
    ClaimedQuest, MAX_POINTS, MIN_POINTS, NewClaim, NewQuest, Quest, QuestId, QuestPage,
    points_in_range, total_pages,
};

use crate::repository::quest::QuestRepository;

/// Service owning quest creation, listing, lookup, and claiming.
///
/// Generic over the repository port; graphite-core never depends on graphite-infra.
pub struct QuestService<R: QuestRepository> {
    repo: R,
}

impl<R: QuestRepository> QuestService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Create a quest. Not idempotent: every call produces a new quest.
    pub async fn create_quest(
        &self,
        title: &str,
        description: &str,
        creator_id: &str,
        points: i64,
    ) -> Result<Quest, QuestError> {
        validate_points(points)?;

        let title = title.trim();
        if title.is_empty() {
            return Err(QuestError::Validation("title cannot be empty".to_string()));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(QuestError::Validation(
                "description cannot be empty".to_string(),
            ));
        }

        let quest = NewQuest {
            title: title.to_string(),
            description: description.to_string(),
            creator_id: creator_id.to_string(),
            points,
            created_at: chrono::Utc::now(),
        };

        self.repo.create(&quest).await.map_err(storage_error)
    }

    /// List one page of quests, newest first. `page` is 1-indexed.
    ///
    /// An empty store yields an empty page for any valid `page`; a non-empty
    /// store yields `PageOutOfRange` past the last page.
    pub async fn list_quests(&self, page: i64, page_size: u32) -> Result<QuestPage, QuestError> {
        if page < 1 {
            return Err(QuestError::Validation("page must be 1 or higher".to_string()));
        }
        if page_size == 0 {
            return Err(QuestError::Validation(
                "page size must be 1 or higher".to_string(),
            ));
        }

        let limit = i64::from(page_size);
        let offset = (page - 1).saturating_mul(limit);

        let result = self
            .repo
            .list_page(limit, offset)
            .await
            .map_err(storage_error)?;

        if result.total == 0 {
            return Ok(QuestPage::default());
        }

        let pages = total_pages(result.total, page_size);
        if page > i64::from(pages) {
            return Err(QuestError::PageOutOfRange {
                requested: page,
                total_pages: pages,
            });
        }

        Ok(result)
    }

    /// Get a quest by id.
    pub async fn get_quest(&self, id: QuestId) -> Result<Quest, QuestError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or(QuestError::NotFound)
    }

    /// Claim a quest on behalf of `user_id`.
    ///
    /// The creator check reads the immutable `creator_id`, so it cannot race.
    /// Duplicate detection is left to the repository's uniqueness constraint;
    /// of two concurrent claims for the same pair exactly one insert wins.
    pub async fn claim_quest(&self, id: QuestId, user_id: &str) -> Result<ClaimedQuest, QuestError> {
        let quest = self.get_quest(id).await?;

        if quest.creator_id == user_id {
            return Err(QuestError::SelfClaim);
        }

        let claim = NewClaim {
            quest_id: quest.id,
            user_id: user_id.to_string(),
            claimed_at: chrono::Utc::now(),
        };

        let claim = self.repo.create_claim(&claim).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => QuestError::DuplicateClaim,
            RepositoryError::NotFound => QuestError::NotFound,
            other => storage_error(other),
        })?;

        Ok(ClaimedQuest { quest, claim })
    }
}

/// Reject rewards outside `MIN_POINTS..=MAX_POINTS`.
pub fn validate_points(points: i64) -> Result<(), QuestError> {
    if points_in_range(points) {
        Ok(())
    } else {
        Err(QuestError::Validation(format!(
            "points must be between {MIN_POINTS} and {MAX_POINTS}"
        )))
    }
}

fn storage_error(err: RepositoryError) -> QuestError {
    QuestError::Storage(err.to_string())
}
