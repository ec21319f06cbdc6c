//! SQLite quest repository implementation.
//!
//! Implements `QuestRepository` from `graphite-core` using sqlx with split read/write pools.
//! Every write is a single `INSERT ... RETURNING id`, so ids come from the
//! store and a failed insert leaves nothing behind. Claim exclusivity is the
//! `UNIQUE(quest_id, user_id)` constraint on `quest_claims`.

use chrono::{DateTime, SecondsFormat, Utc};
use graphite_core::repository::quest::QuestRepository;
use graphite_types::error::RepositoryError;
use graphite_types::quest::{Claim, ClaimId, NewClaim, NewQuest, Quest, QuestId, QuestPage};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `QuestRepository`.
#[derive(Clone)]
pub struct SqliteQuestRepository {
    pool: DatabasePool,
}

impl SqliteQuestRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Quest.
struct QuestRow {
    id: i64,
    title: String,
    description: String,
    creator_id: String,
    points: i64,
    created_at: String,
}

impl QuestRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            creator_id: row.try_get("creator_id")?,
            points: row.try_get("points")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_quest(self) -> Result<Quest, RepositoryError> {
        Ok(Quest {
            id: QuestId(self.id),
            title: self.title,
            description: self.description,
            creator_id: self.creator_id,
            points: self.points,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 (microseconds, `Z`), so text order is time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        err @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)) => {
            RepositoryError::Connection(err.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

impl QuestRepository for SqliteQuestRepository {
    async fn create(&self, quest: &NewQuest) -> Result<Quest, RepositoryError> {
        let created_at = format_datetime(&quest.created_at);

        let row = sqlx::query(
            "INSERT INTO quests (title, description, creator_id, points, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(&quest.creator_id)
        .bind(quest.points)
        .bind(&created_at)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Report the timestamp exactly as stored.
        let mut stored = quest.clone();
        stored.created_at = parse_datetime(&created_at)?;
        Ok(stored.into_quest(QuestId(id)))
    }

    async fn get_by_id(&self, id: QuestId) -> Result<Option<Quest>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM quests WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let quest_row =
                    QuestRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(quest_row.into_quest()?))
            }
            None => Ok(None),
        }
    }

    async fn list_page(&self, limit: i64, offset: i64) -> Result<QuestPage, RepositoryError> {
        // Count and page from one snapshot.
        let mut tx = self.pool.reader.begin().await.map_err(map_sqlx_error)?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quests")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let rows = sqlx::query(
            "SELECT * FROM quests ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let quest_row =
                QuestRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            items.push(quest_row.into_quest()?);
        }

        Ok(QuestPage {
            items,
            total: total.max(0) as u64,
        })
    }

    async fn create_claim(&self, claim: &NewClaim) -> Result<Claim, RepositoryError> {
        let claimed_at = format_datetime(&claim.claimed_at);

        let result = sqlx::query(
            "INSERT INTO quest_claims (quest_id, user_id, claimed_at)
             VALUES (?, ?, ?)
             RETURNING id",
        )
        .bind(claim.quest_id.0)
        .bind(&claim.user_id)
        .bind(&claimed_at)
        .fetch_one(&self.pool.writer)
        .await;

        let row = match result {
            Ok(row) => row,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(RepositoryError::Conflict(format!(
                    "quest {} already claimed by {}",
                    claim.quest_id, claim.user_id
                )));
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                return Err(RepositoryError::NotFound);
            }
            Err(e) => return Err(map_sqlx_error(e)),
        };

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Claim {
            id: ClaimId(id),
            quest_id: claim.quest_id,
            user_id: claim.user_id.clone(),
            claimed_at: parse_datetime(&claimed_at)?,
        })
    }
}
