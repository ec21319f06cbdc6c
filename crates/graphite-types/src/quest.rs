use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Lowest reward a quest may carry.
pub const MIN_POINTS: i64 = 1;

/// Highest reward a quest may carry.
pub const MAX_POINTS: i64 = 1000;

/// Store-assigned quest identifier.
///
/// Backed by SQLite's `AUTOINCREMENT` key, so ids are strictly increasing in
/// insertion order. Users see and type it as plain decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestId(pub i64);

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerate the `#12` form the list reply shows.
        let s = s.trim().trim_start_matches('#');
        Ok(Self(s.parse()?))
    }
}

/// Store-assigned claim identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimId(pub i64);

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted quest.
///
/// Quests are written once by `/quest create` and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    /// Platform user id of the member who created the quest.
    pub creator_id: String,
    /// Reward in points, always within `MIN_POINTS..=MAX_POINTS`.
    pub points: i64,
    /// Sole ordering key for listings (newest first).
    pub created_at: DateTime<Utc>,
}

/// A quest that has passed validation but has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuest {
    pub title: String,
    pub description: String,
    pub creator_id: String,
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

impl NewQuest {
    /// Attach the id the store generated on insert.
    pub fn into_quest(self, id: QuestId) -> Quest {
        Quest {
            id,
            title: self.title,
            description: self.description,
            creator_id: self.creator_id,
            points: self.points,
            created_at: self.created_at,
        }
    }
}

/// A user's claim on a quest. At most one per (quest, user) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub quest_id: QuestId,
    pub user_id: String,
    pub claimed_at: DateTime<Utc>,
}

/// A claim ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClaim {
    pub quest_id: QuestId,
    pub user_id: String,
    pub claimed_at: DateTime<Utc>,
}

/// Result of a successful claim: the claim plus the quest it points at,
/// so replies can show the quest without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimedQuest {
    pub quest: Quest,
    pub claim: Claim,
}

/// One page of a quest listing plus the total number of quests in the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestPage {
    pub items: Vec<Quest>,
    pub total: u64,
}

/// Number of pages needed to show `total` items `page_size` at a time.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size)).min(u64::from(u32::MAX)) as u32
}

/// Returns true when `points` is an acceptable quest reward.
pub fn points_in_range(points: i64) -> bool {
    (MIN_POINTS..=MAX_POINTS).contains(&points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_id_parse_plain_and_hash() {
        assert_eq!("42".parse::<QuestId>().unwrap(), QuestId(42));
        assert_eq!(" #7 ".parse::<QuestId>().unwrap(), QuestId(7));
        assert!("abc".parse::<QuestId>().is_err());
        assert!("".parse::<QuestId>().is_err());
    }

    #[test]
    fn test_quest_id_display() {
        assert_eq!(QuestId(1234).to_string(), "1234");
    }

    #[test]
    fn test_points_bounds() {
        assert!(!points_in_range(0));
        assert!(points_in_range(1));
        assert!(points_in_range(1000));
        assert!(!points_in_range(1001));
        assert!(!points_in_range(-5));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_new_quest_into_quest_keeps_fields() {
        let now = Utc::now();
        let quest = NewQuest {
            title: "Find the Lost Gem".to_string(),
            description: "Explore the cave".to_string(),
            creator_id: "u1".to_string(),
            points: 50,
            created_at: now,
        }
        .into_quest(QuestId(3));

        assert_eq!(quest.id, QuestId(3));
        assert_eq!(quest.title, "Find the Lost Gem");
        assert_eq!(quest.created_at, now);
    }
}
