//! In-memory doubles for the ports, shared by the unit tests in this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use graphite_types::error::{RepositoryError, SuggestionError};
use graphite_types::quest::{Claim, ClaimId, NewClaim, NewQuest, Quest, QuestId, QuestPage};
use graphite_types::suggestion::GenerationParameters;

use crate::identity::IdentityResolver;
use crate::repository::quest::QuestRepository;
use crate::suggest::provider::SuggestionProvider;

/// Vec-backed repository that counts every call it receives.
#[derive(Default)]
pub struct MockQuestRepository {
    quests: Mutex<Vec<Quest>>,
    claims: Mutex<Vec<Claim>>,
    calls: AtomicUsize,
    broken: bool,
}

impl MockQuestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation fails like a lost connection.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn claim_count(&self) -> usize {
        self.claims.lock().unwrap().len()
    }

    fn enter(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(RepositoryError::Query("database is locked".to_string()));
        }
        Ok(())
    }
}

impl QuestRepository for MockQuestRepository {
    async fn create(&self, quest: &NewQuest) -> Result<Quest, RepositoryError> {
        self.enter()?;
        let mut quests = self.quests.lock().unwrap();
        let id = QuestId(quests.len() as i64 + 1);
        let created = quest.clone().into_quest(id);
        quests.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: QuestId) -> Result<Option<Quest>, RepositoryError> {
        self.enter()?;
        Ok(self
            .quests
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn list_page(&self, limit: i64, offset: i64) -> Result<QuestPage, RepositoryError> {
        self.enter()?;
        let mut quests = self.quests.lock().unwrap().clone();
        quests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = quests.len() as u64;
        let items = quests
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok(QuestPage { items, total })
    }

    async fn create_claim(&self, claim: &NewClaim) -> Result<Claim, RepositoryError> {
        self.enter()?;
        if !self.quests.lock().unwrap().iter().any(|q| q.id == claim.quest_id) {
            return Err(RepositoryError::NotFound);
        }
        let mut claims = self.claims.lock().unwrap();
        if claims
            .iter()
            .any(|c| c.quest_id == claim.quest_id && c.user_id == claim.user_id)
        {
            return Err(RepositoryError::Conflict(
                "UNIQUE constraint failed: quest_claims.quest_id, quest_claims.user_id"
                    .to_string(),
            ));
        }
        let created = Claim {
            id: ClaimId(claims.len() as i64 + 1),
            quest_id: claim.quest_id,
            user_id: claim.user_id.clone(),
            claimed_at: claim.claimed_at,
        };
        claims.push(created.clone());
        Ok(created)
    }
}

/// Provider returning a canned generation (or a canned failure).
pub struct MockProvider {
    outcome: MockOutcome,
    calls: AtomicUsize,
}

enum MockOutcome {
    Text(String),
    Unconfigured,
    Unavailable,
}

impl MockProvider {
    fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(text: &str) -> Self {
        Self::with_outcome(MockOutcome::Text(text.to_string()))
    }

    pub fn unconfigured() -> Self {
        Self::with_outcome(MockOutcome::Unconfigured)
    }

    pub fn unavailable() -> Self {
        Self::with_outcome(MockOutcome::Unavailable)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SuggestionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParameters,
    ) -> Result<String, SuggestionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            MockOutcome::Text(text) => Ok(text.clone()),
            MockOutcome::Unconfigured => {
                Err(SuggestionError::Configuration("no API key".to_string()))
            }
            MockOutcome::Unavailable => {
                Err(SuggestionError::ProviderUnavailable("HTTP 503".to_string()))
            }
        }
    }
}

/// Resolves a fixed set of user ids; everything else is unknown.
#[derive(Default)]
pub struct MockIdentity {
    names: Vec<(String, String)>,
}

impl MockIdentity {
    pub fn with(mut self, user_id: &str, name: &str) -> Self {
        self.names.push((user_id.to_string(), name.to_string()));
        self
    }
}

impl IdentityResolver for MockIdentity {
    async fn display_name(&self, user_id: &str) -> Option<String> {
        self.names
            .iter()
            .find(|(id, _)| id == user_id)
            .map(|(_, name)| name.clone())
    }
}
