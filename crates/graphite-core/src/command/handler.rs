//! Command handlers: validate, call the quest store or the suggestion
//! service once, and format the reply.

use std::collections::HashMap;

use graphite_types::error::{QuestError, SuggestionError};
use graphite_types::quest::{points_in_range, total_pages, QuestId};

use crate::identity::IdentityResolver;
use crate::repository::quest::QuestRepository;
use crate::service::quest::QuestService;
use crate::suggest::provider::SuggestionProvider;
use crate::suggest::SuggestionService;

use super::reply::{self, ListedQuest};
use super::{DEFAULT_PAGE, Invocation, QuestCommand};

/// Handlers for the `/quest` subcommands.
///
/// Shared across concurrent invocations behind an `Arc`; holds no mutable
/// state of its own.
pub struct QuestCommands<R: QuestRepository, P: SuggestionProvider> {
    quests: QuestService<R>,
    suggestions: SuggestionService<P>,
    page_size: u32,
}

impl<R: QuestRepository, P: SuggestionProvider> QuestCommands<R, P> {
    pub fn new(quests: QuestService<R>, suggestions: SuggestionService<P>, page_size: u32) -> Self {
        Self {
            quests,
            suggestions,
            page_size: page_size.max(1),
        }
    }

    pub fn quests(&self) -> &QuestService<R> {
        &self.quests
    }

    pub fn suggestions(&self) -> &SuggestionService<P> {
        &self.suggestions
    }

    /// Route an invocation to its handler. Always produces exactly one reply.
    pub async fn dispatch<I: IdentityResolver>(&self, invocation: Invocation, identity: &I) -> String {
        let Invocation { user_id, command } = invocation;
        match command {
            QuestCommand::Create {
                title,
                description,
                points,
            } => self.create(&title, &description, points, &user_id).await,
            QuestCommand::List { page } => self.list(page, identity).await,
            QuestCommand::Claim { quest_id } => self.claim(&quest_id, &user_id).await,
            QuestCommand::Suggest { theme } => self.suggest(&theme).await,
        }
    }

    /// `/quest create`
    #[tracing::instrument(name = "quest.create", skip(self, title, description), fields(user = %creator_id))]
    pub async fn create(&self, title: &str, description: &str, points: i64, creator_id: &str) -> String {
        // Fail fast: out-of-range points never reach the store.
        if !points_in_range(points) {
            return reply::points_out_of_range();
        }

        match self
            .quests
            .create_quest(title, description, creator_id, points)
            .await
        {
            Ok(quest) => {
                tracing::info!(quest_id = %quest.id, points, "quest created");
                reply::quest_created(&quest)
            }
            Err(QuestError::Validation(reason)) => reply::invalid_input(&reason),
            Err(e) => {
                tracing::error!(error = %e, "failed to create quest");
                reply::internal_error()
            }
        }
    }

    /// `/quest list`
    #[tracing::instrument(name = "quest.list", skip(self, identity))]
    pub async fn list<I: IdentityResolver>(&self, page: Option<i64>, identity: &I) -> String {
        let page = page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return reply::invalid_page();
        }

        let result = match self.quests.list_quests(page, self.page_size).await {
            Ok(result) => result,
            Err(QuestError::PageOutOfRange {
                requested,
                total_pages,
            }) => return reply::page_out_of_range(requested, total_pages),
            Err(QuestError::Validation(reason)) => return reply::invalid_input(&reason),
            Err(e) => {
                tracing::error!(error = %e, "failed to list quests");
                return reply::internal_error();
            }
        };

        if result.items.is_empty() {
            return reply::no_quests();
        }

        let mut names: HashMap<&str, Option<String>> = HashMap::new();
        for quest in &result.items {
            if !names.contains_key(quest.creator_id.as_str()) {
                let name = identity.display_name(&quest.creator_id).await;
                names.insert(quest.creator_id.as_str(), name);
            }
        }

        let listed: Vec<ListedQuest<'_>> = result
            .items
            .iter()
            .map(|quest| ListedQuest {
                quest,
                creator_name: names.get(quest.creator_id.as_str()).cloned().flatten(),
            })
            .collect();

        let pages = total_pages(result.total, self.page_size);
        let first_index = (page as u64 - 1) * u64::from(self.page_size) + 1;
        reply::quest_list(&listed, page, pages, first_index)
    }

    /// `/quest claim`
    #[tracing::instrument(name = "quest.claim", skip(self), fields(user = %user_id))]
    pub async fn claim(&self, quest_id: &str, user_id: &str) -> String {
        let Ok(id) = quest_id.parse::<QuestId>() else {
            return reply::quest_not_found(quest_id);
        };

        match self.quests.claim_quest(id, user_id).await {
            Ok(claimed) => {
                tracing::info!(quest_id = %id, claim_id = %claimed.claim.id, "quest claimed");
                reply::quest_claimed(&claimed)
            }
            Err(QuestError::NotFound) => reply::quest_not_found(quest_id),
            Err(QuestError::SelfClaim) => reply::self_claim(id),
            Err(QuestError::DuplicateClaim) => reply::duplicate_claim(id),
            Err(e) => {
                tracing::error!(quest_id = %id, error = %e, "failed to claim quest");
                reply::internal_error()
            }
        }
    }

    /// `/quest suggest`
    #[tracing::instrument(name = "quest.suggest", skip(self))]
    pub async fn suggest(&self, theme: &str) -> String {
        if theme.trim().is_empty() {
            return reply::missing_theme();
        }

        match self.suggestions.suggest(theme).await {
            Ok(suggestion) => reply::suggestion(theme, &suggestion),
            Err(e @ SuggestionError::Configuration(_)) => {
                tracing::warn!(error = %e, "suggestion provider is not configured");
                reply::suggestion_unavailable()
            }
            Err(e @ SuggestionError::ProviderUnavailable(_)) => {
                tracing::warn!(error = %e, "suggestion provider failed");
                reply::suggestion_unavailable()
            }
        }
    }
}
