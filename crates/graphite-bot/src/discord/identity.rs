//! Display names from the Discord REST API.

use std::sync::Arc;

use serenity::all::{Http, UserId};

use graphite_core::identity::IdentityResolver;

/// Resolves user ids through `GET /users/{id}`. Any failure yields `None`.
pub struct DiscordIdentityResolver {
    http: Arc<Http>,
}

impl DiscordIdentityResolver {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Parse a Discord snowflake. Zero is not a valid id.
pub fn parse_user_id(user_id: &str) -> Option<UserId> {
    match user_id.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(UserId::new(id)),
    }
}

impl IdentityResolver for DiscordIdentityResolver {
    async fn display_name(&self, user_id: &str) -> Option<String> {
        let id = parse_user_id(user_id)?;
        match self.http.get_user(id).await {
            Ok(user) => Some(user.global_name.unwrap_or(user.name)),
            Err(e) => {
                tracing::debug!(user_id, error = %e, "display name lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("80351110224678912"), Some(UserId::new(80351110224678912)));
        assert_eq!(parse_user_id("0"), None);
        assert_eq!(parse_user_id("local"), None);
        assert_eq!(parse_user_id(""), None);
    }
}
