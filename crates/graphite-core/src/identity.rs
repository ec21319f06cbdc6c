//! Identity resolution port.
//!
//! Maps a platform user id to a human-readable display name. Handlers must
//! degrade gracefully: `None` means "show the raw id".

/// Resolves user ids to display names.
pub trait IdentityResolver: Send + Sync {
    /// Display name for `user_id`, or `None` if the identity is unknown or
    /// the lookup failed.
    fn display_name(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Option<String>> + Send;
}

/// Resolver that never knows anyone. Used where no platform lookup exists
/// (the local CLI).
#[derive(Debug, Clone, Copy, Default)]
pub struct RawIdResolver;

impl IdentityResolver for RawIdResolver {
    async fn display_name(&self, _user_id: &str) -> Option<String> {
        None
    }
}
