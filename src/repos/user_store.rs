//! Read-side interface to the users table, as seen by the user context resolver.
use async_trait::async_trait;

use crate::repos::{error::RepoResult, user_repo::UserRow};

/// Lookup of a single user by its opaque id.
///
/// The resolver only ever reads through this trait, so it can be backed by
/// Postgres in the service and by an in-memory map in tests.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Returns `Ok(None)` when no row has this id.
    async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<UserRow>>;
}
