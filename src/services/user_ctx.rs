//! Resolves an identifier candidate into a validated acting user.
//!
//! This is the storage half of mandatory resolution: one read, then the
//! existence and `is_active` checks. Finding the candidate in the request is
//! the middleware's job.

use std::sync::Arc;

use thiserror::Error;

use crate::api::v1::extractors::UserCtx;
use crate::error::AppError;
use crate::repos::{error::RepoError, user_store::UserStore};

pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_INACTIVE: &str = "User account is inactive";

#[derive(Debug, Error)]
pub enum UserCtxError {
    #[error("user not found")]
    NotFound,
    #[error("user account is inactive")]
    Inactive,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<UserCtxError> for AppError {
    fn from(e: UserCtxError) -> Self {
        match e {
            UserCtxError::NotFound => AppError::not_found(USER_NOT_FOUND),
            UserCtxError::Inactive => AppError::forbidden(USER_INACTIVE),
            UserCtxError::Repo(e) => e.into(),
        }
    }
}

#[derive(Clone)]
pub struct UserContextService {
    store: Arc<dyn UserStore>,
}

impl std::fmt::Debug for UserContextService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserContextService").finish_non_exhaustive()
    }
}

impl UserContextService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, user_id: &str) -> Result<UserCtx, UserCtxError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(UserCtxError::NotFound)?;

        if !user.is_active {
            return Err(UserCtxError::Inactive);
        }

        Ok(UserCtx::new(user))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::repos::{error::RepoResult, user_repo::UserRow};

    struct MapStore(HashMap<String, UserRow>);

    #[async_trait]
    impl UserStore for MapStore {
        async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<UserRow>> {
            Ok(self.0.get(user_id).cloned())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn find_by_id(&self, _user_id: &str) -> RepoResult<Option<UserRow>> {
            Err(RepoError::Db(sqlx::Error::PoolClosed))
        }
    }

    fn user(id: &str, is_active: bool) -> UserRow {
        UserRow {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: format!("User {id}"),
            role: "student".to_string(),
            is_active,
        }
    }

    fn service(users: Vec<UserRow>) -> UserContextService {
        let map = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        UserContextService::new(Arc::new(MapStore(map)))
    }

    #[tokio::test]
    async fn active_user_resolves_with_full_record() {
        let ctx = service(vec![user("42", true)]).resolve("42").await.unwrap();

        assert_eq!(ctx.user_id, "42");
        assert_eq!(ctx.user, user("42", true));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let err = service(vec![user("42", true)]).resolve("99").await.unwrap_err();
        assert!(matches!(err, UserCtxError::NotFound));
    }

    #[tokio::test]
    async fn inactive_user_is_rejected() {
        let err = service(vec![user("7", false)]).resolve("7").await.unwrap_err();
        assert!(matches!(err, UserCtxError::Inactive));
    }

    #[tokio::test]
    async fn store_failure_maps_to_internal() {
        let svc = UserContextService::new(Arc::new(BrokenStore));
        let err = svc.resolve("1").await.unwrap_err();

        assert!(matches!(err, UserCtxError::Repo(_)));
        assert!(matches!(AppError::from(err), AppError::Internal));
    }
}
