use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::{ActingUserId, UserCtx};

/// Handler-side access to the identity resolved by `require_user`.
///
/// Missing `UserCtx` means the route was wired without the middleware, which
/// is a server bug, so it surfaces as a 500 rather than a client error.
pub struct CurrentUser(pub UserCtx);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserCtx>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::error!(
                    path = %parts.uri.path(),
                    "CurrentUser extracted on a route without require_user"
                );
                AppError::Internal
            })
    }
}

/// Whatever identifier either middleware attached, if any.
pub struct MaybeUserId(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeUserId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUserId(
            parts
                .extensions
                .get::<ActingUserId>()
                .map(|id| id.0.clone()),
        ))
    }
}
