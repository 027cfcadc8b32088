/*
 * Responsibility
 * - The request-scoped identity types handlers get to see
 * - The middleware fills request extensions with these; handlers only read them
 */
use crate::repos::user_repo::UserRow;

/// Identity attached by the mandatory resolver.
///
/// Only ever constructed after the user row was found and is active, so
/// holding a `UserCtx` means the request is identified.
#[derive(Debug, Clone)]
pub struct UserCtx {
    pub user_id: String,
    pub user: UserRow,
}

impl UserCtx {
    pub fn new(user: UserRow) -> Self {
        Self {
            user_id: user.id.clone(),
            user,
        }
    }
}

/// The raw identifier the caller supplied, unvalidated.
///
/// Both middlewares attach this; under the optional resolver it is the only
/// thing attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUserId(pub String);
