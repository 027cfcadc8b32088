/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - the user context resolver (backed by the injected UserStore)
 *   - the body limit the resolver honours when it has to peek at a body
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::repos::user_store::UserStore;
use crate::services::user_ctx::UserContextService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub user_ctx: Arc<UserContextService>,
    pub body_limit_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, body_limit_bytes: usize) -> Self {
        Self {
            user_ctx: Arc::new(UserContextService::new(store)),
            body_limit_bytes,
        }
    }
}
